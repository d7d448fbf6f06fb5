//! # Graph Store Trait
//!
//! The contract between the retrieval pipeline and a property-graph store.
//! The pipeline only ever reads: a store receives a [`QuerySpec`] and answers
//! with the matching paths.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory reference store for testing/embedding |
//!
//! A Bolt-backed store renders each `QuerySpec` with
//! [`query::cypher::render`](crate::query::cypher::render) and forwards the
//! text and parameters to the server.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entity::EntityRef;
use crate::model::Path;
use crate::query::QuerySpec;
use crate::{Error, Result};

pub use memory::{MemoryStore, StatementEdge};

/// One matched traversal as returned by a store. Consumed immediately by the
/// relation flattener; nothing downstream holds on to it.
pub type RawPath = Path;

// ============================================================================
// Store capabilities
// ============================================================================

/// What a store can do beyond `run`.
///
/// All fields default to false. Stores override via `capabilities()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCapabilities {
    /// `relationship_summary` is implemented.
    pub supports_summary: bool,
}

// ============================================================================
// Relationship summary
// ============================================================================

/// Count of relationships touching one entity, per label and statement type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipSummary {
    pub entity: String,
    pub relation_label: String,
    pub stmt_type: Option<String>,
    pub count: u64,
}

// ============================================================================
// GraphStore Trait
// ============================================================================

/// Read-only access to the property graph.
#[async_trait]
pub trait GraphStore: Send + Sync + 'static {
    /// Execute one traversal.
    ///
    /// No match is an empty vector, not an error. An unreachable or timed
    /// out store is `Error::StoreUnavailable`; a store that rejects the
    /// query is `Error::StoreQueryFailed`. Paths come back in a stable order
    /// within one call.
    async fn run(&self, spec: &QuerySpec) -> Result<Vec<RawPath>>;

    /// Relationship counts touching each of `entities`, grouped by
    /// relation label and statement type.
    ///
    /// Default returns "not supported".
    async fn relationship_summary(
        &self,
        _entities: &[EntityRef],
    ) -> Result<Vec<RelationshipSummary>> {
        Err(Error::StoreQueryFailed("relationship summary not supported".into()))
    }

    /// Report what this store can do.
    fn capabilities(&self) -> StoreCapabilities {
        StoreCapabilities::default()
    }
}
