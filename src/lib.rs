//! # cogex-rs — Statement Retrieval over a Biological Property Graph
//!
//! Retrieves the relationships connecting a target entity to a set of genes
//! or metabolites, under direction, polarity, belief and evidence
//! constraints, and assembles them into deduplicated statements with an
//! evidence-count index.
//!
//! ## Pipeline
//!
//! ```text
//! identifiers ─► Normalizer ─► QueryBuilder ─► GraphStore::run ─► flatten
//!     ─► assemble (dedup by hash) ─► enrich (EvidenceStore) ─► build_index
//! ```
//!
//! Only `GraphStore::run` and the evidence enrichment perform I/O. Every
//! other stage is a pure function over the previous stage's output.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cogex_rs::{Retriever, OraRequest, MemoryStore, MemoryEvidenceStore};
//!
//! # async fn example() -> cogex_rs::Result<()> {
//! let retriever = Retriever::new(MemoryStore::new(), MemoryEvidenceStore::new());
//!
//! let request = OraRequest::new("GO:0006955", ["HGNC:6019", "HGNC:11876"])
//!     .with_minimum_evidence(0);
//! let result = retriever.ora_statements(&request).await?;
//!
//! for stmt in &result.statements {
//!     println!("{stmt} ({:?} evidences)", result.evidence_counts.get(stmt.hash));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Collaborators
//!
//! | Trait | Reference impl | Role |
//! |-------|----------------|------|
//! | `GraphStore` | `MemoryStore` | Read-only path retrieval |
//! | `EvidenceStore` | `MemoryEvidenceStore` | Full evidence per statement hash |
//! | `SymbolResolver` | `SymbolTable` | Symbol → canonical identifier |
//! | `Grounder` | `LocalGrounder`, `RemoteGrounder` | Free-text grounding |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod entity;
pub mod normalize;
pub mod query;
pub mod storage;
pub mod assembly;
pub mod evidence;
pub mod config;
pub mod request;
pub mod retriever;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, Relationship, Path, Value, PropertyMap,
    NodeId, RelId, Direction,
};
pub use entity::{EntityRef, Namespace};

// ============================================================================
// Re-exports: Pipeline stages
// ============================================================================

pub use normalize::{
    Normalizer, NormalizedBatch, UnresolvedIdentifier, UnresolvedReason,
    SymbolResolver, SymbolTable,
    Grounder, GroundingError, GroundingMatch, GroundingStrategy, LocalGrounder,
    select_grounder, parse_entity_field,
};
#[cfg(feature = "remote-grounding")]
pub use normalize::RemoteGrounder;
pub use query::{
    QuerySpec, QueryBuilder, QueryDirection, Orientation, Polarity, Thresholds,
};
pub use storage::{GraphStore, MemoryStore, RawPath, RelationshipSummary, StoreCapabilities};
pub use assembly::{Relation, Statement, Agent, Assembly, EvidenceIndex};
pub use evidence::{Evidence, EvidenceStore, MemoryEvidenceStore};

// ============================================================================
// Re-exports: Entry points
// ============================================================================

pub use config::{RetrievalConfig, ModeDefaults, GroundingConfig};
pub use request::{OraRequest, SignedRequest, MetaboliteRequest};
pub use retriever::{Retriever, RetrievalResult};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unresolved identifier: {0}")]
    UnresolvedIdentifier(#[from] UnresolvedIdentifier),

    #[error("Graph store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Graph store query failed: {0}")]
    StoreQueryFailed(String),

    #[error("Evidence store unavailable: {0}")]
    EvidenceUnavailable(String),

    #[error("Grounding error: {0}")]
    Grounding(#[from] GroundingError),

    #[error("Assembly invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
