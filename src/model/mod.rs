//! # Property Graph Model
//!
//! DTOs for the biological property graph the retrieval engine reads from.
//! Nodes are `BioEntity` records keyed by an `id` property of the form
//! `namespace:id`; relationships carry statement metadata (`stmt_hash`,
//! `belief`, `evidence_count`, `stmt_type`).
//!
//! Design rule: this module is pure data — no I/O, no state, no async.

pub mod node;
pub mod relationship;
pub mod path;
pub mod value;
pub mod property_map;

pub use node::{Node, NodeId, BIO_ENTITY_LABEL};
pub use relationship::{Relationship, RelId, Direction};
pub use path::Path;
pub use value::Value;
pub use property_map::{PropertyMap, props};

/// Property keys shared by the store, the Cypher renderer and the flattener.
pub mod keys {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const OBSOLETE: &str = "obsolete";
    pub const STMT_HASH: &str = "stmt_hash";
    pub const BELIEF: &str = "belief";
    pub const EVIDENCE_COUNT: &str = "evidence_count";
    pub const STMT_TYPE: &str = "stmt_type";
}
