//! # Statement Assembly
//!
//! Pure transformations from raw store paths to the final result:
//!
//! ```text
//! RawPath ──flatten──► Relation ──assemble──► Statement (one per hash)
//!                                   │
//!                                   └─► kept Relation (one per Statement)
//! kept + enriched Statements ──build_index──► EvidenceIndex
//! ```
//!
//! Deduplication is keyed on the statement hash. The seed of each hash
//! group is the first relation seen in input order, and output order is
//! first-appearance order. The evidence index is built by hash lookup, so
//! it never depends on two lists lining up position by position.

pub mod relation;
pub mod statement;
pub mod assembler;
pub mod index;

pub use relation::{flatten, flatten_all, MalformedPath, Relation};
pub use statement::{Agent, Statement};
pub use assembler::{assemble, Assembly};
pub use index::{build_index, EvidenceIndex};
