//! Relation records and the path flattener.

use serde::{Deserialize, Serialize};

use crate::entity::EntityRef;
use crate::model::{keys, Node, NodeId};
use crate::storage::RawPath;

/// One relationship instance, normalized out of a raw path.
///
/// `statement_hash` is the deduplication key: relations with equal hashes
/// describe the same statement no matter which query produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub source: EntityRef,
    pub target: EntityRef,
    pub source_name: Option<String>,
    pub target_name: Option<String>,
    pub statement_hash: i64,
    pub belief: f64,
    pub evidence_count: u64,
    pub statement_type: String,
    pub relation_label: String,
}

/// Why a raw path could not be flattened.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedPath {
    #[error("path has no relationship")]
    NoRelationship,

    #[error("path does not contain endpoint node {0}")]
    MissingNode(NodeId),

    #[error("relationship lacks a usable '{0}' property")]
    MissingProperty(&'static str),

    #[error("belief {0} is outside [0, 1]")]
    BeliefOutOfRange(f64),

    #[error("node {node} has no valid entity id")]
    BadEntityId { node: NodeId },
}

fn endpoint(path: &RawPath, id: NodeId) -> Result<(&Node, EntityRef), MalformedPath> {
    let node = path
        .nodes
        .iter()
        .find(|n| n.id == id)
        .ok_or(MalformedPath::MissingNode(id))?;
    let entity = node
        .entity_id()
        .and_then(|curie| curie.parse::<EntityRef>().ok())
        .ok_or(MalformedPath::BadEntityId { node: id })?;
    Ok((node, entity))
}

/// Flatten a one-hop path into a [`Relation`].
///
/// Statement hash, belief and evidence count are required. A missing
/// statement type falls back to the relation label.
pub fn flatten(path: &RawPath) -> Result<Relation, MalformedPath> {
    let rel = path.relationships.first().ok_or(MalformedPath::NoRelationship)?;

    let statement_hash = rel.stmt_hash().ok_or(MalformedPath::MissingProperty(keys::STMT_HASH))?;
    let belief = rel.belief().ok_or(MalformedPath::MissingProperty(keys::BELIEF))?;
    if !(0.0..=1.0).contains(&belief) {
        return Err(MalformedPath::BeliefOutOfRange(belief));
    }
    let evidence_count = rel
        .evidence_count()
        .ok_or(MalformedPath::MissingProperty(keys::EVIDENCE_COUNT))?;

    let (src_node, source) = endpoint(path, rel.src)?;
    let (dst_node, target) = endpoint(path, rel.dst)?;

    Ok(Relation {
        source,
        target,
        source_name: src_node.name().map(str::to_string),
        target_name: dst_node.name().map(str::to_string),
        statement_hash,
        belief,
        evidence_count,
        statement_type: rel.stmt_type().unwrap_or(&rel.rel_type).to_string(),
        relation_label: rel.rel_type.clone(),
    })
}

/// Flatten every path, skipping malformed ones with a warning.
///
/// Output order is input order.
pub fn flatten_all(paths: &[RawPath]) -> Vec<Relation> {
    let mut relations = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        match flatten(path) {
            Ok(rel) => relations.push(rel),
            Err(reason) => tracing::warn!(index = i, %reason, "skipping malformed path"),
        }
    }
    relations
}
