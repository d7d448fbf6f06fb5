//! Path — a sequence of alternating nodes and relationships.

use serde::{Deserialize, Serialize};
use super::{Node, Relationship};

/// A path in the graph: node -[rel]-> node -[rel]-> node ...
///
/// Paths coming back from a store are what the retrieval pipeline calls raw
/// paths. Nothing here guarantees that a path is well formed; the flattener
/// checks that before it trusts a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Nodes along the path. Well-formed paths have one more node than
    /// relationships.
    pub nodes: Vec<Node>,
    /// Relationships connecting consecutive nodes.
    pub relationships: Vec<Relationship>,
}

impl Path {
    pub fn single(node: Node) -> Self {
        Self { nodes: vec![node], relationships: Vec::new() }
    }

    /// One-hop path `start -[rel]- end`.
    pub fn hop(start: Node, rel: Relationship, end: Node) -> Self {
        Self { nodes: vec![start, end], relationships: vec![rel] }
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}
