//! Node in the property graph.

use serde::{Deserialize, Serialize};
use super::{keys, PropertyMap, Value};

/// Label carried by every biological entity node.
pub const BIO_ENTITY_LABEL: &str = "BioEntity";

/// Opaque node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the property graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub labels: Vec<String>,
    pub properties: PropertyMap,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            labels: Vec::new(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The `namespace:id` curie stored on the node, if any.
    pub fn entity_id(&self) -> Option<&str> {
        self.get(keys::ID).and_then(Value::as_str)
    }

    /// Display name of the entity, if the loader recorded one.
    pub fn name(&self) -> Option<&str> {
        self.get(keys::NAME).and_then(Value::as_str)
    }

    /// Missing `obsolete` counts as current.
    pub fn is_obsolete(&self) -> bool {
        self.get(keys::OBSOLETE).is_some_and(Value::is_truthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_accessors() {
        let node = Node::new(NodeId(1))
            .with_labels([BIO_ENTITY_LABEL])
            .with_property(keys::ID, "hgnc:6019")
            .with_property(keys::NAME, "KEAP1");

        assert!(node.has_label(BIO_ENTITY_LABEL));
        assert_eq!(node.entity_id(), Some("hgnc:6019"));
        assert_eq!(node.name(), Some("KEAP1"));
        assert!(!node.is_obsolete());
    }

    #[test]
    fn test_obsolete_flag() {
        let node = Node::new(NodeId(2)).with_property(keys::OBSOLETE, true);
        assert!(node.is_obsolete());

        let node = Node::new(NodeId(3)).with_property(keys::OBSOLETE, Value::Null);
        assert!(!node.is_obsolete());
    }
}
