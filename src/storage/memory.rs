//! In-memory graph store.
//!
//! This is the reference implementation of `GraphStore`.
//! It uses simple HashMaps protected by RwLock.
//!
//! ## Limitations
//!
//! - **Loader, not a database**: nodes and relationships are added through
//!   the `add_*` methods below; there is no query language for writes.
//! - **Single-writer only**: per-collection locks mean multi-step loads
//!   are NOT atomic. Load first, query afterwards.
//! - **One-hop only**: `run` matches single relationships adjacent to the
//!   target, which is all the retrieval queries need.
//!
//! Use this store for:
//! - Testing the retrieval pipeline end to end
//! - Embedding small graphs in applications that don't need Neo4j
//! - Simulating an unavailable store (`set_available(false)`)

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use parking_lot::RwLock;
use async_trait::async_trait;

use crate::entity::EntityRef;
use crate::model::*;
use crate::query::rules::INDRA_REL;
use crate::query::{Orientation, QueryDirection, QuerySpec};
use crate::{Error, Result};
use super::{GraphStore, RawPath, RelationshipSummary, StoreCapabilities};

// ============================================================================
// StatementEdge
// ============================================================================

/// Statement metadata carried by a generic causal relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementEdge {
    pub stmt_hash: i64,
    pub stmt_type: String,
    pub belief: f64,
    pub evidence_count: u64,
}

impl StatementEdge {
    pub fn new(stmt_hash: i64, stmt_type: impl Into<String>, belief: f64, evidence_count: u64) -> Self {
        Self { stmt_hash, stmt_type: stmt_type.into(), belief, evidence_count }
    }

    fn into_properties(self) -> PropertyMap {
        props([
            (keys::STMT_HASH, Value::from(self.stmt_hash)),
            (keys::STMT_TYPE, Value::from(self.stmt_type)),
            (keys::BELIEF, Value::from(self.belief)),
            (keys::EVIDENCE_COUNT, Value::from(self.evidence_count)),
        ])
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory property graph store.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    nodes: RwLock<HashMap<NodeId, Node>>,
    relationships: RwLock<HashMap<RelId, Relationship>>,
    /// node_id → list of relationship IDs, in insertion order
    adjacency: RwLock<HashMap<NodeId, Vec<RelId>>>,
    /// `id` property → node (poor man's unique index)
    id_index: RwLock<HashMap<String, NodeId>>,
    next_node_id: AtomicU64,
    next_rel_id: AtomicU64,
    available: AtomicBool,
    queries_run: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                nodes: RwLock::new(HashMap::new()),
                relationships: RwLock::new(HashMap::new()),
                adjacency: RwLock::new(HashMap::new()),
                id_index: RwLock::new(HashMap::new()),
                next_node_id: AtomicU64::new(1),
                next_rel_id: AtomicU64::new(1),
                available: AtomicBool::new(true),
                queries_run: AtomicU64::new(0),
            }),
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Add a node with arbitrary properties. An `id` property, if present,
    /// is indexed; a later node with the same id shadows the earlier one.
    pub fn add_node(&self, properties: PropertyMap) -> NodeId {
        let id = NodeId(self.inner.next_node_id.fetch_add(1, Ordering::Relaxed));
        let mut node = Node::new(id).with_labels([BIO_ENTITY_LABEL]);
        node.properties = properties;

        if let Some(curie) = node.entity_id() {
            self.inner.id_index.write().insert(curie.to_string(), id);
        }
        self.inner.nodes.write().insert(id, node);
        self.inner.adjacency.write().insert(id, Vec::new());

        id
    }

    /// Add (or look up) the node for `entity`.
    pub fn add_entity(&self, entity: &EntityRef, name: Option<&str>) -> NodeId {
        if let Some(id) = self.node_id(entity) {
            return id;
        }
        let mut properties = props([
            (keys::ID, Value::from(entity.curie())),
            (keys::OBSOLETE, Value::from(false)),
        ]);
        if let Some(name) = name {
            properties.insert(keys::NAME.to_string(), Value::from(name));
        }
        self.add_node(properties)
    }

    /// Flag an entity's node as obsolete.
    pub fn mark_obsolete(&self, entity: &EntityRef) -> Result<()> {
        let id = self.node_id(entity)
            .ok_or_else(|| Error::InvalidParameter(format!("no node for {entity}")))?;
        let mut nodes = self.inner.nodes.write();
        if let Some(node) = nodes.get_mut(&id) {
            node.properties.insert(keys::OBSOLETE.to_string(), Value::from(true));
        }
        Ok(())
    }

    /// Create a relationship between two existing nodes.
    pub fn add_relationship(
        &self,
        src: NodeId,
        dst: NodeId,
        rel_type: &str,
        properties: PropertyMap,
    ) -> Result<RelId> {
        // Verify both nodes exist
        {
            let nodes = self.inner.nodes.read();
            if !nodes.contains_key(&src) {
                return Err(Error::InvalidParameter(format!("source node {src} does not exist")));
            }
            if !nodes.contains_key(&dst) {
                return Err(Error::InvalidParameter(format!("target node {dst} does not exist")));
            }
        }

        let id = RelId(self.inner.next_rel_id.fetch_add(1, Ordering::Relaxed));
        let rel = Relationship {
            id,
            src,
            dst,
            rel_type: rel_type.to_string(),
            properties,
        };

        self.inner.relationships.write().insert(id, rel);

        // Update adjacency for both endpoints
        let mut adj = self.inner.adjacency.write();
        adj.entry(src).or_default().push(id);
        if src != dst {
            adj.entry(dst).or_default().push(id);
        }

        Ok(id)
    }

    /// Add a generic causal relationship `src -[indra_rel]-> dst`, creating
    /// endpoint nodes as needed.
    pub fn add_statement(&self, src: &EntityRef, dst: &EntityRef, edge: StatementEdge) -> Result<RelId> {
        let s = self.add_entity(src, None);
        let d = self.add_entity(dst, None);
        self.add_relationship(s, d, INDRA_REL, edge.into_properties())
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn node_id(&self, entity: &EntityRef) -> Option<NodeId> {
        self.inner.id_index.read().get(&entity.curie()).copied()
    }

    pub fn node_count(&self) -> u64 {
        self.inner.nodes.read().len() as u64
    }

    pub fn relationship_count(&self) -> u64 {
        self.inner.relationships.read().len() as u64
    }

    /// Number of `run` calls received, including failed ones.
    pub fn queries_run(&self) -> u64 {
        self.inner.queries_run.load(Ordering::Relaxed)
    }

    /// Simulate the store going away (or coming back).
    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::Relaxed);
    }

    fn check_available(&self) -> Result<()> {
        if self.inner.available.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(Error::StoreUnavailable("memory store is offline".into()))
        }
    }
}

/// Generic causal relations must clear both cut-offs; other labels carry
/// no statement metadata and pass.
fn passes_thresholds(rel: &Relationship, spec: &QuerySpec) -> bool {
    if rel.rel_type != INDRA_REL {
        return true;
    }
    let belief_ok = rel.belief().is_some_and(|b| b > spec.minimum_belief());
    let evidence_ok = rel.evidence_count().is_some_and(|n| n >= spec.minimum_evidence());
    belief_ok && evidence_ok
}

// ============================================================================
// GraphStore impl
// ============================================================================

#[async_trait]
impl GraphStore for MemoryStore {
    async fn run(&self, spec: &QuerySpec) -> Result<Vec<RawPath>> {
        self.inner.queries_run.fetch_add(1, Ordering::Relaxed);
        self.check_available()?;

        let Some(target_id) = self.node_id(spec.target()) else {
            return Ok(Vec::new());
        };

        let wanted: HashSet<String> = spec.query_entities().iter().map(EntityRef::curie).collect();
        let prefix = format!("{}:", spec.query_namespace());
        let dir = match spec.direction() {
            QueryDirection::Forward => Direction::Outgoing,
            QueryDirection::Reverse => Direction::Incoming,
            QueryDirection::Either => Direction::Both,
        };

        let adj = self.inner.adjacency.read();
        let rels = self.inner.relationships.read();
        let nodes = self.inner.nodes.read();

        let mut paths = Vec::new();
        for rid in adj.get(&target_id).map(Vec::as_slice).unwrap_or_default() {
            let Some(rel) = rels.get(rid) else { continue };

            let matches_dir = match dir {
                Direction::Outgoing => rel.src == target_id,
                Direction::Incoming => rel.dst == target_id,
                Direction::Both => true,
            };
            if !matches_dir || !spec.permits_label(&rel.rel_type) {
                continue;
            }

            let Some(other) = rel.other_node(target_id).and_then(|id| nodes.get(&id)) else {
                continue;
            };
            let other_ok = other
                .entity_id()
                .is_some_and(|curie| curie.starts_with(&prefix) && wanted.contains(curie));
            if !other_ok || !other.has_label(BIO_ENTITY_LABEL) || other.is_obsolete() {
                continue;
            }

            if !passes_thresholds(rel, spec) {
                continue;
            }

            let orientation = if rel.src == other.id {
                Orientation::QueryToTarget
            } else {
                Orientation::TargetToQuery
            };
            if !spec.admits(orientation, rel.stmt_type()) {
                continue;
            }

            let (Some(start), Some(end)) = (nodes.get(&rel.src), nodes.get(&rel.dst)) else {
                continue;
            };
            paths.push(Path::hop(start.clone(), rel.clone(), end.clone()));
        }

        Ok(paths)
    }

    async fn relationship_summary(
        &self,
        entities: &[EntityRef],
    ) -> Result<Vec<RelationshipSummary>> {
        self.check_available()?;

        let adj = self.inner.adjacency.read();
        let rels = self.inner.relationships.read();

        let mut counts: BTreeMap<(String, String, Option<String>), u64> = BTreeMap::new();
        for entity in entities {
            let Some(node) = self.node_id(entity) else { continue };
            for rid in adj.get(&node).map(Vec::as_slice).unwrap_or_default() {
                if let Some(rel) = rels.get(rid) {
                    let key = (entity.curie(), rel.rel_type.clone(), rel.stmt_type().map(str::to_string));
                    *counts.entry(key).or_default() += 1;
                }
            }
        }

        Ok(counts
            .into_iter()
            .map(|((entity, relation_label, stmt_type), count)| RelationshipSummary {
                entity,
                relation_label,
                stmt_type,
                count,
            })
            .collect())
    }

    fn capabilities(&self) -> StoreCapabilities {
        StoreCapabilities { supports_summary: true }
    }
}

// ============================================================================
// Tests
// ============================================================================
