//! Canonical statements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::EntityRef;
use crate::evidence::Evidence;
use super::Relation;

/// A participant in a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Agent {
    pub entity: EntityRef,
    pub name: Option<String>,
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.entity),
        }
    }
}

/// The deduplicated representation of every relation sharing one hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub hash: i64,
    pub stmt_type: String,
    pub subject: Agent,
    pub object: Agent,
    pub belief: f64,
    /// Empty until the statement has been enriched.
    pub evidence: Vec<Evidence>,
}

impl Statement {
    /// Seed a statement from the first relation of its hash group.
    pub fn from_relation(rel: &Relation) -> Self {
        Self {
            hash: rel.statement_hash,
            stmt_type: rel.statement_type.clone(),
            subject: Agent { entity: rel.source.clone(), name: rel.source_name.clone() },
            object: Agent { entity: rel.target.clone(), name: rel.target_name.clone() },
            belief: rel.belief,
            evidence: Vec::new(),
        }
    }

    /// A copy of this statement carrying `evidence`.
    pub fn with_evidence(self, evidence: Vec<Evidence>) -> Self {
        Self { evidence, ..self }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.stmt_type, self.subject, self.object)
    }
}
