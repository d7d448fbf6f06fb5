//! Statement hash → evidence count.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};
use super::{Relation, Statement};

/// Evidence counts keyed by statement hash.
///
/// Its key set is exactly the set of hashes of the statements it was built
/// for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceIndex(HashMap<i64, u64>);

impl EvidenceIndex {
    pub fn get(&self, hash: i64) -> Option<u64> {
        self.0.get(&hash).copied()
    }

    pub fn contains(&self, hash: i64) -> bool {
        self.0.contains_key(&hash)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn hashes(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.0.iter().map(|(h, n)| (*h, *n))
    }
}

/// Record each kept relation's evidence count under its hash.
///
/// Pairing is by hash, not by position. Fails with
/// `Error::InvariantViolation` if the kept relations and the statements do
/// not cover exactly the same hashes, one each.
pub fn build_index(kept: &[Relation], statements: &[Statement]) -> Result<EvidenceIndex> {
    let mut counts: HashMap<i64, u64> = HashMap::with_capacity(kept.len());
    for rel in kept {
        if counts.insert(rel.statement_hash, rel.evidence_count).is_some() {
            return Err(Error::InvariantViolation(format!(
                "hash {} kept more than once",
                rel.statement_hash
            )));
        }
    }

    let mut covered: HashSet<i64> = HashSet::with_capacity(statements.len());
    for stmt in statements {
        if !covered.insert(stmt.hash) {
            return Err(Error::InvariantViolation(format!("statement hash {} repeated", stmt.hash)));
        }
        if !counts.contains_key(&stmt.hash) {
            return Err(Error::InvariantViolation(format!(
                "statement {} has no kept relation",
                stmt.hash
            )));
        }
    }
    if covered.len() != counts.len() {
        return Err(Error::InvariantViolation(format!(
            "{} kept relations for {} statements",
            counts.len(),
            covered.len()
        )));
    }

    Ok(EvidenceIndex(counts))
}
