//! # Query Construction
//!
//! Turns an analysis request into one or more [`QuerySpec`]s. A spec is a
//! complete, store-agnostic description of one traversal: the target node,
//! the admissible far endpoints, the traversal direction, the permitted
//! relation labels and, for signed analysis, the statement types allowed in
//! each orientation.
//!
//! - [`rules`] holds the declarative tables (namespace → extra relation
//!   label, polarity × orientation → statement types).
//! - [`builder`] selects from those tables per analysis mode.
//! - [`cypher`] renders a spec as parameterized Cypher for Bolt-backed stores.

pub mod builder;
pub mod cypher;
pub mod rules;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::entity::{EntityRef, Namespace};
use crate::{Error, Result};

pub use builder::QueryBuilder;
pub use cypher::CypherQuery;

/// Direction of the matched edge relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryDirection {
    /// `(target)-[r]->(entity)`
    Forward,
    /// `(entity)-[r]->(target)`
    Reverse,
    /// Either way round; orientation-specific filters may still apply.
    Either,
}

/// Which endpoint a matched relationship starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// The query entity (gene, metabolite) acts on the target.
    QueryToTarget,
    /// The target acts on the query entity.
    TargetToQuery,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::QueryToTarget, Orientation::TargetToQuery];
}

/// Hypothesized effect of a query entity on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub const ALL: [Polarity; 2] = [Polarity::Positive, Polarity::Negative];
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => write!(f, "positive"),
            Polarity::Negative => write!(f, "negative"),
        }
    }
}

impl FromStr for Polarity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "up" => Ok(Polarity::Positive),
            "negative" | "down" => Ok(Polarity::Negative),
            other => Err(Error::InvalidParameter(format!(
                "unknown polarity '{other}', expected 'positive' or 'negative'"
            ))),
        }
    }
}

/// Belief and evidence cut-offs for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Thresholds {
    /// Relations must have `belief > minimum_belief`.
    pub minimum_belief: f64,
    /// Relations must have `evidence_count >= minimum_evidence`.
    pub minimum_evidence: u64,
}

impl Thresholds {
    pub fn new(minimum_belief: f64, minimum_evidence: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&minimum_belief) {
            return Err(Error::InvalidParameter(format!(
                "minimum_belief must be within [0, 1], got {minimum_belief}"
            )));
        }
        Ok(Self { minimum_belief, minimum_evidence })
    }
}

/// Relation labels of one spec. Never more than two in practice.
pub type RelationLabels = SmallVec<[&'static str; 2]>;

/// A fully-specified, immutable traversal request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySpec {
    pub(crate) target: EntityRef,
    pub(crate) query_entities: Vec<EntityRef>,
    pub(crate) query_namespace: Namespace,
    pub(crate) direction: QueryDirection,
    pub(crate) relation_labels: RelationLabels,
    pub(crate) statement_types: BTreeMap<Orientation, SmallVec<[&'static str; 4]>>,
    pub(crate) thresholds: Thresholds,
    pub(crate) polarity: Option<Polarity>,
}

impl QuerySpec {
    pub fn target(&self) -> &EntityRef {
        &self.target
    }

    pub fn query_entities(&self) -> &[EntityRef] {
        &self.query_entities
    }

    /// Namespace every far endpoint must belong to.
    pub fn query_namespace(&self) -> &Namespace {
        &self.query_namespace
    }

    pub fn direction(&self) -> QueryDirection {
        self.direction
    }

    pub fn relation_labels(&self) -> &[&'static str] {
        &self.relation_labels
    }

    pub fn permits_label(&self, label: &str) -> bool {
        self.relation_labels.iter().any(|l| *l == label)
    }

    /// Statement types allowed per orientation. Empty means unrestricted.
    pub fn statement_types(&self) -> &BTreeMap<Orientation, SmallVec<[&'static str; 4]>> {
        &self.statement_types
    }

    /// Whether a relation of `stmt_type` matched in `orientation` passes
    /// the statement-type filter.
    pub fn admits(&self, orientation: Orientation, stmt_type: Option<&str>) -> bool {
        if self.statement_types.is_empty() {
            return true;
        }
        match (self.statement_types.get(&orientation), stmt_type) {
            (Some(types), Some(t)) => types.iter().any(|allowed| *allowed == t),
            _ => false,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn minimum_belief(&self) -> f64 {
        self.thresholds.minimum_belief
    }

    pub fn minimum_evidence(&self) -> u64 {
        self.thresholds.minimum_evidence
    }

    pub fn polarity(&self) -> Option<Polarity> {
        self.polarity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_parse() {
        assert_eq!("Positive".parse::<Polarity>().unwrap(), Polarity::Positive);
        assert_eq!("negative".parse::<Polarity>().unwrap(), Polarity::Negative);
        assert!(matches!("neutral".parse::<Polarity>(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_thresholds_reject_out_of_range_belief() {
        assert!(Thresholds::new(0.0, 0).is_ok());
        assert!(Thresholds::new(1.0, 3).is_ok());
        assert!(Thresholds::new(1.5, 0).is_err());
        assert!(Thresholds::new(-0.1, 0).is_err());
        assert!(Thresholds::new(f64::NAN, 0).is_err());
    }
}
