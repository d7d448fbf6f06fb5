//! Per-mode query selection.

use std::collections::BTreeMap;

use smallvec::{smallvec, SmallVec};

use crate::entity::{EntityRef, Namespace};
use super::rules::{self, INDRA_REL};
use super::{Orientation, Polarity, QueryDirection, QuerySpec, RelationLabels, Thresholds};

/// Builds [`QuerySpec`]s for the three analysis modes.
///
/// Stateless; every method is a pure function of its arguments.
pub struct QueryBuilder;

impl QueryBuilder {
    /// Relation labels permitted for `target`: the generic causal label
    /// plus whatever the target's namespace unlocks.
    ///
    /// Targets in an unrecognized namespace keep their raw normalized id
    /// and get the generic label only.
    pub fn relation_labels(target: &EntityRef) -> RelationLabels {
        let mut labels: RelationLabels = smallvec![INDRA_REL];
        match rules::extra_relation_label(target.namespace()) {
            Some(extra) => labels.push(extra),
            None if !target.namespace().is_known() => {
                tracing::debug!(entity = %target, "unrecognized target namespace, generic relation only");
            }
            None => {}
        }
        labels
    }

    /// Discrete (over-representation) retrieval between `target` and genes.
    ///
    /// Forward from the target unless `downstream`, in which case the genes
    /// must point at the target.
    pub fn discrete(
        target: &EntityRef,
        genes: Vec<EntityRef>,
        downstream: bool,
        thresholds: Thresholds,
    ) -> QuerySpec {
        QuerySpec {
            target: target.clone(),
            query_entities: genes,
            query_namespace: Namespace::Hgnc,
            direction: if downstream { QueryDirection::Reverse } else { QueryDirection::Forward },
            relation_labels: Self::relation_labels(target),
            statement_types: BTreeMap::new(),
            thresholds,
            polarity: None,
        }
    }

    /// One polarity of a signed (causal) retrieval.
    ///
    /// Matches edges in either direction; the sign table decides which
    /// statement types count in each orientation.
    pub fn signed(
        target: &EntityRef,
        genes: Vec<EntityRef>,
        polarity: Polarity,
        thresholds: Thresholds,
    ) -> QuerySpec {
        let statement_types = Orientation::ALL
            .into_iter()
            .map(|o| {
                let types: SmallVec<[&'static str; 4]> =
                    rules::sign_statement_types(polarity, o).iter().copied().collect();
                (o, types)
            })
            .collect();

        QuerySpec {
            target: target.clone(),
            query_entities: genes,
            query_namespace: Namespace::Hgnc,
            direction: QueryDirection::Either,
            relation_labels: Self::relation_labels(target),
            statement_types,
            thresholds,
            polarity: Some(polarity),
        }
    }

    /// Both polarities of a signed retrieval. A polarity with no genes
    /// yields no spec.
    pub fn signed_pair(
        target: &EntityRef,
        positive: Vec<EntityRef>,
        negative: Vec<EntityRef>,
        thresholds: Thresholds,
    ) -> Vec<QuerySpec> {
        [(Polarity::Positive, positive), (Polarity::Negative, negative)]
            .into_iter()
            .filter(|(_, genes)| !genes.is_empty())
            .map(|(polarity, genes)| Self::signed(target, genes, polarity, thresholds))
            .collect()
    }

    /// Metabolite retrieval: generic causal relations only, either direction.
    pub fn metabolite(
        target: &EntityRef,
        metabolites: Vec<EntityRef>,
        thresholds: Thresholds,
    ) -> QuerySpec {
        QuerySpec {
            target: target.clone(),
            query_entities: metabolites,
            query_namespace: Namespace::Chebi,
            direction: QueryDirection::Either,
            relation_labels: smallvec![INDRA_REL],
            statement_types: BTreeMap::new(),
            thresholds,
            polarity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::rules::{HAS_INDICATION, HAS_METABOLITE, ISA};

    fn entity(s: &str) -> EntityRef {
        s.parse().unwrap()
    }

    #[test]
    fn test_relation_labels_for_every_namespace() {
        let cases = [
            ("hgnc:1097", vec![INDRA_REL]),
            ("mesh:d007239", vec![INDRA_REL, HAS_INDICATION]),
            ("fplx:ras", vec![INDRA_REL, ISA]),
            ("chebi:15422", vec![INDRA_REL, HAS_METABOLITE]),
            ("go:0006955", vec![INDRA_REL]),
            ("eccode:1.1.1.1", vec![INDRA_REL]),
            ("other:abc", vec![INDRA_REL]),
        ];
        for (target, expected) in cases {
            let labels = QueryBuilder::relation_labels(&entity(target));
            assert_eq!(labels.as_slice(), expected.as_slice(), "target {target}");
        }
    }

    #[test]
    fn test_unknown_namespace_falls_back_to_raw_id() {
        let target = entity("UBERON:0002107");
        let spec = QueryBuilder::discrete(&target, vec![entity("hgnc:6019")], false, Thresholds::default());
        assert_eq!(spec.target().curie(), "uberon:0002107");
        assert_eq!(spec.relation_labels(), &[INDRA_REL]);
    }

    #[test]
    fn test_discrete_direction() {
        let target = entity("go:0006955");
        let fwd = QueryBuilder::discrete(&target, vec![], false, Thresholds::default());
        let rev = QueryBuilder::discrete(&target, vec![], true, Thresholds::default());
        assert_eq!(fwd.direction(), QueryDirection::Forward);
        assert_eq!(rev.direction(), QueryDirection::Reverse);
        assert!(fwd.statement_types().is_empty());
        assert!(fwd.admits(Orientation::TargetToQuery, Some("Phosphorylation")));
    }

    #[test]
    fn test_signed_filters_follow_sign_table() {
        let target = entity("mesh:d007239");
        let spec = QueryBuilder::signed(&target, vec![entity("hgnc:1")], Polarity::Positive, Thresholds::default());

        assert_eq!(spec.direction(), QueryDirection::Either);
        assert!(spec.admits(Orientation::QueryToTarget, Some("Inhibition")));
        assert!(!spec.admits(Orientation::QueryToTarget, Some("Activation")));
        assert!(spec.admits(Orientation::TargetToQuery, Some("Complex")));
        assert!(!spec.admits(Orientation::TargetToQuery, Some("Inhibition")));
        assert!(!spec.admits(Orientation::TargetToQuery, None));
    }

    #[test]
    fn test_signed_pair_skips_empty_polarity() {
        let target = entity("hgnc:1097");
        let specs = QueryBuilder::signed_pair(&target, vec![entity("hgnc:1")], vec![], Thresholds::default());
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].polarity(), Some(Polarity::Positive));
    }

    #[test]
    fn test_metabolite_spec() {
        let target = entity("eccode:1.1.1.1");
        let spec = QueryBuilder::metabolite(&target, vec![entity("chebi:15422")], Thresholds::default());
        assert_eq!(spec.query_namespace(), &Namespace::Chebi);
        assert_eq!(spec.relation_labels(), &[INDRA_REL]);
    }
}
