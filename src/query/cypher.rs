//! Render a [`QuerySpec`] as parameterized Cypher.
//!
//! The text is what a Bolt-backed [`GraphStore`](crate::storage::GraphStore)
//! sends verbatim; parameters travel separately in `params`. Belief and
//! evidence cut-offs bind only to the generic causal relation, other labels
//! carry no statement metadata.

use std::fmt::Write as _;

use crate::model::{BIO_ENTITY_LABEL, PropertyMap, Value};
use super::rules::INDRA_REL;
use super::{Orientation, QueryDirection, QuerySpec};

/// Cypher text plus its parameter bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct CypherQuery {
    pub text: String,
    pub params: PropertyMap,
}

fn orientation_param(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::QueryToTarget => "stmt_types_query_to_target",
        Orientation::TargetToQuery => "stmt_types_target_to_query",
    }
}

/// Render `spec`. `u` binds the query entity, `t` the target.
pub fn render(spec: &QuerySpec) -> CypherQuery {
    let pattern = match spec.direction() {
        QueryDirection::Forward => "(t:{L} {id: $target_id})-[r]->(u:{L})",
        QueryDirection::Reverse => "(u:{L})-[r]->(t:{L} {id: $target_id})",
        QueryDirection::Either => "(u:{L})-[r]-(t:{L} {id: $target_id})",
    }
    .replace("{L}", BIO_ENTITY_LABEL);

    let mut text = String::new();
    let _ = writeln!(text, "MATCH p = {pattern}");
    let _ = writeln!(text, "WHERE type(r) IN $rel_types");
    let _ = writeln!(text, "AND u.id STARTS WITH $query_prefix");
    let _ = writeln!(text, "AND u.id IN $entities");
    let _ = writeln!(text, "AND NOT coalesce(u.obsolete, false)");
    let _ = writeln!(
        text,
        "AND (type(r) <> '{INDRA_REL}' OR (r.belief > $minimum_belief AND r.evidence_count >= $minimum_evidence))"
    );

    let mut params = PropertyMap::new();

    if !spec.statement_types().is_empty() {
        let clauses: Vec<String> = spec
            .statement_types()
            .iter()
            .map(|(orientation, types)| {
                let start = match orientation {
                    Orientation::QueryToTarget => "u",
                    Orientation::TargetToQuery => "t",
                };
                let param = orientation_param(*orientation);
                params.insert(param.to_string(), Value::from(types.to_vec()));
                format!("(startNode(r) = {start} AND r.stmt_type IN ${param})")
            })
            .collect();
        let _ = writeln!(text, "AND ({})", clauses.join(" OR "));
    }
    text.push_str("RETURN p");

    params.insert("target_id".into(), Value::from(spec.target().curie()));
    params.insert("rel_types".into(), Value::from(spec.relation_labels().to_vec()));
    params.insert("query_prefix".into(), Value::from(format!("{}:", spec.query_namespace())));
    params.insert(
        "entities".into(),
        Value::from(spec.query_entities().iter().map(|e| e.curie()).collect::<Vec<_>>()),
    );
    params.insert("minimum_belief".into(), Value::from(spec.minimum_belief()));
    params.insert("minimum_evidence".into(), Value::from(spec.minimum_evidence()));

    CypherQuery { text, params }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityRef;
    use crate::query::{Polarity, QueryBuilder, Thresholds};
    use pretty_assertions::assert_eq;

    fn entity(s: &str) -> EntityRef {
        s.parse().unwrap()
    }

    #[test]
    fn test_render_forward_discrete() {
        let spec = QueryBuilder::discrete(
            &entity("GO:0006955"),
            vec![entity("HGNC:6019"), entity("HGNC:11876")],
            false,
            Thresholds::new(0.2, 2).unwrap(),
        );
        let q = render(&spec);

        assert!(q.text.starts_with("MATCH p = (t:BioEntity {id: $target_id})-[r]->(u:BioEntity)"));
        assert!(!q.text.contains("startNode"));
        assert!(q.text.ends_with("RETURN p"));
        assert_eq!(q.params["target_id"], Value::from("go:0006955"));
        assert_eq!(q.params["rel_types"], Value::from(vec!["indra_rel"]));
        assert_eq!(q.params["query_prefix"], Value::from("hgnc:"));
        assert_eq!(q.params["entities"], Value::from(vec!["hgnc:6019", "hgnc:11876"]));
        assert_eq!(q.params["minimum_belief"], Value::Float(0.2));
        assert_eq!(q.params["minimum_evidence"], Value::Int(2));
    }

    #[test]
    fn test_render_reverse_discrete() {
        let spec = QueryBuilder::discrete(&entity("mesh:d007239"), vec![], true, Thresholds::default());
        let q = render(&spec);
        assert!(q.text.starts_with("MATCH p = (u:BioEntity)-[r]->(t:BioEntity {id: $target_id})"));
        assert_eq!(q.params["rel_types"], Value::from(vec!["indra_rel", "has_indication"]));
    }

    #[test]
    fn test_render_signed_orientation_filters() {
        let spec = QueryBuilder::signed(
            &entity("hgnc:1097"),
            vec![entity("hgnc:1")],
            Polarity::Negative,
            Thresholds::default(),
        );
        let q = render(&spec);

        assert!(q.text.contains("(u:BioEntity)-[r]-(t:BioEntity {id: $target_id})"));
        assert!(q.text.contains(
            "AND ((startNode(r) = u AND r.stmt_type IN $stmt_types_query_to_target) \
             OR (startNode(r) = t AND r.stmt_type IN $stmt_types_target_to_query))"
        ));
        assert_eq!(
            q.params["stmt_types_query_to_target"],
            Value::from(vec!["IncreaseAmount", "Activation"])
        );
        assert_eq!(
            q.params["stmt_types_target_to_query"],
            Value::from(vec!["DecreaseAmount", "Inhibition"])
        );
    }
}
