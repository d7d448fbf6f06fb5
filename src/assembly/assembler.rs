//! Hash-keyed deduplication.

use hashbrown::HashSet;
use serde::Serialize;

use super::{Relation, Statement};

/// Output of [`assemble`].
///
/// `kept[i]` is the relation that seeded `statements[i]`; both share the
/// same hash and there is exactly one of each per distinct hash.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Assembly {
    statements: Vec<Statement>,
    kept: Vec<Relation>,
    /// Relations dropped as duplicates of an earlier hash.
    duplicates: usize,
    /// Relations dropped for having too little evidence.
    below_evidence: usize,
}

impl Assembly {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn kept(&self) -> &[Relation] {
        &self.kept
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn below_evidence(&self) -> usize {
        self.below_evidence
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Statement>, Vec<Relation>) {
        (self.statements, self.kept)
    }
}

/// Deduplicate `relations` into statements.
///
/// Relations with `evidence_count < minimum_evidence` are dropped before
/// grouping. The first remaining relation of each hash seeds its statement;
/// statements come out in order of first appearance.
pub fn assemble(relations: Vec<Relation>, minimum_evidence: u64) -> Assembly {
    let mut seen: HashSet<i64> = HashSet::with_capacity(relations.len());
    let mut assembly = Assembly::default();

    for rel in relations {
        if rel.evidence_count < minimum_evidence {
            assembly.below_evidence += 1;
            continue;
        }
        if !seen.insert(rel.statement_hash) {
            assembly.duplicates += 1;
            continue;
        }
        assembly.statements.push(Statement::from_relation(&rel));
        assembly.kept.push(rel);
    }

    tracing::debug!(
        statements = assembly.statements.len(),
        duplicates = assembly.duplicates,
        below_evidence = assembly.below_evidence,
        "assembled statements"
    );
    assembly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityRef;

    fn rel(hash: i64, evidence_count: u64, stmt_type: &str) -> Relation {
        Relation {
            source: "hgnc:1".parse::<EntityRef>().unwrap(),
            target: "go:1".parse::<EntityRef>().unwrap(),
            source_name: None,
            target_name: None,
            statement_hash: hash,
            belief: 0.9,
            evidence_count,
            statement_type: stmt_type.into(),
            relation_label: "indra_rel".into(),
        }
    }

    #[test]
    fn test_first_seen_wins_and_order_is_preserved() {
        let input = vec![
            rel(3, 1, "Activation"),
            rel(1, 1, "Inhibition"),
            rel(3, 9, "Complex"),
            rel(2, 1, "Activation"),
            rel(1, 5, "Activation"),
        ];
        let assembly = assemble(input, 0);

        let hashes: Vec<i64> = assembly.statements().iter().map(|s| s.hash).collect();
        assert_eq!(hashes, vec![3, 1, 2]);
        assert_eq!(assembly.statements()[0].stmt_type, "Activation");
        assert_eq!(assembly.kept()[0].evidence_count, 1);
        assert_eq!(assembly.duplicates(), 2);
    }

    #[test]
    fn test_kept_aligns_with_statements() {
        let input = vec![rel(5, 2, "A"), rel(5, 3, "A"), rel(6, 1, "B"), rel(7, 4, "C"), rel(6, 9, "B")];
        let assembly = assemble(input, 0);

        assert_eq!(assembly.kept().len(), assembly.statements().len());
        for (kept, stmt) in assembly.kept().iter().zip(assembly.statements()) {
            assert_eq!(kept.statement_hash, stmt.hash);
        }
    }

    #[test]
    fn test_evidence_filter_runs_before_grouping() {
        // The low-evidence copy of hash 1 comes first but must not seed the group.
        let input = vec![rel(1, 0, "Activation"), rel(1, 4, "Inhibition"), rel(2, 1, "Activation")];
        let assembly = assemble(input, 2);

        assert_eq!(assembly.len(), 1);
        assert_eq!(assembly.statements()[0].hash, 1);
        assert_eq!(assembly.statements()[0].stmt_type, "Inhibition");
        assert_eq!(assembly.kept()[0].evidence_count, 4);
        assert_eq!(assembly.below_evidence(), 2);
    }

    #[test]
    fn test_empty_input() {
        let assembly = assemble(Vec::new(), 0);
        assert!(assembly.is_empty());
        assert!(assembly.kept().is_empty());
    }
}
