//! Declarative retrieval rules.
//!
//! Both tables are total over their key space: every namespace maps to an
//! explicit (possibly empty) extra label and every (polarity, orientation)
//! pair has exactly one row.

use crate::entity::Namespace;
use super::{Orientation, Polarity};

/// Generic causal relation label, permitted in every query.
pub const INDRA_REL: &str = "indra_rel";
pub const HAS_INDICATION: &str = "has_indication";
pub const ISA: &str = "isa";
pub const HAS_METABOLITE: &str = "has_metabolite";

/// Extra relation label unlocked by the target's namespace.
pub fn extra_relation_label(namespace: &Namespace) -> Option<&'static str> {
    match namespace {
        Namespace::Mesh => Some(HAS_INDICATION),
        Namespace::Fplx => Some(ISA),
        Namespace::Chebi => Some(HAS_METABOLITE),
        Namespace::Hgnc | Namespace::Go | Namespace::Eccode => None,
        Namespace::Other(_) => None,
    }
}

/// One row of the sign table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignRule {
    pub polarity: Polarity,
    pub orientation: Orientation,
    pub statement_types: &'static [&'static str],
}

/// A gene whose decrease or inhibition of the target is evidenced supports
/// an activating hypothesis, and symmetrically for the other rows.
pub const SIGN_RULES: [SignRule; 4] = [
    SignRule {
        polarity: Polarity::Positive,
        orientation: Orientation::QueryToTarget,
        statement_types: &["DecreaseAmount", "Inhibition"],
    },
    SignRule {
        polarity: Polarity::Positive,
        orientation: Orientation::TargetToQuery,
        statement_types: &["IncreaseAmount", "Activation", "Complex"],
    },
    SignRule {
        polarity: Polarity::Negative,
        orientation: Orientation::QueryToTarget,
        statement_types: &["IncreaseAmount", "Activation"],
    },
    SignRule {
        polarity: Polarity::Negative,
        orientation: Orientation::TargetToQuery,
        statement_types: &["DecreaseAmount", "Inhibition"],
    },
];

/// Statement types permitted for `polarity` in `orientation`.
pub fn sign_statement_types(polarity: Polarity, orientation: Orientation) -> &'static [&'static str] {
    SIGN_RULES
        .iter()
        .find(|rule| rule.polarity == polarity && rule.orientation == orientation)
        .map(|rule| rule.statement_types)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_labels_per_namespace() {
        let expected = [
            (Namespace::Hgnc, None),
            (Namespace::Mesh, Some(HAS_INDICATION)),
            (Namespace::Fplx, Some(ISA)),
            (Namespace::Chebi, Some(HAS_METABOLITE)),
            (Namespace::Go, None),
            (Namespace::Eccode, None),
        ];
        for ns in Namespace::KNOWN {
            let (_, label) = expected
                .iter()
                .find(|(n, _)| *n == ns)
                .unwrap_or_else(|| panic!("no expected label for {ns}"));
            assert_eq!(extra_relation_label(&ns), *label, "namespace {ns}");
            assert_eq!(Namespace::from_prefix(ns.as_str()), ns);
        }
        assert_eq!(extra_relation_label(&Namespace::Other("uberon".into())), None);
    }

    #[test]
    fn test_sign_table_has_one_row_per_key() {
        for polarity in Polarity::ALL {
            for orientation in Orientation::ALL {
                let rows = SIGN_RULES
                    .iter()
                    .filter(|r| r.polarity == polarity && r.orientation == orientation)
                    .count();
                assert_eq!(rows, 1, "{polarity} / {orientation:?}");
            }
        }
    }

    #[test]
    fn test_sign_table_rows() {
        assert_eq!(
            sign_statement_types(Polarity::Positive, Orientation::QueryToTarget),
            &["DecreaseAmount", "Inhibition"]
        );
        assert_eq!(
            sign_statement_types(Polarity::Positive, Orientation::TargetToQuery),
            &["IncreaseAmount", "Activation", "Complex"]
        );
        assert_eq!(
            sign_statement_types(Polarity::Negative, Orientation::QueryToTarget),
            &["IncreaseAmount", "Activation"]
        );
        assert_eq!(
            sign_statement_types(Polarity::Negative, Orientation::TargetToQuery),
            &["DecreaseAmount", "Inhibition"]
        );
    }
}
