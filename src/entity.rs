//! Canonical entity references (`namespace:id`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Identifier namespace of a biological entity.
///
/// The closed set of namespaces the retrieval rules know about, plus a
/// generic fallback that keeps the raw (lowercased) prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Namespace {
    /// HGNC gene identifiers.
    Hgnc,
    /// MeSH descriptors (diseases, phenotypes).
    Mesh,
    /// FamPlex protein families and complexes.
    Fplx,
    /// ChEBI chemicals and metabolites.
    Chebi,
    /// Gene Ontology terms.
    Go,
    /// Enzyme Commission numbers.
    Eccode,
    /// Any other prefix, lowercased.
    Other(String),
}

impl Namespace {
    /// Every namespace with dedicated handling.
    pub const KNOWN: [Namespace; 6] = [
        Namespace::Hgnc,
        Namespace::Mesh,
        Namespace::Fplx,
        Namespace::Chebi,
        Namespace::Go,
        Namespace::Eccode,
    ];

    /// Map a prefix to a namespace; unknown prefixes become `Other`.
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix.trim().to_ascii_lowercase().as_str() {
            "hgnc" => Namespace::Hgnc,
            "mesh" => Namespace::Mesh,
            "fplx" => Namespace::Fplx,
            "chebi" => Namespace::Chebi,
            "go" => Namespace::Go,
            "eccode" => Namespace::Eccode,
            other => Namespace::Other(other.to_string()),
        }
    }

    /// Recognized namespaces only; `None` for anything that would map to `Other`.
    pub fn recognized(prefix: &str) -> Option<Self> {
        match Self::from_prefix(prefix) {
            Namespace::Other(_) => None,
            ns => Some(ns),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Namespace::Hgnc => "hgnc",
            Namespace::Mesh => "mesh",
            Namespace::Fplx => "fplx",
            Namespace::Chebi => "chebi",
            Namespace::Go => "go",
            Namespace::Eccode => "eccode",
            Namespace::Other(prefix) => prefix,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Namespace::Other(_))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Namespace {
    fn from(s: String) -> Self {
        Namespace::from_prefix(&s)
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.as_str().to_string()
    }
}

/// Reference to one biological entity in canonical `namespace:id` form.
///
/// Both parts are non-empty and lowercase. Construct through [`EntityRef::new`]
/// or by parsing a curie; the fields are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef {
    namespace: Namespace,
    id: String,
}

impl EntityRef {
    pub fn new(namespace: Namespace, id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref().trim().to_lowercase();
        if id.is_empty() {
            return Err(Error::InvalidParameter(format!("empty identifier in namespace '{namespace}'")));
        }
        if namespace.as_str().is_empty() {
            return Err(Error::InvalidParameter(format!("empty namespace for identifier '{id}'")));
        }
        Ok(Self { namespace, id })
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `namespace:id` string stored on graph nodes.
    pub fn curie(&self) -> String {
        format!("{}:{}", self.namespace, self.id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)
    }
}

impl FromStr for EntityRef {
    type Err = Error;

    /// Parse `PREFIX:ID` with any prefix.
    fn from_str(s: &str) -> Result<Self> {
        let (prefix, id) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| Error::InvalidParameter(format!("'{s}' is not of the form namespace:id")))?;
        if prefix.trim().is_empty() {
            return Err(Error::InvalidParameter(format!("'{s}' has an empty namespace")));
        }
        EntityRef::new(Namespace::from_prefix(prefix), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        let upper: EntityRef = "HGNC:6019".parse().unwrap();
        let lower: EntityRef = "hgnc:6019".parse().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.curie(), "hgnc:6019");
    }

    #[test]
    fn test_mesh_id_lowercased() {
        let e: EntityRef = "MESH:D007239".parse().unwrap();
        assert_eq!(e.namespace(), &Namespace::Mesh);
        assert_eq!(e.id(), "d007239");
    }

    #[test]
    fn test_unknown_prefix_is_other() {
        let e: EntityRef = "UBERON:0002107".parse().unwrap();
        assert_eq!(e.namespace(), &Namespace::Other("uberon".into()));
        assert!(!e.namespace().is_known());
        assert_eq!(e.to_string(), "uberon:0002107");
    }

    #[test]
    fn test_rejects_empty_parts() {
        assert!("hgnc:".parse::<EntityRef>().is_err());
        assert!(":6019".parse::<EntityRef>().is_err());
        assert!("6019".parse::<EntityRef>().is_err());
    }

    #[test]
    fn test_namespace_serde_as_string() {
        let json = serde_json::to_string(&Namespace::Chebi).unwrap();
        assert_eq!(json, "\"chebi\"");
        let back: Namespace = serde_json::from_str("\"FPLX\"").unwrap();
        assert_eq!(back, Namespace::Fplx);
    }

    #[test]
    fn test_recognized() {
        assert_eq!(Namespace::recognized("GO"), Some(Namespace::Go));
        assert_eq!(Namespace::recognized("uniprot"), None);
    }
}
