//! # Identifier Normalization
//!
//! Free-form identifiers in, canonical [`EntityRef`]s out. Rules, first
//! match wins:
//!
//! 1. `PREFIX:ID` with a recognized prefix → `ID` under that namespace.
//! 2. All digits → the id under the analysis' default namespace.
//! 3. Anything else is a symbol: the [`SymbolResolver`] is asked first, then
//!    the [`Grounder`] (if one was selected), both within the default
//!    namespace. A grounding is only taken when it scores at least the
//!    normalizer's minimum (exact hits only, unless lowered); weaker
//!    candidates leave the symbol unresolved.
//!
//! Batches never abort on a single bad identifier: failures are collected
//! as [`UnresolvedIdentifier`]s next to the resolved references.

pub mod field;
pub mod grounding;
pub mod symbols;

use std::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::entity::{EntityRef, Namespace};
use crate::{Error, Result};

pub use field::parse_entity_field;
pub use grounding::{
    select_grounder, Grounder, GroundingError, GroundingMatch, GroundingStrategy, LocalGrounder,
};
#[cfg(feature = "remote-grounding")]
pub use grounding::RemoteGrounder;
pub use symbols::{SymbolResolver, SymbolTable};

/// Why an identifier could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UnresolvedReason {
    Empty,
    UnknownSymbol,
    /// The grounder failed for this lookup.
    Grounding(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::Empty => write!(f, "empty identifier"),
            UnresolvedReason::UnknownSymbol => write!(f, "unknown symbol"),
            UnresolvedReason::Grounding(msg) => write!(f, "grounding failed: {msg}"),
        }
    }
}

/// An identifier that could not be normalized, tagged with the request
/// field it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: '{input}' ({reason})")]
pub struct UnresolvedIdentifier {
    pub field: String,
    pub input: String,
    pub reason: UnresolvedReason,
}

/// Outcome of normalizing one request field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedBatch {
    /// Distinct references, in first-seen order.
    pub resolved: Vec<EntityRef>,
    pub errors: Vec<UnresolvedIdentifier>,
}

impl NormalizedBatch {
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

const EXACT_GROUNDING: f64 = 1.0;

/// Applies the normalization rules against borrowed collaborators.
#[derive(Clone, Copy)]
pub struct Normalizer<'a> {
    resolver: &'a dyn SymbolResolver,
    grounder: Option<&'a dyn Grounder>,
    minimum_score: f64,
}

impl<'a> Normalizer<'a> {
    pub fn new(resolver: &'a dyn SymbolResolver) -> Self {
        Self { resolver, grounder: None, minimum_score: EXACT_GROUNDING }
    }

    pub fn with_grounder(mut self, grounder: &'a dyn Grounder) -> Self {
        self.grounder = Some(grounder);
        self
    }

    /// Accept groundings scoring at least `score` instead of exact hits only.
    pub fn with_minimum_score(mut self, score: f64) -> Self {
        self.minimum_score = score;
        self
    }

    /// Normalize one identifier. `field` only labels the error.
    pub fn normalize(
        &self,
        input: &str,
        default_namespace: &Namespace,
        field: &str,
    ) -> std::result::Result<EntityRef, UnresolvedIdentifier> {
        let raw = input.trim();
        let unresolved = |reason| UnresolvedIdentifier {
            field: field.to_string(),
            input: input.to_string(),
            reason,
        };
        if raw.is_empty() {
            return Err(unresolved(UnresolvedReason::Empty));
        }

        if let Some((prefix, id)) = raw.split_once(':') {
            if let Some(namespace) = Namespace::recognized(prefix) {
                return EntityRef::new(namespace, id).map_err(|_| unresolved(UnresolvedReason::Empty));
            }
        }

        if raw.chars().all(|c| c.is_ascii_digit()) {
            return EntityRef::new(default_namespace.clone(), raw)
                .map_err(|_| unresolved(UnresolvedReason::Empty));
        }

        if let Some(entity) = self.resolver.resolve(raw, default_namespace) {
            return Ok(entity);
        }

        let Some(grounder) = self.grounder else {
            return Err(unresolved(UnresolvedReason::UnknownSymbol));
        };
        match grounder.ground(raw) {
            Ok(matches) => matches
                .into_iter()
                .find(|m| m.entity.namespace() == default_namespace && m.score >= self.minimum_score)
                .map(|m| m.entity)
                .ok_or_else(|| unresolved(UnresolvedReason::UnknownSymbol)),
            Err(e) => Err(unresolved(UnresolvedReason::Grounding(e.to_string()))),
        }
    }

    /// Normalize one identifier, failing the call if it does not resolve.
    pub fn require(&self, input: &str, default_namespace: &Namespace, field: &str) -> Result<EntityRef> {
        Ok(self.normalize(input, default_namespace, field)?)
    }

    /// Normalize a whole field, collecting failures instead of aborting.
    pub fn normalize_batch<S: AsRef<str>>(
        &self,
        inputs: &[S],
        default_namespace: &Namespace,
        field: &str,
    ) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();
        let mut seen = HashSet::with_capacity(inputs.len());
        for input in inputs {
            match self.normalize(input.as_ref(), default_namespace, field) {
                Ok(entity) => {
                    if seen.insert(entity.clone()) {
                        batch.resolved.push(entity);
                    }
                }
                Err(unresolved) => {
                    tracing::warn!(field, input = input.as_ref(), reason = %unresolved.reason, "unresolved identifier");
                    batch.errors.push(unresolved);
                }
            }
        }
        batch
    }

    /// Normalize an analysis target.
    ///
    /// Any `prefix:id` is accepted, recognized or not; an unrecognized
    /// prefix is kept as-is and later permits only the generic relation
    /// label. Without a prefix the id goes under `default_namespace`, or is
    /// rejected when there is none.
    pub fn normalize_target(&self, target_id: &str, default_namespace: Option<&Namespace>) -> Result<EntityRef> {
        let raw = target_id.trim();
        if raw.is_empty() {
            return Err(Error::InvalidParameter("target_id is required".into()));
        }
        if raw.contains(':') {
            return raw.parse();
        }
        match default_namespace {
            Some(namespace) => EntityRef::new(namespace.clone(), raw),
            None => Err(Error::InvalidParameter(format!(
                "target_id '{raw}' has no namespace prefix"
            ))),
        }
    }
}

impl fmt::Debug for Normalizer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("grounder", &self.grounder.is_some())
            .field("minimum_score", &self.minimum_score)
            .finish_non_exhaustive()
    }
}
