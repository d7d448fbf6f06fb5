//! Free-text grounding: names → ranked canonical identifiers.
//!
//! A grounder is picked once at startup by [`select_grounder`]: a local
//! lexicon when one is supplied, otherwise a remote grounding service when a
//! URL is configured (and answers the probe), otherwise nothing.

use serde::{Deserialize, Serialize};

use crate::config::GroundingConfig;
use crate::entity::EntityRef;

use super::symbols::SymbolTable;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GroundingError {
    #[error("no grounding service available: {0}")]
    Unavailable(String),

    #[error("grounding transport failed: {0}")]
    Transport(String),

    #[error("grounding response unreadable: {0}")]
    Decode(String),
}

/// One candidate grounding of a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingMatch {
    pub entity: EntityRef,
    pub name: Option<String>,
    /// Higher is better; exact lexicon hits score 1.0.
    pub score: f64,
}

/// Maps free text to ranked entity candidates, best first.
pub trait Grounder: Send + Sync {
    fn ground(&self, text: &str) -> Result<Vec<GroundingMatch>, GroundingError>;
}

// ============================================================================
// Local lexicon
// ============================================================================

const PARTIAL_MATCH_SCORE: f64 = 0.5;

/// Case-insensitive in-process lexicon.
#[derive(Debug, Clone, Default)]
pub struct LocalGrounder {
    entries: Vec<(String, EntityRef)>,
}

impl LocalGrounder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, entity: EntityRef) {
        self.entries.push((name.trim().to_lowercase(), entity));
    }

    pub fn with(mut self, name: &str, entity: EntityRef) -> Self {
        self.insert(name, entity);
        self
    }

    /// Every symbol of `table` becomes a lexicon name.
    pub fn from_symbols(table: &SymbolTable) -> Self {
        let mut entries: Vec<(String, EntityRef)> = table
            .entries()
            .map(|(symbol, entity)| (symbol.to_string(), entity.clone()))
            .collect();
        entries.sort();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Grounder for LocalGrounder {
    fn ground(&self, text: &str) -> Result<Vec<GroundingMatch>, GroundingError> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let mut matches: Vec<GroundingMatch> = self
            .entries
            .iter()
            .filter_map(|(name, entity)| {
                let score = if *name == needle {
                    1.0
                } else if name.contains(&needle) || needle.contains(name.as_str()) {
                    PARTIAL_MATCH_SCORE * (needle.len().min(name.len()) as f64)
                        / (needle.len().max(name.len()) as f64)
                } else {
                    return None;
                };
                Some(GroundingMatch { entity: entity.clone(), name: Some(name.clone()), score })
            })
            .collect();

        // Stable: equal scores keep lexicon order.
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(matches)
    }
}

// ============================================================================
// Remote service
// ============================================================================

#[cfg(feature = "remote-grounding")]
pub use remote::RemoteGrounder;

#[cfg(feature = "remote-grounding")]
mod remote {
    use std::time::Duration;

    use serde::Deserialize;

    use super::{GroundingError, GroundingMatch, Grounder};
    use crate::entity::{EntityRef, Namespace};

    /// Client for a Gilda-style grounding service (`POST {base}/ground`).
    #[derive(Debug, Clone)]
    pub struct RemoteGrounder {
        base_url: String,
        agent: ureq::Agent,
    }

    #[derive(Deserialize)]
    struct ScoredTerm {
        term: Term,
        score: f64,
    }

    #[derive(Deserialize)]
    struct Term {
        db: String,
        id: String,
        entry_name: Option<String>,
    }

    impl RemoteGrounder {
        pub fn new(base_url: &str, timeout: Duration) -> Self {
            let agent = ureq::AgentBuilder::new().timeout(timeout).build();
            Self { base_url: base_url.trim_end_matches('/').to_string(), agent }
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        /// Whether the service answers at all. An HTTP error status still
        /// counts as reachable.
        pub fn probe(&self) -> bool {
            match self.agent.get(&self.base_url).call() {
                Ok(_) | Err(ureq::Error::Status(..)) => true,
                Err(ureq::Error::Transport(_)) => false,
            }
        }
    }

    impl Grounder for RemoteGrounder {
        fn ground(&self, text: &str) -> Result<Vec<GroundingMatch>, GroundingError> {
            let url = format!("{}/ground", self.base_url);
            let resp = self
                .agent
                .post(&url)
                .send_json(serde_json::json!({ "text": text }))
                .map_err(|e| GroundingError::Transport(e.to_string()))?;

            let terms: Vec<ScoredTerm> = resp
                .into_json()
                .map_err(|e| GroundingError::Decode(e.to_string()))?;
            Ok(ranked_matches(text, terms))
        }
    }

    /// Map service terms to matches, best first, dropping unusable ones.
    fn ranked_matches(text: &str, terms: Vec<ScoredTerm>) -> Vec<GroundingMatch> {
        let mut matches = Vec::with_capacity(terms.len());
        for scored in terms {
            match term_entity(&scored.term) {
                Ok(entity) => matches.push(GroundingMatch {
                    entity,
                    name: scored.term.entry_name,
                    score: scored.score,
                }),
                Err(e) => tracing::warn!(text, error = %e, "skipping unusable grounding term"),
            }
        }
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches
    }

    fn term_entity(term: &Term) -> crate::Result<EntityRef> {
        let ns = Namespace::from_prefix(&term.db);
        // Some namespaces embed the prefix in the id (`CHEBI:CHEBI:1`).
        let prefix = format!("{}:", ns.as_str());
        let id = term.id.to_lowercase();
        let id = id.strip_prefix(&prefix).unwrap_or(&id);
        EntityRef::new(ns, id)
    }

}

// ============================================================================
// Selection
// ============================================================================

/// The grounder chosen for this process.
#[derive(Debug, Clone)]
pub enum GroundingStrategy {
    Local(LocalGrounder),
    #[cfg(feature = "remote-grounding")]
    Remote(RemoteGrounder),
    Unavailable,
}

impl GroundingStrategy {
    pub fn kind(&self) -> &'static str {
        match self {
            GroundingStrategy::Local(_) => "local",
            #[cfg(feature = "remote-grounding")]
            GroundingStrategy::Remote(_) => "remote",
            GroundingStrategy::Unavailable => "unavailable",
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, GroundingStrategy::Unavailable)
    }
}

impl Grounder for GroundingStrategy {
    fn ground(&self, text: &str) -> Result<Vec<GroundingMatch>, GroundingError> {
        match self {
            GroundingStrategy::Local(local) => local.ground(text),
            #[cfg(feature = "remote-grounding")]
            GroundingStrategy::Remote(remote) => remote.ground(text),
            GroundingStrategy::Unavailable => {
                Err(GroundingError::Unavailable("no lexicon loaded and no service configured".into()))
            }
        }
    }
}

/// Pick the grounder once: local lexicon, then remote service, then none.
pub fn select_grounder(local: Option<LocalGrounder>, config: &GroundingConfig) -> GroundingStrategy {
    if let Some(local) = local.filter(|l| !l.is_empty()) {
        tracing::info!(entries = local.len(), "grounding with local lexicon");
        return GroundingStrategy::Local(local);
    }

    #[cfg(feature = "remote-grounding")]
    {
        if let Some(url) = config.url.as_deref() {
            let remote = RemoteGrounder::new(url, std::time::Duration::from_millis(config.timeout_ms));
            if !config.probe || remote.probe() {
                tracing::info!(url, "grounding with remote service");
                return GroundingStrategy::Remote(remote);
            }
            tracing::warn!(url, "grounding service did not answer probe");
        }
    }

    #[cfg(not(feature = "remote-grounding"))]
    {
        if let Some(url) = config.url.as_deref() {
            tracing::warn!(url, "grounding url configured but remote grounding is not compiled in");
        }
    }

    tracing::info!("no grounder available");
    GroundingStrategy::Unavailable
}
