//! Retrieval configuration: per-mode threshold defaults and grounding setup.
//!
//! ```json
//! {
//!   "ora":        { "minimum_belief": 0.0, "minimum_evidence": 2 },
//!   "signed":     { "minimum_belief": 0.0, "minimum_evidence": 1 },
//!   "metabolite": { "minimum_belief": 0.0, "minimum_evidence": 1 },
//!   "grounding":  { "url": "http://localhost:8001", "probe": true, "minimum_score": 1.0 }
//! }
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::query::Thresholds;
use crate::{Error, Result};

/// Thresholds used when a request leaves them unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeDefaults {
    #[serde(default)]
    pub minimum_belief: f64,
    #[serde(default)]
    pub minimum_evidence: u64,
}

impl ModeDefaults {
    pub fn ora() -> Self {
        Self { minimum_belief: 0.0, minimum_evidence: 2 }
    }

    pub fn signed() -> Self {
        Self { minimum_belief: 0.0, minimum_evidence: 1 }
    }

    pub fn metabolite() -> Self {
        Self { minimum_belief: 0.0, minimum_evidence: 1 }
    }

    /// Fill the unspecified halves of a request's thresholds.
    pub fn resolve(&self, minimum_belief: Option<f64>, minimum_evidence: Option<u64>) -> Result<Thresholds> {
        Thresholds::new(
            minimum_belief.unwrap_or(self.minimum_belief),
            minimum_evidence.unwrap_or(self.minimum_evidence),
        )
    }
}

fn default_probe() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_minimum_score() -> f64 {
    1.0
}

/// Where free-text grounding comes from when no local lexicon is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingConfig {
    /// Base URL of a remote grounding service.
    #[serde(default)]
    pub url: Option<String>,
    /// Check the service answers before selecting it.
    #[serde(default = "default_probe")]
    pub probe: bool,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Weakest grounding score accepted when normalizing a symbol. The
    /// default admits exact lexicon hits only.
    #[serde(default = "default_minimum_score")]
    pub minimum_score: f64,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            url: None,
            probe: default_probe(),
            timeout_ms: default_timeout_ms(),
            minimum_score: default_minimum_score(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "ModeDefaults::ora")]
    pub ora: ModeDefaults,
    #[serde(default = "ModeDefaults::signed")]
    pub signed: ModeDefaults,
    #[serde(default = "ModeDefaults::metabolite")]
    pub metabolite: ModeDefaults,
    #[serde(default)]
    pub grounding: GroundingConfig,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            ora: ModeDefaults::ora(),
            signed: ModeDefaults::signed(),
            metabolite: ModeDefaults::metabolite(),
            grounding: GroundingConfig::default(),
        }
    }
}

impl RetrievalConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        for (mode, defaults) in [("ora", &self.ora), ("signed", &self.signed), ("metabolite", &self.metabolite)] {
            if !(0.0..=1.0).contains(&defaults.minimum_belief) {
                return Err(Error::Config(format!(
                    "{mode}.minimum_belief must be within [0, 1], got {}",
                    defaults.minimum_belief
                )));
            }
        }
        if let Some(url) = &self.grounding.url {
            if url.trim().is_empty() {
                return Err(Error::Config("grounding.url is empty".into()));
            }
        }
        let score = self.grounding.minimum_score;
        if !(score > 0.0 && score <= 1.0) {
            return Err(Error::Config(format!(
                "grounding.minimum_score must be within (0, 1], got {score}"
            )));
        }
        Ok(())
    }
}
