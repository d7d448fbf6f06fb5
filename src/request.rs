//! Analysis requests and their query-string form.
//!
//! Each request is a plain DTO. `from_query_pairs` accepts decoded
//! `key=value` pairs with repeated keys for lists. Each list value is one
//! identifier, spaces included (`ascorbic acid`), unless it is a
//! comma-separated or bracketed list. Unknown keys are ignored. An empty
//! value counts as unspecified.

use serde::{Deserialize, Serialize};

use crate::config::ModeDefaults;
use crate::query::Thresholds;
use crate::{Error, Result};

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<Option<T>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| Error::InvalidParameter(format!("{key}: '{value}' is not a valid number")))
}

/// Identifiers carried by one list-valued query pair.
fn list_value(value: &str) -> Vec<String> {
    let body = value.trim();
    let body = match body.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
        Some(inner) => inner,
        None => body,
    };
    body.split(',')
        .map(|item| item.trim().trim_matches(|c: char| c == '"' || c == '\'').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn require_target(target_id: &str) -> Result<()> {
    if target_id.trim().is_empty() {
        return Err(Error::InvalidParameter("target_id is required".into()));
    }
    Ok(())
}

/// Discrete (over-representation) analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OraRequest {
    pub target_id: String,
    pub genes: Vec<String>,
    pub minimum_belief: Option<f64>,
    pub minimum_evidence: Option<u64>,
    /// Genes act on the target rather than the other way round.
    #[serde(default)]
    pub is_downstream: bool,
}

impl OraRequest {
    pub fn new<I, S>(target_id: impl Into<String>, genes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_id: target_id.into(),
            genes: genes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_minimum_belief(mut self, minimum_belief: f64) -> Self {
        self.minimum_belief = Some(minimum_belief);
        self
    }

    pub fn with_minimum_evidence(mut self, minimum_evidence: u64) -> Self {
        self.minimum_evidence = Some(minimum_evidence);
        self
    }

    pub fn downstream(mut self) -> Self {
        self.is_downstream = true;
        self
    }

    pub fn from_query_pairs(pairs: &[(String, String)]) -> Result<Self> {
        let mut request = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "target_id" => request.target_id = value.trim().to_string(),
                "genes" => request.genes.extend(list_value(value)),
                "minimum_belief" => request.minimum_belief = parse_number(key, value)?,
                "minimum_evidence" => request.minimum_evidence = parse_number(key, value)?,
                "is_downstream" => request.is_downstream = parse_flag(value),
                other => tracing::debug!(key = other, "ignoring unknown ora parameter"),
            }
        }
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        require_target(&self.target_id)?;
        if self.genes.is_empty() {
            return Err(Error::InvalidParameter("target_id and genes are required".into()));
        }
        Ok(())
    }

    pub fn thresholds(&self, defaults: &ModeDefaults) -> Result<Thresholds> {
        defaults.resolve(self.minimum_belief, self.minimum_evidence)
    }
}

/// Signed (causal) analysis: genes hypothesized to raise or lower the
/// target's activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignedRequest {
    pub target_id: String,
    #[serde(default)]
    pub positive_genes: Vec<String>,
    #[serde(default)]
    pub negative_genes: Vec<String>,
    pub minimum_belief: Option<f64>,
    pub minimum_evidence: Option<u64>,
}

impl SignedRequest {
    pub fn new(target_id: impl Into<String>) -> Self {
        Self { target_id: target_id.into(), ..Self::default() }
    }

    pub fn with_positive<I, S>(mut self, genes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positive_genes.extend(genes.into_iter().map(Into::into));
        self
    }

    pub fn with_negative<I, S>(mut self, genes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.negative_genes.extend(genes.into_iter().map(Into::into));
        self
    }

    pub fn with_minimum_belief(mut self, minimum_belief: f64) -> Self {
        self.minimum_belief = Some(minimum_belief);
        self
    }

    pub fn with_minimum_evidence(mut self, minimum_evidence: u64) -> Self {
        self.minimum_evidence = Some(minimum_evidence);
        self
    }

    pub fn from_query_pairs(pairs: &[(String, String)]) -> Result<Self> {
        let mut request = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "target_id" => request.target_id = value.trim().to_string(),
                "positive_genes" => request.positive_genes.extend(list_value(value)),
                "negative_genes" => request.negative_genes.extend(list_value(value)),
                "minimum_belief" => request.minimum_belief = parse_number(key, value)?,
                "minimum_evidence" => request.minimum_evidence = parse_number(key, value)?,
                other => tracing::debug!(key = other, "ignoring unknown signed parameter"),
            }
        }
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        require_target(&self.target_id)?;
        if self.positive_genes.is_empty() && self.negative_genes.is_empty() {
            return Err(Error::InvalidParameter(
                "target_id and at least one gene list required".into(),
            ));
        }
        Ok(())
    }

    pub fn thresholds(&self, defaults: &ModeDefaults) -> Result<Thresholds> {
        defaults.resolve(self.minimum_belief, self.minimum_evidence)
    }
}

/// Metabolite analysis against an enzyme or other target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaboliteRequest {
    /// Without a prefix this is read as an EC code.
    pub target_id: String,
    pub metabolites: Vec<String>,
    pub minimum_belief: Option<f64>,
    pub minimum_evidence: Option<u64>,
}

impl MetaboliteRequest {
    pub fn new<I, S>(target_id: impl Into<String>, metabolites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_id: target_id.into(),
            metabolites: metabolites.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_minimum_belief(mut self, minimum_belief: f64) -> Self {
        self.minimum_belief = Some(minimum_belief);
        self
    }

    pub fn with_minimum_evidence(mut self, minimum_evidence: u64) -> Self {
        self.minimum_evidence = Some(minimum_evidence);
        self
    }

    pub fn from_query_pairs(pairs: &[(String, String)]) -> Result<Self> {
        let mut request = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "target_id" => request.target_id = value.trim().to_string(),
                "metabolites" => request.metabolites.extend(list_value(value)),
                "minimum_belief" => request.minimum_belief = parse_number(key, value)?,
                "minimum_evidence" => request.minimum_evidence = parse_number(key, value)?,
                other => tracing::debug!(key = other, "ignoring unknown metabolite parameter"),
            }
        }
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        require_target(&self.target_id)?;
        if self.metabolites.is_empty() {
            return Err(Error::InvalidParameter("target_id and metabolites are required".into()));
        }
        Ok(())
    }

    pub fn thresholds(&self, defaults: &ModeDefaults) -> Result<Thresholds> {
        defaults.resolve(self.minimum_belief, self.minimum_evidence)
    }
}
