//! # Evidence
//!
//! Evidence records, the store they come from, and the enrichment step that
//! attaches them to assembled statements. Enrichment is never truncated:
//! every evidence the store holds for a hash is attached.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::assembly::Statement;
use crate::Result;

pub use memory::MemoryEvidenceStore;

/// One unit of textual or provenance support for a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Evidence {
    /// Reader or database the evidence came from (`reach`, `sparser`, `biopax`, ...).
    pub source_api: String,
    pub text: Option<String>,
    pub pmid: Option<String>,
    pub source_hash: Option<i64>,
}

impl Evidence {
    pub fn new(source_api: impl Into<String>) -> Self {
        Self { source_api: source_api.into(), text: None, pmid: None, source_hash: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_pmid(mut self, pmid: impl Into<String>) -> Self {
        self.pmid = Some(pmid.into());
        self
    }

    pub fn with_source_hash(mut self, hash: i64) -> Self {
        self.source_hash = Some(hash);
        self
    }
}

/// Evidence lookup keyed by statement hash.
#[async_trait]
pub trait EvidenceStore: Send + Sync + 'static {
    /// Every evidence recorded for `stmt_hash`. An unknown hash has none.
    async fn fetch_evidence(&self, stmt_hash: i64) -> Result<Vec<Evidence>>;

    /// Evidence for several hashes, in the order given.
    ///
    /// Default falls back to sequential `fetch_evidence` calls.
    async fn fetch_evidence_batch(&self, stmt_hashes: &[i64]) -> Result<Vec<Vec<Evidence>>> {
        let mut out = Vec::with_capacity(stmt_hashes.len());
        for hash in stmt_hashes {
            out.push(self.fetch_evidence(*hash).await?);
        }
        Ok(out)
    }
}

/// Attach the complete evidence list to each statement.
///
/// Output order matches input order. A store failure fails the whole call.
pub async fn enrich<E: EvidenceStore + ?Sized>(
    store: &E,
    statements: Vec<Statement>,
) -> Result<Vec<Statement>> {
    let hashes: Vec<i64> = statements.iter().map(|s| s.hash).collect();
    let evidence = store.fetch_evidence_batch(&hashes).await?;
    if evidence.len() != statements.len() {
        return Err(crate::Error::EvidenceUnavailable(format!(
            "requested evidence for {} statements, got {}",
            statements.len(),
            evidence.len()
        )));
    }

    let enriched: Vec<Statement> = statements
        .into_iter()
        .zip(evidence)
        .map(|(stmt, ev)| stmt.with_evidence(ev))
        .collect();

    tracing::debug!(
        statements = enriched.len(),
        evidence = enriched.iter().map(|s| s.evidence.len()).sum::<usize>(),
        "enriched statements"
    );
    Ok(enriched)
}
