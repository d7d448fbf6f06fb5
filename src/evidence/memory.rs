//! In-memory evidence store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use parking_lot::RwLock;
use async_trait::async_trait;

use crate::{Error, Result};
use super::{Evidence, EvidenceStore};

/// Evidence held in a `HashMap` keyed by statement hash.
#[derive(Clone)]
pub struct MemoryEvidenceStore {
    inner: Arc<EvidenceInner>,
}

struct EvidenceInner {
    evidence: RwLock<HashMap<i64, Vec<Evidence>>>,
    available: AtomicBool,
    fetches: AtomicU64,
}

impl Default for MemoryEvidenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEvidenceStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(EvidenceInner {
                evidence: RwLock::new(HashMap::new()),
                available: AtomicBool::new(true),
                fetches: AtomicU64::new(0),
            }),
        }
    }

    /// Append one evidence to a statement.
    pub fn push(&self, stmt_hash: i64, evidence: Evidence) {
        self.inner.evidence.write().entry(stmt_hash).or_default().push(evidence);
    }

    /// Replace all evidence of a statement.
    pub fn insert(&self, stmt_hash: i64, evidence: Vec<Evidence>) {
        self.inner.evidence.write().insert(stmt_hash, evidence);
    }

    /// Number of `fetch_evidence` calls served.
    pub fn fetches(&self) -> u64 {
        self.inner.fetches.load(Ordering::Relaxed)
    }

    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::Relaxed);
    }
}

#[async_trait]
impl EvidenceStore for MemoryEvidenceStore {
    async fn fetch_evidence(&self, stmt_hash: i64) -> Result<Vec<Evidence>> {
        if !self.inner.available.load(Ordering::Relaxed) {
            return Err(Error::EvidenceUnavailable("memory evidence store is offline".into()));
        }
        self.inner.fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.inner.evidence.read().get(&stmt_hash).cloned().unwrap_or_default())
    }
}
