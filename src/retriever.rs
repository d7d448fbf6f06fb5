//! The retrieval entry points.
//!
//! A [`Retriever`] wraps a graph store and an evidence store and runs the
//! whole pipeline for one request:
//!
//! ```text
//! validate ─► normalize ─► build spec(s) ─► run ─► flatten ─► assemble ─► enrich ─► index
//! ```
//!
//! Validation and normalization happen before any store call, so a bad
//! request never reaches the store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assembly::{assemble, build_index, flatten_all, EvidenceIndex, Relation, Statement};
use crate::config::RetrievalConfig;
use crate::entity::{EntityRef, Namespace};
use crate::evidence::{enrich, EvidenceStore, MemoryEvidenceStore};
use crate::normalize::{
    select_grounder, Grounder, GroundingError, GroundingMatch, GroundingStrategy, LocalGrounder,
    Normalizer, SymbolResolver, SymbolTable, UnresolvedIdentifier,
};
use crate::query::{cypher, QueryBuilder, QuerySpec};
use crate::request::{MetaboliteRequest, OraRequest, SignedRequest};
use crate::storage::{GraphStore, MemoryStore, RelationshipSummary};
use crate::Result;

/// Statements for one request, with their evidence counts and whatever
/// identifiers could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub statements: Vec<Statement>,
    pub evidence_counts: EvidenceIndex,
    pub errors: Vec<UnresolvedIdentifier>,
}

impl RetrievalResult {
    fn unresolved(errors: Vec<UnresolvedIdentifier>) -> Self {
        Self { errors, ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Runs retrievals against a graph store and an evidence store.
pub struct Retriever<G: GraphStore, E: EvidenceStore> {
    store: G,
    evidence: E,
    symbols: Arc<dyn SymbolResolver>,
    grounder: Option<Arc<dyn Grounder>>,
    config: RetrievalConfig,
}

impl<G: GraphStore, E: EvidenceStore> Retriever<G, E> {
    /// A retriever with default configuration, an empty symbol table and
    /// no grounder.
    pub fn new(store: G, evidence: E) -> Self {
        Self {
            store,
            evidence,
            symbols: Arc::new(SymbolTable::new()),
            grounder: None,
            config: RetrievalConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RetrievalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_symbols(mut self, symbols: Arc<dyn SymbolResolver>) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn with_grounder(mut self, grounder: impl Grounder + 'static) -> Self {
        self.grounder = Some(Arc::new(grounder));
        self
    }

    /// Pick the grounder from `local` and the configured service, once.
    pub fn with_grounding(mut self, local: Option<LocalGrounder>) -> Self {
        self.grounder = match select_grounder(local, &self.config.grounding) {
            GroundingStrategy::Unavailable => None,
            strategy => Some(Arc::new(strategy)),
        };
        self
    }

    pub fn store(&self) -> &G {
        &self.store
    }

    pub fn evidence_store(&self) -> &E {
        &self.evidence
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn normalizer(&self) -> Normalizer<'_> {
        let normalizer = Normalizer::new(self.symbols.as_ref())
            .with_minimum_score(self.config.grounding.minimum_score);
        match &self.grounder {
            Some(grounder) => normalizer.with_grounder(grounder.as_ref()),
            None => normalizer,
        }
    }

    /// Ground free text directly.
    pub fn ground(&self, text: &str) -> Result<Vec<GroundingMatch>> {
        let grounder = self
            .grounder
            .as_ref()
            .ok_or_else(|| GroundingError::Unavailable("no grounder selected".into()))?;
        Ok(grounder.ground(text)?)
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Statements connecting `request.genes` to the target (over-representation
    /// analysis).
    pub async fn ora_statements(&self, request: &OraRequest) -> Result<RetrievalResult> {
        request.validate()?;
        let thresholds = request.thresholds(&self.config.ora)?;
        let normalizer = self.normalizer();
        let target = normalizer.normalize_target(&request.target_id, None)?;
        let genes = normalizer.normalize_batch(request.genes.as_slice(), &Namespace::Hgnc, "genes");

        if genes.is_empty() {
            tracing::info!(entity = %target, unresolved = genes.errors.len(), "no genes resolved");
            return Ok(RetrievalResult::unresolved(genes.errors));
        }

        let spec = QueryBuilder::discrete(&target, genes.resolved, request.is_downstream, thresholds);
        let relations = self.fetch(&spec).await?;
        self.finish(relations, thresholds.minimum_evidence, genes.errors).await
    }

    /// Statements supporting the positive and negative gene hypotheses about
    /// the target (signed analysis).
    pub async fn signed_statements(&self, request: &SignedRequest) -> Result<RetrievalResult> {
        request.validate()?;
        let thresholds = request.thresholds(&self.config.signed)?;
        let normalizer = self.normalizer();
        let target = normalizer.normalize_target(&request.target_id, None)?;
        let positive = normalizer.normalize_batch(request.positive_genes.as_slice(), &Namespace::Hgnc, "positive_genes");
        let negative = normalizer.normalize_batch(request.negative_genes.as_slice(), &Namespace::Hgnc, "negative_genes");

        let mut errors = positive.errors;
        errors.extend(negative.errors);
        if positive.resolved.is_empty() && negative.resolved.is_empty() {
            tracing::info!(entity = %target, unresolved = errors.len(), "no genes resolved");
            return Ok(RetrievalResult::unresolved(errors));
        }

        let mut relations = Vec::new();
        for spec in QueryBuilder::signed_pair(&target, positive.resolved, negative.resolved, thresholds) {
            relations.extend(self.fetch(&spec).await?);
        }
        self.finish(relations, thresholds.minimum_evidence, errors).await
    }

    /// Statements connecting metabolites to an enzyme or other target.
    pub async fn metabolite_statements(&self, request: &MetaboliteRequest) -> Result<RetrievalResult> {
        request.validate()?;
        let thresholds = request.thresholds(&self.config.metabolite)?;
        let normalizer = self.normalizer();
        let target = normalizer.normalize_target(&request.target_id, Some(&Namespace::Eccode))?;
        let metabolites = normalizer.normalize_batch(request.metabolites.as_slice(), &Namespace::Chebi, "metabolites");

        if metabolites.is_empty() {
            tracing::info!(entity = %target, unresolved = metabolites.errors.len(), "no metabolites resolved");
            return Ok(RetrievalResult::unresolved(metabolites.errors));
        }

        if self.store.capabilities().supports_summary {
            if let Err(e) = self.discover_relationships(&metabolites.resolved).await {
                tracing::warn!(error = %e, "relationship discovery failed");
            }
        }

        let spec = QueryBuilder::metabolite(&target, metabolites.resolved, thresholds);
        let relations = self.fetch(&spec).await?;
        self.finish(relations, thresholds.minimum_evidence, metabolites.errors).await
    }

    /// Relationship counts around `entities`, logged at debug level.
    pub async fn discover_relationships(&self, entities: &[EntityRef]) -> Result<Vec<RelationshipSummary>> {
        let rows = self.store.relationship_summary(entities).await?;
        for row in &rows {
            tracing::debug!(
                entity = %row.entity,
                relation = %row.relation_label,
                stmt_type = row.stmt_type.as_deref().unwrap_or("-"),
                count = row.count,
                "relationship summary"
            );
        }
        Ok(rows)
    }

    // ========================================================================
    // Pipeline stages
    // ========================================================================

    async fn fetch(&self, spec: &QuerySpec) -> Result<Vec<Relation>> {
        let query = cypher::render(spec);
        tracing::debug!(query = %query.text, params = ?query.params, "running query");

        let paths = self.store.run(spec).await?;
        let relations = flatten_all(&paths);
        tracing::info!(
            entity = %spec.target(),
            polarity = ?spec.polarity(),
            paths = paths.len(),
            relations = relations.len(),
            "retrieved relations"
        );
        Ok(relations)
    }

    async fn finish(
        &self,
        relations: Vec<Relation>,
        minimum_evidence: u64,
        errors: Vec<UnresolvedIdentifier>,
    ) -> Result<RetrievalResult> {
        let (statements, kept) = assemble(relations, minimum_evidence).into_parts();
        let statements = enrich(&self.evidence, statements).await?;
        let evidence_counts = build_index(&kept, &statements)?;

        tracing::info!(
            statements = statements.len(),
            unresolved = errors.len(),
            "retrieval complete"
        );
        Ok(RetrievalResult { statements, evidence_counts, errors })
    }
}

/// In-memory retriever for testing and embedding.
impl Retriever<MemoryStore, MemoryEvidenceStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryEvidenceStore::new())
    }
}
