//! End-to-end tests for signed (causal) retrieval.
//!
//! Every edge below touches `mesh:d007239`; which ones survive depends on
//! the polarity of the gene list, the edge's orientation and its statement
//! type.

use cogex_rs::storage::StatementEdge;
use cogex_rs::{EntityRef, Error, MemoryEvidenceStore, MemoryStore, Retriever, SignedRequest};
use pretty_assertions::assert_eq;

fn e(curie: &str) -> EntityRef {
    curie.parse().unwrap()
}

fn edge(store: &MemoryStore, src: &str, dst: &str, hash: i64, stmt_type: &str) {
    store
        .add_statement(&e(src), &e(dst), StatementEdge::new(hash, stmt_type, 0.8, 3))
        .unwrap();
}

fn infection_graph() -> MemoryStore {
    let store = MemoryStore::new();
    let mesh = "mesh:d007239";
    store.add_entity(&e(mesh), Some("Infections"));

    // hgnc:1, positive hypothesis
    edge(&store, "hgnc:1", mesh, 1, "Inhibition");
    edge(&store, "hgnc:1", mesh, 2, "Activation");
    edge(&store, mesh, "hgnc:1", 3, "Activation");
    edge(&store, mesh, "hgnc:1", 4, "Inhibition");
    edge(&store, mesh, "hgnc:1", 5, "Complex");
    edge(&store, "hgnc:1", mesh, 9, "DecreaseAmount");

    // hgnc:2, negative hypothesis
    edge(&store, "hgnc:2", mesh, 6, "IncreaseAmount");
    edge(&store, mesh, "hgnc:2", 7, "DecreaseAmount");
    edge(&store, "hgnc:2", mesh, 8, "Inhibition");
    edge(&store, mesh, "hgnc:2", 10, "Complex");
    store
}

fn hashes(result: &cogex_rs::RetrievalResult) -> Vec<i64> {
    result.statements.iter().map(|s| s.hash).collect()
}

#[tokio::test]
async fn test_positive_genes_follow_positive_row() {
    let store = infection_graph();
    let retriever = Retriever::new(store.clone(), MemoryEvidenceStore::new());

    let request = SignedRequest::new("MESH:D007239").with_positive(["HGNC:1"]);
    let result = retriever.signed_statements(&request).await.unwrap();

    // gene→target: DecreaseAmount, Inhibition; target→gene: IncreaseAmount, Activation, Complex
    assert_eq!(hashes(&result), vec![1, 3, 5, 9]);
    assert_eq!(store.queries_run(), 1);
}

#[tokio::test]
async fn test_negative_genes_follow_negative_row() {
    let retriever = Retriever::new(infection_graph(), MemoryEvidenceStore::new());

    let request = SignedRequest::new("MESH:D007239").with_negative(["HGNC:2"]);
    let result = retriever.signed_statements(&request).await.unwrap();

    // gene→target: IncreaseAmount, Activation; target→gene: DecreaseAmount, Inhibition
    assert_eq!(hashes(&result), vec![6, 7]);
}

#[tokio::test]
async fn test_both_polarities_concatenate_positive_first() {
    let store = infection_graph();
    let retriever = Retriever::new(store.clone(), MemoryEvidenceStore::new());

    let request = SignedRequest::new("MESH:D007239")
        .with_positive(["HGNC:1"])
        .with_negative(["HGNC:2"]);
    let result = retriever.signed_statements(&request).await.unwrap();

    assert_eq!(hashes(&result), vec![1, 3, 5, 9, 6, 7]);
    assert_eq!(result.evidence_counts.len(), 6);
    assert_eq!(store.queries_run(), 2);
}

#[tokio::test]
async fn test_statement_in_both_polarities_is_kept_once() {
    let store = infection_graph();
    // same statement as hash 1, reachable through the negative query
    edge(&store, "hgnc:2", "mesh:d007239", 1, "Activation");
    let retriever = Retriever::new(store, MemoryEvidenceStore::new());

    // hgnc:1 as negative matches hash 2 (Activation, gene→target) and 4
    // (Inhibition, target→gene); as positive it matches 1, 3, 5, 9.
    let request = SignedRequest::new("MESH:D007239")
        .with_positive(["HGNC:1"])
        .with_negative(["HGNC:1", "HGNC:2"]);
    let result = retriever.signed_statements(&request).await.unwrap();

    assert_eq!(hashes(&result), vec![1, 3, 5, 9, 2, 4, 6, 7]);
    let mut distinct = hashes(&result);
    distinct.sort();
    distinct.dedup();
    assert_eq!(distinct.len(), result.statements.len());
}

#[tokio::test]
async fn test_belief_threshold_is_strict() {
    let store = infection_graph();
    store
        .add_statement(&e("hgnc:1"), &e("mesh:d007239"), StatementEdge::new(20, "Inhibition", 0.5, 3))
        .unwrap();
    let retriever = Retriever::new(store, MemoryEvidenceStore::new());

    let at = SignedRequest::new("MESH:D007239").with_positive(["HGNC:1"]).with_minimum_belief(0.5);
    let result = retriever.signed_statements(&at).await.unwrap();
    assert!(!result.evidence_counts.contains(20));
    assert_eq!(hashes(&result), vec![1, 3, 5, 9]);

    let below = SignedRequest::new("MESH:D007239").with_positive(["HGNC:1"]).with_minimum_belief(0.49);
    let result = retriever.signed_statements(&below).await.unwrap();
    assert!(result.evidence_counts.contains(20));
}

#[tokio::test]
async fn test_requires_a_gene_list() {
    let store = infection_graph();
    let retriever = Retriever::new(store.clone(), MemoryEvidenceStore::new());

    let err = retriever
        .signed_statements(&SignedRequest::new("MESH:D007239"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
    assert_eq!(store.queries_run(), 0);
}

#[tokio::test]
async fn test_unresolved_errors_name_their_list() {
    let store = infection_graph();
    let retriever = Retriever::new(store.clone(), MemoryEvidenceStore::new());

    let request = SignedRequest::new("MESH:D007239")
        .with_positive(["HGNC:1", "POSNOPE"])
        .with_negative(["NEGNOPE"]);
    let result = retriever.signed_statements(&request).await.unwrap();

    let fields: Vec<_> = result.errors.iter().map(|u| (u.field.as_str(), u.input.as_str())).collect();
    assert_eq!(fields, vec![("positive_genes", "POSNOPE"), ("negative_genes", "NEGNOPE")]);
    assert_eq!(hashes(&result), vec![1, 3, 5, 9]);
    // the negative list resolved to nothing, so only one query ran
    assert_eq!(store.queries_run(), 1);
}

#[tokio::test]
async fn test_from_query_pairs() {
    let pairs: Vec<(String, String)> = [
        ("target_id", "MESH:D007239"),
        ("positive_genes", "HGNC:1"),
        ("negative_genes", "[\"HGNC:2\"]"),
        ("minimum_evidence", "3"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let request = SignedRequest::from_query_pairs(&pairs).unwrap();
    let retriever = Retriever::new(infection_graph(), MemoryEvidenceStore::new());
    let result = retriever.signed_statements(&request).await.unwrap();
    assert_eq!(hashes(&result), vec![1, 3, 5, 9, 6, 7]);

    let strict = SignedRequest { minimum_evidence: Some(4), ..request };
    let result = retriever.signed_statements(&strict).await.unwrap();
    assert!(result.is_empty());
}
