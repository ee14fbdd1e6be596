//! Store behavior tests: search ordering, persistence round-trips, and the
//! read-only open contract.

use std::collections::HashMap;

use docqa_rag::document::{Document, StoredDocument};
use docqa_rag::inmemory::InMemoryVectorStore;
use docqa_rag::sqlite::SqliteVectorStore;
use docqa_rag::store::VectorStore;
use proptest::prelude::*;

fn stored(id: &str, text: &str, embedding: Vec<f32>) -> StoredDocument {
    StoredDocument {
        document: Document { id: id.into(), text: text.into(), metadata: HashMap::new() },
        embedding,
    }
}

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map("non-zero embedding", |mut v| {
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm < 1e-8 {
            return None;
        }
        for val in &mut v {
            *val /= norm;
        }
        Some(v)
    })
}

fn arb_stored(dim: usize) -> impl Strategy<Value = StoredDocument> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim))
        .prop_map(|(id, text, embedding)| stored(&id, &text, embedding))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any stored set, search returns scores in descending order and at
    /// most `top_k` results.
    #[test]
    fn inmemory_search_ordered_and_bounded(
        documents in proptest::collection::vec(arb_stored(16), 1..20),
        query in arb_normalized_embedding(16),
        top_k in 1usize..25,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (results, unique) = rt.block_on(async {
            let store = InMemoryVectorStore::new();

            let mut by_id: HashMap<String, StoredDocument> = HashMap::new();
            for doc in &documents {
                by_id.entry(doc.document.id.clone()).or_insert_with(|| doc.clone());
            }
            let unique: Vec<StoredDocument> = by_id.into_values().collect();
            let count = unique.len();

            store.add(&unique).await.unwrap();
            (store.search(&query, top_k).await.unwrap(), count)
        });

        prop_assert!(results.len() <= top_k);
        prop_assert!(results.len() <= unique);
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[tokio::test]
async fn sqlite_round_trips_documents_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteVectorStore::create(dir.path()).await.unwrap();

    let mut doc = stored("d1", "apples are fruit", vec![1.0, 0.0, 0.0]);
    doc.document.metadata.insert("source".to_string(), "fruit.md".to_string());
    store
        .add(&[doc, stored("d2", "phones are devices", vec![0.0, 1.0, 0.0])])
        .await
        .unwrap();
    assert_eq!(store.len().await.unwrap(), 2);

    let results = store.search(&[1.0, 0.0, 0.0], 3).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document.id, "d1");
    assert_eq!(results[0].document.text, "apples are fruit");
    assert_eq!(results[0].document.source(), "fruit.md");
    assert!(results[0].score > results[1].score);
}

#[tokio::test]
async fn sqlite_add_replaces_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteVectorStore::create(dir.path()).await.unwrap();

    store.add(&[stored("d1", "old text", vec![1.0, 0.0])]).await.unwrap();
    store.add(&[stored("d1", "new text", vec![1.0, 0.0])]).await.unwrap();

    assert_eq!(store.len().await.unwrap(), 1);
    let results = store.search(&[1.0, 0.0], 1).await.unwrap();
    assert_eq!(results[0].document.text, "new text");
}

#[tokio::test]
async fn sqlite_search_truncates_to_top_k() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteVectorStore::create(dir.path()).await.unwrap();

    let docs: Vec<StoredDocument> = (0..5)
        .map(|i| stored(&format!("d{i}"), "text", vec![1.0, i as f32 / 10.0]))
        .collect();
    store.add(&docs).await.unwrap();

    let results = store.search(&[1.0, 0.0], 3).await.unwrap();
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn open_fails_when_store_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(SqliteVectorStore::open(&missing).await.is_err());
}

#[tokio::test]
async fn open_reads_previously_created_store() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = SqliteVectorStore::create(dir.path()).await.unwrap();
        store.add(&[stored("d1", "persisted", vec![0.5, 0.5])]).await.unwrap();
        store.close().await;
    }

    let reopened = SqliteVectorStore::open(dir.path()).await.unwrap();
    assert_eq!(reopened.len().await.unwrap(), 1);
    let results = reopened.search(&[0.5, 0.5], 1).await.unwrap();
    assert_eq!(results[0].document.text, "persisted");
}
