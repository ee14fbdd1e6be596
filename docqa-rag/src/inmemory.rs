//! In-memory vector store using cosine similarity.
//!
//! Backed by a `HashMap` behind a `tokio::sync::RwLock`. Suitable for
//! development and tests; the persisted store is [`crate::sqlite::SqliteVectorStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::distance::cosine_similarity;
use crate::document::{SearchResult, StoredDocument};
use crate::error::Result;
use crate::store::VectorStore;

/// An in-memory [`VectorStore`] with brute-force cosine search.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    documents: RwLock<HashMap<String, StoredDocument>>,
}

impl InMemoryVectorStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, documents: &[StoredDocument]) -> Result<()> {
        let mut map = self.documents.write().await;
        for stored in documents {
            map.insert(stored.document.id.clone(), stored.clone());
        }
        Ok(())
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let map = self.documents.read().await;

        let mut scored: Vec<SearchResult> = map
            .values()
            .map(|stored| SearchResult {
                document: stored.document.clone(),
                score: cosine_similarity(&stored.embedding, embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.documents.read().await.len())
    }
}
