//! Vector store trait for embedding storage and similarity search.

use async_trait::async_trait;

use crate::document::{SearchResult, StoredDocument};
use crate::error::Result;

/// A storage backend holding document embeddings and supporting
/// nearest-neighbor search.
///
/// Implementations must return search results ordered by descending
/// similarity score, never more than `top_k` of them.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert or replace documents by ID. Embeddings must be set.
    async fn add(&self, documents: &[StoredDocument]) -> Result<()>;

    /// Search for the `top_k` documents most similar to the given embedding.
    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>>;

    /// Number of documents currently held.
    async fn len(&self) -> Result<usize>;
}
