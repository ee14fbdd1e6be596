//! Retrieval orchestration.
//!
//! The [`Retriever`] composes an [`EmbeddingProvider`] and a [`VectorStore`]:
//! a query is embedded, the store is searched for the configured number of
//! candidates, and the candidates are classified against the relevance
//! threshold. Stores return results score-descending, so the surviving
//! candidates keep that order.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info};

use crate::config::RetrievalConfig;
use crate::document::{Document, SearchResult, StoredDocument};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::store::VectorStore;

/// Outcome of a retrieval attempt, distinguishing the two empty cases the
/// caller reports differently.
#[derive(Debug, Clone)]
pub enum Retrieval {
    /// The search returned no candidates at all.
    NoMatches,
    /// Candidates were found, but every score fell below the threshold.
    BelowThreshold,
    /// Candidates at or above the threshold, in store (score-descending) order.
    Relevant(Vec<SearchResult>),
}

/// Embeds queries and searches a vector store.
///
/// Construct one via [`Retriever::builder()`].
pub struct Retriever {
    config: RetrievalConfig,
    embeddings: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    /// Create a new [`RetrieverBuilder`].
    pub fn builder() -> RetrieverBuilder {
        RetrieverBuilder::default()
    }

    /// The retrieval configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Retrieve candidates for `query` and classify them against the
    /// relevance threshold.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Retrieval`] if query embedding or the store
    /// search fails.
    pub async fn retrieve(&self, query: &str) -> Result<Retrieval> {
        let query_embedding = self.embeddings.embed(query).await.map_err(|e| {
            error!(error = %e, "query embedding failed");
            RagError::Retrieval(format!("query embedding failed: {e}"))
        })?;

        let results =
            self.store.search(&query_embedding, self.config.top_k).await.map_err(|e| {
                error!(error = %e, "vector store search failed");
                RagError::Retrieval(format!("similarity search failed: {e}"))
            })?;

        if results.is_empty() {
            info!("search returned no candidates");
            return Ok(Retrieval::NoMatches);
        }

        let threshold = self.config.relevance_threshold;
        let relevant: Vec<SearchResult> =
            results.into_iter().filter(|r| r.score >= threshold).collect();

        if relevant.is_empty() {
            info!(threshold, "no candidates at or above threshold");
            return Ok(Retrieval::BelowThreshold);
        }

        info!(count = relevant.len(), "retrieved relevant candidates");
        Ok(Retrieval::Relevant(relevant))
    }

    /// Embed and store a batch of texts with their metadata.
    ///
    /// This is the population path used by ingestion tooling and tests; the
    /// query binaries never write.
    pub async fn ingest(&self, documents: &[Document]) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.embeddings.embed_batch(&texts).await.map_err(|e| {
            error!(error = %e, "embedding failed during ingestion");
            RagError::Retrieval(format!("ingestion embedding failed: {e}"))
        })?;

        let stored: Vec<StoredDocument> = documents
            .iter()
            .zip(embeddings)
            .map(|(document, embedding)| StoredDocument { document: document.clone(), embedding })
            .collect();

        self.store.add(&stored).await.map_err(|e| {
            error!(error = %e, "store write failed during ingestion");
            RagError::Retrieval(format!("ingestion write failed: {e}"))
        })?;

        info!(count = stored.len(), "ingested documents");
        Ok(stored.len())
    }

    /// Convenience for ingesting bare texts with a `source` metadata value.
    pub async fn ingest_texts(&self, source: &str, texts: &[&str]) -> Result<usize> {
        let documents: Vec<Document> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Document {
                id: format!("{source}#{i}"),
                text: (*text).to_string(),
                metadata: HashMap::from([(
                    crate::document::SOURCE_KEY.to_string(),
                    source.to_string(),
                )]),
            })
            .collect();
        self.ingest(&documents).await
    }
}

/// Builder for constructing a [`Retriever`].
#[derive(Default)]
pub struct RetrieverBuilder {
    config: Option<RetrievalConfig>,
    embeddings: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn VectorStore>>,
}

impl RetrieverBuilder {
    /// Set the retrieval configuration (defaults apply when omitted).
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embeddings(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embeddings = Some(provider);
        self
    }

    /// Set the vector store.
    pub fn store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the [`Retriever`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if the provider or store is missing.
    pub fn build(self) -> Result<Retriever> {
        let embeddings = self
            .embeddings
            .ok_or_else(|| RagError::Config("embedding provider is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| RagError::Config("vector store is required".to_string()))?;
        Ok(Retriever { config: self.config.unwrap_or_default(), embeddings, store })
    }
}
