//! Data types for documents and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata key under which a document's origin is recorded.
pub const SOURCE_KEY: &str = "source";

/// Placeholder used when a document carries no source metadata.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// A document held by the vector store.
///
/// Documents are immutable from the query side: the store is populated by a
/// separate ingestion step and read during retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The text content of the document.
    pub text: String,
    /// Key-value metadata; the `source` key identifies the origin.
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Return the `source` metadata value, or [`UNKNOWN_SOURCE`] if absent.
    pub fn source(&self) -> &str {
        self.metadata.get(SOURCE_KEY).map(String::as_str).unwrap_or(UNKNOWN_SOURCE)
    }
}

/// A [`Document`] paired with its embedding, as held inside a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredDocument {
    /// The document itself.
    pub document: Document,
    /// The embedding vector for the document's text.
    pub embedding: Vec<f32>,
}

/// A retrieved [`Document`] paired with a relevance score.
///
/// Scores are cosine similarity: higher is more relevant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved document.
    pub document: Document,
    /// The similarity score.
    pub score: f32,
}
