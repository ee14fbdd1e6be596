//! Retrieval layer for `docqa`.
//!
//! Provides the pieces the query and comparison binaries compose:
//!
//! - [`EmbeddingProvider`] with the OpenAI-backed [`OpenAiEmbeddings`]
//! - [`VectorStore`] with the persisted [`SqliteVectorStore`] and the
//!   test-oriented [`InMemoryVectorStore`]
//! - [`Retriever`], which embeds a query, searches the store, and classifies
//!   candidates against the relevance threshold
//! - [`DistanceEvaluator`] for pairwise embedding distance
//! - prompt/context assembly in [`prompt`]

pub mod config;
pub mod distance;
pub mod document;
pub mod embedding;
pub mod error;
pub mod inmemory;
pub mod openai;
pub mod prompt;
pub mod retriever;
pub mod sqlite;
pub mod store;

pub use config::{RetrievalConfig, DEFAULT_PERSIST_DIR, DEFAULT_RELEVANCE_THRESHOLD, DEFAULT_TOP_K};
pub use distance::{cosine_similarity, DistanceEvaluator, DistanceMetric};
pub use document::{Document, SearchResult, StoredDocument, SOURCE_KEY, UNKNOWN_SOURCE};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use inmemory::InMemoryVectorStore;
pub use openai::OpenAiEmbeddings;
pub use prompt::{build_prompt, context_text, sources, CONTEXT_SEPARATOR, QA_TEMPLATE};
pub use retriever::{Retrieval, Retriever, RetrieverBuilder};
pub use sqlite::SqliteVectorStore;
pub use store::VectorStore;
