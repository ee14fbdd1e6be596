//! Error types for the `docqa-rag` crate.

use thiserror::Error;

/// Errors that can occur in the retrieval layer.
#[derive(Debug, Error)]
pub enum RagError {
    /// An error occurred while generating embeddings.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    Store {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error in retrieval orchestration.
    #[error("Retrieval error: {0}")]
    Retrieval(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
