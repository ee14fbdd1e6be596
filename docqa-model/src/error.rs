//! Error types for the `docqa-model` crate.

use thiserror::Error;

/// Errors that can occur when talking to a chat-completion backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The client configuration is invalid.
    #[error("Model configuration error: {0}")]
    Config(String),

    /// The request could not be sent or the response could not be read.
    #[error("Model request error: {0}")]
    Request(String),

    /// The API answered with an error status.
    #[error("Model API error ({status}): {message}")]
    Api {
        /// HTTP status returned by the API.
        status: u16,
        /// Error detail extracted from the response body.
        message: String,
    },

    /// The response was well-formed but carried no usable content.
    #[error("Model returned an empty response")]
    EmptyResponse,
}

/// A convenience result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
