//! Retrieval configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Default number of candidates requested from the store.
pub const DEFAULT_TOP_K: usize = 3;

/// Default minimum relevance score for a candidate to be used.
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.7;

/// Default persist directory for the vector store.
pub const DEFAULT_PERSIST_DIR: &str = "chroma";

/// Configuration parameters for retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Number of top candidates to request from the vector store.
    pub top_k: usize,
    /// Minimum relevance score; candidates below it are discarded.
    pub relevance_threshold: f32,
    /// Directory holding the persisted vector store.
    pub persist_dir: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            persist_dir: DEFAULT_PERSIST_DIR.to_string(),
        }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }
}

/// Builder for a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Set the number of top candidates to request.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the minimum relevance score.
    pub fn relevance_threshold(mut self, threshold: f32) -> Self {
        self.config.relevance_threshold = threshold;
        self
    }

    /// Set the persist directory.
    pub fn persist_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.persist_dir = dir.into();
        self
    }

    /// Build the [`RetrievalConfig`], validating parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `top_k == 0` or the threshold is
    /// outside `[0, 1]`.
    pub fn build(self) -> Result<RetrievalConfig> {
        if self.config.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        if !(0.0..=1.0).contains(&self.config.relevance_threshold) {
            return Err(RagError::Config(format!(
                "relevance_threshold ({}) must be within [0, 1]",
                self.config.relevance_threshold
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_constants() {
        let config = RetrievalConfig::default();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.relevance_threshold, 0.7);
        assert_eq!(config.persist_dir, "chroma");
    }

    #[test]
    fn builder_rejects_zero_top_k() {
        assert!(RetrievalConfig::builder().top_k(0).build().is_err());
    }

    #[test]
    fn builder_rejects_out_of_range_threshold() {
        assert!(RetrievalConfig::builder().relevance_threshold(1.5).build().is_err());
        assert!(RetrievalConfig::builder().relevance_threshold(-0.1).build().is_err());
    }
}
