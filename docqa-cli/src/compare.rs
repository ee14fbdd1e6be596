//! Word comparison flow: embed one word, report its vector, then report the
//! pairwise embedding distance between two words.

use std::sync::Arc;

use docqa_rag::distance::{DistanceEvaluator, DistanceMetric};
use docqa_rag::embedding::EmbeddingProvider;
use tracing::warn;

/// How a comparison run ended. Both failure variants are reported to the
/// user and terminate the run normally.
#[derive(Debug)]
pub enum CompareOutcome {
    /// Embedding the first word failed; nothing else was attempted.
    EmbeddingFailed {
        /// The word that could not be embedded.
        word: String,
        /// The underlying error.
        error: String,
    },
    /// The vector was produced but the pairwise evaluation failed.
    EvaluationFailed {
        /// The first word and its embedding.
        word: String,
        /// The embedding that was produced before the failure.
        vector: Vec<f32>,
        /// The underlying error.
        error: String,
    },
    /// Both steps succeeded.
    Compared {
        /// The first word.
        word_a: String,
        /// The second word.
        word_b: String,
        /// The first word's embedding.
        vector: Vec<f32>,
        /// The pairwise distance (smaller is closer).
        distance: f32,
    },
}

impl CompareOutcome {
    /// Render the outcome as the text printed to the user.
    pub fn render(&self) -> String {
        match self {
            CompareOutcome::EmbeddingFailed { word, error } => {
                format!("Error generating embedding for '{word}': {error}")
            }
            CompareOutcome::EvaluationFailed { word, vector, error } => format!(
                "{}\nError during evaluation: {error}",
                vector_report(word, vector)
            ),
            CompareOutcome::Compared { word_a, word_b, vector, distance } => format!(
                "{}\nCosine distance between '{word_a}' and '{word_b}': {distance}",
                vector_report(word_a, vector)
            ),
        }
    }
}

fn vector_report(word: &str, vector: &[f32]) -> String {
    format!("Vector for '{word}': {vector:?}\nVector length: {}", vector.len())
}

/// Embed `word_a`, then evaluate the cosine distance between `word_a` and
/// `word_b`. Failures are folded into the outcome rather than propagated.
pub async fn compare_words(
    provider: Arc<dyn EmbeddingProvider>,
    word_a: &str,
    word_b: &str,
) -> CompareOutcome {
    let vector = match provider.embed(word_a).await {
        Ok(vector) => vector,
        Err(e) => {
            warn!(word = word_a, error = %e, "embedding failed");
            return CompareOutcome::EmbeddingFailed { word: word_a.to_string(), error: e.to_string() };
        }
    };

    let evaluator = DistanceEvaluator::new(provider).with_metric(DistanceMetric::Cosine);
    match evaluator.evaluate(word_a, word_b).await {
        Ok(distance) => CompareOutcome::Compared {
            word_a: word_a.to_string(),
            word_b: word_b.to_string(),
            vector,
            distance,
        },
        Err(e) => {
            warn!(error = %e, "pairwise evaluation failed");
            CompareOutcome::EvaluationFailed {
                word: word_a.to_string(),
                vector,
                error: e.to_string(),
            }
        }
    }
}
