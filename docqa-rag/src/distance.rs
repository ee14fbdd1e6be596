//! Pairwise embedding distance evaluation.
//!
//! Embeds two strings and computes a distance metric between the vectors
//! locally. Used by the comparison utility to report how close two words are
//! in embedding space.

use std::sync::Arc;

use tracing::debug;

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// Distance metrics supported by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// `1 - cosine_similarity`; 0 for identical directions, up to 2 for
    /// opposite directions.
    #[default]
    Cosine,
    /// Euclidean (L2) distance.
    Euclidean,
    /// Negated dot product, so that smaller is closer for all metrics.
    DotProduct,
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Evaluates the pairwise distance between two texts in embedding space.
pub struct DistanceEvaluator {
    provider: Arc<dyn EmbeddingProvider>,
    metric: DistanceMetric,
}

impl DistanceEvaluator {
    /// Create an evaluator using the default metric (cosine distance).
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider, metric: DistanceMetric::default() }
    }

    /// Use a specific distance metric.
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// The metric this evaluator applies.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Embed both texts in one batch call and return their distance.
    ///
    /// # Errors
    ///
    /// Propagates embedding failures, and fails if the vectors come back with
    /// mismatched lengths.
    pub async fn evaluate(&self, a: &str, b: &str) -> Result<f32> {
        let mut vectors = self.provider.embed_batch(&[a, b]).await?;
        if vectors.len() != 2 {
            return Err(RagError::Retrieval(format!(
                "embedding batch returned {} vectors, expected 2",
                vectors.len()
            )));
        }
        let vb = vectors.pop().unwrap_or_default();
        let va = vectors.pop().unwrap_or_default();

        if va.len() != vb.len() {
            return Err(RagError::Retrieval(format!(
                "embedding dimensions differ: {} vs {}",
                va.len(),
                vb.len()
            )));
        }

        let distance = distance_between(&va, &vb, self.metric);
        debug!(metric = ?self.metric, distance, "evaluated pairwise distance");
        Ok(distance)
    }
}

fn distance_between(a: &[f32], b: &[f32], metric: DistanceMetric) -> f32 {
    match metric {
        DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
        DistanceMetric::Euclidean => {
            a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum::<f32>().sqrt()
        }
        DistanceMetric::DotProduct => -a.iter().zip(b.iter()).map(|(x, y)| x * y).sum::<f32>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = [0.6f32, 0.8];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn cosine_handles_zero_magnitude() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn cosine_distance_of_identical_vectors_is_zero() {
        let d = distance_between(&[0.6, 0.8], &[0.6, 0.8], DistanceMetric::Cosine);
        assert!(d.abs() < 1e-6);
    }

    #[test]
    fn cosine_distance_of_orthogonal_vectors_is_one() {
        let d = distance_between(&[1.0, 0.0], &[0.0, 1.0], DistanceMetric::Cosine);
        assert!((d - 1.0).abs() < 1e-6);
    }

    #[test]
    fn euclidean_distance_matches_hand_computation() {
        let d = distance_between(&[0.0, 0.0], &[3.0, 4.0], DistanceMetric::Euclidean);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn dot_product_is_negated_so_smaller_is_closer() {
        let near = distance_between(&[1.0, 0.0], &[1.0, 0.0], DistanceMetric::DotProduct);
        let far = distance_between(&[1.0, 0.0], &[0.0, 1.0], DistanceMetric::DotProduct);
        assert!(near < far);
    }
}
