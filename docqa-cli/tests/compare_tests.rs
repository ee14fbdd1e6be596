//! Comparison flow tests with a deterministic embedding provider.

use std::sync::Arc;

use async_trait::async_trait;
use docqa_cli::compare::{compare_words, CompareOutcome};
use docqa_rag::embedding::EmbeddingProvider;
use docqa_rag::error::{RagError, Result};

struct FixedEmbeddings;

#[async_trait]
impl EmbeddingProvider for FixedEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        match text {
            "apple" => Ok(vec![1.0, 0.0]),
            "iphone" => Ok(vec![0.0, 1.0]),
            "apfel" => Ok(vec![1.0, 0.0]),
            other => Err(RagError::Embedding {
                provider: "Fixed".into(),
                message: format!("no embedding for '{other}'"),
            }),
        }
    }

    fn dimensions(&self) -> usize {
        2
    }
}

#[tokio::test]
async fn identical_words_have_zero_distance() {
    match compare_words(Arc::new(FixedEmbeddings), "apple", "apfel").await {
        CompareOutcome::Compared { vector, distance, .. } => {
            assert_eq!(vector, vec![1.0, 0.0]);
            assert!(distance.abs() < 1e-6);
        }
        other => panic!("expected a comparison, got {other:?}"),
    }
}

#[tokio::test]
async fn orthogonal_words_have_unit_distance() {
    match compare_words(Arc::new(FixedEmbeddings), "apple", "iphone").await {
        CompareOutcome::Compared { distance, .. } => assert!((distance - 1.0).abs() < 1e-6),
        other => panic!("expected a comparison, got {other:?}"),
    }
}

#[tokio::test]
async fn first_embedding_failure_short_circuits() {
    match compare_words(Arc::new(FixedEmbeddings), "banana", "iphone").await {
        CompareOutcome::EmbeddingFailed { word, error } => {
            assert_eq!(word, "banana");
            assert!(error.contains("no embedding"));
        }
        other => panic!("expected an embedding failure, got {other:?}"),
    }
}

#[tokio::test]
async fn evaluation_failure_still_reports_the_vector() {
    // First word embeds fine; the pairwise batch fails on the second.
    match compare_words(Arc::new(FixedEmbeddings), "apple", "banana").await {
        CompareOutcome::EvaluationFailed { word, vector, error } => {
            assert_eq!(word, "apple");
            assert_eq!(vector, vec![1.0, 0.0]);
            assert!(error.contains("no embedding"));
        }
        other => panic!("expected an evaluation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn render_includes_vector_length() {
    let outcome = compare_words(Arc::new(FixedEmbeddings), "apple", "iphone").await;
    let rendered = outcome.render();
    assert!(rendered.contains("Vector for 'apple'"));
    assert!(rendered.contains("Vector length: 2"));
    assert!(rendered.contains("Cosine distance between 'apple' and 'iphone'"));
}
