//! Semantic similarity via Model2Vec static embeddings

use crate::config::Config;
use crate::error::{Result, ResumeFitError};
use log::{error, info};
use model2vec_rs::model::StaticModel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Compares two raw texts by encoding them with a shared pretrained static
/// model and taking cosine similarity. Loaded once at startup and read-only
/// afterwards; a missing model degrades every comparison to 0.0 instead of
/// failing the pipeline.
pub struct EmbeddingEngine {
    backend: Backend,
    model_name: String,
}

enum Backend {
    Loaded(Box<StaticModel>),
    Unavailable,
}

/// A semantic similarity result in [0, 1]. `degraded` marks scores that were
/// pinned to 0.0 because the backend was missing or encoding failed, so
/// callers can surface the degradation instead of trusting a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemanticScore {
    pub score: f32,
    pub degraded: bool,
}

impl SemanticScore {
    fn ok(score: f32) -> Self {
        Self {
            score,
            degraded: false,
        }
    }

    fn degraded() -> Self {
        Self {
            score: 0.0,
            degraded: true,
        }
    }
}

impl EmbeddingEngine {
    /// Load the embedding model from a local folder or hub identifier.
    /// Never fails: a load error is logged and the engine degrades to a
    /// constant 0.0 similarity.
    pub fn load(model_path: &Path, model_name: &str) -> Self {
        let start_time = Instant::now();

        match StaticModel::from_pretrained(model_path, None, None, None) {
            Ok(model) => {
                info!(
                    "Loaded embedding model '{}' in {:.2?}",
                    model_name,
                    start_time.elapsed()
                );
                Self {
                    backend: Backend::Loaded(Box::new(model)),
                    model_name: model_name.to_string(),
                }
            }
            Err(e) => {
                error!(
                    "Failed to load embedding model '{}': {}. Semantic scores will be 0.0",
                    model_name, e
                );
                Self {
                    backend: Backend::Unavailable,
                    model_name: model_name.to_string(),
                }
            }
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::load(
            &config.embedding_model_path(),
            &config.models.embedding_model,
        )
    }

    /// Engine with no backend; every comparison of non-blank texts is a
    /// degraded 0.0.
    pub fn unavailable() -> Self {
        Self {
            backend: Backend::Unavailable,
            model_name: "unavailable".to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.backend, Backend::Loaded(_))
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Semantic similarity between two raw texts, in [0, 1].
    ///
    /// Two blank inputs count as perfectly similar; a single blank input
    /// matches nothing. Both conventions hold regardless of backend state.
    /// Encoding runs on the raw text; the model is sensitive to natural
    /// phrasing, so normalization is deliberately not applied first.
    pub fn similarity(&self, text1: &str, text2: &str) -> SemanticScore {
        let blank1 = text1.trim().is_empty();
        let blank2 = text2.trim().is_empty();

        if blank1 && blank2 {
            return SemanticScore::ok(1.0);
        }
        if blank1 || blank2 {
            return SemanticScore::ok(0.0);
        }

        let model = match &self.backend {
            Backend::Loaded(model) => model,
            Backend::Unavailable => return SemanticScore::degraded(),
        };

        let embeddings = model.encode(&[text1.to_string(), text2.to_string()]);
        if embeddings.len() != 2 {
            error!(
                "Embedding backend returned {} vectors for 2 texts",
                embeddings.len()
            );
            return SemanticScore::degraded();
        }

        match Self::cosine_similarity(&embeddings[0], &embeddings[1]) {
            Ok(raw) => SemanticScore::ok(raw.clamp(0.0, 1.0)),
            Err(e) => {
                error!("Semantic similarity computation failed: {}", e);
                SemanticScore::degraded()
            }
        }
    }

    /// Cosine similarity between two embedding vectors
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
        if a.len() != b.len() {
            return Err(ResumeFitError::Embedding(format!(
                "Embedding dimensions don't match: {} vs {}",
                a.len(),
                b.len()
            )));
        }

        if a.is_empty() {
            return Err(ResumeFitError::Embedding(
                "Cannot compare empty embeddings".to_string(),
            ));
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            Ok(0.0)
        } else {
            Ok(dot_product / (norm_a * norm_b))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical_vectors() {
        let v = vec![0.5, 0.3, 0.8];

        let score = EmbeddingEngine::cosine_similarity(&v, &v).unwrap();

        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];

        let score = EmbeddingEngine::cosine_similarity(&a, &b).unwrap();

        assert!(score.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];

        let score = EmbeddingEngine::cosine_similarity(&a, &b).unwrap();

        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_cosine_similarity_dimension_mismatch() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];

        assert!(EmbeddingEngine::cosine_similarity(&a, &b).is_err());
    }

    #[test]
    fn test_similarity_both_blank() {
        let engine = EmbeddingEngine::unavailable();

        let result = engine.similarity("", "");
        assert_eq!(result.score, 1.0);
        assert!(!result.degraded);

        let result = engine.similarity("   ", "\n\t");
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_similarity_one_blank() {
        let engine = EmbeddingEngine::unavailable();

        assert_eq!(engine.similarity("x", "").score, 0.0);
        assert_eq!(engine.similarity("", "x").score, 0.0);
        assert_eq!(engine.similarity("resume text", "   ").score, 0.0);
    }

    #[test]
    fn test_similarity_degrades_without_backend() {
        let engine = EmbeddingEngine::unavailable();

        let result = engine.similarity("python developer", "rust developer");

        assert_eq!(result.score, 0.0);
        assert!(result.degraded);
        assert!(!engine.is_available());
    }
}
