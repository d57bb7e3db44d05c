//! Match pipeline engine combining normalization, keyword extraction,
//! semantic comparison, score fusion, and feedback synthesis

use crate::config::Config;
use crate::error::Result;
use crate::processing::document::Document;
use crate::processing::embeddings::EmbeddingEngine;
use crate::processing::feedback::{generate_feedback, FeedbackReport};
use crate::processing::keywords::{DisabledPhraseSource, KeywordExtractor, PhraseSource};
use crate::processing::scoring::{keyword_match_score, overall_score, ScoreWeights};
use crate::processing::text_processor::TextProcessor;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Coordinates the full analysis pipeline. Every analysis call is
/// independent and holds no locks; the only shared long-lived resource is
/// the embedding model, which is read-only after construction.
pub struct MatchEngine {
    text_processor: TextProcessor,
    keyword_extractor: KeywordExtractor,
    embedding_engine: EmbeddingEngine,
    phrase_source: Box<dyn PhraseSource>,
    weights: ScoreWeights,
    top_n_keywords: usize,
    top_n_missing: usize,
}

/// The complete result of one analysis. Recomputed fresh each request,
/// never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Fused compatibility score in [0, 100]
    pub overall_score: f32,

    /// Semantic closeness of the raw texts in [0, 1]
    pub semantic_similarity_score: f32,

    /// Jaccard overlap of the two keyword sets in [0, 1]
    pub keyword_match_score: f32,

    /// Keywords per document, descending relevance
    pub resume_keywords: Vec<String>,
    pub jd_keywords: Vec<String>,

    /// Categorized guidance; absent categories had nothing to say
    pub feedback: FeedbackReport,

    /// Components that fell back to a default value this request
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub degraded_components: Vec<String>,

    pub embedding_model: String,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

impl MatchEngine {
    /// Build the engine from configuration, loading the embedding model.
    /// Fails only on invalid scoring weights; a missing embedding model
    /// degrades instead.
    pub fn new(config: &Config) -> Result<Self> {
        let embedding_engine = EmbeddingEngine::from_config(config);
        Self::with_embedding_engine(config, embedding_engine)
    }

    /// Build the engine around an existing embedding engine. Lets callers
    /// (and tests) control backend availability.
    pub fn with_embedding_engine(
        config: &Config,
        embedding_engine: EmbeddingEngine,
    ) -> Result<Self> {
        let weights = ScoreWeights::new(
            config.scoring.keyword_weight,
            config.scoring.semantic_weight,
        )?;

        if !embedding_engine.is_available() {
            warn!("Embedding backend unavailable, semantic scores degrade to 0.0");
        }

        Ok(Self {
            text_processor: TextProcessor::new(),
            keyword_extractor: KeywordExtractor::new(),
            embedding_engine,
            phrase_source: Box::new(DisabledPhraseSource),
            weights,
            top_n_keywords: config.keywords.top_n,
            top_n_missing: config.keywords.top_n_missing,
        })
    }

    /// Replace the secondary keyword source used for candidate enrichment.
    pub fn with_phrase_source(mut self, source: Box<dyn PhraseSource>) -> Self {
        self.phrase_source = source;
        self
    }

    /// Run the full pipeline over one resume / job-description pair.
    ///
    /// Always completes: internal failures degrade to default values and
    /// are listed in `degraded_components` rather than raised.
    pub fn analyze(&self, resume: &Document, jd: &Document) -> MatchReport {
        let start_time = Instant::now();

        let normalized_resume = self.text_processor.normalize(&resume.content);
        let normalized_jd = self.text_processor.normalize(&jd.content);
        debug!(
            "Normalized {} to {} chars, {} to {} chars",
            resume.role,
            normalized_resume.len(),
            jd.role,
            normalized_jd.len()
        );

        let resume_keywords = self.document_keywords(&normalized_resume, &resume.content);
        let jd_keywords = self.document_keywords(&normalized_jd, &jd.content);

        // Raw text on purpose: the embedding model expects natural phrasing
        let semantic = self
            .embedding_engine
            .similarity(&resume.content, &jd.content);

        let keyword_score = keyword_match_score(&resume_keywords, &jd_keywords);
        let overall = overall_score(
            &resume_keywords,
            &jd_keywords,
            semantic.score,
            &self.weights,
        );

        let feedback = generate_feedback(
            &resume_keywords,
            &jd_keywords,
            semantic.score,
            overall,
            self.top_n_missing,
        );

        let mut degraded_components = Vec::new();
        if semantic.degraded {
            degraded_components.push("semantic_comparator".to_string());
        }
        if !self.text_processor.has_reducer() {
            degraded_components.push("base_form_reducer".to_string());
        }

        info!(
            "Analysis complete: overall {:.1}, keyword {:.2}, semantic {:.2}",
            overall, keyword_score, semantic.score
        );

        MatchReport {
            overall_score: overall,
            semantic_similarity_score: semantic.score,
            keyword_match_score: keyword_score,
            resume_keywords,
            jd_keywords,
            feedback,
            degraded_components,
            embedding_model: self.embedding_engine.model_name().to_string(),
            generated_at: Utc::now(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        }
    }

    /// Keywords for a single document: TF-IDF over the document as its own
    /// corpus, topped up with phrase candidates when a phrase model is
    /// installed. Result stays unique and capped at the configured top-N.
    fn document_keywords(&self, normalized: &str, raw: &str) -> Vec<String> {
        let corpus = [normalized.to_string()];
        let mut keywords = self
            .keyword_extractor
            .extract_keywords(&corpus, self.top_n_keywords)
            .into_iter()
            .next()
            .unwrap_or_default();

        for phrase in self.phrase_source.extract_phrases(raw) {
            if keywords.len() >= self.top_n_keywords {
                break;
            }
            let candidate = phrase.to_lowercase();
            if !keywords.contains(&candidate) {
                keywords.push(candidate);
            }
        }

        keywords
    }
}
