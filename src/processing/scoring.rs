//! Score fusion: lexical overlap and semantic similarity combined into one
//! 0-100 compatibility score

use crate::error::{Result, ResumeFitError};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Relative weights for the two score components. Constructing through
/// [`ScoreWeights::new`] is the only way to get values the fuser will accept,
/// so misconfiguration surfaces where the weights enter the system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub keyword: f32,
    pub semantic: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            keyword: 0.4,
            semantic: 0.6,
        }
    }
}

impl ScoreWeights {
    /// Validated weights: each must lie in [0, 1] and they must not both be
    /// zero.
    pub fn new(keyword: f32, semantic: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&keyword) || !(0.0..=1.0).contains(&semantic) {
            return Err(ResumeFitError::Configuration(format!(
                "Score weights must lie in [0, 1], got keyword={} semantic={}",
                keyword, semantic
            )));
        }

        if keyword + semantic == 0.0 {
            return Err(ResumeFitError::Configuration(
                "Score weights must not both be zero".to_string(),
            ));
        }

        Ok(Self { keyword, semantic })
    }

    /// Effective weights after scaling to a unit sum. Weights that don't sum
    /// to 1.0 are accepted with a warning rather than rejected.
    fn normalized(&self) -> (f32, f32) {
        let total = self.keyword + self.semantic;
        if (total - 1.0).abs() > 1e-6 {
            warn!(
                "Score weights sum to {} instead of 1.0, normalizing before combining",
                total
            );
        }
        (self.keyword / total, self.semantic / total)
    }
}

/// Jaccard similarity over the two keyword lists treated as sets of strings
/// (case-sensitive as stored). Either list empty yields 0.0.
pub fn keyword_match_score(resume_keywords: &[String], jd_keywords: &[String]) -> f32 {
    if resume_keywords.is_empty() || jd_keywords.is_empty() {
        return 0.0;
    }

    let resume_set: HashSet<&str> = resume_keywords.iter().map(String::as_str).collect();
    let jd_set: HashSet<&str> = jd_keywords.iter().map(String::as_str).collect();

    let intersection = resume_set.intersection(&jd_set).count();
    let union = resume_set.union(&jd_set).count();

    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}

/// Fuse the keyword overlap and semantic similarity into a single score in
/// [0, 100]. The semantic input is clamped into [0, 1] before combining;
/// out-of-range values are corrected, not rejected.
pub fn overall_score(
    resume_keywords: &[String],
    jd_keywords: &[String],
    semantic_similarity: f32,
    weights: &ScoreWeights,
) -> f32 {
    let (keyword_weight, semantic_weight) = weights.normalized();

    let keyword_score = keyword_match_score(resume_keywords, jd_keywords);
    let clamped_semantic = semantic_similarity.clamp(0.0, 1.0);

    (keyword_score * keyword_weight + clamped_semantic * semantic_weight) * 100.0
}
