//! Rule-based feedback synthesis

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Fixed feedback categories. Categories with nothing to say are omitted
/// from the report entirely; a missing key means "no content", not an error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    OverallSummary,
    Strengths,
    AreasForImprovement,
    MissingKeywordsSuggestions,
}

impl std::fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackCategory::OverallSummary => write!(f, "Overall Summary"),
            FeedbackCategory::Strengths => write!(f, "Strengths"),
            FeedbackCategory::AreasForImprovement => write!(f, "Areas For Improvement"),
            FeedbackCategory::MissingKeywordsSuggestions => {
                write!(f, "Missing Keywords Suggestions")
            }
        }
    }
}

pub type FeedbackReport = BTreeMap<FeedbackCategory, Vec<String>>;

/// Turn the scores and keyword sets into categorized guidance.
///
/// The summary follows three score bands (>= 75, >= 50, < 50), each with a
/// semantic-similarity refinement. Keyword comparisons are case-insensitive.
/// Missing keywords are listed in job-description relevance order, shared
/// keywords in resume relevance order.
pub fn generate_feedback(
    resume_keywords: &[String],
    jd_keywords: &[String],
    semantic_similarity: f32,
    overall_score: f32,
    top_n_missing: usize,
) -> FeedbackReport {
    let resume_set: HashSet<String> = resume_keywords.iter().map(|k| k.to_lowercase()).collect();
    let jd_set: HashSet<String> = jd_keywords.iter().map(|k| k.to_lowercase()).collect();

    let missing_keywords = ordered_difference(jd_keywords, &resume_set);

    let mut summary = Vec::new();
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();
    let mut missing_suggestions = Vec::new();

    if !missing_keywords.is_empty() {
        missing_suggestions.push(format!(
            "Consider incorporating relevant keywords from the job description that are \
             currently less prominent in your resume. For example: {}.",
            join_first(&missing_keywords, top_n_missing)
        ));

        if missing_keywords.len() > top_n_missing {
            missing_suggestions.push(format!(
                "There are {} more keywords from the job description worth reviewing.",
                missing_keywords.len() - top_n_missing
            ));
        }
    }

    if overall_score >= 75.0 {
        summary.push(format!(
            "Excellent match! Your resume aligns very well with the job description \
             (Overall Score: {:.0}/100).",
            overall_score
        ));

        if semantic_similarity >= 0.75 {
            strengths.push(
                "Your resume shows strong semantic alignment with the core responsibilities \
                 and skills outlined in the job description."
                    .to_string(),
            );
        } else if semantic_similarity >= 0.60 {
            strengths.push("Good semantic alignment with the job description.".to_string());
        }
    } else if overall_score >= 50.0 {
        summary.push(format!(
            "Good potential! Your resume shows a reasonable alignment with the job \
             description (Overall Score: {:.0}/100).",
            overall_score
        ));

        if semantic_similarity >= 0.60 {
            strengths.push(
                "Your resume's content is generally well-aligned with the job description's \
                 key aspects."
                    .to_string(),
            );
        } else {
            improvements.push(
                "While there's some overlap, consider tailoring your language to better \
                 reflect the specific terminology and focus areas of the job description \
                 to improve semantic relevance."
                    .to_string(),
            );
        }
    } else {
        summary.push(format!(
            "Needs improvement. Your resume could be better aligned with this specific \
             job description (Overall Score: {:.0}/100).",
            overall_score
        ));

        if semantic_similarity < 0.50 {
            improvements.push(
                "Focus on rephrasing your experience and skills to more closely match the \
                 language and requirements of the job description. The semantic similarity \
                 is currently low."
                    .to_string(),
            );
        } else {
            improvements.push(
                "Review the job description carefully and ensure your resume clearly \
                 highlights the most relevant skills and experiences."
                    .to_string(),
            );
        }
    }

    let common_keywords = ordered_intersection(resume_keywords, &jd_set);
    if !common_keywords.is_empty() {
        strengths.push(format!(
            "Your resume effectively highlights skills like: {}, which are also mentioned \
             in the job description.",
            join_first(&common_keywords, top_n_missing)
        ));
    }

    if missing_keywords.is_empty() && overall_score >= 70.0 {
        strengths.push(
            "Great keyword coverage! Your resume appears to include many of the key terms \
             from the job description."
                .to_string(),
        );
    }

    if strengths.is_empty() && overall_score >= 60.0 {
        strengths.push(
            "Your resume shows a good overall match. Ensure specific examples of your \
             achievements are clearly presented."
                .to_string(),
        );
    }

    if missing_suggestions.is_empty() && overall_score < 70.0 {
        improvements.push(
            "Review the job description for any specific skills or qualifications you \
             possess but haven't explicitly mentioned or emphasized in your resume."
                .to_string(),
        );
    }

    let mut report = FeedbackReport::new();
    insert_if_non_empty(&mut report, FeedbackCategory::OverallSummary, summary);
    insert_if_non_empty(&mut report, FeedbackCategory::Strengths, strengths);
    insert_if_non_empty(
        &mut report,
        FeedbackCategory::AreasForImprovement,
        improvements,
    );
    insert_if_non_empty(
        &mut report,
        FeedbackCategory::MissingKeywordsSuggestions,
        missing_suggestions,
    );
    report
}

/// Lowercased terms of `ordered` absent from `exclude`, in original order,
/// deduplicated.
fn ordered_difference(ordered: &[String], exclude: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ordered
        .iter()
        .map(|k| k.to_lowercase())
        .filter(|k| !exclude.contains(k) && seen.insert(k.clone()))
        .collect()
}

/// Lowercased terms of `ordered` present in `include`, in original order,
/// deduplicated.
fn ordered_intersection(ordered: &[String], include: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ordered
        .iter()
        .map(|k| k.to_lowercase())
        .filter(|k| include.contains(k) && seen.insert(k.clone()))
        .collect()
}

fn join_first(terms: &[String], n: usize) -> String {
    terms
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn insert_if_non_empty(
    report: &mut FeedbackReport,
    category: FeedbackCategory,
    messages: Vec<String>,
) {
    if !messages.is_empty() {
        report.insert(category, messages);
    }
}
