//! TF-IDF keyword extraction

use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Extracts the most salient terms per document by weighting term frequency
/// against document frequency across the corpus.
pub struct KeywordExtractor {
    stop_words: HashSet<String>,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        let stop_words: HashSet<String> = stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .collect();

        Self { stop_words }
    }

    /// Extract the top `top_n` keywords for every document in the corpus,
    /// one list per document, aligned by position. Terms are ranked by
    /// descending TF-IDF score; only strictly positive scores qualify. Ties
    /// resolve alphabetically. An empty corpus yields an empty result, and a
    /// corpus whose vocabulary collapses yields one empty list per document.
    pub fn extract_keywords(&self, corpus: &[String], top_n: usize) -> Vec<Vec<String>> {
        if corpus.is_empty() {
            return Vec::new();
        }

        let tokenized: Vec<Vec<String>> = corpus.iter().map(|doc| self.tokenize(doc)).collect();

        // Document frequency per term; BTreeMap keeps the vocabulary in
        // lexicographic order, which fixes the tie-break ordering below.
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&String> = tokens.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            warn!("keyword vocabulary collapsed to nothing, returning empty keyword lists");
            return vec![Vec::new(); corpus.len()];
        }

        let n_docs = corpus.len() as f32;
        let idf: BTreeMap<&String, f32> = doc_freq
            .iter()
            .map(|(term, &df)| {
                // Smoothed inverse document frequency; always >= 1 so any
                // term that occurs at all scores strictly positive.
                let weight = ((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0;
                (term, weight)
            })
            .collect();

        tokenized
            .iter()
            .map(|tokens| Self::rank_document(tokens, &idf, top_n))
            .collect()
    }

    fn rank_document(tokens: &[String], idf: &BTreeMap<&String, f32>, top_n: usize) -> Vec<String> {
        let mut term_freq: HashMap<&String, usize> = HashMap::new();
        for token in tokens {
            *term_freq.entry(token).or_insert(0) += 1;
        }

        // Iterate the vocabulary in lexicographic order and sort stably, so
        // equal scores keep dictionary order.
        let mut scored: Vec<(&String, f32)> = idf
            .iter()
            .filter_map(|(term, &weight)| {
                term_freq.get(*term).map(|&tf| (*term, tf as f32 * weight))
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        scored
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .take(top_n)
            .map(|(term, _)| term.clone())
            .collect()
    }

    /// Vocabulary tokenization: lowercase terms of at least two characters
    /// containing an alphanumeric, stopwords excluded at fit time.
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| word.chars().count() >= 2)
            .filter(|word| word.chars().any(|c| c.is_alphanumeric()))
            .filter(|word| !self.stop_words.contains(word))
            .collect()
    }
}

/// Secondary keyword source that proposes candidate phrases from a
/// linguistic parse. The pipeline treats it as optional: implementations
/// without a backing model yield nothing instead of failing.
pub trait PhraseSource: Send + Sync {
    fn extract_phrases(&self, text: &str) -> Vec<String>;

    fn is_available(&self) -> bool {
        true
    }
}

/// Stand-in used when no parse model is installed; always yields nothing.
pub struct DisabledPhraseSource;

impl PhraseSource for DisabledPhraseSource {
    fn extract_phrases(&self, _text: &str) -> Vec<String> {
        debug!("no phrase model installed, skipping noun phrase extraction");
        Vec::new()
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_extract_keywords_ranks_distinctive_terms() {
        let extractor = KeywordExtractor::new();
        let docs = corpus(&["python django api", "python data science"]);

        let keywords = extractor.extract_keywords(&docs, 10);

        assert_eq!(keywords.len(), 2);
        // "python" appears in both documents and is downweighted relative
        // to the terms unique to each document
        assert_eq!(keywords[0].last().map(String::as_str), Some("python"));
        assert_eq!(keywords[1].last().map(String::as_str), Some("python"));
        assert!(keywords[0].contains(&"django".to_string()));
        assert!(keywords[1].contains(&"science".to_string()));
    }

    #[test]
    fn test_extract_keywords_tie_break_is_alphabetical() {
        let extractor = KeywordExtractor::new();
        let docs = corpus(&["python django api", "python data science"]);

        let keywords = extractor.extract_keywords(&docs, 10);

        // "api" and "django" share a score in the first document
        assert_eq!(keywords[0][0], "api");
        assert_eq!(keywords[0][1], "django");
    }

    #[test]
    fn test_extract_keywords_respects_top_n() {
        let extractor = KeywordExtractor::new();
        let docs = corpus(&["rust tokio async await concurrency networking protocols"]);

        let keywords = extractor.extract_keywords(&docs, 3);

        assert_eq!(keywords.len(), 1);
        assert!(keywords[0].len() <= 3);
    }

    #[test]
    fn test_extract_keywords_terms_are_unique() {
        let extractor = KeywordExtractor::new();
        let docs = corpus(&["rust rust rust tokio tokio async"]);

        let keywords = extractor.extract_keywords(&docs, 10);

        let unique: HashSet<&String> = keywords[0].iter().collect();
        assert_eq!(unique.len(), keywords[0].len());
        // repetition drives the rank
        assert_eq!(keywords[0][0], "rust");
    }

    #[test]
    fn test_extract_keywords_empty_corpus() {
        let extractor = KeywordExtractor::new();

        let keywords = extractor.extract_keywords(&[], 10);

        assert!(keywords.is_empty());
    }

    #[test]
    fn test_extract_keywords_blank_documents() {
        let extractor = KeywordExtractor::new();
        let docs = corpus(&["", "   ", "the and of"]);

        let keywords = extractor.extract_keywords(&docs, 10);

        assert_eq!(keywords.len(), 3);
        assert!(keywords.iter().all(|list| list.is_empty()));
    }

    #[test]
    fn test_extract_keywords_excludes_stopwords() {
        let extractor = KeywordExtractor::new();
        let docs = corpus(&["the quick brown fox jumped over the lazy dog"]);

        let keywords = extractor.extract_keywords(&docs, 10);

        assert!(!keywords[0].contains(&"the".to_string()));
        assert!(!keywords[0].contains(&"over".to_string()));
        assert!(keywords[0].contains(&"fox".to_string()));
    }

    #[test]
    fn test_disabled_phrase_source_yields_nothing() {
        let source = DisabledPhraseSource;

        assert!(!source.is_available());
        assert!(source.extract_phrases("machine learning engineer").is_empty());
    }
}
