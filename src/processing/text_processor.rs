//! Text normalization pipeline

use log::{debug, warn};
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Normalizes raw document text into a canonical token stream: lowercase,
/// punctuation stripped, stopwords dropped, tokens reduced to their base form.
pub struct TextProcessor {
    stop_words: HashSet<String>,
    punct_regex: Regex,
    stemmer: Option<Stemmer>,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self::build(Some(Stemmer::create(Algorithm::English)))
    }

    /// Normalizer with the base-form reduction stage disabled. The stage is
    /// skipped rather than failing the pipeline; inflected forms survive.
    pub fn without_reducer() -> Self {
        warn!("base-form reducer unavailable, normalized text keeps inflected forms");
        Self::build(None)
    }

    fn build(stemmer: Option<Stemmer>) -> Self {
        let stop_words: HashSet<String> = stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .collect();

        // ASCII punctuation class, deleted without substitution so that
        // hyphenated and contracted forms collapse ("web-based" -> "webbased")
        let punct_regex = Regex::new(r"[[:punct:]]").expect("Invalid punctuation regex");

        Self {
            stop_words,
            punct_regex,
            stemmer,
        }
    }

    pub fn has_reducer(&self) -> bool {
        self.stemmer.is_some()
    }

    /// Normalize text through the fixed stage order: lowercase, strip
    /// punctuation, drop stopwords, reduce to base form, rejoin with single
    /// spaces. Deterministic; empty input yields empty output.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.punct_regex.replace_all(&lowered, "");

        let mut tokens: Vec<String> = Vec::new();
        for word in stripped.unicode_words() {
            if self.stop_words.contains(word) {
                continue;
            }
            match &self.stemmer {
                Some(stemmer) => tokens.push(stemmer.stem(word).into_owned()),
                None => tokens.push(word.to_string()),
            }
        }

        if self.stemmer.is_none() && !tokens.is_empty() {
            debug!("base-form reduction skipped for {} tokens", tokens.len());
        }

        tokens.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        let processor = TextProcessor::new();

        let normalized = processor.normalize("Hello, World! Rust!!!");

        assert!(!normalized.contains(','));
        assert!(!normalized.contains('!'));
        assert_eq!(normalized, normalized.to_lowercase());
        assert!(normalized.contains("rust"));
    }

    #[test]
    fn test_normalize_drops_stopwords() {
        let processor = TextProcessor::new();

        let normalized = processor.normalize("This is a sentence about the Rust language");

        assert!(!normalized.split(' ').any(|t| t == "is"));
        assert!(!normalized.split(' ').any(|t| t == "the"));
        assert!(normalized.contains("rust"));
        assert!(normalized.contains("languag")); // stemmed form
    }

    #[test]
    fn test_normalize_reduces_to_base_form() {
        let processor = TextProcessor::new();

        let normalized = processor.normalize("developers building applications");

        assert!(normalized.contains("develop"));
        assert!(normalized.contains("build"));
        assert!(normalized.contains("applic"));
        assert!(!normalized.contains("developers"));
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        let processor = TextProcessor::new();

        let normalized = processor.normalize("python   \n\t  django\n\napi");

        assert_eq!(normalized, "python django api");
    }

    #[test]
    fn test_normalize_empty_input() {
        let processor = TextProcessor::new();

        assert_eq!(processor.normalize(""), "");
        assert_eq!(processor.normalize("   \n  "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let processor = TextProcessor::new();

        let once = processor.normalize("Senior Python developers building scalable web APIs");
        let twice = processor.normalize(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_without_reducer_keeps_inflected_forms() {
        let processor = TextProcessor::without_reducer();

        assert!(!processor.has_reducer());

        let normalized = processor.normalize("developers building applications");

        assert!(normalized.contains("developers"));
        assert!(normalized.contains("building"));
        assert!(normalized.contains("applications"));
    }

    #[test]
    fn test_normalize_deterministic() {
        let processor = TextProcessor::new();
        let text = "Machine learning engineer with distributed systems experience.";

        assert_eq!(processor.normalize(text), processor.normalize(text));
    }
}
