//! Text feature extraction
//!
//! Derives a fixed ten-element numeric profile from document text. Every
//! feature is a crude, fast, language-agnostic proxy chosen for speed over
//! precision: the `.` count stands in for sentences, `http` for links and
//! `@` for email addresses. None of them are content-type aware.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const FEATURE_COUNT: usize = 10;

/// Labels for each feature position, used for explainability
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "document_length",
    "word_count",
    "unique_words",
    "sentences",
    "line_breaks",
    "long_words",
    "urls",
    "emails",
    "uppercase_words",
    "punctuation",
];

/// Tokens longer than this many characters count as long words
const LONG_WORD_CHARS: usize = 10;

/// Fixed-length feature vector derived from document content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[inline]
    pub fn get(&self, idx: usize) -> f64 {
        self.0[idx]
    }

    #[inline]
    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Pair each value with its feature name
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

/// Stateless extractor; pure and total over any text
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> FeatureVector {
        let words: Vec<&str> = text.split_whitespace().collect();
        let unique: HashSet<&str> = words.iter().copied().collect();

        let long_words = words
            .iter()
            .filter(|w| w.chars().count() > LONG_WORD_CHARS)
            .count();
        let uppercase_words = words.iter().filter(|w| is_shouting(w)).count();

        FeatureVector([
            text.chars().count() as f64,
            words.len() as f64,
            unique.len() as f64,
            count_char(text, '.') as f64,
            count_char(text, '\n') as f64,
            long_words as f64,
            text.matches("http").count() as f64,
            count_char(text, '@') as f64,
            uppercase_words as f64,
            (count_char(text, '!') + count_char(text, '?')) as f64,
        ])
    }
}

#[inline]
fn count_char(text: &str, needle: char) -> usize {
    text.chars().filter(|&c| c == needle).count()
}

/// A token is shouting when it has at least one cased letter and no lowercase ones
fn is_shouting(token: &str) -> bool {
    let mut has_upper = false;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}
