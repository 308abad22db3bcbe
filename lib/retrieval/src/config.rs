use crate::context::TRUNCATION_MARKER;
use docscope_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Retrieval and answering parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RagConfig {
    /// Documents ranked into the prompt context
    pub context_limit: usize,
    /// Character budget for one document's context block
    pub context_chars_per_doc: usize,
    /// Character budget for a source excerpt
    pub excerpt_chars: usize,
    /// Token budget passed to the generation provider
    pub max_tokens: usize,
    /// Characters of each document sent to the embedding provider
    pub embed_char_limit: usize,
    /// Lexical fallback score for documents containing a query token
    pub matched_score: f32,
    /// Lexical fallback score for everything else
    pub unmatched_score: f32,
    /// Reported confidence for generated answers
    pub confidence: f32,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            context_limit: 5,
            context_chars_per_doc: 500,
            excerpt_chars: 200,
            max_tokens: 300,
            embed_char_limit: 1000,
            matched_score: 0.85,
            unmatched_score: 0.3,
            confidence: 0.85,
        }
    }
}

impl RagConfig {
    pub fn validate(&self) -> Result<()> {
        let marker = TRUNCATION_MARKER.chars().count();
        if self.context_chars_per_doc <= marker || self.excerpt_chars <= marker {
            return Err(Error::InvalidConfig(format!(
                "character budgets must exceed the {}-character truncation marker",
                marker
            )));
        }
        if self.context_limit == 0 || self.max_tokens == 0 || self.embed_char_limit == 0 {
            return Err(Error::InvalidConfig(
                "context_limit, max_tokens and embed_char_limit must be positive".to_string(),
            ));
        }
        for (name, value) in [
            ("matched_score", self.matched_score),
            ("unmatched_score", self.unmatched_score),
            ("confidence", self.confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.unmatched_score > self.matched_score {
            return Err(Error::InvalidConfig(
                "unmatched_score must not exceed matched_score".to_string(),
            ));
        }
        Ok(())
    }
}
