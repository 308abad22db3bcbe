//! Prompt context assembly
//!
//! Turns ranked documents into labelled, size-bounded context blocks and a
//! parallel list of source attributions in ranked order.

use crate::ranker::RankedDocument;
use docscope_core::Metadata;
use serde::Serialize;
use std::borrow::Cow;

/// Appended to any text cut short by a character budget
pub const TRUNCATION_MARKER: &str = "...";

/// Separates context blocks
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Longest prefix of `text` holding at most `max_chars` characters
#[inline]
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

/// Bound `text` to `max_chars` characters, marker included.
///
/// Cuts on a character boundary. When the budget cannot even fit the
/// marker, the result is the marker's own prefix.
pub fn truncate_chars<'a>(text: &'a str, max_chars: usize, marker: &str) -> Cow<'a, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }
    let marker_chars = marker.chars().count();
    if max_chars <= marker_chars {
        return Cow::Owned(char_prefix(marker, max_chars).to_string());
    }
    let kept = char_prefix(text, max_chars - marker_chars);
    Cow::Owned(format!("{}{}", kept, marker))
}

/// Where part of an answer's context came from
#[derive(Debug, Clone, Serialize)]
pub struct SourceAttribution {
    pub document_id: String,
    pub filename: String,
    pub similarity_score: f32,
    pub excerpt: String,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AssembledContext {
    /// Blocks joined with the block separator
    pub text: String,
    /// Each bounded block, in ranked order
    pub blocks: Vec<String>,
    pub sources: Vec<SourceAttribution>,
}

#[derive(Debug, Clone)]
pub struct ContextAssembler {
    excerpt_chars: usize,
}

impl ContextAssembler {
    pub fn new(excerpt_chars: usize) -> Self {
        Self { excerpt_chars }
    }

    pub fn excerpt_chars(&self) -> usize {
        self.excerpt_chars
    }

    /// Build the context text and sources; each block is bounded to
    /// `char_budget_per_doc` characters
    pub fn assemble(
        &self,
        ranked: &[RankedDocument],
        char_budget_per_doc: usize,
    ) -> AssembledContext {
        let blocks: Vec<String> = ranked
            .iter()
            .map(|r| {
                let block = format!(
                    "Document: {}\nContent: {}",
                    r.document.filename, r.document.content
                );
                truncate_chars(&block, char_budget_per_doc, TRUNCATION_MARKER).into_owned()
            })
            .filter(|b| !b.is_empty())
            .collect();

        let sources = ranked
            .iter()
            .map(|r| SourceAttribution {
                document_id: r.document.id.clone(),
                filename: r.document.filename.clone(),
                similarity_score: r.score,
                excerpt: truncate_chars(&r.document.content, self.excerpt_chars, TRUNCATION_MARKER)
                    .into_owned(),
                metadata: r.document.metadata.clone(),
            })
            .collect();

        AssembledContext {
            text: blocks.join(BLOCK_SEPARATOR),
            blocks,
            sources,
        }
    }
}
