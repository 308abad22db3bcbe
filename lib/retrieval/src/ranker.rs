//! Corpus ranking against a natural-language query
//!
//! Ranks by cosine similarity of provider embeddings when the embedding
//! provider answers with usable vectors, and falls back to lexical token
//! matching otherwise. The fallback keeps every document (matches first),
//! so a non-empty corpus never produces an empty ranking.

use crate::config::RagConfig;
use crate::context::char_prefix;
use crate::provider::EmbeddingProvider;
use docscope_core::{Document, Error, Result, Vector};
use serde::Serialize;
use std::sync::Arc;

/// Minimum score spread for semantic similarity to count as informative
const MIN_SCORE_SPREAD: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMethod {
    /// Cosine similarity of provider embeddings
    Semantic,
    /// Token containment fallback
    Lexical,
}

/// A document with its similarity to the query
#[derive(Debug, Clone, Serialize)]
pub struct RankedDocument {
    pub document: Document,
    /// In [0, 1]
    pub score: f32,
    /// 1-based position in the ranking
    pub rank: usize,
    pub method: RankingMethod,
}

pub struct DocumentRanker {
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    embed_char_limit: usize,
    matched_score: f32,
    unmatched_score: f32,
}

impl DocumentRanker {
    /// A ranker with no embedding provider; always ranks lexically
    pub fn new(config: &RagConfig) -> Self {
        Self {
            embedder: None,
            embed_char_limit: config.embed_char_limit,
            matched_score: config.matched_score,
            unmatched_score: config.unmatched_score,
        }
    }

    #[must_use]
    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn has_embedder(&self) -> bool {
        self.embedder.is_some()
    }

    /// Rank `corpus` against `query`, keeping at most `limit` documents.
    ///
    /// Scores are non-increasing down the list; equal scores keep corpus order.
    pub fn rank(&self, query: &str, corpus: &[Document], limit: usize) -> Vec<RankedDocument> {
        if corpus.is_empty() || limit == 0 {
            return Vec::new();
        }

        let (scores, method) = match self.semantic_scores(query, corpus) {
            Ok(scores) => (scores, RankingMethod::Semantic),
            Err(e) => {
                if self.embedder.is_some() {
                    tracing::warn!(
                        error = %e,
                        "Semantic ranking unavailable, using lexical fallback"
                    );
                }
                (self.lexical_scores(query, corpus), RankingMethod::Lexical)
            }
        };
        tracing::debug!(?method, candidates = corpus.len(), limit, "Ranked corpus");

        let mut order: Vec<(usize, f32)> = scores.into_iter().enumerate().collect();
        // Stable sort keeps corpus order among ties
        order.sort_by(|a, b| b.1.total_cmp(&a.1));
        order.truncate(limit);

        order
            .into_iter()
            .enumerate()
            .map(|(pos, (idx, score))| RankedDocument {
                document: corpus[idx].clone(),
                score,
                rank: pos + 1,
                method,
            })
            .collect()
    }

    /// Cosine similarity of each document to the query, clamped to [0, 1].
    /// Any unusable provider response is reported as an error.
    fn semantic_scores(&self, query: &str, corpus: &[Document]) -> Result<Vec<f32>> {
        let embedder = self
            .embedder
            .as_ref()
            .ok_or_else(|| {
                Error::CollaboratorUnavailable("no embedding provider configured".to_string())
            })?;

        let mut texts: Vec<&str> = Vec::with_capacity(corpus.len() + 1);
        texts.push(query);
        for doc in corpus {
            texts.push(char_prefix(&doc.content, self.embed_char_limit));
        }

        let vectors = embedder
            .embed(&texts)
            .map_err(|e| Error::CollaboratorUnavailable(format!("{}: {}", embedder.name(), e)))?;
        check_embeddings(&vectors, texts.len())?;

        let (query_vec, doc_vecs) = vectors.split_at(1);
        let cosines: Vec<f32> = doc_vecs
            .iter()
            .map(|v| query_vec[0].cosine_similarity(v))
            .collect();
        // Finite components can still overflow the norm to infinity
        if cosines.iter().any(|c| !c.is_finite()) {
            return Err(Error::CollaboratorUnavailable(
                "embedding magnitudes overflow cosine similarity".to_string(),
            ));
        }
        let scores: Vec<f32> = cosines.into_iter().map(|c| c.clamp(0.0, 1.0)).collect();

        if scores.len() > 1 {
            let (min, max) = scores
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &s| {
                    (lo.min(s), hi.max(s))
                });
            if max - min < MIN_SCORE_SPREAD {
                return Err(Error::CollaboratorUnavailable(
                    "embeddings do not distinguish between documents".to_string(),
                ));
            }
        }

        Ok(scores)
    }

    /// Matched score when any lowercase query token occurs inside the
    /// lowercased content, unmatched score otherwise
    fn lexical_scores(&self, query: &str, corpus: &[Document]) -> Vec<f32> {
        let query_lower = query.to_lowercase();
        let tokens: Vec<&str> = query_lower.split_whitespace().collect();

        corpus
            .iter()
            .map(|doc| {
                let content = doc.content.to_lowercase();
                if tokens.iter().any(|t| content.contains(t)) {
                    self.matched_score
                } else {
                    self.unmatched_score
                }
            })
            .collect()
    }
}

fn check_embeddings(vectors: &[Vector], expected: usize) -> Result<()> {
    if vectors.len() != expected {
        return Err(Error::CollaboratorUnavailable(format!(
            "expected {} embeddings, got {}",
            expected,
            vectors.len()
        )));
    }
    let dim = vectors[0].dim();
    if dim == 0 || vectors.iter().any(|v| v.dim() != dim) {
        return Err(Error::CollaboratorUnavailable(
            "inconsistent embedding dimensions".to_string(),
        ));
    }
    if vectors.iter().any(|v| !v.is_finite()) {
        return Err(Error::CollaboratorUnavailable("non-finite embedding values".to_string()));
    }
    if vectors[0].norm() == 0.0 {
        return Err(Error::CollaboratorUnavailable("query embedding is all zeros".to_string()));
    }
    Ok(())
}
