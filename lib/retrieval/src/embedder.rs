//! Local hashing embedder
//!
//! Hashes character trigrams and whole words into a fixed number of
//! buckets. Needs no external service, so it always answers; hash seeds are
//! fixed, which keeps vectors stable between calls in the same build.

use crate::provider::EmbeddingProvider;
use docscope_core::{Error, Result, Vector};
use ahash::RandomState;
use std::collections::HashSet;

pub const DEFAULT_EMBEDDING_DIM: usize = 256;

/// Words count more than individual trigrams
const WORD_WEIGHT: f32 = 2.0;

const HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

fn seeded_hasher() -> RandomState {
    RandomState::with_seeds(HASH_SEEDS[0], HASH_SEEDS[1], HASH_SEEDS[2], HASH_SEEDS[3])
}

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
    hasher: RandomState,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidConfig("embedding dimension must be positive".to_string()));
        }
        Ok(Self {
            dim,
            hasher: seeded_hasher(),
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn embed_text(&self, text: &str) -> Vector {
        let mut components = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in trigrams(&normalized) {
            components[self.bucket(&trigram)] += 1.0;
        }
        for word in normalized.split_whitespace() {
            components[self.bucket(word)] += WORD_WEIGHT;
        }

        let mut vector = Vector::new(components);
        vector.normalize();
        vector
    }

    #[inline]
    fn bucket(&self, token: &str) -> usize {
        (self.hasher.hash_one(token) % self.dim as u64) as usize
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dim: DEFAULT_EMBEDDING_DIM,
            hasher: seeded_hasher(),
        }
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

/// Character trigrams over the space-padded string
fn trigrams(s: &str) -> HashSet<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    chars.windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}
