//! External collaborator contracts
//!
//! Both providers fail open: any error is treated by the caller as the
//! provider being unavailable, and a defined fallback takes over.

use docscope_core::{Result, Vector};

/// Turns text into fixed-dimension vectors
pub trait EmbeddingProvider: Send + Sync {
    /// Embed every text, returning one vector per input in the same order
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vector>>;

    fn name(&self) -> &str;
}

/// Turns a prompt into an answer
pub trait GenerationProvider: Send + Sync {
    fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String>;

    fn name(&self) -> &str;
}
