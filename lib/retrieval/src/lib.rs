//! # docscope Retrieval
//!
//! Retrieval-augmented answering over an in-memory corpus.
//!
//! ## Features
//!
//! - **Document ranking**: cosine similarity over provider embeddings, with a
//!   lexical fallback that never returns an empty ranking for a non-empty corpus
//! - **Context assembly**: per-document character budgets cut on character
//!   boundaries, with source attributions in ranked order
//! - **Grounded answering**: fixed prompt template, pluggable generation
//!   provider, and a marked placeholder when generation is unavailable
//!
//! ## Example
//!
//! ```rust
//! use docscope_retrieval::{HashingEmbedder, RagConfig, RagQueryEngine};
//! use docscope_core::Document;
//! use std::sync::Arc;
//!
//! let corpus = vec![
//!     Document::new("doc_1", "report.pdf", "Quarterly performance metrics for the business."),
//!     Document::new("doc_2", "guide.pdf", "API integration best practices for developers."),
//! ];
//!
//! let engine = RagQueryEngine::new(RagConfig::default())
//!     .unwrap()
//!     .with_embedder(Arc::new(HashingEmbedder::default()));
//!
//! let answer = engine.answer("quarterly performance", &corpus, 1, true);
//! assert_eq!(answer.sources[0].document_id, "doc_1");
//! assert!(answer.is_placeholder());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Embedding  │────>│   Ranker    │────>│  Context    │
//! │  Provider   │     │ (or lexical)│     │  Assembler  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                      ┌─────────────┐    ┌──────┴──────┐
//!                      │ QueryAnswer │<───│ Generation  │
//!                      │  (sources)  │    │  Provider   │
//!                      └─────────────┘    └─────────────┘
//! ```

pub mod config;
pub mod context;
pub mod embedder;
pub mod provider;
pub mod rag;
pub mod ranker;

pub use config::RagConfig;
pub use context::{AssembledContext, ContextAssembler, SourceAttribution, TRUNCATION_MARKER};
pub use embedder::{HashingEmbedder, DEFAULT_EMBEDDING_DIM};
pub use provider::{EmbeddingProvider, GenerationProvider};
pub use rag::{build_prompt, placeholder_answer, AnswerSource, QueryAnswer, RagQueryEngine};
pub use ranker::{DocumentRanker, RankedDocument, RankingMethod};
