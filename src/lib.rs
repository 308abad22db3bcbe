//! # docscope
//!
//! Anomaly scoring and retrieval-augmented answering for free-text documents.
//!
//! docscope has two engines that share one document model:
//!
//! - **Anomaly scoring**: documents become ten-feature vectors, a baseline is
//!   fitted on a reference corpus, and new documents are scored for deviation
//!   with an isolation forest.
//! - **Retrieval-augmented answering**: a corpus is ranked against a
//!   question, the best documents are packed into a bounded prompt context,
//!   and a generation provider answers with attributed sources.
//!
//! Embedding and generation services are pluggable collaborators. When they
//! are missing or failing, ranking falls back to lexical matching and answers
//! become marked placeholders; nothing in the pipeline fails the caller.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! docscope detect --reference reference.json --input incoming.json
//! docscope query --corpus corpus.json --question "quarterly performance"
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use docscope::prelude::*;
//!
//! let corpus = vec![
//!     Document::new("doc_1", "report.pdf", "Quarterly performance metrics for the business."),
//!     Document::new("doc_2", "guide.pdf", "API integration best practices for developers."),
//!     Document::new("doc_3", "paper.pdf", "Machine learning applied to document processing."),
//! ];
//!
//! let detector = AnomalyScoringEngine::new(AnomalyConfig::default()).unwrap();
//! detector.train(&corpus);
//! let results = detector.batch_detect(&corpus);
//! assert_eq!(results.len(), 3);
//!
//! let rag = RagQueryEngine::new(RagConfig::default()).unwrap();
//! let answer = rag.answer("quarterly performance", &corpus, 2, true);
//! assert_eq!(answer.sources[0].document_id, "doc_1");
//! ```
//!
//! ## Crate Structure
//!
//! - `docscope-core` - Documents, dense vectors, and the shared error taxonomy
//! - `docscope-anomaly` - Feature extraction, baseline model, isolation forest
//! - `docscope-retrieval` - Ranking, context assembly, grounded answering

pub mod config;

pub use config::Settings;

// Re-export core types
pub use docscope_core::{Document, Error, Metadata, Result, Vector};

// Re-export anomaly scoring
pub use docscope_anomaly::{
    AnomalyConfig, AnomalyResult, AnomalyScore, AnomalyScoringEngine,
    BaselineModel, BatchSummary, DetectionStatus, FeatureExtractor,
    FeatureVector, FitOutcome, FEATURE_NAMES,
};

// Re-export retrieval
pub use docscope_retrieval::{
    AnswerSource, ContextAssembler, DocumentRanker, EmbeddingProvider,
    GenerationProvider, HashingEmbedder, QueryAnswer, RagConfig,
    RagQueryEngine, RankedDocument, RankingMethod, SourceAttribution,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Document, Error, Result, Settings,
        AnomalyConfig, AnomalyResult, AnomalyScoringEngine, BatchSummary,
        DetectionStatus, FeatureExtractor,
        EmbeddingProvider, GenerationProvider, HashingEmbedder,
        QueryAnswer, RagConfig, RagQueryEngine, RankingMethod,
    };
}
