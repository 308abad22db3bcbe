//! # docscope Anomaly
//!
//! Unsupervised anomaly scoring for free-text documents.
//!
//! Each document is reduced to ten cheap text statistics, standardized
//! against a reference corpus, and scored by an isolation forest: documents
//! that separate from the baseline in few random splits score as anomalous.
//!
//! ## Example
//!
//! ```rust
//! use docscope_anomaly::{AnomalyConfig, AnomalyScoringEngine};
//! use docscope_core::Document;
//!
//! let engine = AnomalyScoringEngine::new(AnomalyConfig::default()).unwrap();
//! engine.train(&[
//!     Document::new("r1", "r1.txt", "Quarterly performance report for the sales team."),
//!     Document::new("r2", "r2.txt", "Technical guide covering API integration practices."),
//!     Document::new("r3", "r3.txt", "Research notes on document processing pipelines."),
//! ]);
//!
//! let result = engine.detect(&Document::new("d1", "memo.txt", "URGENT!!! ACT NOW!!!"));
//! assert!((0.0..=1.0).contains(&result.anomaly_score));
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Document   │────>│  Features   │────>│   Scaler    │
//! │   (text)    │     │ (10 values) │     │ (mean/std)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌──────┴──────┐
//!                                         │  Isolation  │
//!                                         │   Forest    │
//!                                         └─────────────┘
//! ```

pub mod baseline;
pub mod config;
pub mod engine;
pub mod features;
pub mod forest;
pub mod scaler;

pub use baseline::{AnomalyScore, BaselineModel, FitOutcome, MIN_FIT_SAMPLES};
pub use config::AnomalyConfig;
pub use engine::{AnomalyResult, AnomalyScoringEngine, BatchSummary, DetectionStatus};
pub use features::{FeatureExtractor, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use forest::IsolationForest;
pub use scaler::StandardScaler;
