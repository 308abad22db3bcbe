//! Document-level anomaly scoring
//!
//! Wraps feature extraction and the baseline model into a train/detect
//! lifecycle that never fails the caller: untrained models and malformed
//! documents surface as marked results instead of errors.

use crate::baseline::{BaselineModel, FitOutcome};
use crate::config::AnomalyConfig;
use crate::features::{FeatureExtractor, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use docscope_core::{Document, Error, Result};
use rayon::prelude::*;
use serde::Serialize;

/// How a result was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetectionStatus {
    Scored,
    /// The baseline has not been fitted yet
    Untrained,
    /// This document could not be scored
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct AnomalyResult {
    pub document_id: String,
    pub filename: String,
    pub is_anomaly: bool,
    /// In [0, 1]; higher is more anomalous
    pub anomaly_score: f64,
    pub raw_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureVector>,
    pub feature_names: [&'static str; FEATURE_COUNT],
    pub status: DetectionStatus,
}

impl AnomalyResult {
    fn unscored(doc: &Document, features: Option<FeatureVector>, status: DetectionStatus) -> Self {
        Self {
            document_id: doc.id.clone(),
            filename: doc.filename.clone(),
            is_anomaly: false,
            anomaly_score: 0.0,
            raw_score: 0.0,
            features,
            feature_names: FEATURE_NAMES,
            status,
        }
    }

    pub fn is_scored(&self) -> bool {
        self.status == DetectionStatus::Scored
    }
}

/// Counts over a batch of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub scored: usize,
    pub anomalies: usize,
    pub untrained: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[AnomalyResult]) -> Self {
        let mut summary = Self {
            processed: results.len(),
            ..Default::default()
        };
        for r in results {
            match r.status {
                DetectionStatus::Scored => summary.scored += 1,
                DetectionStatus::Untrained => summary.untrained += 1,
                DetectionStatus::Failed { .. } => summary.failed += 1,
            }
            if r.is_anomaly {
                summary.anomalies += 1;
            }
        }
        summary
    }
}

pub struct AnomalyScoringEngine {
    extractor: FeatureExtractor,
    model: BaselineModel,
}

impl AnomalyScoringEngine {
    pub fn new(config: AnomalyConfig) -> Result<Self> {
        Ok(Self {
            extractor: FeatureExtractor::new(),
            model: BaselineModel::new(config)?,
        })
    }

    pub fn model(&self) -> &BaselineModel {
        &self.model
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_fitted()
    }

    /// Retrain from scratch on the given reference documents.
    /// Documents that fail validation are left out of the fit.
    pub fn train(&self, reference: &[Document]) -> FitOutcome {
        let vectors: Vec<FeatureVector> = reference
            .iter()
            .filter_map(|doc| match self.features_for(doc) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!(
                        document_id = %doc.id,
                        error = %e,
                        "Skipping reference document"
                    );
                    None
                }
            })
            .collect();

        self.model.fit(&vectors)
    }

    pub fn detect(&self, doc: &Document) -> AnomalyResult {
        let features = match self.features_for(doc) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(document_id = %doc.id, error = %e, "Anomaly detection failed");
                let status = DetectionStatus::Failed { reason: e.to_string() };
                return AnomalyResult::unscored(doc, None, status);
            }
        };

        match self.model.score(&features) {
            Ok(score) => AnomalyResult {
                document_id: doc.id.clone(),
                filename: doc.filename.clone(),
                is_anomaly: score.is_anomaly,
                anomaly_score: score.normalized_score,
                raw_score: score.raw_score,
                features: Some(features),
                feature_names: FEATURE_NAMES,
                status: DetectionStatus::Scored,
            },
            Err(Error::NotFitted) => {
                tracing::warn!(document_id = %doc.id, "Anomaly detector not trained");
                AnomalyResult::unscored(doc, Some(features), DetectionStatus::Untrained)
            }
            Err(e) => {
                let status = DetectionStatus::Failed { reason: e.to_string() };
                AnomalyResult::unscored(doc, Some(features), status)
            }
        }
    }

    /// Score every document independently; output order matches input order
    pub fn batch_detect(&self, docs: &[Document]) -> Vec<AnomalyResult> {
        let results: Vec<AnomalyResult> = docs.par_iter().map(|doc| self.detect(doc)).collect();

        for r in results.iter().filter(|r| r.is_anomaly) {
            tracing::warn!(
                document_id = %r.document_id,
                filename = %r.filename,
                score = r.anomaly_score,
                "Anomaly detected"
            );
        }

        results
    }

    fn features_for(&self, doc: &Document) -> Result<FeatureVector> {
        doc.validate()?;
        Ok(self.extractor.extract(&doc.content))
    }
}

impl Default for AnomalyScoringEngine {
    fn default() -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            model: BaselineModel::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training_docs() -> Vec<Document> {
        [
            "Normal document with standard business content and professional formatting.",
            "Another regular document discussing quarterly performance metrics and business objectives.",
            "Standard technical documentation covering best practices and implementation guidelines.",
            "This is a sample business report with normal content length and structure.",
        ]
        .iter()
        .enumerate()
        .map(|(i, text)| Document::new(format!("ref_{}", i), format!("ref_{}.txt", i), *text))
        .collect()
    }

    #[test]
    fn test_detect_untrained_is_marked() {
        let engine = AnomalyScoringEngine::default();
        let result = engine.detect(&Document::new("d1", "a.txt", "Some content."));

        assert_eq!(result.status, DetectionStatus::Untrained);
        assert!(!result.is_anomaly);
        assert_eq!(result.anomaly_score, 0.0);
        assert!(result.features.is_some());
    }

    #[test]
    fn test_train_then_detect() {
        let engine = AnomalyScoringEngine::default();
        assert!(engine.train(&training_docs()).is_fitted());
        assert!(engine.is_trained());

        let result = engine.detect(&training_docs()[0]);
        assert!(result.is_scored());
        assert!((0.0..=1.0).contains(&result.anomaly_score));
        assert_eq!(result.feature_names.len(), 10);
    }

    #[test]
    fn test_train_skips_invalid_documents() {
        let engine = AnomalyScoringEngine::default();
        let docs = vec![
            Document::new("ok", "ok.txt", "Plain readable text."),
            Document::new("bad", "bad.bin", "\0\0\0"),
        ];

        // Only one usable document remains
        assert_eq!(engine.train(&docs), FitOutcome::Skipped { samples: 1 });
        assert!(!engine.is_trained());
    }

    #[test]
    fn test_batch_preserves_order_and_isolates_failure() {
        let engine = AnomalyScoringEngine::default();
        engine.train(&training_docs());

        let batch = vec![
            Document::new("a", "a.txt", "A normal report about quarterly results."),
            Document::new("b", "b.bin", "binary\0payload"),
            Document::new("c", "c.txt", "Another ordinary memo about the budget."),
        ];
        let results = engine.batch_detect(&batch);

        assert_eq!(results.len(), 3);
        let ids: Vec<&str> = results.iter().map(|r| r.document_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(results[0].is_scored());
        assert!(matches!(results[1].status, DetectionStatus::Failed { .. }));
        assert!(results[1].features.is_none());
        assert!(results[2].is_scored());
    }

    #[test]
    fn test_batch_summary() {
        let engine = AnomalyScoringEngine::default();
        let batch = vec![
            Document::new("a", "a.txt", "text"),
            Document::new("b", "b.txt", "bad\0"),
        ];

        let summary = BatchSummary::from_results(&engine.batch_detect(&batch));
        assert_eq!(
            summary,
            BatchSummary { processed: 2, scored: 0, anomalies: 0, untrained: 1, failed: 1 }
        );
    }

    #[test]
    fn test_result_serializes_with_status() {
        let engine = AnomalyScoringEngine::default();
        let result = engine.detect(&Document::new("d1", "a.txt", "hello"));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"]["state"], "untrained");
        assert_eq!(json["feature_names"][0], "document_length");
        assert_eq!(json["features"].as_array().unwrap().len(), 10);
    }
}
