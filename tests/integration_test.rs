// Integration tests for docscope
use docscope::prelude::*;
use docscope::{ContextAssembler, DocumentRanker, FitOutcome, Vector};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn example_corpus() -> Vec<Document> {
    let entries = [
        (
            "doc_1",
            "sample_report.pdf",
            "This is a sample business report discussing quarterly performance metrics.",
            json!({"type": "report", "date": "2024-01-15"}),
        ),
        (
            "doc_2",
            "technical_guide.pdf",
            "Technical documentation covering API integration and best practices for developers.",
            json!({"type": "guide", "date": "2024-01-10"}),
        ),
        (
            "doc_3",
            "research_paper.pdf",
            "Research findings on machine learning applications in document processing and analysis.",
            json!({"type": "research", "date": "2024-01-20"}),
        ),
    ];

    entries
        .into_iter()
        .map(|(id, filename, content, metadata)| {
            Document::new(id, filename, content)
                .with_metadata(metadata.as_object().cloned().unwrap_or_default())
        })
        .collect()
}

fn reference_documents() -> Vec<Document> {
    let texts = [
        "Normal document with standard business content and professional formatting.",
        "Another regular document discussing quarterly performance metrics and business objectives.",
        "Standard technical documentation covering best practices and implementation guidelines.",
        "This is a sample business report with normal content length and structure.",
        "Minutes from the weekly planning meeting, including action items and owners.",
        "Summary of the customer onboarding process and the related support workflow.",
    ];
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| Document::new(format!("ref_{}", i), format!("ref_{}.txt", i), *t))
        .collect()
}

#[test]
fn test_extract_is_deterministic_and_fixed_length() {
    let extractor = FeatureExtractor::new();
    for doc in example_corpus() {
        let a = extractor.extract(&doc.content);
        let b = extractor.extract(&doc.content);
        assert_eq!(a.as_slice().len(), 10);
        assert_eq!(a, b);
    }
}

#[test]
fn test_detect_before_training_is_advisory() {
    let engine = AnomalyScoringEngine::new(AnomalyConfig::default()).unwrap();
    let results = engine.batch_detect(&example_corpus());

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.status == DetectionStatus::Untrained && !r.is_anomaly));
}

#[test]
fn test_single_reference_document_leaves_model_untrained() {
    let engine = AnomalyScoringEngine::new(AnomalyConfig::default()).unwrap();
    let outcome = engine.train(&reference_documents()[..1]);

    assert_eq!(outcome, FitOutcome::Skipped { samples: 1 });
    assert!(engine.model().score(&FeatureExtractor::new().extract("unseen text")).is_err());
}

#[test]
fn test_batch_scores_reference_set_in_range() {
    let engine = AnomalyScoringEngine::new(AnomalyConfig::default()).unwrap();
    let reference = reference_documents();
    assert!(engine.train(&reference).is_fitted());

    let results = engine.batch_detect(&reference);
    assert_eq!(results.len(), reference.len());
    for (doc, result) in reference.iter().zip(&results) {
        assert_eq!(doc.id, result.document_id);
        assert_eq!(result.status, DetectionStatus::Scored);
        assert!((0.0..=1.0).contains(&result.anomaly_score));
    }
}

#[test]
fn test_batch_with_bad_document_keeps_order() {
    let engine = AnomalyScoringEngine::new(AnomalyConfig::default()).unwrap();
    engine.train(&reference_documents());

    let mut batch = example_corpus();
    batch.insert(1, Document::new("bad", "blob.bin", "\u{0}\u{0}PK\u{3}\u{4}"));
    let results = engine.batch_detect(&batch);

    let ids: Vec<&str> = results.iter().map(|r| r.document_id.as_str()).collect();
    assert_eq!(ids, vec!["doc_1", "bad", "doc_2", "doc_3"]);
    assert!(matches!(results[1].status, DetectionStatus::Failed { .. }));

    let summary = BatchSummary::from_results(&results);
    assert_eq!(summary.processed, 4);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.scored, 3);
}

#[test]
fn test_seeded_retraining_is_reproducible() {
    let config = AnomalyConfig::default().with_seed(7);
    let target = FeatureExtractor::new()
        .extract("URGENT!!! Please wire the funds to http://pay.example NOW!!!");

    let first = AnomalyScoringEngine::new(config.clone()).unwrap();
    first.train(&reference_documents());
    let second = AnomalyScoringEngine::new(config).unwrap();
    second.train(&reference_documents());

    let a = first.model().score(&target).unwrap();
    let b = second.model().score(&target).unwrap();
    assert_eq!(a.raw_score.to_bits(), b.raw_score.to_bits());
}

#[test]
fn test_concurrent_scoring_during_refit() {
    let engine = Arc::new(AnomalyScoringEngine::new(AnomalyConfig::default()).unwrap());
    engine.train(&reference_documents());

    let scorers: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            thread::spawn(move || {
                for _ in 0..20 {
                    let results = engine.batch_detect(&example_corpus());
                    assert!(results.iter().all(|r| r.status == DetectionStatus::Scored));
                }
            })
        })
        .collect();

    for _ in 0..5 {
        assert!(engine.train(&reference_documents()).is_fitted());
    }
    for handle in scorers {
        handle.join().unwrap();
    }
}

#[test]
fn test_rank_quarterly_performance_lexical() {
    let ranker = DocumentRanker::new(&RagConfig::default());
    let results = ranker.rank("quarterly performance", &example_corpus(), 2);

    assert!(results.len() <= 2);
    assert_eq!(results[0].document.id, "doc_1");
    assert!(results.iter().all(|r| r.score <= results[0].score));
    assert_eq!(results[0].method, RankingMethod::Lexical);
}

#[test]
fn test_rank_without_matches_returns_limit() {
    let ranker = DocumentRanker::new(&RagConfig::default());
    let results = ranker.rank("xylophone", &example_corpus(), 2);
    assert_eq!(results.len(), 2);
}

#[test]
fn test_assembled_blocks_within_budget() {
    let ranker = DocumentRanker::new(&RagConfig::default());
    let ranked = ranker.rank("documentation", &example_corpus(), 3);

    let assembled = ContextAssembler::new(40).assemble(&ranked, 60);
    assert_eq!(assembled.blocks.len(), 3);
    for block in &assembled.blocks {
        assert!(block.chars().count() <= 60);
        assert!(block.ends_with("..."));
    }
    assert!(assembled.sources.iter().all(|s| s.excerpt.chars().count() <= 40));
    assert_eq!(assembled.sources[0].metadata.get("type"), Some(&json!("guide")));
}

#[test]
fn test_answer_without_sources() {
    let engine = RagQueryEngine::new(RagConfig::default()).unwrap();
    let answer = engine.answer("machine learning", &example_corpus(), 3, false);

    assert!(answer.sources.is_empty());
    assert!(answer.processing_time >= 0.0);
    assert!(answer.is_placeholder());
}

struct EchoGenerator;

impl GenerationProvider for EchoGenerator {
    fn generate(&self, prompt: &str, _max_tokens: usize) -> Result<String> {
        let question = prompt
            .lines()
            .find_map(|l| l.strip_prefix("Question: "))
            .unwrap_or_default();
        Ok(format!("Answer about {}", question))
    }

    fn name(&self) -> &str {
        "echo"
    }
}

#[test]
fn test_full_pipeline_with_providers() {
    let engine = RagQueryEngine::new(RagConfig::default())
        .unwrap()
        .with_embedder(Arc::new(HashingEmbedder::default()))
        .with_generator(Arc::new(EchoGenerator));

    let answer = engine.answer("machine learning research", &example_corpus(), 2, true);

    assert_eq!(answer.answer, "Answer about machine learning research");
    assert!(!answer.is_placeholder());
    assert_eq!(answer.sources.len(), 2);
    assert_eq!(answer.sources[0].document_id, "doc_3");
    assert!(answer.sources[0].similarity_score >= answer.sources[1].similarity_score);
    assert!((0.0..=1.0).contains(&answer.confidence));
}

#[test]
fn test_answer_serializes() {
    let engine = RagQueryEngine::new(RagConfig::default()).unwrap();
    let answer = engine.ask("quarterly", &example_corpus());
    let value = serde_json::to_value(&answer).unwrap();

    assert_eq!(value["answer_source"], "placeholder");
    assert_eq!(value["sources"][0]["filename"], "sample_report.pdf");
    assert!(value["processing_time"].is_number());
}

#[test]
fn test_embedder_vectors_are_unit_length() {
    let embedder = HashingEmbedder::default();
    let vectors: Vec<Vector> = embedder.embed(&["one text", "another text"]).unwrap();
    assert!(vectors.iter().all(|v| (v.norm() - 1.0).abs() < 1e-4));
}
