// Throughput benchmarks for anomaly scoring and ranking
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docscope::prelude::*;
use rand::prelude::*;
use std::sync::Arc;

const WORDS: &[&str] = &[
    "quarterly", "report", "performance", "metrics", "integration", "guide",
    "research", "analysis", "URGENT!!!", "http://example.com", "admin@example.com",
    "documentation", "pipeline", "budget", "review.", "customer\n",
];

fn generate_document(id: usize, rng: &mut StdRng) -> Document {
    let len = rng.random_range(20..200);
    let content: Vec<&str> = (0..len).map(|_| WORDS[rng.random_range(0..WORDS.len())]).collect();
    Document::new(format!("doc_{}", id), format!("doc_{}.txt", id), content.join(" "))
}

fn generate_corpus(size: usize) -> Vec<Document> {
    let mut rng = StdRng::seed_from_u64(2024);
    (0..size).map(|i| generate_document(i, &mut rng)).collect()
}

fn benchmark_train(c: &mut Criterion) {
    let mut group = c.benchmark_group("train");

    for size in [100, 1000].iter() {
        let corpus = generate_corpus(*size);
        group.bench_with_input(BenchmarkId::new("isolation_forest", size), size, |b, _| {
            let engine = AnomalyScoringEngine::new(AnomalyConfig::default()).unwrap();
            b.iter(|| black_box(engine.train(&corpus)));
        });
    }

    group.finish();
}

fn benchmark_batch_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_detect");

    let engine = AnomalyScoringEngine::new(AnomalyConfig::default()).unwrap();
    engine.train(&generate_corpus(1000));

    for size in [100, 1000].iter() {
        let batch = generate_corpus(*size);
        group.bench_with_input(BenchmarkId::new("scored", size), size, |b, _| {
            b.iter(|| black_box(engine.batch_detect(&batch)));
        });
    }

    group.finish();
}

fn benchmark_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let corpus = generate_corpus(1000);

    let lexical = RagQueryEngine::new(RagConfig::default()).unwrap();
    group.bench_function("lexical", |b| {
        b.iter(|| black_box(lexical.ranker().rank("quarterly performance", &corpus, 5)));
    });

    let semantic = RagQueryEngine::new(RagConfig::default())
        .unwrap()
        .with_embedder(Arc::new(HashingEmbedder::default()));
    group.bench_function("hashing_embedder", |b| {
        b.iter(|| black_box(semantic.ranker().rank("quarterly performance", &corpus, 5)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_train, benchmark_batch_detect, benchmark_rank);
criterion_main!(benches);
