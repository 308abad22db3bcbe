use anyhow::Context;
use clap::{Parser, Subcommand};
use docscope::config::load_corpus;
use docscope::{AnomalyScoringEngine, BatchSummary, HashingEmbedder, RagQueryEngine, Settings};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Score documents for anomalies and answer questions over a corpus
#[derive(Parser, Debug)]
#[command(name = "docscope")]
#[command(about = "Document anomaly scoring and grounded question answering", long_about = None)]
struct Args {
    /// Optional JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train on a reference corpus and score incoming documents
    Detect {
        /// JSON array of reference documents
        #[arg(long)]
        reference: PathBuf,

        /// JSON array of documents to score
        #[arg(long)]
        input: PathBuf,
    },
    /// Answer a question from a corpus
    Query {
        /// JSON array of corpus documents
        #[arg(long)]
        corpus: PathBuf,

        #[arg(short, long)]
        question: String,

        /// Documents to include in the context (defaults to settings)
        #[arg(long)]
        limit: Option<usize>,

        /// Omit source attributions from the output
        #[arg(long)]
        no_sources: bool,
    },
}

#[derive(Serialize)]
struct DetectReport {
    summary: BatchSummary,
    results: Vec<docscope::AnomalyResult>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout stays valid JSON
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {:?}", path))?,
        None => Settings::default(),
    };

    match args.command {
        Command::Detect { reference, input } => {
            let reference_docs = load_corpus(&reference)
                .with_context(|| format!("failed to read reference corpus {:?}", reference))?;
            let input_docs = load_corpus(&input)
                .with_context(|| format!("failed to read input documents {:?}", input))?;

            let engine = AnomalyScoringEngine::new(settings.anomaly)?;
            let outcome = engine.train(&reference_docs);
            info!("Training outcome: {:?}", outcome);

            let results = engine.batch_detect(&input_docs);
            let summary = BatchSummary::from_results(&results);
            info!(
                "Batch processing completed. {} of {} documents anomalous.",
                summary.anomalies, summary.processed
            );

            println!("{}", serde_json::to_string_pretty(&DetectReport { summary, results })?);
        }
        Command::Query { corpus, question, limit, no_sources } => {
            let docs = load_corpus(&corpus)
                .with_context(|| format!("failed to read corpus {:?}", corpus))?;
            let limit = limit.unwrap_or(settings.rag.context_limit);

            let engine = RagQueryEngine::new(settings.rag)?
                .with_embedder(Arc::new(HashingEmbedder::default()));
            let answer = engine.answer(&question, &docs, limit, !no_sources);

            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
    }

    Ok(())
}
