//! Retrieval-augmented answering
//!
//! rank -> assemble context -> prompt -> generate. Every step degrades
//! instead of failing: ranking falls back to lexical matching and a missing
//! or failing generation provider yields a clearly marked placeholder.

use crate::config::RagConfig;
use crate::context::{
    truncate_chars, AssembledContext, ContextAssembler, SourceAttribution, TRUNCATION_MARKER,
};
use crate::provider::{EmbeddingProvider, GenerationProvider};
use crate::ranker::DocumentRanker;
use docscope_core::{Document, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Characters of the question echoed in a placeholder answer
const PLACEHOLDER_QUESTION_CHARS: usize = 50;

/// Whether the answer text came from the generation provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Generated,
    Placeholder,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryAnswer {
    pub answer: String,
    pub sources: Vec<SourceAttribution>,
    /// In [0, 1]. A fixed representative value for generated answers until
    /// a calibration signal exists; 0.0 for placeholders.
    pub confidence: f32,
    /// Wall-clock seconds spent answering
    pub processing_time: f64,
    pub answer_source: AnswerSource,
}

impl QueryAnswer {
    pub fn is_placeholder(&self) -> bool {
        self.answer_source == AnswerSource::Placeholder
    }
}

/// The fixed prompt template wrapping context and question
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Based on the following documents, answer the user's question.\n\n\
         Context:\n{}\n\n\
         Question: {}\n\n\
         Please provide a comprehensive answer based on the context provided. \
         If the context doesn't contain enough information to answer the question, please say so.\n\n\
         Answer:",
        context, question
    )
}

/// Answer text used when no generation provider could answer
pub fn placeholder_answer(question: &str) -> String {
    format!(
        "[placeholder] generation provider unavailable; no answer generated for: {}",
        truncate_chars(question, PLACEHOLDER_QUESTION_CHARS, TRUNCATION_MARKER)
    )
}

pub struct RagQueryEngine {
    config: RagConfig,
    ranker: DocumentRanker,
    assembler: ContextAssembler,
    generator: Option<Arc<dyn GenerationProvider>>,
}

impl RagQueryEngine {
    pub fn new(config: RagConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ranker: DocumentRanker::new(&config),
            assembler: ContextAssembler::new(config.excerpt_chars),
            generator: None,
            config,
        })
    }

    #[must_use]
    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.ranker = self.ranker.with_embedder(embedder);
        self
    }

    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn GenerationProvider>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    pub fn ranker(&self) -> &DocumentRanker {
        &self.ranker
    }

    /// Answer `question` from the `context_limit` best documents in `corpus`.
    ///
    /// `include_sources = false` only empties the returned source list;
    /// ranking and context assembly are unchanged.
    pub fn answer(
        &self,
        question: &str,
        corpus: &[Document],
        context_limit: usize,
        include_sources: bool,
    ) -> QueryAnswer {
        let start = Instant::now();

        let ranked = self.ranker.rank(question, corpus, context_limit);
        let AssembledContext { text: context, sources, .. } =
            self.assembler.assemble(&ranked, self.config.context_chars_per_doc);

        let prompt = build_prompt(&context, question);
        tracing::debug!(
            documents = ranked.len(),
            prompt_chars = prompt.chars().count(),
            "Built prompt"
        );

        let (answer, answer_source, confidence) = match self.generate(&prompt) {
            Some(text) => (text, AnswerSource::Generated, self.config.confidence),
            None => (placeholder_answer(question), AnswerSource::Placeholder, 0.0),
        };

        let processing_time = start.elapsed().as_secs_f64();
        tracing::info!(
            documents = ranked.len(),
            ?answer_source,
            "Processed query in {:.2}s",
            processing_time
        );

        QueryAnswer {
            answer,
            sources: if include_sources { sources } else { Vec::new() },
            confidence,
            processing_time,
            answer_source,
        }
    }

    /// Answer with the configured context limit, including sources
    pub fn ask(&self, question: &str, corpus: &[Document]) -> QueryAnswer {
        self.answer(question, corpus, self.config.context_limit, true)
    }

    fn generate(&self, prompt: &str) -> Option<String> {
        let generator = self.generator.as_ref()?;
        match generator.generate(prompt, self.config.max_tokens) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(
                    provider = generator.name(),
                    error = %e,
                    "Generation failed, using placeholder"
                );
                None
            }
        }
    }
}
