//! Session controller
//!
//! Owns all mutable session state explicitly: the provider handles and, once
//! "process" has succeeded, the conversation engine. There is no ambient or
//! global state; the controller is the one place that decides whether a
//! question may be asked.

use std::sync::Arc;

use crate::chunking::TextChunker;
use crate::config::Config;
use crate::conversation::ConversationEngine;
use crate::embed::EmbeddingProvider;
use crate::error::{ChatError, Result};
use crate::extract::{self, PdfDocument};
use crate::index::VectorIndex;
use crate::llm::{GenerationParams, LlmProvider, Message};
use crate::progress::ProgressReporter;

/// Outcome of a successful "process" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub documents: usize,
    pub characters: usize,
    pub chunks: usize,
}

/// One user's session: providers plus at most one conversation state.
pub struct Session {
    config: Config,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    engine: Option<ConversationEngine>,
}

impl Session {
    pub fn new(
        config: Config,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            config,
            embedder,
            llm,
            engine: None,
        }
    }

    /// Whether documents have been processed and questions can be asked.
    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    /// Run the ingestion pipeline: extract → chunk → index, then initialize
    /// the conversation engine.
    ///
    /// The index is rebuilt wholesale and the dialogue history starts empty;
    /// a prior conversation state, if any, is replaced only after the whole
    /// pipeline succeeded. Taking `&mut self` means a second process cannot
    /// start while one is in flight.
    pub async fn process(
        &mut self,
        docs: &[PdfDocument],
        progress: &mut ProgressReporter,
    ) -> Result<ProcessReport> {
        tracing::info!(documents = docs.len(), "processing documents");

        // Reject unusable chunking geometry before doing any work
        let chunker = TextChunker::new(self.config.chunk_size, self.config.chunk_overlap)?;

        progress.start_phase("Extracting text");
        let raw_text = match extract::extract_text(docs) {
            Ok(text) => text,
            Err(e) => {
                progress.fail_phase();
                return Err(e);
            }
        };
        progress.finish_phase(Some(&format!("{} chars", raw_text.chars().count())));

        progress.start_phase("Dividing text into chunks");
        let chunks = chunker.split(&raw_text);
        progress.finish_phase(Some(&format!("{} chunks", chunks.len())));

        progress.start_phase("Embedding chunks and building index");
        let chunk_count = chunks.len();
        let index = match VectorIndex::build(chunks, self.embedder.as_ref()).await {
            Ok(index) => index,
            Err(e) => {
                progress.fail_phase();
                return Err(e);
            }
        };
        progress.finish_phase(None);

        let params = GenerationParams {
            temperature: self.config.temperature,
            max_new_tokens: self.config.max_new_tokens,
        };
        self.engine = Some(ConversationEngine::new(
            index,
            Arc::clone(&self.embedder),
            Arc::clone(&self.llm),
            self.config.top_k,
            params,
        ));

        Ok(ProcessReport {
            documents: docs.len(),
            characters: raw_text.chars().count(),
            chunks: chunk_count,
        })
    }

    /// Answer a question, or reject it when no documents have been
    /// processed yet.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        match self.engine.as_mut() {
            Some(engine) => engine.ask(question).await,
            None => Err(ChatError::NotReady),
        }
    }

    /// The dialogue so far (empty until the first successful ask).
    pub fn history(&self) -> &[Message] {
        self.engine.as_ref().map(|e| e.history()).unwrap_or(&[])
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
