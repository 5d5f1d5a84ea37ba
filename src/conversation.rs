//! Retrieval-augmented conversation engine
//!
//! `ask` composes embed → search → prompt-build → complete. The engine only
//! exists once an index has been built, so holding one is the READY state;
//! the session controller models UNINITIALIZED as not holding one yet.
//!
//! Dialogue history is the single source of conversational context: it is
//! passed to the model on every call, grows by exactly one (question,
//! answer) pair per successful `ask`, and is never touched when a provider
//! call fails.

use std::sync::Arc;

use crate::embed::EmbeddingProvider;
use crate::error::Result;
use crate::index::{RetrievedChunk, VectorIndex};
use crate::llm::{GenerationParams, LlmProvider, Message};

const SYSTEM_PREAMBLE: &str = "You are a helpful assistant answering questions about the \
user's documents. Base your answers on the excerpts below; say so when they do not \
contain the answer.";

pub struct ConversationEngine {
    index: VectorIndex,
    history: Vec<Message>,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    top_k: usize,
    params: GenerationParams,
}

impl ConversationEngine {
    pub fn new(
        index: VectorIndex,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        top_k: usize,
        params: GenerationParams,
    ) -> Self {
        Self {
            index,
            history: Vec::new(),
            embedder,
            llm,
            top_k,
            params,
        }
    }

    /// Answer a question from the indexed documents.
    ///
    /// Retrieval is re-run for every question rather than cached. The
    /// (question, answer) pair is appended to the history only after the
    /// model call succeeds.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        let query_embedding = self.embedder.embed(question).await?;
        let retrieved = self.index.search(&query_embedding, self.top_k);
        tracing::debug!(retrieved = retrieved.len(), "context chunks for question");

        let messages = build_prompt(&self.history, &retrieved, question);
        let answer = self.llm.complete(&messages, &self.params).await?;

        self.history.push(Message::user(question));
        self.history.push(Message::assistant(answer.clone()));
        Ok(answer)
    }

    /// The dialogue so far: alternating user/assistant turns, user first.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Number of indexed chunks.
    pub fn indexed_chunks(&self) -> usize {
        self.index.len()
    }
}

/// Build the completion prompt: a system message carrying the retrieved
/// excerpts, the full prior dialogue, then the new question.
pub fn build_prompt(
    history: &[Message],
    retrieved: &[RetrievedChunk],
    question: &str,
) -> Vec<Message> {
    let mut context = String::from(SYSTEM_PREAMBLE);
    context.push_str("\n\nExcerpts:\n");
    for chunk in retrieved {
        context.push_str("---\n");
        context.push_str(&chunk.text);
        context.push('\n');
    }

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(context));
    messages.extend_from_slice(history);
    messages.push(Message::user(question));
    messages
}
