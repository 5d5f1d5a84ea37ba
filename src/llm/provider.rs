//! The Provider Abstraction.
//!
//! This trait defines the standard interface for any hosted LLM backend.
//! The conversation engine only ever talks to this seam, which is also
//! what makes the non-mutation-on-failure guarantee testable.

use super::types::{GenerationParams, Message};
use crate::error::Result;
use async_trait::async_trait;

/// The core trait for LLM interactions.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// The model identifier this provider talks to.
    fn model_id(&self) -> &str;

    /// Send a completion request built from the given messages and return
    /// the generated answer text.
    async fn complete(&self, messages: &[Message], params: &GenerationParams) -> Result<String>;
}
