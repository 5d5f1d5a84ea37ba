//! Hugging Face Inference API Provider.
//!
//! Implements the `LlmProvider` trait for hosted text-generation models.
//! Chat messages are flattened into a single prompt string because the
//! text-generation pipeline has no native message structure.

use super::provider::LlmProvider;
use super::types::{GenerationParams, Message, Role};
use crate::error::{ChatError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const HF_MODELS_URL: &str = "https://api-inference.huggingface.co/models";

/// Hosted text-generation provider.
pub struct HostedLlm {
    client: Client,
    model: String,
    api_token: Option<String>,
    base_url: String,
}

impl HostedLlm {
    pub fn new(model: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            api_token,
            base_url: HF_MODELS_URL.to_string(),
        }
    }

    /// Override the endpoint base URL (self-hosted inference endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Flatten chat messages into a text-generation prompt, ending with the
/// assistant cue so the model continues as the answer.
pub fn render_prompt(messages: &[Message]) -> String {
    let mut prompt = String::new();
    for msg in messages {
        let tag = match msg.role {
            Role::System => "System",
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        prompt.push_str(tag);
        prompt.push_str(": ");
        prompt.push_str(&msg.content);
        prompt.push('\n');
    }
    prompt.push_str("Assistant:");
    prompt
}

#[async_trait]
impl LlmProvider for HostedLlm {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[Message], params: &GenerationParams) -> Result<String> {
        let prompt = render_prompt(messages);
        let request = GenerationRequest {
            inputs: &prompt,
            parameters: Parameters {
                temperature: params.temperature,
                max_new_tokens: params.max_new_tokens,
                return_full_text: false,
            },
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        let url = format!("{}/{}", self.base_url, self.model);
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "completion request");

        let mut builder = self.client.post(&url).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ChatError::LanguageModel(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::LanguageModel(format!("{}: {}", status, body)));
        }

        let generations: Vec<Generation> = response
            .json()
            .await
            .map_err(|e| ChatError::LanguageModel(format!("malformed response: {}", e)))?;

        let generation = generations
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::LanguageModel("no generations returned".into()))?;

        Ok(generation.generated_text.trim().to_string())
    }
}

// -----------------------------------------------------------------------------
// Inference API DTOs
// -----------------------------------------------------------------------------

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
    options: RequestOptions,
}

#[derive(Serialize)]
struct Parameters {
    temperature: f32,
    max_new_tokens: usize,
    return_full_text: bool,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct Generation {
    generated_text: String,
}
