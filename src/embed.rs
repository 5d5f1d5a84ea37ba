//! Embedding provider abstraction and hosted implementation
//!
//! One provider instance is shared between indexing and querying so that
//! chunk and question embeddings stay comparable.

use crate::error::{ChatError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

const HF_FEATURE_EXTRACTION_URL: &str = "https://api-inference.huggingface.co/pipeline/feature-extraction";

/// How many texts to send per embedding request.
const BATCH_SIZE: usize = 32;

/// The seam between the pipeline and whatever computes embeddings.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, preserving order. One vector per text.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let texts = [text.to_string()];
        let mut vectors = self.embed_batch(&texts).await?;
        vectors
            .pop()
            .ok_or_else(|| ChatError::EmbeddingProvider("provider returned no vector".into()))
    }
}

/// Hosted embeddings via the Hugging Face Inference API.
pub struct HostedEmbeddings {
    client: Client,
    model: String,
    api_token: Option<String>,
    base_url: String,
}

impl HostedEmbeddings {
    pub fn new(model: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            api_token,
            base_url: HF_FEATURE_EXTRACTION_URL.to_string(),
        }
    }

    /// Override the endpoint base URL (self-hosted inference endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/{}", self.base_url, self.model);
        let request = FeatureExtractionRequest {
            inputs: texts,
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        let mut builder = self.client.post(&url).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ChatError::EmbeddingProvider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::EmbeddingProvider(format!(
                "{}: {}",
                status, body
            )));
        }

        let vectors: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| ChatError::EmbeddingProvider(format!("malformed response: {}", e)))?;

        if vectors.len() != texts.len() {
            return Err(ChatError::EmbeddingProvider(format!(
                "expected {} vectors, got {}",
                texts.len(),
                vectors.len()
            )));
        }

        Ok(vectors)
    }
}

#[async_trait]
impl EmbeddingProvider for HostedEmbeddings {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(BATCH_SIZE) {
            tracing::debug!(model = %self.model, batch = batch.len(), "embedding batch");
            vectors.extend(self.request_batch(batch).await?);
        }
        Ok(vectors)
    }
}

#[derive(Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a [String],
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}
