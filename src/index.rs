//! In-memory vector index
//!
//! Holds one (embedding, text) pair per chunk and answers top-k
//! nearest-neighbor queries by cosine similarity. Built wholesale on every
//! "process" action and held only for the lifetime of the session.

use crate::embed::EmbeddingProvider;
use crate::error::Result;

/// One indexed chunk.
#[derive(Debug, Clone)]
struct IndexEntry {
    embedding: Vec<f32>,
    text: String,
}

/// A chunk returned from a similarity search.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub text: String,
    pub score: f32,
}

/// Similarity index over embedded chunks.
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Embed every chunk and build the index. Any embedding failure aborts
    /// the whole build; the caller never sees a partially filled index.
    pub async fn build(chunks: Vec<String>, embedder: &dyn EmbeddingProvider) -> Result<Self> {
        let embeddings = embedder.embed_batch(&chunks).await?;
        let entries = embeddings
            .into_iter()
            .zip(chunks)
            .map(|(embedding, text)| IndexEntry { embedding, text })
            .collect::<Vec<_>>();
        tracing::info!(chunks = entries.len(), "vector index built");
        Ok(Self { entries })
    }

    /// Top-k most similar chunks to the query embedding, ordered by score
    /// descending.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<RetrievedChunk> {
        let mut scored: Vec<RetrievedChunk> = self
            .entries
            .iter()
            .map(|entry| RetrievedChunk {
                text: entry.text.clone(),
                score: cosine_similarity(query, &entry.embedding),
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
