//! Configuration management for pdfchat
//!
//! Handles model selection, generation parameters and chunking settings,
//! persisted as TOML under ~/.pdfchat/config.toml.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default embedding model on the hosted inference API
pub const DEFAULT_EMBEDDING_MODEL: &str = "BAAI/bge-m3";

/// Default language model on the hosted inference API
pub const DEFAULT_LLM_MODEL: &str = "google/flan-t5-xxl";

/// pdfchat configuration
///
/// All values the pipeline treats as fixed constants live here with
/// documented defaults: model identities, generation parameters, chunking
/// geometry and retrieval depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Embedding model identifier (must stay the same between indexing
    /// and querying so embeddings remain comparable)
    pub embedding_model: String,
    /// Language model identifier
    pub llm_model: String,
    /// Sampling temperature for completions
    pub temperature: f32,
    /// Maximum number of generated tokens per answer
    pub max_new_tokens: usize,
    /// Maximum chunk length in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question
    pub top_k: usize,
    /// Version of config schema (for future migrations)
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            temperature: 0.5,
            max_new_tokens: 512,
            chunk_size: 1000,
            chunk_overlap: 100,
            top_k: 4,
            version: 1,
        }
    }
}

impl Config {
    /// Get the config file path (~/.pdfchat/config.toml)
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        Ok(home.join(".pdfchat").join("config.toml"))
    }

    /// Load config from the default path, falling back to defaults if the
    /// file does not exist
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Check that the pipeline can actually run with these values.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            anyhow::bail!("chunk_size must be positive");
        }
        if self.chunk_overlap >= self.chunk_size {
            anyhow::bail!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap,
                self.chunk_size
            );
        }
        if self.top_k == 0 {
            anyhow::bail!("top_k must be positive");
        }
        Ok(())
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save config to a specific path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}

/// Read the hosted-inference API token from the environment.
///
/// Requests are sent anonymously when it is unset; the provider may then
/// rate-limit or reject them.
pub fn api_token() -> Option<String> {
    std::env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty())
}
