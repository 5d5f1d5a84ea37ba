//! Error taxonomy for the ingestion and question-answering pipeline.
//!
//! Every failure surfaces to the session controller as one of these
//! variants; none of them leaves partial state behind (no half-built
//! index, no half-recorded dialogue turn).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// A document blob could not be parsed as a PDF. Aborts the whole
    /// "process" action.
    #[error("failed to read PDF '{name}': {reason}")]
    Extraction { name: String, reason: String },

    /// An embedding request failed (network, auth, quota). Fatal to the
    /// current process or ask action.
    #[error("embedding request failed: {0}")]
    EmbeddingProvider(String),

    /// A completion request failed. The dialogue history is left unchanged.
    #[error("language model request failed: {0}")]
    LanguageModel(String),

    /// `ask` was called before any successful "process" action.
    #[error("no documents have been processed yet")]
    NotReady,

    /// The configuration holds values the pipeline cannot run with, such
    /// as a chunk overlap at least as large as the chunk size.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ChatError>;
