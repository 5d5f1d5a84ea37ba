//! pdfchat - Chat with your PDF documents
//!
//! Pipeline: PDFs → text extraction → overlapping chunks → embeddings →
//! in-memory vector index → retrieval-augmented conversation with a hosted
//! language model.

pub mod chunking;
pub mod config;
pub mod conversation;
pub mod embed;
pub mod error;
pub mod extract;
pub mod index;
pub mod llm;
pub mod progress;
pub mod repl;
pub mod session;

// Re-export key types
pub use chunking::TextChunker;
pub use config::Config;
pub use conversation::ConversationEngine;
pub use embed::{EmbeddingProvider, HostedEmbeddings};
pub use error::ChatError;
pub use extract::PdfDocument;
pub use index::{RetrievedChunk, VectorIndex};
pub use llm::{GenerationParams, HostedLlm, LlmProvider, Message, Role};
pub use progress::ProgressReporter;
pub use session::{ProcessReport, Session};
