//! LLM layer: hosted language model access.
//!
//! - Provider abstraction (`LlmProvider`)
//! - Hosted Hugging Face implementation
//! - Universal message and generation-parameter types

pub mod hf;
pub mod provider;
pub mod types;

// Re-export key types
pub use hf::HostedLlm;
pub use provider::LlmProvider;
pub use types::{GenerationParams, Message, Role};
