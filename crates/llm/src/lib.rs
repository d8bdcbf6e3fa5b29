//! LLM integration crate for the FAQ Assistant.
//!
//! This crate provides a provider-agnostic abstraction over text-generation
//! backends and the [`AnswerGenerator`] adapter the resolver falls back to.
//!
//! # Providers
//! - **OpenAI**: chat completions API (default)
//! - **Ollama**: local LLM runtime
//!
//! # Example
//! ```no_run
//! use faq_llm::{AnswerGenerator, providers::OpenAiClient};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let client = OpenAiClient::new(std::env::var("OPENAI_API_KEY").ok());
//! let generator = AnswerGenerator::new(Arc::new(client), "gpt-4");
//! println!("{}", generator.generate("What is Rust?").await);
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod generator;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use generator::{AnswerGenerator, FALLBACK_ANSWER, MAX_ANSWER_TOKENS, SYSTEM_PROMPT};
pub use providers::{OllamaClient, OpenAiClient};
pub use types::ProviderType;
