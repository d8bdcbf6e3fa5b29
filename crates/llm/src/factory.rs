//! LLM provider factory.
//!
//! Builds the client named in the application configuration once at
//! startup; the result is shared by every request.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::ProviderType;
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai", "ollama")
/// * `endpoint` - Optional custom base URL
/// * `api_key` - Optional API key
///
/// An OpenAI client without an API key is still created; its requests fail
/// and the caller degrades to the fallback answer.
///
/// # Errors
/// Returns an error if the provider is unknown.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> Result<Arc<dyn LlmClient>, String> {
    let provider_type =
        ProviderType::parse(provider).ok_or_else(|| format!("Unknown provider: {}", provider))?;
    let base_url = endpoint.unwrap_or(provider_type.default_endpoint());

    match provider_type {
        ProviderType::OpenAI => {
            if api_key.is_none() {
                tracing::warn!("OpenAI client created without an API key");
            }
            let client = OpenAiClient::with_base_url(base_url, api_key.map(str::to_string));
            Ok(Arc::new(client))
        }
        ProviderType::Ollama => Ok(Arc::new(OllamaClient::with_base_url(base_url))),
    }
}
