//! OpenAI chat completions provider.
//!
//! API: https://platform.openai.com/docs/api-reference/chat/create

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use faq_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    // Null when the model refuses or calls a tool
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// OpenAI chat completions client.
pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client against the public OpenAI endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url("https://api.openai.com", api_key)
    }

    /// Create a client against any OpenAI-compatible base URL.
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn to_chat_request(&self, request: &LlmRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        ChatCompletionRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    fn convert_response(&self, response: ChatCompletionResponse) -> AppResult<LlmResponse> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Llm("OpenAI response contained no message".to_string()))?;

        let usage = response
            .usage
            .map(|u| LlmUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            model: response.model,
            usage,
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Llm("OpenAI API key is not configured".to_string()))?;

        tracing::debug!("Sending chat completion to OpenAI (model: {})", request.model);

        let url = format!("{}/v1/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.to_chat_request(request))
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to OpenAI: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse OpenAI response: {}", e)))?;

        let response = self.convert_response(chat_response)?;
        tracing::debug!(
            "Received completion from OpenAI ({} tokens)",
            response.usage.total_tokens
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let client = OpenAiClient::new(Some("sk-test".to_string()));
        let request = LlmRequest::new("What is Rust?", "gpt-4")
            .with_system("You are a helpful assistant.")
            .with_max_tokens(200);

        let body = serde_json::to_value(client.to_chat_request(&request)).unwrap();
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["max_tokens"], 200);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "What is Rust?");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_convert_response() {
        let client = OpenAiClient::new(None);
        let raw = r#"{
            "model": "gpt-4-0613",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "  A language.\n"}}],
            "usage": {"prompt_tokens": 20, "completion_tokens": 3, "total_tokens": 23}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        let response = client.convert_response(parsed).unwrap();
        assert_eq!(response.content, "  A language.\n");
        assert_eq!(response.usage.total_tokens, 23);
    }

    #[test]
    fn test_convert_response_without_choices() {
        let client = OpenAiClient::new(None);
        let parsed: ChatCompletionResponse =
            serde_json::from_str(r#"{"model": "gpt-4", "choices": []}"#).unwrap();
        assert!(matches!(
            client.convert_response(parsed),
            Err(AppError::Llm(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = OpenAiClient::with_base_url("http://127.0.0.1:9", None);
        let result = client.complete(&LlmRequest::new("hi", "gpt-4")).await;
        assert!(matches!(result, Err(AppError::Llm(msg)) if msg.contains("API key")));
    }
}
