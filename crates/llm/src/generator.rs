//! Fallback answer generation.
//!
//! [`AnswerGenerator`] wraps an [`LlmClient`] with the fixed request shape
//! used for every fallback question and turns any failure into
//! [`FALLBACK_ANSWER`].

use crate::client::{LlmClient, LlmRequest};
use faq_core::AppResult;
use std::sync::Arc;

/// System instruction sent with every question.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Output ceiling for generated answers.
pub const MAX_ANSWER_TOKENS: u32 = 200;

/// Returned whenever generation fails, whatever the cause.
pub const FALLBACK_ANSWER: &str = "I'm sorry, but I couldn't generate an answer at this time.";

/// Generates answers for questions the knowledge base cannot answer.
#[derive(Clone)]
pub struct AnswerGenerator {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl AnswerGenerator {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Ask the backend, surfacing failures as `AppError::Llm`.
    ///
    /// The returned text has surrounding whitespace trimmed.
    pub async fn try_generate(&self, query: &str) -> AppResult<String> {
        let request = LlmRequest::new(query, &self.model)
            .with_system(SYSTEM_PROMPT)
            .with_max_tokens(MAX_ANSWER_TOKENS);

        let response = self.client.complete(&request).await?;
        Ok(response.content.trim().to_string())
    }

    /// Ask the backend; never fails.
    pub async fn generate(&self, query: &str) -> String {
        match self.try_generate(query).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(
                    provider = self.client.provider_name(),
                    "Error querying LLM: {}",
                    e
                );
                FALLBACK_ANSWER.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{LlmResponse, LlmUsage};
    use faq_core::AppError;
    use std::sync::Mutex;

    /// Records requests and replays a fixed outcome.
    struct ScriptedClient {
        reply: Option<String>,
        seen: Mutex<Vec<LlmRequest>>,
    }

    impl ScriptedClient {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl LlmClient for ScriptedClient {
        fn provider_name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Some(content) => Ok(LlmResponse {
                    content: content.clone(),
                    model: request.model.clone(),
                    usage: LlmUsage::default(),
                }),
                None => Err(AppError::Llm("quota exceeded".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_generate_trims_and_uses_fixed_request() {
        let client = Arc::new(ScriptedClient::replying("\n  Paris.  \n"));
        let generator = AnswerGenerator::new(client.clone(), "gpt-4");

        let answer = generator.generate("Capital of France?").await;
        assert_eq!(answer, "Paris.");

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].prompt, "Capital of France?");
        assert_eq!(seen[0].model, "gpt-4");
        assert_eq!(seen[0].system.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(seen[0].max_tokens, Some(MAX_ANSWER_TOKENS));
    }

    #[tokio::test]
    async fn test_generate_failure_returns_fallback() {
        let generator = AnswerGenerator::new(Arc::new(ScriptedClient::failing()), "gpt-4");
        assert_eq!(generator.generate("anything").await, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_try_generate_surfaces_error() {
        let generator = AnswerGenerator::new(Arc::new(ScriptedClient::failing()), "gpt-4");
        assert!(matches!(
            generator.try_generate("anything").await,
            Err(AppError::Llm(_))
        ));
    }
}
