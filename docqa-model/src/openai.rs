//! OpenAI chat-completion client.
//!
//! Calls `/v1/chat/completions` with a single user message and default
//! sampling parameters, returning the first choice's content.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::chat::ChatModel;
use crate::config::ChatConfig;
use crate::error::{ModelError, Result};

/// A [`ChatModel`] backed by the OpenAI chat completions API.
pub struct OpenAiChat {
    client: reqwest::Client,
    config: ChatConfig,
}

impl OpenAiChat {
    /// Create a client with the given configuration.
    pub fn new(config: ChatConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }

    /// Create a client from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ChatConfig::from_env()?))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn api_error_detail(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.config.model, prompt_len = prompt.len(), "sending chat request");

        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![Message { role: "user", content: prompt }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "chat request failed");
                ModelError::Request(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "chat API error");
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: api_error_detail(&body),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Request(format!("failed to parse response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(ModelError::EmptyResponse)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parsing_extracts_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Paris."}},{"message":{"role":"assistant","content":"ignored"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        let content = parsed.choices.into_iter().next().unwrap().message.content;
        assert_eq!(content.as_deref(), Some("Paris."));
    }

    #[test]
    fn error_detail_prefers_structured_message() {
        let body = r#"{"error":{"message":"Rate limit reached","code":"rate_limit_exceeded"}}"#;
        assert_eq!(api_error_detail(body), "Rate limit reached");
    }

    #[test]
    fn request_serializes_single_user_message() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: vec![Message { role: "user", content: "hello" }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        // Default sampling: no temperature or max_tokens keys are sent.
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
    }
}
