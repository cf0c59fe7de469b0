//! HTTP completion client for the text-generation endpoint.
//!
//! Speaks the chat-completions wire shape: a single user message in,
//! `choices[0].message.content` out. The endpoint URL, model, and key all
//! come from configuration, so any compatible provider works.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use postline_core::ports::{ContentGenerator, GenerationError};

/// Generation endpoint configuration.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// Upper bound on the whole completion call. A hung upstream must not
    /// hang the request handler indefinitely.
    pub timeout: Duration,
}

impl GenerationConfig {
    /// Load configuration from environment variables. `None` when no API
    /// key is set (the server falls back to the disabled generator).
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GENERATION_API_KEY").ok()?;
        Some(Self {
            api_url: std::env::var("GENERATION_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            api_key,
            model: std::env::var("GENERATION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            timeout: Duration::from_secs(
                std::env::var("GENERATION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Reqwest-backed completion client.
pub struct HttpContentGenerator {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl HttpContentGenerator {
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        tracing::info!(url = %config.api_url, model = %config.model, "Generation endpoint configured");
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ContentGenerator for HttpContentGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(%status, detail = %detail, "generation endpoint rejected the request");
            return Err(GenerationError::Request(format!(
                "endpoint returned {status}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Request(format!("undecodable response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_decodes_expected_shape() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "[]"}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("[]"));
    }

    #[test]
    fn chat_response_tolerates_missing_content() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant"}}]}"#).unwrap();
        assert_eq!(parsed.choices[0].message.content, None);
    }
}
