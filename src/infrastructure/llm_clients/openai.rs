use super::{build_http_client, ensure_success, request_error, LLMClient};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, SAMPLING_TEMPERATURE};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAIClient {
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
        })
    }

    fn api_key(config: &LLMConfig) -> Result<&str> {
        config
            .api_key()
            .ok_or_else(|| AppError::LLMError("Missing API key for OpenAI provider".to_string()))
    }

    pub(crate) fn endpoint(config: &LLMConfig) -> String {
        let base_url = config.base_url();
        if base_url.ends_with('/') {
            format!("{}chat/completions", base_url)
        } else {
            format!("{}/chat/completions", base_url)
        }
    }

    pub(crate) fn request_body(config: &LLMConfig, system: &str, user: &str) -> serde_json::Value {
        let mut body = json!({
            "model": config.model(),
            "messages": [
                {
                    "role": "system",
                    "content": system
                },
                {
                    "role": "user",
                    "content": user
                }
            ],
            "temperature": SAMPLING_TEMPERATURE,
        });
        if let Some(max_tokens) = config.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }

    pub(crate) fn message_content(json: &serde_json::Value) -> Result<String> {
        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let url = Self::endpoint(config);
        let body = Self::request_body(config, system, user);

        tracing::debug!(url = %url, model = config.model(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        let response = ensure_success(response).await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        Self::message_content(&json)
    }
}
