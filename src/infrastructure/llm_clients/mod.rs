pub mod gemini;
pub mod openai;

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::llm_config::LLMProvider;
use async_trait::async_trait;
use gemini::GeminiClient;
use openai::OpenAIClient;
use std::time::Duration;

/// One text-generation round trip: a system and a user message in, raw text out.
#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String>;
}

pub struct RouterClient {
    openai: OpenAIClient,
    gemini: GeminiClient,
}

impl RouterClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            openai: OpenAIClient::new(timeout)?,
            gemini: GeminiClient::new(timeout)?,
        })
    }

    pub fn from_config(config: &LLMConfig) -> Result<Self> {
        Self::new(Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl LLMClient for RouterClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        match config.provider {
            LLMProvider::Gemini => self.gemini.generate(config, system, user).await,
            LLMProvider::OpenAI => self.openai.generate(config, system, user).await,
        }
    }
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::ConfigurationError(format!("Failed to build HTTP client: {}", e)))
}

pub(crate) fn request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::LLMError(format!("Request timed out: {}", err))
    } else {
        AppError::LLMError(format!("Request failed: {}", err))
    }
}

pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(AppError::LLMError(format!("API error ({}): {}", status, text)))
}
