use super::{build_http_client, ensure_success, request_error, LLMClient};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, SAMPLING_TEMPERATURE};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    parts: Vec<GeminiPart>,
}

pub struct GeminiClient {
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
        })
    }

    fn api_key(config: &LLMConfig) -> Result<&str> {
        config
            .api_key()
            .ok_or_else(|| AppError::LLMError("Missing API key for Google provider".to_string()))
    }

    fn request_body(config: &LLMConfig, system: &str, user: &str) -> GeminiRequest {
        let system_instruction = if system.trim().is_empty() {
            None
        } else {
            Some(GeminiContent {
                parts: vec![GeminiPart {
                    text: system.to_string(),
                }],
                role: None,
            })
        };

        GeminiRequest {
            system_instruction,
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: user.to_string(),
                }],
                role: Some("user".to_string()),
            }],
            generation_config: GenerationConfig {
                temperature: f64::from(SAMPLING_TEMPERATURE),
                max_output_tokens: config.max_tokens,
                response_mime_type: "application/json",
            },
        }
    }

    fn first_text(response: GeminiResponse) -> Result<String> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let base_url = config.base_url().trim_end_matches('/');
        let model = config.model().trim();
        let url = format!("{}/{}:generateContent", base_url, model);
        let body = Self::request_body(config, system, user);

        tracing::debug!(url = %url, model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        let response = ensure_success(response).await?;

        let json: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        Self::first_text(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm_config::LLMProvider;

    fn gemini_config() -> LLMConfig {
        LLMConfig {
            provider: LLMProvider::Gemini,
            ..LLMConfig::default()
        }
    }

    #[test]
    fn test_request_body_splits_system_instruction() {
        let body = GeminiClient::request_body(&gemini_config(), "persona", "story");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "persona");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "story");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(json["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn test_first_text_reads_first_candidate() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiClient::first_text(response).unwrap(), "{}");
    }

    #[test]
    fn test_first_text_without_candidates_is_an_error() {
        let response: GeminiResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(
            GeminiClient::first_text(response),
            Err(AppError::LLMError(_))
        ));
    }
}
