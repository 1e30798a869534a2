use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Sampling temperature used for every generation call. Not configurable;
/// low enough to keep the model close to the requested JSON schema.
pub const SAMPLING_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    #[default]
    OpenAI,
    Gemini,
}

impl LLMProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "openai",
            LLMProvider::Gemini => "gemini",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "https://api.openai.com/v1",
            LLMProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta/models",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "gpt-4o-mini",
            LLMProvider::Gemini => "gemini-1.5-flash",
        }
    }

    /// Environment variable the credential is read from when none is passed explicitly.
    pub fn credential_env_var(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "OPENAI_API_KEY",
            LLMProvider::Gemini => "GOOGLE_API_KEY",
        }
    }
}

impl fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LLMProvider {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "gemini" | "google" => Ok(LLMProvider::Gemini),
            other => Err(format!(
                "unknown provider '{}' (expected openai or gemini)",
                other
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Validate)]
pub struct LLMConfig {
    #[serde(default)]
    pub provider: LLMProvider,
    #[serde(default)]
    #[validate(url)]
    pub base_url: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub model: Option<String>,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub max_tokens: Option<u32>,
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::OpenAI,
            base_url: None,
            model: None,
            api_key: None,
            max_tokens: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LLMConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Picks the explicit credential when present, otherwise the environment value.
    pub fn with_credential(mut self, env_value: Option<String>) -> Self {
        let explicit = self.api_key.take().filter(|key| !key.trim().is_empty());
        self.api_key = explicit.or_else(|| env_value.filter(|key| !key.trim().is_empty()));
        self
    }
}

impl fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LLMConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url())
            .field("model", &self.model())
            .field("api_key", &self.api_key().map(mask_secret))
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Shows the first 7 and last 4 characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 11 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_provider() {
        let config = LLMConfig::default();
        assert_eq!(config.model(), "gpt-4o-mini");
        assert_eq!(config.base_url(), "https://api.openai.com/v1");

        let gemini = LLMConfig {
            provider: LLMProvider::Gemini,
            ..LLMConfig::default()
        };
        assert_eq!(gemini.model(), "gemini-1.5-flash");
        assert_eq!(gemini.provider.credential_env_var(), "GOOGLE_API_KEY");
    }

    #[test]
    fn test_explicit_credential_wins_over_env() {
        let config = LLMConfig {
            api_key: Some("sk-explicit".to_string()),
            ..LLMConfig::default()
        }
        .with_credential(Some("sk-env".to_string()));
        assert_eq!(config.api_key(), Some("sk-explicit"));
    }

    #[test]
    fn test_blank_credential_falls_back_to_env() {
        let config = LLMConfig {
            api_key: Some("   ".to_string()),
            ..LLMConfig::default()
        }
        .with_credential(Some("sk-env".to_string()));
        assert_eq!(config.api_key(), Some("sk-env"));

        let missing = LLMConfig::default().with_credential(Some(String::new()));
        assert_eq!(missing.api_key(), None);
    }

    #[test]
    fn test_timeout_out_of_range_is_rejected() {
        let config = LLMConfig {
            timeout_secs: 0,
            ..LLMConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(LLMConfig::default().validate().is_ok());
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("OpenAI".parse::<LLMProvider>(), Ok(LLMProvider::OpenAI));
        assert_eq!("google".parse::<LLMProvider>(), Ok(LLMProvider::Gemini));
        assert!("anthropic".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-proj-abcdefghijklmnop"), "sk-proj...mnop");
        assert_eq!(mask_secret("short"), "*****");
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let config = LLMConfig {
            api_key: Some("sk-proj-abcdefghijklmnop".to_string()),
            ..LLMConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("abcdefghijklmnop"));
        assert!(rendered.contains("sk-proj...mnop"));
    }
}
