use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use crate::infrastructure::security::keyring::KeyringManager;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::Path;

pub const KEYRING_SERVICE: &str = "testgen";
pub const DEFAULT_CONFIG_FILE: &str = "testgen.toml";
pub const ENV_PREFIX: &str = "TESTGEN_";

/// Layers built-in defaults, a TOML file and `TESTGEN_*` variables.
///
/// An explicit `path` must exist; the default `testgen.toml` is optional.
pub fn layered_figment(path: Option<&Path>) -> Result<Figment> {
    let base = Figment::from(Serialized::defaults(LLMConfig::default()));
    let with_file = match path {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::ConfigurationError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            base.merge(Toml::file(path))
        }
        None => base.merge(Toml::file(DEFAULT_CONFIG_FILE)),
    };
    Ok(with_file.merge(Env::prefixed(ENV_PREFIX)))
}

pub fn load_llm_config(path: Option<&Path>) -> Result<LLMConfig> {
    let config: LLMConfig = layered_figment(path)?.extract()?;
    Ok(config)
}

pub struct ConfigService {
    keyring: KeyringManager,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            keyring: KeyringManager::new(KEYRING_SERVICE),
        }
    }

    pub fn save_api_key(&self, provider: LLMProvider, key: &str) -> Result<()> {
        if key.trim().is_empty() {
            return Err(AppError::InputError("API key cannot be empty".to_string()));
        }
        self.keyring.set_secret(provider.as_str(), key.trim())
    }

    pub fn get_api_key(&self, provider: LLMProvider) -> Result<Option<String>> {
        self.keyring.get_secret(provider.as_str())
    }

    pub fn delete_api_key(&self, provider: LLMProvider) -> Result<()> {
        self.keyring.delete_secret(provider.as_str())
    }

    /// Fills in the credential: explicit value, then the provider's
    /// environment variable, then the keyring.
    pub fn resolve_credential(&self, config: LLMConfig) -> LLMConfig {
        let env_var = config.provider.credential_env_var();
        let config = config.with_credential(std::env::var(env_var).ok());
        if config.api_key().is_some() {
            return config;
        }

        match self.get_api_key(config.provider) {
            Ok(stored) => config.with_credential(stored),
            Err(err) => {
                tracing::debug!(error = %err, "Keyring lookup failed");
                config
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm_config::SAMPLING_TEMPERATURE;
    use crate::infrastructure::llm_clients::openai::OpenAIClient;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = load_llm_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.provider, LLMProvider::OpenAI);
            assert_eq!(config.model(), "gpt-4o-mini");
            assert_eq!(config.timeout_secs, 120);
            assert!(config.api_key.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                    provider = "gemini"
                    model = "gemini-1.5-pro"
                    timeout_secs = 30
                "#,
            )?;
            jail.set_env("TESTGEN_MODEL", "gemini-2.0-flash");
            jail.set_env("TESTGEN_MAX_TOKENS", "2048");

            let config = load_llm_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.provider, LLMProvider::Gemini);
            assert_eq!(config.model(), "gemini-2.0-flash");
            assert_eq!(config.max_tokens, Some(2048));
            assert_eq!(config.timeout_secs, 30);
            assert_eq!(
                config.base_url(),
                "https://generativelanguage.googleapis.com/v1beta/models"
            );
            Ok(())
        });
    }

    #[test]
    fn test_temperature_cannot_be_overridden() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, "temperature = 1.5")?;
            jail.set_env("TESTGEN_TEMPERATURE", "1.9");

            let config = load_llm_config(None).map_err(|e| e.to_string())?;
            let body = OpenAIClient::request_body(&config, "sys", "story");
            let temperature = body["temperature"].as_f64().unwrap_or_default();
            assert!((temperature - f64::from(SAMPLING_TEMPERATURE)).abs() < 1e-6);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        Jail::expect_with(|_jail| {
            let err = load_llm_config(Some(Path::new("missing.toml"))).unwrap_err();
            assert!(err.is_configuration());
            Ok(())
        });
    }

    #[test]
    fn test_unknown_provider_is_a_configuration_error() {
        Jail::expect_with(|jail| {
            jail.set_env("TESTGEN_PROVIDER", "anthropic");
            let err = load_llm_config(None).unwrap_err();
            assert!(err.is_configuration(), "{:?}", err);
            Ok(())
        });
    }

    #[test]
    fn test_env_credential_is_picked_up() {
        Jail::expect_with(|jail| {
            jail.set_env("OPENAI_API_KEY", "sk-from-env-123456");
            let config = ConfigService::new().resolve_credential(LLMConfig::default());
            assert_eq!(config.api_key(), Some("sk-from-env-123456"));
            Ok(())
        });
    }
}
