mod llm_output;
mod prompts;

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::test_suite::TestSuite;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use validator::Validate;

use llm_output::parse_test_suite;
use prompts::{build_system_prompt, build_user_prompt, MAX_SUGGESTED_CASES, MIN_SUGGESTED_CASES};

/// Turns a user story into a validated [`TestSuite`] with one backend call.
///
/// Holds no state between calls. The credential is checked when the
/// generator is built, so a misconfigured process fails before any story
/// is read.
pub struct TestCaseGenerator {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    config: LLMConfig,
}

impl std::fmt::Debug for TestCaseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCaseGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TestCaseGenerator {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>, config: LLMConfig) -> Result<Self> {
        if config.api_key().is_none() {
            return Err(AppError::ConfigurationError(format!(
                "API key not found. Set {} environment variable or pass it as a parameter.",
                config.provider.credential_env_var()
            )));
        }
        config
            .validate()
            .map_err(|e| AppError::ConfigurationError(format!("Invalid LLM settings: {}", e)))?;

        Ok(Self { llm_client, config })
    }

    pub async fn generate(&self, user_story: &str) -> Result<TestSuite> {
        if user_story.trim().is_empty() {
            return Err(AppError::InputError("User story cannot be empty".to_string()));
        }

        let system_prompt = build_system_prompt();
        let user_prompt = build_user_prompt(user_story);

        info!(
            provider = %self.config.provider,
            model = self.config.model(),
            story_chars = user_story.chars().count(),
            "Generating test cases"
        );
        let started = Instant::now();

        let raw_output = self
            .llm_client
            .generate(&self.config, &system_prompt, &user_prompt)
            .await
            .map_err(AppError::generation)?;

        let suite = parse_test_suite(&raw_output)
            .map_err(AppError::generation)?
            .with_user_story(user_story);

        let cases = suite.test_cases().len();
        if !(MIN_SUGGESTED_CASES..=MAX_SUGGESTED_CASES).contains(&cases) {
            warn!(
                cases,
                "Model returned a test case count outside the requested range"
            );
        }
        info!(
            cases,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generated test suite"
        );

        Ok(suite)
    }
}
