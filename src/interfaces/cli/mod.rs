pub mod commands;
pub mod report;
pub mod samples;

use crate::domain::llm_config::{LLMConfig, LLMProvider};
use clap::{Args, Parser, Subcommand};
use samples::SampleStory;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "testgen",
    about = "Generate structured test cases from user stories with an LLM",
    version
)]
pub struct Cli {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a TOML configuration file (default: ./testgen.toml if present)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        value_name = "PROVIDER",
        help = "Backend provider (openai or gemini)",
        global = true
    )]
    pub provider: Option<LLMProvider>,

    #[arg(long, value_name = "MODEL", help = "Model identifier", global = true)]
    pub model: Option<String>,

    #[arg(
        long,
        value_name = "URL",
        help = "Override the provider's API base URL",
        global = true
    )]
    pub base_url: Option<String>,

    #[arg(
        long,
        value_name = "KEY",
        help = "API key (otherwise read from the provider's environment variable or the keyring)",
        global = true
    )]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a test suite from a user story
    Generate(GenerateArgs),
    /// Render a previously exported test suite
    Report {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Verify configuration and credentials
    Check,
    /// List the built-in sample stories
    Samples,
    /// Manage the API key stored in the OS keyring
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(
        long,
        value_name = "TEXT",
        conflicts_with_all = ["file", "sample"],
        help = "User story text"
    )]
    pub story: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "sample",
        help = "Read the user story from a file"
    )]
    pub file: Option<PathBuf>,

    #[arg(long, value_enum, help = "Use a built-in sample story")]
    pub sample: Option<SampleStory>,

    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = crate::infrastructure::storage::DEFAULT_EXPORT_FILE,
        help = "Export the suite as JSON (default file: test_cases.json)"
    )]
    pub export: Option<PathBuf>,

    #[arg(long, help = "Print the suite as JSON instead of the text report")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum KeyAction {
    /// Store an API key for the selected provider (reads stdin when --key is omitted)
    Set {
        #[arg(long, value_name = "KEY")]
        key: Option<String>,
    },
    /// Remove the stored API key for the selected provider
    Delete,
}

impl Cli {
    /// Command-line values take precedence over file and environment settings.
    pub fn apply_overrides(&self, mut config: LLMConfig) -> LLMConfig {
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        if let Some(model) = &self.model {
            config.model = Some(model.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_flag_defaults_file_name() {
        let cli = Cli::try_parse_from(["testgen", "generate", "--sample", "login", "--export"])
            .unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.sample, Some(SampleStory::Login));
                assert_eq!(args.export, Some(PathBuf::from("test_cases.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_story_sources_conflict() {
        let result = Cli::try_parse_from([
            "testgen", "generate", "--story", "As a user", "--sample", "login",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_replace_loaded_values() {
        let cli = Cli::try_parse_from([
            "testgen",
            "--provider",
            "gemini",
            "--model",
            "gemini-2.0-flash",
            "--api-key",
            "k-123",
            "check",
        ])
        .unwrap();
        let config = cli.apply_overrides(LLMConfig::default());
        assert_eq!(config.provider, LLMProvider::Gemini);
        assert_eq!(config.model(), "gemini-2.0-flash");
        assert_eq!(config.api_key(), Some("k-123"));
    }
}
