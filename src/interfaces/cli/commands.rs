use super::report::render_report;
use super::samples::SampleStory;
use super::{Cli, GenerateArgs, KeyAction};
use crate::application::TestCaseGenerator;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{mask_secret, LLMConfig, LLMProvider, SAMPLING_TEMPERATURE};
use crate::infrastructure::config::{load_llm_config, ConfigService};
use crate::infrastructure::llm_clients::RouterClient;
use crate::infrastructure::storage::{export_to_json, load_from_json};
use clap::ValueEnum;
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::Path;
use std::sync::Arc;

fn resolved_config(cli: &Cli, service: &ConfigService) -> Result<LLMConfig> {
    let loaded = load_llm_config(cli.config.as_deref())?;
    Ok(service.resolve_credential(cli.apply_overrides(loaded)))
}

fn build_generator(cli: &Cli) -> Result<TestCaseGenerator> {
    let config = resolved_config(cli, &ConfigService::new())?;
    let client = RouterClient::from_config(&config)?;
    TestCaseGenerator::new(Arc::new(client), config)
}

/// Picks the story from `--story`, `--file`, `--sample`, or finally `input`.
pub(crate) fn read_story(args: &GenerateArgs, mut input: impl Read) -> Result<String> {
    if let Some(story) = &args.story {
        return Ok(story.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path).map_err(|e| {
            AppError::InputError(format!("Cannot read story file {}: {}", path.display(), e))
        });
    }
    if let Some(sample) = args.sample {
        return Ok(sample.text().to_string());
    }

    let mut story = String::new();
    input
        .read_to_string(&mut story)
        .map_err(|e| AppError::InputError(format!("Cannot read story from stdin: {}", e)))?;
    Ok(story)
}

pub async fn generate(cli: &Cli, args: &GenerateArgs) -> Result<()> {
    let generator = build_generator(cli)?;

    let stdin = std::io::stdin();
    if args.story.is_none() && args.file.is_none() && args.sample.is_none() && stdin.is_terminal()
    {
        eprintln!("Enter your user story, then press Ctrl-D:");
    }
    let story = read_story(args, stdin.lock())?;

    let suite = generator.generate(&story).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&suite)
            .map_err(|e| AppError::ParseError(format!("Failed to serialize test suite: {}", e)))?;
        println!("{}", json);
    } else {
        print!("{}", render_report(&suite));
    }

    if let Some(path) = &args.export {
        let written = export_to_json(&suite, path)?;
        eprintln!("Test cases exported to {}", written.display());
    }

    Ok(())
}

pub fn report(file: &Path) -> Result<()> {
    let suite = load_from_json(file)?;
    print!("{}", render_report(&suite));
    Ok(())
}

pub fn samples() {
    for sample in SampleStory::value_variants() {
        let name = sample
            .to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_default();
        println!("{:<12} {}", name, sample.title());
    }
}

/// Reports what a `generate` run would use and whether it can start.
pub fn check(cli: &Cli) -> Result<()> {
    let config = resolved_config(cli, &ConfigService::new())?;

    println!("Provider:    {}", config.provider);
    println!("Model:       {}", config.model());
    println!("Base URL:    {}", config.base_url());
    println!("Temperature: {} (fixed)", SAMPLING_TEMPERATURE);
    println!("Timeout:     {}s", config.timeout_secs);
    match config.api_key() {
        Some(key) => println!("API key:     {}", mask_secret(key)),
        None => println!(
            "API key:     not found ({})",
            config.provider.credential_env_var()
        ),
    }

    let client = RouterClient::from_config(&config)?;
    TestCaseGenerator::new(Arc::new(client), config)?;
    println!("All checks passed. Run `testgen generate` to create test cases.");
    Ok(())
}

pub fn key(cli: &Cli, action: &KeyAction) -> Result<()> {
    let provider = cli.provider.unwrap_or_default();
    let service = ConfigService::new();
    match action {
        KeyAction::Set { key } => {
            let key = match key {
                Some(key) => key.clone(),
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            service.save_api_key(provider, &key)?;
            println!("Stored API key for {}", provider);
        }
        KeyAction::Delete => {
            service.delete_api_key(provider)?;
            println!("Removed API key for {}", provider);
        }
    }
    Ok(())
}

pub fn setup_instructions(provider: LLMProvider) -> String {
    let env_var = provider.credential_env_var();
    let source = match provider {
        LLMProvider::OpenAI => "https://platform.openai.com/api-keys",
        LLMProvider::Gemini => "https://aistudio.google.com/app/apikey",
    };
    format!(
        "Setup instructions:\n\
         1. Get an API key from {source}\n\
         2. Export it: export {env_var}='your-key-here'\n\
         3. Or pass --api-key, or store it with `testgen key set`",
    )
}
