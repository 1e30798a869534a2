use crate::interfaces::cli::commands::{self, setup_instructions};
use crate::interfaces::cli::{Cli, Command};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Generate(args) => commands::generate(&cli, args).await,
        Command::Report { file } => commands::report(file),
        Command::Check => commands::check(&cli),
        Command::Samples => {
            commands::samples();
            Ok(())
        }
        Command::Key { action } => commands::key(&cli, action),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            eprintln!("{}", err);
            if err.is_configuration() {
                eprintln!();
                eprintln!("{}", setup_instructions(cli.provider.unwrap_or_default()));
            }
            ExitCode::FAILURE
        }
    }
}
