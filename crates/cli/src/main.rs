//! AiMED CLI - Main Entry Point
//!
//! Validates report text produced by the AiMED webhook and submits test
//! recordings to the webhook itself.

mod client;
mod commands;
mod output;

use aimed_common::{ReportValidator, ValidatorConfig};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{config, validate, webhook};
use output::OutputFormat;

/// AiMED CLI - Report Validation Tools
#[derive(Parser)]
#[command(name = "aimed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Validator config file (TOML)
    #[arg(long, global = true, env = "AIMED_VALIDATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate report text from a file or stdin
    Validate(validate::ValidateArgs),

    /// Submit an audio recording to the report webhook
    Webhook(webhook::WebhookArgs),

    /// Show validator configuration
    Config(config::ConfigArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let validator_config = match &cli.config {
        Some(path) => ValidatorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ValidatorConfig::default(),
    };
    let validator = ReportValidator::new(validator_config)?;

    match cli.command {
        Commands::Validate(args) => {
            let result = validate::execute(args, &validator, cli.format)?;
            if !result.is_valid {
                std::process::exit(1);
            }
        }
        Commands::Webhook(args) => {
            let passed = webhook::execute(args, &validator, cli.format).await?;
            if !passed {
                std::process::exit(1);
            }
        }
        Commands::Config(args) => config::execute(args, validator.config(), cli.format)?,
        Commands::Version => {
            println!("AiMED CLI v{}", aimed_common::VERSION);
            println!("Report text validation and webhook tooling");
        }
    }

    Ok(())
}
