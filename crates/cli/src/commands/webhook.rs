//! Webhook Command
//!
//! Sends a recorded dictation to the report webhook and shows what came
//! back, optionally running the returned report text through the
//! validator.

use aimed_common::{ReportValidator, ValidationResult};
use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::{guess_mime, WebhookClient, WebhookOutcome, DEFAULT_TIMEOUT};
use crate::output::{print_json, print_validation, OutputFormat};

#[derive(Args)]
pub struct WebhookArgs {
    /// Audio recording to submit
    pub audio: PathBuf,

    /// Webhook URL
    #[arg(env = "AIMED_WEBHOOK_URL")]
    pub url: Option<String>,

    /// MIME type of the recording (guessed from the extension by default)
    #[arg(long)]
    pub mime: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Validate the returned report text
    #[arg(long)]
    pub validate: bool,
}

/// Machine-readable summary of one webhook round-trip
#[derive(Debug, Serialize)]
pub struct WebhookSummary {
    pub status: u16,
    pub elapsed_secs: f64,
    pub success: bool,
    pub report_text: Option<String>,
    pub response: Option<serde_json::Value>,
    pub error: Option<String>,
    pub validation: Option<ValidationResult>,
}

/// Submit the recording; returns whether the round-trip (and validation,
/// when requested) succeeded
pub async fn execute(
    args: WebhookArgs,
    validator: &ReportValidator,
    format: OutputFormat,
) -> Result<bool> {
    let url = args.url.clone().ok_or_else(|| {
        anyhow!("No webhook URL provided. Either pass it as an argument or set AIMED_WEBHOOK_URL")
    })?;

    if !args.audio.exists() {
        bail!("File not found: {}", args.audio.display());
    }

    let size = std::fs::metadata(&args.audio)
        .with_context(|| format!("Failed to stat {}", args.audio.display()))?
        .len();
    let mime = args
        .mime
        .clone()
        .unwrap_or_else(|| guess_mime(&args.audio).to_string());
    let client = WebhookClient::new(&url, Duration::from_secs(args.timeout))?;

    let human = format != OutputFormat::Json;
    if human {
        let name = args
            .audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("File: {} ({:.1} KB)", name, size as f64 / 1024.0);
        println!("URL:  {}", client.url());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg} {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Sending...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let reply = client.submit_audio(&args.audio, &mime).await;
    spinner.finish_and_clear();
    let reply = reply?;

    let outcome = reply.outcome();
    let report_text = match &outcome {
        WebhookOutcome::Success { report_text } => report_text.clone(),
        _ => None,
    };

    let validation = if args.validate && outcome.is_success() {
        Some(validator.validate(report_text.as_deref().unwrap_or_default()))
    } else {
        None
    };
    let passed = outcome.is_success() && validation.as_ref().map_or(true, |v| v.is_valid);

    if !human {
        let (response, error) = match &outcome {
            WebhookOutcome::Success { .. } => (None, None),
            WebhookOutcome::Rejected { body } => (Some(body.clone()), None),
            WebhookOutcome::HttpError { snippet, .. } => (None, Some(snippet.clone())),
        };
        print_json(&WebhookSummary {
            status: reply.status,
            elapsed_secs: reply.elapsed.as_secs_f64(),
            success: outcome.is_success(),
            report_text,
            response,
            error,
            validation,
        });
        return Ok(passed);
    }

    let rule = "-".repeat(60);
    println!("Status: {} ({:.1}s)", reply.status, reply.elapsed.as_secs_f64());
    println!("{}", rule);

    match &outcome {
        WebhookOutcome::Success { report_text } => {
            println!("SUCCESS");
            println!();
            println!("{}", report_text.as_deref().unwrap_or("(no report_text)"));
        }
        WebhookOutcome::Rejected { body } => {
            println!("FAILED: success=false");
            println!("{}", serde_json::to_string_pretty(body)?);
        }
        WebhookOutcome::HttpError { status, snippet } => {
            println!("HTTP ERROR: {}", status);
            println!("{}", snippet);
        }
    }

    println!("{}", rule);

    if let Some(result) = &validation {
        print_validation(result, format);
    }

    Ok(passed)
}
