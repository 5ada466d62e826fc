//! Validate Command

use aimed_common::{ReportValidator, ValidationResult};
use anyhow::{bail, Context, Result};
use clap::Args;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;

use crate::output::{print_validation, OutputFormat};

#[derive(Args)]
pub struct ValidateArgs {
    /// Report text file (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

/// Read report text from the given file or from piped stdin
pub fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            debug!("Reading report text from {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                bail!("No report text given. Usage: aimed validate <report_file.txt> or pipe text on stdin");
            }
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("Failed to read report text from stdin")?;
            Ok(text)
        }
    }
}

/// Run the validation and print the result; returns the verdict
pub fn execute(
    args: ValidateArgs,
    validator: &ReportValidator,
    format: OutputFormat,
) -> Result<ValidationResult> {
    let text = read_input(args.file.as_ref())?;
    let result = validator.validate(&text);
    print_validation(&result, format);
    Ok(result)
}
