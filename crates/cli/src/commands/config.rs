//! Config Commands

use aimed_common::ValidatorConfig;
use anyhow::Result;
use clap::Args;

use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct ConfigArgs {
    /// Print the built-in defaults instead of the effective config
    #[arg(long)]
    pub default: bool,
}

pub fn execute(args: ConfigArgs, effective: &ValidatorConfig, format: OutputFormat) -> Result<()> {
    let defaults = ValidatorConfig::default();
    let config = if args.default { &defaults } else { effective };

    match format {
        OutputFormat::Json => print_json(config),
        OutputFormat::Table | OutputFormat::Plain => print!("{}", config.to_toml()?),
    }

    Ok(())
}
