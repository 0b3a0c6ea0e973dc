use anyhow::{Context, Result};
use clap::Parser;
use sheetfields_core::{SheetFieldsConfig, read_workbook, types};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "sheettypes")]
#[command(about = "Dump the declared data type of every field in a workbook as JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Excel/ODS file (defaults to the configured workbook)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SheetFieldsConfig::load(cli.config.as_deref()).context("Invalid configuration")?;
    let path = cli.file.unwrap_or_else(|| config.workbook.clone());
    debug!(path = %path.display(), "extracting field types");

    let workbook = read_workbook(&path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let report = types::extract_types(&workbook, &config);
    let json = report.to_json_pretty()?;
    println!("{}", json);

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}
