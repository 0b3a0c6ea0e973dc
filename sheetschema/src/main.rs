use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sheetfields_core::{FieldSchema, SheetFieldsConfig, prisma, read_workbook};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "sheetschema")]
#[command(about = "Collect per-sheet field lists and generate Prisma models from them", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the first-column field names of every sheet as JSON
    Fields {
        /// Path to the Excel/ODS file (defaults to the configured workbook)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Output file, `-` for stdout
        #[arg(short, long, default_value = "excel_schema.json")]
        output: PathBuf,
    },
    /// Generate a Prisma schema from a field list JSON file
    Prisma {
        /// Field list JSON written by `sheetschema fields`
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SheetFieldsConfig::load(cli.config.as_deref()).context("Invalid configuration")?;

    match cli.command {
        Command::Fields { file, output } => {
            let path = file.unwrap_or_else(|| config.workbook.clone());
            let workbook = read_workbook(&path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;

            let schema = FieldSchema::from_workbook(&workbook);
            let json = schema.to_json_pretty()?;
            write_output(Some(output.as_path()), &format!("{}\n", json))?;
            info!(
                sheets = schema.sheets.len(),
                output = %output.display(),
                "field schema written"
            );
        }
        Command::Prisma { schema, output } => {
            let fields = FieldSchema::from_file(&schema)
                .with_context(|| format!("Failed to load field schema: {}", schema.display()))?;
            debug!(sheets = fields.sheets.len(), "loaded field schema");

            let source = config
                .workbook
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| config.workbook.display().to_string());
            let prisma = prisma::generate_prisma_schema(&fields, &config.schema, &source);
            write_output(output.as_deref(), &prisma)?;
        }
    }

    Ok(())
}

/// Write to a file, or to stdout for `None` and `-`
fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) if path != Path::new("-") => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::write(path, content)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            println!("Output: {}", path.display());
        }
        _ => print!("{}", content),
    }
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
