use anyhow::Result;
use clap::Parser;
use sheetfields_core::{SheetFieldsConfig, WorkbookReader, inspect};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

mod formatter;

#[derive(Parser)]
#[command(name = "sheetinspect")]
#[command(about = "Print sheet names, row previews, columns and field names of a workbook", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Excel/ODS file (defaults to the configured workbook)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of rows shown in each sheet preview
    #[arg(short = 'n', long, value_name = "ROWS")]
    rows: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    // Read failures are reported but never change the exit status
    if let Err(e) = run(&cli) {
        if e.chain().count() > 1 {
            println!("Error reading excel: {}: {}", e, e.root_cause());
        } else {
            println!("Error reading excel: {}", e);
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = SheetFieldsConfig::load(cli.config.as_deref())?;
    if let Some(rows) = cli.rows {
        config.preview_rows = rows;
        config.validate()?;
    }

    let path = cli.file.as_ref().unwrap_or(&config.workbook);
    debug!(path = %path.display(), "inspecting workbook");

    // Each sheet block is printed before the next sheet is read
    let mut reader = WorkbookReader::open(path)?;
    let names = reader.sheet_names().to_vec();
    formatter::print_sheet_names(&names);

    for name in &names {
        let sheet = reader.read_sheet(name)?;
        formatter::print_sheet(&inspect::inspect_sheet(&sheet, &config));
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
