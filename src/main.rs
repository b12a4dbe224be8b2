use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ledger_summary::io;
use ledger_summary::pipeline::ReportOptions;
use ledger_summary::{DEFAULT_SHEET, ReportError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        if let Some(stats) = error.stats() {
            eprintln!("diagnostics: {stats}");
        }
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ReportError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Summarize(args) => execute_summarize(args),
    }
}

fn execute_summarize(args: SummarizeArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(ReportError::MissingInput(args.input));
    }

    let options = ReportOptions::from_only_full(!args.include_partial);
    let summary = io::workbook_to_report(&args.input, &args.output, &args.sheet, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Summarize RMB receivables and orders per client from a ledger export."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the per-client summary workbook.
    Summarize(SummarizeArgs),
}

#[derive(clap::Args)]
struct SummarizeArgs {
    /// Ledger workbook to read.
    #[arg(long)]
    input: PathBuf,

    /// Summary workbook to write.
    #[arg(long)]
    output: PathBuf,

    /// Worksheet holding the ledger.
    #[arg(long, default_value = DEFAULT_SHEET)]
    sheet: String,

    /// Keep clients with only receivables or only orders.
    #[arg(long)]
    include_partial: bool,

    /// Also print the summary as JSON on stdout.
    #[arg(long)]
    json: bool,
}
