mod config;
mod convert;
mod csv;
mod error;
mod results;

use clap::Parser;
use config::Settings;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Convert an LDBC SNB driver results file (LDBC-results.json) into a CSV
/// summary of per-query latency statistics, written to stdout.
#[derive(Parser, Debug)]
#[command(name = "ldbc-results-csv", version, about)]
pub struct Cli {
    /// Path to the driver's results JSON file
    #[arg(value_name = "RESULTS_JSON")]
    input: PathBuf,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::new(cli.input, cli.verbose, cli.quiet);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.verbosity.filter_directive())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(?settings, "resolved settings");

    let stdout = std::io::stdout();
    match convert::convert(&settings.input, stdout.lock()) {
        Ok(summary) => {
            tracing::debug!(rows = summary.rows, "done");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_broken_pipe() => {
            tracing::debug!("stdout closed by reader, stopping");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(parse_error = e.is_parse_error(), "conversion failed");
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(e: &error::ConvertError) {
    use std::error::Error;

    eprintln!("error: {e}");
    let mut cause = e.source();
    while let Some(c) = cause {
        eprintln!("  caused by: {c}");
        cause = c.source();
    }
}
