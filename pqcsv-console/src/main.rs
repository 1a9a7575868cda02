//! Runs one PostgreSQL query and prints the result set as CSV.
//!
//! Rows go to stdout, logs to stderr. Any failure prints `Error: ...` with
//! its cause chain on stderr and exits with status 1.

use anyhow::Result;
use clap::Parser;
use pqcsv_console::Cli;
use pqcsv_core::{init_logging, run_export};
use std::io::{BufWriter, IsTerminal};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let config = cli.into_config(stdin.lock(), interactive)?;

    let stdout = std::io::stdout();
    let rows = run_export(&config, BufWriter::new(stdout.lock()))
        .await
        .inspect_err(|e| error!("Export failed: {}", e))?;

    info!("✓ Exported {} rows", rows);
    Ok(())
}
