//! Archlens CLI binary.

use archlens::cli::Cli;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Main entry point for the archlens CLI.
///
/// Each run builds its graph from the given batch files, so a
/// current-thread runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // RUST_LOG takes precedence over -v
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}
