//! Command-line interface.
//!
//! The CLI builds a fresh in-process graph from one or more batch files and
//! runs a single query against it. Nothing is persisted between runs.
//!
//! # Commands
//!
//! - `ingest`: Validate and load the batches, then report what was loaded
//! - `edges`: List a repository's edges
//! - `impact`: Show files downstream of a file
//! - `cycles`: Detect circular dependencies
//! - `hotspots`: Rank files by dependency degree
//!
//! # Global Flags
//!
//! - `--batch <FILE>`: JSON dependency batch to load (repeatable)
//! - `--config <FILE>`: YAML configuration with query limits
//! - `--json`: Output in JSON format
//!
//! # Example
//!
//! ```bash
//! archlens --batch deps.json impact my-repo src/db.ts --depth 2
//! archlens --batch deps.json cycles my-repo --fail-on-cycles
//! ```

mod display;
mod execute;

pub use execute::{QueryOutput, load_facade, run_command};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Archlens - file dependency graph analysis
///
/// Loads dependency edges produced by static analysis and answers
/// impact, cycle, and hotspot queries over them.
#[derive(Parser, Debug)]
#[command(name = "archlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Dependency batch file (JSON); repeat to load several
    #[arg(short, long = "batch", value_name = "FILE", global = true)]
    pub batches: Vec<PathBuf>,

    /// Configuration file (YAML)
    #[arg(short, long, value_name = "FILE", global = true, env = "ARCHLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate and load the batches without running a query
    Ingest,

    /// List a repository's dependency edges
    Edges {
        /// Repository ID
        repo: String,
    },

    /// Show files downstream of a file, by hop distance
    Impact {
        /// Repository ID
        repo: String,

        /// File path as recorded in the batches
        file: String,

        /// Maximum hop count (clamped to 1..=5)
        #[arg(short, long, allow_negative_numbers = true)]
        depth: Option<i64>,
    },

    /// Detect circular dependencies
    Cycles {
        /// Repository ID
        repo: String,

        /// Exit with failure when any cycle is found
        #[arg(long)]
        fail_on_cycles: bool,
    },

    /// Rank files by number of distinct dependencies and dependents
    Hotspots {
        /// Repository ID
        repo: String,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default log filter for the verbosity level.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "archlens=info",
            1 => "archlens=debug",
            _ => "archlens=trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("archlens").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn parses_repeated_batches() {
        let cli = parse(&["-b", "one.json", "--batch", "two.json", "ingest"]);
        assert_eq!(
            cli.batches,
            vec![PathBuf::from("one.json"), PathBuf::from("two.json")]
        );
        assert_eq!(cli.command, Commands::Ingest);
    }

    #[test]
    fn parses_impact_with_negative_depth() {
        let cli = parse(&["impact", "demo", "src/a.ts", "--depth", "-2"]);
        assert_eq!(
            cli.command,
            Commands::Impact {
                repo: "demo".to_string(),
                file: "src/a.ts".to_string(),
                depth: Some(-2),
            }
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["cycles", "demo", "--fail-on-cycles", "--json", "-b", "x.json"]);
        assert!(cli.json);
        assert_eq!(cli.batches, vec![PathBuf::from("x.json")]);
        assert_eq!(
            cli.command,
            Commands::Cycles {
                repo: "demo".to_string(),
                fail_on_cycles: true,
            }
        );
    }

    #[rstest]
    #[case::quiet(&["ingest"], "archlens=info")]
    #[case::verbose(&["-v", "ingest"], "archlens=debug")]
    #[case::very_verbose(&["-vvv", "ingest"], "archlens=trace")]
    fn test_log_filter(#[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(parse(args).log_filter(), expected);
    }

    #[test]
    fn missing_repo_is_an_error() {
        assert!(Cli::try_parse_from(["archlens", "hotspots"]).is_err());
    }
}
