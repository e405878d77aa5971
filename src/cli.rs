//! Command-line interface for subfix
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Caption refinement for timestamped transcripts
#[derive(Parser, Debug)]
#[command(
    name = "subfix",
    version,
    about = "Caption refinement for timestamped transcripts"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refine a transcript JSON file, realigning onto original timestamps
    Refine {
        /// Transcript JSON: a video object or a bare segment array
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Write refined segments here (default: stdout)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// LLM model override
        #[arg(long, value_name = "MODEL")]
        model: Option<String>,

        /// Segments per chunk override
        #[arg(long, value_name = "COUNT")]
        chunk_size: Option<usize>,

        /// Skip the LLM and run the full pipeline as a no-op
        #[arg(long)]
        dry_run: bool,

        /// Print a comparison report after refining
        #[arg(long)]
        report: bool,
    },

    /// Show or locate the configuration
    Config {
        /// Action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn refine_parses_flags() {
        let cli = Cli::try_parse_from([
            "subfix",
            "refine",
            "transcript.json",
            "--chunk-size",
            "25",
            "--dry-run",
            "--report",
        ])
        .unwrap();
        match cli.command {
            Commands::Refine {
                input,
                chunk_size,
                dry_run,
                report,
                ..
            } => {
                assert_eq!(input, PathBuf::from("transcript.json"));
                assert_eq!(chunk_size, Some(25));
                assert!(dry_run);
                assert!(report);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn config_show_parses() {
        let cli = Cli::try_parse_from(["subfix", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Show
            }
        ));
    }
}
