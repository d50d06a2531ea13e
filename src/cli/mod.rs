//! # Command-Line Interface Module
//!
//! This module defines the command-line interface (CLI) for the application.
//! It uses the `clap` crate to parse arguments and subcommands, and then
//! dispatches to the appropriate handlers in the `core::commands` module.
//!
//! The main components are:
//! - `Cli`: The top-level struct representing the CLI arguments.
//! - `Commands`: An enum defining the main subcommands (`evaluate`, `completion`, `config`).
//! - `CompletionSubcommand`: An enum for generating shell completion scripts.
//! - `cli_match()`: The main function that parses CLI input and executes the matched command.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
};
use std::path::PathBuf;

use crate::core::{commands, types::OutputFormat};
use crate::utils::app_config::AppConfig;
use crate::utils::error::Result;
use crate::utils::types::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "approvalbot",
    author,
    about,
    long_about = "Approval status resolver for OWNERS-governed pull requests",
    version
)]
/// Represents the command-line interface arguments for the application.
pub struct Cli {
    /// Specifies a custom configuration file path.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enables or disables debug mode.
    #[arg(short, long = "debug", value_name = "DEBUG")]
    pub debug: Option<bool>,

    /// Sets the logging level for the application.
    #[arg(short, long = "log-level", value_name = "LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// The subcommand to execute.
    #[clap(subcommand)]
    command: Commands,
}

/// Defines the main subcommands available in the CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluates a PR snapshot against its ownership database.
    ///
    /// Reads a JSON snapshot (changed files, ownership entries, recorded
    /// approvals and assignees) and reports whether the PR is approved,
    /// which directories still need approval and who should be CC'd.
    #[clap(
        name = "evaluate",
        about = "Evaluate a PR snapshot and report its approval status"
    )]
    Evaluate {
        /// Path to the JSON evaluation snapshot.
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// The output format: `text`, `json` or `message`. Defaults to `message`.
        #[arg(long, value_name = "FORMAT", default_value = "message", value_parser = parse_output_format)]
        format: OutputFormat,

        /// Overrides the snapshot's suggestion seed.
        #[arg(long, value_name = "SEED", allow_hyphen_values = true)]
        seed: Option<i64>,
    },
    /// Subcommands for generating shell completion scripts.
    #[clap(
        name = "completion",
        about = "Generate completion scripts",
        long_about = None,
        )]
    Completion {
        /// The shell for which to generate the script.
        #[clap(subcommand)]
        subcommand: CompletionSubcommand,
    },
    /// Displays the current application configuration.
    #[clap(
        name = "config",
        about = "Show Configuration",
        long_about = None,
    )]
    Config,
}

/// Defines subcommands for shell completion script generation.
#[derive(Subcommand, PartialEq, Debug)]
enum CompletionSubcommand {
    /// Generates the autocompletion script for Bash.
    #[clap(about = "generate the autocompletion script for bash")]
    Bash,
    /// Generates the autocompletion script for Zsh.
    #[clap(about = "generate the autocompletion script for zsh")]
    Zsh,
    /// Generates the autocompletion script for Fish.
    #[clap(about = "generate the autocompletion script for fish")]
    Fish,
}

/// Parses command-line arguments, merges configurations, and executes the
/// appropriate command.
pub fn cli_match() -> Result<()> {
    // Parse the command line arguments
    let cli = Cli::parse();

    // Merge clap config file if the value is set
    AppConfig::merge_config(cli.config.as_deref())?;

    let app = Cli::command();
    let matches = app.get_matches();

    AppConfig::merge_args(matches)?;

    // Execute the subcommand
    match &cli.command {
        Commands::Evaluate {
            snapshot,
            format,
            seed,
        } => commands::evaluate::run(snapshot, format, *seed)?,
        Commands::Completion { subcommand } => {
            let mut app = Cli::command();
            match subcommand {
                CompletionSubcommand::Bash => {
                    generate(Bash, &mut app, "approvalbot", &mut std::io::stdout());
                }
                CompletionSubcommand::Zsh => {
                    generate(Zsh, &mut app, "approvalbot", &mut std::io::stdout());
                }
                CompletionSubcommand::Fish => {
                    generate(Fish, &mut app, "approvalbot", &mut std::io::stdout());
                }
            }
        }
        Commands::Config => commands::config::run()?,
    }

    Ok(())
}

/// Parses a string slice into an `OutputFormat` enum.
///
/// Used by `clap` as a value parser for the `--format` argument
/// (case-insensitive `text`, `json`, `message`).
fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        "message" => Ok(OutputFormat::Message),
        _ => Err(format!("Invalid output format: {}", s)),
    }
}
