//! Command-line argument parsing
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;

/// farmacia - Ask questions about the Programa Farmácia Popular do Brasil
#[derive(Parser, Debug)]
#[command(name = "farmacia")]
#[command(version)]
#[command(about = "Retrieval-based assistant for the Programa Farmácia Popular knowledge base", long_about = None)]
pub struct Args {
    /// Configuration file path (defaults to ~/.farmacia/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Knowledge base directory with one .txt file per document
    #[arg(long, value_name = "DIR")]
    pub kb_dir: Option<PathBuf>,

    /// HuggingFace embedding model id
    #[arg(long)]
    pub model: Option<String>,

    /// Documents embedded per model call
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only warnings and errors are logged)
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Subcommand (interactive chat when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start interactive chat
    Chat,

    /// Answer a single question and exit
    Ask {
        /// The question to answer
        #[arg(value_name = "QUESTION")]
        question: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Initialize the engine and report its state
    Status,

    /// Display current configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

/// How `ask` prints its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Verbosity from flags, or `default` when no flag was given
    pub fn verbosity(&self, default: Verbosity) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => default,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Command to run; chat when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat)
    }

    /// Apply flag overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.kb_dir {
            config.knowledge_base.dir = dir.to_string_lossy().into_owned();
        }
        if let Some(model) = &self.model {
            config.embedding.model_id = model.clone();
        }
        if let Some(batch_size) = self.batch_size {
            config.embedding.batch_size = batch_size;
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Parse the config-file spelling; unknown values are `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}
