//! Command line argument parsing for the autofaq CLI using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// autofaq - answer FAQ questions with a TF-IDF intent matcher
#[derive(Parser, Debug, Clone)]
#[command(name = "autofaq")]
#[command(about = "Train and query FAQ intent matching models")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct AutofaqArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl AutofaqArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model on a FAQ dataset and save it
    Train(TrainArgs),

    /// Answer utterances with a saved model
    Ask(AskArgs),

    /// Print the model configuration the other commands would use
    Config(ConfigArgs),
}

/// Options shared by every command that builds a model configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Local CSV dataset (replaces the template's download URL)
    #[arg(long, value_name = "CSV")]
    pub data_path: Option<String>,

    /// Column holding question patterns
    #[arg(long, value_name = "COLUMN")]
    pub x_col_name: Option<String>,

    /// Column holding answers
    #[arg(long, value_name = "COLUMN")]
    pub y_col_name: Option<String>,

    /// Root directory of the saved model (default: ./faq)
    #[arg(long, value_name = "DIR")]
    pub save_load_path: Option<PathBuf>,

    /// JSON document merged into the configuration last
    #[arg(long = "edit", value_name = "JSON")]
    pub edit_dict: Option<String>,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub model: ModelArgs,
}

/// Arguments for answering utterances
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Utterances to answer
    #[arg(value_name = "UTTERANCE", required = true)]
    pub utterances: Vec<String>,
}

/// Arguments for printing the configuration
#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Substitute metadata variables in the printed document
    #[arg(long)]
    pub resolved: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}
