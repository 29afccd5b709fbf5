//! CLI command definitions for the `typetalk` binary.
//!
//! Uses clap derive macros for argument parsing. Running `typetalk` with no
//! subcommand starts the interactive chat.

pub mod ask;
pub mod chat;
pub mod types;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with a personality-aware assistant.
#[derive(Parser)]
#[command(name = "typetalk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logs (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Classifier endpoint URL (overrides config.toml).
    #[arg(long, global = true, env = "TYPETALK_ENDPOINT")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Start an interactive chat session (default).
    Chat,

    /// Send a single message and print the reply.
    Ask {
        /// Message text; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List the personality types the classifier can return.
    Types,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}
