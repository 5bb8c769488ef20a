//! CLI command definitions for the `witchat` binary.

pub mod chat;
pub mod classify;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with a wit.ai app from the browser or the terminal.
#[derive(Parser)]
#[command(name = "witchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,witchat_core=debug,witchat_infra=debug,witchat_api=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web chat UI and REST API server.
    Serve {
        /// Host to bind to (defaults to `server.host` in config.toml).
        #[arg(long, env = "WITCHAT_HOST")]
        host: Option<String>,

        /// Port to listen on (defaults to `server.port` in config.toml).
        #[arg(short, long, env = "WITCHAT_PORT")]
        port: Option<u16>,
    },

    /// Chat interactively in the terminal.
    Chat,

    /// Classify a single utterance and print the intents and entities.
    Classify {
        /// Text to classify.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}
