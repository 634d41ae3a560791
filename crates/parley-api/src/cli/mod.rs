//! CLI definitions for the `parley` binary.
//!
//! Uses clap derive macros for argument parsing.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Real-time room chat server.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat server.
    Serve {
        /// Address to bind (overrides config file).
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config file).
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Path to a TOML config file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory of client assets to serve at `/`.
        #[arg(long)]
        static_dir: Option<String>,

        /// Export spans via OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
