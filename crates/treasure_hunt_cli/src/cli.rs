//! Command-line interface for the treasure hunt.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Treasure Hunt - three clues, one puzzle
#[derive(Parser, Debug)]
#[command(name = "treasure_hunt")]
#[command(about = "Play a treasure hunt quiz in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a hunt interactively
    Play {
        /// Hunt definition (TOML). Uses the built-in hunt if omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for puzzle scrambles (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the action log as JSON when the session ends
        #[arg(long)]
        actions_out: Option<PathBuf>,
    },

    /// Validate a hunt definition
    Check {
        /// Hunt definition (TOML)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Replay an action log and print the final state as JSON
    Replay {
        /// Hunt definition (TOML). Uses the built-in hunt if omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed the session was played with
        #[arg(short, long)]
        seed: u64,

        /// Action log written by `play --actions-out`
        #[arg(short, long)]
        actions: PathBuf,
    },

    /// Print the built-in hunt as TOML
    DefaultConfig,
}
