//! Treasure Hunt - terminal driver
//!
//! Plays, validates, and replays hunts.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use treasure_hunt::{HuntAction, HuntConfig, QuizSession};
use treasure_hunt_cli::{Cli, Command, Finish, run};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            seed,
            actions_out,
        } => play(config, seed, actions_out),
        Command::Check { config } => check(&config),
        Command::Replay {
            config,
            seed,
            actions,
        } => replay(config, seed, &actions),
        Command::DefaultConfig => {
            print!("{}", HuntConfig::builtin().to_toml_string()?);
            Ok(())
        }
    }
}

/// Loads the hunt at `path`, or the built-in one.
#[instrument]
fn load_config(path: Option<PathBuf>) -> Result<HuntConfig> {
    match path {
        Some(path) => Ok(HuntConfig::from_file(path)?),
        None => Ok(HuntConfig::builtin()),
    }
}

/// Play a hunt on stdin/stdout
#[instrument]
fn play(config: Option<PathBuf>, seed: Option<u64>, actions_out: Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, "Starting hunt");

    let mut session = QuizSession::seeded(config, seed)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let finish = run(&mut session, stdin.lock(), &mut stdout.lock())?;
    info!(?finish, actions = session.history().len(), "Hunt ended");

    if finish != Finish::Completed {
        eprintln!("Replay this session with --seed {}", seed);
    }

    if let Some(path) = actions_out {
        let json = serde_json::to_string_pretty(session.history())?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write action log to {}", path.display()))?;
        info!(path = %path.display(), "Action log written");
    }

    Ok(())
}

/// Validate a hunt file
#[instrument]
fn check(path: &Path) -> Result<()> {
    let config = HuntConfig::from_file(path)?;
    println!(
        "{}: {} stages, ok",
        config.title(),
        config.stage_count()
    );
    Ok(())
}

/// Replay an action log and print the final snapshot
#[instrument]
fn replay(config: Option<PathBuf>, seed: u64, actions: &Path) -> Result<()> {
    let config = load_config(config)?;
    let content = std::fs::read_to_string(actions)
        .with_context(|| format!("Failed to read action log {}", actions.display()))?;
    let actions: Vec<HuntAction> = serde_json::from_str(&content)?;

    let session = QuizSession::replay(config, StdRng::seed_from_u64(seed), &actions)?;
    info!(actions = actions.len(), completed = session.is_completed(), "Replay finished");
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}
