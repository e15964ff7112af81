//! tictac_tui - tic-tac-toe in the terminal.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use tictac::RngSource;
use tictac_tui::{
    GameConfig,
    cli::{Cli, Command, PlayArgs},
    run_duel, run_tui,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => play(args).await,
        Command::Duel { games, seed } => duel(games, seed),
    }
}

/// Run the interactive game
async fn play(args: PlayArgs) -> Result<()> {
    let config = GameConfig::load(args.config.as_deref())
        .context("loading game config")?
        .with_overrides(args.overrides());
    run_tui(config).await
}

/// Run computer-vs-computer games and print the tally
fn duel(games: u32, seed: Option<u64>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(games, ?seed, "Starting duel");
    let tally = match seed {
        Some(seed) => run_duel(games, &mut RngSource::seeded(seed)),
        None => run_duel(games, &mut RngSource::from_entropy()),
    };
    println!("{tally}");
    Ok(())
}
