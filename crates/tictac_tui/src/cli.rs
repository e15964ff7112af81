//! Command-line interface for tictac_tui.

use crate::config::ConfigOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictac::{Mode, Player};

/// Tic-tac-toe in the terminal, against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "tictac_tui")]
#[command(about = "Tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play(PlayArgs),

    /// Let the computer play itself and report the tally
    Duel {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Seed for reproducible runs (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Options for interactive play.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Opponent: pvp or pvai
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Player who moves first: X or O
    #[arg(long)]
    pub first: Option<Player>,

    /// Your letter when playing the computer: X or O
    #[arg(long)]
    pub human: Option<Player>,

    /// Computer thinking pause in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl PlayArgs {
    /// The flags that override the config file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            mode: self.mode,
            starting_player: self.first,
            human_player: self.human,
            ai_delay_ms: self.delay_ms,
            log_file: self.log_file.clone(),
        }
    }
}
