//! Terminal front end for tictac.
//!
//! Plays tic-tac-toe against a friend or the computer in a ratatui
//! interface, or runs headless computer-vs-computer duels.
//!
//! Settings come from a TOML file (see [`config::GameConfig`]) with
//! command-line flags layered on top.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod duel;
pub mod input;
pub mod tui;
pub mod ui;

pub use app::App;
pub use config::{ConfigError, ConfigOverrides, GameConfig};
pub use duel::{Tally, run_duel};
pub use tui::run_tui;
