//! Tic-tac-toe game logic with a computer opponent.
//!
//! # Architecture
//!
//! - **Session**: value-typed state machine for one game (board, turn, status)
//! - **Oracle**: exhaustive minimax that occasionally plays a random cell
//! - **Game**: event-driven controller a front end talks to
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tictac::{Game, GameSettings, Mode, Player, RngSource};
//!
//! let settings = GameSettings {
//!     mode: Mode::PvAi,
//!     starting_player: Player::X,
//!     human_player: Player::X,
//! };
//! let mut game = Game::new(settings, Duration::ZERO, RngSource::seeded(7));
//! game.on_cell_activated(4);
//! // With no delay the computer has already answered.
//! assert!(game.view().accepts_input);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod game;
mod invariants;
mod oracle;
mod position;
mod random;
mod rules;
mod session;
mod types;

pub use board::{Board, CELLS, ParseBoardError};
pub use game::{AiTurn, DEFAULT_AI_DELAY, Game, GameSettings, View};
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, MarkBalance, SessionInvariants,
    StatusMatchesBoard,
};
pub use oracle::{MoveOracle, OPTIMAL_PROBABILITY, Strategy, best_move, random_move};
pub use position::{Position, Step};
pub use random::{RandomSource, RngSource};
pub use rules::{LINES, check_winner, evaluate_terminal, winning_line};
pub use session::{MoveRejected, Session};
pub use types::{GameStatus, Mode, Player, Square};
