//! Computer opponent: exhaustive minimax with an occasional random move.
//!
//! Each call flips a weighted coin. Most of the time the oracle searches the
//! whole game tree and plays a move with the best achievable outcome; the
//! rest of the time it plays any empty cell, which gives the human a chance
//! to win.

use super::board::Board;
use super::random::RandomSource;
use super::rules::evaluate_terminal;
use super::types::{GameStatus, Player};
use tracing::{debug, instrument};

/// Probability that a move comes from the full search.
pub const OPTIMAL_PROBABILITY: f64 = 0.95;

/// How a single move was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Strategy {
    /// Full-depth minimax.
    Optimal,
    /// Uniform choice among empty cells.
    Random,
}

/// Picks moves for the computer player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOracle {
    optimal_probability: f64,
}

impl Default for MoveOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveOracle {
    /// Creates the oracle with the fixed mistake rate.
    pub fn new() -> Self {
        Self {
            optimal_probability: OPTIMAL_PROBABILITY,
        }
    }

    /// Returns the probability of playing the searched move.
    pub fn optimal_probability(&self) -> f64 {
        self.optimal_probability
    }

    /// Draws the strategy for one move.
    pub fn pick_strategy<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Strategy {
        if rng.unit() < self.optimal_probability {
            Strategy::Optimal
        } else {
            Strategy::Random
        }
    }

    /// Chooses a cell for `ai` to play on `board`.
    ///
    /// # Panics
    ///
    /// Panics if the board is already won or full.
    #[instrument(skip(self, board, rng))]
    pub fn choose_move<R: RandomSource + ?Sized>(
        &self,
        board: &Board,
        ai: Player,
        rng: &mut R,
    ) -> usize {
        assert_playable(board);
        let strategy = self.pick_strategy(rng);
        let index = match strategy {
            Strategy::Optimal => best_move(board, ai),
            Strategy::Random => random_move(board, rng),
        };
        debug!(%strategy, index, "Oracle chose move");
        index
    }
}

/// Returns the lowest-indexed move with the best minimax score for `ai`.
///
/// # Panics
///
/// Panics if the board is already won or full.
#[instrument(level = "debug", skip(board))]
pub fn best_move(board: &Board, ai: Player) -> usize {
    assert_playable(board);
    let mut scratch = *board;
    let mut best: Option<(usize, i8)> = None;

    for index in board.empty_cells() {
        scratch.place(index, ai);
        let score = minimax(&mut scratch, ai, false);
        scratch.clear(index);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    debug_assert_eq!(scratch, *board, "search must leave the board untouched");
    match best {
        Some((index, score)) => {
            debug!(index, score, "Best move found");
            index
        }
        None => unreachable!("playable board has an empty cell"),
    }
}

/// Returns a uniformly random empty cell.
///
/// # Panics
///
/// Panics if the board is full.
pub fn random_move<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> usize {
    let empty: Vec<usize> = board.empty_cells().collect();
    assert!(!empty.is_empty(), "no empty cell to choose from");
    let pick = rng.index(empty.len());
    empty[pick]
}

/// Scores `board` from the point of view of `ai`: +1 win, 0 draw, -1 loss.
///
/// Hypothetical moves are placed on `board` and cleared again before the
/// next sibling is tried, so the board is unchanged on return.
fn minimax(board: &mut Board, ai: Player, maximizing: bool) -> i8 {
    match evaluate_terminal(board) {
        GameStatus::Won(winner) if winner == ai => return 1,
        GameStatus::Won(_) => return -1,
        GameStatus::Draw => return 0,
        GameStatus::InProgress => {}
    }

    let (mover, mut best) = if maximizing {
        (ai, i8::MIN)
    } else {
        (ai.opponent(), i8::MAX)
    };

    for index in 0..board.squares().len() {
        if !board.is_empty(index) {
            continue;
        }
        board.place(index, mover);
        let score = minimax(board, ai, !maximizing);
        board.clear(index);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

fn assert_playable(board: &Board) {
    assert_eq!(
        evaluate_terminal(board),
        GameStatus::InProgress,
        "move requested on a finished board:\n{board}"
    );
}
