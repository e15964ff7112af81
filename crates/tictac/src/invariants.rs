//! First-class invariants for tic-tac-toe sessions.
//!
//! Invariants are logical properties that must hold after every transition.
//! They are checked in debug builds and can be tested independently.

use super::rules::evaluate_terminal;
use super::session::Session;
use super::types::Player;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: players alternate, so mark counts differ by at most one.
pub struct MarkBalance;

impl Invariant<Session> for MarkBalance {
    fn holds(session: &Session) -> bool {
        let board = session.board();
        board.count(Player::X).abs_diff(board.count(Player::O)) <= 1
    }

    fn description() -> &'static str {
        "Mark counts differ by at most one"
    }
}

/// Invariant: the recorded status is what the board says.
pub struct StatusMatchesBoard;

impl Invariant<Session> for StatusMatchesBoard {
    fn holds(session: &Session) -> bool {
        session.status() == evaluate_terminal(session.board())
    }

    fn description() -> &'static str {
        "Status agrees with the board"
    }
}

/// Everything a session must satisfy after each move.
pub type SessionInvariants = (MarkBalance, StatusMatchesBoard);
