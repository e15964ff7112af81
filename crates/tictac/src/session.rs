//! The game state machine.
//!
//! A [`Session`] is a value: every transition takes `&self` and returns a
//! fresh session, leaving the caller's copy untouched. Only a restart leaves
//! a finished game.

use super::board::{Board, CELLS};
use super::invariants::{InvariantSet, SessionInvariants};
use super::oracle::MoveOracle;
use super::random::RandomSource;
use super::rules::{evaluate_terminal, winning_line};
use super::types::{GameStatus, Mode, Player};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveRejected {
    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The index is not a board cell.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),

    /// The cell already holds a mark.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] usize),

    /// The computer is due to move.
    #[display("It's the computer's turn ({})", _0)]
    NotYourTurn(#[error(not(source))] Player),
}

/// One game from restart to result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    board: Board,
    to_move: Player,
    status: GameStatus,
    mode: Mode,
    human_player: Player,
}

impl Session {
    /// Starts a fresh game.
    ///
    /// `starting_player` moves first. In [`Mode::PvAi`] the computer plays
    /// the opponent of `human_player`; when that is also the starting
    /// player, [`Session::is_ai_turn`] is true straight away.
    #[instrument]
    pub fn restart(starting_player: Player, mode: Mode, human_player: Player) -> Self {
        info!("Starting new game");
        Self {
            board: Board::new(),
            to_move: starting_player,
            status: GameStatus::InProgress,
            mode,
            human_player,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the game mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the human's letter (meaningful in [`Mode::PvAi`]).
    pub fn human_player(&self) -> Player {
        self.human_player
    }

    /// Returns the computer's letter, if the computer is playing.
    pub fn ai_player(&self) -> Option<Player> {
        match self.mode {
            Mode::PvP => None,
            Mode::PvAi => Some(self.human_player.opponent()),
        }
    }

    /// True while the game runs and the computer is due to move.
    pub fn is_ai_turn(&self) -> bool {
        self.status == GameStatus::InProgress && self.ai_player() == Some(self.to_move)
    }

    /// True when a click on the board could be accepted.
    pub fn accepts_input(&self) -> bool {
        self.status == GameStatus::InProgress && !self.is_ai_turn()
    }

    /// The line that decided the game, if it was won.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        winning_line(&self.board)
    }

    /// Plays the human's (or, in PvP, the current player's) move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejected`] when the game is over, the index is off the
    /// board, the cell is taken or the computer is due to move.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn apply_move(&self, index: usize) -> Result<Session, MoveRejected> {
        if self.status.is_terminal() {
            return Err(MoveRejected::GameOver);
        }
        if index >= CELLS {
            return Err(MoveRejected::OutOfBounds(index));
        }
        if !self.board.is_empty(index) {
            return Err(MoveRejected::CellOccupied(index));
        }
        if self.is_ai_turn() {
            return Err(MoveRejected::NotYourTurn(self.to_move));
        }
        Ok(self.place(index))
    }

    /// Asks the oracle for the computer's move and plays it.
    ///
    /// # Panics
    ///
    /// Panics when it is not the computer's turn.
    #[instrument(skip(self, oracle, rng), fields(player = %self.to_move))]
    pub fn apply_ai_move<R: RandomSource + ?Sized>(
        &self,
        oracle: &MoveOracle,
        rng: &mut R,
    ) -> Session {
        assert!(self.is_ai_turn(), "computer asked to move out of turn");
        let index = oracle.choose_move(&self.board, self.to_move, rng);
        self.place(index)
    }

    /// The status line shown above the board.
    pub fn status_message(&self) -> String {
        match self.status {
            GameStatus::InProgress => format!("Player {}'s Turn", self.to_move),
            GameStatus::Won(winner) if self.ai_player() == Some(winner) => "AI Wins!".to_string(),
            GameStatus::Won(winner) => format!("Player {winner} Wins!"),
            GameStatus::Draw => "It's a Draw!".to_string(),
        }
    }

    /// Marks an empty in-range cell for the player to move and advances.
    fn place(&self, index: usize) -> Session {
        let mut next = *self;
        next.board.place(index, self.to_move);
        next.status = evaluate_terminal(&next.board);
        if next.status == GameStatus::InProgress {
            next.to_move = self.to_move.opponent();
        }
        debug!(index, status = ?next.status, "Move applied");

        if cfg!(debug_assertions)
            && let Err(violations) = SessionInvariants::check_all(&next)
        {
            panic!("session invariants violated: {violations:?}");
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    /// Always searches.
    struct AlwaysOptimal;

    impl RandomSource for AlwaysOptimal {
        fn unit(&mut self) -> f64 {
            0.0
        }

        fn index(&mut self, _len: usize) -> usize {
            unreachable!("optimal branch draws no index")
        }
    }

    fn play(session: Session, moves: &[usize]) -> Session {
        moves
            .iter()
            .fold(session, |s, &index| s.apply_move(index).unwrap())
    }

    #[test]
    fn test_restart_is_empty_and_in_progress() {
        let session = Session::restart(Player::O, Mode::PvP, Player::X);
        assert_eq!(*session.board(), Board::new());
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.to_move(), Player::O);
        assert_eq!(session.ai_player(), None);
    }

    #[test]
    fn test_move_flips_turn() {
        let session = Session::restart(Player::X, Mode::PvP, Player::X);
        let next = session.apply_move(4).unwrap();
        assert_eq!(next.board().get(4), Some(Square::Occupied(Player::X)));
        assert_eq!(next.to_move(), Player::O);
        assert_eq!(next.status_message(), "Player O's Turn");
        // Original value untouched.
        assert_eq!(*session.board(), Board::new());
    }

    #[test]
    fn test_rejections() {
        let session = play(Session::restart(Player::X, Mode::PvP, Player::X), &[4]);
        assert_eq!(session.apply_move(4), Err(MoveRejected::CellOccupied(4)));
        assert_eq!(session.apply_move(9), Err(MoveRejected::OutOfBounds(9)));

        let ai_first = Session::restart(Player::O, Mode::PvAi, Player::X);
        assert!(ai_first.is_ai_turn());
        assert!(!ai_first.accepts_input());
        assert_eq!(ai_first.apply_move(0), Err(MoveRejected::NotYourTurn(Player::O)));
    }

    #[test]
    fn test_won_game_rejects_moves_and_keeps_winner_to_move() {
        // X: 0, 1, 2; O: 3, 4
        let session = play(Session::restart(Player::X, Mode::PvP, Player::X), &[0, 3, 1, 4, 2]);
        assert_eq!(session.status(), GameStatus::Won(Player::X));
        assert_eq!(session.to_move(), Player::X);
        assert_eq!(session.winning_line(), Some([0, 1, 2]));
        assert_eq!(session.status_message(), "Player X Wins!");
        assert_eq!(session.apply_move(8), Err(MoveRejected::GameOver));
        assert!(!session.accepts_input());
    }

    #[test]
    fn test_draw_message() {
        // X O X / X O O / O X X
        let session = play(
            Session::restart(Player::X, Mode::PvP, Player::X),
            &[0, 1, 2, 4, 3, 5, 7, 6, 8],
        );
        assert_eq!(session.status(), GameStatus::Draw);
        assert_eq!(session.status_message(), "It's a Draw!");
    }

    #[test]
    fn test_ai_move_after_human() {
        let session = Session::restart(Player::X, Mode::PvAi, Player::X);
        assert_eq!(session.ai_player(), Some(Player::O));
        let session = session.apply_move(4).unwrap();
        assert!(session.is_ai_turn());

        let session = session.apply_ai_move(&MoveOracle::new(), &mut AlwaysOptimal);
        assert!(session.accepts_input());
        assert_eq!(session.board().count(Player::O), 1);
        // The corner reply is the lowest-indexed drawing move.
        assert_eq!(session.board().get(0), Some(Square::Occupied(Player::O)));
    }

    #[test]
    fn test_ai_win_message() {
        // X: 0, 2, 7; O: 3, 4. The computer (O) completes the middle row.
        let session = play(Session::restart(Player::X, Mode::PvP, Player::X), &[0, 3, 2, 4, 7]);
        let session = Session {
            mode: Mode::PvAi,
            ..session
        };
        assert!(session.is_ai_turn());
        let session = session.apply_ai_move(&MoveOracle::new(), &mut AlwaysOptimal);
        assert_eq!(session.status(), GameStatus::Won(Player::O));
        assert_eq!(session.winning_line(), Some([3, 4, 5]));
        assert_eq!(session.status_message(), "AI Wins!");
    }

    #[test]
    #[should_panic(expected = "out of turn")]
    fn test_ai_move_out_of_turn_panics() {
        let session = Session::restart(Player::X, Mode::PvAi, Player::X);
        session.apply_ai_move(&MoveOracle::new(), &mut AlwaysOptimal);
    }
}
