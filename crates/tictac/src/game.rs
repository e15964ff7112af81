//! Event-driven controller between a front end and the state machine.
//!
//! The front end forwards clicks and setting changes; the controller keeps
//! the current [`Session`], asks the oracle for the computer's moves and
//! exposes a [`View`] to render after every change.
//!
//! The computer's "thinking" pause is a ticket, not a callback. When a
//! computer move becomes due the controller hands out an [`AiTurn`]; the
//! front end arms a timer and calls [`Game::on_ai_timer`] with the ticket
//! when it fires. Restarting drops the pending ticket, so a late timer is
//! ignored. With a zero delay the computer moves before the event returns.

use super::board::CELLS;
use super::oracle::MoveOracle;
use super::random::RandomSource;
use super::session::Session;
use super::types::{Mode, Player, Square};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default pause before the computer moves.
pub const DEFAULT_AI_DELAY: Duration = Duration::from_millis(500);

/// Settings read on every restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Who sits across the board.
    pub mode: Mode,
    /// Who moves first.
    pub starting_player: Player,
    /// The human's letter when playing the computer.
    pub human_player: Player,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mode: Mode::PvP,
            starting_player: Player::X,
            human_player: Player::X,
        }
    }
}

/// A computer move waiting on the front end's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTurn {
    /// Identifies this scheduled move.
    pub ticket: u64,
    /// How long to wait before calling [`Game::on_ai_timer`].
    pub delay: Duration,
}

/// Everything a front end needs to draw the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Cell contents, row-major.
    pub cells: [Square; CELLS],
    /// Status line.
    pub message: String,
    /// Whether a board click would be considered.
    pub accepts_input: bool,
    /// Cells of the winning line, once won.
    pub winning_line: Option<[usize; 3]>,
    /// True while a computer move is scheduled.
    pub thinking: bool,
    /// Settings of the current game.
    pub settings: GameSettings,
}

/// Owns the current session and reacts to front-end events.
#[derive(Debug)]
pub struct Game<R> {
    session: Session,
    settings: GameSettings,
    oracle: MoveOracle,
    rng: R,
    ai_delay: Duration,
    pending: Option<AiTurn>,
    next_ticket: u64,
}

impl<R: RandomSource> Game<R> {
    /// Creates a controller and starts the first game.
    ///
    /// If the computer opens, its move is either already played (zero
    /// delay) or available from [`Game::pending`].
    #[instrument(skip(rng))]
    pub fn new(settings: GameSettings, ai_delay: Duration, rng: R) -> Self {
        let mut game = Self {
            session: Session::restart(
                settings.starting_player,
                settings.mode,
                settings.human_player,
            ),
            settings,
            oracle: MoveOracle::new(),
            rng,
            ai_delay,
            pending: None,
            next_ticket: 0,
        };
        game.schedule_ai();
        game
    }

    /// Returns the current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the current settings.
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    /// Returns the scheduled computer move, if any.
    pub fn pending(&self) -> Option<AiTurn> {
        self.pending
    }

    /// A board cell was clicked. Rejected moves are ignored.
    #[instrument(skip(self))]
    pub fn on_cell_activated(&mut self, index: usize) -> Option<AiTurn> {
        match self.session.apply_move(index) {
            Ok(next) => {
                self.session = next;
                self.schedule_ai()
            }
            Err(reason) => {
                debug!(%reason, "Ignoring move");
                None
            }
        }
    }

    /// The mode selector changed.
    #[instrument(skip(self))]
    pub fn on_mode_changed(&mut self, mode: Mode) -> Option<AiTurn> {
        self.settings.mode = mode;
        self.restart()
    }

    /// The starting-player selector changed.
    #[instrument(skip(self))]
    pub fn on_starting_player_changed(&mut self, player: Player) -> Option<AiTurn> {
        self.settings.starting_player = player;
        self.restart()
    }

    /// The human's letter changed.
    #[instrument(skip(self))]
    pub fn on_human_player_changed(&mut self, player: Player) -> Option<AiTurn> {
        self.settings.human_player = player;
        self.restart()
    }

    /// Restart with the current settings.
    #[instrument(skip(self))]
    pub fn on_restart_requested(&mut self) -> Option<AiTurn> {
        self.restart()
    }

    /// A timer armed for `ticket` fired.
    ///
    /// Returns true if the computer moved; stale tickets are ignored.
    #[instrument(skip(self))]
    pub fn on_ai_timer(&mut self, ticket: u64) -> bool {
        match self.pending {
            Some(turn) if turn.ticket == ticket => {
                self.pending = None;
                self.play_ai();
                true
            }
            _ => {
                debug!("Ignoring stale computer move");
                false
            }
        }
    }

    /// Builds the render-ready snapshot.
    pub fn view(&self) -> View {
        View {
            cells: *self.session.board().squares(),
            message: self.session.status_message(),
            accepts_input: self.session.accepts_input(),
            winning_line: self.session.winning_line(),
            thinking: self.pending.is_some(),
            settings: self.settings,
        }
    }

    fn restart(&mut self) -> Option<AiTurn> {
        if let Some(turn) = self.pending.take() {
            debug!(ticket = turn.ticket, "Cancelled pending computer move");
        }
        self.session = Session::restart(
            self.settings.starting_player,
            self.settings.mode,
            self.settings.human_player,
        );
        self.schedule_ai()
    }

    fn schedule_ai(&mut self) -> Option<AiTurn> {
        if !self.session.is_ai_turn() {
            return None;
        }
        if self.ai_delay.is_zero() {
            self.play_ai();
            return None;
        }

        self.next_ticket += 1;
        let turn = AiTurn {
            ticket: self.next_ticket,
            delay: self.ai_delay,
        };
        debug!(ticket = turn.ticket, delay_ms = turn.delay.as_millis() as u64, "Computer move scheduled");
        self.pending = Some(turn);
        Some(turn)
    }

    fn play_ai(&mut self) {
        self.session = self.session.apply_ai_move(&self.oracle, &mut self.rng);
        info!(status = ?self.session.status(), "Computer moved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameStatus;

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

    fn vs_ai(starting_player: Player, delay: Duration) -> Game<AlwaysOptimal> {
        let settings = GameSettings {
            mode: Mode::PvAi,
            starting_player,
            human_player: Player::X,
        };
        Game::new(settings, delay, AlwaysOptimal)
    }

    #[test]
    fn test_pvp_alternates_without_scheduling() {
        let mut game = Game::new(GameSettings::default(), DEFAULT_AI_DELAY, AlwaysOptimal);
        assert_eq!(game.on_cell_activated(0), None);
        assert_eq!(game.on_cell_activated(4), None);
        let view = game.view();
        assert_eq!(view.cells[0], Square::Occupied(Player::X));
        assert_eq!(view.cells[4], Square::Occupied(Player::O));
        assert_eq!(view.message, "Player X's Turn");
        assert!(view.accepts_input);
    }

    #[test]
    fn test_human_move_schedules_computer() {
        let mut game = vs_ai(Player::X, DEFAULT_AI_DELAY);
        let turn = game.on_cell_activated(4).expect("computer should be scheduled");
        assert_eq!(turn.delay, DEFAULT_AI_DELAY);

        let view = game.view();
        assert!(view.thinking);
        assert!(!view.accepts_input);
        // Clicks while thinking are ignored.
        assert_eq!(game.on_cell_activated(0), None);
        assert_eq!(game.session().board().count(Player::X), 1);

        assert!(game.on_ai_timer(turn.ticket));
        let view = game.view();
        assert!(!view.thinking);
        assert!(view.accepts_input);
        assert_eq!(view.cells[0], Square::Occupied(Player::O));
    }

    #[test]
    fn test_restart_cancels_pending_ticket() {
        let mut game = vs_ai(Player::X, DEFAULT_AI_DELAY);
        let turn = game.on_cell_activated(4).unwrap();
        assert_eq!(game.on_restart_requested(), None);
        assert!(!game.on_ai_timer(turn.ticket));
        assert_eq!(game.session().board().empty_cells().count(), 9);
    }

    #[test]
    fn test_computer_opens_when_starting_with_its_letter() {
        let game = vs_ai(Player::O, DEFAULT_AI_DELAY);
        let turn = game.pending().expect("computer should open");
        assert_eq!(turn.ticket, 1);
        assert!(!game.view().accepts_input);

        let instant = vs_ai(Player::O, Duration::ZERO);
        assert_eq!(instant.pending(), None);
        assert_eq!(instant.session().board().count(Player::O), 1);
        assert!(instant.view().accepts_input);
    }

    #[test]
    fn test_settings_changes_restart() {
        let mut game = Game::new(GameSettings::default(), Duration::ZERO, AlwaysOptimal);
        game.on_cell_activated(0);
        assert_eq!(game.on_mode_changed(Mode::PvAi), None);
        assert_eq!(game.session().board().empty_cells().count(), 9);

        // Starting as O with the human as X hands the opening to the computer.
        game.on_starting_player_changed(Player::O);
        assert_eq!(game.session().board().count(Player::O), 1);

        let turn = game.on_human_player_changed(Player::O);
        assert_eq!(turn, None);
        assert_eq!(game.session().board().empty_cells().count(), 9);
        assert_eq!(game.session().ai_player(), Some(Player::X));
    }

    #[test]
    fn test_optimal_computer_never_loses_to_first_free_cell() {
        let mut game = vs_ai(Player::X, Duration::ZERO);
        while game.session().status() == GameStatus::InProgress {
            let first_free = game.session().board().empty_cells().next().unwrap();
            game.on_cell_activated(first_free);
        }
        assert_eq!(game.view().message, "AI Wins!");
        assert!(game.view().winning_line.is_some());
    }
}
