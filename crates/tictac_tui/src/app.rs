//! Application state and logic.

use crate::input::Action;
use tictac::{AiTurn, Game, GameSettings, Position, RandomSource, View};
use tracing::debug;

/// Main application state.
///
/// Holds no timers itself: any [`AiTurn`] it returns must be armed by the
/// caller, which later reports back through [`App::on_ai_timer`].
pub struct App<R> {
    game: Game<R>,
    cursor: Position,
    should_quit: bool,
}

impl<R: RandomSource> App<R> {
    /// Creates a new application around a started game.
    pub fn new(game: Game<R>) -> Self {
        Self {
            game,
            cursor: Position::default(),
            should_quit: false,
        }
    }

    /// The computer move scheduled when the app started, if any.
    pub fn initial_turn(&self) -> Option<AiTurn> {
        self.game.pending()
    }

    /// Snapshot to render.
    pub fn view(&self) -> View {
        self.game.view()
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies one user action.
    ///
    /// Returns a computer move the caller must schedule.
    pub fn handle_action(&mut self, action: Action) -> Option<AiTurn> {
        debug!(?action, "Handling action");
        let settings: GameSettings = self.game.settings();

        match action {
            Action::Cursor(step) => {
                self.cursor = self.cursor.step(step);
                None
            }
            Action::PlayCursor => self.game.on_cell_activated(self.cursor.to_index()),
            Action::PlayCell(index) => {
                if let Some(pos) = Position::from_index(index) {
                    self.cursor = pos;
                }
                self.game.on_cell_activated(index)
            }
            Action::ToggleMode => self.game.on_mode_changed(settings.mode.toggle()),
            Action::ToggleStartingPlayer => self
                .game
                .on_starting_player_changed(settings.starting_player.opponent()),
            Action::ToggleHumanPlayer => self
                .game
                .on_human_player_changed(settings.human_player.opponent()),
            Action::Restart => self.game.on_restart_requested(),
            Action::Quit => {
                self.should_quit = true;
                None
            }
        }
    }

    /// A timer armed for `ticket` fired.
    pub fn on_ai_timer(&mut self, ticket: u64) -> bool {
        self.game.on_ai_timer(ticket)
    }
}
