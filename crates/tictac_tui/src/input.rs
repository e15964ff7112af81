//! Keyboard mapping.

use crossterm::event::KeyCode;
use tictac::Step;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor one cell.
    Cursor(Step),
    /// Play the cell under the cursor.
    PlayCursor,
    /// Play a cell directly (0-8).
    PlayCell(usize),
    /// Switch between two players and the computer.
    ToggleMode,
    /// Switch who moves first.
    ToggleStartingPlayer,
    /// Switch the human's letter.
    ToggleHumanPlayer,
    /// Start over with the current settings.
    Restart,
    /// Leave the game.
    Quit,
}

/// Maps a key to an action; unbound keys map to `None`.
pub fn action_for(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::Up => Action::Cursor(Step::Up),
        KeyCode::Down => Action::Cursor(Step::Down),
        KeyCode::Left => Action::Cursor(Step::Left),
        KeyCode::Right => Action::Cursor(Step::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Action::PlayCursor,
        KeyCode::Char(c @ '1'..='9') => Action::PlayCell(usize::from(c as u8 - b'1')),
        KeyCode::Char('m') => Action::ToggleMode,
        KeyCode::Char('s') => Action::ToggleStartingPlayer,
        KeyCode::Char('h') => Action::ToggleHumanPlayer,
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}
