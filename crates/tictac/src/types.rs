//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the mark drawn for this player.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true once the game is won or drawn.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// Who sits on the other side of the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Two humans sharing one board.
    #[default]
    #[strum(serialize = "pvp")]
    PvP,
    /// A human against the computer.
    #[strum(serialize = "pvai")]
    PvAi,
}

impl Mode {
    /// Toggles between the two modes.
    pub fn toggle(self) -> Self {
        match self {
            Mode::PvP => Mode::PvAi,
            Mode::PvAi => Mode::PvP,
        }
    }

    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            Mode::PvP => "Player vs Player",
            Mode::PvAi => "Player vs AI",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent().opponent(), Player::O);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("x".parse::<Player>(), Ok(Player::X));
        assert_eq!("PvAI".parse::<Mode>(), Ok(Mode::PvAi));
        assert_eq!("pvp".parse::<Mode>(), Ok(Mode::PvP));
        assert!("z".parse::<Player>().is_err());
    }

    #[test]
    fn test_status_helpers() {
        assert!(!GameStatus::InProgress.is_terminal());
        assert!(GameStatus::Draw.is_terminal());
        assert_eq!(GameStatus::Won(Player::O).winner(), Some(Player::O));
        assert_eq!(GameStatus::Draw.winner(), None);
    }
}
