//! The 3x3 board value type.

use super::types::{Player, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// 3x3 tic-tac-toe board.
///
/// Cells are indexed 0-8 in row-major order. The board is a plain value:
/// copy it to explore hypothetical positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELLS],
}

/// Error returned when a board cannot be built from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    /// The text does not describe exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// A cell character is not `X`, `O`, `.`, `-` or `_`.
    #[display("Unrecognised cell character {:?}", _0)]
    BadCell(#[error(not(source))] char),
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from raw squares.
    pub fn from_squares(squares: [Square; CELLS]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given index, `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if the square at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; CELLS] {
        &self.squares
    }

    /// Indices of the empty squares in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        (0..CELLS).filter(|&index| self.squares[index] == Square::Empty)
    }

    /// Number of marks placed by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|&&square| square == Square::Occupied(player))
            .count()
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|&square| square != Square::Empty)
    }

    /// Marks `index` for `player`. The caller guarantees the index is valid.
    pub(crate) fn place(&mut self, index: usize, player: Player) {
        debug_assert!(self.is_empty(index), "cell {index} is not empty");
        self.squares[index] = Square::Occupied(player);
    }

    /// Clears `index` again; only used to unwind hypothetical moves.
    pub(crate) fn clear(&mut self, index: usize) {
        self.squares[index] = Square::Empty;
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine cell characters, ignoring whitespace and `|`.
    ///
    /// `X`/`O` (any case) are marks; `.`, `-` and `_` are empty cells.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if cells.len() != CELLS {
            return Err(ParseBoardError::WrongLength(cells.len()));
        }

        let mut board = Board::new();
        for (index, c) in cells.into_iter().enumerate() {
            board.squares[index] = match c {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '.' | '-' | '_' => Square::Empty,
                other => return Err(ParseBoardError::BadCell(other)),
            };
        }
        Ok(board)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.squares[index] {
                    Square::Empty => char::from(b'1' + index as u8),
                    Square::Occupied(player) => player.symbol(),
                };
                write!(f, "{symbol}")?;
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board() {
        let board: Board = "XX. OO. ...".parse().unwrap();
        assert_eq!(board.get(0), Some(Square::Occupied(Player::X)));
        assert_eq!(board.get(4), Some(Square::Occupied(Player::O)));
        assert!(board.is_empty(2));
        assert_eq!(board.count(Player::X), 2);
        assert_eq!(board.empty_cells().collect::<Vec<_>>(), vec![2, 5, 6, 7, 8]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(ParseBoardError::WrongLength(2))
        );
        assert_eq!(
            "XOXOXOXOZ".parse::<Board>(),
            Err(ParseBoardError::BadCell('Z'))
        );
    }

    #[test]
    fn test_out_of_range_is_not_empty() {
        let board = Board::new();
        assert!(!board.is_empty(9));
        assert_eq!(board.get(9), None);
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board: Board = "X........".parse().unwrap();
        assert_eq!(board.to_string(), "X|2|3\n-+-+-\n4|5|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_place_and_clear() {
        let mut board = Board::new();
        board.place(4, Player::O);
        assert_eq!(board.get(4), Some(Square::Occupied(Player::O)));
        board.clear(4);
        assert_eq!(board, Board::new());
    }
}
