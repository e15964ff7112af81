//! Win and draw detection.

use super::board::Board;
use super::types::{GameStatus, Player, Square};
use tracing::instrument;

/// The eight index triples that win when uniform and non-empty.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],            // Diagonals
];

/// Returns the first line held entirely by one player.
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    let squares = board.squares();
    LINES.into_iter().find(|&[a, b, c]| {
        squares[a] != Square::Empty && squares[a] == squares[b] && squares[a] == squares[c]
    })
}

/// Checks if there is a winner on the board.
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).and_then(|[a, _, _]| board.squares()[a].player())
}

/// Classifies a board as won, drawn or still in progress.
///
/// Every line is checked before a full board is called a draw, so a win
/// on the ninth move is reported as a win.
#[instrument(level = "trace", skip(board))]
pub fn evaluate_terminal(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: &str) -> Board {
        cells.parse().unwrap()
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(evaluate_terminal(&Board::new()), GameStatus::InProgress);
        assert_eq!(winning_line(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let b = board("XXX OO. ...");
        assert_eq!(evaluate_terminal(&b), GameStatus::Won(Player::X));
        assert_eq!(winning_line(&b), Some([0, 1, 2]));
    }

    #[test]
    fn test_winner_column() {
        let b = board("XO. XO. .O.");
        assert_eq!(evaluate_terminal(&b), GameStatus::Won(Player::O));
        assert_eq!(winning_line(&b), Some([1, 4, 7]));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let b = board("XXO XO. O..");
        assert_eq!(check_winner(&b), Some(Player::O));
        assert_eq!(winning_line(&b), Some([2, 4, 6]));
    }

    #[test]
    fn test_draw_full_board() {
        // X O X / O X X / O X O
        let b = board("XOX OXX OXO");
        assert_eq!(evaluate_terminal(&b), GameStatus::Draw);
    }

    #[test]
    fn test_win_on_last_cell_is_not_draw() {
        // X O X / O X O / O X X: full board, X holds the main diagonal
        let b = board("XOX OXO OXX");
        assert_eq!(evaluate_terminal(&b), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let b = board("XX. ... ...");
        assert_eq!(evaluate_terminal(&b), GameStatus::InProgress);
    }
}
