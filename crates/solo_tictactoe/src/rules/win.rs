//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Position, Square};
use tracing::instrument;

/// The eight winning lines, in the fixed order the heuristic scans them.
pub const WIN_PATTERNS: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns true if `player` holds every square of at least one pattern.
#[instrument(skip(board))]
pub fn evaluate_win(board: &Board, player: Player) -> bool {
    let held = Square::Occupied(player);
    WIN_PATTERNS
        .iter()
        .any(|line| line.iter().all(|pos| board.get(*pos) == held))
}

/// Checks if there is a winner on the board.
///
/// Human is checked before Computer. A legal game never has both.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<Player> {
    [Player::Human, Player::Computer]
        .into_iter()
        .find(|player| evaluate_win(board, *player))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(player: Player, positions: &[Position]) -> Board {
        let mut board = Board::new();
        for pos in positions {
            board.set(*pos, Square::Occupied(player));
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert!(!evaluate_win(&board, Player::Human));
        assert!(!evaluate_win(&board, Player::Computer));
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_every_pattern_wins() {
        for line in WIN_PATTERNS {
            let board = board_with(Player::Computer, &line);
            assert!(evaluate_win(&board, Player::Computer), "{line:?}");
            assert!(!evaluate_win(&board, Player::Human));
        }
    }

    #[test]
    fn test_superset_still_wins() {
        let board = board_with(
            Player::Human,
            &[Position::TopLeft, Position::Center, Position::BottomRight, Position::TopRight],
        );
        assert_eq!(winner(&board), Some(Player::Human));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(Player::Human, &[Position::TopLeft, Position::TopCenter]);
        assert!(!evaluate_win(&board, Player::Human));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = board_with(Player::Human, &[Position::TopLeft, Position::TopCenter]);
        board.set(Position::TopRight, Square::Occupied(Player::Computer));
        assert_eq!(winner(&board), None);
    }
}
