//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are separated from board storage
//! so the engine, the heuristic and the tests share one definition.

pub mod draw;
pub mod win;

pub use draw::{evaluate_draw, is_full};
pub use win::{WIN_PATTERNS, evaluate_win, winner};

use super::{Board, GameOutcome, MoveError, Player, Position, Square};
use tracing::instrument;

/// True iff the square at `index` already holds a move.
///
/// # Panics
///
/// Panics if `index` is not in `0..9`.
#[instrument(skip(board))]
pub fn is_occupied(board: &Board, index: usize) -> bool {
    let Some(pos) = Position::from_index(index) else {
        panic!("board index {index} out of range (must be 0-8)");
    };
    !board.is_empty(pos)
}

/// Returns a copy of `board` with `player` placed at `index`.
///
/// # Errors
///
/// Returns [`MoveError::OutOfRange`] for an index outside `0..9` and
/// [`MoveError::SquareOccupied`] if the square is taken.
#[instrument(skip(board))]
pub fn apply_move(board: &Board, player: Player, index: usize) -> Result<Board, MoveError> {
    let pos = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
    if !board.is_empty(pos) {
        return Err(MoveError::SquareOccupied(pos));
    }
    let mut next = board.clone();
    next.set(pos, Square::Occupied(player));
    Ok(next)
}

/// Derives the outcome of a board.
///
/// Wins are checked before the draw, so a full board completed by a winning
/// move reports the win.
#[instrument(skip(board))]
pub fn outcome(board: &Board) -> GameOutcome {
    match winner(board) {
        Some(Player::Human) => GameOutcome::HumanWin,
        Some(Player::Computer) => GameOutcome::ComputerWin,
        None if is_full(board) => GameOutcome::Draw,
        None => GameOutcome::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_move_sets_square() {
        let board = Board::new();
        let next = apply_move(&board, Player::Human, 4).unwrap();
        assert!(is_occupied(&next, 4));
        assert!(!is_occupied(&board, 4));
    }

    #[test]
    fn test_apply_move_rejects_occupied() {
        let board = apply_move(&Board::new(), Player::Human, 0).unwrap();
        assert_eq!(
            apply_move(&board, Player::Computer, 0),
            Err(MoveError::SquareOccupied(Position::TopLeft))
        );
    }

    #[test]
    fn test_apply_move_rejects_out_of_range() {
        assert_eq!(
            apply_move(&Board::new(), Player::Human, 9),
            Err(MoveError::OutOfRange(9))
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_is_occupied_panics_out_of_range() {
        is_occupied(&Board::new(), 12);
    }

    #[test]
    fn test_outcome_of_empty_board() {
        assert_eq!(outcome(&Board::new()), GameOutcome::InProgress);
    }
}
