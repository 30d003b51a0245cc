//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Player, Square};
use super::win::evaluate_win;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board on which neither player has three in a row.
///
/// A winning final move is a win, never a draw.
#[instrument(skip(board))]
pub fn evaluate_draw(board: &Board) -> bool {
    is_full(board) && !evaluate_win(board, Player::Human) && !evaluate_win(board, Player::Computer)
}
