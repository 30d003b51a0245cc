//! Move selection for the computer opponent.
//!
//! Priority order: complete a line, block the human's line, take the
//! center, otherwise a uniformly random empty square.

use super::rules::WIN_PATTERNS;
use super::{Board, Player, Position, Square};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Which rule produced the computer's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Reason {
    /// Completes a computer line.
    #[display("win")]
    Win,
    /// Stops a human line.
    #[display("block")]
    Block,
    /// Takes the center square.
    #[display("center")]
    Center,
    /// Nothing better; picked at random.
    #[display("random")]
    Random,
}

/// The first pattern, in [`WIN_PATTERNS`] order, that `player` can finish
/// with one more mark: two squares held by `player` and the third empty.
#[instrument(skip(board))]
pub fn completing_square(board: &Board, player: Player) -> Option<Position> {
    let held = Square::Occupied(player);
    WIN_PATTERNS.iter().find_map(|line| {
        let mut open = line.iter().copied().filter(|pos| board.get(*pos) != held);
        match (open.next(), open.next()) {
            (Some(pos), None) if board.is_empty(pos) => Some(pos),
            _ => None,
        }
    })
}

/// Picks the computer's move and the rule that chose it.
///
/// Returns `None` only when the board is full. Never returns an occupied square.
#[instrument(skip(board, rng))]
pub fn choose_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(Position, Reason)> {
    if let Some(pos) = completing_square(board, Player::Computer) {
        return Some((pos, Reason::Win));
    }
    if let Some(pos) = completing_square(board, Player::Human) {
        return Some((pos, Reason::Block));
    }
    if board.is_empty(Position::Center) {
        return Some((Position::Center, Reason::Center));
    }
    let open = Position::valid_moves(board);
    let pos = open.choose(rng).copied()?;
    Some((pos, Reason::Random))
}

/// Picks the computer's move.
///
/// Callers must not pass a full board; `None` is returned if they do.
pub fn select_computer_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    let (pos, reason) = choose_move(board, rng)?;
    debug!(position = %pos, %reason, "Computer selected move");
    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn board(human: &[usize], computer: &[usize]) -> Board {
        let mut board = Board::new();
        for &i in human {
            board.set(Position::ALL[i], Square::Occupied(Player::Human));
        }
        for &i in computer {
            board.set(Position::ALL[i], Square::Occupied(Player::Computer));
        }
        board
    }

    #[test]
    fn test_completing_square_needs_two_of_three() {
        assert_eq!(completing_square(&board(&[0], &[]), Player::Human), None);
        assert_eq!(
            completing_square(&board(&[0, 1], &[]), Player::Human),
            Some(Position::TopRight)
        );
    }

    #[test]
    fn test_completing_square_skips_blocked_line() {
        // Row 0 is blocked; column 0 (0,3,6) is open at 6.
        let b = board(&[2], &[0, 1, 3]);
        assert_eq!(completing_square(&b, Player::Computer), Some(Position::BottomLeft));
    }

    #[test]
    fn test_first_pattern_wins_tie() {
        // Computer threatens row (0,1,2) at 2 and column (0,3,6) at 6; rows are scanned first.
        let b = board(&[], &[0, 1, 3]);
        assert_eq!(completing_square(&b, Player::Computer), Some(Position::TopRight));
    }

    #[test]
    fn test_reason_reported() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(choose_move(&board(&[], &[0, 1]), &mut rng).map(|m| m.1), Some(Reason::Win));
        assert_eq!(choose_move(&board(&[0, 1], &[]), &mut rng).map(|m| m.1), Some(Reason::Block));
        assert_eq!(choose_move(&board(&[0], &[]), &mut rng).map(|m| m.1), Some(Reason::Center));
        assert_eq!(choose_move(&board(&[4], &[]), &mut rng).map(|m| m.1), Some(Reason::Random));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let b = board(&[0, 2, 3, 7, 8], &[1, 4, 5, 6]);
        assert_eq!(select_computer_move(&b, &mut rng), None);
    }
}
