//! Stateful game engine for human vs. computer play.

use super::heuristic;
use super::invariants::{EngineInvariants, InvariantSet};
use super::rules;
use super::{Alert, Board, GameOutcome, Move, MoveError, Phase, Player, Position};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, warn};

/// What happened to a human move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// The square was taken, the board was locked, or the game was over.
    Ignored,
    /// The move was placed; `phase` is where the game now stands.
    Accepted {
        /// Square the human took.
        position: Position,
        /// Phase after the move.
        phase: Phase,
    },
}

/// Tic-tac-toe engine: one human, one heuristic computer.
///
/// The outcome is derived from the board on every query. The only stored
/// turn state is the lock flag, set while the computer owes a reply.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    history: Vec<Move>,
    board_locked: bool,
    rng: ChaCha8Rng,
}

impl GameEngine {
    /// Creates an engine whose random fallback is seeded from the OS.
    #[instrument]
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Creates an engine with a reproducible random fallback.
    #[instrument]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
            board_locked: false,
            rng,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Returns moves in the order they were played.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True while the human may not move.
    pub fn is_locked(&self) -> bool {
        self.board_locked
    }

    /// True iff the square at `index` holds a move.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..9`.
    pub fn is_occupied(&self, index: usize) -> bool {
        rules::is_occupied(&self.board, index)
    }

    /// Outcome of the current board.
    pub fn outcome(&self) -> GameOutcome {
        rules::outcome(&self.board)
    }

    /// Current phase, derived from the outcome and the lock flag.
    pub fn phase(&self) -> Phase {
        match self.outcome() {
            GameOutcome::HumanWin => Phase::HumanWon,
            GameOutcome::ComputerWin => Phase::ComputerWon,
            GameOutcome::Draw => Phase::Draw,
            GameOutcome::InProgress if self.board_locked => Phase::AwaitingComputer,
            GameOutcome::InProgress => Phase::AwaitingHuman,
        }
    }

    /// Alert describing the finished game, if it is finished.
    pub fn alert(&self) -> Option<Alert> {
        self.outcome().alert()
    }

    /// Whose move it is, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Player> {
        match self.phase() {
            Phase::AwaitingHuman => Some(Player::Human),
            Phase::AwaitingComputer => Some(Player::Computer),
            _ => None,
        }
    }

    /// Places `player` at `index` and returns the resulting outcome.
    ///
    /// A human move locks the board; a computer move unlocks it. A human
    /// move that ends the game leaves the board locked until reset.
    ///
    /// # Errors
    ///
    /// Fails without touching the board if the game is over, it is not
    /// `player`'s turn, the index is out of range, or the square is taken.
    #[instrument(skip(self), fields(phase = ?self.phase()))]
    pub fn apply_move(&mut self, player: Player, index: usize) -> Result<GameOutcome, MoveError> {
        match self.to_move() {
            None => return Err(MoveError::GameOver),
            Some(expected) if expected != player => return Err(MoveError::WrongPlayer(player)),
            Some(_) => {}
        }

        self.board = rules::apply_move(&self.board, player, index)?;
        let position = Position::ALL[index];
        self.history.push(Move::new(player, position));
        self.board_locked = player == Player::Human;

        debug_assert!(
            EngineInvariants::check_all(self).is_ok(),
            "engine invariants violated after {player} -> {position}"
        );

        let outcome = self.outcome();
        debug!(%player, %position, ?outcome, board = %self.board.display(), "Move applied");
        Ok(outcome)
    }

    /// Handles a tap on square `index` by the human.
    ///
    /// Occupied squares, a locked board and a finished game are silently
    /// ignored. On success the win check runs before the draw check.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..9`.
    #[instrument(skip(self))]
    pub fn process_player_move(&mut self, index: usize) -> MoveStatus {
        assert!(index < 9, "board index {index} out of range (must be 0-8)");

        if let Err(e) = self.apply_move(Player::Human, index) {
            debug!(error = %e, "Ignoring human move");
            return MoveStatus::Ignored;
        }

        let position = Position::ALL[index];
        let phase = if rules::evaluate_win(&self.board, Player::Human) {
            Phase::HumanWon
        } else if rules::evaluate_draw(&self.board) {
            Phase::Draw
        } else {
            Phase::AwaitingComputer
        };
        info!(%position, %phase, "Human moved");
        MoveStatus::Accepted { position, phase }
    }

    /// Plays the computer's reply if one is owed.
    ///
    /// Returns `None` (and changes nothing) unless the phase is
    /// [`Phase::AwaitingComputer`].
    #[instrument(skip(self))]
    pub fn apply_computer_move(&mut self) -> Option<Move> {
        if self.phase() != Phase::AwaitingComputer {
            debug!(phase = %self.phase(), "No computer move owed");
            return None;
        }

        let position = heuristic::select_computer_move(&self.board, &mut self.rng)?;
        match self.apply_move(Player::Computer, position.to_index()) {
            Ok(_) => {
                info!(%position, phase = %self.phase(), "Computer moved");
                self.history.last().copied()
            }
            Err(e) => {
                warn!(error = %e, %position, "Heuristic produced an unplayable move");
                None
            }
        }
    }

    /// Clears the board and history and unlocks the board.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.history.clear();
        self.board_locked = false;
        info!("Game reset");
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_awaits_human() {
        let engine = GameEngine::with_seed(0);
        assert_eq!(engine.phase(), Phase::AwaitingHuman);
        assert!(!engine.is_locked());
        assert_eq!(engine.alert(), None);
    }

    #[test]
    fn test_human_move_locks_board() {
        let mut engine = GameEngine::with_seed(0);
        let status = engine.process_player_move(0);
        assert_eq!(
            status,
            MoveStatus::Accepted {
                position: Position::TopLeft,
                phase: Phase::AwaitingComputer
            }
        );
        assert!(engine.is_locked());
        assert_eq!(engine.process_player_move(1), MoveStatus::Ignored);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_computer_reply_unlocks_board() {
        let mut engine = GameEngine::with_seed(0);
        engine.process_player_move(0);
        let reply = engine.apply_computer_move().unwrap();
        assert_eq!(reply, Move::new(Player::Computer, Position::Center));
        assert_eq!(engine.phase(), Phase::AwaitingHuman);
        assert_eq!(engine.board().positions_of(Player::Computer).count(), 1);
    }

    #[test]
    fn test_computer_move_not_owed() {
        let mut engine = GameEngine::with_seed(0);
        assert_eq!(engine.apply_computer_move(), None);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_apply_move_enforces_turn() {
        let mut engine = GameEngine::with_seed(0);
        assert_eq!(
            engine.apply_move(Player::Computer, 4),
            Err(MoveError::WrongPlayer(Player::Computer))
        );
        assert_eq!(engine.apply_move(Player::Human, 4), Ok(GameOutcome::InProgress));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_panics() {
        GameEngine::with_seed(0).process_player_move(9);
    }
}
