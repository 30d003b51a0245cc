//! Alternating turn invariant: human first, then strictly alternating.

use super::Invariant;
use crate::{GameEngine, Player};

/// Invariant: moves alternate Human, Computer, Human, ... and the board is
/// locked exactly when the computer owes a reply.
pub struct AlternatingTurnInvariant;

impl Invariant<GameEngine> for AlternatingTurnInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let alternates = engine.history().iter().enumerate().all(|(i, mov)| {
            let expected = if i % 2 == 0 { Player::Human } else { Player::Computer };
            mov.player == expected
        });

        let human_moved_last = engine.history().len() % 2 == 1;
        let lock_consistent =
            engine.outcome().is_terminal() || engine.is_locked() == human_moved_last;

        alternates && lock_consistent
    }

    fn description() -> &'static str {
        "Turns alternate starting with the human"
    }
}
