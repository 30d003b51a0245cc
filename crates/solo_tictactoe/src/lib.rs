//! Single-player tic-tac-toe against a heuristic computer.
//!
//! # Architecture
//!
//! - **Rules**: pure win/draw/occupancy functions over a [`Board`]
//! - **Heuristic**: the computer's move priority (win, block, center, random)
//! - **Engine**: [`GameEngine`], the stateful rule-checked game
//! - **Session**: [`GameSession`], which paces the computer's reply with a
//!   cancellable delayed task and publishes [`GameEvent`]s
//!
//! # Example
//!
//! ```
//! use solo_tictactoe::{GameEngine, MoveStatus, Phase, Position};
//!
//! let mut engine = GameEngine::with_seed(42);
//! let status = engine.process_player_move(0);
//! assert!(matches!(status, MoveStatus::Accepted { phase: Phase::AwaitingComputer, .. }));
//!
//! let reply = engine.apply_computer_move().unwrap();
//! assert_eq!(reply.position, Position::Center);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod engine;
pub mod heuristic;
pub mod invariants;
mod phases;
mod position;
pub mod rules;
pub mod session;
mod types;

pub use action::{Move, MoveError};
pub use engine::{GameEngine, MoveStatus};
pub use heuristic::select_computer_move;
pub use phases::{Alert, GameOutcome, Phase};
pub use position::Position;
pub use rules::{WIN_PATTERNS, apply_move, evaluate_draw, evaluate_win, is_occupied};
pub use session::{GameEvent, GameSession, SessionSnapshot};
pub use types::{Board, Player, Square};
