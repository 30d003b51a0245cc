//! Paced game session: the computer replies after a cancellable delay.
//!
//! A [`GameSession`] wraps a [`GameEngine`] and turns each accepted human
//! move into a scheduled tokio task that plays the computer's reply once the
//! thinking delay has elapsed. Resetting the session aborts that task, and a
//! task that wakes after a reset finds a newer generation and does nothing.
//! Front-ends observe the session through [`GameSession::subscribe`] and
//! [`GameSession::snapshot`].

use super::{Alert, Board, GameEngine, Move, MoveStatus, Phase, Player};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Default pause before the computer replies.
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(500);

/// Messages sent from the session to its subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was placed on the board.
    MoveMade(Move),
    /// The board is locked while the computer's reply is pending.
    ComputerThinking,
    /// The game ended.
    GameOver(Alert),
    /// The board was cleared.
    Reset,
}

/// Everything a renderer needs, captured under one lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// The board.
    pub board: Board,
    /// True while human input is disabled.
    pub locked: bool,
    /// Where the game stands.
    pub phase: Phase,
    /// Terminal outcome announcement, if the game is over.
    pub alert: Option<Alert>,
    /// Moves in play order.
    pub history: Vec<Move>,
}

struct SessionState {
    engine: GameEngine,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
}

impl SessionState {
    fn publish(&mut self, event: GameEvent) {
        debug!(?event, subscribers = self.subscribers.len(), "Publishing event");
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            debug!("Aborting pending computer move");
            handle.abort();
        }
    }
}

/// A single human-vs-computer game with a paced computer reply.
///
/// Cloning yields another handle to the same game.
#[derive(Clone)]
pub struct GameSession {
    shared: Arc<Mutex<SessionState>>,
    thinking_delay: Duration,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("thinking_delay", &self.thinking_delay)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates a session around `engine`.
    #[instrument(skip(engine))]
    pub fn new(engine: GameEngine, thinking_delay: Duration) -> Self {
        info!(?thinking_delay, "Creating game session");
        Self {
            shared: Arc::new(Mutex::new(SessionState {
                engine,
                generation: 0,
                pending: None,
                subscribers: Vec::new(),
            })),
            thinking_delay,
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new observer. Events are delivered in the order they occur.
    #[instrument(skip(self))]
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state().subscribers.push(tx);
        rx
    }

    /// Current observable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();
        SessionSnapshot {
            board: state.engine.board().clone(),
            locked: state.engine.is_locked(),
            phase: state.engine.phase(),
            alert: state.engine.alert(),
            history: state.engine.history().to_vec(),
        }
    }

    /// True while a computer reply is scheduled.
    pub fn has_pending_move(&self) -> bool {
        self.state()
            .pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Handles the human choosing square `index`.
    ///
    /// Ignored moves change nothing and publish nothing. An accepted move
    /// that does not end the game schedules the computer's reply. Must be
    /// called from within a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..9`.
    #[instrument(skip(self))]
    pub fn process_player_move(&self, index: usize) -> MoveStatus {
        let mut state = self.state();
        let status = state.engine.process_player_move(index);

        let MoveStatus::Accepted { position, phase } = status else {
            return status;
        };

        state.publish(GameEvent::MoveMade(Move::new(Player::Human, position)));

        if phase == Phase::AwaitingComputer {
            state.publish(GameEvent::ComputerThinking);
            self.schedule_computer_move(&mut state);
        } else if let Some(alert) = state.engine.alert() {
            info!(%phase, "Game over after human move");
            state.publish(GameEvent::GameOver(alert));
        }

        status
    }

    fn schedule_computer_move(&self, state: &mut SessionState) {
        state.cancel_pending();

        let generation = state.generation;
        let shared = Arc::clone(&self.shared);
        let delay = self.thinking_delay;

        debug!(generation, ?delay, "Scheduling computer move");
        state.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            play_scheduled_reply(&shared, generation);
        }));
    }

    /// Clears the board, unlocks it and drops any pending computer move.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        let mut state = self.state();
        state.generation += 1;
        state.cancel_pending();
        state.engine.reset();
        state.publish(GameEvent::Reset);
    }
}

/// Plays the computer reply scheduled under `generation`.
///
/// Returns `None` without touching the game if a reset has happened since.
fn play_scheduled_reply(shared: &Mutex<SessionState>, generation: u64) -> Option<Move> {
    let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
    if state.generation != generation {
        debug!(generation, current = state.generation, "Discarding stale computer move");
        return None;
    }
    state.pending = None;

    let reply = state.engine.apply_computer_move()?;
    state.publish(GameEvent::MoveMade(reply));

    if let Some(alert) = state.engine.alert() {
        info!(phase = %state.engine.phase(), "Game over after computer move");
        state.publish(GameEvent::GameOver(alert));
    }
    Some(reply)
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameEngine::new(), DEFAULT_THINKING_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Square};

    #[tokio::test(start_paused = true)]
    async fn test_reply_from_before_reset_is_discarded() {
        let session = GameSession::new(GameEngine::with_seed(3), Duration::from_secs(60));
        session.process_player_move(0);
        let stale = session.state().generation;

        session.reset();
        session.process_player_move(8);
        let mut rx = session.subscribe();

        assert_eq!(play_scheduled_reply(&session.shared, stale), None);

        let snapshot = session.snapshot();
        assert!(snapshot.locked);
        assert_eq!(snapshot.history, vec![Move::new(Player::Human, Position::BottomRight)]);
        assert_eq!(snapshot.board.get(Position::TopLeft), Square::Empty);
        assert!(rx.try_recv().is_err());
        assert!(session.has_pending_move());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_for_current_generation_is_played() {
        let session = GameSession::new(GameEngine::with_seed(3), Duration::from_secs(60));
        session.process_player_move(0);
        let current = session.state().generation;

        let reply = play_scheduled_reply(&session.shared, current);
        assert_eq!(reply, Some(Move::new(Player::Computer, Position::Center)));
        assert!(!session.snapshot().locked);
        assert!(!session.has_pending_move());
    }
}
