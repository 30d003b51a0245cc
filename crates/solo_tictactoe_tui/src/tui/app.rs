//! Application state and logic.

use super::input::{self, Command};
use crossterm::event::KeyCode;
use solo_tictactoe::session::SessionSnapshot;
use solo_tictactoe::{GameEvent, GameSession, MoveStatus, Phase, Position};
use tracing::{debug, info, instrument};

/// Main application state.
pub struct App {
    session: GameSession,
    snapshot: SessionSnapshot,
    cursor: Position,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application around `session`.
    pub fn new(session: GameSession) -> Self {
        let snapshot = session.snapshot();
        Self {
            session,
            snapshot,
            cursor: Position::Center,
            status_message: "Your turn. Use 1-9 or arrows + Enter.".to_string(),
            should_quit: false,
        }
    }

    /// Last observed session state.
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// Square under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Re-reads the session state.
    pub fn refresh(&mut self) {
        self.snapshot = self.session.snapshot();
    }

    /// Handles a game event from the session.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::MoveMade(mv) => {
                self.status_message = format!("{} played {}", mv.player, mv.position.label());
            }
            GameEvent::ComputerThinking => {
                self.status_message = Phase::AwaitingComputer.to_string();
            }
            GameEvent::GameOver(alert) => {
                self.status_message = format!(
                    "{} Press Enter ({}) to play again, 'q' to quit.",
                    alert.title, alert.button_label
                );
            }
            GameEvent::Reset => {
                self.status_message = "New game. Your turn.".to_string();
            }
        }
        self.refresh();
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        let Some(command) = input::command_for(key) else {
            return;
        };

        match command {
            Command::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
            Command::Restart => self.session.reset(),
            Command::Navigate(key) => self.cursor = input::move_cursor(self.cursor, key),
            Command::Confirm if self.snapshot.alert.is_some() => {
                debug!("Alert acknowledged");
                self.session.reset();
            }
            Command::Confirm => self.play(self.cursor),
            Command::Play(position) => {
                self.cursor = position;
                self.play(position);
            }
        }
        self.refresh();
    }

    fn play(&mut self, position: Position) {
        if self.session.process_player_move(position.to_index()) == MoveStatus::Ignored {
            debug!(%position, "Move ignored");
        }
    }
}
