//! Game phases, outcomes and the alerts shown when a game ends.

use serde::{Deserialize, Serialize};

/// Result of evaluating a board. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// No winner and at least one empty square.
    InProgress,
    /// The human holds a full line.
    HumanWin,
    /// The computer holds a full line.
    ComputerWin,
    /// Full board, no line.
    Draw,
}

impl GameOutcome {
    /// Returns true for every outcome except `InProgress`.
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::InProgress
    }

    /// The alert announcing this outcome, if the game is over.
    pub fn alert(self) -> Option<Alert> {
        match self {
            GameOutcome::InProgress => None,
            GameOutcome::HumanWin => Some(Alert::HUMAN_WINS),
            GameOutcome::ComputerWin => Some(Alert::COMPUTER_WINS),
            GameOutcome::Draw => Some(Alert::DRAW),
        }
    }
}

/// Where a game session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Phase {
    /// Waiting for the human to pick a square.
    #[display("Your turn")]
    AwaitingHuman,
    /// Board locked while the computer "thinks".
    #[display("Computer is thinking...")]
    AwaitingComputer,
    /// The human completed a line.
    #[display("You won")]
    HumanWon,
    /// The computer completed a line.
    #[display("Computer won")]
    ComputerWon,
    /// Full board, no line.
    #[display("Draw")]
    Draw,
}

impl Phase {
    /// Returns true once the game has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::HumanWon | Phase::ComputerWon | Phase::Draw)
    }
}

/// Title, message and button label announcing a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Alert {
    /// Headline.
    pub title: &'static str,
    /// Body text.
    pub message: &'static str,
    /// Label of the acknowledgment button, which restarts the game.
    pub button_label: &'static str,
}

impl Alert {
    /// Shown when the human wins.
    pub const HUMAN_WINS: Alert = Alert {
        title: "You Win!",
        message: "You are so smart. You beat your own AI.",
        button_label: "Hell Yeah",
    };

    /// Shown when the computer wins.
    pub const COMPUTER_WINS: Alert = Alert {
        title: "You Lost",
        message: "You programmed a super AI.",
        button_label: "Rematch",
    };

    /// Shown on a draw.
    pub const DRAW: Alert = Alert {
        title: "Draw",
        message: "What a battle...",
        button_label: "Try Again",
    };
}
