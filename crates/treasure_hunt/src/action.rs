//! First-class action types for the hunt.
//!
//! Every input from the presentation layer is a domain event. Actions can be
//! validated before they run, logged, and replayed to rebuild a session.

use crate::types::StageKind;
use serde::{Deserialize, Serialize};

/// One input applied to a [`crate::QuizSession`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HuntAction {
    /// Submit a free-text answer.
    SubmitText {
        /// Raw input as typed.
        input: String,
    },
    /// Pick an image option (0-based).
    SelectChoice {
        /// Option index.
        index: usize,
    },
    /// Turn a puzzle tile a quarter turn (0-based).
    RotateTile {
        /// Tile index.
        tile: usize,
    },
    /// Ask whether the puzzle is solved.
    CheckPuzzle,
    /// Mark the puzzle as solved.
    PuzzleSolved,
    /// Move on to the next stage.
    Advance,
}

impl HuntAction {
    /// Operation name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            HuntAction::SubmitText { .. } => "submit_text_answer",
            HuntAction::SelectChoice { .. } => "select_choice",
            HuntAction::RotateTile { .. } => "rotate_tile",
            HuntAction::CheckPuzzle => "check_puzzle",
            HuntAction::PuzzleSolved => "notify_puzzle_solved",
            HuntAction::Advance => "advance",
        }
    }

    /// Stage kind the action is valid on; `None` means any stage.
    pub fn required_kind(&self) -> Option<StageKind> {
        match self {
            HuntAction::SubmitText { .. } => Some(StageKind::Text),
            HuntAction::SelectChoice { .. } => Some(StageKind::Choice),
            HuntAction::RotateTile { .. }
            | HuntAction::CheckPuzzle
            | HuntAction::PuzzleSolved => Some(StageKind::Puzzle),
            HuntAction::Advance => None,
        }
    }
}

impl std::fmt::Display for HuntAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HuntAction::SubmitText { input } => write!(f, "answer {:?}", input),
            HuntAction::SelectChoice { index } => write!(f, "choose option {}", index),
            HuntAction::RotateTile { tile } => write!(f, "rotate tile {}", tile),
            HuntAction::CheckPuzzle => write!(f, "check puzzle"),
            HuntAction::PuzzleSolved => write!(f, "puzzle solved"),
            HuntAction::Advance => write!(f, "advance"),
        }
    }
}

/// What [`crate::QuizSession::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Progress {
    /// Not ready to advance; nothing changed.
    Held,
    /// Moved to the stage at this index.
    Moved(usize),
    /// Left the last stage; the hunt is over.
    Completed,
}
