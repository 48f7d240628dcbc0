//! Read-only view of a session for presentation layers.

use crate::puzzle::PuzzleTile;
use crate::types::{Feedback, StageKind};
use serde::Serialize;

/// Everything a presentation layer reads back from a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Index of the active stage.
    pub stage_index: usize,
    /// Number of stages in the hunt.
    pub stage_count: usize,
    /// Kind of the active stage (`None` once completed).
    pub kind: Option<StageKind>,
    /// Clue text of the active stage.
    pub prompt: Option<String>,
    /// Last submitted text.
    pub user_input: String,
    /// Result of the last attempt.
    pub feedback: Feedback,
    /// Copy for `feedback`.
    pub feedback_message: Option<&'static str>,
    /// Whether "next" is offered.
    pub advance_ready: bool,
    /// Whether the hunt is over.
    pub completed: bool,
    /// Attempts on the active stage.
    pub attempts: usize,
    /// Puzzle tiles in slot order (empty off the puzzle stage).
    pub tiles: Vec<TileView>,
}

/// One puzzle tile as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileView {
    /// Slot the tile belongs in.
    pub target_position: usize,
    /// Slot the tile occupies.
    pub position: usize,
    /// Rotation in degrees.
    pub rotation_degrees: u16,
    /// Manifest asset identifier.
    pub asset: Option<String>,
}

impl From<&PuzzleTile> for TileView {
    fn from(tile: &PuzzleTile) -> Self {
        Self {
            target_position: tile.target_position(),
            position: tile.position(),
            rotation_degrees: tile.rotation().degrees(),
            asset: tile.asset().map(str::to_string),
        }
    }
}
