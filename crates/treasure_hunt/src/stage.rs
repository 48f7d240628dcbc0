//! Stage definitions: the immutable clues a hunt walks through.

use crate::types::StageKind;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One clue of the hunt.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct Stage {
    /// Clue text shown to the player.
    prompt: String,
    /// How the clue is answered.
    answer: AnswerKey,
}

impl Stage {
    /// Returns the kind of answer this stage expects.
    pub fn kind(&self) -> StageKind {
        self.answer.kind()
    }
}

/// Expected answer of a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerKey {
    /// Exact string, compared after trimming and case-folding.
    Text {
        /// The accepted answer.
        expected: String,
    },
    /// One correct option among several.
    Choice {
        /// Index of the correct option.
        correct: usize,
        /// Options in display order.
        options: Vec<ChoiceOption>,
    },
    /// Solved by the rotate puzzle.
    Puzzle(PuzzleManifest),
}

impl AnswerKey {
    /// Returns the stage kind this key belongs to.
    pub fn kind(&self) -> StageKind {
        match self {
            AnswerKey::Text { .. } => StageKind::Text,
            AnswerKey::Choice { .. } => StageKind::Choice,
            AnswerKey::Puzzle(_) => StageKind::Puzzle,
        }
    }
}

/// One selectable image option.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct ChoiceOption {
    /// Short description ("Alphabet logo").
    label: String,
    /// Asset identifier of the image.
    asset: String,
}

/// Static list of tile assets for a puzzle stage.
///
/// Tiles are listed in row-major target order, so tile `i` belongs in
/// grid slot `i`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct PuzzleManifest {
    /// Number of grid columns.
    columns: usize,
    /// Tile asset identifiers.
    tiles: Vec<String>,
}

impl PuzzleManifest {
    /// Number of tiles in the manifest.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true if the manifest has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Normalizes a text answer: trims surrounding whitespace and lowercases.
///
/// Internal whitespace and punctuation are kept as-is.
#[instrument]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Returns true if `input` matches `expected` after normalization.
#[instrument]
pub fn answers_match(expected: &str, input: &str) -> bool {
    normalize_answer(expected) == normalize_answer(input)
}
