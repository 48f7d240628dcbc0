//! Core value types shared by the session and the puzzle.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Kind of answer a stage expects.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StageKind {
    /// Free-text answer compared case-insensitively.
    Text,
    /// Pick one of several image options.
    Choice,
    /// Solved by completing the rotate puzzle.
    Puzzle,
}

/// Where the session currently is in the hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum Phase {
    /// On a stage of the given kind.
    #[display("{} stage", _0)]
    Stage(StageKind),
    /// Past the last stage.
    #[display("completed hunt")]
    Completed,
}

/// Result indicator shown after an answer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// Nothing attempted on this stage yet.
    #[default]
    None,
    /// Last attempt was right.
    Correct,
    /// Last attempt was wrong.
    Incorrect,
}

impl Feedback {
    /// Creates feedback from a pass/fail check.
    pub fn judged(correct: bool) -> Self {
        if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    }

    /// User-facing copy for this feedback on a stage of `kind`.
    pub fn message(self, kind: StageKind) -> Option<&'static str> {
        match (self, kind) {
            (Feedback::None, _) => None,
            (Feedback::Correct, StageKind::Puzzle) => {
                Some("Congratulations! You have solved the puzzle!")
            }
            (Feedback::Correct, _) => Some("Correct!"),
            (Feedback::Incorrect, StageKind::Text) => Some("Incorrect, try again!"),
            (Feedback::Incorrect, StageKind::Choice) => Some("Incorrect choice! Try again."),
            (Feedback::Incorrect, StageKind::Puzzle) => Some("Try again!"),
        }
    }
}

/// Orientation of a puzzle tile in quarter turns.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Rotation {
    /// 0 degrees (solved orientation).
    #[default]
    #[strum(to_string = "0°")]
    Upright,
    /// 90 degrees clockwise.
    #[strum(to_string = "90°")]
    Quarter,
    /// 180 degrees.
    #[strum(to_string = "180°")]
    Half,
    /// 270 degrees clockwise.
    #[strum(to_string = "270°")]
    ThreeQuarter,
}

impl Rotation {
    /// All four orientations in clockwise order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Upright,
        Rotation::Quarter,
        Rotation::Half,
        Rotation::ThreeQuarter,
    ];

    /// Rotation in degrees (0, 90, 180 or 270).
    pub fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    /// Number of clockwise quarter turns from upright.
    pub fn quarter_turns(self) -> usize {
        match self {
            Rotation::Upright => 0,
            Rotation::Quarter => 1,
            Rotation::Half => 2,
            Rotation::ThreeQuarter => 3,
        }
    }

    /// Parses a multiple of 90 in `0..360`.
    #[instrument]
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Upright),
            90 => Some(Rotation::Quarter),
            180 => Some(Rotation::Half),
            270 => Some(Rotation::ThreeQuarter),
            _ => None,
        }
    }

    /// The orientation after one more clockwise quarter turn.
    pub fn next(self) -> Self {
        Self::ALL[(self.quarter_turns() + 1) % Self::ALL.len()]
    }

    /// Quarter turns still needed to reach upright.
    pub fn turns_to_upright(self) -> usize {
        (Self::ALL.len() - self.quarter_turns()) % Self::ALL.len()
    }

    /// Draws an orientation uniformly from the four options.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}
