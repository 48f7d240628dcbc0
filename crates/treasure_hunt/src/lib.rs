//! Treasure hunt core - pure quiz progression and rotate-puzzle logic
//!
//! A hunt is a fixed sequence of stages. Each stage is answered by text, by
//! picking an image option, or by solving a rotate-to-solve puzzle grid.
//!
//! # Architecture
//!
//! - **Config**: static stage definitions, loaded from TOML
//! - **Session**: the progression state machine and its transitions
//! - **Puzzle**: the tile grid owned by a puzzle stage
//! - **Contracts/Invariants**: pre/postconditions checked on every transition
//!
//! # Example
//!
//! ```
//! use treasure_hunt::{Feedback, HuntConfig, Progress, QuizSession};
//!
//! let mut session = QuizSession::seeded(HuntConfig::builtin(), 7).unwrap();
//! assert_eq!(session.submit_text_answer("  1998 ").unwrap(), Feedback::Correct);
//! assert_eq!(session.advance().unwrap(), Progress::Moved(1));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod config;
mod error;
mod puzzle;
mod session;
mod snapshot;
mod stage;
mod types;

// Public module declarations
pub mod contracts;
pub mod invariants;

// Crate-level exports - Actions
pub use action::{HuntAction, Progress};

// Crate-level exports - Configuration
pub use config::HuntConfig;
pub use stage::{AnswerKey, ChoiceOption, PuzzleManifest, Stage, answers_match, normalize_answer};

// Crate-level exports - Errors
pub use error::{ConfigError, HuntError};

// Crate-level exports - Session and puzzle
pub use puzzle::{PuzzleState, PuzzleTile};
pub use session::QuizSession;
pub use snapshot::{SessionSnapshot, TileView};

// Crate-level exports - Value types
pub use types::{Feedback, Phase, Rotation, StageKind};
