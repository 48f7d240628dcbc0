//! Error types for the hunt.

use crate::types::Phase;
use derive_more::{Display, Error};
use tracing::instrument;

/// Error raised by a hunt transition.
///
/// Wrong answers are not errors; they produce [`crate::Feedback::Incorrect`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum HuntError {
    /// An index addressed past the end of a collection.
    #[display("Index {} out of range for {} {}", index, len, collection)]
    InvalidArgument {
        /// What was indexed ("tiles", "options").
        collection: &'static str,
        /// The offending index.
        index: usize,
        /// Length of the collection.
        len: usize,
    },

    /// A transition was invoked outside the stage it belongs to.
    #[display("{} is not valid on the {}", operation, phase)]
    IllegalState {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Where the session was when it was rejected.
        phase: Phase,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// The hunt configuration is unusable.
    #[display("{}", _0)]
    Config(ConfigError),
}

impl std::error::Error for HuntError {}

impl From<ConfigError> for HuntError {
    fn from(err: ConfigError) -> Self {
        HuntError::Config(err)
    }
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
