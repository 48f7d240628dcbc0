//! Puzzle presence invariant: a live puzzle exists exactly on puzzle stages.

use super::Invariant;
use crate::{QuizSession, StageKind};

/// Invariant: the session holds a puzzle iff it is on an unfinished puzzle stage.
///
/// Tiles are created on entering the stage and dropped on leaving it.
pub struct PuzzlePresenceInvariant;

impl<R> Invariant<QuizSession<R>> for PuzzlePresenceInvariant {
    fn holds(session: &QuizSession<R>) -> bool {
        let on_puzzle = !session.is_completed()
            && session.current_stage().map(|s| s.kind()) == Some(StageKind::Puzzle);
        on_puzzle == session.puzzle().is_some()
    }

    fn description() -> &'static str {
        "Puzzle exists only while on a puzzle stage"
    }
}
