//! Stage bounds invariant: the index addresses a real stage until the hunt ends.

use super::Invariant;
use crate::QuizSession;

/// Invariant: `current_stage < stage_count` unless the hunt is completed.
///
/// A completed session stays on the last index.
pub struct StageBoundsInvariant;

impl<R> Invariant<QuizSession<R>> for StageBoundsInvariant {
    fn holds(session: &QuizSession<R>) -> bool {
        let count = session.stage_count();
        if session.is_completed() {
            session.current_stage_index() + 1 == count
        } else {
            session.current_stage_index() < count
        }
    }

    fn description() -> &'static str {
        "Stage index stays within the hunt"
    }
}
