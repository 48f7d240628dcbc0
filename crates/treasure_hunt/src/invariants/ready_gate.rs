//! Ready gate invariant: the session only offers "next" after a correct answer.

use super::Invariant;
use crate::{Feedback, QuizSession};

/// Invariant: `advance_ready` implies the current feedback is correct.
pub struct ReadyGateInvariant;

impl<R> Invariant<QuizSession<R>> for ReadyGateInvariant {
    fn holds(session: &QuizSession<R>) -> bool {
        !session.is_advance_ready() || session.feedback() == Feedback::Correct
    }

    fn description() -> &'static str {
        "Advance is only offered after a correct answer"
    }
}
