//! Contract-based validation for hunt transitions.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(session, action)} action {Q(before, after)}

use crate::action::HuntAction;
use crate::error::HuntError;
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::session::QuizSession;
use crate::stage::AnswerKey;
use crate::types::Phase;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), HuntError>;

    /// Checks postconditions after applying the action.
    fn post(before: &Checkpoint, after: &S) -> Result<(), HuntError>;
}

/// Progress markers captured before a transition.
///
/// Enough to check that the session never moved backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    stage: usize,
    completed: bool,
}

impl Checkpoint {
    /// Captures the progress of `session`.
    pub fn of<R>(session: &QuizSession<R>) -> Self {
        Self {
            stage: session.current_stage_index(),
            completed: session.is_completed(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Action Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the action belongs to the current stage.
pub struct StageAccepts;

impl StageAccepts {
    /// Fails with `IllegalState` unless the session is on the action's stage kind.
    #[instrument(skip(session))]
    pub fn check<R>(action: &HuntAction, session: &QuizSession<R>) -> Result<(), HuntError> {
        let Some(required) = action.required_kind() else {
            return Ok(());
        };

        let phase = session.phase();
        if phase == Phase::Stage(required) {
            Ok(())
        } else {
            Err(HuntError::IllegalState {
                operation: action.name(),
                phase,
            })
        }
    }
}

/// Precondition: any index carried by the action addresses something real.
pub struct IndexInRange;

impl IndexInRange {
    /// Fails with `InvalidArgument` for an option or tile index past the end.
    #[instrument(skip(session))]
    pub fn check<R>(action: &HuntAction, session: &QuizSession<R>) -> Result<(), HuntError> {
        match action {
            HuntAction::SelectChoice { index } => {
                let len = match session.current_stage().map(|s| s.answer()) {
                    Some(AnswerKey::Choice { options, .. }) => options.len(),
                    _ => 0,
                };
                if *index < len {
                    Ok(())
                } else {
                    Err(HuntError::InvalidArgument {
                        collection: "options",
                        index: *index,
                        len,
                    })
                }
            }
            HuntAction::RotateTile { tile } => {
                let puzzle = session.puzzle().ok_or_else(|| {
                    HuntError::InvariantViolation("puzzle stage has no live puzzle".to_string())
                })?;
                if *tile < puzzle.len() {
                    Ok(())
                } else {
                    Err(HuntError::InvalidArgument {
                        collection: "tiles",
                        index: *tile,
                        len: puzzle.len(),
                    })
                }
            }
            _ => Ok(()),
        }
    }
}

/// Composite precondition: right stage, valid index.
pub struct LegalAction;

impl LegalAction {
    /// Validates all preconditions for an action.
    #[instrument(skip(session))]
    pub fn check<R>(action: &HuntAction, session: &QuizSession<R>) -> Result<(), HuntError> {
        StageAccepts::check(action, session)?;
        IndexInRange::check(action, session)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Action Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for hunt actions.
///
/// Preconditions:
/// - Action matches the current stage
/// - Indices are in range
///
/// Postconditions:
/// - Session invariants hold
/// - Progress never goes backwards
pub struct ActionContract;

impl<R> Contract<QuizSession<R>, HuntAction> for ActionContract {
    fn pre(session: &QuizSession<R>, action: &HuntAction) -> Result<(), HuntError> {
        LegalAction::check(action, session)
    }

    fn post(before: &Checkpoint, after: &QuizSession<R>) -> Result<(), HuntError> {
        SessionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            HuntError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let now = Checkpoint::of(after);
        if now.stage < before.stage || (before.completed && !now.completed) {
            warn!(?before, ?now, "Session moved backwards");
            return Err(HuntError::InvariantViolation(
                "Postcondition failed: progress moved backwards".to_string(),
            ));
        }
        Ok(())
    }
}
