//! Quiz progression: the session that walks a player through the hunt.

use crate::action::{HuntAction, Progress};
use crate::config::HuntConfig;
#[cfg(debug_assertions)]
use crate::contracts::Checkpoint;
use crate::contracts::{ActionContract, Contract};
use crate::error::{ConfigError, HuntError};
use crate::puzzle::PuzzleState;
use crate::snapshot::{SessionSnapshot, TileView};
use crate::stage::{AnswerKey, Stage, answers_match};
use crate::types::{Feedback, Phase, Rotation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

/// One player's run through a hunt.
///
/// States are `Stage 0 .. Stage n-1` and `Completed`. The only forward edge is
/// [`QuizSession::advance`] with the ready gate open; there are no backward
/// edges. Transitions called on the wrong stage fail with
/// [`HuntError::IllegalState`] and change nothing, except `advance`, which is
/// a no-op while the gate is closed.
#[derive(Debug, Clone)]
pub struct QuizSession<R = StdRng> {
    pub(crate) config: HuntConfig,
    pub(crate) current_stage: usize,
    pub(crate) user_input: String,
    pub(crate) feedback: Feedback,
    pub(crate) advance_ready: bool,
    pub(crate) completed: bool,
    pub(crate) puzzle: Option<PuzzleState>,
    pub(crate) attempts: usize,
    pub(crate) history: Vec<HuntAction>,
    rng: R,
}

impl QuizSession<StdRng> {
    /// Starts a session whose puzzle scrambles are fixed by `seed`.
    #[instrument(skip(config))]
    pub fn seeded(config: HuntConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizSession<R> {
    /// Starts a session on the first stage.
    ///
    /// `rng` scrambles every puzzle this session enters.
    #[instrument(skip(config, rng), fields(title = %config.title()))]
    pub fn new(config: HuntConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut session = Self {
            config,
            current_stage: 0,
            user_input: String::new(),
            feedback: Feedback::None,
            advance_ready: false,
            completed: false,
            puzzle: None,
            attempts: 0,
            history: Vec::new(),
            rng,
        };
        session
            .enter_stage()
            .map_err(|e| ConfigError::new(format!("Failed to enter first stage: {}", e)))?;

        info!(stages = session.stage_count(), "Hunt started");
        Ok(session)
    }

    /// Rebuilds a session by replaying an action log.
    #[instrument(skip(config, rng, actions), fields(actions = actions.len()))]
    pub fn replay(config: HuntConfig, rng: R, actions: &[HuntAction]) -> Result<Self, HuntError> {
        let mut session = Self::new(config, rng)?;
        for action in actions {
            session.apply(action.clone())?;
        }
        Ok(session)
    }

    /// Applies a first-class action.
    #[instrument(skip(self), fields(stage = self.current_stage))]
    pub fn apply(&mut self, action: HuntAction) -> Result<(), HuntError> {
        match action {
            HuntAction::SubmitText { input } => self.submit_text_answer(&input).map(drop),
            HuntAction::SelectChoice { index } => self.select_choice(index).map(drop),
            HuntAction::RotateTile { tile } => self.rotate_tile(tile).map(drop),
            HuntAction::CheckPuzzle => self.check_puzzle().map(drop),
            HuntAction::PuzzleSolved => self.notify_puzzle_solved().map(drop),
            HuntAction::Advance => self.advance().map(drop),
        }
    }

    /// Submits a free-text answer on a text stage.
    ///
    /// Surrounding whitespace and letter case are ignored.
    #[instrument(skip(self))]
    pub fn submit_text_answer(&mut self, input: &str) -> Result<Feedback, HuntError> {
        let action = HuntAction::SubmitText {
            input: input.to_string(),
        };
        self.guarded(action, |session| {
            session.user_input = input.to_string();
            session.attempts += 1;
            let correct = matches!(
                session.current_stage().map(Stage::answer),
                Some(AnswerKey::Text { expected }) if answers_match(expected, input)
            );
            Ok(session.judge(correct))
        })
    }

    /// Picks an image option (0-based) on a choice stage.
    #[instrument(skip(self))]
    pub fn select_choice(&mut self, choice_index: usize) -> Result<Feedback, HuntError> {
        let action = HuntAction::SelectChoice {
            index: choice_index,
        };
        self.guarded(action, |session| {
            session.attempts += 1;
            let correct = matches!(
                session.current_stage().map(Stage::answer),
                Some(AnswerKey::Choice { correct, .. }) if *correct == choice_index
            );
            Ok(session.judge(correct))
        })
    }

    /// Marks the puzzle stage as solved.
    #[instrument(skip(self))]
    pub fn notify_puzzle_solved(&mut self) -> Result<Feedback, HuntError> {
        self.guarded(HuntAction::PuzzleSolved, |session| {
            info!("Puzzle solved");
            Ok(session.judge(true))
        })
    }

    /// Turns one puzzle tile a quarter turn clockwise.
    ///
    /// Completing the puzzle this way solves the stage. Turning a tile after
    /// that leaves the gate open; only a failing [`QuizSession::check_puzzle`]
    /// closes it again.
    #[instrument(skip(self))]
    pub fn rotate_tile(&mut self, tile_index: usize) -> Result<Rotation, HuntError> {
        let action = HuntAction::RotateTile { tile: tile_index };
        self.guarded(action, |session| {
            let puzzle = session.puzzle.as_mut().ok_or_else(|| {
                HuntError::InvariantViolation("puzzle stage has no live puzzle".to_string())
            })?;
            let rotation = puzzle.rotate(tile_index)?;
            if puzzle.is_complete() {
                info!(rotations = puzzle.rotations_made(), "Puzzle solved");
                session.judge(true);
            }
            Ok(rotation)
        })
    }

    /// Checks the puzzle and reports the result as feedback.
    #[instrument(skip(self))]
    pub fn check_puzzle(&mut self) -> Result<Feedback, HuntError> {
        self.guarded(HuntAction::CheckPuzzle, |session| {
            session.attempts += 1;
            let complete = session.puzzle.as_ref().is_some_and(PuzzleState::is_complete);
            Ok(session.judge(complete))
        })
    }

    /// Moves to the next stage, or completes the hunt from the last one.
    ///
    /// Does nothing and returns [`Progress::Held`] while the gate is closed.
    /// Held advances are not recorded in the history.
    #[instrument(skip(self), fields(stage = self.current_stage))]
    pub fn advance(&mut self) -> Result<Progress, HuntError> {
        if !self.advance_ready {
            debug!("Advance ignored, gate closed");
            return Ok(Progress::Held);
        }

        self.guarded(HuntAction::Advance, |session| {
            session.user_input.clear();
            session.feedback = Feedback::None;
            session.advance_ready = false;
            session.attempts = 0;
            session.puzzle = None;

            if session.current_stage + 1 >= session.stage_count() {
                session.completed = true;
                info!("Hunt completed");
                return Ok(Progress::Completed);
            }

            session.current_stage += 1;
            session.enter_stage()?;
            info!(stage = session.current_stage, "Advanced");
            Ok(Progress::Moved(session.current_stage))
        })
    }

    /// Runs a transition under the action contract and records it.
    fn guarded<T>(
        &mut self,
        action: HuntAction,
        transition: impl FnOnce(&mut Self) -> Result<T, HuntError>,
    ) -> Result<T, HuntError> {
        ActionContract::pre(self, &action)?;

        #[cfg(debug_assertions)]
        let before = Checkpoint::of(self);

        let out = transition(self)?;

        #[cfg(debug_assertions)]
        ActionContract::post(&before, self)?;

        debug!(%action, feedback = ?self.feedback, ready = self.advance_ready, "Action applied");
        self.history.push(action);
        Ok(out)
    }

    /// Builds the live puzzle if the current stage needs one.
    fn enter_stage(&mut self) -> Result<(), HuntError> {
        if let Some(AnswerKey::Puzzle(manifest)) =
            self.config.stages().get(self.current_stage).map(Stage::answer)
        {
            self.puzzle = Some(PuzzleState::from_manifest(manifest, &mut self.rng)?);
        }
        Ok(())
    }
}

impl<R> QuizSession<R> {
    fn judge(&mut self, correct: bool) -> Feedback {
        self.feedback = Feedback::judged(correct);
        self.advance_ready = correct;
        self.feedback
    }

    /// The hunt definition.
    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    /// Number of stages in the hunt.
    pub fn stage_count(&self) -> usize {
        self.config.stage_count()
    }

    /// Index of the active stage (the last one once completed).
    pub fn current_stage_index(&self) -> usize {
        self.current_stage
    }

    /// The active stage, or `None` once the hunt is completed.
    pub fn current_stage(&self) -> Option<&Stage> {
        if self.completed {
            None
        } else {
            self.config.stages().get(self.current_stage)
        }
    }

    /// Where the session is.
    pub fn phase(&self) -> Phase {
        match self.current_stage() {
            Some(stage) => Phase::Stage(stage.kind()),
            None => Phase::Completed,
        }
    }

    /// Last text submitted on this stage.
    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    /// Result of the last attempt on this stage.
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    /// User-facing copy for the current feedback.
    pub fn feedback_message(&self) -> Option<&'static str> {
        let kind = self.current_stage()?.kind();
        self.feedback.message(kind)
    }

    /// Returns true if `advance` will move on.
    pub fn is_advance_ready(&self) -> bool {
        self.advance_ready
    }

    /// Returns true once the last stage has been left.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The live puzzle on a puzzle stage.
    pub fn puzzle(&self) -> Option<&PuzzleState> {
        self.puzzle.as_ref()
    }

    /// Attempts made on the current stage.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Every action applied so far, in order, minus held advances.
    pub fn history(&self) -> &[HuntAction] {
        &self.history
    }

    /// Everything a presentation layer reads back.
    pub fn snapshot(&self) -> SessionSnapshot {
        let stage = self.current_stage();
        SessionSnapshot {
            stage_index: self.current_stage,
            stage_count: self.stage_count(),
            kind: stage.map(Stage::kind),
            prompt: stage.map(|s| s.prompt().clone()),
            user_input: self.user_input.clone(),
            feedback: self.feedback,
            feedback_message: self.feedback_message(),
            advance_ready: self.advance_ready,
            completed: self.completed,
            attempts: self.attempts,
            tiles: self
                .puzzle
                .iter()
                .flat_map(PuzzleState::tiles)
                .map(TileView::from)
                .collect(),
        }
    }
}
