//! Tests for quiz progression.

use rand::SeedableRng;
use treasure_hunt::{
    AnswerKey, ChoiceOption, Feedback, HuntAction, HuntConfig, HuntError, Phase, Progress,
    PuzzleManifest, QuizSession, Stage, StageKind,
};

fn text_stage(prompt: &str, expected: &str) -> Stage {
    Stage::new(
        prompt.to_string(),
        AnswerKey::Text {
            expected: expected.to_string(),
        },
    )
}

/// Text stage, choice stage (index 0 correct), 2x2 puzzle stage.
fn scenario_config() -> HuntConfig {
    HuntConfig::new(
        "Scenario",
        vec![
            text_stage("Founding year?", "1998"),
            Stage::new(
                "Parent company?".to_string(),
                AnswerKey::Choice {
                    options: vec![
                        ChoiceOption::new("Alphabet".to_string(), "alphabet.png".to_string()),
                        ChoiceOption::new("Google".to_string(), "google.png".to_string()),
                    ],
                    correct: 0,
                },
            ),
            Stage::new(
                "Solve it".to_string(),
                AnswerKey::Puzzle(PuzzleManifest::new(
                    2,
                    vec!["a".into(), "b".into(), "c".into(), "d".into()],
                )),
            ),
        ],
    )
    .expect("valid hunt")
}

#[test]
fn test_scenario_walkthrough() {
    let mut session = QuizSession::seeded(scenario_config(), 42).expect("valid hunt");
    assert_eq!(session.phase(), Phase::Stage(StageKind::Text));

    assert_eq!(session.submit_text_answer("1998").unwrap(), Feedback::Correct);
    assert!(session.is_advance_ready());
    assert_eq!(session.advance().unwrap(), Progress::Moved(1));
    assert_eq!(session.current_stage_index(), 1);

    assert_eq!(session.select_choice(1).unwrap(), Feedback::Incorrect);
    assert!(!session.is_advance_ready());
    assert_eq!(session.select_choice(0).unwrap(), Feedback::Correct);
    assert!(session.is_advance_ready());
    assert_eq!(session.advance().unwrap(), Progress::Moved(2));
    assert_eq!(session.current_stage_index(), 2);
    assert!(session.puzzle().is_some());

    assert_eq!(session.notify_puzzle_solved().unwrap(), Feedback::Correct);
    assert!(session.is_advance_ready());
    assert_eq!(session.advance().unwrap(), Progress::Completed);
    assert!(session.is_completed());
    assert_eq!(session.phase(), Phase::Completed);
}

#[test]
fn test_text_answer_ignores_case_and_surrounding_whitespace() {
    let config = HuntConfig::new("Case", vec![text_stage("Parent?", "Alphabet")]).unwrap();
    for input in ["Alphabet", "alphabet", "ALPHABET", "  aLpHaBeT\t", "\nalphabet \n"] {
        let mut session = QuizSession::seeded(config.clone(), 0).unwrap();
        assert_eq!(session.submit_text_answer(input).unwrap(), Feedback::Correct, "{input:?}");
        assert!(session.is_advance_ready());
        assert_eq!(session.user_input(), input);
    }
}

#[test]
fn test_non_matching_text_is_incorrect() {
    let config = HuntConfig::new("Miss", vec![text_stage("Year?", "1998")]).unwrap();
    let mut session = QuizSession::seeded(config, 0).unwrap();
    for input in ["1999", "", "19 98", "1998.", "nineteen ninety-eight"] {
        assert_eq!(session.submit_text_answer(input).unwrap(), Feedback::Incorrect, "{input:?}");
        assert!(!session.is_advance_ready());
        assert_eq!(session.feedback_message(), Some("Incorrect, try again!"));
    }
    assert_eq!(session.attempts(), 5);
}

#[test]
fn test_wrong_answer_after_right_one_closes_gate() {
    let mut session = QuizSession::seeded(HuntConfig::builtin(), 0).unwrap();
    session.submit_text_answer("1998").unwrap();
    assert!(session.is_advance_ready());
    session.submit_text_answer("2004").unwrap();
    assert!(!session.is_advance_ready());
    assert_eq!(session.advance().unwrap(), Progress::Held);
    assert_eq!(session.current_stage_index(), 0);
}

#[test]
fn test_repeated_identical_submissions_are_idempotent() {
    let mut session = QuizSession::seeded(HuntConfig::builtin(), 0).unwrap();
    session.submit_text_answer("1998").unwrap();
    let first = session.snapshot();
    session.submit_text_answer("1998").unwrap();
    let second = session.snapshot();
    assert_eq!(first.feedback, second.feedback);
    assert_eq!(first.advance_ready, second.advance_ready);
    assert_eq!(first.stage_index, second.stage_index);
    assert_eq!(first.user_input, second.user_input);
}

#[test]
fn test_advance_without_gate_is_noop() {
    let mut session = QuizSession::seeded(HuntConfig::builtin(), 0).unwrap();
    session.submit_text_answer("wrong").unwrap();
    let before = session.snapshot();

    assert_eq!(session.advance().unwrap(), Progress::Held);
    assert_eq!(session.advance().unwrap(), Progress::Held);

    let after = session.snapshot();
    assert_eq!(before, after);
}

#[test]
fn test_advance_clears_stage_state() {
    let mut session = QuizSession::seeded(HuntConfig::builtin(), 0).unwrap();
    session.submit_text_answer("nope").unwrap();
    session.submit_text_answer(" 1998 ").unwrap();
    session.advance().unwrap();

    assert_eq!(session.user_input(), "");
    assert_eq!(session.feedback(), Feedback::None);
    assert_eq!(session.feedback_message(), None);
    assert!(!session.is_advance_ready());
    assert_eq!(session.attempts(), 0);
}

#[test]
fn test_completes_exactly_after_stage_count_advances() {
    for stage_count in 1..=5 {
        let stages = (0..stage_count)
            .map(|i| text_stage(&format!("Q{i}"), &format!("a{i}")))
            .collect();
        let config = HuntConfig::new("Linear", stages).unwrap();
        let mut session = QuizSession::seeded(config, 0).unwrap();

        for i in 0..stage_count {
            assert!(!session.is_completed(), "completed early at {i}");
            session.submit_text_answer(&format!("A{i}")).unwrap();
            session.advance().unwrap();
        }
        assert!(session.is_completed());
        assert_eq!(session.current_stage_index(), stage_count - 1);
    }
}

#[test]
fn test_operations_on_wrong_stage_are_illegal() {
    let mut session = QuizSession::seeded(HuntConfig::builtin(), 0).unwrap();
    let before = session.snapshot();

    assert!(matches!(
        session.select_choice(0),
        Err(HuntError::IllegalState {
            operation: "select_choice",
            phase: Phase::Stage(StageKind::Text),
        })
    ));
    assert!(matches!(
        session.rotate_tile(0),
        Err(HuntError::IllegalState { .. })
    ));
    assert!(matches!(
        session.notify_puzzle_solved(),
        Err(HuntError::IllegalState { .. })
    ));
    assert!(matches!(
        session.check_puzzle(),
        Err(HuntError::IllegalState { .. })
    ));
    assert_eq!(session.snapshot(), before);
    assert!(session.history().is_empty());
}

#[test]
fn test_completed_hunt_rejects_answers() {
    let config = HuntConfig::new("One", vec![text_stage("Q", "a")]).unwrap();
    let mut session = QuizSession::seeded(config, 0).unwrap();
    session.submit_text_answer("a").unwrap();
    assert_eq!(session.advance().unwrap(), Progress::Completed);

    assert!(matches!(
        session.submit_text_answer("a"),
        Err(HuntError::IllegalState {
            phase: Phase::Completed,
            ..
        })
    ));
    // Terminal state has no outgoing edge
    assert_eq!(session.advance().unwrap(), Progress::Held);
    assert!(session.is_completed());
}

#[test]
fn test_choice_out_of_range_leaves_state_unchanged() {
    let mut session = QuizSession::seeded(HuntConfig::builtin(), 0).unwrap();
    session.submit_text_answer("1998").unwrap();
    session.advance().unwrap();
    session.select_choice(2).unwrap();
    let before = session.snapshot();

    let err = session.select_choice(7).unwrap_err();
    assert!(matches!(
        err,
        HuntError::InvalidArgument {
            collection: "options",
            index: 7,
            len: 3,
        }
    ));
    assert_eq!(err.to_string(), "Index 7 out of range for 3 options");
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_choice_feedback_messages() {
    let mut session = QuizSession::seeded(HuntConfig::builtin(), 0).unwrap();
    session.submit_text_answer("1998").unwrap();
    session.advance().unwrap();

    session.select_choice(1).unwrap();
    assert_eq!(session.feedback_message(), Some("Incorrect choice! Try again."));
    session.select_choice(0).unwrap();
    assert_eq!(session.feedback_message(), Some("Correct!"));
}

#[test]
fn test_held_advance_is_not_recorded() {
    let mut session = QuizSession::seeded(HuntConfig::builtin(), 5).unwrap();
    assert_eq!(session.advance().unwrap(), Progress::Held);
    assert!(session.history().is_empty());

    session.submit_text_answer("1998").unwrap();
    assert_eq!(session.advance().unwrap(), Progress::Moved(1));
    assert_eq!(session.advance().unwrap(), Progress::Held);
    assert_eq!(
        session.history(),
        &[
            HuntAction::SubmitText {
                input: "1998".to_string()
            },
            HuntAction::Advance,
        ]
    );
}

#[test]
fn test_replay_rebuilds_session() {
    let mut session = QuizSession::seeded(HuntConfig::builtin(), 99).unwrap();
    session.submit_text_answer("1997").unwrap();
    session.submit_text_answer("1998").unwrap();
    session.advance().unwrap();
    session.select_choice(0).unwrap();
    session.advance().unwrap();
    session.rotate_tile(3).unwrap();
    session.rotate_tile(3).unwrap();

    let replayed = QuizSession::replay(
        HuntConfig::builtin(),
        rand::rngs::StdRng::seed_from_u64(99),
        session.history(),
    )
    .expect("valid replay");

    assert_eq!(replayed.snapshot(), session.snapshot());
    assert_eq!(replayed.history(), session.history());
}

#[test]
fn test_replay_stops_at_illegal_action() {
    let actions = vec![
        HuntAction::SubmitText {
            input: "1998".to_string(),
        },
        HuntAction::RotateTile { tile: 0 },
    ];
    let result = QuizSession::replay(
        HuntConfig::builtin(),
        rand::rngs::StdRng::seed_from_u64(1),
        &actions,
    );
    assert!(matches!(result, Err(HuntError::IllegalState { .. })));
}

#[test]
fn test_snapshot_serializes() {
    let mut session = QuizSession::seeded(HuntConfig::builtin(), 5).unwrap();
    session.submit_text_answer("1998").unwrap();

    let json = serde_json::to_value(session.snapshot()).expect("serializable");
    assert_eq!(json["stage_index"], 0);
    assert_eq!(json["kind"], "text");
    assert_eq!(json["feedback"], "correct");
    assert_eq!(json["feedback_message"], "Correct!");
    assert_eq!(json["advance_ready"], true);
    assert!(json["tiles"].as_array().is_some_and(Vec::is_empty));
}

