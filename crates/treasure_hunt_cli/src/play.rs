//! Line-oriented play loop.
//!
//! Reads one command per line and drives a [`QuizSession`]. Rendering is plain
//! text: the clue, the options or tile grid, and the feedback copy.

use derive_more::Display;
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::{debug, instrument, warn};
use treasure_hunt::{AnswerKey, HuntError, Phase, Progress, QuizSession, StageKind};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free-text answer (text stages).
    Answer(String),
    /// Option number, 1-based (choice stages).
    Choose(usize),
    /// Tile number, 1-based (puzzle stages).
    Rotate(usize),
    /// Check the puzzle.
    Check,
    /// Advance to the next stage.
    Next,
    /// Print the current stage again.
    Show,
    /// Print the command list.
    Help,
    /// Leave the hunt.
    Quit,
}

/// Input that could not be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InputError {
    /// Not a valid 1-based number.
    #[display("Expected a number from 1, got {:?}", _0)]
    NotANumber(String),
    /// Unrecognized puzzle command.
    #[display("Use `r N` to rotate tile N, or `check`")]
    UnknownPuzzleCommand,
    /// Anything typed after the hunt ended.
    #[display("The hunt is over. Type `quit` to leave.")]
    HuntOver,
}

impl std::error::Error for InputError {}

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// The player finished every stage.
    Completed,
    /// The player typed `quit`.
    Quit,
    /// Input ran out first.
    EndOfInput,
}

/// Parses a line in the context of the current phase.
#[instrument]
pub fn parse_command(line: &str, phase: Phase) -> Result<Command, InputError> {
    let word = line.trim().to_lowercase();
    match word.as_str() {
        "quit" | "exit" => return Ok(Command::Quit),
        "help" | "?" => return Ok(Command::Help),
        "next" => return Ok(Command::Next),
        "show" => return Ok(Command::Show),
        _ => {}
    }

    match phase {
        Phase::Stage(StageKind::Text) => Ok(Command::Answer(line.to_string())),
        Phase::Stage(StageKind::Choice) => parse_ordinal(&word).map(Command::Choose),
        Phase::Stage(StageKind::Puzzle) => {
            if word == "check" {
                return Ok(Command::Check);
            }
            match word.split_whitespace().collect::<Vec<_>>().as_slice() {
                ["r" | "rotate", n] => parse_ordinal(n).map(Command::Rotate),
                _ => Err(InputError::UnknownPuzzleCommand),
            }
        }
        Phase::Completed => Err(InputError::HuntOver),
    }
}

fn parse_ordinal(word: &str) -> Result<usize, InputError> {
    word.parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| InputError::NotANumber(word.to_string()))
}

/// Plays until the hunt completes, the player quits, or input runs out.
#[instrument(skip_all)]
pub fn run<R, I, W>(session: &mut QuizSession<R>, input: I, out: &mut W) -> anyhow::Result<Finish>
where
    R: Rng,
    I: BufRead,
    W: Write,
{
    writeln!(out, "{}", session.config().title())?;
    render_stage(session, out)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line, session.phase()) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };
        debug!(?command, "Command parsed");

        let result = match command {
            Command::Quit => return Ok(Finish::Quit),
            Command::Help => {
                render_help(out)?;
                Ok(())
            }
            Command::Show => {
                render_stage(session, out)?;
                Ok(())
            }
            Command::Next => match session.advance() {
                Ok(Progress::Held) => {
                    writeln!(out, "Solve this clue before moving on.")?;
                    Ok(())
                }
                Ok(Progress::Moved(_)) => {
                    render_stage(session, out)?;
                    Ok(())
                }
                Ok(Progress::Completed) => {
                    render_stage(session, out)?;
                    return Ok(Finish::Completed);
                }
                Err(e) => Err(e),
            },
            Command::Answer(text) => session.submit_text_answer(&text).map(drop),
            Command::Choose(n) => session.select_choice(n - 1).map(drop),
            Command::Rotate(n) => match session.rotate_tile(n - 1) {
                Ok(_) => {
                    if let Some(puzzle) = session.puzzle() {
                        writeln!(out, "{}", puzzle.display())?;
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::Check => session.check_puzzle().map(drop),
        };

        match result {
            Ok(()) => render_feedback(session, out)?,
            Err(e) => report(&e, out)?,
        }
    }

    Ok(Finish::EndOfInput)
}

fn report<W: Write>(err: &HuntError, out: &mut W) -> std::io::Result<()> {
    warn!(error = %err, "Action rejected");
    writeln!(out, "error: {}", err)
}

fn render_feedback<R, W: Write>(session: &QuizSession<R>, out: &mut W) -> std::io::Result<()> {
    if let Some(message) = session.feedback_message() {
        writeln!(out, "{}", message)?;
    }
    if session.is_advance_ready() {
        writeln!(out, "Type `next` to continue.")?;
    }
    Ok(())
}

fn render_stage<R, W: Write>(session: &QuizSession<R>, out: &mut W) -> std::io::Result<()> {
    let Some(stage) = session.current_stage() else {
        writeln!(out, "Congratulations!")?;
        return writeln!(
            out,
            "You have successfully completed the {}!",
            session.config().title()
        );
    };

    writeln!(
        out,
        "Clue {}: {}",
        session.current_stage_index() + 1,
        stage.prompt()
    )?;
    match stage.answer() {
        AnswerKey::Text { .. } => writeln!(out, "Enter your answer...")?,
        AnswerKey::Choice { options, .. } => {
            writeln!(out, "Choose the correct image:")?;
            for (idx, option) in options.iter().enumerate() {
                writeln!(out, "  {}. {} ({})", idx + 1, option.label(), option.asset())?;
            }
        }
        AnswerKey::Puzzle(_) => {
            if let Some(puzzle) = session.puzzle() {
                writeln!(out, "{}", puzzle.display())?;
            }
            writeln!(out, "Rotate tiles with `r N` (numbered row by row from 1), then `check`.")?;
        }
    }
    Ok(())
}

fn render_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  <text>    answer a text clue")?;
    writeln!(out, "  N         pick option N on an image clue")?;
    writeln!(out, "  r N       rotate puzzle tile N")?;
    writeln!(out, "  check     check the puzzle")?;
    writeln!(out, "  next      go to the next clue")?;
    writeln!(out, "  show      print the current clue")?;
    writeln!(out, "  quit      leave the hunt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words_win_on_every_stage() {
        for phase in [
            Phase::Stage(StageKind::Text),
            Phase::Stage(StageKind::Choice),
            Phase::Stage(StageKind::Puzzle),
            Phase::Completed,
        ] {
            assert_eq!(parse_command(" NEXT ", phase), Ok(Command::Next));
            assert_eq!(parse_command("quit", phase), Ok(Command::Quit));
        }
    }

    #[test]
    fn test_text_answer_kept_raw() {
        assert_eq!(
            parse_command("  1998 ", Phase::Stage(StageKind::Text)),
            Ok(Command::Answer("  1998 ".to_string()))
        );
    }

    #[test]
    fn test_choice_is_one_based() {
        let phase = Phase::Stage(StageKind::Choice);
        assert_eq!(parse_command("2", phase), Ok(Command::Choose(2)));
        assert!(matches!(parse_command("0", phase), Err(InputError::NotANumber(_))));
        assert!(matches!(parse_command("logo", phase), Err(InputError::NotANumber(_))));
    }

    #[test]
    fn test_puzzle_commands() {
        let phase = Phase::Stage(StageKind::Puzzle);
        assert_eq!(parse_command("r 3", phase), Ok(Command::Rotate(3)));
        assert_eq!(parse_command("Rotate 9", phase), Ok(Command::Rotate(9)));
        assert_eq!(parse_command("check", phase), Ok(Command::Check));
        assert_eq!(parse_command("spin", phase), Err(InputError::UnknownPuzzleCommand));
    }

    #[test]
    fn test_completed_rejects_input() {
        assert_eq!(parse_command("1998", Phase::Completed), Err(InputError::HuntOver));
    }
}
