//! Tile bijection invariant: every grid slot is the target of exactly one tile.

use super::Invariant;
use crate::{PuzzleState, QuizSession};

/// Invariant: tile target positions are a permutation of `0..tile_count`.
pub struct TileBijectionInvariant;

impl TileBijectionInvariant {
    /// Checks a puzzle directly.
    pub fn holds_for(puzzle: &PuzzleState) -> bool {
        let mut seen = vec![false; puzzle.len()];
        for tile in puzzle.tiles() {
            match seen.get_mut(tile.target_position()) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

impl<R> Invariant<QuizSession<R>> for TileBijectionInvariant {
    fn holds(session: &QuizSession<R>) -> bool {
        session.puzzle().is_none_or(Self::holds_for)
    }

    fn description() -> &'static str {
        "Tile targets form a bijection over grid slots"
    }
}
