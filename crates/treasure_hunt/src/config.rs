//! Hunt configuration: the ordered list of stages, loaded from TOML.

use crate::error::ConfigError;
use crate::stage::{AnswerKey, ChoiceOption, PuzzleManifest, Stage};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Static definition of a hunt.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HuntConfig {
    /// Title shown on the completion message.
    #[serde(default = "default_title")]
    title: String,

    /// Stages in play order.
    stages: Vec<Stage>,
}

#[instrument]
fn default_title() -> String {
    "Treasure Hunt".to_string()
}

const BUILTIN_TILES: [&str; 9] = [
    "piece_row1_column1.png",
    "piece_row1_column2.png",
    "piece_row1_column3.png",
    "piece_row2_column1.png",
    "piece_row2_column2.png",
    "piece_row2_column3.png",
    "piece_row3_column1.png",
    "piece_row3_column2.png",
    "piece_row3_column3.png",
];

impl HuntConfig {
    /// Creates a validated configuration.
    #[instrument(skip(title, stages), fields(stage_count = stages.len()))]
    pub fn new(title: impl Into<String>, stages: Vec<Stage>) -> Result<Self, ConfigError> {
        let config = Self {
            title: title.into(),
            stages,
        };
        config.validate()?;
        Ok(config)
    }

    /// The three-clue campus hunt: founding year, parent-company logo, rotate puzzle.
    #[instrument]
    pub fn builtin() -> Self {
        Self {
            title: "GDG on campus Treasure Hunt".to_string(),
            stages: vec![
                Stage::new(
                    "What year was Google founded? (Use Google Search)".to_string(),
                    AnswerKey::Text {
                        expected: "1998".to_string(),
                    },
                ),
                Stage::new(
                    "What is Google's parent company called? (click on the logo).".to_string(),
                    AnswerKey::Choice {
                        options: vec![
                            ChoiceOption::new(
                                "Alphabet logo".to_string(),
                                "alphabet_logo.png".to_string(),
                            ),
                            ChoiceOption::new(
                                "Google logo".to_string(),
                                "google_logo.png".to_string(),
                            ),
                            ChoiceOption::new(
                                "YouTube logo".to_string(),
                                "youtube_logo.png".to_string(),
                            ),
                        ],
                        correct: 0,
                    },
                ),
                Stage::new(
                    "Solve the puzzle to reveal the clue!".to_string(),
                    AnswerKey::Puzzle(PuzzleManifest::new(
                        3,
                        BUILTIN_TILES.iter().map(|tile| tile.to_string()).collect(),
                    )),
                ),
            ],
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading hunt from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read hunt file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse hunt: {}", e)))?;
        config.validate()?;
        info!(title = %config.title, stages = config.stages.len(), "Hunt loaded");
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize hunt: {}", e)))
    }

    /// Number of stages.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Checks that every stage can actually be solved.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::new("Hunt has no stages"));
        }

        for (idx, stage) in self.stages.iter().enumerate() {
            let n = idx + 1;
            match stage.answer() {
                AnswerKey::Text { expected } => {
                    if expected.trim().is_empty() {
                        return Err(ConfigError::new(format!(
                            "Stage {}: expected answer is blank",
                            n
                        )));
                    }
                }
                AnswerKey::Choice { options, correct } => {
                    if options.is_empty() {
                        return Err(ConfigError::new(format!("Stage {}: no options", n)));
                    }
                    if *correct >= options.len() {
                        return Err(ConfigError::new(format!(
                            "Stage {}: correct option {} out of range for {} options",
                            n,
                            correct,
                            options.len()
                        )));
                    }
                }
                AnswerKey::Puzzle(manifest) => {
                    if manifest.is_empty() {
                        return Err(ConfigError::new(format!("Stage {}: puzzle has no tiles", n)));
                    }
                    if *manifest.columns() == 0 {
                        return Err(ConfigError::new(format!(
                            "Stage {}: puzzle needs at least one column",
                            n
                        )));
                    }
                }
            }
        }

        debug!(stages = self.stages.len(), "Hunt is valid");
        Ok(())
    }
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StageKind;

    #[test]
    fn test_builtin_is_valid() {
        let config = HuntConfig::builtin();
        assert!(config.validate().is_ok());
        let kinds: Vec<_> = config.stages().iter().map(Stage::kind).collect();
        assert_eq!(
            kinds,
            [StageKind::Text, StageKind::Choice, StageKind::Puzzle]
        );
    }

    #[test]
    fn test_empty_hunt_rejected() {
        assert!(HuntConfig::new("Empty", Vec::new()).is_err());
    }

    #[test]
    fn test_blank_text_answer_rejected() {
        let stages = vec![Stage::new(
            "Q".to_string(),
            AnswerKey::Text {
                expected: "   ".to_string(),
            },
        )];
        let err = HuntConfig::new("Blank", stages).unwrap_err();
        assert!(err.message.contains("blank"));
    }

    #[test]
    fn test_zero_column_puzzle_rejected() {
        let stages = vec![Stage::new(
            "P".to_string(),
            AnswerKey::Puzzle(PuzzleManifest::new(0, vec!["a".to_string()])),
        )];
        assert!(HuntConfig::new("Columns", stages).is_err());
    }
}
