//! Quiz tuning knobs

use serde::{Deserialize, Serialize};

use crate::error::QuizResult;

/// Correct answers after which a word leaves the active pool.
pub const MASTERY_THRESHOLD: u32 = 50;

/// Answer options per question (1 correct + 3 distractors).
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Name of the storage slot holding the progress record.
pub const STORAGE_KEY: &str = "vocabProgress";

/// How `ProgressPersistence::save` treats words already in storage that are
/// not part of the current import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// Keep them: the working set is overlaid on the stored record.
    #[default]
    Merge,
    /// Drop them: the stored record is replaced by the working set.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub mastery_threshold: u32,
    /// Also the minimum number of words needed to start and keep quizzing.
    pub options_per_question: usize,
    pub storage_key: String,
    pub save_mode: SaveMode,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            mastery_threshold: MASTERY_THRESHOLD,
            options_per_question: OPTIONS_PER_QUESTION,
            storage_key: STORAGE_KEY.to_string(),
            save_mode: SaveMode::default(),
        }
    }
}

impl QuizConfig {
    /// Parse a (possibly partial) JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> QuizResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_mastered(&self, correct_count: u32) -> bool {
        correct_count >= self.mastery_threshold
    }
}
