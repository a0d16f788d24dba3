//! Error taxonomy for the quiz core

use thiserror::Error;

use crate::selector::Modality;

pub type QuizResult<T> = Result<T, QuizError>;

#[derive(Error, Debug)]
pub enum QuizError {
    /// The imported list does not hold enough usable words to build a question.
    #[error("The imported list needs at least {required} valid words, found {found}")]
    ImportInsufficient { found: usize, required: usize },

    /// Too many words are mastered: the remaining active pool is too small.
    #[error("Not enough words left to practice ({active} active, {required} needed). Most words may already be mastered")]
    PoolExhausted { active: usize, required: usize },

    #[error("Cannot build {required} distinct {modality} options for '{term}' (only {found} available)")]
    OptionGenerationStall {
        term: String,
        modality: Modality,
        found: usize,
        required: usize,
    },

    #[error("No question is currently presented")]
    NoQuestionPresented,

    #[error("This question has already been answered")]
    AlreadyAnswered,

    #[error("The current question must be answered or skipped first")]
    QuestionPending,

    #[error("'{0}' is not one of the presented options")]
    UnknownOption(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Unsupported file format: .{0}")]
    UnsupportedFileType(String),
}

impl From<csv::Error> for QuizError {
    fn from(error: csv::Error) -> Self {
        QuizError::Import(format!("Failed to read CSV: {}", error))
    }
}

impl From<calamine::Error> for QuizError {
    fn from(error: calamine::Error) -> Self {
        QuizError::Import(format!("Failed to read Excel file: {}", error))
    }
}
