//! Vocabulary quiz core - adaptive flashcard engine
//!
//! Merges imported word lists with stored mastery counters, picks the next
//! word weighted toward poorly known ones, builds multiple-choice options and
//! records answers until words are mastered.

mod config;
mod db;
mod error;
mod evaluator;
mod import;
mod progress;
mod questions;
mod selector;
mod session;
mod word_store;

#[cfg(feature = "python")]
mod python;

pub use config::{QuizConfig, SaveMode, MASTERY_THRESHOLD, OPTIONS_PER_QUESTION, STORAGE_KEY};
pub use db::{init_database, SqliteStorage};
pub use error::{QuizError, QuizResult};
pub use evaluator::{apply_answer, AnswerOutcome};
pub use import::{parse_csv, parse_csv_reader, parse_excel, parse_file, parse_text};
pub use progress::{
    decode_record, encode_record, AttemptStats, MemoryStorage, ProgressCounts, ProgressPersistence,
    ProgressRecord, SlotStorage,
};
pub use questions::{build_options, build_question, Question};
pub use selector::{pick_modality, pick_word, word_weight, Modality};
pub use session::{QuizSession, RoundState};
pub use word_store::{exclude_mastered, merge_entries, ActivePool, RawEntry, WordEntry};
