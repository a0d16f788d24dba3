//! Progress tracking - durable per-word counters and session statistics

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::config::{QuizConfig, SaveMode};
use crate::error::QuizResult;
use crate::word_store::WordEntry;

/// Stored counters for one term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCounts {
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub wrong: u32,
}

/// Durable mapping `term -> counters`.
pub type ProgressRecord = BTreeMap<String, ProgressCounts>;

/// A store of named slots, each holding one serialized value.
///
/// Slots are read whole and written whole; a write replaces the previous value atomically.
pub trait SlotStorage {
    fn read(&self, slot: &str) -> QuizResult<Option<String>>;
    fn write(&mut self, slot: &str, payload: &str) -> QuizResult<()>;
    fn remove(&mut self, slot: &str) -> QuizResult<()>;
}

/// In-process slot storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, slot: &str) -> QuizResult<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, payload: &str) -> QuizResult<()> {
        self.slots.insert(slot.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> QuizResult<()> {
        self.slots.remove(slot);
        Ok(())
    }
}

/// Decode a stored payload. Absent, `null` or unreadable payloads yield an empty record.
pub fn decode_record(payload: Option<&str>) -> ProgressRecord {
    let Some(payload) = payload else {
        return ProgressRecord::new();
    };

    match serde_json::from_str::<Option<ProgressRecord>>(payload) {
        Ok(record) => record.unwrap_or_default(),
        Err(e) => {
            log::warn!("Stored progress is unreadable, starting from scratch: {}", e);
            ProgressRecord::new()
        }
    }
}

pub fn encode_record(record: &ProgressRecord) -> QuizResult<String> {
    Ok(serde_json::to_string(record)?)
}

/// Loads and saves the progress record kept in a single storage slot.
#[derive(Debug)]
pub struct ProgressPersistence<S: SlotStorage> {
    storage: S,
    slot: String,
    mode: SaveMode,
}

impl<S: SlotStorage> ProgressPersistence<S> {
    pub fn new(storage: S, config: &QuizConfig) -> Self {
        Self {
            storage,
            slot: config.storage_key.clone(),
            mode: config.save_mode,
        }
    }

    /// Never fails: storage errors and corrupt payloads are logged and read as empty.
    pub fn load(&self) -> ProgressRecord {
        match self.storage.read(&self.slot) {
            Ok(payload) => decode_record(payload.as_deref()),
            Err(e) => {
                log::warn!("Failed to read progress slot '{}': {}", self.slot, e);
                ProgressRecord::new()
            }
        }
    }

    /// Write the counters of `entries` to storage, replacing the slot's value.
    ///
    /// In `SaveMode::Merge` the counters are overlaid on the stored record so
    /// words outside `entries` survive; in `SaveMode::Overwrite` only `entries`
    /// are kept.
    pub fn save<'a, I>(&mut self, entries: I) -> QuizResult<()>
    where
        I: IntoIterator<Item = &'a WordEntry>,
    {
        // a failed read aborts the save instead of overwriting the slot
        let mut record = match self.mode {
            SaveMode::Merge => decode_record(self.storage.read(&self.slot)?.as_deref()),
            SaveMode::Overwrite => ProgressRecord::new(),
        };

        for word in entries {
            record.insert(
                word.term.clone(),
                ProgressCounts {
                    correct: word.correct_count,
                    wrong: word.wrong_count,
                },
            );
        }

        let payload = encode_record(&record)?;
        self.storage.write(&self.slot, &payload)
    }

    /// Forget all stored progress.
    pub fn clear(&mut self) -> QuizResult<()> {
        self.storage.remove(&self.slot)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Answer statistics for the current session
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AttemptStats {
    pub total_attempts: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

impl AttemptStats {
    pub fn record(&mut self, is_correct: bool) {
        self.total_attempts += 1;
        if is_correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
    }

    pub fn accuracy_percent(&self) -> f64 {
        if self.total_attempts > 0 {
            (self.correct_count as f64 / self.total_attempts as f64) * 100.0
        } else {
            0.0
        }
    }
}
