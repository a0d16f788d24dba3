//! Working set of vocabulary entries and their mastery counters

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::QuizConfig;
use crate::error::{QuizError, QuizResult};
use crate::progress::ProgressRecord;

/// Word as handed over by an ingestion adapter, before any progress is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub term: String,
    #[serde(default)]
    pub pronunciation: Option<String>,
    pub meaning: String,
}

impl RawEntry {
    pub fn new(term: &str, pronunciation: Option<&str>, meaning: &str) -> Self {
        Self {
            term: term.to_string(),
            pronunciation: pronunciation.map(str::to_string),
            meaning: meaning.to_string(),
        }
    }
}

/// Vocabulary item with its cumulative counters. `term` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub term: String,
    pub pronunciation: Option<String>,
    pub meaning: String,
    pub correct_count: u32,
    pub wrong_count: u32,
}

impl WordEntry {
    /// Pronunciation if present and non-blank.
    pub fn pronunciation(&self) -> Option<&str> {
        self.pronunciation.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// Attach prior counters to freshly imported entries.
///
/// Cells are trimmed, entries with an empty term or meaning are dropped and
/// duplicates keep their first occurrence. Fails with `ImportInsufficient`
/// when fewer than `min_entries` distinct words remain.
pub fn merge_entries(
    raw_entries: Vec<RawEntry>,
    prior_progress: &ProgressRecord,
    min_entries: usize,
) -> QuizResult<Vec<WordEntry>> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(raw_entries.len());

    for raw in raw_entries {
        let term = raw.term.trim();
        let meaning = raw.meaning.trim();
        if term.is_empty() || meaning.is_empty() || !seen.insert(term.to_string()) {
            continue;
        }

        let counts = prior_progress.get(term).copied().unwrap_or_default();
        entries.push(WordEntry {
            term: term.to_string(),
            pronunciation: raw
                .pronunciation
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            meaning: meaning.to_string(),
            correct_count: counts.correct,
            wrong_count: counts.wrong,
        });
    }

    if entries.len() < min_entries {
        return Err(QuizError::ImportInsufficient {
            found: entries.len(),
            required: min_entries,
        });
    }

    Ok(entries)
}

/// Words of the current import, split into those still being quizzed and
/// those that reached the mastery threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivePool {
    pub active: Vec<WordEntry>,
    pub mastered: Vec<WordEntry>,
}

impl ActivePool {
    pub fn partition(entries: Vec<WordEntry>, mastery_threshold: u32) -> Self {
        let (mastered, active): (Vec<WordEntry>, Vec<WordEntry>) = entries
            .into_iter()
            .partition(|w| w.correct_count >= mastery_threshold);
        Self { active, mastered }
    }

    pub fn ensure_playable(&self, min_active: usize) -> QuizResult<()> {
        if self.active.len() < min_active {
            return Err(QuizError::PoolExhausted {
                active: self.active.len(),
                required: min_active,
            });
        }
        Ok(())
    }

    pub fn position(&self, term: &str) -> Option<usize> {
        self.active.iter().position(|w| w.term == term)
    }

    /// Move an active word to the mastered list.
    pub fn graduate(&mut self, index: usize) -> Option<&WordEntry> {
        if index >= self.active.len() {
            return None;
        }
        let word = self.active.remove(index);
        self.mastered.push(word);
        self.mastered.last()
    }

    /// Every word of the current import, active first.
    pub fn working_set(&self) -> impl Iterator<Item = &WordEntry> {
        self.active.iter().chain(self.mastered.iter())
    }

    /// Active words with the most wrong answers first; ties favour fewer correct answers.
    pub fn weakest(&self, limit: usize) -> Vec<&WordEntry> {
        let mut words: Vec<&WordEntry> = self.active.iter().filter(|w| w.wrong_count > 0).collect();
        words.sort_by(|a, b| {
            b.wrong_count
                .cmp(&a.wrong_count)
                .then(a.correct_count.cmp(&b.correct_count))
        });
        words.truncate(limit);
        words
    }
}

/// Split off mastered words and check enough remain to quiz.
pub fn exclude_mastered(entries: Vec<WordEntry>, config: &QuizConfig) -> QuizResult<ActivePool> {
    let pool = ActivePool::partition(entries, config.mastery_threshold);
    pool.ensure_playable(config.options_per_question)?;
    Ok(pool)
}
