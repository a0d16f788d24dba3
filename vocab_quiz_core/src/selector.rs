//! Adaptive choice of the next word and of the question modality

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::word_store::WordEntry;

/// Which attribute of a word a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Meaning,
    Pronunciation,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Meaning => "meaning",
            Modality::Pronunciation => "pronunciation",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Modality::Meaning => "Choose the correct meaning:",
            Modality::Pronunciation => "Choose the correct pronunciation:",
        }
    }

    /// The value a word holds for this modality, if any.
    pub fn value_of<'a>(&self, word: &'a WordEntry) -> Option<&'a str> {
        match self {
            Modality::Meaning => Some(word.meaning.as_str()).filter(|m| !m.is_empty()),
            Modality::Pronunciation => word.pronunciation(),
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `wrong + 1 / (correct + 1)`: more mistakes and fewer successes mean more exposure.
/// Always strictly positive.
pub fn word_weight(word: &WordEntry) -> f64 {
    word.wrong_count as f64 + 1.0 / (word.correct_count as f64 + 1.0)
}

/// Weighted random pick of an index into `entries`. `None` only when empty.
pub fn pick_word<R: Rng + ?Sized>(entries: &[WordEntry], rng: &mut R) -> Option<usize> {
    if entries.is_empty() {
        return None;
    }

    let weights: Vec<f64> = entries.iter().map(word_weight).collect();
    let total_weight: f64 = weights.iter().sum();
    let mut remaining = rng.gen_range(0.0..total_weight);

    for (i, weight) in weights.iter().enumerate() {
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(i);
        }
    }

    // float rounding can leave a sliver past the last weight
    Some(entries.len() - 1)
}

/// Even odds between meaning and pronunciation; words without a pronunciation
/// are always asked for their meaning.
pub fn pick_modality<R: Rng + ?Sized>(word: &WordEntry, rng: &mut R) -> Modality {
    if rng.gen_bool(0.5) && word.pronunciation().is_some() {
        Modality::Pronunciation
    } else {
        Modality::Meaning
    }
}
