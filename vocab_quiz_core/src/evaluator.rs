//! Answer evaluation and mastery updates

use serde::Serialize;

use crate::config::QuizConfig;
use crate::error::{QuizError, QuizResult};
use crate::progress::{ProgressPersistence, SlotStorage};
use crate::word_store::ActivePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    /// The word reached the mastery threshold and left the active pool.
    pub graduated: bool,
    pub correct_answer: String,
}

/// Record the answer for `pool.active[index]`, then persist the working set.
///
/// A correct answer bumps `correct_count` and graduates the word once it hits
/// the mastery threshold; anything else bumps `wrong_count`. Counters are
/// updated in memory before the save, so a failed save still leaves them
/// applied for the rest of the session.
pub fn apply_answer<S: SlotStorage>(
    pool: &mut ActivePool,
    index: usize,
    selected_option: &str,
    correct_option: &str,
    config: &QuizConfig,
    progress: &mut ProgressPersistence<S>,
) -> QuizResult<AnswerOutcome> {
    let word = pool
        .active
        .get_mut(index)
        .ok_or(QuizError::NoQuestionPresented)?;

    let is_correct = selected_option == correct_option;
    let mut graduated = false;

    if is_correct {
        word.correct_count = word.correct_count.saturating_add(1);
        if config.is_mastered(word.correct_count) {
            log::info!("'{}' mastered after {} correct answers", word.term, word.correct_count);
            pool.graduate(index);
            graduated = true;
        }
    } else {
        word.wrong_count = word.wrong_count.saturating_add(1);
    }

    progress.save(pool.working_set())?;

    Ok(AnswerOutcome {
        is_correct,
        graduated,
        correct_answer: correct_option.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{MemoryStorage, ProgressCounts};
    use crate::word_store::WordEntry;

    fn word(term: &str, correct: u32, wrong: u32) -> WordEntry {
        WordEntry {
            term: term.to_string(),
            pronunciation: None,
            meaning: format!("{} meaning", term),
            correct_count: correct,
            wrong_count: wrong,
        }
    }

    fn setup(words: Vec<WordEntry>) -> (ActivePool, QuizConfig, ProgressPersistence<MemoryStorage>) {
        let config = QuizConfig::default();
        let pool = ActivePool::partition(words, config.mastery_threshold);
        let progress = ProgressPersistence::new(MemoryStorage::new(), &config);
        (pool, config, progress)
    }

    #[test]
    fn correct_answer_increments_correct_only() {
        let (mut pool, config, mut progress) = setup(vec![word("a", 3, 2), word("b", 0, 0)]);
        let outcome = apply_answer(&mut pool, 0, "a meaning", "a meaning", &config, &mut progress).unwrap();

        assert!(outcome.is_correct);
        assert!(!outcome.graduated);
        assert_eq!(pool.active[0].correct_count, 4);
        assert_eq!(pool.active[0].wrong_count, 2);
    }

    #[test]
    fn wrong_answer_increments_wrong_only() {
        let (mut pool, config, mut progress) = setup(vec![word("a", 3, 2), word("b", 0, 0)]);
        let outcome = apply_answer(&mut pool, 0, "b meaning", "a meaning", &config, &mut progress).unwrap();

        assert!(!outcome.is_correct);
        assert_eq!(outcome.correct_answer, "a meaning");
        assert_eq!(pool.active[0].correct_count, 3);
        assert_eq!(pool.active[0].wrong_count, 3);
    }

    #[test]
    fn fiftieth_correct_answer_graduates() {
        let (mut pool, config, mut progress) = setup(vec![word("a", 0, 0), word("b", 49, 1)]);
        let outcome = apply_answer(&mut pool, 1, "b meaning", "b meaning", &config, &mut progress).unwrap();

        assert!(outcome.graduated);
        assert_eq!(pool.active.len(), 1);
        assert_eq!(pool.mastered[0].term, "b");
        assert_eq!(progress.load()["b"], ProgressCounts { correct: 50, wrong: 1 });
    }

    #[test]
    fn every_answer_is_persisted() {
        let (mut pool, config, mut progress) = setup(vec![word("a", 0, 0), word("b", 0, 0)]);
        apply_answer(&mut pool, 1, "x", "b meaning", &config, &mut progress).unwrap();

        let record = progress.load();
        assert_eq!(record["a"], ProgressCounts { correct: 0, wrong: 0 });
        assert_eq!(record["b"], ProgressCounts { correct: 0, wrong: 1 });
    }

    #[test]
    fn counters_saturate_at_the_maximum() {
        let (mut pool, config, mut progress) = setup(vec![word("a", 0, u32::MAX), word("b", 0, 0)]);
        apply_answer(&mut pool, 0, "x", "a meaning", &config, &mut progress).unwrap();

        assert_eq!(pool.active[0].wrong_count, u32::MAX);
        assert_eq!(progress.load()["a"], ProgressCounts { correct: 0, wrong: u32::MAX });
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let (mut pool, config, mut progress) = setup(vec![word("a", 0, 0)]);
        let err = apply_answer(&mut pool, 4, "x", "y", &config, &mut progress).unwrap_err();
        assert!(matches!(err, QuizError::NoQuestionPresented));
    }
}
