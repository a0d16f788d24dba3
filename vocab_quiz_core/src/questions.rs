//! MCQ question generation for the vocabulary quiz

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::error::{QuizError, QuizResult};
use crate::selector::Modality;
use crate::word_store::WordEntry;

/// One multiple-choice question, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub term: String,
    pub modality: Modality,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub correct_answer: String,
}

impl Question {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Build `option_count` distinct options for `entries[chosen]`, exactly one of
/// them the correct value, in random order.
///
/// Distractors are drawn from the distinct non-empty values the other entries
/// hold for `modality`. Fails with `OptionGenerationStall` when there are not
/// enough of them.
pub fn build_options<R: Rng + ?Sized>(
    entries: &[WordEntry],
    chosen: usize,
    modality: Modality,
    option_count: usize,
    rng: &mut R,
) -> QuizResult<Vec<String>> {
    let target = entries.get(chosen).ok_or(QuizError::NoQuestionPresented)?;
    let stall = |found: usize| QuizError::OptionGenerationStall {
        term: target.term.clone(),
        modality,
        found,
        required: option_count,
    };

    let correct = modality.value_of(target).ok_or_else(|| stall(0))?;

    let mut distractors: Vec<&str> = Vec::new();
    for (i, word) in entries.iter().enumerate() {
        if i == chosen {
            continue;
        }
        if let Some(value) = modality.value_of(word) {
            if value != correct && !distractors.contains(&value) {
                distractors.push(value);
            }
        }
    }

    let needed = option_count.saturating_sub(1);
    if distractors.len() < needed {
        return Err(stall(distractors.len() + 1));
    }

    distractors.shuffle(rng);
    distractors.truncate(needed);

    let mut options: Vec<String> = distractors.into_iter().map(str::to_string).collect();
    options.push(correct.to_string());
    options.shuffle(rng);

    Ok(options)
}

/// Generate a full question for `entries[chosen]`.
pub fn build_question<R: Rng + ?Sized>(
    entries: &[WordEntry],
    chosen: usize,
    modality: Modality,
    option_count: usize,
    rng: &mut R,
) -> QuizResult<Question> {
    let options = build_options(entries, chosen, modality, option_count, rng)?;
    let target = &entries[chosen];
    let correct_answer = modality.value_of(target).unwrap_or_default().to_string();
    let correct_index = options
        .iter()
        .position(|o| *o == correct_answer)
        .unwrap_or_default();

    Ok(Question {
        term: target.term.clone(),
        modality,
        prompt: modality.prompt().to_string(),
        options,
        correct_index,
        correct_answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn word(term: &str, pronunciation: Option<&str>, meaning: &str) -> WordEntry {
        WordEntry {
            term: term.to_string(),
            pronunciation: pronunciation.map(str::to_string),
            meaning: meaning.to_string(),
            correct_count: 0,
            wrong_count: 0,
        }
    }

    fn sample_pool() -> Vec<WordEntry> {
        vec![
            word("你好", Some("nǐ hǎo"), "hello"),
            word("谢谢", Some("xièxiè"), "thanks"),
            word("再见", Some("zàijiàn"), "bye"),
            word("是", Some("shì"), "yes"),
            word("不", Some("bù"), "no"),
            word("好", None, "good"),
        ]
    }

    #[test]
    fn options_are_four_distinct_with_one_correct() {
        let mut rng = StdRng::seed_from_u64(11);
        let pool = sample_pool();

        for chosen in 0..pool.len() {
            for _ in 0..50 {
                let options = build_options(&pool, chosen, Modality::Meaning, 4, &mut rng).unwrap();
                let unique: HashSet<_> = options.iter().collect();

                assert_eq!(options.len(), 4);
                assert_eq!(unique.len(), 4);
                assert_eq!(options.iter().filter(|o| **o == pool[chosen].meaning).count(), 1);
            }
        }
    }

    #[test]
    fn pronunciation_options_skip_words_without_one() {
        let mut rng = StdRng::seed_from_u64(5);
        let pool = sample_pool();

        for _ in 0..50 {
            let options = build_options(&pool, 0, Modality::Pronunciation, 4, &mut rng).unwrap();
            assert!(options.contains(&"nǐ hǎo".to_string()));
            assert!(options.iter().all(|o| !o.is_empty()));
        }
    }

    #[test]
    fn duplicate_values_do_not_count_as_distractors() {
        let mut rng = StdRng::seed_from_u64(9);
        let pool = vec![
            word("a", None, "same"),
            word("b", None, "same"),
            word("c", None, "other"),
            word("d", None, "other"),
            word("e", None, "third"),
        ];

        let err = build_options(&pool, 0, Modality::Meaning, 4, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            QuizError::OptionGenerationStall { found: 3, required: 4, .. }
        ));
    }

    #[test]
    fn missing_target_value_stalls() {
        let mut rng = StdRng::seed_from_u64(9);
        let pool = sample_pool();
        let err = build_options(&pool, 5, Modality::Pronunciation, 4, &mut rng).unwrap_err();
        assert!(matches!(err, QuizError::OptionGenerationStall { found: 0, .. }));
    }

    #[test]
    fn correct_answer_is_not_always_in_the_same_slot() {
        let mut rng = StdRng::seed_from_u64(21);
        let pool = sample_pool();
        let slots: HashSet<usize> = (0..100)
            .map(|_| {
                build_question(&pool, 2, Modality::Meaning, 4, &mut rng)
                    .unwrap()
                    .correct_index
            })
            .collect();

        assert!(slots.len() > 1);
    }

    #[test]
    fn question_carries_prompt_and_answer() {
        let mut rng = StdRng::seed_from_u64(2);
        let pool = sample_pool();
        let question = build_question(&pool, 1, Modality::Pronunciation, 4, &mut rng).unwrap();

        assert_eq!(question.term, "谢谢");
        assert_eq!(question.correct_answer, "xièxiè");
        assert_eq!(question.options[question.correct_index], "xièxiè");
        assert_eq!(question.prompt, "Choose the correct pronunciation:");
        assert!(question.has_option("xièxiè"));
    }
}
