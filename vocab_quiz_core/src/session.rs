//! Quiz session: drives load, question, answer, next and skip

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::QuizConfig;
use crate::error::{QuizError, QuizResult};
use crate::evaluator::{apply_answer, AnswerOutcome};
use crate::progress::{AttemptStats, ProgressPersistence, SlotStorage};
use crate::questions::{build_question, Question};
use crate::selector::{pick_modality, pick_word, Modality};
use crate::word_store::{exclude_mastered, merge_entries, ActivePool, RawEntry, WordEntry};

/// Where the current round stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundState {
    Idle,
    Presented(Question),
    Answered {
        question: Question,
        outcome: AnswerOutcome,
    },
}

/// One quiz run over an imported word list. Owns the working set, the
/// progress store and the random source.
#[derive(Debug)]
pub struct QuizSession<S: SlotStorage, R: Rng = StdRng> {
    config: QuizConfig,
    pool: ActivePool,
    progress: ProgressPersistence<S>,
    round: RoundState,
    stats: AttemptStats,
    rng: R,
}

impl<S: SlotStorage> QuizSession<S, StdRng> {
    pub fn start(imported: Vec<RawEntry>, storage: S, config: QuizConfig) -> QuizResult<Self> {
        Self::start_with_rng(imported, storage, config, StdRng::from_entropy())
    }
}

impl<S: SlotStorage, R: Rng> QuizSession<S, R> {
    /// Merge the import with stored progress and set aside mastered words.
    ///
    /// Fails with `ImportInsufficient` when the import is too small, or
    /// `PoolExhausted` when too few unmastered words remain.
    pub fn start_with_rng(
        imported: Vec<RawEntry>,
        storage: S,
        config: QuizConfig,
        rng: R,
    ) -> QuizResult<Self> {
        let progress = ProgressPersistence::new(storage, &config);
        let prior = progress.load();
        let entries = merge_entries(imported, &prior, config.options_per_question)?;
        let pool = exclude_mastered(entries, &config)?;

        log::info!(
            "Quiz started with {} active words ({} already mastered)",
            pool.active.len(),
            pool.mastered.len()
        );

        Ok(Self {
            config,
            pool,
            progress,
            round: RoundState::Idle,
            stats: AttemptStats::default(),
            rng,
        })
    }

    /// Present a new question. Only allowed once the current one is answered.
    pub fn next_question(&mut self) -> QuizResult<Question> {
        if matches!(self.round, RoundState::Presented(_)) {
            return Err(QuizError::QuestionPending);
        }
        self.present()
    }

    /// Drop the current question without touching any counters and present another.
    pub fn skip_question(&mut self) -> QuizResult<Question> {
        self.present()
    }

    /// Submit an answer for the presented question. Accepted once per round.
    pub fn answer(&mut self, option: &str) -> QuizResult<AnswerOutcome> {
        let question = match &self.round {
            RoundState::Presented(question) => question.clone(),
            RoundState::Answered { .. } => return Err(QuizError::AlreadyAnswered),
            RoundState::Idle => return Err(QuizError::NoQuestionPresented),
        };
        if !question.has_option(option) {
            return Err(QuizError::UnknownOption(option.to_string()));
        }

        let index = self
            .pool
            .position(&question.term)
            .ok_or(QuizError::NoQuestionPresented)?;

        let is_correct = option == question.correct_answer;
        self.stats.record(is_correct);

        // Close the round before saving so a failed save cannot reopen it.
        self.round = RoundState::Answered {
            question: question.clone(),
            outcome: AnswerOutcome {
                is_correct,
                graduated: false,
                correct_answer: question.correct_answer.clone(),
            },
        };

        let outcome = apply_answer(
            &mut self.pool,
            index,
            option,
            &question.correct_answer,
            &self.config,
            &mut self.progress,
        )?;

        self.round = RoundState::Answered {
            question,
            outcome: outcome.clone(),
        };
        Ok(outcome)
    }

    fn present(&mut self) -> QuizResult<Question> {
        self.round = RoundState::Idle;
        self.pool.ensure_playable(self.config.options_per_question)?;

        let active = &self.pool.active;
        let index = pick_word(active, &mut self.rng).ok_or(QuizError::PoolExhausted {
            active: 0,
            required: self.config.options_per_question,
        })?;
        let modality = pick_modality(&active[index], &mut self.rng);
        log::debug!("Asking '{}' for its {}", active[index].term, modality);

        let option_count = self.config.options_per_question;
        let question = match build_question(active, index, modality, option_count, &mut self.rng) {
            // too few distinct pronunciations in the pool: ask for the meaning instead
            Err(QuizError::OptionGenerationStall { .. }) if modality == Modality::Pronunciation => {
                build_question(active, index, Modality::Meaning, option_count, &mut self.rng)?
            }
            result => result?,
        };

        self.round = RoundState::Presented(question.clone());
        Ok(question)
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.round {
            RoundState::Presented(question) | RoundState::Answered { question, .. } => Some(question),
            RoundState::Idle => None,
        }
    }

    pub fn active_words(&self) -> &[WordEntry] {
        &self.pool.active
    }

    pub fn mastered_words(&self) -> &[WordEntry] {
        &self.pool.mastered
    }

    pub fn weakest_words(&self, limit: usize) -> Vec<&WordEntry> {
        self.pool.weakest(limit)
    }

    pub fn stats(&self) -> AttemptStats {
        self.stats
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn progress(&self) -> &ProgressPersistence<S> {
        &self.progress
    }

    /// End the session and hand back the storage.
    pub fn into_storage(self) -> S {
        self.progress.into_storage()
    }
}
