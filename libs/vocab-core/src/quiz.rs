//! Quiz session state machine.
//!
//! A session generates one two-option question per vocab entry in the
//! filtered pool, records per-question answers, and keeps a running score
//! that always equals the number of currently-correct answers.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::QuizError;
use crate::types::{CategoryFilter, QuizResult, Vocab};

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for QuizPhase {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// A generated question. Derived per session, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub word: String,
    pub correct: String,
    pub options: [String; 2],
}

impl QuizQuestion {
    /// Whether the option at `index` is the correct meaning.
    pub fn is_correct(&self, index: usize) -> bool {
        self.options.get(index).map(|o| *o == self.correct) == Some(true)
    }
}

/// Quiz session controller.
///
/// Phases: `NotStarted -> InProgress -> Completed -> (reset) -> NotStarted`.
/// Questions are regenerated with fresh randomness on every start.
#[derive(Debug, Default)]
pub struct QuizSession {
    filter: CategoryFilter,
    phase: QuizPhase,
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<usize>>,
    current: usize,
    score: u32,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Zero-based index of the current question.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The current question, if the session holds any.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Recorded answer index for the question at `index`.
    pub fn answer(&self, index: usize) -> Option<usize> {
        self.answers.get(index).copied().flatten()
    }

    /// Whether the current question has a recorded answer.
    pub fn current_answered(&self) -> bool {
        self.answer(self.current).is_some()
    }

    /// Start a session over `vocabs` filtered by `filter`.
    ///
    /// Fails with [`QuizError::EmptyPool`] when no entry passes the filter;
    /// starting with nothing to ask is disallowed.
    pub fn start(&mut self, vocabs: &[Vocab], filter: CategoryFilter) -> Result<(), QuizError> {
        self.start_with(vocabs, filter, &mut rand::thread_rng())
    }

    /// [`start`](Self::start) with a caller-supplied RNG.
    pub fn start_with<R: Rng>(
        &mut self,
        vocabs: &[Vocab],
        filter: CategoryFilter,
        rng: &mut R,
    ) -> Result<(), QuizError> {
        let pool: Vec<&Vocab> = vocabs.iter().filter(|v| filter.matches(v)).collect();
        if pool.is_empty() {
            return Err(QuizError::EmptyPool);
        }

        let questions = generate_questions(&pool, rng);
        self.answers = vec![None; questions.len()];
        self.questions = questions;
        self.filter = filter;
        self.current = 0;
        self.score = 0;
        self.phase = QuizPhase::InProgress;
        Ok(())
    }

    /// Record `option` as the answer to the current question.
    ///
    /// Scoring: +1 when the new selection is correct and the previous one was
    /// not; -1 when the new selection is wrong and the previous one was
    /// correct. The score therefore always equals the count of
    /// currently-correct answers.
    pub fn select_answer(&mut self, option: usize) -> Result<(), QuizError> {
        if self.phase != QuizPhase::InProgress {
            return Err(QuizError::NotInProgress);
        }
        let question = &self.questions[self.current];
        if option >= question.options.len() {
            return Err(QuizError::InvalidOption(option));
        }

        let was_correct = self.answers[self.current]
            .map(|prev| question.is_correct(prev))
            .unwrap_or(false);
        let now_correct = question.is_correct(option);

        if now_correct && !was_correct {
            self.score += 1;
        } else if !now_correct && was_correct {
            self.score -= 1;
        }
        self.answers[self.current] = Some(option);
        Ok(())
    }

    /// Advance to the next question. Blocked until the current question has a
    /// recorded answer; clamps at the last question.
    pub fn next(&mut self) -> Result<(), QuizError> {
        if self.phase != QuizPhase::InProgress {
            return Err(QuizError::NotInProgress);
        }
        if !self.current_answered() {
            return Err(QuizError::Unanswered);
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
        Ok(())
    }

    /// Step back one question. Never blocked, never erases answers.
    pub fn prev(&mut self) -> Result<(), QuizError> {
        if self.phase != QuizPhase::InProgress {
            return Err(QuizError::NotInProgress);
        }
        self.current = self.current.saturating_sub(1);
        Ok(())
    }

    /// Finish the session, producing the result record for persistence.
    ///
    /// Every question must have a recorded answer. Transitions to Completed;
    /// the caller is responsible for storing the returned record.
    pub fn finish(&mut self) -> Result<QuizResult, QuizError> {
        if self.phase != QuizPhase::InProgress {
            return Err(QuizError::NotInProgress);
        }
        if self.answers.iter().any(Option::is_none) {
            return Err(QuizError::Unanswered);
        }

        self.phase = QuizPhase::Completed;
        Ok(QuizResult {
            date: Utc::now(),
            category_id: self.filter.to_id(),
            score: self.score,
            total: self.questions.len() as u32,
        })
    }

    /// "Try again": discard in-session state and return to NotStarted.
    /// Persisted results are untouched.
    pub fn reset(&mut self) {
        self.phase = QuizPhase::NotStarted;
        self.questions.clear();
        self.answers.clear();
        self.current = 0;
        self.score = 0;
    }
}

/// Build one question per pool entry.
///
/// The wrong option is a meaning drawn uniformly at random from the other
/// pool entries; for a pool of one it is the empty string. The two options
/// are shuffled into a random order.
fn generate_questions<R: Rng>(pool: &[&Vocab], rng: &mut R) -> Vec<QuizQuestion> {
    pool.iter()
        .map(|vocab| {
            let wrongs: Vec<&str> = pool
                .iter()
                .filter(|v| v.id != vocab.id)
                .map(|v| v.meaning.as_str())
                .collect();
            let wrong = wrongs
                .choose(rng)
                .map(|m| (*m).to_string())
                .unwrap_or_default();

            let mut options = [vocab.meaning.clone(), wrong];
            options.shuffle(rng);

            QuizQuestion {
                word: vocab.word.clone(),
                correct: vocab.meaning.clone(),
                options,
            }
        })
        .collect()
}
