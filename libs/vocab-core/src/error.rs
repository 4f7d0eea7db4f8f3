//! Error types for vocab-core.

use thiserror::Error;

/// Errors from the quiz session state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("no vocabulary available for this category")]
    EmptyPool,

    #[error("quiz is not in progress")]
    NotInProgress,

    #[error("current question has no recorded answer")]
    Unanswered,

    #[error("invalid option index {0}")]
    InvalidOption(usize),
}
