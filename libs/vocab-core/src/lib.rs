//! Core vocabulary-learning library shared by client applications.
//!
//! Provides:
//! - Shared types (Category, Vocab, QuizResult, User)
//! - Pagination over in-memory collections
//! - Quiz session state machine with two-option question generation
//! - Flashcard session (index, flip state, learned progress)

pub mod error;
pub mod flashcard;
pub mod pagination;
pub mod quiz;
pub mod types;

pub use error::QuizError;
pub use flashcard::{FlashcardSession, Progress};
pub use pagination::{paginate, Page};
pub use quiz::{QuizPhase, QuizQuestion, QuizSession};
pub use types::{
    category_name, Category, CategoryFilter, NewCategory, NewUser, NewVocab, QuizResult, User,
    Vocab,
};
