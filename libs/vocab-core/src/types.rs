//! Core types for the vocabulary-learning application.
//!
//! Wire types serialize as camelCase JSON to match the generic REST backend;
//! ids are assigned by the server on create.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A word category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Create/update payload for a category (the server owns the id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A vocabulary entry referencing a category by id.
///
/// Referential integrity is not enforced: a vocab may outlive its category,
/// in which case the category name displays as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocab {
    pub id: i64,
    pub word: String,
    pub meaning: String,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_learned: Option<bool>,
}

impl Vocab {
    /// Whether this entry has been marked as learned.
    pub fn learned(&self) -> bool {
        self.is_learned.unwrap_or(false)
    }
}

/// Create/update payload for a vocab entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVocab {
    pub word: String,
    pub meaning: String,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_learned: Option<bool>,
}

/// One completed quiz session, append-only on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub date: DateTime<Utc>,
    pub category_id: i64,
    pub score: u32,
    pub total: u32,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    /// Copy of this user with the credential stripped, for local persistence.
    pub fn without_password(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Category selection for flashcard and quiz sessions.
///
/// The wire format keeps the legacy sentinel: id 0 means "all categories".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    All,
    Category(i64),
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::All
    }
}

impl CategoryFilter {
    /// Create from the wire sentinel (0 = all).
    pub fn from_id(id: i64) -> Self {
        if id == 0 {
            Self::All
        } else {
            Self::Category(id)
        }
    }

    /// Convert back to the wire sentinel.
    pub fn to_id(self) -> i64 {
        match self {
            Self::All => 0,
            Self::Category(id) => id,
        }
    }

    /// Whether a vocab entry passes this filter.
    pub fn matches(&self, vocab: &Vocab) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => vocab.category_id == *id,
        }
    }
}

/// Look up a category name by id.
///
/// Returns `None` for unknown ids (deleted categories, the 0 sentinel);
/// callers display an empty name in that case.
pub fn category_name(categories: &[Category], id: i64) -> Option<&str> {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
}
