//! In-memory mirrors of the server-side collections.
//!
//! Each store holds `loading`, `error`, and its collection, and mutates the
//! collection only after the server round-trip succeeds. Mutation outcomes
//! are explicit `Result` values; the store additionally records the fixed
//! per-operation message the UI displays. A failed mutation leaves the
//! collection untouched (pessimistic by construction, no rollback needed).

pub mod auth;
pub mod categories;
pub mod results;
pub mod vocabs;

pub use auth::{AuthError, AuthStore};
pub use categories::{CategoryStore, CategoryStoreError};
pub use results::{ResultStore, ResultStoreError};
pub use vocabs::{VocabStore, VocabStoreError};
