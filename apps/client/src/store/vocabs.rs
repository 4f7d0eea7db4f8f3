//! Vocabulary store.

use vocab_core::{NewVocab, Vocab};

use crate::api::{ApiClient, ApiError};

/// Fixed per-operation messages surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VocabStoreError {
    #[error("failed to fetch")]
    Fetch,

    #[error("failed to add")]
    Add,

    #[error("failed to update")]
    Update,

    #[error("failed to delete")]
    Delete,
}

#[derive(Debug, Default)]
pub struct VocabStore {
    pub vocabs: Vec<Vocab>,
    pub loading: bool,
    pub error: Option<String>,
}

impl VocabStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection from the server.
    pub async fn fetch(&mut self, api: &ApiClient) -> Result<(), VocabStoreError> {
        self.loading = true;
        self.error = None;
        match api.list_vocabs().await {
            Ok(vocabs) => {
                self.vocabs = vocabs;
                self.loading = false;
                Ok(())
            }
            Err(cause) => {
                self.loading = false;
                Err(self.fail(cause, VocabStoreError::Fetch))
            }
        }
    }

    /// Create on the server, then prepend locally (newest entries first).
    pub async fn add(&mut self, api: &ApiClient, payload: NewVocab) -> Result<(), VocabStoreError> {
        match api.create_vocab(&payload).await {
            Ok(vocab) => {
                self.vocabs.insert(0, vocab);
                Ok(())
            }
            Err(cause) => Err(self.fail(cause, VocabStoreError::Add)),
        }
    }

    /// Full replace on the server, then replace-by-id locally.
    pub async fn update(
        &mut self,
        api: &ApiClient,
        id: i64,
        payload: NewVocab,
    ) -> Result<(), VocabStoreError> {
        match api.update_vocab(id, &payload).await {
            Ok(vocab) => {
                self.replace(vocab);
                Ok(())
            }
            Err(cause) => Err(self.fail(cause, VocabStoreError::Update)),
        }
    }

    /// Delete on the server, then filter out locally.
    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<(), VocabStoreError> {
        match api.delete_vocab(id).await {
            Ok(()) => {
                self.vocabs.retain(|v| v.id != id);
                Ok(())
            }
            Err(cause) => Err(self.fail(cause, VocabStoreError::Delete)),
        }
    }

    /// PATCH the learned flag on the server, then replace-by-id locally.
    /// Idempotent in intent; callers guard the redundant call.
    pub async fn mark_learned(&mut self, api: &ApiClient, id: i64) -> Result<(), VocabStoreError> {
        match api.mark_vocab_learned(id).await {
            Ok(vocab) => {
                self.replace(vocab);
                Ok(())
            }
            Err(cause) => Err(self.fail(cause, VocabStoreError::Update)),
        }
    }

    fn replace(&mut self, vocab: Vocab) {
        for existing in &mut self.vocabs {
            if existing.id == vocab.id {
                *existing = vocab.clone();
            }
        }
    }

    fn fail(&mut self, cause: ApiError, err: VocabStoreError) -> VocabStoreError {
        tracing::warn!(error = %cause, "{err}");
        self.error = Some(err.to_string());
        err
    }
}
