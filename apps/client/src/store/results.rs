//! Quiz result store. Append-only: one record per completed quiz session.

use vocab_core::QuizResult;

use crate::api::{ApiClient, ApiError};

/// Fixed per-operation messages surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResultStoreError {
    #[error("failed to fetch results")]
    Fetch,

    #[error("failed to add result")]
    Add,
}

#[derive(Debug, Default)]
pub struct ResultStore {
    pub results: Vec<QuizResult>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection from the server.
    pub async fn fetch(&mut self, api: &ApiClient) -> Result<(), ResultStoreError> {
        self.loading = true;
        self.error = None;
        match api.list_results().await {
            Ok(results) => {
                self.results = results;
                self.loading = false;
                Ok(())
            }
            Err(cause) => {
                self.loading = false;
                Err(self.fail(cause, ResultStoreError::Fetch))
            }
        }
    }

    /// Persist a completed quiz result, then append locally.
    pub async fn add(&mut self, api: &ApiClient, payload: QuizResult) -> Result<(), ResultStoreError> {
        match api.create_result(&payload).await {
            Ok(result) => {
                self.results.push(result);
                Ok(())
            }
            Err(cause) => Err(self.fail(cause, ResultStoreError::Add)),
        }
    }

    fn fail(&mut self, cause: ApiError, err: ResultStoreError) -> ResultStoreError {
        tracing::warn!(error = %cause, "{err}");
        self.error = Some(err.to_string());
        err
    }
}
