//! Category store.

use vocab_core::{Category, NewCategory};

use crate::api::{ApiClient, ApiError};

/// Fixed per-operation messages surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CategoryStoreError {
    #[error("Failed to fetch categories")]
    Fetch,

    #[error("Failed to add category")]
    Add,

    #[error("Failed to update category")]
    Update,

    #[error("Failed to delete category")]
    Delete,
}

#[derive(Debug, Default)]
pub struct CategoryStore {
    pub categories: Vec<Category>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection from the server.
    pub async fn fetch(&mut self, api: &ApiClient) -> Result<(), CategoryStoreError> {
        self.loading = true;
        self.error = None;
        match api.list_categories().await {
            Ok(categories) => {
                self.categories = categories;
                self.loading = false;
                Ok(())
            }
            Err(cause) => {
                self.loading = false;
                Err(self.fail(cause, CategoryStoreError::Fetch))
            }
        }
    }

    /// Create on the server, then append locally.
    pub async fn add(
        &mut self,
        api: &ApiClient,
        payload: NewCategory,
    ) -> Result<(), CategoryStoreError> {
        match api.create_category(&payload).await {
            Ok(category) => {
                self.categories.push(category);
                Ok(())
            }
            Err(cause) => Err(self.fail(cause, CategoryStoreError::Add)),
        }
    }

    /// Full replace on the server, then replace-by-id locally.
    pub async fn update(
        &mut self,
        api: &ApiClient,
        id: i64,
        payload: NewCategory,
    ) -> Result<(), CategoryStoreError> {
        match api.update_category(id, &payload).await {
            Ok(category) => {
                for existing in &mut self.categories {
                    if existing.id == category.id {
                        *existing = category.clone();
                    }
                }
                Ok(())
            }
            Err(cause) => Err(self.fail(cause, CategoryStoreError::Update)),
        }
    }

    /// Delete on the server, then filter out locally. Vocabs referencing the
    /// category are left alone; they display an empty category name.
    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<(), CategoryStoreError> {
        match api.delete_category(id).await {
            Ok(()) => {
                self.categories.retain(|c| c.id != id);
                Ok(())
            }
            Err(cause) => Err(self.fail(cause, CategoryStoreError::Delete)),
        }
    }

    /// Name for display; empty for unknown ids (orphaned references).
    pub fn name_of(&self, id: i64) -> &str {
        vocab_core::category_name(&self.categories, id).unwrap_or("")
    }

    fn fail(&mut self, cause: ApiError, err: CategoryStoreError) -> CategoryStoreError {
        tracing::warn!(error = %cause, "{err}");
        self.error = Some(err.to_string());
        err
    }
}
