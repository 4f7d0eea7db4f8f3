//! Application state.
//!
//! One explicit state object owned by the shell, mutated only through the
//! store action handlers. No global singletons.

use vocab_core::User;

use crate::api::ApiClient;
use crate::storage::SessionStorage;
use crate::store::{AuthStore, CategoryStore, ResultStore, VocabStore};

pub struct AppState {
    pub api: ApiClient,
    pub storage: SessionStorage,
    pub auth: AuthStore,
    pub categories: CategoryStore,
    pub vocabs: VocabStore,
    pub results: ResultStore,
}

impl AppState {
    pub fn new(api: ApiClient, storage: SessionStorage) -> Self {
        Self {
            api,
            storage,
            auth: AuthStore::new(),
            categories: CategoryStore::new(),
            vocabs: VocabStore::new(),
            results: ResultStore::new(),
        }
    }

    /// Route guard: every page except login/register needs a current user.
    pub fn require_user(&self) -> Option<&User> {
        self.auth.current_user.as_ref()
    }
}
