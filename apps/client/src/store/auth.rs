//! Auth store: the single active user, restored from local storage on load.

use vocab_core::{NewUser, User};

use crate::api::{ApiClient, ApiError};
use crate::storage::SessionStorage;

/// Auth failures, reduced to the exact messages the UI displays.
///
/// A login transport failure and a credential mismatch are deliberately
/// distinct variants even though the original UI showed both inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Register failed!")]
    Register,

    #[error("Login failed!")]
    Login,

    #[error("Email or password is incorrect!")]
    InvalidCredentials,
}

#[derive(Debug, Default)]
pub struct AuthStore {
    pub current_user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    /// Set after a successful registration so the UI can redirect to login.
    pub success: bool,
}

impl AuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account. Does not log the user in.
    pub async fn register(&mut self, api: &ApiClient, payload: NewUser) -> Result<(), AuthError> {
        self.loading = true;
        self.error = None;
        self.success = false;
        match api.create_user(&payload).await {
            Ok(_) => {
                self.loading = false;
                self.success = true;
                Ok(())
            }
            Err(cause) => {
                self.loading = false;
                Err(self.fail(cause, AuthError::Register))
            }
        }
    }

    /// Log in by plaintext email + password match against the backend.
    ///
    /// An empty match is a credential error; a transport failure is a login
    /// error. On success the user (minus password) is persisted so the
    /// session survives restarts.
    pub async fn login(
        &mut self,
        api: &ApiClient,
        storage: &SessionStorage,
        email: &str,
        password: &str,
    ) -> Result<&User, AuthError> {
        self.loading = true;
        self.error = None;
        let users = match api.find_users(email, password).await {
            Ok(users) => users,
            Err(cause) => {
                self.loading = false;
                return Err(self.fail(cause, AuthError::Login));
            }
        };
        self.loading = false;

        let Some(user) = users.into_iter().next() else {
            self.error = Some(AuthError::InvalidCredentials.to_string());
            return Err(AuthError::InvalidCredentials);
        };

        let persisted = user.without_password();
        if let Err(e) = storage.save(&persisted) {
            tracing::warn!(error = %e, "failed to persist session");
        }
        self.current_user = Some(persisted);
        Ok(self.current_user.as_ref().expect("just set"))
    }

    /// Drop the current user and the persisted session.
    pub fn logout(&mut self, storage: &SessionStorage) {
        self.current_user = None;
        if let Err(e) = storage.clear() {
            tracing::warn!(error = %e, "failed to clear session");
        }
    }

    /// Restore the session persisted by a previous login, if any.
    pub fn load_from_storage(&mut self, storage: &SessionStorage) {
        match storage.load() {
            Ok(user) => self.current_user = user,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load session");
                self.current_user = None;
            }
        }
    }

    /// Clear transient flags after the UI has consumed them.
    pub fn reset(&mut self) {
        self.loading = false;
        self.error = None;
        self.success = false;
    }

    fn fail(&mut self, cause: ApiError, err: AuthError) -> AuthError {
        tracing::warn!(error = %cause, "{err}");
        self.error = Some(err.to_string());
        err
    }
}
