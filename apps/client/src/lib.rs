//! VocabApp client: REST-backed stores, sessions, and the interactive shell.

pub mod api;
pub mod config;
pub mod shell;
pub mod state;
pub mod storage;
pub mod store;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::ApiClient;
use crate::config::Config;
use crate::shell::Shell;
use crate::state::AppState;
use crate::storage::SessionStorage;

/// Wire everything together and run the shell until quit.
pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(api_url = %config.api_url, "starting client");

    let api = ApiClient::new(&config.api_url);
    let storage = SessionStorage::new(&config.session_file);
    let mut state = AppState::new(api, storage);

    // restore a previous session, if any
    state.auth.load_from_storage(&state.storage);
    if let Some(user) = state.require_user() {
        tracing::info!(email = %user.email, "session restored");
    }

    Shell::new(state).run().await
}
