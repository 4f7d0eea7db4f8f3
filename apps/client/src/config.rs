//! Environment-driven configuration.

use std::path::PathBuf;

use crate::storage::SessionStorage;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST backend.
    pub api_url: String,
    /// Location of the persisted session file.
    pub session_file: PathBuf,
}

impl Config {
    /// Load from the environment (`.env` honored when present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = std::env::var("VOCAB_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        let session_file = std::env::var("VOCAB_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| SessionStorage::default_path());

        Self {
            api_url,
            session_file,
        }
    }
}
