//! Local session persistence.
//!
//! A single JSON file holds the serialized current user, read on startup to
//! restore the session and removed on logout. The persisted record has the
//! password stripped; the credential never reaches disk.

use std::path::{Path, PathBuf};

use vocab_core::User;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// File-backed session record.
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform data directory, falling back to the current directory.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocabapp")
            .join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the current user (password stripped by the caller).
    pub fn save(&self, user: &User) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Restore the persisted user; a missing file is simply no session.
    pub fn load(&self) -> Result<Option<User>, StorageError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Remove the persisted session, if any.
    pub fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user() -> User {
        User {
            id: 1,
            email: "a@b.com".to_string(),
            first_name: Some("A".to_string()),
            last_name: Some("B".to_string()),
            password: None,
        }
    }

    #[test]
    fn test_save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path().join("session.json"));

        assert_eq!(storage.load().unwrap(), None);

        storage.save(&user()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(user()));

        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);

        // clearing again is fine
        storage.clear().unwrap();
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path().join("nested/deeper/session.json"));
        storage.save(&user()).unwrap();
        assert!(storage.path().exists());
    }
}
