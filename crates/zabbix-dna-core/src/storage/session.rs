//! Session token cache.
//!
//! Stores the last login token so repeated invocations against the same
//! server and user skip `user.login`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub url: String,
    pub username: String,
    pub token: String,
    /// RFC 3339 timestamp of the login
    pub created_at: String,
}

impl Session {
    pub fn new(url: &str, username: &str, token: &str) -> Self {
        Self {
            url: url.to_string(),
            username: username.to_string(),
            token: token.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// File-backed session cache
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Cached session for this server and user, if any.
    pub async fn load(&self, url: &str, username: &str) -> Result<Option<Session>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        let session: Session = match serde_json::from_str(&content) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable session file: {}", e);
                return Ok(None);
            }
        };

        if session.url != url || session.username != username || session.token.is_empty() {
            return Ok(None);
        }

        Ok(Some(session))
    }

    pub async fn save(&self, session: &Session) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::DirectoryAccess(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(session)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&self.path).await?;
        #[cfg(unix)]
        {
            // mode() only applies to newly created files
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600)).await?;
        }
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.display().to_string()));
        }
        fs::remove_file(&self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> (SessionStore, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path().join("sub").join("session.json"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_load_missing() {
        let (store, _dir) = create_test_store();
        assert!(store.load("http://zbx", "Admin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (store, _dir) = create_test_store();
        let session = Session::new("http://zbx", "Admin", "tok");
        store.save(&session).await.unwrap();

        let loaded = store.load("http://zbx", "Admin").await.unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let (store, _dir) = create_test_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{}").unwrap();
        std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        store
            .save(&Session::new("http://zbx", "Admin", "tok"))
            .await
            .unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(store.load("http://zbx", "Admin").await.unwrap().is_some());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_new_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let (store, _dir) = create_test_store();
        store
            .save(&Session::new("http://zbx", "Admin", "tok"))
            .await
            .unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_other_user_is_ignored() {
        let (store, _dir) = create_test_store();
        store
            .save(&Session::new("http://zbx", "Admin", "tok"))
            .await
            .unwrap();

        assert!(store.load("http://zbx", "guest").await.unwrap().is_none());
        assert!(store.load("http://other", "Admin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_ignored() {
        let (store, _dir) = create_test_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json").unwrap();

        assert!(store.load("http://zbx", "Admin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let (store, _dir) = create_test_store();
        assert!(matches!(store.clear().await, Err(StorageError::NotFound(_))));

        store
            .save(&Session::new("http://zbx", "Admin", "tok"))
            .await
            .unwrap();
        store.clear().await.unwrap();
        assert!(!store.path().exists());
    }
}
