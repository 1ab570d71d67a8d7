use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thinklink_application::{AuthSession, CredentialStore};
use thinklink_core::{AppError, AppResult};
use tracing::debug;

/// Credential store persisting the session as a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the session file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn io_error(&self, action: &str, error: &std::io::Error) -> AppError {
        AppError::Internal(format!(
            "failed to {action} session file '{}': {error}",
            self.path.display()
        ))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn save_session(&self, session: &AuthSession) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|error| self.io_error("create directory for", &error))?;
        }

        let payload = serde_json::to_vec_pretty(session).map_err(|error| {
            AppError::Internal(format!("failed to encode session: {error}"))
        })?;
        tokio::fs::write(&self.path, payload)
            .await
            .map_err(|error| self.io_error("write", &error))?;

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    async fn load_session(&self) -> AppResult<Option<AuthSession>> {
        let payload = match tokio::fs::read(&self.path).await {
            Ok(payload) => payload,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error("read", &error)),
        };

        serde_json::from_slice(&payload).map(Some).map_err(|error| {
            AppError::Internal(format!(
                "session file '{}' is corrupt: {error}",
                self.path.display()
            ))
        })
    }

    async fn clear_session(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(self.io_error("remove", &error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use thinklink_application::{AuthSession, CredentialStore};
    use thinklink_domain::{RoleRef, User};

    use super::FileCredentialStore;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("thinklink-store-{}-{name}", std::process::id()))
            .join("session.json")
    }

    fn session() -> AuthSession {
        AuthSession {
            token: "token-1".to_owned(),
            user: User {
                id: "u-1".to_owned(),
                full_name: "Grace Hopper".to_owned(),
                mobile: "0123456789".to_owned(),
                role: Some(RoleRef::new("r-1", "MODERATOR")),
                created_at: None,
                updated_at: None,
            },
        }
    }

    #[tokio::test]
    async fn missing_file_means_no_session() {
        let store = FileCredentialStore::new(scratch_path("missing"));

        assert!(matches!(store.load_session().await, Ok(None)));
        assert!(store.clear_session().await.is_ok());
    }

    #[tokio::test]
    async fn saved_session_survives_a_new_store() {
        let path = scratch_path("persist");
        let store = FileCredentialStore::new(path.clone());
        assert!(store.save_session(&session()).await.is_ok());

        let reopened = FileCredentialStore::new(path);
        let loaded = reopened.load_session().await;
        assert!(matches!(loaded, Ok(Some(ref loaded)) if *loaded == session()));

        assert!(reopened.clear_session().await.is_ok());
        assert!(matches!(reopened.load_session().await, Ok(None)));
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let path = scratch_path("corrupt");
        if let Some(parent) = path.parent() {
            let _ = tokio::fs::create_dir_all(parent).await;
        }
        let _ = tokio::fs::write(&path, b"{not json").await;

        let store = FileCredentialStore::new(path);
        assert!(store.load_session().await.is_err());
        assert!(store.clear_session().await.is_ok());
    }
}
