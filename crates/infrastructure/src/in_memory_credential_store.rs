use async_trait::async_trait;
use thinklink_application::{AuthSession, CredentialStore};
use thinklink_core::AppResult;
use tokio::sync::RwLock;

/// Process-local credential store; the session is lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    session: RwLock<Option<AuthSession>>,
}

impl InMemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding a session.
    #[must_use]
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn save_session(&self, session: &AuthSession) -> AppResult<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn load_session(&self) -> AppResult<Option<AuthSession>> {
        Ok(self.session.read().await.clone())
    }

    async fn clear_session(&self) -> AppResult<()> {
        self.session.write().await.take();
        Ok(())
    }
}
