use async_trait::async_trait;
use thinklink_core::AppResult;

use super::AuthSession;

/// Local persistence for the signed-in session.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persists the token and user, replacing any previous session.
    async fn save_session(&self, session: &AuthSession) -> AppResult<()>;

    /// Loads the persisted session, if any.
    async fn load_session(&self) -> AppResult<Option<AuthSession>>;

    /// Removes the persisted session. Clearing an empty store succeeds.
    async fn clear_session(&self) -> AppResult<()>;
}
