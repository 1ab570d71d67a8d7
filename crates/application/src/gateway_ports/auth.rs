use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thinklink_core::AppResult;
use thinklink_domain::{ApiResponse, LoginCredentials, ProfileUpdate, SignupRequest, User};

/// Bearer token and the user it was issued for.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token sent with authenticated requests.
    pub token: String,
    /// Cached copy of the authenticated user.
    pub user: User,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Remote authentication endpoints.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a session.
    async fn login(&self, credentials: &LoginCredentials) -> AppResult<ApiResponse<AuthSession>>;

    /// Registers an account and returns its first session.
    async fn signup(&self, request: &SignupRequest) -> AppResult<ApiResponse<AuthSession>>;

    /// Fetches the profile the token belongs to.
    async fn fetch_profile(&self, token: &str) -> AppResult<ApiResponse<User>>;

    /// Updates the profile the token belongs to.
    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> AppResult<ApiResponse<User>>;
}
