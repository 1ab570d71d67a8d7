//! Sign-in state of the local client.
//!
//! Wraps the authentication gateway and the credential store: successful
//! logins are persisted, and permissions are always derived from the
//! stored user at the moment they are requested.

use std::sync::Arc;

use thinklink_core::{AppError, AppResult};
use thinklink_domain::{
    ApiResponse, LoginCredentials, PermissionSet, ProfileUpdate, RoleTag, SignupRequest, User,
    resolve_role,
};
use tracing::{info, warn};

use crate::{AuthGateway, AuthSession, CredentialStore};

/// Application service for login, sign-up and the cached profile.
#[derive(Clone)]
pub struct SessionService {
    auth_gateway: Arc<dyn AuthGateway>,
    credential_store: Arc<dyn CredentialStore>,
}

impl SessionService {
    /// Creates a session service.
    #[must_use]
    pub fn new(
        auth_gateway: Arc<dyn AuthGateway>,
        credential_store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            auth_gateway,
            credential_store,
        }
    }

    /// Logs in and persists the returned session.
    pub async fn login(&self, credentials: &LoginCredentials) -> AppResult<User> {
        match self.auth_gateway.login(credentials).await? {
            ApiResponse::Success(session) => {
                self.credential_store.save_session(&session).await?;
                info!(
                    user_id = %session.user.id,
                    role = %resolve_role(Some(&session.user)),
                    "user logged in"
                );
                Ok(session.user)
            }
            ApiResponse::Failure { message } => Err(AppError::Unauthorized(message)),
        }
    }

    /// Registers an account and persists its first session.
    pub async fn signup(&self, request: &SignupRequest) -> AppResult<User> {
        match self.auth_gateway.signup(request).await? {
            ApiResponse::Success(session) => {
                self.credential_store.save_session(&session).await?;
                info!(user_id = %session.user.id, "user signed up");
                Ok(session.user)
            }
            ApiResponse::Failure { message } => Err(AppError::Validation(message)),
        }
    }

    /// Forgets the persisted session. Storage errors are logged, not returned.
    pub async fn logout(&self) {
        if let Err(error) = self.credential_store.clear_session().await {
            warn!(error = %error, "failed to clear stored session");
        }
    }

    /// Returns whether a token is stored. Storage errors count as signed out.
    pub async fn is_authenticated(&self) -> bool {
        match self.credential_store.load_session().await {
            Ok(session) => session.is_some(),
            Err(error) => {
                warn!(error = %error, "failed to read stored session");
                false
            }
        }
    }

    /// Returns the cached user, if signed in.
    pub async fn current_user(&self) -> AppResult<Option<User>> {
        Ok(self
            .credential_store
            .load_session()
            .await?
            .map(|session| session.user))
    }

    /// Returns the role of the cached user; anonymous callers are `USER`.
    pub async fn role(&self) -> AppResult<RoleTag> {
        let user = self.current_user().await?;
        Ok(resolve_role(user.as_ref()))
    }

    /// Returns the permission row of the cached user.
    pub async fn permissions(&self) -> AppResult<PermissionSet> {
        let user = self.current_user().await?;
        Ok(PermissionSet::for_user(user.as_ref()))
    }

    /// Re-fetches the profile and refreshes the cached user.
    pub async fn refresh_profile(&self) -> AppResult<User> {
        let session = self.require_session().await?;

        match self
            .auth_gateway
            .fetch_profile(session.token.as_str())
            .await?
        {
            ApiResponse::Success(user) => self.replace_cached_user(session, user).await,
            ApiResponse::Failure { message } => Err(AppError::Unauthorized(message)),
        }
    }

    /// Updates the signed-in user's profile and refreshes the cached user.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> AppResult<User> {
        let session = self.require_session().await?;

        match self
            .auth_gateway
            .update_profile(session.token.as_str(), update)
            .await?
        {
            ApiResponse::Success(user) => self.replace_cached_user(session, user).await,
            ApiResponse::Failure { message } => Err(AppError::Validation(message)),
        }
    }

    async fn require_session(&self) -> AppResult<AuthSession> {
        self.credential_store
            .load_session()
            .await?
            .ok_or_else(|| AppError::Unauthorized("no authentication token found".to_owned()))
    }

    async fn replace_cached_user(&self, session: AuthSession, user: User) -> AppResult<User> {
        self.credential_store
            .save_session(&AuthSession {
                token: session.token,
                user: user.clone(),
            })
            .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests;
