use std::sync::Arc;

use async_trait::async_trait;
use thinklink_core::{AppError, AppResult};
use thinklink_domain::{
    ApiResponse, LoginCredentials, PermissionSet, ProfileUpdate, RoleRef, RoleTag,
    SignupRequest, User,
};
use tokio::sync::Mutex;

use super::SessionService;
use crate::{AuthGateway, AuthSession, CredentialStore};

#[derive(Default)]
struct FakeCredentialStore {
    session: Mutex<Option<AuthSession>>,
    fail_clear: bool,
}

#[async_trait]
impl CredentialStore for FakeCredentialStore {
    async fn save_session(&self, session: &AuthSession) -> AppResult<()> {
        *self.session.lock().await = Some(session.clone());
        Ok(())
    }

    async fn load_session(&self) -> AppResult<Option<AuthSession>> {
        Ok(self.session.lock().await.clone())
    }

    async fn clear_session(&self) -> AppResult<()> {
        if self.fail_clear {
            return Err(AppError::Internal("disk full".to_owned()));
        }

        *self.session.lock().await = None;
        Ok(())
    }
}

struct FakeAuthGateway {
    role_const: Option<&'static str>,
    accept: bool,
    profile_tokens: Mutex<Vec<String>>,
}

impl FakeAuthGateway {
    fn accepting(role_const: Option<&'static str>) -> Self {
        Self {
            role_const,
            accept: true,
            profile_tokens: Mutex::new(Vec::new()),
        }
    }

    fn rejecting() -> Self {
        Self {
            accept: false,
            ..Self::accepting(None)
        }
    }

    fn user(&self, full_name: &str) -> User {
        User {
            id: "u-1".to_owned(),
            full_name: full_name.to_owned(),
            mobile: "0123456789".to_owned(),
            role: self.role_const.map(|value| RoleRef::new("r-1", value)),
            created_at: None,
            updated_at: None,
        }
    }

    fn session(&self) -> ApiResponse<AuthSession> {
        if !self.accept {
            return ApiResponse::failure("Invalid credentials");
        }

        ApiResponse::Success(AuthSession {
            token: "token-1".to_owned(),
            user: self.user("Ada Lovelace"),
        })
    }
}

#[async_trait]
impl AuthGateway for FakeAuthGateway {
    async fn login(&self, _credentials: &LoginCredentials) -> AppResult<ApiResponse<AuthSession>> {
        Ok(self.session())
    }

    async fn signup(&self, _request: &SignupRequest) -> AppResult<ApiResponse<AuthSession>> {
        Ok(self.session())
    }

    async fn fetch_profile(&self, token: &str) -> AppResult<ApiResponse<User>> {
        self.profile_tokens.lock().await.push(token.to_owned());
        Ok(ApiResponse::Success(self.user("Ada King")))
    }

    async fn update_profile(
        &self,
        token: &str,
        _update: &ProfileUpdate,
    ) -> AppResult<ApiResponse<User>> {
        self.profile_tokens.lock().await.push(token.to_owned());
        Ok(ApiResponse::Success(self.user("Countess Lovelace")))
    }
}

fn credentials() -> LoginCredentials {
    match LoginCredentials::new("0123456789", "password1") {
        Ok(credentials) => credentials,
        Err(error) => panic!("invalid test credentials: {error}"),
    }
}

#[tokio::test]
async fn login_persists_session() {
    let store = Arc::new(FakeCredentialStore::default());
    let service = SessionService::new(
        Arc::new(FakeAuthGateway::accepting(Some("ADMIN"))),
        store.clone(),
    );

    let user = service.login(&credentials()).await;
    assert!(user.is_ok());
    assert!(service.is_authenticated().await);

    let stored = store.session.lock().await.clone();
    assert_eq!(stored.map(|session| session.token), Some("token-1".to_owned()));
    assert_eq!(service.role().await.ok(), Some(RoleTag::Admin));
}

#[tokio::test]
async fn rejected_login_is_unauthorized_and_stores_nothing() {
    let store = Arc::new(FakeCredentialStore::default());
    let service = SessionService::new(Arc::new(FakeAuthGateway::rejecting()), store.clone());

    let result = service.login(&credentials()).await;
    assert!(matches!(result, Err(AppError::Unauthorized(message)) if message == "Invalid credentials"));
    assert!(!service.is_authenticated().await);
}

#[tokio::test]
async fn rejected_signup_is_a_validation_error() {
    let service = SessionService::new(
        Arc::new(FakeAuthGateway::rejecting()),
        Arc::new(FakeCredentialStore::default()),
    );
    let Ok(request) = SignupRequest::new("Ada Lovelace", "0123456789", "password1") else {
        panic!("invalid test signup request");
    };
    let result = service.signup(&request).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn permissions_follow_the_stored_user() {
    let store = Arc::new(FakeCredentialStore::default());
    let service = SessionService::new(
        Arc::new(FakeAuthGateway::accepting(Some("MODERATOR"))),
        store,
    );

    assert_eq!(service.permissions().await.ok(), Some(PermissionSet::default()));

    let login = service.login(&credentials()).await;
    assert!(login.is_ok());

    let permissions = service.permissions().await.unwrap_or_default();
    assert!(permissions.can_create_questions);
    assert!(permissions.can_view_admin_panel);
    assert!(!permissions.can_edit_questions);

    service.logout().await;
    assert_eq!(service.permissions().await.ok(), Some(PermissionSet::default()));
}

#[tokio::test]
async fn refresh_profile_requires_a_token() {
    let service = SessionService::new(
        Arc::new(FakeAuthGateway::accepting(None)),
        Arc::new(FakeCredentialStore::default()),
    );

    let result = service.refresh_profile().await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn update_profile_sends_stored_token_and_caches_result() {
    let gateway = Arc::new(FakeAuthGateway::accepting(None));
    let service = SessionService::new(
        gateway.clone(),
        Arc::new(FakeCredentialStore::default()),
    );
    assert!(service.login(&credentials()).await.is_ok());

    let update = ProfileUpdate::new(Some("Countess Lovelace".to_owned()), None);
    assert!(update.is_ok());
    let result = service.update_profile(&update.unwrap_or_default()).await;
    assert!(result.is_ok());

    assert_eq!(
        gateway.profile_tokens.lock().await.clone(),
        vec!["token-1".to_owned()]
    );
    let cached = service.current_user().await.ok().flatten();
    assert_eq!(
        cached.map(|user| user.full_name),
        Some("Countess Lovelace".to_owned())
    );
}

#[tokio::test]
async fn logout_swallows_storage_errors() {
    let store = Arc::new(FakeCredentialStore {
        session: Mutex::new(None),
        fail_clear: true,
    });
    let service = SessionService::new(Arc::new(FakeAuthGateway::accepting(None)), store);

    service.logout().await;
    assert!(!service.is_authenticated().await);
}
