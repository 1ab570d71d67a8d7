use async_trait::async_trait;
use reqwest::Method;
use thinklink_application::{AuthGateway, AuthSession};
use thinklink_core::AppResult;
use thinklink_domain::{ApiResponse, LoginCredentials, ProfileUpdate, SignupRequest, User};

use super::HttpApiClient;

#[async_trait]
impl AuthGateway for HttpApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> AppResult<ApiResponse<AuthSession>> {
        let url = self.endpoint(&["auth", "login"])?;
        self.call_with_body(Method::POST, url, credentials, "login")
            .await
    }

    async fn signup(&self, request: &SignupRequest) -> AppResult<ApiResponse<AuthSession>> {
        let url = self.endpoint(&["auth", "signup"])?;
        self.call_with_body(Method::POST, url, request, "signup")
            .await
    }

    async fn fetch_profile(&self, token: &str) -> AppResult<ApiResponse<User>> {
        let url = self.endpoint(&["auth", "profile"])?;
        let request = self.http_client.get(url).bearer_auth(token);
        self.execute(request, "fetch profile").await
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> AppResult<ApiResponse<User>> {
        let url = self.endpoint(&["auth", "profile"])?;
        let request = self.http_client.put(url).bearer_auth(token).json(update);
        self.execute(request, "update profile").await
    }
}
