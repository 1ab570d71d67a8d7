//! reqwest adapter for the ThinkLink REST backend.
//!
//! One client implements every gateway port. Each request carries the
//! bearer token of the stored session, when there is one, and the backend
//! envelope `{ success, message, data }` is decoded into [`ApiResponse`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use thinklink_application::CredentialStore;
use thinklink_core::{AppError, AppResult};
use thinklink_domain::ApiResponse;
use tracing::debug;
use url::Url;

mod accounts;
mod auth;
mod catalog;
mod envelope;
mod query_params;

/// Backend used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://apigateway.up.railway.app";

/// Per-request timeout used when none is configured.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_millis(10_000);

/// HTTP implementation of the authentication, question, category, user and
/// role gateways.
pub struct HttpApiClient {
    http_client: reqwest::Client,
    base_url: Url,
    credential_store: Arc<dyn CredentialStore>,
}

impl HttpApiClient {
    /// Creates a client for the backend at `base_url`.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credential_store: Arc<dyn CredentialStore>,
    ) -> AppResult<Self> {
        let base_url = Url::parse(base_url).map_err(|error| {
            AppError::Validation(format!("invalid API base URL '{base_url}': {error}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "API base URL '{base_url}' cannot carry a path"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            http_client,
            base_url,
            credential_store,
        })
    }

    /// Returns the backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/v1/<segments..>`, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Internal("API base URL cannot carry a path".to_owned()))?
            .pop_if_empty()
            .push("v1")
            .extend(segments);

        Ok(url)
    }

    async fn authorized(&self, method: Method, url: Url) -> AppResult<reqwest::RequestBuilder> {
        let request = self.http_client.request(method, url);

        Ok(match self.credential_store.load_session().await? {
            Some(session) => request.bearer_auth(session.token),
            None => request,
        })
    }

    async fn call<T>(
        &self,
        method: Method,
        url: Url,
        operation: &'static str,
    ) -> AppResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let request = self.authorized(method, url).await?;
        self.execute(request, operation).await
    }

    async fn call_with_body<B, T>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        operation: &'static str,
    ) -> AppResult<ApiResponse<T>>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorized(method, url).await?.json(body);
        self.execute(request, operation).await
    }

    /// Issues a request whose `data` payload is ignored.
    async fn call_discarding(
        &self,
        method: Method,
        url: Url,
        operation: &'static str,
    ) -> AppResult<ApiResponse<()>> {
        Ok(self
            .call::<IgnoredAny>(method, url, operation)
            .await?
            .map(|_| ()))
    }

    async fn execute<T>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> AppResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|error| {
            AppError::Transport(format!("{operation} request failed: {error}"))
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|error| {
            AppError::Transport(format!("{operation} response body unavailable: {error}"))
        })?;

        debug!(
            operation,
            status = status.as_u16(),
            bytes = body.len(),
            "backend responded"
        );

        envelope::decode_response(status, &body, operation)
    }
}
