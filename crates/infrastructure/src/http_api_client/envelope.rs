use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thinklink_core::{AppError, AppResult};
use thinklink_domain::{ApiResponse, Page, PageMeta, User};

/// Backend response wrapper.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    data: Value,
}

impl Envelope {
    fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_owned())
    }
}

/// Pagination block; each listing names its counters differently.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaginationWire {
    #[serde(default)]
    current_page: u32,
    #[serde(default)]
    total_pages: u32,
    #[serde(
        default,
        alias = "totalQuestions",
        alias = "totalCategories",
        alias = "totalUsers",
        alias = "totalRoles"
    )]
    total_items: u64,
    #[serde(default, alias = "hasNextPage")]
    has_next: bool,
    #[serde(default, alias = "hasPrevPage")]
    has_prev: bool,
}

impl From<PaginationWire> for PageMeta {
    fn from(value: PaginationWire) -> Self {
        Self {
            current_page: value.current_page,
            total_pages: value.total_pages,
            total_items: value.total_items,
            has_next: value.has_next,
            has_prev: value.has_prev,
        }
    }
}

/// `data` of a paginated listing: the items under their listing key plus
/// the pagination block.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(super) struct ListPayload<T> {
    #[serde(
        default,
        alias = "questions",
        alias = "categories",
        alias = "users",
        alias = "roles"
    )]
    items: Option<Vec<T>>,
    #[serde(default)]
    pagination: Option<PaginationWire>,
}

impl<T> ListPayload<T> {
    pub(super) fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

/// A listing without items is the final page, whatever its pagination says.
impl<T> From<ListPayload<T>> for Page<T> {
    fn from(value: ListPayload<T>) -> Self {
        let Some(items) = value.items else {
            let mut meta = value.pagination.map(PageMeta::from).unwrap_or_default();
            meta.has_next = false;
            return Page::new(Vec::new(), meta);
        };

        let meta = match value.pagination {
            Some(pagination) => PageMeta::from(pagination),
            None => PageMeta::last(1, u64::try_from(items.len()).unwrap_or(u64::MAX)),
        };

        Page::new(items, meta)
    }
}

/// `data` of the single-user endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct UserPayload {
    pub(super) user: User,
}

/// Maps a non-success HTTP status to an application error.
pub(super) fn status_error(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::Transport(format!("HTTP {}: {message}", status.as_u16())),
    }
}

/// Decodes one backend response.
///
/// A 2xx envelope with `success: false` is a backend failure answer, not an
/// error. Non-2xx statuses become errors carrying the envelope message
/// when one is present.
pub(super) fn decode_response<T>(
    status: StatusCode,
    body: &[u8],
    operation: &str,
) -> AppResult<ApiResponse<T>>
where
    T: DeserializeOwned,
{
    let envelope = serde_json::from_slice::<Envelope>(body);

    if !status.is_success() {
        let fallback = status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_owned();
        let message = envelope
            .map(|envelope| envelope.message_or(fallback.as_str()))
            .unwrap_or(fallback);
        return Err(status_error(status, format!("{operation}: {message}")));
    }

    let envelope = envelope.map_err(|error| {
        AppError::Internal(format!("failed to decode {operation} response: {error}"))
    })?;

    if !envelope.success {
        return Ok(ApiResponse::failure(envelope.message_or("request failed")));
    }

    serde_json::from_value::<T>(envelope.data)
        .map(ApiResponse::Success)
        .map_err(|error| {
            AppError::Internal(format!("failed to decode {operation} payload: {error}"))
        })
}
