use serde::{Deserialize, Serialize};

/// Pagination metadata returned with every listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// 1-indexed page number of this page.
    pub current_page: u32,
    /// Total number of pages reported by the backend.
    pub total_pages: u32,
    /// Total number of matching items.
    pub total_items: u64,
    /// Whether a subsequent page exists.
    pub has_next: bool,
    /// Whether a preceding page exists.
    pub has_prev: bool,
}

impl PageMeta {
    /// Metadata for a lone final page.
    #[must_use]
    pub fn last(current_page: u32, total_items: u64) -> Self {
        Self {
            current_page,
            total_pages: current_page,
            total_items,
            has_next: false,
            has_prev: current_page > 1,
        }
    }
}

/// One page of listing results in backend order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Creates a page from items and metadata.
    #[must_use]
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }

    /// Returns whether the backend reported a further page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.meta.has_next
    }
}

/// Outcome of a well-formed backend call.
///
/// Transport failures are reported through `AppResult`; this type only
/// separates the backend's own success and failure answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    /// The backend accepted the request.
    Success(T),
    /// The backend answered with `success: false`.
    Failure {
        /// Message supplied by the backend.
        message: String,
    },
}

impl<T> ApiResponse<T> {
    /// Creates a failure response.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Returns whether this is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Maps the success payload.
    pub fn map<U>(self, transform: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            Self::Success(value) => ApiResponse::Success(transform(value)),
            Self::Failure { message } => ApiResponse::Failure { message },
        }
    }

    /// Converts into a `Result` carrying the failure message.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure { message } => Err(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiResponse, PageMeta};

    #[test]
    fn last_page_has_no_next() {
        let meta = PageMeta::last(3, 25);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn failure_survives_map() {
        let response: ApiResponse<u32> = ApiResponse::failure("boom");
        let mapped = response.map(|value| value + 1);
        assert_eq!(mapped.into_result(), Err("boom".to_owned()));
    }
}
