//! Shared primitives for all Rust crates in ThinkLink.

#![forbid(unsafe_code)]

/// Build and release metadata.
pub mod version;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use version::VersionInfo;

/// Result type used across ThinkLink crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string with surrounding whitespace removed.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated or the stored credentials were rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but the role does not grant the capability.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The remote backend could not be reached or answered with an error status.
    #[error("transport error: {0}")]
    Transport(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
