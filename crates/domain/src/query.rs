use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thinklink_core::AppError;

/// Category selection meaning "no category filter" in the game screen.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Level selection meaning "no level filter" in the game screen.
pub const ALL_LEVELS: &str = "All";

/// Sort direction accepted by listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Returns the query-string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::Validation(format!(
                "unknown sort order '{value}'"
            ))),
        }
    }
}

/// Trims a filter value and drops it when nothing is left.
fn present(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}

/// Question search filter.
///
/// Every field is optional. Blank values are normalised to `None` so they
/// never reach the backend as present-but-empty parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    search: Option<String>,
    category: Option<String>,
    level: Option<String>,
}

impl QuestionFilter {
    /// Creates a filter from optional raw values.
    #[must_use]
    pub fn new(search: Option<String>, category: Option<String>, level: Option<String>) -> Self {
        Self {
            search: present(search),
            category: present(category),
            level: present(level),
        }
    }

    /// Creates a filter from the game screen selections, where
    /// [`ALL_CATEGORIES`] and [`ALL_LEVELS`] mean "unfiltered".
    #[must_use]
    pub fn from_selection(title: &str, category: &str, level: &str) -> Self {
        Self::new(
            Some(title.to_owned()),
            Some(category.trim().to_owned()).filter(|value| value != ALL_CATEGORIES),
            Some(level.trim().to_owned()).filter(|value| value != ALL_LEVELS),
        )
    }

    /// Free-text search term.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Category name.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Difficulty level.
    #[must_use]
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    /// Returns whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.category.is_none() && self.level.is_none()
    }
}

/// One page request against the question search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionQuery {
    /// Search filter.
    pub filter: QuestionFilter,
    /// 1-indexed page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Sort field.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
}

impl QuestionQuery {
    /// Creates a page request for a filter.
    #[must_use]
    pub fn page(filter: QuestionFilter, page: u32, limit: u32) -> Self {
        Self {
            filter,
            page: Some(page),
            limit: Some(limit),
            sort_by: None,
            sort_order: None,
        }
    }
}

/// Category listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryQuery {
    /// Free-text search on the name.
    pub search: Option<String>,
    /// Restrict to active or inactive categories.
    pub is_active: Option<bool>,
    /// 1-indexed page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Sort field.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
}

/// User listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Free-text search on name and mobile.
    pub search: Option<String>,
    /// Restrict to one role.
    pub role_id: Option<String>,
    /// 1-indexed page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Sort field.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
}

/// Role listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleQuery {
    /// Free-text search on the role constant.
    pub search: Option<String>,
    /// 1-indexed page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Sort field.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
}
