use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thinklink_core::{AppError, AppResult, NonEmptyString};

/// Minimum length of a category name.
pub const CATEGORY_NAME_MIN_LENGTH: usize = 2;

/// Maximum length of a category name.
pub const CATEGORY_NAME_MAX_LENGTH: usize = 30;

/// Question category with its presentation attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Unique category name.
    pub name: String,
    /// Display colour, usually a hex string.
    #[serde(default)]
    pub color: String,
    /// Icon name.
    #[serde(default)]
    pub icon: String,
    /// Whether the category is offered to players.
    #[serde(default)]
    pub is_active: bool,
    /// Number of questions in the category.
    #[serde(default)]
    pub question_count: u64,
    /// Position in ordered listings.
    #[serde(default)]
    pub sort_order: i64,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn validated_name(name: impl Into<String>) -> AppResult<NonEmptyString> {
    let name = NonEmptyString::new(name)
        .map_err(|_| AppError::Validation("category name must not be empty".to_owned()))?;
    let length = name.as_str().chars().count();

    if length < CATEGORY_NAME_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "category name must be at least {CATEGORY_NAME_MIN_LENGTH} characters"
        )));
    }

    if length > CATEGORY_NAME_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "category name must not exceed {CATEGORY_NAME_MAX_LENGTH} characters"
        )));
    }

    Ok(name)
}

/// Payload for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    name: NonEmptyString,
    color: String,
    icon: String,
    is_active: bool,
}

impl NewCategory {
    /// Creates a validated category payload.
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
        is_active: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            name: validated_name(name)?,
            color: color.into().trim().to_owned(),
            icon: icon.into().trim().to_owned(),
            is_active,
        })
    }

    /// Returns the category name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Partial category update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<NonEmptyString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
}

impl CategoryUpdate {
    /// Creates a validated partial update.
    pub fn new(
        name: Option<String>,
        color: Option<String>,
        icon: Option<String>,
        is_active: Option<bool>,
    ) -> AppResult<Self> {
        let update = Self {
            name: name.map(validated_name).transpose()?,
            color: color.map(|value| value.trim().to_owned()),
            icon: icon.map(|value| value.trim().to_owned()),
            is_active,
        };

        if update == Self::default() {
            return Err(AppError::Validation(
                "category update must change at least one field".to_owned(),
            ));
        }

        Ok(update)
    }
}
