use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thinklink_core::{AppResult, NonEmptyString};

use crate::user::User;

/// Canonical role discriminator attached to a user.
///
/// Comparison against the known constants is exact and case-sensitive.
/// Values outside the closed set are kept verbatim instead of being coerced
/// to [`RoleTag::User`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleTag {
    /// Full administrator.
    Admin,
    /// Question contributor with admin panel access.
    Moderator,
    /// Regular player.
    User,
    /// Role constant the client does not know about.
    Unrecognized(String),
}

impl RoleTag {
    /// Storage value for administrators.
    pub const ADMIN: &'static str = "ADMIN";
    /// Storage value for moderators.
    pub const MODERATOR: &'static str = "MODERATOR";
    /// Storage value for regular users.
    pub const USER: &'static str = "USER";

    /// Maps a stored role constant onto a tag without normalisation.
    #[must_use]
    pub fn from_role_const(value: &str) -> Self {
        match value {
            Self::ADMIN => Self::Admin,
            Self::MODERATOR => Self::Moderator,
            Self::USER => Self::User,
            other => Self::Unrecognized(other.to_owned()),
        }
    }

    /// Returns the stored constant for this tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => Self::ADMIN,
            Self::Moderator => Self::MODERATOR,
            Self::User => Self::USER,
            Self::Unrecognized(value) => value.as_str(),
        }
    }

    /// Returns whether the tag is one of the three known constants.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl std::fmt::Display for RoleTag {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Resolves the role tag for a possibly anonymous user.
///
/// An absent user and a user without a role reference both resolve to
/// [`RoleTag::User`]. A reference that was not populated with its constant
/// resolves to an empty [`RoleTag::Unrecognized`].
#[must_use]
pub fn resolve_role(user: Option<&User>) -> RoleTag {
    let Some(role) = user.and_then(|user| user.role.as_ref()) else {
        return RoleTag::User;
    };

    match role.role_const.as_deref() {
        Some(value) => RoleTag::from_role_const(value),
        None => RoleTag::Unrecognized(String::new()),
    }
}

/// Role reference embedded in a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RoleRefWire")]
pub struct RoleRef {
    /// Backend identifier of the role.
    #[serde(rename = "_id")]
    pub id: String,
    /// Role constant, present when the backend populated the reference.
    #[serde(rename = "roleConst", skip_serializing_if = "Option::is_none")]
    pub role_const: Option<String>,
}

impl RoleRef {
    /// Creates a populated role reference.
    #[must_use]
    pub fn new(id: impl Into<String>, role_const: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role_const: Some(role_const.into()),
        }
    }
}

/// The backend sends either the populated role object or its bare id.
#[derive(Deserialize)]
#[serde(untagged)]
enum RoleRefWire {
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(rename = "roleConst", default)]
        role_const: Option<String>,
    },
    Id(String),
}

impl From<RoleRefWire> for RoleRef {
    fn from(value: RoleRefWire) -> Self {
        match value {
            RoleRefWire::Populated { id, role_const } => Self { id, role_const },
            RoleRefWire::Id(id) => Self {
                id,
                role_const: None,
            },
        }
    }
}

/// Role definition managed from the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Role constant such as `ADMIN`.
    pub role_const: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Role {
    /// Returns the tag this role maps to.
    #[must_use]
    pub fn tag(&self) -> RoleTag {
        RoleTag::from_role_const(self.role_const.as_str())
    }
}

/// Role definition together with the number of users holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleWithCount {
    /// Role definition.
    #[serde(flatten)]
    pub role: Role,
    /// Number of users assigned to the role.
    #[serde(default)]
    pub user_count: u64,
}

/// Payload for creating or renaming a role.
///
/// Role constants are stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInput {
    role_const: NonEmptyString,
}

impl RoleInput {
    /// Creates a validated role payload.
    pub fn new(role_const: impl Into<String>) -> AppResult<Self> {
        let role_const = role_const.into().to_uppercase();

        Ok(Self {
            role_const: NonEmptyString::new(role_const)?,
        })
    }

    /// Returns the normalised role constant.
    #[must_use]
    pub fn role_const(&self) -> &str {
        self.role_const.as_str()
    }
}

/// Single entry of a bulk role rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRename {
    /// Backend identifier of the role.
    pub id: String,
    /// New role constant.
    pub role_const: String,
}

impl RoleRename {
    /// Creates a bulk rename entry, normalising the constant like [`RoleInput`].
    pub fn new(id: impl Into<String>, role_const: impl Into<String>) -> AppResult<Self> {
        let input = RoleInput::new(role_const)?;

        Ok(Self {
            id: NonEmptyString::new(id)?.into(),
            role_const: input.role_const().to_owned(),
        })
    }
}
