//! User domain types and validation rules.
//!
//! Mirrors the checks the sign-up, login and profile forms apply before a
//! request reaches the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thinklink_core::{AppError, AppResult, NonEmptyString};

use crate::role::RoleRef;

/// Minimum number of characters in a mobile number.
pub const MOBILE_MIN_LENGTH: usize = 10;

/// Minimum password length accepted at sign-up.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Minimum length of a trimmed full name.
pub const FULL_NAME_MIN_LENGTH: usize = 2;

/// Authenticated user as cached by the client.
///
/// Owned by the backend; the client only holds a read-only copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Mobile number used as the login.
    pub mobile: String,
    /// Optional role reference. Absent means a regular user.
    #[serde(rename = "roleId", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleRef>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validates a mobile number used as a login.
pub fn validate_mobile(mobile: &str) -> AppResult<()> {
    let trimmed = mobile.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "mobile number must not be empty".to_owned(),
        ));
    }

    if trimmed.chars().count() < MOBILE_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "mobile number must be at least {MOBILE_MIN_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Validates a plaintext password chosen at sign-up or by an administrator.
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.trim().is_empty() {
        return Err(AppError::Validation("password must not be empty".to_owned()));
    }

    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    Ok(())
}

fn validated_full_name(full_name: impl Into<String>) -> AppResult<NonEmptyString> {
    let full_name = NonEmptyString::new(full_name)?;
    if full_name.as_str().chars().count() < FULL_NAME_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "full name must be at least {FULL_NAME_MIN_LENGTH} characters"
        )));
    }

    Ok(full_name)
}

/// Credentials submitted by the login form.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    mobile: String,
    password: String,
}

impl LoginCredentials {
    /// Creates validated login credentials. The mobile number is trimmed.
    pub fn new(mobile: impl Into<String>, password: impl Into<String>) -> AppResult<Self> {
        let mobile = mobile.into();
        let password = password.into();
        validate_mobile(mobile.as_str())?;
        if password.trim().is_empty() {
            return Err(AppError::Validation("password must not be empty".to_owned()));
        }

        Ok(Self {
            mobile: mobile.trim().to_owned(),
            password,
        })
    }

    /// Returns the trimmed mobile number.
    #[must_use]
    pub fn mobile(&self) -> &str {
        self.mobile.as_str()
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LoginCredentials")
            .field("mobile", &self.mobile)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Sign-up form payload.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    full_name: NonEmptyString,
    mobile: String,
    password: String,
}

impl SignupRequest {
    /// Creates a validated sign-up payload.
    pub fn new(
        full_name: impl Into<String>,
        mobile: impl Into<String>,
        password: impl Into<String>,
    ) -> AppResult<Self> {
        let mobile = mobile.into();
        let password = password.into();
        validate_mobile(mobile.as_str())?;
        validate_password(password.as_str())?;

        Ok(Self {
            full_name: validated_full_name(full_name)?,
            mobile: mobile.trim().to_owned(),
            password,
        })
    }

    /// Returns the trimmed full name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Returns the trimmed mobile number.
    #[must_use]
    pub fn mobile(&self) -> &str {
        self.mobile.as_str()
    }
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SignupRequest")
            .field("full_name", &self.full_name)
            .field("mobile", &self.mobile)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Partial update of the signed-in user's own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<NonEmptyString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mobile: Option<String>,
}

impl ProfileUpdate {
    /// Creates a validated profile update. At least one field must be set.
    pub fn new(full_name: Option<String>, mobile: Option<String>) -> AppResult<Self> {
        if full_name.is_none() && mobile.is_none() {
            return Err(AppError::Validation(
                "profile update must change at least one field".to_owned(),
            ));
        }

        let full_name = full_name.map(validated_full_name).transpose()?;
        let mobile = mobile
            .map(|value| validate_mobile(value.as_str()).map(|()| value.trim().to_owned()))
            .transpose()?;

        Ok(Self { full_name, mobile })
    }
}

/// Account created by an administrator.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    full_name: NonEmptyString,
    mobile: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    role_id: Option<String>,
}

impl NewUser {
    /// Creates a validated account payload.
    pub fn new(
        full_name: impl Into<String>,
        mobile: impl Into<String>,
        password: impl Into<String>,
        role_id: Option<String>,
    ) -> AppResult<Self> {
        let mobile = mobile.into();
        let password = password.into();
        validate_mobile(mobile.as_str())?;
        validate_password(password.as_str())?;

        Ok(Self {
            full_name: validated_full_name(full_name)?,
            mobile: mobile.trim().to_owned(),
            password,
            role_id: non_blank(role_id),
        })
    }

    /// Returns the trimmed mobile number.
    #[must_use]
    pub fn mobile(&self) -> &str {
        self.mobile.as_str()
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NewUser")
            .field("full_name", &self.full_name)
            .field("mobile", &self.mobile)
            .field("password", &"<redacted>")
            .field("role_id", &self.role_id)
            .finish()
    }
}

/// Partial account update issued by an administrator.
///
/// A blank password keeps the current one.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<NonEmptyString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role_id: Option<String>,
}

impl UserUpdate {
    /// Creates a validated account update.
    pub fn new(
        full_name: Option<String>,
        mobile: Option<String>,
        password: Option<String>,
        role_id: Option<String>,
    ) -> AppResult<Self> {
        let full_name = full_name.map(validated_full_name).transpose()?;
        let mobile = mobile
            .map(|value| validate_mobile(value.as_str()).map(|()| value.trim().to_owned()))
            .transpose()?;
        let password = password.filter(|value| !value.trim().is_empty());
        if let Some(password) = password.as_deref() {
            validate_password(password)?;
        }

        Ok(Self {
            full_name,
            mobile,
            password,
            role_id: non_blank(role_id),
        })
    }
}

impl std::fmt::Debug for UserUpdate {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("UserUpdate")
            .field("full_name", &self.full_name)
            .field("mobile", &self.mobile)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("role_id", &self.role_id)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim().to_owned();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

#[cfg(test)]
mod tests {
    use super::{
        LoginCredentials, NewUser, ProfileUpdate, SignupRequest, User, UserUpdate,
        validate_mobile, validate_password,
    };

    #[test]
    fn short_mobile_is_rejected() {
        assert!(validate_mobile("12345").is_err());
        assert!(validate_mobile("   ").is_err());
        assert!(validate_mobile("0123456789").is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn login_trims_mobile() {
        let credentials = LoginCredentials::new(" 0123456789 ", "secret");
        assert!(credentials.is_ok());
        assert_eq!(
            credentials
                .map(|credentials| credentials.mobile().to_owned())
                .unwrap_or_default(),
            "0123456789"
        );
    }

    #[test]
    fn login_rejects_blank_password() {
        assert!(LoginCredentials::new("0123456789", "  ").is_err());
    }

    #[test]
    fn signup_requires_two_character_name() {
        assert!(SignupRequest::new(" A ", "0123456789", "password1").is_err());
        assert!(SignupRequest::new("Al", "0123456789", "password1").is_ok());
    }

    #[test]
    fn signup_serializes_camel_case_fields() {
        let request = SignupRequest::new("Grace Hopper", "0123456789", "password1");
        assert!(request.is_ok());
        let value = request
            .ok()
            .and_then(|request| serde_json::to_value(&request).ok())
            .unwrap_or_default();

        assert_eq!(value["fullName"], "Grace Hopper");
        assert_eq!(value["mobile"], "0123456789");
    }

    #[test]
    fn debug_output_redacts_password() {
        let credentials = LoginCredentials::new("0123456789", "hunter22");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn empty_profile_update_is_rejected() {
        assert!(ProfileUpdate::new(None, None).is_err());
        assert!(ProfileUpdate::new(Some("New Name".to_owned()), None).is_ok());
    }

    #[test]
    fn blank_role_id_is_dropped() {
        let user = NewUser::new("Alan Turing", "0123456789", "password1", Some(" ".to_owned()));
        let value = user
            .ok()
            .and_then(|user| serde_json::to_value(&user).ok())
            .unwrap_or_default();

        assert!(value.get("roleId").is_none());
    }

    #[test]
    fn blank_password_in_update_keeps_current_one() {
        let update = UserUpdate::new(None, None, Some("   ".to_owned()), None);
        let value = update
            .ok()
            .and_then(|update| serde_json::to_value(&update).ok())
            .unwrap_or_default();

        assert!(value.get("password").is_none());
    }

    #[test]
    fn user_decodes_backend_shape() {
        let payload = r#"{
            "_id": "64f1",
            "fullName": "Ada Lovelace",
            "mobile": "0123456789",
            "roleId": {"_id": "r-1", "roleConst": "ADMIN"},
            "createdAt": "2025-01-14T10:00:00.000Z",
            "updatedAt": "2025-01-14T10:00:00.000Z"
        }"#;
        let user: Result<User, _> = serde_json::from_str(payload);
        assert!(user.is_ok());

        let role_const = user
            .ok()
            .and_then(|user| user.role)
            .and_then(|role| role.role_const);
        assert_eq!(role_const.as_deref(), Some("ADMIN"));
    }

    #[test]
    fn user_without_role_decodes() {
        let payload = r#"{"_id":"64f2","fullName":"Bob","mobile":"0123456789","roleId":null}"#;
        let user: Result<User, _> = serde_json::from_str(payload);
        assert!(user.is_ok());
        assert!(user.ok().and_then(|user| user.role).is_none());
    }
}
