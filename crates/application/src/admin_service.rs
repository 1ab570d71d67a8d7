//! Admin panel operations gated by the acting user's role.
//!
//! Every operation derives the permission row of the acting user before
//! touching the backend and fails with [`AppError::Forbidden`] when the
//! required capability is missing.

use std::sync::Arc;

use thinklink_core::{AppError, AppResult};
use thinklink_domain::{ApiResponse, Capability, PermissionSet, User, resolve_role};
use tracing::warn;

use crate::{CategoryGateway, QuestionGateway, RoleGateway, UserGateway};

mod accounts;
mod catalog;

/// Application service behind the admin panel screens.
#[derive(Clone)]
pub struct AdminService {
    questions: Arc<dyn QuestionGateway>,
    categories: Arc<dyn CategoryGateway>,
    users: Arc<dyn UserGateway>,
    roles: Arc<dyn RoleGateway>,
}

impl AdminService {
    /// Creates an admin service from its gateways.
    #[must_use]
    pub fn new(
        questions: Arc<dyn QuestionGateway>,
        categories: Arc<dyn CategoryGateway>,
        users: Arc<dyn UserGateway>,
        roles: Arc<dyn RoleGateway>,
    ) -> Self {
        Self {
            questions,
            categories,
            users,
            roles,
        }
    }

    /// Ensures the acting user's role grants the capability.
    pub fn require_capability(actor: Option<&User>, capability: Capability) -> AppResult<()> {
        if PermissionSet::for_user(actor).allows(capability) {
            return Ok(());
        }

        let role = resolve_role(actor);
        warn!(
            role = %role,
            capability = capability.as_str(),
            "admin operation denied"
        );

        Err(AppError::Forbidden(format!(
            "role '{role}' is missing capability '{}'",
            capability.as_str()
        )))
    }
}

/// Unwraps a backend answer, turning `success: false` into a validation error.
fn accepted<T>(response: ApiResponse<T>, action: &str) -> AppResult<T> {
    response
        .into_result()
        .map_err(|message| AppError::Validation(format!("failed to {action}: {message}")))
}
