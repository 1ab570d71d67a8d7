use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thinklink_core::AppError;

use crate::role::{RoleTag, resolve_role};
use crate::user::User;

/// Capabilities gated by a user's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// Allows full question administration.
    CanManageQuestions,
    /// Allows full category administration.
    CanManageCategories,
    /// Allows managing user accounts.
    CanManageUsers,
    /// Allows managing role definitions.
    CanManageRoles,
    /// Allows creating questions.
    CanCreateQuestions,
    /// Allows editing existing questions.
    CanEditQuestions,
    /// Allows deleting questions.
    CanDeleteQuestions,
    /// Allows creating categories.
    CanCreateCategories,
    /// Allows editing categories and toggling their status.
    CanEditCategories,
    /// Allows deleting categories.
    CanDeleteCategories,
    /// Allows opening the admin panel.
    CanViewAdminPanel,
}

impl Capability {
    /// Returns the stable camelCase name of this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CanManageQuestions => "canManageQuestions",
            Self::CanManageCategories => "canManageCategories",
            Self::CanManageUsers => "canManageUsers",
            Self::CanManageRoles => "canManageRoles",
            Self::CanCreateQuestions => "canCreateQuestions",
            Self::CanEditQuestions => "canEditQuestions",
            Self::CanDeleteQuestions => "canDeleteQuestions",
            Self::CanCreateCategories => "canCreateCategories",
            Self::CanEditCategories => "canEditCategories",
            Self::CanDeleteCategories => "canDeleteCategories",
            Self::CanViewAdminPanel => "canViewAdminPanel",
        }
    }

    /// Returns all known capabilities in table order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Capability] = &[
            Capability::CanManageQuestions,
            Capability::CanManageCategories,
            Capability::CanManageUsers,
            Capability::CanManageRoles,
            Capability::CanCreateQuestions,
            Capability::CanEditQuestions,
            Capability::CanDeleteQuestions,
            Capability::CanCreateCategories,
            Capability::CanEditCategories,
            Capability::CanDeleteCategories,
            Capability::CanViewAdminPanel,
        ];

        ALL
    }
}

impl FromStr for Capability {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|capability| capability.as_str() == value)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("unknown capability '{value}'")))
    }
}

/// Complete capability record derived from a role tag.
///
/// Always fully populated. Values are recomputed from the role on every
/// request and never cached or mutated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    /// See [`Capability::CanManageQuestions`].
    pub can_manage_questions: bool,
    /// See [`Capability::CanManageCategories`].
    pub can_manage_categories: bool,
    /// See [`Capability::CanManageUsers`].
    pub can_manage_users: bool,
    /// See [`Capability::CanManageRoles`].
    pub can_manage_roles: bool,
    /// See [`Capability::CanCreateQuestions`].
    pub can_create_questions: bool,
    /// See [`Capability::CanEditQuestions`].
    pub can_edit_questions: bool,
    /// See [`Capability::CanDeleteQuestions`].
    pub can_delete_questions: bool,
    /// See [`Capability::CanCreateCategories`].
    pub can_create_categories: bool,
    /// See [`Capability::CanEditCategories`].
    pub can_edit_categories: bool,
    /// See [`Capability::CanDeleteCategories`].
    pub can_delete_categories: bool,
    /// See [`Capability::CanViewAdminPanel`].
    pub can_view_admin_panel: bool,
}

impl PermissionSet {
    /// Every capability granted.
    const FULL: Self = Self {
        can_manage_questions: true,
        can_manage_categories: true,
        can_manage_users: true,
        can_manage_roles: true,
        can_create_questions: true,
        can_edit_questions: true,
        can_delete_questions: true,
        can_create_categories: true,
        can_edit_categories: true,
        can_delete_categories: true,
        can_view_admin_panel: true,
    };

    /// Moderators may only add questions through the admin panel.
    const MODERATOR: Self = Self {
        can_manage_questions: false,
        can_manage_categories: false,
        can_manage_users: false,
        can_manage_roles: false,
        can_create_questions: true,
        can_edit_questions: false,
        can_delete_questions: false,
        can_create_categories: false,
        can_edit_categories: false,
        can_delete_categories: false,
        can_view_admin_panel: true,
    };

    /// Nothing granted.
    const NONE: Self = Self {
        can_manage_questions: false,
        can_manage_categories: false,
        can_manage_users: false,
        can_manage_roles: false,
        can_create_questions: false,
        can_edit_questions: false,
        can_delete_questions: false,
        can_create_categories: false,
        can_edit_categories: false,
        can_delete_categories: false,
        can_view_admin_panel: false,
    };

    /// Returns the fixed permission row for a role tag.
    ///
    /// `USER` and every unrecognized tag share the all-false row.
    #[must_use]
    pub fn for_role(role: &RoleTag) -> Self {
        match role {
            RoleTag::Admin => Self::FULL,
            RoleTag::Moderator => Self::MODERATOR,
            RoleTag::User | RoleTag::Unrecognized(_) => Self::NONE,
        }
    }

    /// Resolves the user's role and returns its permission row.
    #[must_use]
    pub fn for_user(user: Option<&User>) -> Self {
        Self::for_role(&resolve_role(user))
    }

    /// Returns whether the capability is granted.
    #[must_use]
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::CanManageQuestions => self.can_manage_questions,
            Capability::CanManageCategories => self.can_manage_categories,
            Capability::CanManageUsers => self.can_manage_users,
            Capability::CanManageRoles => self.can_manage_roles,
            Capability::CanCreateQuestions => self.can_create_questions,
            Capability::CanEditQuestions => self.can_edit_questions,
            Capability::CanDeleteQuestions => self.can_delete_questions,
            Capability::CanCreateCategories => self.can_create_categories,
            Capability::CanEditCategories => self.can_edit_categories,
            Capability::CanDeleteCategories => self.can_delete_categories,
            Capability::CanViewAdminPanel => self.can_view_admin_panel,
        }
    }

    /// Returns the granted capabilities in table order.
    #[must_use]
    pub fn granted(&self) -> Vec<Capability> {
        Capability::all()
            .iter()
            .copied()
            .filter(|capability| self.allows(*capability))
            .collect()
    }
}

/// Returns whether the user's role grants the capability.
#[must_use]
pub fn has_permission(user: Option<&User>, capability: Capability) -> bool {
    PermissionSet::for_user(user).allows(capability)
}

/// Returns whether the user may open the admin panel.
#[must_use]
pub fn can_access_admin_panel(user: Option<&User>) -> bool {
    has_permission(user, Capability::CanViewAdminPanel)
}

/// Returns whether the user may administer questions.
#[must_use]
pub fn can_manage_questions(user: Option<&User>) -> bool {
    has_permission(user, Capability::CanManageQuestions)
}

/// Returns whether the user may create questions.
#[must_use]
pub fn can_create_questions(user: Option<&User>) -> bool {
    has_permission(user, Capability::CanCreateQuestions)
}

/// Returns whether the user may edit questions.
#[must_use]
pub fn can_edit_questions(user: Option<&User>) -> bool {
    has_permission(user, Capability::CanEditQuestions)
}

/// Returns whether the user may delete questions.
#[must_use]
pub fn can_delete_questions(user: Option<&User>) -> bool {
    has_permission(user, Capability::CanDeleteQuestions)
}

/// Returns whether the user may administer categories.
#[must_use]
pub fn can_manage_categories(user: Option<&User>) -> bool {
    has_permission(user, Capability::CanManageCategories)
}

/// Returns whether the user may manage user accounts.
#[must_use]
pub fn can_manage_users(user: Option<&User>) -> bool {
    has_permission(user, Capability::CanManageUsers)
}

/// Returns whether the user may manage roles.
#[must_use]
pub fn can_manage_roles(user: Option<&User>) -> bool {
    has_permission(user, Capability::CanManageRoles)
}
