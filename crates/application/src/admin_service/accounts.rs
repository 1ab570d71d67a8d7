use thinklink_domain::{
    NewUser, Page, Role, RoleInput, RoleQuery, RoleRename, RoleWithCount, UserQuery, UserUpdate,
};

use super::*;

impl AdminService {
    /// Lists one page of users.
    pub async fn list_users(&self, actor: Option<&User>, query: &UserQuery) -> AppResult<Page<User>> {
        Self::require_capability(actor, Capability::CanManageUsers)?;
        accepted(self.users.list_users(query).await?, "load users")
    }

    /// Lists one page of users holding a role.
    pub async fn users_by_role(
        &self,
        actor: Option<&User>,
        role_id: &str,
        query: &UserQuery,
    ) -> AppResult<Page<User>> {
        Self::require_capability(actor, Capability::CanManageUsers)?;
        accepted(
            self.users.users_by_role(role_id, query).await?,
            "load users by role",
        )
    }

    /// Fetches one user.
    pub async fn get_user(&self, actor: Option<&User>, user_id: &str) -> AppResult<User> {
        Self::require_capability(actor, Capability::CanManageUsers)?;
        accepted(self.users.get_user(user_id).await?, "load user")
    }

    /// Creates a user account.
    pub async fn create_user(&self, actor: Option<&User>, user: &NewUser) -> AppResult<User> {
        Self::require_capability(actor, Capability::CanManageUsers)?;
        accepted(self.users.create_user(user).await?, "create user")
    }

    /// Updates a user account.
    pub async fn update_user(
        &self,
        actor: Option<&User>,
        user_id: &str,
        update: &UserUpdate,
    ) -> AppResult<User> {
        Self::require_capability(actor, Capability::CanManageUsers)?;
        accepted(self.users.update_user(user_id, update).await?, "update user")
    }

    /// Deletes a user account. Acting users cannot delete themselves.
    pub async fn delete_user(&self, actor: Option<&User>, user_id: &str) -> AppResult<()> {
        Self::require_capability(actor, Capability::CanManageUsers)?;
        if actor.is_some_and(|actor| actor.id == user_id) {
            return Err(AppError::Conflict(
                "users cannot delete their own account".to_owned(),
            ));
        }

        accepted(self.users.delete_user(user_id).await?, "delete user")
    }

    /// Lists one page of roles.
    pub async fn list_roles(&self, actor: Option<&User>, query: &RoleQuery) -> AppResult<Page<Role>> {
        Self::require_capability(actor, Capability::CanManageRoles)?;
        accepted(self.roles.list_roles(query).await?, "load roles")
    }

    /// Fetches one role by identifier.
    pub async fn get_role(&self, actor: Option<&User>, role_id: &str) -> AppResult<Role> {
        Self::require_capability(actor, Capability::CanManageRoles)?;
        accepted(self.roles.get_role(role_id).await?, "load role")
    }

    /// Fetches one role by its constant.
    pub async fn get_role_by_const(&self, actor: Option<&User>, role_const: &str) -> AppResult<Role> {
        Self::require_capability(actor, Capability::CanManageRoles)?;
        accepted(
            self.roles.get_role_by_const(role_const).await?,
            "load role",
        )
    }

    /// Lists roles with their user counts.
    pub async fn roles_with_counts(&self, actor: Option<&User>) -> AppResult<Vec<RoleWithCount>> {
        Self::require_capability(actor, Capability::CanManageRoles)?;
        accepted(self.roles.roles_with_counts().await?, "load role counts")
    }

    /// Creates a role.
    pub async fn create_role(&self, actor: Option<&User>, role: &RoleInput) -> AppResult<Role> {
        Self::require_capability(actor, Capability::CanManageRoles)?;
        accepted(self.roles.create_role(role).await?, "create role")
    }

    /// Renames a role.
    pub async fn update_role(
        &self,
        actor: Option<&User>,
        role_id: &str,
        role: &RoleInput,
    ) -> AppResult<Role> {
        Self::require_capability(actor, Capability::CanManageRoles)?;
        accepted(self.roles.update_role(role_id, role).await?, "update role")
    }

    /// Deletes a role.
    pub async fn delete_role(&self, actor: Option<&User>, role_id: &str) -> AppResult<()> {
        Self::require_capability(actor, Capability::CanManageRoles)?;
        accepted(self.roles.delete_role(role_id).await?, "delete role")
    }

    /// Renames several roles at once. An empty batch is a no-op.
    pub async fn bulk_update_roles(
        &self,
        actor: Option<&User>,
        renames: &[RoleRename],
    ) -> AppResult<()> {
        Self::require_capability(actor, Capability::CanManageRoles)?;
        if renames.is_empty() {
            return Ok(());
        }

        accepted(
            self.roles.bulk_update_roles(renames).await?,
            "update roles",
        )
    }
}
