use async_trait::async_trait;
use thinklink_core::AppResult;
use thinklink_domain::{
    ApiResponse, NewUser, Page, Role, RoleInput, RoleQuery, RoleRename, RoleWithCount, User,
    UserQuery, UserUpdate,
};

/// Remote user administration endpoints.
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Fetches one page of users.
    async fn list_users(&self, query: &UserQuery) -> AppResult<ApiResponse<Page<User>>>;

    /// Fetches one page of users holding a role.
    async fn users_by_role(
        &self,
        role_id: &str,
        query: &UserQuery,
    ) -> AppResult<ApiResponse<Page<User>>>;

    /// Fetches one user.
    async fn get_user(&self, user_id: &str) -> AppResult<ApiResponse<User>>;

    /// Creates a user account.
    async fn create_user(&self, user: &NewUser) -> AppResult<ApiResponse<User>>;

    /// Applies a partial update to a user account.
    async fn update_user(&self, user_id: &str, update: &UserUpdate)
    -> AppResult<ApiResponse<User>>;

    /// Deletes a user account.
    async fn delete_user(&self, user_id: &str) -> AppResult<ApiResponse<()>>;
}

/// Remote role administration endpoints.
#[async_trait]
pub trait RoleGateway: Send + Sync {
    /// Fetches one page of roles.
    async fn list_roles(&self, query: &RoleQuery) -> AppResult<ApiResponse<Page<Role>>>;

    /// Fetches one role by identifier.
    async fn get_role(&self, role_id: &str) -> AppResult<ApiResponse<Role>>;

    /// Fetches one role by its constant.
    async fn get_role_by_const(&self, role_const: &str) -> AppResult<ApiResponse<Role>>;

    /// Lists roles with the number of users holding each.
    async fn roles_with_counts(&self) -> AppResult<ApiResponse<Vec<RoleWithCount>>>;

    /// Creates a role.
    async fn create_role(&self, role: &RoleInput) -> AppResult<ApiResponse<Role>>;

    /// Renames a role.
    async fn update_role(&self, role_id: &str, role: &RoleInput) -> AppResult<ApiResponse<Role>>;

    /// Deletes a role.
    async fn delete_role(&self, role_id: &str) -> AppResult<ApiResponse<()>>;

    /// Renames several roles in one call.
    async fn bulk_update_roles(&self, renames: &[RoleRename]) -> AppResult<ApiResponse<()>>;
}
