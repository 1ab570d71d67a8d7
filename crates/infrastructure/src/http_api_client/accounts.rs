use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use thinklink_application::{RoleGateway, UserGateway};
use thinklink_core::AppResult;
use thinklink_domain::{
    ApiResponse, NewUser, Page, Role, RoleInput, RoleQuery, RoleRename, RoleWithCount, User,
    UserQuery, UserUpdate,
};

use super::HttpApiClient;
use super::envelope::{ListPayload, UserPayload};
use super::query_params::{role_pairs, user_pairs, with_query};

#[derive(Serialize)]
struct BulkRoleUpdate<'a> {
    roles: &'a [RoleRename],
}

#[async_trait]
impl UserGateway for HttpApiClient {
    async fn list_users(&self, query: &UserQuery) -> AppResult<ApiResponse<Page<User>>> {
        let url = with_query(self.endpoint(&["auth", "users"])?, &user_pairs(query));
        Ok(self
            .call::<ListPayload<User>>(Method::GET, url, "list users")
            .await?
            .map(Page::from))
    }

    async fn users_by_role(
        &self,
        role_id: &str,
        query: &UserQuery,
    ) -> AppResult<ApiResponse<Page<User>>> {
        let url = with_query(
            self.endpoint(&["auth", "users", "role", role_id])?,
            &user_pairs(query),
        );
        Ok(self
            .call::<ListPayload<User>>(Method::GET, url, "list users by role")
            .await?
            .map(Page::from))
    }

    async fn get_user(&self, user_id: &str) -> AppResult<ApiResponse<User>> {
        let url = self.endpoint(&["auth", "users", user_id])?;
        Ok(self
            .call::<UserPayload>(Method::GET, url, "get user")
            .await?
            .map(|payload| payload.user))
    }

    async fn create_user(&self, user: &NewUser) -> AppResult<ApiResponse<User>> {
        let url = self.endpoint(&["auth", "users"])?;
        Ok(self
            .call_with_body::<_, UserPayload>(Method::POST, url, user, "create user")
            .await?
            .map(|payload| payload.user))
    }

    async fn update_user(
        &self,
        user_id: &str,
        update: &UserUpdate,
    ) -> AppResult<ApiResponse<User>> {
        let url = self.endpoint(&["auth", "users", user_id])?;
        Ok(self
            .call_with_body::<_, UserPayload>(Method::PUT, url, update, "update user")
            .await?
            .map(|payload| payload.user))
    }

    async fn delete_user(&self, user_id: &str) -> AppResult<ApiResponse<()>> {
        let url = self.endpoint(&["auth", "users", user_id])?;
        self.call_discarding(Method::DELETE, url, "delete user")
            .await
    }
}

#[async_trait]
impl RoleGateway for HttpApiClient {
    async fn list_roles(&self, query: &RoleQuery) -> AppResult<ApiResponse<Page<Role>>> {
        let url = with_query(self.endpoint(&["roles"])?, &role_pairs(query));
        Ok(self
            .call::<ListPayload<Role>>(Method::GET, url, "list roles")
            .await?
            .map(Page::from))
    }

    async fn get_role(&self, role_id: &str) -> AppResult<ApiResponse<Role>> {
        let url = self.endpoint(&["roles", role_id])?;
        self.call(Method::GET, url, "get role").await
    }

    async fn get_role_by_const(&self, role_const: &str) -> AppResult<ApiResponse<Role>> {
        let url = self.endpoint(&["roles", "const", role_const])?;
        self.call(Method::GET, url, "get role by const").await
    }

    async fn roles_with_counts(&self) -> AppResult<ApiResponse<Vec<RoleWithCount>>> {
        let url = self.endpoint(&["roles", "with-counts"])?;
        self.call(Method::GET, url, "roles with counts").await
    }

    async fn create_role(&self, role: &RoleInput) -> AppResult<ApiResponse<Role>> {
        let url = self.endpoint(&["roles"])?;
        self.call_with_body(Method::POST, url, role, "create role")
            .await
    }

    async fn update_role(&self, role_id: &str, role: &RoleInput) -> AppResult<ApiResponse<Role>> {
        let url = self.endpoint(&["roles", role_id])?;
        self.call_with_body(Method::PUT, url, role, "update role")
            .await
    }

    async fn delete_role(&self, role_id: &str) -> AppResult<ApiResponse<()>> {
        let url = self.endpoint(&["roles", role_id])?;
        self.call_discarding(Method::DELETE, url, "delete role")
            .await
    }

    async fn bulk_update_roles(&self, renames: &[RoleRename]) -> AppResult<ApiResponse<()>> {
        let url = self.endpoint(&["roles", "bulk-update"])?;
        let body = BulkRoleUpdate { roles: renames };
        Ok(self
            .call_with_body::<_, serde::de::IgnoredAny>(Method::PUT, url, &body, "bulk update roles")
            .await?
            .map(|_| ()))
    }
}
