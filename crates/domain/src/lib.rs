//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod category;
mod deck;
mod pagination;
mod query;
mod question;
mod role;
mod security;
mod user;

pub use category::{
    CATEGORY_NAME_MAX_LENGTH, CATEGORY_NAME_MIN_LENGTH, Category, CategoryUpdate, NewCategory,
};
pub use deck::{DEFAULT_DISPLAY_PAGE_SIZE, DISPLAY_PAGE_SIZES, QuestionDeck};
pub use pagination::{ApiResponse, Page, PageMeta};
pub use query::{
    ALL_CATEGORIES, ALL_LEVELS, CategoryQuery, QuestionFilter, QuestionQuery, RoleQuery,
    SortOrder, UserQuery,
};
pub use question::{NewQuestion, Question, QuestionStats, QuestionUpdate, StatBucket};
pub use role::{Role, RoleInput, RoleRef, RoleRename, RoleTag, RoleWithCount, resolve_role};
pub use security::{
    Capability, PermissionSet, can_access_admin_panel, can_create_questions,
    can_delete_questions, can_edit_questions, can_manage_categories, can_manage_questions,
    can_manage_roles, can_manage_users, has_permission,
};
pub use user::{
    FULL_NAME_MIN_LENGTH, LoginCredentials, MOBILE_MIN_LENGTH, NewUser, PASSWORD_MIN_LENGTH,
    ProfileUpdate, SignupRequest, User, UserUpdate, validate_mobile, validate_password,
};
