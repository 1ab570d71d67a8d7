mod accounts;
mod auth;
mod catalog;
mod credentials;

pub use accounts::{RoleGateway, UserGateway};
pub use auth::{AuthGateway, AuthSession};
pub use catalog::{CategoryGateway, QuestionGateway};
pub use credentials::CredentialStore;
