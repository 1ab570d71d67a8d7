//! Application services and ports.

#![forbid(unsafe_code)]

mod admin_service;
mod game_service;
mod gateway_ports;
mod page_aggregator;
mod session_service;

pub use admin_service::AdminService;
pub use game_service::{GameChoices, GameRound, GameService};
pub use gateway_ports::{
    AuthGateway, AuthSession, CategoryGateway, CredentialStore, QuestionGateway, RoleGateway,
    UserGateway,
};
pub use page_aggregator::{
    Aggregation, AggregationStatus, AggregatorSettings, CancellationFlag, DEFAULT_MAX_PAGES,
    MAX_FETCH_PAGE_SIZE, PageAggregator,
};
pub use session_service::SessionService;
