//! ThinkLink command-line client.

#![forbid(unsafe_code)]

mod cli_config;
mod commands;

use std::sync::Arc;

use clap::Parser;
use thinklink_application::{
    AdminService, AggregatorSettings, GameService, PageAggregator, SessionService,
};
use thinklink_core::AppError;
use thinklink_infrastructure::{FileCredentialStore, HttpApiClient};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli_config::CliConfig;
use crate::commands::{Cli, CliServices};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    init_tracing();

    let config = CliConfig::load()?;
    let services = build_services(&config)?;

    debug!(
        api_base_url = %config.api_base_url,
        credentials_path = %config.credentials_path.display(),
        "thinklink started"
    );

    commands::run(cli.command, &services).await
}

fn build_services(config: &CliConfig) -> Result<CliServices, AppError> {
    let credential_store = Arc::new(FileCredentialStore::new(config.credentials_path.clone()));
    let api_client = Arc::new(HttpApiClient::new(
        config.api_base_url.as_str(),
        config.http_timeout,
        credential_store.clone(),
    )?);
    let aggregator = PageAggregator::new(
        api_client.clone(),
        AggregatorSettings::new(config.search_page_size, config.max_search_pages)?,
    );

    Ok(CliServices {
        session: SessionService::new(api_client.clone(), credential_store),
        game: GameService::new(api_client.clone(), aggregator),
        admin: AdminService::new(
            api_client.clone(),
            api_client.clone(),
            api_client.clone(),
            api_client,
        ),
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
