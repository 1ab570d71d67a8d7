use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thinklink_application::{DEFAULT_MAX_PAGES, MAX_FETCH_PAGE_SIZE};
use thinklink_core::{AppError, AppResult};
use thinklink_infrastructure::DEFAULT_API_BASE_URL;

const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_CREDENTIALS_PATH: &str = ".thinklink/session.json";

/// Runtime configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub api_base_url: String,
    pub http_timeout: Duration,
    pub search_page_size: u32,
    pub max_search_pages: u32,
    pub credentials_path: PathBuf,
}

impl CliConfig {
    /// Loads configuration from process environment variables.
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let api_base_url = lookup("THINKLINK_API_BASE_URL")
            .map(|value| value.trim().trim_end_matches('/').to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let http_timeout_ms = parse_env_u64(
            &lookup,
            "THINKLINK_HTTP_TIMEOUT_MS",
            DEFAULT_HTTP_TIMEOUT_MS,
        )?;
        let search_page_size =
            parse_env_u32(&lookup, "THINKLINK_SEARCH_PAGE_SIZE", MAX_FETCH_PAGE_SIZE)?;
        let max_search_pages =
            parse_env_u32(&lookup, "THINKLINK_MAX_SEARCH_PAGES", DEFAULT_MAX_PAGES)?;
        let credentials_path = lookup("THINKLINK_CREDENTIALS_PATH")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.to_owned());

        if http_timeout_ms == 0 {
            return Err(AppError::Validation(
                "THINKLINK_HTTP_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }

        if search_page_size == 0 || search_page_size > MAX_FETCH_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "THINKLINK_SEARCH_PAGE_SIZE must be between 1 and {MAX_FETCH_PAGE_SIZE}"
            )));
        }

        if max_search_pages == 0 {
            return Err(AppError::Validation(
                "THINKLINK_MAX_SEARCH_PAGES must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            api_base_url,
            http_timeout: Duration::from_millis(http_timeout_ms),
            search_page_size,
            max_search_pages,
            credentials_path: PathBuf::from(credentials_path),
        })
    }
}

fn parse_env_u32(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
) -> AppResult<u32> {
    match lookup(name) {
        Some(value) => value.trim().parse::<u32>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

fn parse_env_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
) -> AppResult<u64> {
    match lookup(name) {
        Some(value) => value.trim().parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    use thinklink_application::DEFAULT_MAX_PAGES;
    use thinklink_core::AppError;

    use super::CliConfig;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        CliConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let Ok(config) = load(&[]) else {
            panic!("defaults should load");
        };

        assert_eq!(config.api_base_url, "https://apigateway.up.railway.app");
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.search_page_size, 100);
        assert_eq!(config.max_search_pages, DEFAULT_MAX_PAGES);
        assert_eq!(
            config.credentials_path,
            PathBuf::from(".thinklink/session.json")
        );
    }

    #[test]
    fn overrides_are_trimmed_and_parsed() {
        let config = load(&[
            ("THINKLINK_API_BASE_URL", " http://localhost:4000/ "),
            ("THINKLINK_HTTP_TIMEOUT_MS", "2500"),
            ("THINKLINK_SEARCH_PAGE_SIZE", " 25 "),
        ]);

        let Ok(config) = config else {
            panic!("overrides should load");
        };
        assert_eq!(config.api_base_url, "http://localhost:4000");
        assert_eq!(config.http_timeout, Duration::from_millis(2500));
        assert_eq!(config.search_page_size, 25);
    }

    #[test]
    fn zero_and_malformed_values_are_rejected() {
        assert!(matches!(
            load(&[("THINKLINK_MAX_SEARCH_PAGES", "0")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(&[("THINKLINK_SEARCH_PAGE_SIZE", "101")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(&[("THINKLINK_HTTP_TIMEOUT_MS", "soon")]),
            Err(AppError::Validation(_))
        ));
    }
}
