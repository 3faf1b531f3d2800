//! Runtime configuration for the user API client.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const BASE_URL_VAR: &str = "USER_SEARCH_BASE_URL";
pub const TIMEOUT_VAR: &str = "USER_SEARCH_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Read `USER_SEARCH_BASE_URL` and `USER_SEARCH_TIMEOUT_SECS`, falling
    /// back to the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_VAR) {
            config.set_base_url(BASE_URL_VAR, &url)?;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.timeout = parse_timeout(&raw).ok_or(ConfigError::InvalidTimeout {
                var: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }

    /// Replace the base URL, trimming whitespace. `source` names the variable
    /// or flag the value came from, for the error message.
    pub fn set_base_url(&mut self, source: &'static str, url: &str) -> Result<(), ConfigError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl { var: source });
        }
        self.base_url = url.to_string();
        Ok(())
    }
}

fn parse_timeout(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => None,
    }
}
