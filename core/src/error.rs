//! Error types for the user API client and the search input.
//!
//! # Design
//! `ApiError` covers everything that can go wrong once a request is issued:
//! a non-2xx status, a transport failure, or a body that is not the expected
//! JSON. A 404 is an ordinary `Http` error here; the search orchestrator is
//! the one that reinterprets it as "user not found".
//!
//! `ValidationError` is raised before any request exists and is never
//! retryable without changing the input.

use thiserror::Error;

/// Errors returned by `UserClient` parse methods and by transports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a status outside 2xx.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be deserialized into the expected type.
    #[error("invalid response body: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

/// A search id that was rejected before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("user id must be between 1 and 10, got {0}")]
    OutOfRange(i64),

    #[error("user id must be a whole number between 1 and 10, got {0:?}")]
    NotANumber(String),
}

/// Invalid values in the environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    EmptyBaseUrl { var: &'static str },
}
