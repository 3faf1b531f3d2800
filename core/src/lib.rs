//! Client core for searching a user and their posts.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` performs the
//! round-trip; `Searcher` runs the user and posts requests concurrently and
//! folds them into a `SearchState`.
//!
//! # Design
//! - `UserClient` is stateless. It holds only `base_url`.
//! - Each endpoint is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit and the `Transport` trait is the only thing tests replace.
//! - `SearchState` is a tagged enum; posts exist only in `Succeeded`.
//! - Ids outside 1..=10 are rejected before any request is built.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod search;
pub mod transport;
pub mod types;

pub use client::UserClient;
pub use config::Config;
pub use error::{ApiError, ConfigError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use search::{
    parse_id, resolve, validate_id, SearchSession, SearchState, SearchTicket, Searcher,
    MAX_USER_ID, MIN_USER_ID,
};
pub use transport::{ApiClient, ReqwestTransport, Transport};
pub use types::{Address, Company, Geo, Post, User};
