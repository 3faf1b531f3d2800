//! Search orchestration: validate an id, fetch the user and their posts
//! concurrently, and fold both outcomes into a single `SearchState`.
//!
//! # Design
//! `Searcher` is stateless; every call to `search` issues exactly two
//! requests (or none, if validation fails). Ordering between overlapping
//! searches is the caller's concern: `SearchSession` hands out generation
//! tickets and drops results that arrive after a newer search began.

use serde::Serialize;

use crate::error::{ApiError, ValidationError};
use crate::transport::{ApiClient, Transport};
use crate::types::{Post, User};

pub const MIN_USER_ID: u32 = 1;
pub const MAX_USER_ID: u32 = 10;

/// Where a single search stands. Only `Succeeded` carries posts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SearchState {
    Idle,
    Loading { id: u32 },
    Succeeded { user: User, posts: Vec<Post> },
    Failed { message: String, retryable: bool },
    NotFound { id: u32 },
}

impl SearchState {
    fn invalid(err: ValidationError) -> Self {
        SearchState::Failed {
            message: err.to_string(),
            retryable: false,
        }
    }

    fn failed(err: ApiError) -> Self {
        SearchState::Failed {
            message: err.to_string(),
            retryable: true,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::Loading { .. } => "loading",
            SearchState::Succeeded { .. } => "succeeded",
            SearchState::Failed { .. } => "failed",
            SearchState::NotFound { .. } => "not_found",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, SearchState::Failed { retryable: true, .. })
    }
}

pub fn validate_id(id: i64) -> Result<u32, ValidationError> {
    if (i64::from(MIN_USER_ID)..=i64::from(MAX_USER_ID)).contains(&id) {
        // In range, so the cast is lossless.
        Ok(id as u32)
    } else {
        Err(ValidationError::OutOfRange(id))
    }
}

/// Parse free-text input into a valid id.
pub fn parse_id(input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    let id: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    validate_id(id)
}

/// Combine the two fetch outcomes. The user result decides first: a missing
/// user wins over anything the posts call did, and a user error is reported
/// ahead of a posts error. A user record for a different id is a failure.
pub fn resolve(
    id: u32,
    user: Result<Option<User>, ApiError>,
    posts: Result<Vec<Post>, ApiError>,
) -> SearchState {
    let user = match user {
        Ok(Some(user)) => user,
        Ok(None) => return SearchState::NotFound { id },
        Err(err) if err.is_not_found() => return SearchState::NotFound { id },
        Err(err) => return SearchState::failed(err),
    };
    if user.id != id {
        tracing::warn!(requested = id, returned = user.id, "User response for the wrong id");
        return SearchState::Failed {
            message: format!("response was for user {}, requested {id}", user.id),
            retryable: true,
        };
    }
    let posts = match posts {
        Ok(posts) => posts,
        Err(err) => return SearchState::failed(err),
    };

    let total = posts.len();
    let posts: Vec<Post> = posts.into_iter().filter(|p| p.user_id == user.id).collect();
    if posts.len() != total {
        tracing::warn!(
            user_id = user.id,
            dropped = total - posts.len(),
            "Dropped posts belonging to another user"
        );
    }
    SearchState::Succeeded { user, posts }
}

#[derive(Debug, Clone)]
pub struct Searcher<T> {
    api: ApiClient<T>,
}

impl<T: Transport> Searcher<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self { api }
    }

    /// Run one search. Out-of-range ids fail without touching the network.
    pub async fn search(&self, id: i64) -> SearchState {
        match validate_id(id) {
            Ok(id) => self.fetch(id).await,
            Err(err) => {
                tracing::info!(id, error = %err, "Rejected search id");
                SearchState::invalid(err)
            }
        }
    }

    /// Like `search`, for raw text typed by a user.
    pub async fn search_input(&self, input: &str) -> SearchState {
        match parse_id(input) {
            Ok(id) => self.fetch(id).await,
            Err(err) => {
                tracing::info!(input, error = %err, "Rejected search input");
                SearchState::invalid(err)
            }
        }
    }

    async fn fetch(&self, id: u32) -> SearchState {
        let (user, posts) = tokio::join!(self.api.get_user(id), self.api.get_posts_by_user(id));
        let state = resolve(id, user, posts);
        match &state {
            SearchState::Failed { message, .. } => {
                tracing::info!(id, outcome = state.label(), %message, "Search finished")
            }
            _ => tracing::info!(id, outcome = state.label(), "Search finished"),
        }
        state
    }
}

/// Identifies one search started through a `SearchSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    id: u32,
}

impl SearchTicket {
    pub fn id(&self) -> u32 {
        self.id
    }
}

/// Caller-side state holder for a sequence of searches.
///
/// Searches are never cancelled; a result is applied only if its ticket is
/// the most recent one.
#[derive(Debug, Clone)]
pub struct SearchSession {
    state: SearchState,
    generation: u64,
    last_id: Option<u32>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            state: SearchState::Idle,
            generation: 0,
            last_id: None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Start a search for `id` and move to `Loading`.
    pub fn begin(&mut self, id: u32) -> SearchTicket {
        self.generation += 1;
        self.last_id = Some(id);
        self.state = SearchState::Loading { id };
        SearchTicket {
            generation: self.generation,
            id,
        }
    }

    /// Record input that failed validation. Any in-flight search becomes stale.
    pub fn reject(&mut self, err: ValidationError) {
        self.generation += 1;
        self.last_id = None;
        self.state = SearchState::invalid(err);
    }

    /// Apply a finished search. Returns `false` (and changes nothing) when a
    /// newer search has started since `ticket` was issued.
    pub fn complete(&mut self, ticket: SearchTicket, state: SearchState) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                id = ticket.id,
                latest = ?self.last_id,
                "Discarding stale search result"
            );
            return false;
        }
        self.state = state;
        true
    }

    /// The id to search again, if the current state offers a retry.
    pub fn retry_id(&self) -> Option<u32> {
        if self.state.is_retryable() {
            self.last_id
        } else {
            None
        }
    }
}
