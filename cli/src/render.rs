//! Text views of a `SearchState`. Rendering is a pure function of the state.

use std::fmt::Write;

use user_search_core::{Post, SearchState, User, MAX_USER_ID, MIN_USER_ID};

/// Render `state` as text. `interactive` adds the retry hint to retryable
/// failures, since only the prompt loop can act on it.
pub fn render(state: &SearchState, interactive: bool) -> String {
    match state {
        SearchState::Idle => format!("Enter a user id ({MIN_USER_ID}-{MAX_USER_ID})."),
        SearchState::Loading { id } => format!("Loading user {id}..."),
        SearchState::Failed { message, retryable } => {
            let mut out = format!("Error: {message}");
            if *retryable && interactive {
                out.push_str("\nType `r` to retry.");
            }
            out
        }
        SearchState::NotFound { id } => format!("No user found with id {id}."),
        SearchState::Succeeded { user, posts } => render_profile(user, posts),
    }
}

fn render_profile(user: &User, posts: &[Post]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{} (@{})", user.name, user.username);
    let _ = writeln!(out, "  email:   {}", user.email);
    if !user.address.city.is_empty() {
        let _ = writeln!(out, "  city:    {}", user.address.city);
    }
    if !user.website.is_empty() {
        let _ = writeln!(out, "  website: {}", user.website);
    }
    if !user.company.name.is_empty() {
        let _ = write!(out, "  company: {}", user.company.name);
        if !user.company.catch_phrase.is_empty() {
            let _ = write!(out, " (\"{}\")", user.company.catch_phrase);
        }
        out.push('\n');
    }

    out.push('\n');
    if posts.is_empty() {
        out.push_str("No posts.");
        return out;
    }
    let _ = writeln!(out, "Posts ({}):", posts.len());
    for (n, post) in posts.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", n + 1, post.title);
        if let Some(first) = post.body.lines().next() {
            let _ = writeln!(out, "     {first}");
        }
    }
    out.truncate(out.trim_end().len());
    out
}
