//! Stateless HTTP request builder and response parser for the user API.
//!
//! # Design
//! `UserClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! `ApiClient` (in `transport.rs`) glues the two halves around a transport.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Post, User};

/// Synchronous, stateless client for the user API.
#[derive(Debug, Clone)]
pub struct UserClient {
    base_url: String,
}

impl UserClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_get_user(&self, id: u32) -> HttpRequest {
        self.get(format!("{}/users/{id}", self.base_url))
    }

    pub fn build_get_posts_by_user(&self, user_id: u32) -> HttpRequest {
        self.get(format!("{}/posts?userId={user_id}", self.base_url))
    }

    /// Parse a `GET /users/{id}` response.
    ///
    /// Returns `Ok(None)` when the server answers 2xx with an empty object or
    /// `null`, which is how JSONPlaceholder-style APIs signal a missing record.
    pub fn parse_get_user(&self, response: HttpResponse) -> Result<Option<User>, ApiError> {
        check_status(&response)?;
        let value: serde_json::Value = serde_json::from_str(&response.body)?;
        if is_empty_record(&value) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    pub fn parse_get_posts_by_user(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        check_status(&response)?;
        parse_json(&response.body)
    }

    fn get(&self, url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_str(body)?)
}

fn is_empty_record(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Map any status outside 2xx to `ApiError::Http`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        message: error_message(response),
    })
}

/// Prefer a JSON `{"message": ...}` body, then a plain-text body, then the
/// status's reason phrase.
fn error_message(response: &HttpResponse) -> String {
    let body = response.body.trim();
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| reason_phrase(response.status)),
        Err(_) if !body.is_empty() => body.to_string(),
        Err(_) => reason_phrase(response.status),
    }
}

fn reason_phrase(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> UserClient {
        UserClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_user_produces_correct_request() {
        let req = client().build_get_user(7);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/users/7");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_get_posts_uses_user_id_query() {
        let req = client().build_get_posts_by_user(3);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/posts?userId=3");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = UserClient::new("https://jsonplaceholder.typicode.com/");
        let req = client.build_get_user(1);
        assert_eq!(req.url, "https://jsonplaceholder.typicode.com/users/1");
    }

    #[test]
    fn parse_get_user_success() {
        let body = r#"{"id":1,"name":"Leanne Graham","username":"Bret","email":"Sincere@april.biz"}"#;
        let user = client().parse_get_user(response(200, body)).unwrap().unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Leanne Graham");
    }

    #[test]
    fn parse_get_user_empty_object_is_absent() {
        assert!(client().parse_get_user(response(200, "{}")).unwrap().is_none());
        assert!(client().parse_get_user(response(200, "null")).unwrap().is_none());
    }

    #[test]
    fn parse_get_user_404_is_http_error() {
        let err = client().parse_get_user(response(404, "{}")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                message: "Not Found".to_string()
            }
        );
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn parse_get_user_bad_json() {
        let err = client().parse_get_user(response(200, "<html>")).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn parse_get_user_wrong_shape_is_parse_error() {
        let err = client().parse_get_user(response(200, "[1,2]")).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn parse_posts_success() {
        let body = r#"[{"userId":2,"id":11,"title":"a","body":"b"},{"userId":2,"id":12,"title":"c","body":"d"}]"#;
        let posts = client().parse_get_posts_by_user(response(200, body)).unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.user_id == 2));
    }

    #[test]
    fn parse_posts_accepts_any_2xx() {
        let posts = client().parse_get_posts_by_user(response(203, "[]")).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn parse_posts_server_error_uses_json_message() {
        let err = client()
            .parse_get_posts_by_user(response(500, r#"{"message":"database offline"}"#))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                message: "database offline".to_string()
            }
        );
    }

    #[test]
    fn parse_posts_empty_error_body_uses_reason_phrase() {
        let err = client().parse_get_posts_by_user(response(503, "")).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");

        let err = client().parse_get_posts_by_user(response(599, "")).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 599: Unknown Status");
    }

    #[test]
    fn parse_posts_server_error_uses_plain_body() {
        let err = client()
            .parse_get_posts_by_user(response(502, "  bad gateway \n"))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                message: "bad gateway".to_string()
            }
        );
    }
}
