//! The I/O half of the client: a `Transport` executes `HttpRequest`s, and
//! `ApiClient` wraps a `UserClient` around one.
//!
//! # Design
//! `Transport` is the single mockable seam. It reports every HTTP status as
//! data and only fails with `ApiError::Network` when no response arrived, so
//! status interpretation stays in `UserClient::parse_*`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::client::UserClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Post, User};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request).await
    }
}

/// Production transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(HttpResponse { status, body })
    }
}

/// Async client for the two user API endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    client: UserClient,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(client: UserClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// `GET /users/{id}`. `Ok(None)` means the server returned an empty record.
    pub async fn get_user(&self, id: u32) -> Result<Option<User>, ApiError> {
        let response = self.send(self.client.build_get_user(id)).await?;
        self.client.parse_get_user(response)
    }

    /// `GET /posts?userId={id}`.
    pub async fn get_posts_by_user(&self, user_id: u32) -> Result<Vec<Post>, ApiError> {
        let response = self.send(self.client.build_get_posts_by_user(user_id)).await?;
        self.client.parse_get_posts_by_user(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "Sending request");
        let url = request.url.clone();
        match self.transport.execute(request).await {
            Ok(response) => {
                tracing::debug!(%url, status = response.status, "Received response");
                Ok(response)
            }
            Err(err) => {
                tracing::debug!(%url, error = %err, "Request failed");
                Err(err)
            }
        }
    }
}

impl ApiClient<ReqwestTransport> {
    /// Client over real HTTP for `base_url`.
    pub fn http(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self::new(UserClient::new(base_url), ReqwestTransport::new(timeout)?))
    }
}
