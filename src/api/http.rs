//! reqwest implementation of [`Backend`].
//!
//! The session credential is a same-origin cookie set by the identity service,
//! so the client keeps a cookie store and never handles tokens itself.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{failure_from_status, Backend, Envelope};
use crate::types::{
    AppError, AuthCheck, Credentials, Result, SendRequest, SendResponse, ThreadHistory,
    ThreadList, ThreadSummary, UsersPage, GENERIC_FAILURE,
};
use crate::utils::config::ServerConfig;

/// HTTP client for the SCREENTAB backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client with a cookie store and the configured request timeout.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `path` with `segment` appended as one percent-encoded path segment.
    fn url_with_segment(&self, path: &str, segment: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| AppError::Unavailable(format!("invalid backend URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| AppError::Unavailable("backend URL cannot take a path".to_string()))?
            .push(segment);
        Ok(url)
    }

    /// Send a request and return the raw status and body.
    async fn dispatch(&self, request: RequestBuilder) -> Result<(u16, Vec<u8>)> {
        // Only an unreachable host counts as an outage; a slow one is a plain failure.
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                warn!("Backend unreachable: {}", e);
                AppError::Unavailable(e.to_string())
            } else {
                warn!("Request failed before a response: {}", e);
                generic_failure()
            }
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                warn!("Response body timed out: {}", e);
                generic_failure()
            } else {
                AppError::Decode(format!("failed to read response body: {e}"))
            }
        })?;
        debug!(status, bytes = body.len(), "Backend responded");

        Ok((status, body.to_vec()))
    }

    /// Decode a success envelope carrying a payload.
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let (status, body) = self.dispatch(request).await?;
        if !(200..300).contains(&status) {
            return Err(failure_from_status(status, loose_envelope(&body)));
        }
        let envelope: Envelope<T> = serde_json::from_slice(&body)
            .map_err(|e| AppError::Decode(format!("unexpected response shape: {e}")))?;
        envelope.into_result()
    }

    /// Decode a success envelope whose payload is only a confirmation.
    async fn confirm(&self, request: RequestBuilder) -> Result<()> {
        let (status, body) = self.dispatch(request).await?;
        if !(200..300).contains(&status) {
            return Err(failure_from_status(status, loose_envelope(&body)));
        }
        let envelope = loose_envelope(&body)
            .ok_or_else(|| AppError::Decode("unexpected response shape".to_string()))?;
        envelope.into_unit()
    }
}

fn generic_failure() -> AppError {
    AppError::Request {
        code: None,
        message: GENERIC_FAILURE.to_string(),
    }
}

/// Parse a body as a loosely typed envelope; `None` if it is not one.
fn loose_envelope(body: &[u8]) -> Option<Envelope<serde_json::Value>> {
    serde_json::from_slice(body).ok()
}

#[async_trait]
impl Backend for HttpBackend {
    async fn check_auth(&self) -> Result<bool> {
        let check: AuthCheck = self.fetch(self.client.get(self.url("/auth/check"))).await?;
        Ok(check.auth)
    }

    async fn login(&self, credentials: &Credentials) -> Result<()> {
        self.confirm(self.client.post(self.url("/auth/login")).json(credentials))
            .await
    }

    async fn register(&self, credentials: &Credentials) -> Result<()> {
        self.confirm(self.client.post(self.url("/auth/register")).json(credentials))
            .await
    }

    async fn logout(&self) -> Result<()> {
        self.confirm(self.client.post(self.url("/auth/logout"))).await
    }

    async fn list_threads(&self) -> Result<Vec<ThreadSummary>> {
        let list: ThreadList = self.fetch(self.client.get(self.url("/chat/threads"))).await?;
        Ok(list.items)
    }

    async fn thread_history(&self, thread_id: &str) -> Result<ThreadHistory> {
        let request = self
            .client
            .get(self.url("/chat/history"))
            .query(&[("threadId", thread_id)]);
        self.fetch(request).await
    }

    async fn send_message(&self, request: &SendRequest) -> Result<SendResponse> {
        self.fetch(self.client.post(self.url("/chat/send")).json(request))
            .await
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        let url = self.url_with_segment("/chat/thread", thread_id)?;
        self.confirm(self.client.delete(url)).await
    }

    async fn wipe_threads(&self) -> Result<()> {
        self.confirm(self.client.delete(self.url("/chat/wipe"))).await
    }

    async fn list_users(&self, page: u32, limit: u32) -> Result<UsersPage> {
        let request = self
            .client
            .get(self.url("/users"))
            .query(&[("page", page), ("limit", limit)]);
        self.fetch(request).await
    }
}
