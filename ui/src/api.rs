//! Browser implementation of the backend API
//!
//! Requests go through `fetch` with `credentials: include`, so the session
//! cookie set by the identity service rides along and is never read here.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use screentab::api::{failure_from_status, Backend, Envelope};
use screentab::types::{
    AppError, AuthCheck, Credentials, Result, SendRequest, SendResponse, ThreadHistory,
    ThreadList, ThreadSummary, UsersPage,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

/// [`Backend`] over `fetch`.
#[derive(Debug, Clone)]
pub struct GlooBackend {
    base_url: String,
}

impl GlooBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        Request::get(&self.url(path)).credentials(RequestCredentials::Include)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        Request::post(&self.url(path)).credentials(RequestCredentials::Include)
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        Request::delete(&self.url(path)).credentials(RequestCredentials::Include)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn dispatch(&self, request: Request) -> Result<(u16, Vec<u8>)> {
        // fetch only rejects when the server could not be reached
        let response = request.send().await.map_err(|e| {
            tracing::warn!("Backend unreachable: {}", e);
            AppError::Unavailable(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| AppError::Decode(format!("failed to read response body: {e}")))?;
        Ok((status, body))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let (status, body) = self.dispatch(request).await?;
        if !(200..300).contains(&status) {
            return Err(failure_from_status(status, serde_json::from_slice(&body).ok()));
        }
        serde_json::from_slice::<Envelope<T>>(&body)
            .map_err(|e| AppError::Decode(format!("unexpected response shape: {e}")))?
            .into_result()
    }

    async fn confirm(&self, request: Request) -> Result<()> {
        let (status, body) = self.dispatch(request).await?;
        let envelope: Option<Envelope<serde_json::Value>> = serde_json::from_slice(&body).ok();
        if !(200..300).contains(&status) {
            return Err(failure_from_status(status, envelope));
        }
        envelope
            .ok_or_else(|| AppError::Decode("unexpected response shape".to_string()))?
            .into_unit()
    }
}

fn build(builder: RequestBuilder) -> Result<Request> {
    builder
        .build()
        .map_err(|e| AppError::Decode(format!("failed to build request: {e}")))
}

fn with_json<T: Serialize>(builder: RequestBuilder, body: &T) -> Result<Request> {
    builder
        .json(body)
        .map_err(|e| AppError::Decode(format!("failed to encode request: {e}")))
}

#[async_trait(?Send)]
impl Backend for GlooBackend {
    async fn check_auth(&self) -> Result<bool> {
        let check: AuthCheck = self.fetch(build(self.get("/auth/check"))?).await?;
        Ok(check.auth)
    }

    async fn login(&self, credentials: &Credentials) -> Result<()> {
        self.confirm(with_json(self.post("/auth/login"), credentials)?)
            .await
    }

    async fn register(&self, credentials: &Credentials) -> Result<()> {
        self.confirm(with_json(self.post("/auth/register"), credentials)?)
            .await
    }

    async fn logout(&self) -> Result<()> {
        self.confirm(build(self.post("/auth/logout"))?).await
    }

    async fn list_threads(&self) -> Result<Vec<ThreadSummary>> {
        let list: ThreadList = self.fetch(build(self.get("/chat/threads"))?).await?;
        Ok(list.items)
    }

    async fn thread_history(&self, thread_id: &str) -> Result<ThreadHistory> {
        let request = self.get("/chat/history").query([("threadId", thread_id)]);
        self.fetch(build(request)?).await
    }

    async fn send_message(&self, request: &SendRequest) -> Result<SendResponse> {
        self.fetch(with_json(self.post("/chat/send"), request)?)
            .await
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        let encoded = String::from(js_sys::encode_uri_component(thread_id));
        let path = format!("/chat/thread/{encoded}");
        self.confirm(build(self.delete(&path))?).await
    }

    async fn wipe_threads(&self) -> Result<()> {
        self.confirm(build(self.delete("/chat/wipe"))?).await
    }

    async fn list_users(&self, page: u32, limit: u32) -> Result<UsersPage> {
        let page = page.to_string();
        let limit = limit.to_string();
        let request = self
            .get("/users")
            .query([("page", page.as_str()), ("limit", limit.as_str())]);
        self.fetch(build(request)?).await
    }
}
