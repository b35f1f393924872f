//! Backend API contract
//!
//! This module defines how the client talks to the identity and chat store.
//!
//! # Module Structure
//!
//! - [`Backend`] - the async operations the client needs, one per endpoint
//! - [`Envelope`] - the uniform `{ok, data | code, message}` response wrapper
//! - [`api::http`](crate::api::http) - reqwest implementation (feature `native`)
//!
//! # Endpoints
//!
//! ## Authentication (`/auth`)
//! - `GET /auth/check` - Is the session credential valid?
//! - `POST /auth/login` - Sign in, sets the session cookie
//! - `POST /auth/register` - Create an account and sign in
//! - `POST /auth/logout` - Clear the session cookie
//!
//! ## Chat (`/chat`)
//! - `GET /chat/threads` - List persisted threads
//! - `GET /chat/history?threadId=` - Messages of one thread
//! - `POST /chat/send` - Send a message, receive the echoed message and the reply
//! - `DELETE /chat/thread/{id}` - Delete one thread
//! - `DELETE /chat/wipe` - Delete every thread
//!
//! ## Users (`/users`)
//! - `GET /users?page=&limit=` - One page of registered users
//!
//! # Failure classification
//!
//! Every implementation maps transport and HTTP failures the same way, through
//! [`failure_from_status`]: 401 becomes [`AppError::Unauthorized`], 5xx and
//! unreachable servers become [`AppError::Unavailable`], everything else becomes
//! [`AppError::Request`] with a user-facing message from [`map_failure_message`].

use async_trait::async_trait;
use serde::Deserialize;

use crate::types::{
    AppError, Credentials, Result, SendRequest, SendResponse, ThreadHistory, ThreadSummary,
    UsersPage, GENERIC_FAILURE,
};

/// reqwest-backed [`Backend`].
#[cfg(feature = "native")]
pub mod http;

/// Backend messages longer than this are not shown to users.
const MAX_DISPLAYABLE_MESSAGE: usize = 80;

/// Operations the client performs against the identity and chat store.
///
/// Implementations must classify failures into the [`AppError`] taxonomy; the
/// drivers rely on that to decide between a notification, a session reset and
/// the maintenance redirect.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Backend: Send + Sync {
    /// Probe the session credential. Returns the server's `auth` flag.
    async fn check_auth(&self) -> Result<bool>;

    async fn login(&self, credentials: &Credentials) -> Result<()>;

    async fn register(&self, credentials: &Credentials) -> Result<()>;

    async fn logout(&self) -> Result<()>;

    async fn list_threads(&self) -> Result<Vec<ThreadSummary>>;

    async fn thread_history(&self, thread_id: &str) -> Result<ThreadHistory>;

    async fn send_message(&self, request: &SendRequest) -> Result<SendResponse>;

    async fn delete_thread(&self, thread_id: &str) -> Result<()>;

    async fn wipe_threads(&self) -> Result<()>;

    async fn list_users(&self, page: u32, limit: u32) -> Result<UsersPage>;
}

/// Uniform response wrapper used by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap a payload-carrying success, or convert the failure.
    pub fn into_result(self) -> Result<T> {
        if self.ok {
            return self
                .data
                .ok_or_else(|| AppError::Decode("success envelope without data".to_string()));
        }
        Err(self.into_failure())
    }

    /// For endpoints whose success payload is only a confirmation.
    pub fn into_unit(self) -> Result<()> {
        if self.ok {
            return Ok(());
        }
        Err(self.into_failure())
    }

    fn into_failure(self) -> AppError {
        AppError::Request {
            message: map_failure_message(self.code.as_deref(), self.message.as_deref()),
            code: self.code,
        }
    }
}

/// Translate a backend failure code into text that is safe to show.
///
/// Unknown codes fall back to the backend's own message when it is short,
/// and to a generic retry hint otherwise.
pub fn map_failure_message(code: Option<&str>, message: Option<&str>) -> String {
    let mapped = match code {
        Some("BAD_REQUEST") | Some("VALIDATION_ERROR") => Some("Invalid input"),
        Some("UNAUTHORIZED") => Some("Please log in"),
        Some("FORBIDDEN") => Some("Access denied"),
        Some("NOT_FOUND") => Some("Not found"),
        Some("INSUFFICIENT_FUNDS") => Some("Insufficient funds"),
        Some("PRICING_UNAVAILABLE") => Some("Category not available"),
        Some("RATE_LIMIT") => Some("Too many requests"),
        Some("INTERNAL") => Some(GENERIC_FAILURE),
        _ => None,
    };
    if let Some(text) = mapped {
        return text.to_string();
    }
    match message {
        Some(m) if !m.is_empty() && m.chars().count() <= MAX_DISPLAYABLE_MESSAGE => m.to_string(),
        _ => GENERIC_FAILURE.to_string(),
    }
}

/// Classify a non-2xx HTTP answer. `body` is the parsed failure envelope, if any.
pub fn failure_from_status(status: u16, body: Option<Envelope<serde_json::Value>>) -> AppError {
    let (code, message) = body
        .map(|b| (b.code, b.message))
        .unwrap_or((None, None));

    match status {
        401 => AppError::Unauthorized(message.unwrap_or_else(|| "HTTP 401".to_string())),
        s if s >= 500 => AppError::Unavailable(format!("HTTP {s}")),
        _ => AppError::Request {
            message: map_failure_message(code.as_deref(), message.as_deref()),
            code,
        },
    }
}
