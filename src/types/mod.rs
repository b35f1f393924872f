use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::auth::FieldErrors;

// ============= Chat Types =============

/// Author of a chat message.
///
/// The deployed backend calls the assistant `bot`; both spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    #[serde(alias = "bot")]
    Assistant,
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    #[serde(alias = "ts")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message authored locally, with a fresh id and the current time.
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text)
    }
}

/// Message as echoed by `POST /chat/send` (the role is implied by the field it sits in).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EchoedMessage {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub text: String,
    #[serde(alias = "ts")]
    pub timestamp: DateTime<Utc>,
}

impl EchoedMessage {
    pub fn into_message(self, role: MessageRole) -> Message {
        Message {
            id: self.id,
            role,
            text: self.text,
            timestamp: self.timestamp,
        }
    }
}

/// Entry of `GET /chat/threads`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThreadSummary {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadList {
    #[serde(default)]
    pub items: Vec<ThreadSummary>,
}

/// Payload of `GET /chat/history?threadId=`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadHistory {
    #[serde(deserialize_with = "string_or_number")]
    pub thread_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "msgs")]
    pub messages: Vec<Message>,
}

/// How a send request addresses its thread.
///
/// A tab that was never persisted sends its title so the backend can create the thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SendTarget {
    #[serde(rename = "threadId")]
    Thread(String),
    #[serde(rename = "title")]
    Title(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    #[serde(flatten)]
    pub target: SendTarget,
    pub text: String,
}

/// Payload of `POST /chat/send`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(alias = "user")]
    pub user_message: EchoedMessage,
    #[serde(alias = "bot")]
    pub assistant_message: EchoedMessage,
}

// ============= Authentication Types =============

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload of `GET /auth/check`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AuthCheck {
    #[serde(default)]
    pub auth: bool,
}

// ============= User Directory Types =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Payload of `GET /users?page=&limit=`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub items: Vec<UserRow>,
    #[serde(default)]
    pub total: u64,
}

// ============= Error Types =============

/// Generic text shown for failures that carry nothing safe to display.
pub const GENERIC_FAILURE: &str = "Request failed. Please try again later";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// The identity service rejected the session credential (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Client-side form validation failed; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The backend answered with a failure. `message` is already user-facing.
    #[error("{message}")]
    Request {
        code: Option<String>,
        message: String,
    },

    /// Backend unreachable or failing server-side.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl AppError {
    /// Text suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized(_) => "Session expired. Please log in again.".to_string(),
            AppError::Validation(errors) => errors.to_string(),
            AppError::Request { message, .. } => message.clone(),
            AppError::Unavailable(_) | AppError::Decode(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Identifiers arrive as strings from some stores and as integers from others.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or numeric id, got {other}"
        ))),
    }
}
