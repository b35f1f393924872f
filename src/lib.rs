//! # screentab
//!
//! Client core for a movie-chat admin panel: session gating, chat tabs backed
//! by a remote thread store, and a paginated user list.
//!
//! ## Overview
//!
//! The crate is headless. Each concern is a sans-IO state machine paired with
//! an async driver that talks to a [`Backend`]. A rendering layer (the Leptos
//! app under `ui/`, or a test) reads snapshots and feeds events back in.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use screentab::{api::http::HttpBackend, ClientConfig, ClientState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env_and_file("screentab.toml")?;
//!     screentab::utils::logging::init(&config.logging);
//!
//!     let backend = Arc::new(HttpBackend::new(&config.server)?);
//!     let client = ClientState::new(backend, &config, "/dashboard");
//!
//!     if client.auth.resolve().await {
//!         client.chat.initialize().await?;
//!         client.chat.send_text("Alien").await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `native` | reqwest backend, tracing subscriber, `.env` loading, tokio timers (default) |
//!
//! Without `native` the crate builds for `wasm32-unknown-unknown`.
//!
//! ## Modules
//!
//! - [`api`] - Backend trait, response envelope, HTTP implementation
//! - [`auth`] - Login and register form validation
//! - [`chat`] - Conversation tabs and their driver
//! - [`context`] - Shared client context and the failure policy
//! - [`navigation`] - Routes, viewport layout, route-transition loader
//! - [`notify`] - Notification queue
//! - [`session`] - Session state and the route gate
//! - [`users`] - Paginated user list
//! - [`types`] - Wire types and errors
//! - [`utils`] - Configuration and logging

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Backend API contract and implementations.
pub mod api;
/// Client-side form validation.
pub mod auth;
/// Chat tabs.
pub mod chat;
/// Shared client context.
pub mod context;
/// Routes and navigation state.
pub mod navigation;
/// Non-blocking notifications.
pub mod notify;
/// Session state and route gating.
pub mod session;
/// Core types (wire payloads, errors).
pub mod types;
/// User directory.
pub mod users;
/// Configuration and logging.
pub mod utils;

pub use api::Backend;
pub use chat::{ChatSessionManager, TabCollection};
pub use context::ClientContext;
pub use navigation::{NavigationHandle, Route};
pub use session::{AuthFlow, GateDecision, Session, SessionGate, SessionView};
pub use types::{AppError, Result};
pub use users::UserDirectory;
pub use utils::config::ClientConfig;

use std::sync::Arc;

/// Everything a rendering layer needs, wired to one backend.
pub struct ClientState<B: api::Backend + ?Sized> {
    /// Session gate, navigation and notifications
    pub ctx: ClientContext,
    /// Probe, login, register, logout
    pub auth: AuthFlow<B>,
    /// Chat tabs
    pub chat: ChatSessionManager<B>,
    /// User list
    pub users: UserDirectory<B>,
}

impl<B: api::Backend + ?Sized> ClientState<B> {
    /// Wire the drivers to `backend`, starting at `initial_path`.
    pub fn new(backend: Arc<B>, config: &ClientConfig, initial_path: &str) -> Self {
        let ctx = ClientContext::new(config, initial_path);
        Self {
            auth: AuthFlow::new(Arc::clone(&backend), ctx.clone()),
            chat: ChatSessionManager::new(Arc::clone(&backend), ctx.clone()),
            users: UserDirectory::new(backend, ctx.clone(), config.users.page_size),
            ctx,
        }
    }
}

impl<B: api::Backend + ?Sized> Clone for ClientState<B> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            auth: self.auth.clone(),
            chat: self.chat.clone(),
            users: self.users.clone(),
        }
    }
}
