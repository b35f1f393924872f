//! Global application state
//!
//! The client core owns the real state; the signals here are copies refreshed
//! by [`AppState::sync`] after every action so views can react to them.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;
use screentab::chat::TabCollection;
use screentab::navigation::{Layout, NavAction, Route};
use screentab::notify::Notice;
use screentab::session::Session;
use screentab::users::UsersState;
use screentab::{ClientConfig, ClientState};

use crate::api::GlooBackend;

/// How long a toast stays up, in milliseconds.
pub const TOAST_MS: u32 = 3000;

/// Backend location baked in at build time.
const SERVER_URL: Option<&str> = option_env!("SCREENTAB_SERVER_URL");

pub type Client = ClientState<GlooBackend>;

static NEXT_TOAST: AtomicU64 = AtomicU64::new(1);

/// A notice on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Global application state
#[derive(Clone)]
pub struct AppState {
    pub client: Client,
    pub config: ClientConfig,
    pub session: RwSignal<Session>,
    pub navigating: RwSignal<bool>,
    pub layout: RwSignal<Layout>,
    pub tabs: RwSignal<TabCollection>,
    pub users: RwSignal<UsersState>,
    pub toasts: RwSignal<Vec<Toast>>,
    /// Route the gate or a driver asked to replace the location with
    pub redirect: RwSignal<Option<Route>>,
    /// Mobile drawer
    pub drawer_open: RwSignal<bool>,
}

impl AppState {
    pub fn new(initial_path: &str, width: f64) -> Self {
        let mut config = ClientConfig::default();
        if let Some(url) = SERVER_URL {
            config.server.base_url = url.trim_end_matches('/').to_string();
        }
        let backend = Arc::new(GlooBackend::new(&config.server.base_url));
        let client = ClientState::new(backend, &config, initial_path);

        Self {
            session: RwSignal::new((*client.ctx.session().current()).clone()),
            navigating: RwSignal::new(false),
            layout: RwSignal::new(Layout::classify(width)),
            tabs: RwSignal::new(TabCollection::new()),
            users: RwSignal::new(UsersState::new(config.users.page_size)),
            toasts: RwSignal::new(Vec::new()),
            redirect: RwSignal::new(None),
            drawer_open: RwSignal::new(false),
            client,
            config,
        }
    }

    /// Copy the core state into the signals.
    pub fn sync(&self) {
        let ctx = &self.client.ctx;
        self.session.set((*ctx.session().current()).clone());
        self.navigating.set(ctx.navigation.is_navigating());
        self.tabs.set(self.client.chat.snapshot());
        self.users.set(self.client.users.snapshot());

        if let Some(route) = ctx.navigation.take_redirect() {
            self.redirect.set(Some(route));
        }

        let fresh = ctx.notices.drain();
        if !fresh.is_empty() {
            self.toasts.update(|toasts| {
                toasts.extend(fresh.into_iter().map(|notice| Toast {
                    id: NEXT_TOAST.fetch_add(1, Ordering::Relaxed),
                    notice,
                }));
            });
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    /// Sidebar item clicked. Returns the path to push, if any.
    ///
    /// The current route is refreshed instead: the overlay shows for the
    /// fallback delay and then clears.
    pub fn activate(&self, route: Route) -> Option<String> {
        self.drawer_open.set(false);
        let action = self.client.ctx.navigation.activate(route);
        self.sync();
        match action {
            NavAction::Push(path) => Some(path),
            NavAction::Refresh(ticket) => {
                let state = self.clone();
                let delay = self.config.navigation.fallback_settle_ms;
                leptos::task::spawn_local(async move {
                    gloo_timers::future::TimeoutFuture::new(delay as u32).await;
                    state.client.ctx.navigation.settle_refresh(ticket);
                    state.sync();
                });
                None
            }
        }
    }

    /// The router reports a new location.
    pub fn location_changed(&self, path: &str) {
        self.client.ctx.navigation.location_changed(path);
        self.navigating.set(self.client.ctx.navigation.is_navigating());
    }
}
