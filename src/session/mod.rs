//! Session state and the route gate
//!
//! [`SessionGate`] is the only writer of the [`Session`]; everything else reads
//! it through a [`SessionView`]. The gate turns (session, location, viewport,
//! navigating flag) into a [`GateDecision`] once per navigation event, so the
//! rendering layer never redirects as a side effect of drawing.
//!
//! # Lifecycle
//!
//! 1. Process start: `checking = true`, not authenticated
//! 2. One authentication probe resolves the session (see [`AuthFlow::resolve`])
//! 3. Afterwards only login, register, logout and session expiry change it
//!
//! The probe fails closed: any transport or decoding failure counts as signed out.

/// Async login/register/logout/probe against a [`Backend`](crate::api::Backend).
pub mod flow;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use tracing::info;

use crate::navigation::{Layout, Route, Shell};

pub use flow::AuthFlow;

/// Authentication state as the UI sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub authenticated: bool,
    /// A probe or an auth action is outstanding
    pub checking: bool,
    pub last_error: Option<String>,
}

impl Session {
    /// State at process start, before the probe resolves.
    pub fn initial() -> Self {
        Self {
            authenticated: false,
            checking: true,
            last_error: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

/// What the rendering layer should do for the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GateDecision {
    /// Show the full-screen loader, nothing else
    Block,
    /// Replace the location; do not render the requested route
    Redirect { to: Route },
    /// Render the route inside the given shell
    Render { route: Route, shell: Shell },
}

/// Pure gate rule, evaluated once per navigation event.
pub fn decide(session: &Session, location: &str, layout: Layout, navigating: bool) -> GateDecision {
    if session.checking || navigating {
        return GateDecision::Block;
    }

    let route = Route::from_path(location);
    if !session.authenticated && !route.is_public() {
        return GateDecision::Redirect { to: Route::Entry };
    }
    if session.authenticated && route == Route::Entry {
        return GateDecision::Redirect {
            to: Route::DEFAULT_AUTHENTICATED,
        };
    }

    GateDecision::Render {
        route,
        shell: Shell::select(layout, session.authenticated),
    }
}

#[derive(Debug)]
struct GateInner {
    session: ArcSwap<Session>,
    probe_started: AtomicBool,
}

/// Read-only access to the session.
#[derive(Debug, Clone)]
pub struct SessionView {
    inner: Arc<GateInner>,
}

impl SessionView {
    /// Current snapshot (lockless read).
    pub fn current(&self) -> Arc<Session> {
        self.inner.session.load_full()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.session.load().authenticated
    }

    pub fn is_checking(&self) -> bool {
        self.inner.session.load().checking
    }

    pub fn decide(&self, location: &str, layout: Layout, navigating: bool) -> GateDecision {
        decide(&self.current(), location, layout, navigating)
    }
}

/// Sole writer of the session state.
#[derive(Debug, Clone)]
pub struct SessionGate {
    inner: Arc<GateInner>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(GateInner {
                session: ArcSwap::from_pointee(Session::initial()),
                probe_started: AtomicBool::new(false),
            }),
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn current(&self) -> Arc<Session> {
        self.inner.session.load_full()
    }

    pub fn decide(&self, location: &str, layout: Layout, navigating: bool) -> GateDecision {
        decide(&self.current(), location, layout, navigating)
    }

    /// Claim the one probe allowed per load. Only the first caller gets `true`.
    pub fn claim_probe(&self) -> bool {
        !self.inner.probe_started.swap(true, Ordering::SeqCst)
    }

    pub fn probe_resolved(&self, authenticated: bool) {
        info!(authenticated, "Session probe resolved");
        self.store(Session {
            authenticated,
            checking: false,
            last_error: None,
        });
    }

    /// Login or register started.
    pub fn auth_started(&self) {
        let current = self.current();
        self.store(Session {
            authenticated: current.authenticated,
            checking: true,
            last_error: None,
        });
    }

    pub fn auth_succeeded(&self) {
        info!("Signed in");
        self.store(Session {
            authenticated: true,
            checking: false,
            last_error: None,
        });
    }

    pub fn auth_failed(&self, error: impl Into<String>) {
        self.store(Session {
            authenticated: false,
            checking: false,
            last_error: Some(error.into()),
        });
    }

    /// Explicit logout or expiry signalled by any request.
    pub fn signed_out(&self) {
        info!("Signed out");
        self.store(Session {
            authenticated: false,
            checking: false,
            last_error: None,
        });
    }

    fn store(&self, session: Session) {
        self.inner.session.store(Arc::new(session));
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}
