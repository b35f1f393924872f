//! Routes and the route-transition loader
//!
//! While a client-initiated transition is in flight the "navigating" flag is
//! raised and the UI covers the viewport with a loader. The flag drops when
//! the location reaches the requested path. A same-route refresh changes no
//! URL, so it is settled by a timer instead (see [`NavigationHandle::refresh`]
//! and [`NavigationHandle::settle_refresh`]).

/// Viewport classes, shell selection and the sidebar menu.
pub mod layout;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

pub use layout::{Layout, MenuItem, Shell, MENU};

/// Client routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// `/` - login and register
    Entry,
    /// `/dashboard` - chat tabs
    Dashboard,
    /// `/users` - paginated user list
    Users,
    /// `/maintenance` - shown when the backend is unreachable
    Maintenance,
    NotFound,
}

impl Route {
    /// Where signed-in users land.
    pub const DEFAULT_AUTHENTICATED: Route = Route::Dashboard;

    pub fn path(self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Dashboard => "/dashboard",
            Route::Users => "/users",
            Route::Maintenance => "/maintenance",
            Route::NotFound => "/404",
        }
    }

    /// Resolve a location. Query string, fragment and trailing slash are ignored.
    pub fn from_path(location: &str) -> Self {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" => Route::Entry,
            "/dashboard" => Route::Dashboard,
            "/users" => Route::Users,
            "/maintenance" => Route::Maintenance,
            _ => Route::NotFound,
        }
    }

    /// Reachable without a session.
    pub fn is_public(self) -> bool {
        matches!(self, Route::Entry | Route::Maintenance)
    }
}

/// Identifies one same-route refresh; only the latest one may settle the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

/// Outcome of activating a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    /// Route to this path
    Push(String),
    /// Re-render the current route, then settle with the ticket
    Refresh(RefreshTicket),
}

/// Sans-IO navigation state.
#[derive(Debug, Clone)]
pub struct NavigationLoader {
    pathname: String,
    target: Option<String>,
    navigating: bool,
    refresh_epoch: u64,
}

impl NavigationLoader {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            target: None,
            navigating: false,
            refresh_epoch: 0,
        }
    }

    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Start a transition. Ignored (returns `false`) for an empty path or the current one.
    pub fn push(&mut self, path: &str) -> bool {
        if path.is_empty() || path == self.pathname {
            return false;
        }
        debug!(from = %self.pathname, to = path, "Navigation started");
        self.target = Some(path.to_string());
        self.navigating = true;
        true
    }

    pub fn refresh(&mut self) -> RefreshTicket {
        self.refresh_epoch += 1;
        self.navigating = true;
        debug!(path = %self.pathname, epoch = self.refresh_epoch, "Refresh started");
        RefreshTicket(self.refresh_epoch)
    }

    /// Drop the flag for a refresh whose fallback delay elapsed.
    ///
    /// Stale tickets are ignored, and so is any ticket while a push is still
    /// waiting for its location.
    pub fn settle_refresh(&mut self, ticket: RefreshTicket) -> bool {
        if ticket.0 != self.refresh_epoch || self.target.is_some() {
            return false;
        }
        self.navigating = false;
        true
    }

    /// The router reports a new location.
    pub fn location_changed(&mut self, path: &str) {
        self.pathname = path.to_string();
        if self.target.as_deref() == Some(path) {
            debug!(path, "Navigation settled");
            self.target = None;
            self.navigating = false;
        }
    }

    /// Sidebar semantics: the current route refreshes, any other route is pushed.
    pub fn activate(&mut self, route: Route) -> NavAction {
        let path = route.path();
        if Route::from_path(&self.pathname) == route {
            return NavAction::Refresh(self.refresh());
        }
        self.push(path);
        NavAction::Push(path.to_string())
    }
}

impl Default for NavigationLoader {
    fn default() -> Self {
        Self::new(Route::Entry.path())
    }
}

#[derive(Debug)]
struct NavigationInner {
    loader: NavigationLoader,
    redirect: Option<Route>,
}

/// Shared navigation state. Clones refer to the same loader.
#[derive(Debug, Clone)]
pub struct NavigationHandle {
    inner: Arc<Mutex<NavigationInner>>,
    fallback_settle: Duration,
}

impl NavigationHandle {
    pub fn new(pathname: impl Into<String>, fallback_settle: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NavigationInner {
                loader: NavigationLoader::new(pathname),
                redirect: None,
            })),
            fallback_settle,
        }
    }

    pub fn fallback_settle(&self) -> Duration {
        self.fallback_settle
    }

    pub fn is_navigating(&self) -> bool {
        self.inner.lock().loader.is_navigating()
    }

    pub fn pathname(&self) -> String {
        self.inner.lock().loader.pathname().to_string()
    }

    pub fn snapshot(&self) -> NavigationLoader {
        self.inner.lock().loader.clone()
    }

    pub fn push(&self, path: &str) -> bool {
        self.inner.lock().loader.push(path)
    }

    pub fn refresh(&self) -> RefreshTicket {
        self.inner.lock().loader.refresh()
    }

    pub fn settle_refresh(&self, ticket: RefreshTicket) -> bool {
        self.inner.lock().loader.settle_refresh(ticket)
    }

    pub fn location_changed(&self, path: &str) {
        self.inner.lock().loader.location_changed(path);
    }

    pub fn activate(&self, route: Route) -> NavAction {
        self.inner.lock().loader.activate(route)
    }

    /// Ask the rendering layer to replace the location, outside any user transition.
    pub fn redirect(&self, route: Route) {
        debug!(to = route.path(), "Redirect requested");
        self.inner.lock().redirect = Some(route);
    }

    /// Take the pending redirect, if any.
    pub fn take_redirect(&self) -> Option<Route> {
        self.inner.lock().redirect.take()
    }

    /// Refresh, wait for the fallback delay, then settle.
    #[cfg(feature = "native")]
    pub async fn refresh_and_settle(&self) -> bool {
        let ticket = self.refresh();
        tokio::time::sleep(self.fallback_settle).await;
        self.settle_refresh(ticket)
    }
}

impl Default for NavigationHandle {
    fn default() -> Self {
        Self::new(Route::Entry.path(), Duration::from_millis(600))
    }
}
