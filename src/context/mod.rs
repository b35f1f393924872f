//! Shared client context and the request-failure policy.

use tracing::warn;

use crate::navigation::{NavigationHandle, Route};
use crate::notify::Notifications;
use crate::session::{SessionGate, SessionView};
use crate::types::AppError;
use crate::utils::config::ClientConfig;

/// State shared by every driver: the session gate, navigation and notifications.
///
/// Clones refer to the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    pub gate: SessionGate,
    pub navigation: NavigationHandle,
    pub notices: Notifications,
}

impl ClientContext {
    pub fn new(config: &ClientConfig, initial_path: &str) -> Self {
        Self {
            gate: SessionGate::new(),
            navigation: NavigationHandle::new(initial_path, config.navigation.fallback_settle()),
            notices: Notifications::new(),
        }
    }

    pub fn session(&self) -> SessionView {
        self.gate.view()
    }

    /// Apply the failure policy for one failed operation.
    ///
    /// - session expiry resets the session and warns, whatever the operation was
    /// - an unreachable or failing backend sends the client to maintenance
    /// - validation errors are shown inline by the form, not here
    /// - anything else becomes a warning notice; local state is left untouched
    pub fn report(&self, error: &AppError) {
        match error {
            AppError::Unauthorized(reason) => {
                warn!("Session expired: {}", reason);
                self.notices.warn(error.user_message());
                self.gate.signed_out();
            }
            AppError::Unavailable(reason) => {
                warn!("Backend unavailable: {}", reason);
                self.navigation.redirect(Route::Maintenance);
            }
            AppError::Validation(_) => {}
            AppError::Request { code, message } => {
                warn!(code = ?code, "Request failed: {}", message);
                self.notices.warn(error.user_message());
            }
            AppError::Decode(reason) => {
                warn!("Malformed response: {}", reason);
                self.notices.warn(error.user_message());
            }
        }
    }
}
