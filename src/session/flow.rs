//! Authentication actions.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::Backend;
use crate::auth::{LoginForm, RegisterForm};
use crate::context::ClientContext;
use crate::navigation::Route;
use crate::types::{AppError, Credentials, Result};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Register failed";
pub const LOGGED_OUT: &str = "Logged out successfully";

/// Drives the session gate against a backend.
pub struct AuthFlow<B: Backend + ?Sized> {
    backend: Arc<B>,
    ctx: ClientContext,
}

impl<B: Backend + ?Sized> Clone for AuthFlow<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            ctx: self.ctx.clone(),
        }
    }
}

impl<B: Backend + ?Sized> AuthFlow<B> {
    pub fn new(backend: Arc<B>, ctx: ClientContext) -> Self {
        Self { backend, ctx }
    }

    pub fn context(&self) -> &ClientContext {
        &self.ctx
    }

    /// Resolve the session with the one probe allowed per load.
    ///
    /// Later calls do not touch the network and return the current state.
    /// Failures count as signed out and never reach the caller.
    pub async fn resolve(&self) -> bool {
        if !self.ctx.gate.claim_probe() {
            debug!("Session probe already issued");
            return self.ctx.gate.current().authenticated;
        }

        let authenticated = match self.backend.check_auth().await {
            Ok(auth) => auth,
            Err(e) => {
                debug!("Session probe failed, treating as signed out: {}", e);
                false
            }
        };
        self.ctx.gate.probe_resolved(authenticated);
        authenticated
    }

    /// Validate the form, then sign in.
    ///
    /// Validation failures return [`AppError::Validation`] without any request.
    pub async fn login(&self, form: &LoginForm) -> Result<()> {
        let credentials = form.validate().map_err(AppError::Validation)?;
        self.authenticate(&credentials, LOGIN_FAILED, false).await
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<()> {
        let credentials = form.validate().map_err(AppError::Validation)?;
        self.authenticate(&credentials, REGISTER_FAILED, true).await
    }

    async fn authenticate(
        &self,
        credentials: &Credentials,
        failure_text: &str,
        register: bool,
    ) -> Result<()> {
        self.ctx.gate.auth_started();

        let result = if register {
            self.backend.register(credentials).await
        } else {
            self.backend.login(credentials).await
        };

        match result {
            Ok(()) => {
                self.ctx.gate.auth_succeeded();
                Ok(())
            }
            Err(e) => {
                warn!("{}: {}", failure_text, e);
                self.ctx.report(&e);
                self.ctx.gate.auth_failed(failure_text);
                Err(e)
            }
        }
    }

    /// Sign out. The session is only cleared once the backend confirms.
    pub async fn logout(&self) -> Result<()> {
        match self.backend.logout().await {
            Ok(()) => {
                self.ctx.gate.signed_out();
                self.ctx.notices.success(LOGGED_OUT);
                self.ctx.navigation.redirect(Route::Entry);
                Ok(())
            }
            Err(e) => {
                self.ctx.report(&e);
                Err(e)
            }
        }
    }
}
