//! Async driver for the tab collection.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::tabs::{HydrationRequest, PendingSend, SendRejection, TabCollection, TabId};
use crate::api::Backend;
use crate::context::ClientContext;
use crate::types::Result;

/// Result of [`ChatSessionManager::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The exchange was appended to its tab
    Sent,
    /// The tab went away before the reply arrived
    Dropped,
    /// Nothing was sent
    Skipped(SendRejection),
}

/// Runs chat operations against a [`Backend`].
///
/// The collection lock is only held between awaits, never across one; each
/// completion is merged back by tab or thread id.
pub struct ChatSessionManager<B: Backend + ?Sized> {
    backend: Arc<B>,
    ctx: ClientContext,
    state: Arc<Mutex<TabCollection>>,
}

impl<B: Backend + ?Sized> Clone for ChatSessionManager<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            ctx: self.ctx.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<B: Backend + ?Sized> ChatSessionManager<B> {
    pub fn new(backend: Arc<B>, ctx: ClientContext) -> Self {
        Self {
            backend,
            ctx,
            state: Arc::new(Mutex::new(TabCollection::new())),
        }
    }

    /// Copy of the current tab state for rendering.
    pub fn snapshot(&self) -> TabCollection {
        self.state.lock().clone()
    }

    pub fn is_sending(&self) -> bool {
        self.state.lock().is_sending()
    }

    /// Load the thread list and select the first tab, fetching its history.
    ///
    /// Only the first call does anything; one that overlaps a call still in
    /// flight returns at once. On failure the collection is left as it was
    /// and the next call tries again.
    pub async fn initialize(&self) -> Result<()> {
        if !self.state.lock().claim_initialize() {
            debug!("Chat already initialized or initializing");
            return Ok(());
        }

        let threads = match self.backend.list_threads().await {
            Ok(threads) => threads,
            Err(e) => {
                self.state.lock().initialization_failed();
                warn!("Failed to list threads: {}", e);
                self.ctx.report(&e);
                return Err(e);
            }
        };
        info!(threads = threads.len(), "Chat threads loaded");

        let request = self.state.lock().initialize(threads);
        self.hydrate(request).await
    }

    /// Select a tab; an unhydrated one gets its history fetched.
    pub async fn select(&self, id: &TabId) -> Result<()> {
        let request = self.select_local(id);
        self.hydrate(request).await
    }

    /// Move the pointer only. The returned request goes to [`hydrate`](Self::hydrate).
    pub fn select_local(&self, id: &TabId) -> Option<HydrationRequest> {
        self.state.lock().select(id)
    }

    pub fn create_tab(&self) -> TabId {
        self.state.lock().create_tab()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.state.lock().set_draft(text);
    }

    /// Send the draft from the current tab.
    ///
    /// Only one send may be outstanding per session.
    pub async fn send(&self) -> Result<SendOutcome> {
        match self.begin_send() {
            Ok(pending) => self.complete_send(pending).await,
            Err(reason) => Ok(SendOutcome::Skipped(reason)),
        }
    }

    /// Claim the send lock and take the draft, without any I/O.
    pub fn begin_send(&self) -> std::result::Result<PendingSend, SendRejection> {
        let started = self.state.lock().begin_send();
        if let Err(reason) = &started {
            debug!(?reason, "Send skipped");
        }
        started
    }

    /// Issue a send accepted by [`begin_send`](Self::begin_send) and merge the reply.
    pub async fn complete_send(&self, pending: PendingSend) -> Result<SendOutcome> {
        match self.backend.send_message(&pending.request).await {
            Ok(response) => {
                let appended = self.state.lock().finish_send(&pending, Some(response));
                Ok(if appended {
                    SendOutcome::Sent
                } else {
                    SendOutcome::Dropped
                })
            }
            Err(e) => {
                self.state.lock().finish_send(&pending, None);
                warn!(tab = %pending.local_id, "Send failed: {}", e);
                self.ctx.report(&e);
                Err(e)
            }
        }
    }

    /// Set the draft, then [`send`](Self::send) it.
    pub async fn send_text(&self, text: impl Into<String>) -> Result<SendOutcome> {
        self.set_draft(text);
        self.send().await
    }

    /// Delete the current tab. Persisted threads are deleted remotely first.
    pub async fn delete_current(&self) -> Result<()> {
        let Some(target) = self.state.lock().delete_target() else {
            return Ok(());
        };

        if let Some(remote_id) = &target.remote_id {
            if let Err(e) = self.backend.delete_thread(remote_id).await {
                warn!(thread = %remote_id, "Delete failed: {}", e);
                self.ctx.report(&e);
                return Err(e);
            }
        }

        let request = self.state.lock().remove_tab(&target.local_id);
        self.hydrate(request).await
    }

    /// Delete every thread, then start over with one default tab.
    pub async fn wipe_all(&self) -> Result<()> {
        if let Err(e) = self.backend.wipe_threads().await {
            warn!("Wipe failed: {}", e);
            self.ctx.report(&e);
            return Err(e);
        }
        info!("Chat history wiped");
        self.state.lock().reset_after_wipe();
        Ok(())
    }

    /// Fetch and merge the history for a selection, if it needs one.
    pub async fn hydrate(&self, request: Option<HydrationRequest>) -> Result<()> {
        let Some(request) = request else {
            return Ok(());
        };

        match self.backend.thread_history(&request.remote_id).await {
            Ok(history) => {
                self.state.lock().apply_history(&request, history);
                Ok(())
            }
            Err(e) => {
                self.state.lock().hydration_failed(&request);
                warn!(thread = %request.remote_id, "History fetch failed: {}", e);
                self.ctx.report(&e);
                Err(e)
            }
        }
    }
}
