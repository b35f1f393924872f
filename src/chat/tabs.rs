//! Sans-IO tab state.

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::title::next_default_title;
use crate::types::{
    Message, MessageRole, SendRequest, SendResponse, SendTarget, ThreadHistory, ThreadSummary,
};

pub const GREETING_INITIAL: &str = "Hi! Send a movie title.";
pub const GREETING_NEW_TAB: &str = "New chat. Type a title.";
pub const GREETING_WIPED: &str = "History wiped. Start new.";
pub const GREETING_AFTER_DELETE: &str = "Start a new chat.";

/// Title for a server thread that has none.
pub const UNTITLED_THREAD: &str = "Chat";

/// Client-side tab identifier.
///
/// Random v4 UUIDs: 122 random bits, so a collision within one session is
/// negligible in practice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One conversation.
///
/// A tab without a `remote_id` has never been persisted and is always hydrated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTab {
    pub local_id: TabId,
    pub remote_id: Option<String>,
    pub title: String,
    pub messages: Vec<Message>,
    pub hydrated: bool,
    #[serde(skip)]
    hydrating: bool,
}

impl ConversationTab {
    /// A client-only tab seeded with an assistant greeting.
    pub fn fresh(title: impl Into<String>, greeting: &str) -> Self {
        Self {
            local_id: TabId::generate(),
            remote_id: None,
            title: title.into(),
            messages: vec![Message::assistant(greeting)],
            hydrated: true,
            hydrating: false,
        }
    }

    /// An unhydrated tab for a persisted thread.
    pub fn remote(summary: ThreadSummary) -> Self {
        let title = summary
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED_THREAD.to_string());
        Self {
            local_id: TabId::generate(),
            remote_id: Some(summary.id),
            title,
            messages: Vec::new(),
            hydrated: false,
            hydrating: false,
        }
    }

    /// A history fetch for this tab is in flight.
    pub fn is_hydrating(&self) -> bool {
        self.hydrating
    }
}

/// History fetch the driver must issue for a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationRequest {
    pub local_id: TabId,
    pub remote_id: String,
}

/// A send accepted by [`TabCollection::begin_send`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSend {
    pub local_id: TabId,
    pub request: SendRequest,
}

/// Why a send was not issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejection {
    EmptyInput,
    /// Another send is outstanding somewhere in the session
    Busy,
    NoTab,
}

/// Tab targeted by a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub local_id: TabId,
    pub remote_id: Option<String>,
}

/// The ordered tab collection with the current-tab pointer.
///
/// Every async completion is merged by identifier, never by position, so it
/// survives unrelated changes made while the request was outstanding.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabCollection {
    tabs: Vec<ConversationTab>,
    current: Option<TabId>,
    sending: bool,
    draft: String,
    initialized: bool,
    #[serde(skip)]
    initializing: bool,
}

impl TabCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[ConversationTab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn current_id(&self) -> Option<&TabId> {
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&ConversationTab> {
        self.current.as_ref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &TabId) -> Option<&ConversationTab> {
        self.tabs.iter().find(|t| &t.local_id == id)
    }

    fn get_mut(&mut self, id: &TabId) -> Option<&mut ConversationTab> {
        self.tabs.iter_mut().find(|t| &t.local_id == id)
    }

    /// Reserve the one initialization. False when it is done or under way.
    pub fn claim_initialize(&mut self) -> bool {
        if self.initialized || self.initializing {
            return false;
        }
        self.initializing = true;
        true
    }

    /// The thread list could not be loaded; a later attempt may claim again.
    pub fn initialization_failed(&mut self) {
        self.initializing = false;
    }

    /// Build the collection from the thread list and select the first tab.
    ///
    /// Runs once; afterwards the collection belongs to the user and later
    /// thread lists are ignored.
    pub fn initialize(&mut self, threads: Vec<ThreadSummary>) -> Option<HydrationRequest> {
        self.initializing = false;
        if self.initialized {
            debug!("Tabs already initialized, thread list ignored");
            return None;
        }
        self.initialized = true;
        if threads.is_empty() {
            self.reset_with(GREETING_INITIAL);
            return None;
        }

        self.tabs = threads.into_iter().map(ConversationTab::remote).collect();
        debug!(tabs = self.tabs.len(), "Tabs initialized from threads");
        self.select_first()
    }

    /// Point at a tab. Returns the history fetch to issue, if one is needed.
    ///
    /// Unknown ids are ignored. A tab that is hydrated or already being
    /// fetched never yields a second request.
    pub fn select(&mut self, id: &TabId) -> Option<HydrationRequest> {
        let tab = self.tabs.iter_mut().find(|t| &t.local_id == id)?;
        self.current = Some(id.clone());

        if tab.hydrated || tab.hydrating {
            return None;
        }
        let remote_id = tab.remote_id.clone()?;
        tab.hydrating = true;
        debug!(tab = %id, thread = %remote_id, "Hydration requested");
        Some(HydrationRequest {
            local_id: id.clone(),
            remote_id,
        })
    }

    /// Merge a completed history fetch into the tab it was requested for.
    ///
    /// Returns `false` when that tab is gone or already hydrated.
    pub fn apply_history(&mut self, request: &HydrationRequest, history: ThreadHistory) -> bool {
        let Some(tab) = self
            .tabs
            .iter_mut()
            .find(|t| t.remote_id.as_deref() == Some(request.remote_id.as_str()))
        else {
            debug!(thread = %request.remote_id, "Dropping history for a removed tab");
            return false;
        };
        if tab.hydrated {
            tab.hydrating = false;
            return false;
        }

        tab.messages = history.messages;
        if let Some(title) = history.title.filter(|t| !t.trim().is_empty()) {
            tab.title = title;
        }
        tab.hydrated = true;
        tab.hydrating = false;
        true
    }

    /// A history fetch failed; the next selection may retry.
    pub fn hydration_failed(&mut self, request: &HydrationRequest) {
        if let Some(tab) = self
            .tabs
            .iter_mut()
            .find(|t| t.remote_id.as_deref() == Some(request.remote_id.as_str()))
        {
            tab.hydrating = false;
        }
    }

    /// Append a fresh tab with the next default title and select it.
    pub fn create_tab(&mut self) -> TabId {
        let title = next_default_title(self.tabs.iter().map(|t| t.title.as_str()));
        let tab = ConversationTab::fresh(title, GREETING_NEW_TAB);
        let id = tab.local_id.clone();
        debug!(tab = %id, title = %tab.title, "Tab created");
        self.tabs.push(tab);
        self.current = Some(id.clone());
        id
    }

    /// Take the draft and start a send from the current tab.
    ///
    /// The draft is cleared only when the send is accepted.
    pub fn begin_send(&mut self) -> Result<PendingSend, SendRejection> {
        let text = self.draft.trim();
        if text.is_empty() {
            return Err(SendRejection::EmptyInput);
        }
        if self.sending {
            return Err(SendRejection::Busy);
        }
        let tab = self.current().ok_or(SendRejection::NoTab)?;

        let target = match &tab.remote_id {
            Some(remote_id) => SendTarget::Thread(remote_id.clone()),
            None => SendTarget::Title(tab.title.clone()),
        };
        let pending = PendingSend {
            local_id: tab.local_id.clone(),
            request: SendRequest {
                target,
                text: text.to_string(),
            },
        };

        self.draft.clear();
        self.sending = true;
        Ok(pending)
    }

    /// Finish a send. `None` means it failed; the flag clears either way.
    ///
    /// Returns `true` when the messages were appended.
    pub fn finish_send(&mut self, pending: &PendingSend, response: Option<SendResponse>) -> bool {
        self.sending = false;
        let Some(response) = response else {
            return false;
        };
        let Some(tab) = self.get_mut(&pending.local_id) else {
            debug!(tab = %pending.local_id, "Dropping send response for a removed tab");
            return false;
        };

        tab.messages
            .push(response.user_message.into_message(MessageRole::User));
        tab.messages
            .push(response.assistant_message.into_message(MessageRole::Assistant));
        if let Some(thread_id) = response.thread_id.filter(|id| !id.is_empty()) {
            tab.remote_id = Some(thread_id);
        }
        true
    }

    pub fn delete_target(&self) -> Option<DeleteTarget> {
        self.current().map(|tab| DeleteTarget {
            local_id: tab.local_id.clone(),
            remote_id: tab.remote_id.clone(),
        })
    }

    /// Remove a tab and select the first remaining one.
    ///
    /// An emptied collection gets a fresh default tab. Unknown ids are ignored.
    pub fn remove_tab(&mut self, id: &TabId) -> Option<HydrationRequest> {
        let index = self.tabs.iter().position(|t| &t.local_id == id)?;
        self.tabs.remove(index);
        debug!(tab = %id, remaining = self.tabs.len(), "Tab removed");

        if self.tabs.is_empty() {
            self.reset_with(GREETING_AFTER_DELETE);
            return None;
        }
        self.select_first()
    }

    /// Discard every tab after a wipe.
    pub fn reset_after_wipe(&mut self) {
        self.reset_with(GREETING_WIPED);
    }

    fn select_first(&mut self) -> Option<HydrationRequest> {
        let first = self.tabs.first()?.local_id.clone();
        self.select(&first)
    }

    fn reset_with(&mut self, greeting: &str) {
        let tab = ConversationTab::fresh(next_default_title(std::iter::empty()), greeting);
        self.current = Some(tab.local_id.clone());
        self.tabs = vec![tab];
    }
}
