//! Non-blocking user notifications
//!
//! Failures that do not block the screen (and a few confirmations) are queued
//! here. The UI drains the queue and shows each notice as a toast.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Shared notification queue. Clones refer to the same queue.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, level: NoticeLevel, text: impl Into<String>) {
        let notice = Notice {
            level,
            text: text.into(),
        };
        tracing::debug!(level = ?notice.level, text = %notice.text, "Notice queued");
        self.queue.lock().push_back(notice);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text);
    }

    pub fn warn(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Warn, text);
    }

    /// Take every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        self.queue.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}
