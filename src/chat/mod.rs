//! Chat tabs
//!
//! A dashboard session holds an ordered collection of conversation tabs.
//! Persisted threads arrive as unhydrated tabs and fetch their history the
//! first time they are selected; new tabs start hydrated with a greeting.
//!
//! # Module Structure
//!
//! - [`tabs`] - [`TabCollection`], the sans-IO state machine
//! - [`title`] - default `"Chat N"` title allocation
//! - [`manager`] - [`ChatSessionManager`], the async driver over a backend
//!
//! # Tab lifecycle
//!
//! ```text
//! unhydrated --select--> fetching --history--> hydrated
//!     ^                     |
//!     +------failure--------+
//! ```

pub mod manager;
pub mod tabs;
pub mod title;

pub use manager::{ChatSessionManager, SendOutcome};
pub use tabs::{
    ConversationTab, DeleteTarget, HydrationRequest, PendingSend, SendRejection, TabCollection,
    TabId,
};
pub use title::next_default_title;
