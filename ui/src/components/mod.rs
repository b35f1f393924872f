//! Reusable UI components

pub mod chat_input;
pub mod chat_message;
pub mod drawer;
pub mod loading;
pub mod sidebar;
pub mod toast;

pub use chat_input::ChatInput;
pub use chat_message::ChatMessage;
pub use drawer::Drawer;
pub use loading::{LoadingDots, LoadingOverlay, LoadingSpinner, TypingIndicator};
pub use sidebar::{NavMenu, Sidebar};
pub use toast::Toasts;
