//! Chat message component

use leptos::prelude::*;
use screentab::types::{Message, MessageRole};

/// Render a single chat message
#[component]
pub fn ChatMessage(message: Message) -> impl IntoView {
    let is_user = message.role == MessageRole::User;
    let time = message
        .timestamp
        .with_timezone(&chrono::Local)
        .format("%H:%M")
        .to_string();

    view! {
        <div class=format!(
            "flex items-start gap-3 message-appear {}",
            if is_user { "flex-row-reverse" } else { "" }
        )>
            <div class=format!(
                "w-8 h-8 rounded-full flex items-center justify-center text-white text-sm font-medium shrink-0 {}",
                if is_user {
                    "bg-gradient-to-br from-blue-500 to-cyan-500"
                } else {
                    "bg-gradient-to-br from-violet-500 to-purple-600"
                }
            )>
                {if is_user { "👤" } else { "🎬" }}
            </div>

            <div class=format!(
                "flex flex-col gap-1 max-w-[80%] {}",
                if is_user { "items-end" } else { "items-start" }
            )>
                <div class=format!(
                    "px-4 py-3 rounded-2xl whitespace-pre-wrap break-words {}",
                    if is_user {
                        "bg-blue-600 text-white rounded-tr-sm"
                    } else {
                        "bg-slate-800 text-slate-100 rounded-tl-sm"
                    }
                )>
                    {message.text}
                </div>
                <span class="text-xs text-slate-600 mt-1">{time}</span>
            </div>
        </div>
    }
}
