//! Transient notices

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use screentab::notify::NoticeLevel;

use crate::state::{AppState, Toast, TOAST_MS};

/// Stack of notices in the corner of the screen
#[component]
pub fn Toasts() -> impl IntoView {
    let state = expect_context::<AppState>();
    let toasts = state.toasts;

    view! {
        <div class="fixed bottom-4 right-4 z-50 flex flex-col gap-2">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| view! { <ToastItem toast=toast /> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let state = expect_context::<AppState>();
    let id = toast.id;

    Timeout::new(TOAST_MS, {
        let state = state.clone();
        move || state.dismiss(id)
    })
    .forget();

    let tone = match toast.notice.level {
        NoticeLevel::Success => "border-green-500 text-green-300",
        NoticeLevel::Warn => "border-amber-500 text-amber-300",
    };

    view! {
        <div
            on:click=move |_| state.dismiss(id)
            class=format!("px-4 py-3 rounded-lg bg-slate-800 border-l-4 shadow-lg cursor-pointer animate-fade-in-up {}", tone)
        >
            {toast.notice.text}
        </div>
    }
}
