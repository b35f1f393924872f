//! Progress indicators

use leptos::prelude::*;

/// Three pulsing frames, used while a tab's history loads
#[component]
pub fn LoadingDots() -> impl IntoView {
    view! {
        <div class="flex items-center gap-1.5" aria-label="Loading">
            {(1..=3)
                .map(|i| view! {
                    <span class=format!("w-2.5 h-1.5 rounded-sm bg-amber-400/80 dot-bounce-{i}")></span>
                })
                .collect_view()}
        </div>
    }
}

/// Ring spinner
#[component]
pub fn LoadingSpinner(
    #[prop(default = "w-5 h-5")] size: &'static str,
) -> impl IntoView {
    view! {
        <span
            role="status"
            class=format!(
                "{size} inline-block rounded-full border-2 border-slate-600 border-t-amber-400 animate-spin"
            )
        ></span>
    }
}

/// Assistant reply on its way
#[component]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="flex items-center gap-3 text-sm text-slate-400 message-appear">
            <span class="text-lg">"🎬"</span>
            <LoadingDots />
            <span>"Looking it up"</span>
        </div>
    }
}

/// Covers the viewport while the session is checked or a route is changing.
#[component]
pub fn LoadingOverlay() -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-slate-950/90">
            <div class="flex flex-col items-center gap-3">
                <span class="text-2xl font-semibold tracking-wide text-slate-200">"screentab"</span>
                <LoadingSpinner size="w-8 h-8" />
            </div>
        </div>
    }
}
