//! Shown when the backend cannot be reached

use leptos::prelude::*;

#[component]
pub fn MaintenancePage() -> impl IntoView {
    let retry = move |_| {
        let _ = window().location().set_href("/");
    };

    view! {
        <div class="min-h-[80vh] flex items-center justify-center px-4">
            <div class="text-center max-w-md">
                <h1 class="text-3xl font-bold mb-4">"We'll be right back"</h1>
                <p class="text-slate-400 mb-8">
                    "The service is temporarily unavailable. Please try again in a few minutes."
                </p>
                <button
                    on:click=retry
                    class="px-6 py-3 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium transition-colors"
                >
                    "Try again"
                </button>
            </div>
        </div>
    }
}
