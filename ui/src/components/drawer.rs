//! Mobile top bar and slide-in drawer

use leptos::prelude::*;

use super::NavMenu;
use crate::state::AppState;

#[component]
pub fn Drawer() -> impl IntoView {
    let state = expect_context::<AppState>();
    let is_open = state.drawer_open;

    view! {
        <header class="flex items-center gap-3 px-4 h-14 border-b border-slate-800 bg-slate-950">
            <button
                on:click=move |_| is_open.update(|open| *open = !*open)
                class="p-2 rounded-lg hover:bg-slate-800"
                aria-label="Menu"
            >
                <svg xmlns="http://www.w3.org/2000/svg" class="w-5 h-5" viewBox="0 0 20 20" fill="currentColor">
                    <path fill-rule="evenodd" d="M3 5h14a1 1 0 010 2H3a1 1 0 010-2zm0 4h14a1 1 0 010 2H3a1 1 0 010-2zm0 4h14a1 1 0 010 2H3a1 1 0 010-2z" clip-rule="evenodd" />
                </svg>
            </button>
            <span class="font-semibold">"screentab"</span>
        </header>

        <Show when=move || is_open.get()>
            <div
                class="fixed inset-0 bg-black/60 backdrop-blur-sm z-30 animate-fade-in"
                on:click=move |_| is_open.set(false)
            ></div>
        </Show>

        <aside class=move || format!(
            "fixed inset-y-0 left-0 z-40 w-72 flex flex-col bg-slate-950 transform transition-transform duration-300 {}",
            if is_open.get() { "translate-x-0" } else { "-translate-x-full" }
        )>
            <NavMenu />
        </aside>
    }
}
