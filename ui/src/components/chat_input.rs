//! Chat input component

use leptos::prelude::*;

/// Single-line composer. Enter submits, Shift+Enter adds a newline.
#[component]
pub fn ChatInput(
    /// Current input value
    value: RwSignal<String>,
    /// Called when user submits
    on_submit: impl Fn() + 'static + Clone,
    /// Whether input is disabled
    #[prop(into)]
    disabled: Signal<bool>,
    #[prop(default = "Type a movie title...")]
    placeholder: &'static str,
) -> impl IntoView {
    let is_empty = Signal::derive(move || value.get().trim().is_empty());

    let on_keydown = {
        let on_submit = on_submit.clone();
        move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Enter" && !ev.shift_key() {
                ev.prevent_default();
                if !is_empty.get_untracked() && !disabled.get_untracked() {
                    on_submit();
                }
            }
        }
    };

    let on_button_click = move |_| {
        if !is_empty.get_untracked() {
            on_submit();
        }
    };

    view! {
        <div class="flex items-end gap-3 p-4 bg-slate-800/50 backdrop-blur-sm border-t border-slate-700">
            <textarea
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                on:keydown=on_keydown
                placeholder=placeholder
                disabled=move || disabled.get()
                rows="1"
                class="flex-1 px-4 py-3 bg-slate-900 border border-slate-700 rounded-xl resize-none
                       text-slate-100 placeholder-slate-500
                       focus:outline-none focus:ring-2 focus:ring-blue-500 focus:border-transparent
                       disabled:opacity-50 disabled:cursor-not-allowed"
                style="max-height: 200px;"
            ></textarea>
            <button
                on:click=on_button_click
                disabled=move || disabled.get() || is_empty.get()
                class="p-3 bg-blue-600 hover:bg-blue-700 disabled:bg-slate-700
                       disabled:cursor-not-allowed rounded-xl transition-colors"
            >
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    class="w-5 h-5 text-white"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                >
                    <line x1="22" y1="2" x2="11" y2="13"></line>
                    <polygon points="22 2 15 22 11 13 2 9 22 2"></polygon>
                </svg>
            </button>
        </div>
    }
}
