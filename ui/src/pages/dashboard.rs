//! Chat dashboard: one tab per conversation thread

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use screentab::chat::TabId;

use crate::components::{ChatInput, ChatMessage, LoadingDots, TypingIndicator};
use crate::state::AppState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let tabs = state.tabs;
    let draft = RwSignal::new(state.client.chat.snapshot().draft().to_string());
    let messages_ref = NodeRef::<Div>::new();

    if !state.client.chat.snapshot().is_initialized() {
        let state = state.clone();
        spawn_local(async move {
            // failures are reported by the manager
            let _ = state.client.chat.initialize().await;
            state.sync();
        });
    }

    // Keep the newest message in view
    Effect::new(move |_| {
        tabs.track();
        if let Some(el) = messages_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let select = {
        let state = state.clone();
        move |id: TabId| {
            let request = state.client.chat.select_local(&id);
            state.sync();
            if request.is_some() {
                let state = state.clone();
                spawn_local(async move {
                    let _ = state.client.chat.hydrate(request).await;
                    state.sync();
                });
            }
        }
    };

    let new_tab = {
        let state = state.clone();
        move |_| {
            state.client.chat.create_tab();
            state.sync();
        }
    };

    let delete_tab = {
        let state = state.clone();
        move |_| {
            let state = state.clone();
            spawn_local(async move {
                let _ = state.client.chat.delete_current().await;
                state.sync();
            });
        }
    };

    let wipe = {
        let state = state.clone();
        move |_| {
            let confirmed = window()
                .confirm_with_message("Delete every chat? This cannot be undone.")
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                let _ = state.client.chat.wipe_all().await;
                state.sync();
            });
        }
    };

    let send = move || {
        let chat = &state.client.chat;
        chat.set_draft(draft.get_untracked());
        let Ok(pending) = chat.begin_send() else {
            return;
        };
        draft.set(chat.snapshot().draft().to_string());
        state.sync();

        let state = state.clone();
        spawn_local(async move {
            let _ = state.client.chat.complete_send(pending).await;
            state.sync();
        });
    };

    view! {
        <div class="flex flex-col h-screen">
            <div class="flex items-center gap-2 px-4 py-3 border-b border-slate-800 overflow-x-auto">
                {move || {
                    let collection = tabs.get();
                    let current = collection.current_id().cloned();
                    collection
                        .tabs()
                        .iter()
                        .map(|tab| {
                            let id = tab.local_id.clone();
                            let active = current.as_ref() == Some(&id);
                            let select = select.clone();
                            view! {
                                <button
                                    on:click=move |_| select(id.clone())
                                    class=format!(
                                        "px-3 py-1.5 rounded-lg text-sm whitespace-nowrap transition-colors {}",
                                        if active { "bg-blue-600 text-white" } else { "bg-slate-800 hover:bg-slate-700" }
                                    )
                                >
                                    {tab.title.clone()}
                                </button>
                            }
                        })
                        .collect_view()
                }}
                <button
                    on:click=new_tab
                    class="px-3 py-1.5 rounded-lg text-sm bg-slate-800 hover:bg-slate-700"
                    title="New chat"
                >
                    "+"
                </button>
                <div class="flex-1"></div>
                <button
                    on:click=delete_tab
                    disabled=move || tabs.get().current().is_none()
                    class="px-3 py-1.5 rounded-lg text-sm text-slate-300 hover:bg-slate-800 disabled:opacity-50"
                >
                    "Delete"
                </button>
                <button
                    on:click=wipe
                    class="px-3 py-1.5 rounded-lg text-sm text-red-400 hover:bg-slate-800"
                >
                    "Wipe all"
                </button>
            </div>

            <div node_ref=messages_ref class="flex-1 overflow-y-auto p-4 space-y-4">
                {move || {
                    let collection = tabs.get();
                    match collection.current() {
                        None => view! {
                            <div class="flex justify-center py-8"><LoadingDots /></div>
                        }.into_any(),
                        Some(tab) if tab.is_hydrating() => view! {
                            <div class="flex justify-center py-8"><LoadingDots /></div>
                        }.into_any(),
                        Some(tab) => tab
                            .messages
                            .iter()
                            .cloned()
                            .map(|message| view! { <ChatMessage message=message /> })
                            .collect_view()
                            .into_any(),
                    }
                }}
                <Show when=move || tabs.get().is_sending()>
                    <TypingIndicator />
                </Show>
            </div>

            <ChatInput
                value=draft
                on_submit=send
                disabled=Signal::derive(move || tabs.get().is_sending())
            />
        </div>
    }
}
