//! Registered users, one page at a time

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::LoadingSpinner;
use crate::state::AppState;

#[component]
pub fn UsersPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let location = use_location();
    let navigate = use_navigate();
    let users = state.users;
    let is_loading = RwSignal::new(false);

    // Reload whenever `?page=` changes
    Effect::new({
        let state = state.clone();
        move |_| {
            let query = location.search.get();
            let state = state.clone();
            is_loading.set(true);
            spawn_local(async move {
                let _ = state.client.users.load_from_query(&query).await;
                is_loading.set(false);
                state.sync();
            });
        }
    });

    let go = move |page: u32| {
        if let Some(path) = users.get_untracked().go(page) {
            navigate(&path, Default::default());
        }
    };
    let prev = {
        let go = go.clone();
        move |_| go(users.get_untracked().page.saturating_sub(1))
    };
    let next = move |_| go(users.get_untracked().page + 1);

    view! {
        <div class="p-6 max-w-4xl mx-auto">
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-semibold">"All users"</h1>
                <Show when=move || is_loading.get()>
                    <LoadingSpinner />
                </Show>
            </div>

            {move || users.get().error.map(|message| view! {
                <div class="mb-4 p-3 bg-red-500/10 border border-red-500/40 rounded-lg text-sm text-red-300">
                    {message}
                </div>
            })}

            <div class="overflow-x-auto rounded-xl border border-slate-800">
                <table class="w-full text-left text-sm">
                    <thead class="bg-slate-800/60 text-slate-400">
                        <tr>
                            <th class="px-4 py-3 font-medium">"Email"</th>
                            <th class="px-4 py-3 font-medium">"Registered"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let page = users.get();
                            if page.items.is_empty() {
                                view! {
                                    <tr>
                                        <td colspan="2" class="px-4 py-6 text-center text-slate-500">
                                            "No users found."
                                        </td>
                                    </tr>
                                }.into_any()
                            } else {
                                page.items
                                    .into_iter()
                                    .map(|user| view! {
                                        <tr class="border-t border-slate-800">
                                            <td class="px-4 py-3">{user.email}</td>
                                            <td class="px-4 py-3 text-slate-400">
                                                {user.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string()}
                                            </td>
                                        </tr>
                                    })
                                    .collect_view()
                                    .into_any()
                            }
                        }}
                    </tbody>
                </table>
            </div>

            <div class="flex items-center justify-between mt-4 text-sm">
                <span class="text-slate-400">
                    {move || {
                        let page = users.get();
                        format!("Page {} of {} ({} users)", page.page, page.max_page(), page.total)
                    }}
                </span>
                <div class="flex gap-2">
                    <button
                        on:click=prev
                        disabled=move || !users.get().has_prev()
                        class="px-3 py-1.5 rounded-lg bg-slate-800 hover:bg-slate-700 disabled:opacity-50"
                    >
                        "Prev"
                    </button>
                    <button
                        on:click=next
                        disabled=move || !users.get().has_next()
                        class="px-3 py-1.5 rounded-lg bg-slate-800 hover:bg-slate-700 disabled:opacity-50"
                    >
                        "Next"
                    </button>
                </div>
            </div>
        </div>
    }
}
