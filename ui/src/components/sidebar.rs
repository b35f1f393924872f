//! Sidebar navigation

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};
use screentab::navigation::{Route, MENU};

use crate::state::AppState;

/// Persistent sidebar for tablet and desktop
#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <aside class="sidebar w-64 shrink-0 flex flex-col border-r border-slate-800 bg-slate-950">
            <div class="p-4 border-b border-slate-800">
                <span class="text-lg font-semibold">"screentab"</span>
            </div>
            <NavMenu />
        </aside>
    }
}

/// Menu entries plus logout, shared by the sidebar and the drawer
#[component]
pub fn NavMenu() -> impl IntoView {
    let state = expect_context::<AppState>();
    let location = use_location();
    let navigate = use_navigate();

    let items = MENU
        .iter()
        .map(|item| {
            let route = item.route;
            let state = state.clone();
            let navigate = navigate.clone();
            let is_active = move || Route::from_path(&location.pathname.get()) == route;
            view! {
                <button
                    on:click=move |_| {
                        if let Some(path) = state.activate(route) {
                            navigate(&path, Default::default());
                        }
                    }
                    class=move || format!(
                        "sidebar-item w-full text-left px-3 py-2 rounded-lg transition-colors {}",
                        if is_active() { "sidebar-item-active bg-slate-800" } else { "hover:bg-slate-800/60" }
                    )
                >
                    {item.label}
                </button>
            }
        })
        .collect_view();

    let on_logout = move |_| {
        let state = state.clone();
        spawn_local(async move {
            // failures surface as a notice
            let _ = state.client.auth.logout().await;
            state.sync();
        });
    };

    view! {
        <nav class="flex-1 flex flex-col p-4 gap-1">
            {items}
            <div class="flex-1"></div>
            <button
                on:click=on_logout
                class="w-full text-left px-3 py-2 rounded-lg text-red-400 hover:bg-slate-800/60 transition-colors"
            >
                "Logout"
            </button>
        </nav>
    }
}
