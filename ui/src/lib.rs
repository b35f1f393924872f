//! screentab admin panel - Leptos frontend
//!
//! Every route passes through [`AppShell`], which asks the session gate what
//! to show and wraps the page in the navigation chrome for the viewport.

pub mod api;
pub mod components;
pub mod pages;
pub mod state;

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
    path, NavigateOptions,
};
use screentab::navigation::{Layout, Shell};
use screentab::session::{decide, GateDecision};

use components::{Drawer, LoadingOverlay, Sidebar, Toasts};
use pages::{DashboardPage, EntryPage, MaintenancePage, UsersPage};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    let initial_path = window()
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string());
    let state = AppState::new(&initial_path, viewport_width());
    provide_meta_context();
    provide_context(state.clone());

    // Session probe, once per page load
    spawn_local({
        let state = state.clone();
        async move {
            state.client.auth.resolve().await;
            state.sync();
        }
    });

    let resize = window_event_listener(ev::resize, move |_| {
        let layout = Layout::classify(viewport_width());
        if state.layout.get_untracked() != layout {
            state.layout.set(layout);
            if !layout.is_mobile() {
                state.drawer_open.set(false);
            }
        }
    });
    on_cleanup(move || resize.remove());

    view! {
        <Title text="screentab" />
        <Router>
            <AppShell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=EntryPage />
                    <Route path=path!("/dashboard") view=DashboardPage />
                    <Route path=path!("/users") view=UsersPage />
                    <Route path=path!("/maintenance") view=MaintenancePage />
                </Routes>
            </AppShell>
            <Toasts />
        </Router>
    }
}

fn viewport_width() -> f64 {
    window()
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}

/// Session gate around the routed content
#[component]
fn AppShell(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AppState>();
    let location = use_location();
    let navigate = use_navigate();

    Effect::new({
        let state = state.clone();
        move |_| state.location_changed(&location.pathname.get())
    });

    let decision = Memo::new({
        let state = state.clone();
        move |_| {
            decide(
                &state.session.get(),
                &location.pathname.get(),
                state.layout.get(),
                state.navigating.get(),
            )
        }
    });

    // Only the chrome matters for mounting; the router switches pages itself.
    let frame = Memo::new(move |_| match decision.get() {
        GateDecision::Render { shell, .. } => Some(shell),
        GateDecision::Block | GateDecision::Redirect { .. } => None,
    });

    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            if let GateDecision::Redirect { to } = decision.get() {
                navigate(to.path(), replace());
            }
        }
    });

    // Redirects requested by the client core (maintenance, sign-out)
    Effect::new(move |_| {
        if let Some(route) = state.redirect.get() {
            state.redirect.set(None);
            navigate(route.path(), replace());
        }
    });

    view! {
        {move || match frame.get() {
            None => view! { <LoadingOverlay /> }.into_any(),
            Some(Shell::Bare) => view! {
                <main class="min-h-screen bg-slate-900 text-slate-100">{children()}</main>
            }.into_any(),
            Some(Shell::Sidebar) => view! {
                <div class="flex min-h-screen bg-slate-900 text-slate-100">
                    <Sidebar />
                    <main class="flex-1 min-w-0">{children()}</main>
                </div>
            }.into_any(),
            Some(Shell::Drawer) => view! {
                <div class="flex flex-col min-h-screen bg-slate-900 text-slate-100">
                    <Drawer />
                    <main class="flex-1 min-w-0">{children()}</main>
                </div>
            }.into_any(),
        }}
    }
}

fn replace() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..Default::default()
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-[80vh] flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-slate-500 mb-4">"404"</h1>
                <p class="text-xl text-slate-400 mb-8">"Page not found"</p>
                <a
                    href="/dashboard"
                    class="px-6 py-3 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium transition-colors"
                >
                    "Back to dashboard"
                </a>
            </div>
        </div>
    }
}
