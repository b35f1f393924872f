//! Login/Register page

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use screentab::auth::{FieldErrors, LoginForm, RegisterForm};
use screentab::AppError;

use crate::components::LoadingSpinner;
use crate::state::AppState;

/// Login/Register page
///
/// The gate moves the user on to the dashboard once the session is
/// authenticated, so a successful submit does not navigate itself.
#[component]
pub fn EntryPage() -> impl IntoView {
    let state = expect_context::<AppState>();

    // Form state
    let is_register = RwSignal::new(false);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());
    let is_loading = RwSignal::new(false);

    let session = state.session;

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let state = state.clone();
        let registering = is_register.get_untracked();
        let email = email.get_untracked();
        let password = password.get_untracked();
        let confirm = confirm.get_untracked();

        spawn_local(async move {
            is_loading.set(true);
            let result = if registering {
                let form = RegisterForm {
                    email,
                    password,
                    confirm,
                };
                state.client.auth.register(&form).await
            } else {
                let form = LoginForm { email, password };
                state.client.auth.login(&form).await
            };
            is_loading.set(false);

            errors.set(match result {
                Err(AppError::Validation(fields)) => fields,
                _ => FieldErrors::default(),
            });
            state.sync();
        });
    };

    let toggle_mode = move |_| {
        is_register.update(|r| *r = !*r);
        errors.set(FieldErrors::default());
        confirm.set(String::new());
    };

    view! {
        <div class="min-h-screen flex items-center justify-center px-4">
            <div class="w-full max-w-md auth-card bg-slate-800/60 rounded-2xl p-8 shadow-xl">
                <div class="text-center mb-8">
                    <h1 class="text-3xl font-bold mb-2">"screentab"</h1>
                    <p class="text-slate-400">
                        {move || if is_register.get() { "Create an account" } else { "Sign in to continue" }}
                    </p>
                </div>

                <form on:submit=on_submit class="space-y-5" novalidate=true>
                    <Field
                        label="Email"
                        kind="email"
                        value=email
                        error=Signal::derive(move || errors.get().email)
                    />
                    <Field
                        label="Password"
                        kind="password"
                        value=password
                        error=Signal::derive(move || errors.get().password)
                    />
                    <Show when=move || is_register.get()>
                        <Field
                            label="Confirm password"
                            kind="password"
                            value=confirm
                            error=Signal::derive(move || errors.get().confirm)
                        />
                    </Show>

                    {move || session.get().last_error.map(|message| view! {
                        <div class="p-3 bg-red-500/10 border border-red-500/40 rounded-lg text-sm text-red-300">
                            {message}
                        </div>
                    })}

                    <button
                        type="submit"
                        disabled=move || is_loading.get()
                        class="w-full py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-slate-700 rounded-lg font-medium transition-colors flex items-center justify-center gap-2"
                    >
                        <Show when=move || is_loading.get()>
                            <LoadingSpinner />
                        </Show>
                        {move || if is_register.get() { "Register" } else { "Login" }}
                    </button>
                </form>

                <p class="mt-6 text-center text-sm text-slate-400">
                    {move || if is_register.get() { "Already have an account? " } else { "No account yet? " }}
                    <button on:click=toggle_mode class="text-blue-400 hover:underline">
                        {move || if is_register.get() { "Login" } else { "Register" }}
                    </button>
                </p>
            </div>
        </div>
    }
}

/// Labelled input with its inline error
#[component]
fn Field(
    label: &'static str,
    kind: &'static str,
    value: RwSignal<String>,
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="block text-sm font-medium text-slate-300 mb-1">{label}</span>
            <input
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class=move || format!(
                    "w-full px-4 py-3 bg-slate-900 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500 {}",
                    if error.get().is_some() { "border-red-500" } else { "border-slate-700" }
                )
            />
            {move || error.get().map(|message| view! {
                <span class="block mt-1 text-xs text-red-400">{message}</span>
            })}
        </label>
    }
}
