//! Login Page
//!
//! One form for both sign-in and registration.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use weather_core::controller::{AuthController, AuthMode, AuthOutcome, Route};

use crate::context::AppContext;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let auth = Arc::new(AuthController::new(&ctx.services()));
    let state = RwSignal::new(auth.snapshot());
    let auth = StoredValue::new(auth);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (user, pass) = (username.get(), password.get());
        state.update(|s| s.loading = true);
        spawn_local(async move {
            let auth = auth.get_value();
            let outcome = auth.submit(&user, &pass).await;
            state.set(auth.snapshot());
            match outcome {
                Ok(AuthOutcome::SignedIn) => ctx.navigate(Route::Home),
                Ok(AuthOutcome::Registered) => {
                    set_username.set(String::new());
                    set_password.set(String::new());
                }
                Err(_) => {}
            }
        });
    };

    let toggle_mode = move |_| {
        let auth = auth.get_value();
        auth.toggle_mode();
        state.set(auth.snapshot());
    };

    let is_login = move || state.with(|s| s.mode == AuthMode::Login);

    view! {
        <div class="login-page">
            <form class="login-form" on:submit=on_submit>
                <h2>{move || if is_login() { "Sign in" } else { "Create account" }}</h2>

                {move || state.with(|s| s.error.clone()).map(|error| view! {
                    <p class="login-error">{error}</p>
                })}
                {move || state.with(|s| s.notice.clone()).map(|notice| view! {
                    <p class="login-notice">{notice}</p>
                })}

                <input
                    type="text"
                    placeholder="Username"
                    required
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || state.with(|s| s.loading)>
                    {move || match (state.with(|s| s.loading), is_login()) {
                        (true, _) => "Please wait...",
                        (false, true) => "Sign in",
                        (false, false) => "Register",
                    }}
                </button>

                <button type="button" class="mode-toggle" on:click=toggle_mode>
                    {move || if is_login() {
                        "No account? Register"
                    } else {
                        "Already have an account? Sign in"
                    }}
                </button>
            </form>
        </div>
    }
}
