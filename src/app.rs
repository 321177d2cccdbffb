//! Weather Frontend App
//!
//! Provides the app context and switches pages on the current route.

use leptos::ev;
use leptos::prelude::*;
use weather_core::controller::Route;

use crate::components::{HomePage, LoginPage, WeatherTable};
use crate::context::{build_config, AppContext};

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(build_config());
    provide_context(ctx);

    // Back/forward buttons
    let _ = window_event_listener(ev::popstate, move |_| ctx.sync_location());

    view! {
        <div class="app-layout">
            {move || match ctx.route.get() {
                Route::Login => view! { <LoginPage /> }.into_any(),
                Route::Home => view! { <HomePage /> }.into_any(),
                Route::Table(kind) => view! { <WeatherTable kind=kind /> }.into_any(),
            }}
        </div>
    }
}
