//! Home Page
//!
//! Search bar and weather card in the middle, history and favorites on
//! the side.

use std::sync::Arc;

use leptos::prelude::*;
use reactive_stores::Store;
use weather_core::controller::{AuthController, Route, SearchController};

use super::{FavoritesList, HistoryList, SearchBar, SearchHandle, WeatherCard};
use crate::context::AppContext;
use crate::platform::GlooTimer;
use crate::store::{HomeState, HomeStore};

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store: HomeStore = Store::new(HomeState::default());
    provide_context(store);

    let config = ctx.config();
    let controller = Arc::new(SearchController::new(&ctx.services(), Arc::new(GlooTimer), config.clone()));
    let search = SearchHandle::new(controller, ctx, store, config.history_limit);

    // City handed over from the table page
    Effect::new(move |_| {
        if let Some(city) = ctx.pending_city.get() {
            ctx.pending_city.set(None);
            search.select(city);
        }
    });

    let sign_out = move |_| {
        AuthController::new(&ctx.services()).sign_out();
        ctx.navigate(Route::Login);
    };

    view! {
        <div class="home-layout">
            <header class="home-header">
                <SearchBar search=search />
                <button class="sign-out-btn" on:click=sign_out>"Sign out"</button>
            </header>
            <main class="home-main">
                <WeatherCard search=search />
            </main>
            <aside class="home-side">
                <HistoryList search=search />
                <FavoritesList search=search />
            </aside>
        </div>
    }
}
