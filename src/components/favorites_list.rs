//! Favorites List Component
//!
//! Side panel with the user's saved cities. Reloads whenever the search
//! card changes a favorite.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use weather_core::controller::{FavoritesPanel, Route, TableKind};
use weather_core::domain::{Favorite, RecordId};

use super::SearchHandle;
use crate::context::AppContext;
use crate::store::{use_home_store, HomeStateStoreFields};

#[component]
pub fn FavoritesList(search: SearchHandle) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_home_store();
    let panel = Arc::new(FavoritesPanel::new(&ctx.services()));
    let state = RwSignal::new(panel.snapshot());
    let panel = StoredValue::new(panel);

    Effect::new(move |_| {
        let version = store.favorites_version().get();
        let panel = panel.get_value();
        if panel.requires_login() {
            ctx.navigate(Route::Login);
            return;
        }
        spawn_local(async move {
            log::debug!("Loading favorites (version {})", version);
            let _ = panel.load().await;
            state.set(panel.snapshot());
        });
    });

    let on_select = move |favorite: Favorite| {
        spawn_local(async move {
            let controller = search.controller();
            let picked = panel
                .get_value()
                .select(&favorite, move |city| async move { controller.select_city(&city).await })
                .await;
            if picked.is_some() {
                search.refresh();
                search.refresh_history();
            }
        });
    };

    let on_remove = move |id: RecordId| {
        spawn_local(async move {
            let panel = panel.get_value();
            if let Err(e) = panel.remove(&id).await {
                state.update(|s| s.error = Some(e.message()));
                return;
            }
            state.set(panel.snapshot());

            // the card may be showing the city just removed
            let shown = search.state.with_untracked(|s| s.weather.as_ref().map(|w| w.city.clone()));
            if let Some(city) = shown {
                search.controller().check_favorite_status(&city).await;
                search.refresh();
            }
        });
    };

    view! {
        <div class="side-panel favorites-panel">
            <h3>"Favorites"</h3>
            <div class="side-panel-body">
                {move || {
                    let current = state.get();
                    if current.loading {
                        return view! { <p class="loading">"Loading..."</p> }.into_any();
                    }
                    if let Some(error) = current.error {
                        return view! { <p class="panel-error">{error}</p> }.into_any();
                    }
                    if current.favorites.is_empty() {
                        return view! { <p class="empty-state">"No favorites yet"</p> }.into_any();
                    }
                    view! {
                        <ul class="city-list">
                            {current.favorites.into_iter().map(|favorite| {
                                let id = favorite.id.clone();
                                let label = favorite.city_ref().to_string();
                                view! {
                                    <li class="favorite-item">
                                        <button class="city-link" on:click=move |_| on_select(favorite.clone())>
                                            {label}
                                        </button>
                                        <button
                                            class="remove-btn"
                                            title="Remove"
                                            on:click=move |_| on_remove(id.clone())
                                        >
                                            "✕"
                                        </button>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }}
            </div>
            <button class="table-link" on:click=move |_| ctx.navigate(Route::Table(TableKind::Favorites))>
                "View full table →"
            </button>
        </div>
    }
}
