//! History List Component

use leptos::prelude::*;
use weather_core::controller::{Route, TableKind};

use super::SearchHandle;
use crate::context::AppContext;
use crate::store::{use_home_store, HomeStateStoreFields};

/// Recent searches; clicking one searches it again
#[component]
pub fn HistoryList(search: SearchHandle) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_home_store();

    view! {
        <div class="side-panel history-panel">
            <h3>"History"</h3>
            <div class="side-panel-body">
                {move || {
                    let cities = store.history().get();
                    if cities.is_empty() {
                        view! { <p class="empty-state">"No searches yet"</p> }.into_any()
                    } else {
                        view! {
                            <ul class="city-list">
                                {cities.into_iter().map(|city| {
                                    let label = city.to_string();
                                    view! {
                                        <li>
                                            <button class="city-link" on:click=move |_| search.select(city.clone())>
                                                {label}
                                            </button>
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>
                        }.into_any()
                    }
                }}
            </div>
            <button class="table-link" on:click=move |_| ctx.navigate(Route::Table(TableKind::History))>
                "View full table →"
            </button>
        </div>
    }
}
