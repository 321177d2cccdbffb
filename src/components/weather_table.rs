//! Weather Table Page
//!
//! Bulk weather for every city in history or favorites, 20 rows a page.
//! Clicking a row opens that city on the home page.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use weather_core::controller::{Route, TableController, TableKind, TableRow};

use crate::context::AppContext;

fn row_view(row: TableRow, ctx: AppContext) -> impl IntoView {
    let city = row.city_ref();
    view! {
        <tr class="table-row" on:click=move |_| ctx.open_city(city.clone())>
            <td>{row.name.clone()}</td>
            <td>{row.country.clone().unwrap_or_default()}</td>
            <td>{format!("{}°C / {}°F", row.celsius, row.fahrenheit)}</td>
            <td>{format!("{}%", row.humidity)}</td>
            <td>
                {format!("{} km/h", row.wind_speed)}
                {row.wind_direction.clone().map(|dir| format!(" {}", dir))}
            </td>
            <td>{row.local_clock.clone().unwrap_or_else(|| "-".to_string())}</td>
        </tr>
    }
}

#[component]
pub fn WeatherTable(kind: TableKind) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let table = Arc::new(TableController::new(&ctx.services(), ctx.config().page_size));
    let state = RwSignal::new(table.snapshot());
    let table = StoredValue::new(table);
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    // Load once on mount
    spawn_local(async move {
        let table = table.get_value();
        if let Err(e) = table.open(kind).await {
            set_load_error.set(Some(e.message()));
        }
        state.set(table.snapshot());
    });

    let go_to = move |page: usize| {
        table.get_value().set_page(page);
        state.set(table.get_value().snapshot());
    };

    view! {
        <div class="table-page">
            <div class="table-header">
                <button class="back-btn" on:click=move |_| ctx.navigate(Route::Home)>"← Back"</button>
                <h2>{kind.title()}</h2>
            </div>

            {move || {
                let current = state.get();
                if current.loading {
                    return view! { <p class="loading">"Loading..."</p> }.into_any();
                }
                if let Some(error) = current.error.clone().or_else(|| load_error.get()) {
                    if current.rows.is_empty() {
                        return view! { <p class="panel-error">{error}</p> }.into_any();
                    }
                }
                if current.rows.is_empty() {
                    return view! { <p class="empty-state">"Nothing to show"</p> }.into_any();
                }

                let page = current.page;
                let total = current.total_pages();
                view! {
                    <table class="weather-table">
                        <thead>
                            <tr>
                                <th>"City"</th>
                                <th>"Country"</th>
                                <th>"Temperature"</th>
                                <th>"Humidity"</th>
                                <th>"Wind"</th>
                                <th>"Local time"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {current.page_rows().into_iter().map(|row| row_view(row, ctx)).collect_view()}
                        </tbody>
                    </table>
                    <div class="pager">
                        <button disabled={page <= 1} on:click=move |_| go_to(page.saturating_sub(1))>"‹"</button>
                        <span>{format!("Page {} of {}", page, total)}</span>
                        <button disabled={page >= total} on:click=move |_| go_to(page + 1)>"›"</button>
                    </div>
                }.into_any()
            }}
        </div>
    }
}
