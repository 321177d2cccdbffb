//! Search Bar Component
//!
//! City input with debounced autocomplete and keyboard navigation.

use leptos::prelude::*;
use leptos::task::spawn_local;
use weather_core::controller::{CursorMove, QueryOutcome, SearchPhase};
use weather_core::domain::Suggestion;

use super::SearchHandle;

/// "Name, Region, Country" without the empty parts
fn suggestion_label(suggestion: &Suggestion) -> String {
    [suggestion.name.as_str(), suggestion.region.as_str(), suggestion.country.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Search input with suggestions
///
/// Props:
/// - search: handle to the page's search controller
#[component]
pub fn SearchBar(search: SearchHandle) -> impl IntoView {
    let (input_value, set_input_value) = signal(String::new());

    // A picked suggestion rewrites the query; mirror it in the box
    Effect::new(move |_| {
        let (phase, query) = search.state.with(|s| (s.phase, s.query.clone()));
        if phase == SearchPhase::ResultReady {
            set_input_value.set(query);
        }
    });

    let change_query = move |text: String| {
        set_input_value.set(text.clone());
        spawn_local(async move {
            let outcome = search.controller().change_query(&text).await;
            if outcome != QueryOutcome::Superseded {
                search.refresh();
            }
        });
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let direction = match ev.key().as_str() {
            "ArrowDown" => CursorMove::Down,
            "ArrowUp" => CursorMove::Up,
            _ => return,
        };
        ev.prevent_default();
        search.controller().move_cursor(direction);
        search.refresh();
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        search.submit_selection();
    };

    let searching = move || search.state.with(|s| s.phase == SearchPhase::Searching);

    view! {
        <div class="search-bar">
            <form class="search-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Enter a city"
                    autocomplete="off"
                    prop:value=move || input_value.get()
                    on:input=move |ev| change_query(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button type="submit" disabled=searching>
                    {move || if searching() { "Searching..." } else { "Search" }}
                </button>
            </form>

            {move || {
                let state = search.state.get();
                if state.suggestions.is_empty() {
                    view! { <div></div> }.into_any()
                } else {
                    let selected = state.cursor;
                    view! {
                        <ul class="suggestion-list">
                            {state.suggestions.into_iter().enumerate().map(|(i, suggestion)| {
                                let label = suggestion_label(&suggestion);
                                let city = suggestion.city_ref();
                                let is_selected = selected == Some(i);
                                view! {
                                    <li
                                        class=if is_selected { "suggestion-item selected" } else { "suggestion-item" }
                                        on:mousedown=move |ev| {
                                            // keep focus in the input
                                            ev.prevent_default();
                                            search.select(city.clone());
                                        }
                                    >
                                        {label}
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }
            }}

            {move || search.state.with(|s| s.error.clone()).map(|error| view! {
                <p class="search-error">{error}</p>
            })}
        </div>
    }
}
