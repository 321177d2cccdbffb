//! Home Page State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use weather_core::domain::CityRef;

/// State shared between the search box and the side panels
#[derive(Clone, Debug, Default, Store)]
pub struct HomeState {
    /// Recent searches, most recent first, deduplicated for display
    pub history: Vec<CityRef>,
    /// Bumped whenever the favorites list on the server changed
    pub favorites_version: u32,
}

/// Type alias for the store
pub type HomeStore = Store<HomeState>;

/// Get the home store from context
pub fn use_home_store() -> HomeStore {
    expect_context::<HomeStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the displayed history
pub fn store_set_history(store: &HomeStore, history: Vec<CityRef>) {
    *store.history().write() = history;
}

/// Ask the favorites panel to reload
pub fn store_bump_favorites(store: &HomeStore) {
    *store.favorites_version().write() += 1;
}
