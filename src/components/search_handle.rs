//! Search Handle
//!
//! Copyable bridge between the search controller and the home page
//! components. Every action runs the controller in the background, then
//! copies its snapshot into a signal.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use weather_core::controller::{Route, SearchController, SearchPhase, SearchState, ToggleOutcome};
use weather_core::domain::{CityRef, ClientError};

use crate::context::AppContext;
use crate::store::{store_bump_favorites, store_set_history, HomeStore};

#[derive(Clone, Copy)]
pub struct SearchHandle {
    controller: StoredValue<Arc<SearchController>>,
    /// Last snapshot of the controller
    pub state: RwSignal<SearchState>,
    /// Message from a favorite toggle that failed or found no record
    pub notice: RwSignal<Option<String>>,
    store: HomeStore,
    ctx: AppContext,
    history_limit: usize,
}

impl SearchHandle {
    pub fn new(controller: Arc<SearchController>, ctx: AppContext, store: HomeStore, history_limit: usize) -> Self {
        let state = RwSignal::new(controller.snapshot());
        let handle = Self {
            controller: StoredValue::new(controller),
            state,
            notice: RwSignal::new(None),
            store,
            ctx,
            history_limit,
        };
        handle.refresh_history();
        handle
    }

    pub fn controller(&self) -> Arc<SearchController> {
        self.controller.get_value()
    }

    pub fn refresh(&self) {
        self.state.set(self.controller().snapshot());
    }

    pub fn refresh_history(&self) {
        let cities = self.controller().history().cities(self.history_limit);
        store_set_history(&self.store, cities);
    }

    fn mark_searching(&self) {
        self.state.update(|s| s.phase = SearchPhase::Searching);
    }

    /// Search a picked city; it lands in history when the lookup succeeds
    pub fn select(&self, city: CityRef) {
        let this = *self;
        this.mark_searching();
        spawn_local(async move {
            let _ = this.controller().select_city(&city).await;
            this.refresh();
            this.refresh_history();
        });
    }

    /// Enter in the search box
    pub fn submit_selection(&self) {
        let this = *self;
        this.mark_searching();
        spawn_local(async move {
            let _ = this.controller().submit_selection().await;
            this.refresh();
            this.refresh_history();
        });
    }

    pub fn toggle_favorite(&self) {
        let this = *self;
        this.notice.set(None);
        // optimistic, the snapshot below settles it
        this.state.update(|s| {
            if s.weather.is_some() {
                s.is_favorite = !s.is_favorite;
            }
        });
        spawn_local(async move {
            match this.controller().toggle_favorite().await {
                Ok(ToggleOutcome::Applied { .. }) => store_bump_favorites(&this.store),
                Ok(ToggleOutcome::Reconciled { error, .. }) => {
                    this.notice.set(Some(error.message()));
                    store_bump_favorites(&this.store);
                }
                Ok(ToggleOutcome::Reverted { error, .. }) => this.notice.set(Some(error.message())),
                Ok(ToggleOutcome::Skipped) => {}
                Err(ClientError::Unauthenticated) => this.ctx.navigate(Route::Login),
                Err(e) => this.notice.set(Some(e.message())),
            }
            this.refresh();
        });
    }
}
