//! Favorites Panel
//!
//! The signed-in user's saved cities, newest first.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

use super::Services;
use crate::api::FavoritesApi;
use crate::domain::{sort_newest_first, CityRef, ClientError, ClientResult, Favorite, RecordId};
use crate::flight::SingleFlight;
use crate::session::SessionStore;

const LOAD_FAILED: &str = "Failed to load favorites";
const REMOVE_FAILED: &str = "Failed to remove favorite";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesState {
    pub favorites: Vec<Favorite>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct FavoritesPanel {
    api: Arc<dyn FavoritesApi>,
    session: Arc<dyn SessionStore>,
    select_flight: SingleFlight,
    state: Mutex<FavoritesState>,
}

impl FavoritesPanel {
    pub fn new(services: &Services) -> Self {
        Self {
            api: services.favorites.clone(),
            session: services.session.clone(),
            select_flight: SingleFlight::new(),
            state: Mutex::new(FavoritesState {
                loading: true,
                ..Default::default()
            }),
        }
    }

    pub fn snapshot(&self) -> FavoritesState {
        self.state.lock().clone()
    }

    /// No token: the view should send the user to the login page
    pub fn requires_login(&self) -> bool {
        self.session.token().is_none()
    }

    pub async fn load(&self) -> ClientResult<()> {
        self.state.lock().loading = true;
        let result = self.api.list_favorites().await;

        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(mut favorites) => {
                sort_newest_first(&mut favorites);
                state.favorites = favorites;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                log::error!("Loading favorites failed: {}", e);
                let message = e.message_or(LOAD_FAILED);
                state.error = Some(message.clone());
                Err(ClientError::Remote(message))
            }
        }
    }

    /// Delete by id, then reload the list
    pub async fn remove(&self, id: &RecordId) -> ClientResult<()> {
        if let Err(e) = self.api.remove_favorite(id).await {
            log::error!("Removing favorite {} failed: {}", id, e);
            return Err(ClientError::Remote(e.message_or(REMOVE_FAILED)));
        }
        self.load().await
    }

    /// Run `on_select` for the favorite's city unless a selection is already
    /// in flight, in which case the click is dropped and `None` returned
    pub async fn select<F, Fut>(&self, favorite: &Favorite, on_select: F) -> Option<Fut::Output>
    where
        F: FnOnce(CityRef) -> Fut,
        Fut: Future,
    {
        let Some(_flight) = self.select_flight.try_begin() else {
            log::debug!("Favorite selection already in flight");
            return None;
        };
        Some(on_select(favorite.city_ref()).await)
    }
}
