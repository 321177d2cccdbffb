//! Controllers
//!
//! Stateful, view-agnostic logic behind each page. Every controller keeps
//! its state behind a mutex that is never held across an `.await`, and
//! hands the view a cloned snapshot.

mod auth;
mod favorites;
mod route;
mod search;
mod table;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::api::{AuthApi, FavoritesApi, HttpApi, WeatherApi};
use crate::config::ClientConfig;
use crate::session::SessionStore;

pub use auth::{AuthController, AuthMode, AuthOutcome, AuthState};
pub use favorites::{FavoritesPanel, FavoritesState};
pub use route::{Route, TableKind};
pub use search::{CursorMove, QueryOutcome, SearchController, SearchPhase, SearchState, ToggleOutcome};
pub use table::{TableController, TableRow, TableState};

/// Collaborators shared by all controllers
#[derive(Clone)]
pub struct Services {
    pub weather: Arc<dyn WeatherApi>,
    pub favorites: Arc<dyn FavoritesApi>,
    pub auth: Arc<dyn AuthApi>,
    pub session: Arc<dyn SessionStore>,
}

impl Services {
    /// One object serving every endpoint
    pub fn from_api<A>(api: Arc<A>, session: Arc<dyn SessionStore>) -> Self
    where
        A: WeatherApi + FavoritesApi + AuthApi + 'static,
    {
        Self {
            weather: api.clone(),
            favorites: api.clone(),
            auth: api,
            session,
        }
    }

    /// Services backed by the HTTP client
    pub fn http(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Self {
        let api = Arc::new(HttpApi::new(config, session.clone()));
        Self::from_api(api, session)
    }
}
