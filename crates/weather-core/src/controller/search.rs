//! Search Controller
//!
//! Query text, debounced autocomplete, the weather on screen, its
//! favorite flag and the keyboard cursor over suggestions.

use std::sync::Arc;

use parking_lot::Mutex;

use super::Services;
use crate::api::{FavoritesApi, WeatherApi};
use crate::config::ClientConfig;
use crate::debounce::{Debouncer, Timer};
use crate::domain::{CityRef, ClientError, ClientResult, Suggestion, WeatherReport};
use crate::flight::SingleFlight;
use crate::session::{SearchHistory, SessionStore};

const SEARCH_FAILED: &str = "Failed to fetch weather";
const FAVORITE_FAILED: &str = "Failed to update favorites";

/// Where the search box is in its cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    #[default]
    Idle,
    /// Debounce pending
    Typing,
    SuggestionsReady,
    /// Weather request in flight
    Searching,
    ResultReady,
    Error,
}

/// Snapshot handed to the view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    /// `None` means no explicit selection; Enter then takes the first suggestion
    pub cursor: Option<usize>,
    pub weather: Option<WeatherReport>,
    pub error: Option<String>,
    pub is_favorite: bool,
    pub phase: SearchPhase,
}

impl SearchState {
    /// Suggestion under the cursor, or the first one without a selection
    pub fn selected(&self) -> Option<&Suggestion> {
        match self.cursor {
            Some(i) => self.suggestions.get(i).or_else(|| self.suggestions.first()),
            None => self.suggestions.first(),
        }
    }

    fn resting_phase(&self) -> SearchPhase {
        if !self.suggestions.is_empty() {
            SearchPhase::SuggestionsReady
        } else if self.weather.is_some() {
            SearchPhase::ResultReady
        } else {
            SearchPhase::Idle
        }
    }

    fn apply_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.phase = self.resting_phase();
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.phase = SearchPhase::Error;
    }
}

/// Result of one debounced keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// A newer keystroke replaced this one
    Superseded,
    /// Query below the minimum length; suggestions left as they were
    TooShort,
    Fetched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
}

/// How an optimistic favorite flip ended
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// Server confirmed; the flip stands
    Applied { favorite: bool },
    /// Request failed; the flag is back to its value before the call
    Reverted { favorite: bool, error: ClientError },
    /// The record to delete was already gone; the flag stays off
    Reconciled { favorite: bool, error: ClientError },
    /// Another toggle was still in flight
    Skipped,
}

pub struct SearchController {
    weather: Arc<dyn WeatherApi>,
    favorites: Arc<dyn FavoritesApi>,
    session: Arc<dyn SessionStore>,
    timer: Arc<dyn Timer>,
    config: ClientConfig,
    debouncer: Debouncer,
    toggle_flight: SingleFlight,
    state: Mutex<SearchState>,
}

impl SearchController {
    pub fn new(services: &Services, timer: Arc<dyn Timer>, config: ClientConfig) -> Self {
        Self {
            weather: services.weather.clone(),
            favorites: services.favorites.clone(),
            session: services.session.clone(),
            timer,
            debouncer: Debouncer::new(config.debounce()),
            config,
            toggle_flight: SingleFlight::new(),
            state: Mutex::new(SearchState::default()),
        }
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.lock().clone()
    }

    pub fn history(&self) -> SearchHistory {
        self.session.history()
    }

    /// Set the query, then fetch suggestions once typing pauses
    pub async fn change_query(&self, text: &str) -> QueryOutcome {
        let ticket = {
            let mut state = self.state.lock();
            state.query = text.to_string();
            state.error = None;
            state.phase = SearchPhase::Typing;
            self.debouncer.schedule()
        };

        if !self.debouncer.settle(ticket, self.timer.as_ref()).await {
            return QueryOutcome::Superseded;
        }

        let query = {
            let mut state = self.state.lock();
            if state.query.chars().count() < self.config.min_query_len {
                state.phase = state.resting_phase();
                return QueryOutcome::TooShort;
            }
            state.cursor = Some(0);
            state.query.clone()
        };

        let suggestions = self.load_suggestions(&query).await;

        let mut state = self.state.lock();
        if !self.debouncer.is_current(ticket) {
            log::debug!("Dropping stale suggestions for {:?}", query);
            return QueryOutcome::Superseded;
        }
        state.apply_suggestions(suggestions);
        QueryOutcome::Fetched
    }

    /// Replace suggestions with the service's answer for `query`
    pub async fn fetch_suggestions(&self, query: &str) {
        let suggestions = self.load_suggestions(query).await;
        self.state.lock().apply_suggestions(suggestions);
    }

    async fn load_suggestions(&self, query: &str) -> Vec<Suggestion> {
        match self.weather.autocomplete(query).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                log::warn!("Autocomplete for {:?} failed: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Move the highlight, wrapping at both ends. `None` without suggestions.
    pub fn move_cursor(&self, direction: CursorMove) -> Option<usize> {
        let mut state = self.state.lock();
        let len = state.suggestions.len();
        if len == 0 {
            return None;
        }
        let last = len - 1;
        let current = state.cursor.filter(|&i| i <= last);
        let next = match (direction, current) {
            (CursorMove::Down, Some(i)) if i < last => i + 1,
            (CursorMove::Down, _) => 0,
            (CursorMove::Up, Some(i)) if i > 0 => i - 1,
            (CursorMove::Up, _) => last,
        };
        state.cursor = Some(next);
        Some(next)
    }

    /// Look up `explicit_city`, or the current query when `None`
    pub async fn submit_search(&self, explicit_city: Option<&str>) -> ClientResult<WeatherReport> {
        if !self.session.is_signed_in() {
            let error = ClientError::Unauthenticated;
            self.state.lock().fail(error.message());
            return Err(error);
        }

        let city = match explicit_city {
            Some(city) => city.trim().to_string(),
            None => self.state.lock().query.trim().to_string(),
        };
        if city.is_empty() {
            let error = ClientError::EmptyQuery;
            self.state.lock().fail(error.message());
            return Err(error);
        }

        self.state.lock().phase = SearchPhase::Searching;
        // keystrokes typed while the request is out keep their autocomplete
        let pending = self.debouncer.latest();

        match self.weather.current_weather(&city).await {
            Ok(report) => {
                self.debouncer.cancel_if_current(pending);
                {
                    let mut state = self.state.lock();
                    state.weather = Some(report.clone());
                    state.error = None;
                    state.suggestions.clear();
                    state.cursor = None;
                    state.phase = SearchPhase::ResultReady;
                }
                self.check_favorite_status(&report.city).await;
                Ok(report)
            }
            Err(e) => {
                log::error!("Weather lookup for {:?} failed: {}", city, e);
                let message = e.message_or(SEARCH_FAILED);
                self.state.lock().fail(message.clone());
                Err(ClientError::Remote(message))
            }
        }
    }

    /// Search a picked city and remember it in history on success
    pub async fn select_city(&self, city: &CityRef) -> ClientResult<WeatherReport> {
        let query = city.query();
        self.state.lock().query = query.clone();
        let report = self.submit_search(Some(&query)).await?;
        self.session.record_search(&query, self.config.history_limit);
        Ok(report)
    }

    /// Enter key: take the highlighted suggestion if any, else the raw query
    pub async fn submit_selection(&self) -> ClientResult<WeatherReport> {
        let selected = self.state.lock().selected().map(Suggestion::city_ref);
        match selected {
            Some(city) => self.select_city(&city).await,
            None => self.submit_search(None).await,
        }
    }

    /// Refresh the favorite flag for `city`; any failure reads as "not a favorite"
    pub async fn check_favorite_status(&self, city: &str) -> bool {
        let normalized = city.trim().to_lowercase();
        if normalized.is_empty() {
            return self.state.lock().is_favorite;
        }

        let is_favorite = match self.favorites.is_favorite(&normalized).await {
            Ok(flag) => flag,
            Err(e) => {
                log::warn!("Favorite check for {:?} failed: {}", normalized, e);
                false
            }
        };
        self.state.lock().is_favorite = is_favorite;
        is_favorite
    }

    /// Flip the favorite flag right away, then ask the server to follow
    pub async fn toggle_favorite(&self) -> ClientResult<ToggleOutcome> {
        if !self.session.is_signed_in() {
            return Err(ClientError::Unauthenticated);
        }
        let Some(city) = self.state.lock().weather.as_ref().map(|w| w.city.trim().to_string()) else {
            return Err(ClientError::NoWeather);
        };
        let Some(_flight) = self.toggle_flight.try_begin() else {
            log::debug!("Favorite toggle already in flight");
            return Ok(ToggleOutcome::Skipped);
        };

        let was_favorite = {
            let mut state = self.state.lock();
            let was = state.is_favorite;
            state.is_favorite = !was;
            was
        };

        let result = if was_favorite {
            self.unfavorite(&city).await
        } else {
            self.favorites
                .add_favorite(&city)
                .await
                .map_err(|e| ClientError::Remote(e.message_or(FAVORITE_FAILED)))
        };

        let mut state = self.state.lock();
        match result {
            Ok(()) => Ok(ToggleOutcome::Applied { favorite: !was_favorite }),
            Err(ClientError::NotFound) => {
                log::warn!("No favorite record for {:?}", city);
                state.is_favorite = false;
                Ok(ToggleOutcome::Reconciled { favorite: false, error: ClientError::NotFound })
            }
            Err(error) => {
                log::error!("Favorite toggle for {:?} failed: {}", city, error);
                state.is_favorite = was_favorite;
                Ok(ToggleOutcome::Reverted { favorite: was_favorite, error })
            }
        }
    }

    async fn unfavorite(&self, city: &str) -> ClientResult<()> {
        let remote = |e: crate::domain::ApiError| ClientError::Remote(e.message_or(FAVORITE_FAILED));
        let id = self
            .favorites
            .favorite_by_city(city)
            .await
            .map_err(remote)?
            .ok_or(ClientError::NotFound)?;
        self.favorites.remove_favorite(&id).await.map_err(remote)
    }
}
