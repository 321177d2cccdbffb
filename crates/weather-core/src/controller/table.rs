//! Weather Table
//!
//! Bulk weather for the history or favorites list, paged client-side.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use super::route::TableKind;
use super::Services;
use crate::api::{FavoritesApi, WeatherApi};
use crate::domain::{CityRef, ClientError, ClientResult, WeatherSummary};
use crate::session::SessionStore;

const DATA_FAILED: &str = "Failed to load data";

/// Display form of one bulk row
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub name: String,
    pub country: Option<String>,
    pub celsius: f64,
    pub fahrenheit: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: Option<String>,
    pub local_clock: Option<String>,
}

impl TableRow {
    pub fn from_summary(summary: &WeatherSummary) -> Self {
        let city = CityRef::parse(&summary.city);
        Self {
            name: city.name,
            country: city.country,
            celsius: summary.temperature.celsius,
            fahrenheit: summary.temperature.fahrenheit,
            humidity: summary.humidity,
            wind_speed: summary.wind_speed,
            wind_direction: summary.wind_direction.clone(),
            local_clock: summary.local_clock(),
        }
    }

    /// City to search when the row is clicked
    pub fn city_ref(&self) -> CityRef {
        CityRef::new(&self.name, self.country.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub loading: bool,
    pub error: Option<String>,
    pub rows: Vec<WeatherSummary>,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl TableState {
    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(self.page_size.max(1))
    }

    pub fn page_rows(&self) -> Vec<TableRow> {
        let size = self.page_size.max(1);
        self.rows
            .iter()
            .skip((self.page.max(1) - 1) * size)
            .take(size)
            .map(TableRow::from_summary)
            .collect()
    }
}

/// Trim, drop blanks, and drop exact repeats keeping the first occurrence
pub fn unique_cities(cities: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    cities
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty() && seen.insert(c.to_string()))
        .map(str::to_string)
        .collect()
}

pub struct TableController {
    weather: Arc<dyn WeatherApi>,
    favorites: Arc<dyn FavoritesApi>,
    session: Arc<dyn SessionStore>,
    state: Mutex<TableState>,
}

impl TableController {
    pub fn new(services: &Services, page_size: usize) -> Self {
        Self {
            weather: services.weather.clone(),
            favorites: services.favorites.clone(),
            session: services.session.clone(),
            state: Mutex::new(TableState {
                loading: true,
                error: None,
                rows: Vec::new(),
                page: 1,
                page_size,
            }),
        }
    }

    pub fn snapshot(&self) -> TableState {
        self.state.lock().clone()
    }

    /// Resolve the city list for `kind`, then fetch its weather
    pub async fn open(&self, kind: TableKind) -> ClientResult<()> {
        self.state.lock().loading = true;

        let cities = match kind {
            TableKind::History => Ok(self.session.history().entries().to_vec()),
            TableKind::Favorites => self
                .favorites
                .list_favorites()
                .await
                .map(|favs| favs.into_iter().map(|f| f.city).collect()),
        };

        let cities = match cities {
            Ok(cities) => cities,
            Err(e) => {
                log::error!("Loading {:?} table failed: {}", kind, e);
                let mut state = self.state.lock();
                state.loading = false;
                state.error = Some(DATA_FAILED.to_string());
                return Err(ClientError::Remote(DATA_FAILED.to_string()));
            }
        };

        {
            let mut state = self.state.lock();
            state.loading = false;
            state.error = None;
        }
        self.load_rows(&cities).await
    }

    /// Fetch bulk weather for `cities`. An empty list makes no request;
    /// a failed request keeps the previous rows.
    pub async fn load_rows(&self, cities: &[String]) -> ClientResult<()> {
        let unique = unique_cities(cities);
        if unique.is_empty() {
            return Ok(());
        }

        match self.weather.bulk_weather(&unique).await {
            Ok(rows) => {
                let mut state = self.state.lock();
                state.rows = rows;
                state.page = 1;
                Ok(())
            }
            Err(e) => {
                log::error!("Bulk weather for {} cities failed: {}", unique.len(), e);
                Err(ClientError::Remote(e.message_or(DATA_FAILED)))
            }
        }
    }

    /// Jump to `page`, clamped to the available pages; returns the page shown
    pub fn set_page(&self, page: usize) -> usize {
        let mut state = self.state.lock();
        let last = state.total_pages().max(1);
        state.page = page.clamp(1, last);
        state.page
    }
}
