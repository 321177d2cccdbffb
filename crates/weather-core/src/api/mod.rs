//! Remote Service
//!
//! The weather, favorites and auth endpoints as async traits, so
//! controllers can be driven by the HTTP client in the browser and by a
//! scripted double in tests.
//!
//! Futures are not required to be `Send`: browser fetches are not.

mod http;

use async_trait::async_trait;

use crate::domain::{
    ApiResult, Credentials, Favorite, LoginGrant, RecordId, Suggestion, WeatherReport, WeatherSummary,
};

pub use http::HttpApi;

/// Weather lookups
#[async_trait(?Send)]
pub trait WeatherApi: Send + Sync {
    /// `GET /weather/:city`
    async fn current_weather(&self, city: &str) -> ApiResult<WeatherReport>;

    /// `GET /weather/autocomplete/:query`
    async fn autocomplete(&self, query: &str) -> ApiResult<Vec<Suggestion>>;

    /// `POST /weather/bulk`; rows come back in input order
    async fn bulk_weather(&self, cities: &[String]) -> ApiResult<Vec<WeatherSummary>>;
}

/// The signed-in user's favorites
#[async_trait(?Send)]
pub trait FavoritesApi: Send + Sync {
    /// `GET /favorites`
    async fn list_favorites(&self) -> ApiResult<Vec<Favorite>>;

    /// `GET /favorites/check?city=`
    async fn is_favorite(&self, city: &str) -> ApiResult<bool>;

    /// `GET /favorites/by-city/:city`; `None` when the server has no record
    async fn favorite_by_city(&self, city: &str) -> ApiResult<Option<RecordId>>;

    /// `POST /favorites`
    async fn add_favorite(&self, city: &str) -> ApiResult<()>;

    /// `DELETE /favorites/:id`
    async fn remove_favorite(&self, id: &RecordId) -> ApiResult<()>;
}

/// Account endpoints
#[async_trait(?Send)]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginGrant>;

    /// `POST /auth/register`
    async fn register(&self, credentials: &Credentials) -> ApiResult<()>;
}
