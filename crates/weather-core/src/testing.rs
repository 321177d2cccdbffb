//! Test Doubles
//!
//! A scripted in-memory service that records every call, and a timer on
//! tokio's clock so debounce tests can run with paused time.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::{AuthApi, FavoritesApi, WeatherApi};
use crate::debounce::Timer;
use crate::domain::{
    ApiError, ApiResult, Credentials, Favorite, LoginGrant, RecordId, Suggestion, Temperature, WeatherReport,
    WeatherSummary,
};

pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Canned responses; `None` errors mean success
#[derive(Default)]
pub struct Script {
    pub suggestions: Vec<Suggestion>,
    pub autocomplete_latency: Option<Duration>,
    pub autocomplete_error: Option<ApiError>,
    pub weather_latency: Option<Duration>,
    pub weather_error: Option<ApiError>,
    pub bulk_error: Option<ApiError>,
    pub is_favorite: bool,
    pub check_error: Option<ApiError>,
    pub favorites: Vec<Favorite>,
    pub list_error: Option<ApiError>,
    pub favorite_id: Option<RecordId>,
    pub favorite_write_error: Option<ApiError>,
    pub login: Option<LoginGrant>,
    pub auth_error: Option<ApiError>,
}

#[derive(Default)]
pub struct MockApi {
    pub script: Mutex<Script>,
    calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls().into_iter().filter(|c| c.starts_with(prefix)).collect()
    }

    /// Records the call and yields once, so concurrent callers interleave
    async fn hit(&self, call: String) {
        self.calls.lock().push(call);
        tokio::task::yield_now().await;
    }

    fn fail_or<T>(error: &Option<ApiError>, ok: impl FnOnce() -> T) -> ApiResult<T> {
        match error {
            Some(e) => Err(e.clone()),
            None => Ok(ok()),
        }
    }
}

pub fn server_error(status: u16, message: &str) -> ApiError {
    ApiError::Server { status, message: Some(message.to_string()) }
}

pub fn suggestion(name: &str, country: &str) -> Suggestion {
    Suggestion {
        name: name.to_string(),
        region: String::new(),
        country: country.to_string(),
    }
}

/// Report whose city is the request with `", "` between name and country
pub fn report_for(city: &str) -> WeatherReport {
    WeatherReport {
        city: city.replacen(',', ", ", 1),
        condition: "Sunny".to_string(),
        condition_icon: "//cdn.weatherapi.com/113.png".to_string(),
        temperature: Temperature { celsius: 20.0, fahrenheit: 68.0 },
        humidity: 40.0,
        wind_speed: 10.0,
        pressure_mb: 1012.0,
        vis_km: 10.0,
        dewpoint_c: 6.0,
        uv: 4.0,
        cloud: 0.0,
        feelslike_c: 20.0,
        gust_kph: 14.0,
    }
}

pub fn summary_for(city: &str) -> WeatherSummary {
    WeatherSummary {
        city: city.replacen(',', ", ", 1),
        temperature: Temperature { celsius: 20.0, fahrenheit: 68.0 },
        humidity: 40.0,
        wind_speed: 10.0,
        wind_direction: Some("NW".to_string()),
        local_time: Some("2024-06-01 09:30".to_string()),
    }
}

pub fn favorite(id: u32, city: &str, created_at: &str) -> Favorite {
    Favorite {
        id: RecordId::new(id.to_string()),
        city: city.to_string(),
        created_at: created_at.parse().expect("valid RFC 3339 timestamp"),
    }
}

#[async_trait(?Send)]
impl WeatherApi for MockApi {
    async fn current_weather(&self, city: &str) -> ApiResult<WeatherReport> {
        self.hit(format!("GET /weather/{}", city)).await;
        let latency = self.script.lock().weather_latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        Self::fail_or(&self.script.lock().weather_error, || report_for(city))
    }

    async fn autocomplete(&self, query: &str) -> ApiResult<Vec<Suggestion>> {
        self.hit(format!("GET /weather/autocomplete/{}", query)).await;
        let latency = self.script.lock().autocomplete_latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        let script = self.script.lock();
        Self::fail_or(&script.autocomplete_error, || script.suggestions.clone())
    }

    async fn bulk_weather(&self, cities: &[String]) -> ApiResult<Vec<WeatherSummary>> {
        self.hit(format!("POST /weather/bulk {}", cities.join("|"))).await;
        Self::fail_or(&self.script.lock().bulk_error, || {
            cities.iter().map(|c| summary_for(c)).collect()
        })
    }
}

#[async_trait(?Send)]
impl FavoritesApi for MockApi {
    async fn list_favorites(&self) -> ApiResult<Vec<Favorite>> {
        self.hit("GET /favorites".to_string()).await;
        let script = self.script.lock();
        Self::fail_or(&script.list_error, || script.favorites.clone())
    }

    async fn is_favorite(&self, city: &str) -> ApiResult<bool> {
        self.hit(format!("GET /favorites/check?city={}", city)).await;
        let script = self.script.lock();
        Self::fail_or(&script.check_error, || script.is_favorite)
    }

    async fn favorite_by_city(&self, city: &str) -> ApiResult<Option<RecordId>> {
        self.hit(format!("GET /favorites/by-city/{}", city)).await;
        Ok(self.script.lock().favorite_id.clone())
    }

    async fn add_favorite(&self, city: &str) -> ApiResult<()> {
        self.hit(format!("POST /favorites {}", city)).await;
        Self::fail_or(&self.script.lock().favorite_write_error, || ())
    }

    async fn remove_favorite(&self, id: &RecordId) -> ApiResult<()> {
        self.hit(format!("DELETE /favorites/{}", id)).await;
        Self::fail_or(&self.script.lock().favorite_write_error, || ())
    }
}

#[async_trait(?Send)]
impl AuthApi for MockApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginGrant> {
        self.hit(format!("POST /auth/login {}", credentials.username)).await;
        let script = self.script.lock();
        match (&script.auth_error, &script.login) {
            (Some(e), _) => Err(e.clone()),
            (None, Some(grant)) => Ok(grant.clone()),
            (None, None) => Err(ApiError::Decode("missing token".to_string())),
        }
    }

    async fn register(&self, credentials: &Credentials) -> ApiResult<()> {
        self.hit(format!("POST /auth/register {}", credentials.username)).await;
        Self::fail_or(&self.script.lock().auth_error, || ())
    }
}
