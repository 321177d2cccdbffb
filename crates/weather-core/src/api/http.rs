//! HTTP Client
//!
//! reqwest implementation of the service traits. Runs on wasm32 (fetch)
//! as well as natively. The bearer token is read from the session on
//! every request, so signing in or out takes effect immediately.

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{AuthApi, FavoritesApi, WeatherApi};
use crate::config::ClientConfig;
use crate::domain::{
    ApiError, ApiResult, Credentials, Favorite, LoginGrant, RecordId, Suggestion, WeatherReport, WeatherSummary,
};
use crate::session::SessionStore;

/// Characters left as-is in a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b',');

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Serialize)]
struct BulkRequest<'a> {
    cities: &'a [String],
    /// Cache buster
    #[serde(rename = "_")]
    nonce: i64,
}

#[derive(Serialize)]
struct CityBody<'a> {
    city: &'a str,
}

#[derive(Debug, Deserialize)]
struct CheckBody {
    #[serde(rename = "isFavorite")]
    is_favorite: bool,
}

#[derive(Deserialize)]
struct IdBody {
    id: RecordId,
}

/// Non-2xx status with the message from an `{"error": ...}` body, if any
fn server_error(status: u16, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body).ok().and_then(|b| b.error);
    ApiError::Server { status, message }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// 404 from the by-city lookup means the city has no favorite record
fn record_or_none(lookup: ApiResult<IdBody>) -> ApiResult<Option<RecordId>> {
    match lookup {
        Ok(body) => Ok(Some(body.id)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Client for the weather/favorites/auth service
pub struct HttpApi {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl HttpApi {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Base URL joined with percent-encoded path segments
    pub fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.extend(utf8_percent_encode(segment, SEGMENT));
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.bytes().await.ok();
        let error = server_error(status.as_u16(), body.as_deref().unwrap_or_default());
        log::warn!("{} -> {}", url, error);
        Err(error)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self
            .send(request)
            .await?
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode(&body)
    }

    fn get(&self, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        log::debug!("GET {}", url);
        self.client.get(url)
    }

    fn post(&self, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        log::debug!("POST {}", url);
        self.client.post(url)
    }
}

#[async_trait(?Send)]
impl WeatherApi for HttpApi {
    async fn current_weather(&self, city: &str) -> ApiResult<WeatherReport> {
        self.fetch_json(self.get(&["weather", city])).await
    }

    async fn autocomplete(&self, query: &str) -> ApiResult<Vec<Suggestion>> {
        self.fetch_json(self.get(&["weather", "autocomplete", query])).await
    }

    async fn bulk_weather(&self, cities: &[String]) -> ApiResult<Vec<WeatherSummary>> {
        let body = BulkRequest {
            cities,
            nonce: chrono::Utc::now().timestamp_millis(),
        };
        self.fetch_json(self.post(&["weather", "bulk"]).json(&body)).await
    }
}

#[async_trait(?Send)]
impl FavoritesApi for HttpApi {
    async fn list_favorites(&self) -> ApiResult<Vec<Favorite>> {
        self.fetch_json(self.get(&["favorites"])).await
    }

    async fn is_favorite(&self, city: &str) -> ApiResult<bool> {
        let request = self.get(&["favorites", "check"]).query(&[("city", city)]);
        let body: CheckBody = self.fetch_json(request).await?;
        Ok(body.is_favorite)
    }

    async fn favorite_by_city(&self, city: &str) -> ApiResult<Option<RecordId>> {
        record_or_none(self.fetch_json(self.get(&["favorites", "by-city", city])).await)
    }

    async fn add_favorite(&self, city: &str) -> ApiResult<()> {
        self.send(self.post(&["favorites"]).json(&CityBody { city })).await?;
        Ok(())
    }

    async fn remove_favorite(&self, id: &RecordId) -> ApiResult<()> {
        let url = self.endpoint(&["favorites", id.as_str()]);
        log::debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginGrant> {
        self.fetch_json(self.post(&["auth", "login"]).json(credentials)).await
    }

    async fn register(&self, credentials: &Credentials) -> ApiResult<()> {
        self.send(self.post(&["auth", "register"]).json(credentials)).await?;
        Ok(())
    }
}
