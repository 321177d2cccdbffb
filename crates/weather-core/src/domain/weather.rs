//! Weather Entities
//!
//! Shapes returned by `/weather/:city` and `/weather/bulk`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Temperature in both units, as sent by the service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub celsius: f64,
    pub fahrenheit: f64,
}

/// Current conditions for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Display name, e.g. "Paris, France"
    pub city: String,
    pub condition: String,
    #[serde(rename = "conditionIcon")]
    pub condition_icon: String,
    pub temperature: Temperature,
    pub humidity: f64,
    #[serde(rename = "windSpeed")]
    pub wind_speed: f64,
    pub pressure_mb: f64,
    pub vis_km: f64,
    pub dewpoint_c: f64,
    pub uv: f64,
    pub cloud: f64,
    pub feelslike_c: f64,
    pub gust_kph: f64,
}

impl WeatherReport {
    /// UV above 5 is flagged as high
    pub fn uv_level(&self) -> &'static str {
        if self.uv > 5.0 { "High" } else { "Moderate" }
    }
}

/// One row of the bulk endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub city: String,
    pub temperature: Temperature,
    pub humidity: f64,
    #[serde(rename = "windSpeed")]
    pub wind_speed: f64,
    #[serde(rename = "windDirection", default)]
    pub wind_direction: Option<String>,
    #[serde(rename = "localTime", default)]
    pub local_time: Option<String>,
}

impl WeatherSummary {
    /// Local clock time as `HH:MM`
    ///
    /// Accepts the service's `YYYY-MM-DD HH:MM` format as well as RFC 3339.
    pub fn local_clock(&self) -> Option<String> {
        let raw = self.local_time.as_deref()?.trim();
        let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
            .ok()
            .or_else(|| chrono::DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))?;
        Some(parsed.format("%H:%M").to_string())
    }
}
