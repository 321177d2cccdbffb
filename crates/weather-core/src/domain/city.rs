//! City References
//!
//! Autocomplete suggestions and the `name,country` strings used for
//! searching and history.

use serde::{Deserialize, Serialize};

/// Autocomplete entry returned by `/weather/autocomplete/:query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
}

impl Suggestion {
    pub fn city_ref(&self) -> CityRef {
        CityRef::new(&self.name, Some(self.country.as_str()))
    }
}

/// A city picked from a suggestion, history entry, favorite or table row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityRef {
    pub name: String,
    pub country: Option<String>,
}

impl CityRef {
    /// Blank countries are dropped.
    pub fn new(name: &str, country: Option<&str>) -> Self {
        Self {
            name: name.trim().to_string(),
            country: country
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }

    /// Split `"Madrid, ES"` or `"Madrid,ES"` on the first comma
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(',') {
            Some((name, country)) => Self::new(name, Some(country)),
            None => Self::new(raw, None),
        }
    }

    /// Search string sent to the service and stored in history: `"Madrid,ES"`
    pub fn query(&self) -> String {
        match &self.country {
            Some(country) => format!("{},{}", self.name, country),
            None => self.name.clone(),
        }
    }

    /// Lowercased `(name, country)` pair used to collapse duplicates
    pub fn key(&self) -> (String, Option<String>) {
        (
            self.name.to_lowercase(),
            self.country.as_ref().map(|c| c.to_lowercase()),
        )
    }
}

impl std::fmt::Display for CityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}, {}", self.name, country),
            None => write!(f, "{}", self.name),
        }
    }
}
