//! Favorite Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::city::CityRef;

/// Server-side identifier; the service may send a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId")]
pub struct RecordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for RecordId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => RecordId(n.to_string()),
            RawId::Text(s) => RecordId(s),
        }
    }
}

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A city saved by the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: RecordId,
    /// Stored as `"name,country"`
    pub city: String,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn city_ref(&self) -> CityRef {
        CityRef::parse(&self.city)
    }
}

/// Newest first
pub fn sort_newest_first(favorites: &mut [Favorite]) {
    favorites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
