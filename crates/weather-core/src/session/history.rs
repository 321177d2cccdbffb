//! Search History
//!
//! Most-recent-first list of `name,country` strings.

use std::collections::HashSet;

use crate::domain::CityRef;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Keep only string entries from stored JSON
    pub(super) fn from_json_values(values: Vec<serde_json::Value>) -> Self {
        Self {
            entries: values
                .into_iter()
                .filter_map(|v| match v {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put `city` first, dropping any case-insensitive duplicate, and cap at `limit`
    pub fn record(&mut self, city: &str, limit: usize) {
        let lowered = city.to_lowercase();
        self.entries.retain(|entry| entry.to_lowercase() != lowered);
        self.entries.insert(0, city.to_string());
        self.entries.truncate(limit);
    }

    /// Entries as cities, collapsing those with the same name and country
    /// regardless of case or spacing
    pub fn cities(&self, limit: usize) -> Vec<CityRef> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|entry| CityRef::parse(entry))
            .filter(|city| !city.name.is_empty() && seen.insert(city.key()))
            .take(limit)
            .collect()
    }
}
