//! Client Configuration

use std::time::Duration;

use serde::Deserialize;

/// Tunables shared by the controllers and the HTTP client
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the weather service, without a trailing slash
    pub api_base_url: String,
    /// Quiet period after the last keystroke before autocomplete fires
    pub debounce_ms: u64,
    /// Shortest query that triggers autocomplete
    pub min_query_len: usize,
    /// Maximum number of recent searches kept
    pub history_limit: usize,
    /// Rows per page in the weather table
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            debounce_ms: 300,
            min_query_len: 3,
            history_limit: 30,
            page_size: 20,
        }
    }
}

impl ClientConfig {
    /// Parse a JSON document; missing keys keep their defaults
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: ClientConfig = serde_json::from_str(raw)?;
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.min_query_len, 3);
        assert_eq!(config.history_limit, 30);
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ClientConfig::from_json(r#"{"api_base_url": "https://wx.example.com/api/"}"#).unwrap();
        assert_eq!(config.api_base_url, "https://wx.example.com/api");
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:8080");
    }
}
