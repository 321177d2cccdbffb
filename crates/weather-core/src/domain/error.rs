//! Error Types
//!
//! `ApiError` describes what went wrong talking to the remote service.
//! `ClientError` is what controllers hand back to the views.

/// Result type for remote service calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for controller actions
pub type ClientResult<T> = Result<T, ClientError>;

/// Failure of a single remote call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Non-success status; `message` is the `error` field of the body when present
    Server { status: u16, message: Option<String> },
    /// Request never produced a response
    Transport(String),
    /// Response body did not match the expected shape
    Decode(String),
}

impl ApiError {
    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Server message, or `fallback` when the server did not supply one
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status: 404, .. })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Server { status, message: Some(msg) } => write!(f, "Server error {}: {}", status, msg),
            ApiError::Server { status, message: None } => write!(f, "Server error {}", status),
            ApiError::Transport(msg) => write!(f, "Network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Controller-level errors. None of them leave a controller unusable.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Action needs a signed-in user
    Unauthenticated,
    /// Network or server failure, with the message to show
    Remote(String),
    /// Favorite record to delete does not exist on the server
    NotFound,
    /// Search requested with a blank city
    EmptyQuery,
    /// Favorite toggled with no weather on screen
    NoWeather,
}

impl ClientError {
    /// Text suitable for the error banner
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Unauthenticated => write!(f, "You must sign in first"),
            ClientError::Remote(msg) => write!(f, "{}", msg),
            ClientError::NotFound => write!(f, "Favorite not found"),
            ClientError::EmptyQuery => write!(f, "Enter a city name"),
            ClientError::NoWeather => write!(f, "Search for a city first"),
        }
    }
}

impl std::error::Error for ClientError {}
