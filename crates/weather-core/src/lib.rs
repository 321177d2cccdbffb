//! Weather Client Core
//!
//! Runtime-agnostic logic behind the weather front end:
//! - domain: Entities returned by the remote service and error types
//! - api: Remote service traits and the reqwest implementation
//! - session: Key-value session store and search history
//! - controller: Search, favorites, table, auth and routing state
//!
//! Nothing here touches the browser, so the whole crate is tested on the host.

pub mod api;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod domain;
pub mod flight;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::ClientConfig;
pub use domain::{ApiError, ApiResult, ClientError, ClientResult};
