//! Domain Layer
//!
//! Entities exchanged with the weather service and the error types
//! shared by every controller.

mod auth;
mod city;
mod error;
mod favorite;
mod weather;

pub use auth::{Credentials, LoginGrant};
pub use city::{CityRef, Suggestion};
pub use error::{ApiError, ApiResult, ClientError, ClientResult};
pub use favorite::{sort_newest_first, Favorite, RecordId};
pub use weather::{Temperature, WeatherReport, WeatherSummary};
