//! Browser Adapters
//!
//! `SessionStore` over `window.localStorage` and `Timer` over
//! gloo-timers, plugged into the weather-core controllers.

use std::time::Duration;

use async_trait::async_trait;
use weather_core::debounce::Timer;
use weather_core::session::SessionStore;

/// Session persisted in localStorage. Holds no handle itself so it can
/// live in Leptos stored values; storage is looked up per call.
pub struct LocalStorageSession;

impl LocalStorageSession {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStore for LocalStorageSession {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            log::warn!("localStorage unavailable, dropping {}", key);
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            log::error!("Writing {} to localStorage failed: {:?}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Debounce sleeps on browser timers
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
