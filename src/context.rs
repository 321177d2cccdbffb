//! Application Context
//!
//! Current route, the shared services and the city handed from the table
//! page back to the search page, provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;
use wasm_bindgen::JsValue;
use weather_core::controller::{Route, Services};
use weather_core::domain::CityRef;
use weather_core::session::SessionStore;
use weather_core::ClientConfig;

use crate::platform::LocalStorageSession;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Page being shown - read
    pub route: ReadSignal<Route>,
    /// Page being shown - write
    set_route: WriteSignal<Route>,
    /// City to search as soon as the home page mounts
    pub pending_city: RwSignal<Option<CityRef>>,
    services: StoredValue<Services>,
    config: StoredValue<ClientConfig>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        let session: Arc<dyn SessionStore> = Arc::new(LocalStorageSession);
        let services = Services::http(&config, session);

        let initial = Route::parse(&current_path()).guard(services.session.as_ref());
        replace_history(&initial.path());
        let (route, set_route) = signal(initial);

        Self {
            route,
            set_route,
            pending_city: RwSignal::new(None),
            services: StoredValue::new(services),
            config: StoredValue::new(config),
        }
    }

    pub fn services(&self) -> Services {
        self.services.get_value()
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    /// Go to `target`, or to the login page if it needs a session we lack
    pub fn navigate(&self, target: Route) {
        let session = self.services.with_value(|s| s.session.clone());
        let route = target.guard(session.as_ref());
        if route != target {
            log::info!("{} requires sign-in", target.path());
        }
        push_history(&route.path());
        self.set_route.set(route);
    }

    /// Follow the address bar after back/forward
    pub fn sync_location(&self) {
        let session = self.services.with_value(|s| s.session.clone());
        let route = Route::parse(&current_path()).guard(session.as_ref());
        replace_history(&route.path());
        self.set_route.set(route);
    }

    /// Show `city` on the home page
    pub fn open_city(&self, city: CityRef) {
        self.pending_city.set(Some(city));
        self.navigate(Route::Home);
    }
}

/// Default config with the API base URL baked in at build time
pub fn build_config() -> ClientConfig {
    match option_env!("WEATHER_API_URL") {
        Some(url) => ClientConfig::default().with_base_url(url),
        None => ClientConfig::default(),
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

fn push_history(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn replace_history(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}
