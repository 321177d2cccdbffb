//! Routes
//!
//! Page paths and the signed-in guard for protected pages.

use crate::session::SessionStore;

/// Which list the weather table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    History,
    Favorites,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::History => "history",
            TableKind::Favorites => "favorites",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TableKind::History => "Full history",
            TableKind::Favorites => "Your favorites",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Table(TableKind),
}

impl Route {
    /// Unknown paths, including `/`, land on the login page
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["home"] => Route::Home,
            ["table", "history"] => Route::Table(TableKind::History),
            ["table", "favorites"] => Route::Table(TableKind::Favorites),
            _ => Route::Login,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Home => "/home".to_string(),
            Route::Table(kind) => format!("/table/{}", kind.as_str()),
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Protected routes fall back to the login page without a token
    pub fn guard(self, session: &dyn SessionStore) -> Self {
        if self.is_protected() && session.token().is_none() {
            Route::Login
        } else {
            self
        }
    }
}
