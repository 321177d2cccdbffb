//! Login / Register
//!
//! Form state for the login page. A successful login stores the token
//! and user id in the session; any failure clears them.

use std::sync::Arc;

use parking_lot::Mutex;

use super::Services;
use crate::api::AuthApi;
use crate::domain::{ApiError, ClientError, ClientResult, Credentials};
use crate::session::SessionStore;

const INVALID_RESPONSE: &str = "Invalid server response";
const CONNECTION_ERROR: &str = "Connection error";
const REGISTERED: &str = "Registration successful. You can now sign in.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub mode: AuthMode,
    pub loading: bool,
    pub error: Option<String>,
    /// Success message shown after registering
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Session stored; go to the home page
    SignedIn,
    /// Account created; the form is back in login mode
    Registered,
}

pub struct AuthController {
    api: Arc<dyn AuthApi>,
    session: Arc<dyn SessionStore>,
    state: Mutex<AuthState>,
}

impl AuthController {
    pub fn new(services: &Services) -> Self {
        Self {
            api: services.auth.clone(),
            session: services.session.clone(),
            state: Mutex::new(AuthState::default()),
        }
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.lock().clone()
    }

    pub fn toggle_mode(&self) {
        let mut state = self.state.lock();
        state.mode = match state.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        state.error = None;
        state.notice = None;
    }

    pub async fn submit(&self, username: &str, password: &str) -> ClientResult<AuthOutcome> {
        let mode = {
            let mut state = self.state.lock();
            state.error = None;
            state.notice = None;
            state.loading = true;
            state.mode
        };
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        let result = match mode {
            AuthMode::Login => self.login(&credentials).await,
            AuthMode::Register => self
                .api
                .register(&credentials)
                .await
                .map(|_| AuthOutcome::Registered)
                .map_err(|e| ClientError::Remote(failure_message(&e))),
        };

        let mut state = self.state.lock();
        state.loading = false;
        match &result {
            Ok(AuthOutcome::SignedIn) => log::info!("Signed in as {}", username),
            Ok(AuthOutcome::Registered) => {
                state.mode = AuthMode::Login;
                state.notice = Some(REGISTERED.to_string());
            }
            Err(e) => {
                log::warn!("{:?} failed for {}: {}", mode, username, e);
                state.error = Some(e.message());
                self.session.sign_out();
            }
        }
        result
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthOutcome> {
        let grant = self
            .api
            .login(credentials)
            .await
            .map_err(|e| ClientError::Remote(failure_message(&e)))?;
        if !grant.is_complete() {
            return Err(ClientError::Remote(INVALID_RESPONSE.to_string()));
        }
        self.session.sign_in(&grant);
        Ok(AuthOutcome::SignedIn)
    }

    pub fn sign_out(&self) {
        self.session.sign_out();
        log::info!("Signed out");
    }
}

/// Server message, else the error's own text, else a generic one
fn failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Server { message: Some(msg), .. } => msg.clone(),
        ApiError::Server { message: None, .. } => CONNECTION_ERROR.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LoginGrant, RecordId};
    use crate::session::MemorySessionStore;
    use crate::testing::{server_error, MockApi};

    fn setup() -> (Arc<MockApi>, Arc<MemorySessionStore>, AuthController) {
        let api = Arc::new(MockApi::new());
        let session = Arc::new(MemorySessionStore::new());
        let services = Services::from_api(api.clone(), session.clone());
        (api, session, AuthController::new(&services))
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let (api, session, auth) = setup();
        api.script.lock().login = Some(LoginGrant {
            token: "jwt".to_string(),
            user_id: Some(RecordId::new("7")),
        });

        let outcome = auth.submit("ana", "secret").await.unwrap();
        assert_eq!(outcome, AuthOutcome::SignedIn);
        assert_eq!(session.token().as_deref(), Some("jwt"));
        assert_eq!(session.user_id().as_deref(), Some("7"));
        assert!(!auth.snapshot().loading);
    }

    #[tokio::test]
    async fn test_incomplete_grant_rejected() {
        let (api, session, auth) = setup();
        api.script.lock().login = Some(LoginGrant { token: "jwt".to_string(), user_id: None });

        let err = auth.submit("ana", "secret").await.unwrap_err();
        assert_eq!(err, ClientError::Remote(INVALID_RESPONSE.to_string()));
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn test_failed_login_clears_session() {
        let (api, session, auth) = setup();
        session.set("token", "stale");
        session.set("userId", "1");
        api.script.lock().auth_error = Some(server_error(401, "Invalid credentials"));

        auth.submit("ana", "wrong").await.unwrap_err();
        assert_eq!(auth.snapshot().error.as_deref(), Some("Invalid credentials"));
        assert_eq!(session.token(), None);
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn test_register_switches_to_login() {
        let (api, _session, auth) = setup();
        auth.toggle_mode();
        assert_eq!(auth.snapshot().mode, AuthMode::Register);

        let outcome = auth.submit("ana", "secret").await.unwrap();
        assert_eq!(outcome, AuthOutcome::Registered);

        let state = auth.snapshot();
        assert_eq!(state.mode, AuthMode::Login);
        assert_eq!(state.notice.as_deref(), Some(REGISTERED));
        assert_eq!(api.calls(), ["POST /auth/register ana"]);
    }

    #[test]
    fn test_failure_message_fallbacks() {
        assert_eq!(failure_message(&ApiError::Server { status: 500, message: None }), CONNECTION_ERROR);
        assert_eq!(
            failure_message(&ApiError::Transport("refused".to_string())),
            "Network error: refused"
        );
    }

    #[test]
    fn test_toggle_clears_messages() {
        let (_api, _session, auth) = setup();
        auth.state.lock().error = Some("boom".to_string());
        auth.toggle_mode();
        assert_eq!(auth.snapshot().error, None);
    }
}
