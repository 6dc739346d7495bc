use std::fmt;
use std::sync::Arc;

use http::Method;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use super::fetch::AuthenticatedFetch;
use crate::api::endpoints;
use crate::http::{ApiRequest, CredentialsMode, HttpClient, RequestInit};
use crate::routes::{Location, Navigation, Navigator};

/// What the rest of the console sees of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    pub loading: bool,
}

impl Default for SessionState {
    /// The state before the first probe answers.
    fn default() -> Self {
        SessionState {
            authenticated: false,
            loading: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unknown,
    Authenticated,
    Unauthenticated,
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        match (self.loading, self.authenticated) {
            (true, _) => SessionStatus::Unknown,
            (false, true) => SessionStatus::Authenticated,
            (false, false) => SessionStatus::Unauthenticated,
        }
    }

    fn resolved(authenticated: bool) -> Self {
        SessionState {
            authenticated,
            loading: false,
        }
    }
}

/// A login attempt. Moved into `SessionManager::login` and dropped there.
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        LoginForm {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

/// Sole owner and writer of the session state.
pub struct SessionManager {
    http: Arc<dyn HttpClient>,
    fetch: Arc<AuthenticatedFetch>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    pub fn new(
        http: Arc<dyn HttpClient>,
        fetch: Arc<AuthenticatedFetch>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        SessionManager {
            http,
            fetch,
            navigator,
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Read-only view that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn set(&self, next: SessionState) {
        self.state.send_replace(next);
    }

    /// Ask the server whether the cookie jar holds a live session.
    /// Any 2xx means yes; any other status or a transport error means no.
    pub async fn probe(&self) -> SessionState {
        let request = ApiRequest::new(
            endpoints::PING_PONG,
            RequestInit::default().credentials(CredentialsMode::Include),
        );
        let authenticated = match self.http.send(request).await {
            Ok(response) => response.ok(),
            Err(e) => {
                warn!("Session probe failed: {}", e);
                false
            }
        };

        info!(
            event_name = "session.probe",
            event_domain = "auth",
            authenticated,
            "session probe finished"
        );
        let state = SessionState::resolved(authenticated);
        self.set(state);
        state
    }

    /// Try to sign in. Returns whether the server accepted the credentials.
    pub async fn login(&self, form: LoginForm) -> bool {
        let username = form.username.clone();
        let body = LoginBody {
            username: &form.username,
            password: &form.password,
        };
        let init = match RequestInit::method(Method::POST).json(&body) {
            Ok(init) => init,
            Err(e) => {
                warn!("Login error: {}", e);
                self.set(SessionState::resolved(false));
                return false;
            }
        };
        drop(form);

        let accepted = match self.fetch.request(endpoints::LOGIN, init).await {
            Ok(response) => response.ok(),
            Err(e) => {
                warn!("Login error: {}", e);
                false
            }
        };

        info!(
            event_name = "session.login",
            event_domain = "auth",
            username = username.as_str(),
            accepted,
            "login attempt finished"
        );
        self.set(SessionState::resolved(accepted));
        accepted
    }

    /// Tell the server, then forget the session and reload at the login view
    /// whatever the server said.
    pub async fn logout(&self) {
        match self
            .fetch
            .request(endpoints::LOGOUT, RequestInit::method(Method::POST))
            .await
        {
            Ok(response) if response.ok() => {}
            Ok(response) => warn!("Logout returned status {}", response.status),
            Err(e) => warn!("Logout error: {}", e),
        }

        info!(
            event_name = "session.logout",
            event_domain = "auth",
            "session cleared"
        );
        self.set(SessionState::resolved(false));
        self.navigator.navigate(Navigation::Reload(Location::login()));
    }
}
