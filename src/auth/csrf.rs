use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::endpoints;
use crate::cookies::CookieStore;
use crate::http::{ApiRequest, CredentialsMode, HttpClient, RequestInit};

/// Hands out the CSRF token, asking the server for one when the jar has none.
pub struct CsrfTokenProvider {
    http: Arc<dyn HttpClient>,
    cookies: Arc<dyn CookieStore>,
    cookie_name: String,
}

impl CsrfTokenProvider {
    pub fn new(
        http: Arc<dyn HttpClient>,
        cookies: Arc<dyn CookieStore>,
        cookie_name: impl Into<String>,
    ) -> Self {
        CsrfTokenProvider {
            http,
            cookies,
            cookie_name: cookie_name.into(),
        }
    }

    /// The token currently in the jar, if any.
    pub fn current(&self) -> Option<String> {
        self.cookies.get(&self.cookie_name)
    }

    /// Return the token, bootstrapping it with a single GET if it is missing.
    ///
    /// Never fails: an empty string means no token could be obtained, and
    /// the request that needed it will be rejected by the server instead.
    pub async fn ensure_token(&self) -> String {
        if let Some(token) = self.current() {
            return token;
        }

        debug!(
            event_name = "csrf.bootstrap",
            event_domain = "auth",
            cookie = self.cookie_name.as_str(),
            "no CSRF cookie, requesting one"
        );
        let request = ApiRequest::new(
            endpoints::PING_PONG,
            RequestInit::default().credentials(CredentialsMode::Include),
        );
        if let Err(e) = self.http.send(request).await {
            warn!("Failed to get CSRF token: {}", e);
        }

        self.current().unwrap_or_default()
    }
}
