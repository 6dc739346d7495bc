use std::sync::Arc;

use http::header::{HeaderName, HeaderValue, InvalidHeaderName};
use http::Method;
use tracing::{debug, warn};

use super::csrf::CsrfTokenProvider;
use crate::config::ApiConfig;
use crate::cookies::CookieStore;
use crate::http::{ApiRequest, ApiResponse, CredentialsMode, HttpClient, RequestInit, TransportError};

/// POST, PUT, PATCH and DELETE change server state and need the CSRF header.
pub fn is_unsafe_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Methods compare case-sensitively, so "post" is folded to POST first.
fn normalize_method(method: Option<Method>) -> Method {
    match method {
        None => Method::GET,
        Some(method) => {
            let upper = method.as_str().to_ascii_uppercase();
            Method::from_bytes(upper.as_bytes()).unwrap_or(method)
        }
    }
}

/// Drop-in replacement for a plain `HttpClient::send` that always sends the
/// cookie jar and adds the CSRF header to state-changing requests.
pub struct AuthenticatedFetch {
    http: Arc<dyn HttpClient>,
    csrf: CsrfTokenProvider,
    csrf_header: HeaderName,
}

impl AuthenticatedFetch {
    pub fn new(http: Arc<dyn HttpClient>, csrf: CsrfTokenProvider, csrf_header: HeaderName) -> Self {
        AuthenticatedFetch {
            http,
            csrf,
            csrf_header,
        }
    }

    /// Build the wrapper from the API config's cookie and header names.
    pub fn from_config(
        http: Arc<dyn HttpClient>,
        cookies: Arc<dyn CookieStore>,
        config: &ApiConfig,
    ) -> Result<Self, InvalidHeaderName> {
        let csrf_header = HeaderName::from_bytes(config.csrf_header.as_bytes())?;
        let csrf = CsrfTokenProvider::new(http.clone(), cookies, config.csrf_cookie_name.clone());
        Ok(Self::new(http, csrf, csrf_header))
    }

    /// Send `init` to `url`.
    ///
    /// Credentials are forced to `Include`; every other caller setting is
    /// kept. The response comes back untouched whatever its status, and
    /// transport errors propagate as-is.
    pub async fn request(
        &self,
        url: &str,
        mut init: RequestInit,
    ) -> Result<ApiResponse, TransportError> {
        let method = normalize_method(init.method.take());

        if is_unsafe_method(&method) {
            let token = self.csrf.ensure_token().await;
            if token.is_empty() {
                debug!(
                    method = method.as_str(),
                    url, "no CSRF token available, sending without it"
                );
            } else {
                match HeaderValue::from_str(&token) {
                    Ok(value) => {
                        init.headers.insert(self.csrf_header.clone(), value);
                    }
                    Err(_) => warn!("CSRF token is not a valid header value, sending without it"),
                }
            }
        }

        init.method = Some(method);
        init.credentials = Some(CredentialsMode::Include);
        self.http.send(ApiRequest::new(url, init)).await
    }
}
