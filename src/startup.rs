//! Wiring the request pipeline together from the configuration.

use std::sync::Arc;

use http::header::InvalidHeaderName;
use thiserror::Error;
use tracing::info;

use crate::api::CampaignApi;
use crate::auth::{AuthenticatedFetch, SessionManager};
use crate::config::ConfigV1;
use crate::cookies::{create_cookie_store, CookieStore, CookieStoreError};
use crate::http::{HttpClient, ReqwestClient, TransportError};
use crate::routes::HistoryNavigator;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not open the cookie jar: {0}")]
    CookieJar(#[from] CookieStoreError),
    #[error("could not build the HTTP client: {0}")]
    Http(#[from] TransportError),
    #[error("invalid api.csrf_header: {0}")]
    CsrfHeader(#[from] InvalidHeaderName),
}

/// Build the application state on top of the reqwest client.
///
/// # Errors
///
/// Fails if the cookie jar cannot be read, the base URL is unusable or the
/// configured CSRF header is not a valid header name.
pub fn build_state(config: ConfigV1) -> Result<AppState, StartupError> {
    let cookies = create_cookie_store(&config.session)?;
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new(&config.api, cookies.clone())?);
    info!("Talking to {}", config.api.base_url);
    build_state_with(config, http, cookies)
}

/// Build the application state around an existing HTTP client and jar.
pub fn build_state_with(
    config: ConfigV1,
    http: Arc<dyn HttpClient>,
    cookies: Arc<dyn CookieStore>,
) -> Result<AppState, StartupError> {
    let fetch = Arc::new(AuthenticatedFetch::from_config(
        http.clone(),
        cookies.clone(),
        &config.api,
    )?);
    let navigator = Arc::new(HistoryNavigator::new());
    let session = Arc::new(SessionManager::new(http, fetch.clone(), navigator.clone()));

    Ok(AppState {
        config: Arc::new(config),
        cookies,
        session,
        api: CampaignApi::new(fetch),
        navigator,
    })
}
