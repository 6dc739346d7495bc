//! Shared application state.
//!
//! Everything a command needs: the configuration, the cookie jar, the
//! session manager, the typed API client and the navigation history.

use std::sync::Arc;

use crate::api::CampaignApi;
use crate::auth::SessionManager;
use crate::config::ConfigV1;
use crate::cookies::CookieStore;
use crate::routes::HistoryNavigator;

/// Application state shared by the shell and the views.
#[derive(Clone)]
pub struct AppState {
    /// Configuration resolved at startup.
    pub config: Arc<ConfigV1>,
    /// The jar every credentialed request reads from and writes to.
    pub cookies: Arc<dyn CookieStore>,
    /// Sole owner of the signed-in state.
    pub session: Arc<SessionManager>,
    pub api: CampaignApi,
    pub navigator: Arc<HistoryNavigator>,
}
