//! The application shell: probes the session, runs every location through
//! the guard and hands the allowed ones to their views.

use std::path::Path;

use futures::join;
use tracing::{debug, info};

use crate::auth::SessionState;
use crate::routes::{guard, GuardDecision, Location, Navigation, Navigator, Route};
use crate::state::AppState;
use crate::views::adjustment::{apply_adjustment, AdjustmentEditor};
use crate::views::login::INVALID_CREDENTIALS;
use crate::views::{
    export_campaigns, export_line_items, CampaignDetailView, CampaignListView, CsvDownload,
    LoginPrompt, ViewError,
};

/// What ended up on screen.
#[derive(Debug, Clone)]
pub enum Screen {
    Campaigns(CampaignListView),
    CampaignDetail(CampaignDetailView),
    NotFound(Location),
}

impl Screen {
    pub fn render(&self) -> String {
        match self {
            Screen::Campaigns(view) => view.render(),
            Screen::CampaignDetail(view) => view.render(),
            Screen::NotFound(location) => format!("Page not found: {}\n", location),
        }
    }
}

pub struct App {
    state: AppState,
    prompt: Box<dyn LoginPrompt>,
}

impl App {
    pub fn new(state: AppState, prompt: Box<dyn LoginPrompt>) -> Self {
        App { state, prompt }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Ask the server about the session and report what it said.
    pub async fn status(&self) -> SessionState {
        self.state.session.probe().await
    }

    /// Open `location` the way a fresh page load would: the session probe
    /// and the guarded navigation run side by side.
    pub async fn open(&self, location: Location) -> Result<Screen, ViewError> {
        let (_, screen) = join!(self.state.session.probe(), self.route(location));
        screen
    }

    /// Probe and pass the guard for `location` without rendering anything.
    pub async fn authorize(&self, location: &Location) -> Result<(), ViewError> {
        let (_, result) = join!(self.state.session.probe(), self.pass_guard(location));
        result
    }

    /// Sign out and follow the full navigation the session manager asks for.
    pub async fn logout(&self) -> Location {
        self.state.session.logout().await;
        self.state
            .navigator
            .last()
            .filter(|navigation| matches!(navigation, Navigation::Reload(_)))
            .map(|navigation| navigation.location().clone())
            .unwrap_or_else(Location::login)
    }

    pub async fn adjust(
        &self,
        campaign_id: u64,
        line_item_id: u64,
        amount: &str,
    ) -> Result<(AdjustmentEditor, CampaignDetailView), ViewError> {
        self.authorize(&Route::CampaignDetail { id: campaign_id }.location())
            .await?;
        apply_adjustment(&self.state.api, campaign_id, line_item_id, amount).await
    }

    pub async fn export_campaigns(&self, dir: &Path) -> Result<CsvDownload, ViewError> {
        self.authorize(&Location::home()).await?;
        export_campaigns(&self.state.api, dir).await
    }

    pub async fn export_line_items(
        &self,
        campaign_id: u64,
        dir: &Path,
    ) -> Result<CsvDownload, ViewError> {
        self.authorize(&Route::CampaignDetail { id: campaign_id }.location())
            .await?;
        export_line_items(&self.state.api, campaign_id, dir).await
    }

    fn push(&self, location: Location) {
        self.state.navigator.navigate(Navigation::Push(location));
    }

    async fn route(&self, mut location: Location) -> Result<Screen, ViewError> {
        loop {
            let route = Route::resolve(&location);
            debug!("Routing {} to {:?}", location, route);
            if route.is_protected() {
                self.pass_guard(&location).await?;
            }
            match route {
                Route::Login => {
                    let next = location.next();
                    if !self.wait_for_session().await?.authenticated {
                        self.sign_in().await?;
                    }
                    self.push(next.clone());
                    location = next;
                }
                Route::NotFound => return Ok(Screen::NotFound(location)),
                Route::Campaigns { page } => {
                    let view = CampaignListView::load(&self.state.api, page).await?;
                    if view.current_page != page {
                        self.push(view.location());
                    }
                    return Ok(Screen::Campaigns(view));
                }
                Route::CampaignDetail { id } => {
                    let view = CampaignDetailView::load(&self.state.api, id).await?;
                    return Ok(Screen::CampaignDetail(view));
                }
            }
        }
    }

    /// Hold `location` until the guard lets it through. A redirect goes via
    /// the login view and comes back to `location` afterwards.
    async fn pass_guard(&self, location: &Location) -> Result<(), ViewError> {
        let mut rx = self.state.session.subscribe();
        let mut loading_shown = false;
        loop {
            let decision = guard(&rx.borrow_and_update(), location);
            match decision {
                GuardDecision::Allow => return Ok(()),
                GuardDecision::Wait => {
                    if !loading_shown {
                        eprintln!("Loading...");
                        loading_shown = true;
                    }
                    rx.changed()
                        .await
                        .map_err(|_| ViewError::new("Session state is no longer available"))?;
                }
                GuardDecision::Redirect { from, .. } => {
                    info!("{} needs a session, redirecting to login", from);
                    self.push(Location::login_then(&from));
                    self.sign_in().await?;
                    self.push(from);
                    return Ok(());
                }
            }
        }
    }

    async fn wait_for_session(&self) -> Result<SessionState, ViewError> {
        let mut rx = self.state.session.subscribe();
        loop {
            let state = *rx.borrow_and_update();
            if !state.loading {
                return Ok(state);
            }
            rx.changed()
                .await
                .map_err(|_| ViewError::new("Session state is no longer available"))?;
        }
    }

    async fn sign_in(&self) -> Result<(), ViewError> {
        let mut failure = None;
        let mut attempt = 0;
        loop {
            attempt += 1;
            let form = match self.prompt.credentials(attempt)? {
                Some(form) => form,
                None => return Err(failure.unwrap_or_else(|| ViewError::new("Login required"))),
            };
            if self.state.session.login(form).await {
                return Ok(());
            }
            self.prompt.rejected(INVALID_CREDENTIALS);
            failure = Some(ViewError::new(INVALID_CREDENTIALS));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints;
    use crate::config::ConfigV1;
    use crate::cookies::{CookieStore, MemoryCookieStore};
    use crate::http::fake::{FakeHttpClient, Reply};
    use crate::startup::build_state_with;
    use crate::views::StaticCredentials;
    use http::Method;
    use std::sync::Arc;

    const EMPTY_PAGE: &str = r#"{"count": 0, "next": null, "previous": null, "results": []}"#;

    fn app(prompt: Box<dyn LoginPrompt>) -> (Arc<FakeHttpClient>, App) {
        let jar = Arc::new(MemoryCookieStore::new());
        jar.apply_set_cookie("csrftoken=tok");
        let fake = Arc::new(FakeHttpClient::new(jar));
        let state =
            build_state_with(ConfigV1::default(), fake.clone(), fake.cookies.clone()).unwrap();
        (fake, App::new(state, prompt))
    }

    struct NoCredentials;

    impl LoginPrompt for NoCredentials {
        fn credentials(&self, _attempt: u32) -> Result<Option<crate::auth::LoginForm>, ViewError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_open_allows_live_session() {
        let (fake, app) = app(Box::new(NoCredentials));
        fake.on(Method::GET, endpoints::PING_PONG, Reply::status(200));
        fake.on(Method::GET, "/api/campaign/?page=1", Reply::status(200).body(EMPTY_PAGE));

        let screen = app.open(Location::home()).await.expect("screen");
        assert!(matches!(screen, Screen::Campaigns(ref view) if view.current_page == 1));
        assert!(app.state().navigator.entries().is_empty());
    }

    #[tokio::test]
    async fn test_redirect_without_credentials_fails() {
        let (fake, app) = app(Box::new(NoCredentials));
        fake.on(Method::GET, endpoints::PING_PONG, Reply::status(401));

        let err = app.open(Location::parse("/campaign/4")).await.unwrap_err();
        assert_eq!(err.message(), "Login required");
        assert_eq!(
            app.state().navigator.entries(),
            vec![Navigation::Push(Location::login_then(&Location::parse(
                "/campaign/4"
            )))]
        );
        assert_eq!(fake.count(&Method::GET, "/api/campaign/4/"), 0);
    }

    #[tokio::test]
    async fn test_rejected_login_reports_invalid_credentials() {
        let (fake, app) = app(Box::new(StaticCredentials::new("admin", "nope")));
        fake.on(Method::GET, endpoints::PING_PONG, Reply::status(403));
        fake.on(Method::POST, endpoints::LOGIN, Reply::status(400));

        let err = app.open(Location::home()).await.unwrap_err();
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_route_skips_prompt_when_signed_in() {
        let (fake, app) = app(Box::new(NoCredentials));
        fake.on(Method::GET, endpoints::PING_PONG, Reply::status(200));
        fake.on(Method::GET, "/api/campaign/9/", Reply::status(404));

        let err = app
            .open(Location::login_then(&Location::parse("/campaign/9")))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Failed to fetch campaign detail: Not Found");
        assert_eq!(
            app.state().navigator.last(),
            Some(Navigation::Push(Location::parse("/campaign/9")))
        );
        assert_eq!(fake.count(&Method::POST, endpoints::LOGIN), 0);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found_without_probe_wait() {
        let (fake, app) = app(Box::new(NoCredentials));
        fake.on(Method::GET, endpoints::PING_PONG, Reply::status(401));

        let screen = app.open(Location::parse("/reports")).await.expect("screen");
        assert_eq!(screen.render(), "Page not found: /reports\n");
    }

    #[tokio::test]
    async fn test_out_of_range_page_moves_to_first_page() {
        let (fake, app) = app(Box::new(NoCredentials));
        fake.on(Method::GET, endpoints::PING_PONG, Reply::status(200));
        fake.on(
            Method::GET,
            "/api/campaign/?page=7",
            Reply::status(404).body(r#"{"detail": "Invalid page."}"#),
        );
        fake.on(Method::GET, "/api/campaign/?page=1", Reply::status(200).body(EMPTY_PAGE));

        let screen = app.open(Location::parse("/?page=7")).await.expect("screen");
        assert!(matches!(screen, Screen::Campaigns(ref view) if view.current_page == 1));
        assert_eq!(
            app.state().navigator.last(),
            Some(Navigation::Push(Location::home()))
        );
    }

    #[tokio::test]
    async fn test_logout_lands_on_login() {
        let (fake, app) = app(Box::new(NoCredentials));
        fake.on(Method::POST, endpoints::LOGOUT, Reply::NetworkError);

        assert_eq!(app.logout().await, Location::login());
        assert!(!app.state().session.state().authenticated);
    }
}
