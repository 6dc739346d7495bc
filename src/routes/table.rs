use super::location::Location;

/// Every screen the console knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Campaigns { page: u32 },
    CampaignDetail { id: u64 },
    NotFound,
}

impl Route {
    pub fn resolve(location: &Location) -> Route {
        let path = location.path().trim_end_matches('/');
        match path {
            "" => Route::Campaigns {
                page: parse_page(location.query_param("page").as_deref()),
            },
            "/login" => Route::Login,
            _ => match path.strip_prefix("/campaign/") {
                Some(id) => id
                    .parse()
                    .map(|id| Route::CampaignDetail { id })
                    .unwrap_or(Route::NotFound),
                None => Route::NotFound,
            },
        }
    }

    /// Whether the route sits behind the session guard.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Campaigns { .. } | Route::CampaignDetail { .. })
    }

    /// Canonical location. Page 1 has no query string.
    pub fn location(&self) -> Location {
        match self {
            Route::Login => Location::login(),
            Route::Campaigns { page } if *page > 1 => {
                Location::new("/", Some(format!("page={}", page)))
            }
            Route::Campaigns { .. } => Location::home(),
            Route::CampaignDetail { id } => Location::new(format!("/campaign/{}", id), None),
            Route::NotFound => Location::new("/404", None),
        }
    }
}

/// Leading digits as a page number; anything missing, unparseable or below 1 is page 1.
fn parse_page(raw: Option<&str>) -> u32 {
    let digits: String = raw
        .unwrap_or("")
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok().filter(|page| *page >= 1).unwrap_or(1)
}
