use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use super::{file_store::FileCookieStore, memory_store::MemoryCookieStore};
use crate::config::SessionConfig;

/// Failures reading or writing a persisted cookie jar.
#[derive(Debug, Error)]
pub enum CookieStoreError {
    #[error("cookie jar I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cookie jar is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The cookie jar requests are sent with.
///
/// Only the HTTP layer writes to it, from the server's `Set-Cookie` headers.
/// Everything else reads.
pub trait CookieStore: Send + Sync {
    /// Every cookie as a `name=value; name2=value2` string, empty when the jar is.
    fn cookie_header(&self) -> String;

    /// Apply one `Set-Cookie` header value.
    fn apply_set_cookie(&self, header: &str);

    /// Read one cookie by name.
    fn get(&self, name: &str) -> Option<String> {
        read_cookie(&self.cookie_header(), name)
    }
}

/// Return the decoded value of cookie `name` in a `a=1; b=2` style string.
///
/// The whole `name=` prefix has to match, so `csrftokenX=...` is never
/// mistaken for `csrftoken`. Values that are not valid percent-encoding are
/// returned as-is.
pub fn read_cookie(cookie_header: &str, name: &str) -> Option<String> {
    if cookie_header.is_empty() {
        return None;
    }
    let prefix = format!("{}=", name);
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|raw| match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        })
}

/// The parts of a `Set-Cookie` header the jar cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    /// True when the server is deleting the cookie.
    pub expired: bool,
}

impl SetCookie {
    /// Parse a `Set-Cookie` header value. `Max-Age` wins over `Expires`.
    pub fn parse(header: &str) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut max_age: Option<i64> = None;
        let mut expires: Option<DateTime<Utc>> = None;
        for attribute in parts {
            let (key, val) = attribute.split_once('=').unwrap_or((attribute, ""));
            let key = key.trim();
            let val = val.trim();
            if key.eq_ignore_ascii_case("max-age") {
                max_age = val.parse().ok();
            } else if key.eq_ignore_ascii_case("expires") {
                expires = DateTime::parse_from_rfc2822(val)
                    .ok()
                    .map(|when| when.with_timezone(&Utc));
            }
        }

        let expired = match (max_age, expires) {
            (Some(seconds), _) => seconds <= 0,
            (None, Some(when)) => when <= Utc::now(),
            (None, None) => false,
        };

        Some(SetCookie {
            name: name.to_string(),
            value: value.trim().to_string(),
            expired,
        })
    }
}

/// Creates the cookie jar described by the session config.
/// Without a `cookie_jar` path, cookies only last as long as the process.
pub fn create_cookie_store(
    config: &SessionConfig,
) -> Result<Arc<dyn CookieStore>, CookieStoreError> {
    match &config.cookie_jar {
        Some(path) => {
            let store = FileCookieStore::open(path)?;
            info!("Using cookie jar at {}", store.path().display());
            Ok(Arc::new(store))
        }
        None => {
            info!("No cookie jar configured. Using in-memory cookies.");
            Ok(Arc::new(MemoryCookieStore::new()))
        }
    }
}
