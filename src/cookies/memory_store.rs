use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, warn};

use super::base::{CookieStore, SetCookie};

/// An in-process cookie jar.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: RwLock<BTreeMap<String, String>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the jar, e.g. from a persisted file.
    pub fn from_map(cookies: BTreeMap<String, String>) -> Self {
        MemoryCookieStore {
            cookies: RwLock::new(cookies),
        }
    }

    /// Copy of the current cookies.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.cookies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply a `Set-Cookie` header and report whether the jar changed.
    pub fn apply(&self, header: &str) -> bool {
        let Some(cookie) = SetCookie::parse(header) else {
            warn!("Ignoring malformed Set-Cookie header");
            return false;
        };

        let mut cookies = self.cookies.write().unwrap_or_else(PoisonError::into_inner);
        if cookie.expired {
            debug!(cookie = cookie.name.as_str(), "cookie removed by server");
            cookies.remove(&cookie.name).is_some()
        } else {
            debug!(cookie = cookie.name.as_str(), "cookie set by server");
            cookies.insert(cookie.name.clone(), cookie.value.clone()) != Some(cookie.value)
        }
    }
}

impl CookieStore for MemoryCookieStore {
    fn cookie_header(&self) -> String {
        self.cookies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn apply_set_cookie(&self, header: &str) {
        self.apply(header);
    }
}
