use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A path plus optional query string, e.g. `/campaign/3` or `/?page=2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    path: String,
    query: Option<String>,
}

impl Location {
    pub fn new(path: impl Into<String>, query: Option<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        Location {
            path,
            query: query.filter(|q| !q.is_empty()),
        }
    }

    /// Parse `path?query`. An empty input is the root.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (raw, None),
        };
        Location::new(if path.is_empty() { "/" } else { path }, query)
    }

    pub fn login() -> Self {
        Location::new("/login", None)
    }

    /// The login view, remembering where to go once signed in.
    pub fn login_then(next: &Location) -> Self {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("next", &next.to_string())
            .finish();
        Location::new("/login", Some(query))
    }

    /// Where the login view at this location sends the user afterwards.
    pub fn next(&self) -> Location {
        self.query_param("next")
            .map(|next| Location::parse(&next))
            .unwrap_or_else(Location::home)
    }

    pub fn home() -> Self {
        Location::new("/", None)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value of query parameter `name`.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            Some(query) => write!(f, "{}?{}", self.path, query),
            None => f.write_str(&self.path),
        }
    }
}

impl FromStr for Location {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Location::parse(s))
    }
}
