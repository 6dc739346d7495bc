use async_trait::async_trait;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Whether a request carries the cookie jar (and may update it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    #[default]
    Omit,
    Include,
}

/// Connection-level failures. HTTP error statuses are not errors here.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid request url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Network(String),
}

/// Caller-supplied request options. Anything unset takes the default.
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    pub method: Option<Method>,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub credentials: Option<CredentialsMode>,
}

impl RequestInit {
    pub fn method(method: Method) -> Self {
        RequestInit {
            method: Some(method),
            ..Default::default()
        }
    }

    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = Some(mode);
        self
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(body)?);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }
}

/// A fully resolved request as it goes out on the wire.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute, or relative to the client's base URL.
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub credentials: CredentialsMode,
}

impl ApiRequest {
    pub fn new(url: impl Into<String>, init: RequestInit) -> Self {
        ApiRequest {
            method: init.method.unwrap_or(Method::GET),
            url: url.into(),
            headers: init.headers,
            body: init.body,
            credentials: init.credentials.unwrap_or_default(),
        }
    }
}

/// A response with its body already read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode) -> Self {
        ApiResponse {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// True for any 2xx status.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// The reason phrase for the status, e.g. "Not Found".
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Sends requests. Implementations must attach the cookie jar and honour
/// `Set-Cookie` exactly when `credentials` is `Include`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
