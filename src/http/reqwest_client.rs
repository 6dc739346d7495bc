use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http::header::{COOKIE, SET_COOKIE};
use tracing::debug;
use url::Url;

use super::client::{ApiRequest, ApiResponse, CredentialsMode, HttpClient, TransportError};
use crate::config::ApiConfig;
use crate::cookies::CookieStore;

/// `HttpClient` backed by reqwest, resolving relative paths against the
/// configured base URL and keeping the cookie jar in sync.
pub struct ReqwestClient {
    client: reqwest::Client,
    base_url: Url,
    cookies: Arc<dyn CookieStore>,
}

impl ReqwestClient {
    pub fn new(config: &ApiConfig, cookies: Arc<dyn CookieStore>) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| TransportError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(ReqwestClient {
            client,
            base_url,
            cookies,
        })
    }

    fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(url)
            .map_err(|e| TransportError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.resolve(&request.url)?;
        let include = request.credentials == CredentialsMode::Include;

        debug!(
            event_name = "http.request",
            event_domain = "http",
            method = request.method.as_str(),
            url = url.as_str(),
            credentials = include,
            "sending request"
        );

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if include {
            let cookie_header = self.cookies.cookie_header();
            if !cookie_header.is_empty() {
                builder = builder.header(COOKIE, cookie_header);
            }
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        if include {
            for value in headers.get_all(SET_COOKIE) {
                if let Ok(value) = value.to_str() {
                    self.cookies.apply_set_cookie(value);
                }
            }
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(format!("Error reading response body: {}", e)))?
            .to_vec();

        debug!(
            event_name = "http.response",
            event_domain = "http",
            status = status.as_u16(),
            bytes = body.len(),
            "received response"
        );

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::MemoryCookieStore;
    use crate::http::RequestInit;
    use http::Method;
    use mockito::{Matcher, Server};

    fn client_for(uri: String, cookies: Arc<dyn CookieStore>) -> ReqwestClient {
        let config = ApiConfig {
            base_url: uri,
            ..ApiConfig::default()
        };
        ReqwestClient::new(&config, cookies).expect("client should build")
    }

    /// Cookies go out and come back only for credentialed requests.
    #[tokio::test]
    async fn test_include_sends_and_stores_cookies() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/ping_pong/")
            .match_header("cookie", "sessionid=s1")
            .with_status(200)
            .with_header("set-cookie", "csrftoken=fresh; Path=/")
            .with_body(r#"{"message": "pong"}"#)
            .create_async()
            .await;

        let cookies = Arc::new(MemoryCookieStore::new());
        cookies.apply_set_cookie("sessionid=s1");
        let client = client_for(server.url(), cookies.clone());

        let request = ApiRequest::new(
            "/api/ping_pong/",
            RequestInit::default().credentials(CredentialsMode::Include),
        );
        let response = client.send(request).await.expect("request should succeed");
        m.assert_async().await;

        assert!(response.ok());
        assert!(response.text().contains("pong"));
        assert_eq!(cookies.get("csrftoken"), Some("fresh".to_string()));
    }

    #[tokio::test]
    async fn test_omit_leaves_jar_alone() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/ping_pong/")
            .match_header("cookie", Matcher::Missing)
            .with_status(403)
            .with_header("set-cookie", "csrftoken=fresh; Path=/")
            .create_async()
            .await;

        let cookies = Arc::new(MemoryCookieStore::new());
        cookies.apply_set_cookie("sessionid=s1");
        let client = client_for(server.url(), cookies.clone());

        let response = client
            .send(ApiRequest::new("/api/ping_pong/", RequestInit::default()))
            .await
            .expect("request should complete");
        m.assert_async().await;

        assert_eq!(response.status, 403);
        assert_eq!(response.status_text(), "Forbidden");
        assert_eq!(cookies.get("csrftoken"), None);
    }

    #[tokio::test]
    async fn test_body_and_headers_are_forwarded() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PATCH", "/api/line_item/7/")
            .match_header("content-type", "application/json")
            .match_body(Matcher::JsonString(
                r#"{"adjustment_amount":"2.5"}"#.to_string(),
            ))
            .with_status(200)
            .create_async()
            .await;

        let client = client_for(server.url(), Arc::new(MemoryCookieStore::new()));
        let init = RequestInit::method(Method::PATCH)
            .json(&serde_json::json!({ "adjustment_amount": "2.5" }))
            .unwrap();
        let response = client
            .send(ApiRequest::new("/api/line_item/7/", init))
            .await
            .expect("request should succeed");
        m.assert_async().await;
        assert!(response.ok());
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on port 9 on loopback.
        let client = client_for(
            "http://127.0.0.1:9".to_string(),
            Arc::new(MemoryCookieStore::new()),
        );
        let result = client
            .send(ApiRequest::new("/api/ping_pong/", RequestInit::default()))
            .await;
        assert!(matches!(result, Err(TransportError::Network(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        let result = ReqwestClient::new(&config, Arc::new(MemoryCookieStore::new()));
        assert!(matches!(result, Err(TransportError::InvalidUrl { .. })));
    }
}
