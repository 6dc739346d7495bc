//! Scripted `HttpClient` for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::header::{HeaderName, HeaderValue};
use http::{Method, StatusCode};

use super::client::{ApiRequest, ApiResponse, CredentialsMode, HttpClient, TransportError};
use crate::cookies::{CookieStore, MemoryCookieStore};

/// What the fake server answers with.
#[derive(Clone, Debug)]
pub enum Reply {
    Response {
        status: StatusCode,
        set_cookies: Vec<String>,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    },
    NetworkError,
}

impl Reply {
    pub fn status(code: u16) -> Self {
        Reply::Response {
            status: StatusCode::from_u16(code).expect("valid status"),
            set_cookies: Vec::new(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn set_cookie(mut self, cookie: &str) -> Self {
        if let Reply::Response { set_cookies, .. } = &mut self {
            set_cookies.push(cookie.to_string());
        }
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let Reply::Response { headers, .. } = &mut self {
            headers.push((name.to_string(), value.to_string()));
        }
        self
    }

    pub fn body(mut self, content: impl Into<Vec<u8>>) -> Self {
        if let Reply::Response { body, .. } = &mut self {
            *body = content.into();
        }
        self
    }
}

/// Records every request and answers from a per-route script. The last
/// scripted reply for a route repeats; unscripted routes get a 404.
pub struct FakeHttpClient {
    pub cookies: Arc<MemoryCookieStore>,
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeHttpClient {
    pub fn new(cookies: Arc<MemoryCookieStore>) -> Self {
        FakeHttpClient {
            cookies,
            replies: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn on(&self, method: Method, url: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &Method, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.method == method && r.url == url)
            .count()
    }

    fn next_reply(&self, method: &Method, url: &str) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(&(method.clone(), url.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Reply::status(404),
        }
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let reply = self.next_reply(&request.method, &request.url);
        let include = request.credentials == CredentialsMode::Include;
        self.requests.lock().unwrap().push(request);

        match reply {
            Reply::NetworkError => Err(TransportError::Network("connection refused".into())),
            Reply::Response {
                status,
                set_cookies,
                headers,
                body,
            } => {
                if include {
                    for cookie in &set_cookies {
                        self.cookies.apply_set_cookie(cookie);
                    }
                }
                let mut response = ApiResponse::new(status);
                for (name, value) in headers {
                    response.headers.insert(
                        HeaderName::from_bytes(name.as_bytes()).unwrap(),
                        HeaderValue::from_str(&value).unwrap(),
                    );
                }
                response.body = body;
                Ok(response)
            }
        }
    }
}
