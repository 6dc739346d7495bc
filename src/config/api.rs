use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the backend lives and how its CSRF contract is named.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin that relative request paths are resolved against.
    pub base_url: String,
    pub timeout_in_ms: u64,
    /// Cookie the server uses to hand out the CSRF token.
    pub csrf_cookie_name: String,
    /// Header unsafe requests echo the token back in.
    pub csrf_header: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:8000".to_string(),
            timeout_in_ms: 10_000,
            csrf_cookie_name: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
        }
    }
}
