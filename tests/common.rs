#![allow(dead_code)]

use campaign_desk::app::App;
use campaign_desk::config::{extract, ConfigV1};
use campaign_desk::startup::build_state;
use campaign_desk::views::{LoginPrompt, StaticCredentials, ViewError};
use campaign_desk::auth::LoginForm;
use figment::providers::{Format, Serialized, Yaml};
use figment::Figment;

pub const CAMPAIGN_DETAIL: &str = r#"{
    "id": 7,
    "name": "Summer Sale",
    "created_at": "2024-06-01 09:00:00",
    "potential_invoice_amount": 2400.0,
    "line_items": [{
        "id": 70,
        "name": "Sidebar banner",
        "booked_amount": "2500.00000000000000000000",
        "actual_amount": "2400.00000000000000000000",
        "adjustment_amount": "0E-20",
        "final_amount": 2400.0,
        "budget_fullfillment_rate": 96,
        "created_at": "2024-06-01T09:00:00Z",
        "updated_at": "2024-06-02T09:00:00Z"
    }]
}"#;

/// Config pointing at a mock server, loaded the same way as a config file.
pub fn test_config(base_url: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
api:
  base_url: "{}"
  timeout_in_ms: 3000
logging:
  level: "debug"
  format: "json"
"#,
        base_url
    );
    extract(Figment::from(Serialized::default("version", "1.0.0")).merge(Yaml::string(&yaml)))
        .expect("test config should parse")
}

pub fn build_app(base_url: &str, prompt: Box<dyn LoginPrompt>) -> App {
    let state = build_state(test_config(base_url)).expect("state should build");
    App::new(state, prompt)
}

pub fn admin() -> Box<dyn LoginPrompt> {
    Box::new(StaticCredentials::new("admin", "admin"))
}

/// A user who closes the login view without typing anything.
pub struct NoCredentials;

impl LoginPrompt for NoCredentials {
    fn credentials(&self, _attempt: u32) -> Result<Option<LoginForm>, ViewError> {
        Ok(None)
    }
}
