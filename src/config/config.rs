use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::api::ApiConfig;
use super::logging::LoggingConfig;
use super::session::{ExportConfig, SessionConfig};

/// Prefix for environment overrides, e.g. `CAMPAIGN_DESK_API__BASE_URL`.
pub const ENV_PREFIX: &str = "CAMPAIGN_DESK_";

const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0. Every section has defaults, so an empty file is valid.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
#[serde(default)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Layered sources: defaults, then the YAML file, then environment overrides.
/// A missing file is not an error.
pub fn figment(path: Option<&Path>) -> Figment {
    let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    Figment::from(Serialized::default("version", "1.0.0"))
        .merge(Yaml::file(file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load and resolve the configuration.
pub fn load_config(path: Option<&Path>) -> Result<ConfigV1, figment::Error> {
    extract(figment(path))
}

/// Extract a `ConfigV1` out of any figment, unwrapping the version tag.
pub fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Render the JSON schema for the configuration.
pub fn schema_json() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}
