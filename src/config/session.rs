use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Cookie jar settings.
/// - cookie_jar: if unset, cookies only live for the current process.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_jar: Option<PathBuf>,
}

/// Where CSV downloads are written.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            directory: PathBuf::from("."),
        }
    }
}
