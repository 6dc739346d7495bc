// Every section is re-exported so callers can "use crate::config::{ConfigV1, ApiConfig}".
pub mod api;
pub mod config;
pub mod logging;
pub mod session;

pub use api::*;
pub use config::*;
pub use logging::*;
pub use session::*;
