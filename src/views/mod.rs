//! Terminal renditions of the console's screens.
//!
//! Every view turns failures into the message the user gets to read and
//! leaves the decision to retry with them.

pub mod adjustment;
pub mod budget;
pub mod campaign_detail;
pub mod campaign_list;
pub mod csv_export;
pub mod format;
pub mod login;

use std::fmt;

pub use adjustment::AdjustmentEditor;
pub use campaign_detail::CampaignDetailView;
pub use campaign_list::CampaignListView;
pub use csv_export::{export_campaigns, export_line_items, CsvDownload};
pub use login::{LoginPrompt, StaticCredentials, TerminalPrompt};

/// A user-visible error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError(String);

impl ViewError {
    pub fn new(message: impl Into<String>) -> Self {
        ViewError(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ViewError {}
