//! Payloads returned by the campaign API.
//!
//! Money amounts stay as the exact decimal strings the server sends.

pub mod campaign;
pub mod page;

pub use campaign::{Campaign, CampaignDetail, LineItem};
pub use page::Page;
