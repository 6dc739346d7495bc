//! Typed access to the campaign backend.

pub mod client;
pub mod endpoints;

pub use client::{ApiError, CampaignApi};
