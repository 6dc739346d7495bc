use std::sync::Arc;

use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use super::endpoints;
use crate::auth::AuthenticatedFetch;
use crate::http::{ApiResponse, RequestInit, TransportError};
use crate::models::{Campaign, CampaignDetail, Page};

/// Why an API call did not produce what the caller asked for.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Non-2xx answer. Displays as the reason phrase, e.g. "Not Found".
    #[error("{reason}")]
    Status {
        status: StatusCode,
        reason: String,
        body: String,
    },
    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("could not encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    fn from_response(response: &ApiResponse) -> Self {
        ApiError::Status {
            status: response.status,
            reason: response.status_text().to_string(),
            body: response.text(),
        }
    }

    /// The list endpoint's answer to a page past the end.
    pub fn is_invalid_page(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status, body, .. }
                if *status == StatusCode::NOT_FOUND && body.contains("Invalid page")
        )
    }
}

fn check(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.ok() {
        Ok(response)
    } else {
        Err(ApiError::from_response(&response))
    }
}

fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ApiError> {
    check(response)?.json().map_err(ApiError::Decode)
}

/// Campaign and line item operations, all sent through the authenticated fetch.
#[derive(Clone)]
pub struct CampaignApi {
    fetch: Arc<AuthenticatedFetch>,
}

impl CampaignApi {
    pub fn new(fetch: Arc<AuthenticatedFetch>) -> Self {
        CampaignApi { fetch }
    }

    pub async fn campaigns(&self, page: u32) -> Result<Page<Campaign>, ApiError> {
        let url = endpoints::campaigns_page(page);
        debug!("Fetching campaign page {}", page);
        decode(self.fetch.request(&url, RequestInit::default()).await?)
    }

    pub async fn campaign(&self, id: u64) -> Result<CampaignDetail, ApiError> {
        let url = endpoints::campaign(id);
        debug!("Fetching campaign {}", id);
        decode(self.fetch.request(&url, RequestInit::default()).await?)
    }

    /// PATCH the adjustment amount. The value is sent exactly as given.
    pub async fn update_adjustment(&self, line_item_id: u64, amount: &str) -> Result<(), ApiError> {
        let init = RequestInit::method(Method::PATCH)
            .json(&json!({ "adjustment_amount": amount }))
            .map_err(ApiError::Encode)?;
        check(
            self.fetch
                .request(&endpoints::line_item(line_item_id), init)
                .await?,
        )?;
        Ok(())
    }

    /// Ask for the campaign CSV. The response carries the file.
    pub async fn export_campaigns_csv(&self) -> Result<ApiResponse, ApiError> {
        check(
            self.fetch
                .request(endpoints::CAMPAIGNS_CSV, RequestInit::method(Method::POST))
                .await?,
        )
    }

    pub async fn export_line_items_csv(&self, campaign_id: u64) -> Result<ApiResponse, ApiError> {
        check(
            self.fetch
                .request(
                    &endpoints::line_items_csv(campaign_id),
                    RequestInit::method(Method::POST),
                )
                .await?,
        )
    }
}
