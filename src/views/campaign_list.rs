use std::fmt::Write;

use tracing::info;

use super::budget::styled_rate;
use super::format::{fit, format_amount, format_timestamp};
use super::ViewError;
use crate::api::{ApiError, CampaignApi};
use crate::models::{Campaign, Page};
use crate::routes::{Location, Route};

/// One page of the campaign list.
#[derive(Debug, Clone)]
pub struct CampaignListView {
    pub page: Page<Campaign>,
    pub current_page: u32,
}

impl CampaignListView {
    /// Fetch `page`. A page past the end falls back to the first page.
    pub async fn load(api: &CampaignApi, page: u32) -> Result<Self, ViewError> {
        let fail = |e: ApiError| ViewError::new(format!("Failed to fetch campaigns: {}", e));
        match api.campaigns(page).await {
            Ok(result) => Ok(CampaignListView {
                page: result,
                current_page: page,
            }),
            Err(e) if e.is_invalid_page() && page != 1 => {
                info!("Page {} is out of range, showing page 1", page);
                let result = api.campaigns(1).await.map_err(fail)?;
                Ok(CampaignListView {
                    page: result,
                    current_page: 1,
                })
            }
            Err(e) => Err(fail(e)),
        }
    }

    /// Where this list lives, page 1 without a query string.
    pub fn location(&self) -> Location {
        Route::Campaigns {
            page: self.current_page,
        }
        .location()
    }

    pub fn previous(&self) -> Option<Location> {
        self.page.has_previous().then(|| {
            Route::Campaigns {
                page: self.current_page.saturating_sub(1).max(1),
            }
            .location()
        })
    }

    pub fn next(&self) -> Option<Location> {
        self.page.has_next().then(|| {
            Route::Campaigns {
                page: self.current_page + 1,
            }
            .location()
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Campaign List");
        let _ = writeln!(
            out,
            "Total campaigns: {} | Page {} of {}",
            self.page.count,
            self.current_page,
            self.page.total_pages()
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<6} {} {:<19} {:>18}  Rate",
            "ID",
            fit("Name", 32),
            "Created",
            "Invoice"
        );
        for campaign in &self.page.results {
            let _ = writeln!(
                out,
                "{:<6} {} {:<19} {:>18}  {}",
                campaign.id,
                fit(&campaign.name, 32),
                format_timestamp(&campaign.created_at),
                format!("${}", format_amount(&campaign.potential_invoice_amount, 2)),
                styled_rate(campaign.budget_fulfillment_rate, 5)
            );
        }
        let _ = writeln!(out);
        let previous = self
            .previous()
            .map(|l| format!("previous: {}", l))
            .unwrap_or_else(|| "previous: -".to_string());
        let next = self
            .next()
            .map(|l| format!("next: {}", l))
            .unwrap_or_else(|| "next: -".to_string());
        let _ = writeln!(out, "{}   {}", previous, next);
        out
    }
}
