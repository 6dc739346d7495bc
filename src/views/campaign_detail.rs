use std::fmt::Write;

use super::budget::styled_rate;
use super::format::{fit, format_amount, format_timestamp};
use super::ViewError;
use crate::api::CampaignApi;
use crate::models::CampaignDetail;

/// A campaign and its line items.
#[derive(Debug, Clone)]
pub struct CampaignDetailView {
    pub detail: CampaignDetail,
}

impl CampaignDetailView {
    pub async fn load(api: &CampaignApi, id: u64) -> Result<Self, ViewError> {
        api.campaign(id)
            .await
            .map(|detail| CampaignDetailView { detail })
            .map_err(|e| ViewError::new(format!("Failed to fetch campaign detail: {}", e)))
    }

    pub fn render(&self) -> String {
        let detail = &self.detail;
        let mut out = String::new();
        let _ = writeln!(out, "Campaign #{}: {}", detail.id, detail.name);
        let _ = writeln!(out, "Created: {}", format_timestamp(&detail.created_at));
        let _ = writeln!(
            out,
            "Potential invoice amount: ${}",
            format_amount(&detail.potential_invoice_amount, 20)
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Line items ({})", detail.line_items.len());
        let _ = writeln!(
            out,
            "{:<6} {} {:>14} {:>14} {:>14} {:>14}  Rate",
            "ID",
            fit("Name", 28),
            "Booked",
            "Actual",
            "Adjustment",
            "Final"
        );
        for item in &detail.line_items {
            let _ = writeln!(
                out,
                "{:<6} {} {:>14} {:>14} {:>14} {:>14}  {}",
                item.id,
                fit(&item.name, 28),
                format!("${}", format_amount(&item.booked_amount, 2)),
                format!("${}", format_amount(&item.actual_amount, 2)),
                format!("${}", format_amount(&item.adjustment_amount, 2)),
                format!("${}", format_amount(&item.final_amount, 2)),
                styled_rate(item.budget_fulfillment_rate, 5)
            );
        }
        out
    }
}
