use std::fmt::Write;

use rust_decimal::Decimal;
use tracing::info;

use super::campaign_detail::CampaignDetailView;
use super::format::{format_amount, format_decimal, parse_amount};
use super::ViewError;
use crate::api::CampaignApi;
use crate::models::LineItem;

const PREVIEW_PLACES: u32 = 20;

/// Editing one line item's adjustment amount.
#[derive(Debug, Clone)]
pub struct AdjustmentEditor {
    line_item: LineItem,
    input: String,
}

impl AdjustmentEditor {
    /// Start from the line item's current adjustment.
    pub fn open(line_item: LineItem) -> Self {
        let input = line_item.adjustment_amount.clone();
        AdjustmentEditor { line_item, input }
    }

    pub fn line_item(&self) -> &LineItem {
        &self.line_item
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Throw away the edit.
    pub fn cancel(&mut self) {
        self.input = self.line_item.adjustment_amount.clone();
    }

    fn adjustment(&self) -> Result<Decimal, ViewError> {
        let input = self.input.trim();
        if input.is_empty() {
            return Ok(Decimal::ZERO);
        }
        parse_amount(input)
            .ok_or_else(|| ViewError::new(format!("Invalid adjustment amount: {}", input)))
    }

    /// Final amount after saving: actual plus the typed adjustment (empty counts as 0).
    pub fn preview_final_amount(&self) -> Result<String, ViewError> {
        let actual = parse_amount(&self.line_item.actual_amount).ok_or_else(|| {
            ViewError::new(format!(
                "Invalid actual amount: {}",
                self.line_item.actual_amount
            ))
        })?;
        let total = actual
            .checked_add(self.adjustment()?)
            .ok_or_else(|| ViewError::new("Adjustment amount is out of range"))?;
        Ok(format_decimal(total, PREVIEW_PLACES))
    }

    /// Send the typed value to the server unchanged.
    pub async fn save(&self, api: &CampaignApi) -> Result<(), ViewError> {
        if self.input.trim().is_empty() {
            return Err(ViewError::new("Enter an adjustment amount"));
        }
        self.adjustment()?;
        api.update_adjustment(self.line_item.id, self.input.trim())
            .await
            .map_err(|e| ViewError::new(format!("Failed to update line item: {}", e)))?;
        info!(
            event_name = "line_item.adjusted",
            event_domain = "views",
            line_item_id = self.line_item.id,
            "adjustment saved"
        );
        Ok(())
    }

    pub fn render(&self) -> String {
        let item = &self.line_item;
        let mut out = String::new();
        let _ = writeln!(out, "Edit Line Item Adjustment");
        let _ = writeln!(out, "Line item:          #{} {}", item.id, item.name);
        let _ = writeln!(out, "Booked amount:      ${}", format_amount(&item.booked_amount, PREVIEW_PLACES));
        let _ = writeln!(out, "Actual amount:      ${}", format_amount(&item.actual_amount, PREVIEW_PLACES));
        let _ = writeln!(out, "Adjustment amount:  {}", self.input);
        match self.preview_final_amount() {
            Ok(amount) => {
                let _ = writeln!(out, "New final amount:   ${}", amount);
            }
            Err(e) => {
                let _ = writeln!(out, "New final amount:   ({})", e);
            }
        }
        out
    }
}

/// Set the adjustment of `line_item_id` in `campaign_id` to `amount` and
/// return the refreshed campaign.
pub async fn apply_adjustment(
    api: &CampaignApi,
    campaign_id: u64,
    line_item_id: u64,
    amount: &str,
) -> Result<(AdjustmentEditor, CampaignDetailView), ViewError> {
    let view = CampaignDetailView::load(api, campaign_id).await?;
    let line_item = view.detail.line_item(line_item_id).cloned().ok_or_else(|| {
        ViewError::new(format!(
            "Line item {} is not part of campaign {}",
            line_item_id, campaign_id
        ))
    })?;

    let mut editor = AdjustmentEditor::open(line_item);
    editor.set_input(amount);
    editor.save(api).await?;

    let refreshed = CampaignDetailView::load(api, campaign_id).await?;
    Ok((editor, refreshed))
}
