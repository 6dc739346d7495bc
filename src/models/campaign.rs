use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize)]
#[serde(untagged)]
enum WireAmount {
    Text(String),
    Number(serde_json::Number),
}

/// Amounts arrive as decimal strings or as JSON numbers depending on the
/// serializer field. Both are kept as the text the server wrote.
fn amount<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match WireAmount::deserialize(deserializer)? {
        WireAmount::Text(text) => text,
        WireAmount::Number(number) => number.to_string(),
    })
}

/// A row of the campaign list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Campaign {
    pub id: u64,
    pub name: String,
    pub created_at: String,
    #[serde(deserialize_with = "amount")]
    pub potential_invoice_amount: String,
    /// Percent of the booked budget delivered.
    #[serde(rename = "budget_fullfillment_rate")]
    pub budget_fulfillment_rate: i64,
}

/// A campaign with all of its line items.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CampaignDetail {
    pub id: u64,
    pub name: String,
    pub created_at: String,
    #[serde(deserialize_with = "amount")]
    pub potential_invoice_amount: String,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl CampaignDetail {
    pub fn line_item(&self, id: u64) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id == id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: u64,
    pub name: String,
    #[serde(deserialize_with = "amount")]
    pub booked_amount: String,
    #[serde(deserialize_with = "amount")]
    pub actual_amount: String,
    #[serde(deserialize_with = "amount")]
    pub adjustment_amount: String,
    #[serde(deserialize_with = "amount")]
    pub final_amount: String,
    #[serde(rename = "budget_fullfillment_rate")]
    pub budget_fulfillment_rate: i64,
    pub created_at: String,
    pub updated_at: String,
}
