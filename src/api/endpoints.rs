//! Backend paths, relative to the API base URL.

/// Session probe. Also the request that makes the server set the CSRF cookie.
pub const PING_PONG: &str = "/api/ping_pong/";
pub const LOGIN: &str = "/api/login/";
pub const LOGOUT: &str = "/api/logout/";
pub const CAMPAIGNS_CSV: &str = "/api/campaign/csv/";

pub fn campaigns_page(page: u32) -> String {
    format!("/api/campaign/?page={}", page)
}

pub fn campaign(id: u64) -> String {
    format!("/api/campaign/{}/", id)
}

pub fn line_item(id: u64) -> String {
    format!("/api/line_item/{}/", id)
}

pub fn line_items_csv(campaign_id: u64) -> String {
    format!("/api/campaign/{}/line_item/csv/", campaign_id)
}
