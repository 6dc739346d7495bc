use std::path::{Path, PathBuf};

use tracing::info;

use super::ViewError;
use crate::api::CampaignApi;
use crate::http::ApiResponse;

const CAMPAIGNS_DEFAULT: &str = "campaigns_export.csv";

/// A CSV file saved to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Pull the file name out of a `Content-Disposition` value.
///
/// Accepts `filename="x.csv"` and `filename=x.csv`. Directory parts are
/// dropped so the file always lands in the export directory.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    const KEY: &str = "filename=";
    let start = header.find(KEY)? + KEY.len();
    let rest = &header[start..];
    let raw = match rest.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next()?,
        None => rest.split(';').next()?.trim(),
    };

    let name = raw.rsplit(['/', '\\']).next()?.trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}

async fn save(response: ApiResponse, default_name: String, dir: &Path) -> Result<CsvDownload, ViewError> {
    let name = response
        .header("content-disposition")
        .and_then(filename_from_disposition)
        .unwrap_or(default_name);
    let path = dir.join(name);

    tokio::fs::write(&path, &response.body)
        .await
        .map_err(|e| ViewError::new(format!("Failed to save {}: {}", path.display(), e)))?;

    info!(
        event_name = "csv.saved",
        event_domain = "views",
        path = %path.display(),
        bytes = response.body.len(),
        "CSV export written"
    );
    Ok(CsvDownload {
        bytes: response.body.len(),
        path,
    })
}

/// Export every campaign into `dir`.
pub async fn export_campaigns(api: &CampaignApi, dir: &Path) -> Result<CsvDownload, ViewError> {
    let response = api
        .export_campaigns_csv()
        .await
        .map_err(|e| ViewError::new(format!("Failed to download CSV: {}", e)))?;
    save(response, CAMPAIGNS_DEFAULT.to_string(), dir).await
}

/// Export the line items of one campaign into `dir`.
pub async fn export_line_items(
    api: &CampaignApi,
    campaign_id: u64,
    dir: &Path,
) -> Result<CsvDownload, ViewError> {
    let response = api
        .export_line_items_csv(campaign_id)
        .await
        .map_err(|e| ViewError::new(format!("Failed to download line items CSV: {}", e)))?;
    save(response, format!("line_items_export_{}.csv", campaign_id), dir).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints;
    use crate::auth::AuthenticatedFetch;
    use crate::config::ApiConfig;
    use crate::cookies::{CookieStore, MemoryCookieStore};
    use crate::http::fake::{FakeHttpClient, Reply};
    use http::Method;
    use std::sync::Arc;

    fn api() -> (Arc<FakeHttpClient>, CampaignApi) {
        let jar = Arc::new(MemoryCookieStore::new());
        jar.apply_set_cookie("csrftoken=tok");
        let fake = Arc::new(FakeHttpClient::new(jar));
        let fetch = Arc::new(
            AuthenticatedFetch::from_config(fake.clone(), fake.cookies.clone(), &ApiConfig::default())
                .unwrap(),
        );
        (fake, CampaignApi::new(fetch))
    }

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"campaigns.csv\"").as_deref(),
            Some("campaigns.csv")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=report.csv; size=12").as_deref(),
            Some("report.csv")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=\"../../etc/passwd\"").as_deref(),
            Some("passwd")
        );
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
    }

    #[tokio::test]
    async fn test_export_campaigns_uses_server_name() {
        let dir = tempfile::tempdir().unwrap();
        let (fake, api) = api();
        fake.on(
            Method::POST,
            endpoints::CAMPAIGNS_CSV,
            Reply::status(200)
                .header("content-disposition", "attachment; filename=\"all_campaigns.csv\"")
                .body("id,name\n1,Spring\n"),
        );

        let download = export_campaigns(&api, dir.path()).await.expect("download");
        assert_eq!(download.path, dir.path().join("all_campaigns.csv"));
        assert_eq!(download.bytes, 17);
        assert_eq!(
            std::fs::read_to_string(&download.path).unwrap(),
            "id,name\n1,Spring\n"
        );

        let sent = fake.requests().pop().unwrap();
        assert_eq!(sent.headers.get("x-csrftoken").unwrap(), "tok");
    }

    #[tokio::test]
    async fn test_export_line_items_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let (fake, api) = api();
        fake.on(
            Method::POST,
            &endpoints::line_items_csv(7),
            Reply::status(200).body("id\n"),
        );

        let download = export_line_items(&api, 7, dir.path()).await.expect("download");
        assert_eq!(download.path, dir.path().join("line_items_export_7.csv"));
    }

    #[tokio::test]
    async fn test_export_failures() {
        let dir = tempfile::tempdir().unwrap();
        let (fake, api) = api();
        fake.on(Method::POST, endpoints::CAMPAIGNS_CSV, Reply::status(500));

        let err = export_campaigns(&api, dir.path()).await.unwrap_err();
        assert_eq!(err.message(), "Failed to download CSV: Internal Server Error");

        let err = export_line_items(&api, 7, dir.path()).await.unwrap_err();
        assert_eq!(err.message(), "Failed to download line items CSV: Not Found");
    }
}
