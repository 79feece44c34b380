//! Google Sheets content source: dedicated thread + reqwest → ContentRecord.

use std::thread;

use bevy::log::{debug, error, info};
use crossbeam_channel::Receiver;
use serde::Deserialize;
use url::Url;

use crate::content::error::{ContentError, ContentFetch};
use crate::content::model::{ContentRecord, LayerEntry, NetworkModels, OsiLayer};
use crate::content::{ContentFetcher, SheetsConfig};

/// `popup1`, `popup2` side by side.
pub const POPUP_RANGE: &str = "Sheet1!A2:B2";
/// Seven `[title, description]` rows, physical layer first.
pub const OSI_RANGE: &str = "Sheet1!A5:B11";
/// Basic, hub and router descriptions, one per row.
pub const NETWORK_MODELS_RANGE: &str = "Sheet1!B14:B16";

/// Body of a `values.get` response. Sheets omits `values` for empty ranges.
#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl ValueRange {
    /// Sheets drops trailing empty cells and sends `[]` for a blank row, so a
    /// missing cell inside a present row reads as empty. A missing row is an error.
    fn cell(&self, range: &'static str, row: usize, col: usize) -> Result<String, ContentError> {
        let cells = self
            .values
            .get(row)
            .ok_or(ContentError::MissingCell { range, row, col })?;
        Ok(cells.get(col).cloned().unwrap_or_default())
    }
}

/// Reads the content ranges from Google Sheets.
pub struct SheetsFetcher {
    pub config: SheetsConfig,
}

impl SheetsFetcher {
    pub fn new(config: SheetsConfig) -> Self {
        Self { config }
    }
}

impl ContentFetcher for SheetsFetcher {
    fn spawn(&self) -> Receiver<ContentFetch> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let config = self.config.clone();
        thread::spawn(move || {
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(fetch_with_new_client(&config)),
                Err(err) => Err(ContentError::Runtime(err)),
            };
            if tx.send(result).is_err() {
                debug!("content receiver dropped before the fetch finished");
            }
        });
        rx
    }
}

pub fn build_client(config: &SheetsConfig) -> Result<reqwest::Client, ContentError> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(ContentError::Client)
}

async fn fetch_with_new_client(config: &SheetsConfig) -> ContentFetch {
    let client = build_client(config)?;
    try_fetch_content(&client, config).await
}

/// `{base}/v4/spreadsheets/{id}/values/{range}?key={api_key}`
pub fn range_url(config: &SheetsConfig, range: &str) -> Result<Url, ContentError> {
    let mut url = config.base_url.clone();
    url.path_segments_mut()
        .map_err(|_| ContentError::InvalidBaseUrl(config.base_url.clone()))?
        .pop_if_empty()
        .extend(["v4", "spreadsheets", config.spreadsheet_id.as_str(), "values", range]);
    url.query_pairs_mut().append_pair("key", &config.api_key);
    Ok(url)
}

async fn fetch_range(
    client: &reqwest::Client,
    config: &SheetsConfig,
    range: &'static str,
) -> Result<ValueRange, ContentError> {
    let url = range_url(config, range)?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ContentError::Request { range, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ContentError::Status { range, status });
    }

    response
        .json::<ValueRange>()
        .await
        .map_err(|source| ContentError::Decode { range, source })
}

/// Reads all three ranges. Any failure, including a missing row, fails the whole record.
pub async fn try_fetch_content(
    client: &reqwest::Client,
    config: &SheetsConfig,
) -> Result<ContentRecord, ContentError> {
    let popups = fetch_range(client, config, POPUP_RANGE).await?;
    let osi = fetch_range(client, config, OSI_RANGE).await?;
    let models = fetch_range(client, config, NETWORK_MODELS_RANGE).await?;

    let mut record = ContentRecord {
        popup1: popups.cell(POPUP_RANGE, 0, 0)?,
        popup2: popups.cell(POPUP_RANGE, 0, 1)?,
        network_models: NetworkModels {
            basic_network: models.cell(NETWORK_MODELS_RANGE, 0, 0)?,
            hub_network: models.cell(NETWORK_MODELS_RANGE, 1, 0)?,
            router_network: models.cell(NETWORK_MODELS_RANGE, 2, 0)?,
        },
        ..Default::default()
    };
    for (row, layer) in OsiLayer::ALL.into_iter().enumerate() {
        *record.layer_mut(layer) = LayerEntry {
            title: osi.cell(OSI_RANGE, row, 0)?,
            description: osi.cell(OSI_RANGE, row, 1)?,
        };
    }

    info!("fetched content for {} fields", record.fields().len());
    Ok(record)
}

/// Fail-closed fetch: any error is logged and replaced by the sentinel record.
pub async fn fetch_content(client: &reqwest::Client, config: &SheetsConfig) -> ContentRecord {
    match try_fetch_content(client, config).await {
        Ok(record) => record,
        Err(err) => {
            error!("failed to fetch content from Google Sheets: {err}");
            ContentRecord::error_fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config(base: &str) -> SheetsConfig {
        SheetsConfig {
            spreadsheet_id: "sheet-id".into(),
            api_key: "k3y".into(),
            base_url: base.parse().unwrap(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn range_url_places_range_in_path_and_key_in_query() {
        let url = range_url(&config("https://sheets.googleapis.com"), OSI_RANGE).unwrap();
        assert_eq!(url.host_str(), Some("sheets.googleapis.com"));
        assert!(url
            .path()
            .starts_with("/v4/spreadsheets/sheet-id/values/Sheet1"));
        assert!(url.path().ends_with("A5:B11"));
        assert_eq!(url.query(), Some("key=k3y"));
    }

    #[test]
    fn range_url_keeps_base_path_prefix() {
        let url = range_url(&config("http://127.0.0.1:9000/proxy/"), POPUP_RANGE).unwrap();
        assert!(url.path().starts_with("/proxy/v4/spreadsheets/"));
    }

    #[test]
    fn range_url_rejects_non_hierarchical_base() {
        let err = range_url(&config("mailto:someone@example.com"), POPUP_RANGE).unwrap_err();
        assert!(matches!(err, ContentError::InvalidBaseUrl(_)));
    }

    #[test]
    fn short_row_reads_missing_cells_as_empty() {
        let range: ValueRange = serde_json::from_str(r#"{"values": [["only"], []]}"#).unwrap();
        assert_eq!(range.cell(POPUP_RANGE, 0, 0).unwrap(), "only");
        assert_eq!(range.cell(POPUP_RANGE, 0, 1).unwrap(), "");
        assert_eq!(range.cell(POPUP_RANGE, 1, 0).unwrap(), "");
    }

    #[test]
    fn cell_reports_missing_rows() {
        let range: ValueRange = serde_json::from_str(r#"{"values": [["only"]]}"#).unwrap();
        assert!(matches!(
            range.cell(POPUP_RANGE, 1, 0),
            Err(ContentError::MissingCell { row: 1, col: 0, .. })
        ));
    }

    #[test]
    fn missing_values_field_is_empty_grid() {
        let range: ValueRange = serde_json::from_str(r#"{"range": "Sheet1!B14:B16"}"#).unwrap();
        assert!(range.values.is_empty());
    }
}
