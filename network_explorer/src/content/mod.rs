mod channel;
mod error;
mod model;
mod sections;
pub mod sheets;

use std::time::Duration;

use crossbeam_channel::Receiver;
use url::Url;

pub use channel::{
    content_plugin, ingest_content, load_fixture, record_content, start_content_fetch,
    stop_content_fetch, ContentChannel, ContentRecorder, ContentState, FetcherResource,
    FixtureFetcher, ReloadContent,
};
pub use error::{ContentError, ContentFetch};
pub use model::{
    ContentKey, ContentRecord, LayerEntry, NetworkModel, NetworkModels, OsiLayer,
    OverlayContent, ERROR_SENTINEL,
};
pub use sections::{parse_sections, Sections, ADVANTAGES_LABEL, DISADVANTAGES_LABEL};
pub use sheets::{build_client, fetch_content, range_url, try_fetch_content, SheetsFetcher};

/// Where and how to read the content spreadsheet.
#[derive(Clone, Debug)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub api_key: String,
    pub base_url: Url,
    pub timeout: Duration,
}

/// Interface for content sources. Each call starts one fetch and returns the
/// receiver its single result arrives on.
pub trait ContentFetcher: Send + Sync + 'static {
    fn spawn(&self) -> Receiver<ContentFetch>;
}
