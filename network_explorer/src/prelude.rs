//! Minimal prelude for SDK consumers.

pub use crate::config::{content_config, initial_page};
pub use crate::content::{
    ContentFetch, ContentFetcher, ContentRecord, FixtureFetcher, SheetsConfig, SheetsFetcher,
};
pub use crate::pages::Page;
pub use crate::sdk::NetworkExplorerBuilder;
