//! Networking-concepts explorer: interactive 3D scenes of network topologies,
//! the OSI model and transmission models, with explanatory text read from a
//! Google Sheets spreadsheet.
//!
//! Library root: content source, pages, SDK builder and config modules.

mod camera;
pub mod config;
pub mod content;
pub mod pages;
mod scene;
mod ui;

pub mod prelude;
pub mod sdk;

pub use camera::{CameraPose, CameraRig, CameraTween, OrbitBounds, OrbitCamera};
pub use content::{ContentFetch, ContentFetcher, ContentRecord, ContentState, SheetsConfig};
pub use pages::Page;
pub use scene::{
    resolve_click, ClickOutcome, FocusPhase, Selectable, SelectionClicked, SelectionController,
    TransformAccess,
};
pub use ui::{CloseOverlay, Overlay};
