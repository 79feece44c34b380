use std::path::{Path, PathBuf};

use bevy::prelude::*;
use crossbeam_channel::Receiver;

use crate::content::error::{ContentError, ContentFetch};
use crate::content::model::ContentRecord;
use crate::content::ContentFetcher;

/// Bevy resource holding the receiving end of the current page's fetch.
/// Removed on page teardown, which drops the receiver and orphans any
/// fetch still in flight.
#[derive(Resource)]
pub struct ContentChannel(pub Receiver<ContentFetch>);

/// Bevy resource wrapping the fetcher pages use to start a fetch.
#[derive(Resource)]
pub struct FetcherResource(pub Box<dyn ContentFetcher>);

impl FetcherResource {
    pub fn new(fetcher: impl ContentFetcher) -> Self {
        Self(Box::new(fetcher))
    }
}

/// Where the current page's content stands.
#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub enum ContentState {
    Pending,
    Ready(ContentRecord),
    /// `record` is the sentinel record, so overlays still have text to show.
    Failed {
        record: ContentRecord,
        reason: String,
    },
}

impl ContentState {
    pub fn from_fetch(fetch: ContentFetch) -> Self {
        match fetch {
            Ok(record) => ContentState::Ready(record),
            Err(err) => ContentState::Failed {
                record: ContentRecord::error_fallback(),
                reason: err.to_string(),
            },
        }
    }

    /// The record to display, or `None` while the fetch is pending.
    pub fn record(&self) -> Option<&ContentRecord> {
        match self {
            ContentState::Pending => None,
            ContentState::Ready(record) | ContentState::Failed { record, .. } => Some(record),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ContentState::Pending)
    }
}

/// Bevy resource: write each successfully fetched record to a fixture file.
#[derive(Resource)]
pub struct ContentRecorder {
    pub path: PathBuf,
}

/// Serialize a record to `path` as pretty JSON, creating parent directories.
pub fn record_content(path: &Path, record: &ContentRecord) -> Result<(), ContentError> {
    let json = serde_json::to_string_pretty(record)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ContentError::FixtureIo {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, json).map_err(|source| ContentError::FixtureIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a record previously written by [`record_content`].
pub fn load_fixture(path: &Path) -> ContentFetch {
    let json = std::fs::read_to_string(path).map_err(|source| ContentError::FixtureIo {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Replays a recorded content fixture instead of hitting the network.
pub struct FixtureFetcher {
    pub path: PathBuf,
}

impl ContentFetcher for FixtureFetcher {
    fn spawn(&self) -> Receiver<ContentFetch> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let path = self.path.clone();
        std::thread::spawn(move || {
            if tx.send(load_fixture(&path)).is_err() {
                debug!("content receiver dropped before the fixture was replayed");
            }
        });
        rx
    }
}

/// Request a fresh fetch for the current page.
#[derive(Event, Default)]
pub struct ReloadContent;

pub fn content_plugin(app: &mut App) {
    app.add_event::<ReloadContent>().add_systems(
        Update,
        (
            reload_content_system.run_if(resource_exists::<FetcherResource>),
            ingest_content.run_if(resource_exists::<ContentChannel>),
        )
            .chain(),
    );
}

/// Starts a fetch and marks content pending. Runs on page enter.
pub fn start_content_fetch(mut commands: Commands, fetcher: Res<FetcherResource>) {
    commands.insert_resource(ContentChannel(fetcher.0.spawn()));
    commands.insert_resource(ContentState::Pending);
}

/// Drops the page's channel and content. Runs on page exit.
pub fn stop_content_fetch(mut commands: Commands) {
    commands.remove_resource::<ContentChannel>();
    commands.remove_resource::<ContentState>();
}

fn reload_content_system(
    mut events: EventReader<ReloadContent>,
    commands: Commands,
    fetcher: Res<FetcherResource>,
    state: Option<Res<ContentState>>,
) {
    if events.read().count() == 0 || state.is_none() {
        return;
    }
    info!("reloading page content");
    start_content_fetch(commands, fetcher);
}

/// Moves a delivered fetch into `ContentState`. The channel is single-shot,
/// so it is removed once drained.
pub fn ingest_content(
    mut commands: Commands,
    channel: Res<ContentChannel>,
    recorder: Option<Res<ContentRecorder>>,
) {
    let fetch = match channel.0.try_recv() {
        Ok(fetch) => fetch,
        Err(crossbeam_channel::TryRecvError::Empty) => return,
        Err(crossbeam_channel::TryRecvError::Disconnected) => {
            warn!("content fetcher exited without a result");
            commands.remove_resource::<ContentChannel>();
            commands.insert_resource(ContentState::Failed {
                record: ContentRecord::error_fallback(),
                reason: "content fetcher exited without a result".to_string(),
            });
            return;
        }
    };

    if let Err(err) = &fetch {
        error!("content unavailable, showing fallback text: {err}");
    }
    if let (Ok(record), Some(recorder)) = (&fetch, recorder) {
        match record_content(&recorder.path, record) {
            Ok(()) => info!("recorded content to {}", recorder.path.display()),
            Err(err) => warn!("failed to record content: {err}"),
        }
    }

    commands.remove_resource::<ContentChannel>();
    commands.insert_resource(ContentState::from_fetch(fetch));
}
