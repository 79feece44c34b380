use std::sync::{Arc, Mutex};

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};

use network_explorer::content::{
    content_plugin, start_content_fetch, stop_content_fetch, ContentChannel, ContentFetch,
    ContentFetcher, ContentRecord, ContentState, FetcherResource, ReloadContent,
};

/// Hands the sending half to the test so it decides when the fetch "completes".
#[derive(Clone, Default)]
struct GatedFetcher {
    senders: Arc<Mutex<Vec<Sender<ContentFetch>>>>,
}

impl GatedFetcher {
    fn take_latest(&self) -> Sender<ContentFetch> {
        self.senders.lock().unwrap().pop().expect("a fetch was started")
    }

    fn started(&self) -> usize {
        self.senders.lock().unwrap().len()
    }
}

impl ContentFetcher for GatedFetcher {
    fn spawn(&self) -> Receiver<ContentFetch> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.senders.lock().unwrap().push(tx);
        rx
    }
}

fn record() -> ContentRecord {
    ContentRecord {
        popup1: "Topologi Bus".into(),
        ..Default::default()
    }
}

fn app_with(fetcher: &GatedFetcher) -> App {
    let mut app = App::new();
    app.add_plugins(content_plugin)
        .insert_resource(FetcherResource::new(fetcher.clone()));
    app
}

#[test]
fn delivered_fetch_becomes_ready() {
    let fetcher = GatedFetcher::default();
    let mut app = app_with(&fetcher);

    app.world_mut().run_system_once(start_content_fetch).unwrap();
    app.update();
    assert!(app.world().resource::<ContentState>().is_pending());

    fetcher.take_latest().send(Ok(record())).unwrap();
    app.update();

    assert_eq!(
        app.world().resource::<ContentState>(),
        &ContentState::Ready(record())
    );
    assert!(app.world().get_resource::<ContentChannel>().is_none());
}

#[test]
fn teardown_while_pending_writes_no_state() {
    let fetcher = GatedFetcher::default();
    let mut app = app_with(&fetcher);

    app.world_mut().run_system_once(start_content_fetch).unwrap();
    app.update();
    let late = fetcher.take_latest();

    app.world_mut().run_system_once(stop_content_fetch).unwrap();
    app.update();

    assert!(late.send(Ok(record())).is_err(), "receiver should be gone");
    app.update();
    assert!(app.world().get_resource::<ContentState>().is_none());
    assert!(app.world().get_resource::<ContentChannel>().is_none());
}

#[test]
fn fetcher_exiting_without_result_marks_failure() {
    let fetcher = GatedFetcher::default();
    let mut app = app_with(&fetcher);

    app.world_mut().run_system_once(start_content_fetch).unwrap();
    drop(fetcher.take_latest());
    app.update();

    let state = app.world().resource::<ContentState>();
    assert!(matches!(state, ContentState::Failed { .. }));
    assert_eq!(state.record(), Some(&ContentRecord::error_fallback()));
}

#[test]
fn reload_starts_a_fresh_fetch() {
    let fetcher = GatedFetcher::default();
    let mut app = app_with(&fetcher);

    app.world_mut().run_system_once(start_content_fetch).unwrap();
    fetcher.take_latest().send(Ok(record())).unwrap();
    app.update();
    assert_eq!(fetcher.started(), 0);

    app.world_mut().send_event(ReloadContent);
    app.update();

    assert_eq!(fetcher.started(), 1);
    assert!(app.world().resource::<ContentState>().is_pending());
}

#[test]
fn reload_without_a_page_is_ignored() {
    let fetcher = GatedFetcher::default();
    let mut app = app_with(&fetcher);

    app.world_mut().send_event(ReloadContent);
    app.update();

    assert_eq!(fetcher.started(), 0);
    assert!(app.world().get_resource::<ContentState>().is_none());
}
