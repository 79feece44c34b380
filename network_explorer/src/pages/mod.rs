//! Routes: one Bevy state per page, with state-scoped scene entities.
//!
//! Entering a page starts its content fetch, inserts its camera rig and
//! spawns its camera, lights and models. Leaving it despawns everything
//! scoped to the page and drops the page's resources, including the fetch
//! receiver.

pub mod osi;
pub mod topology;
pub mod transmission;

use std::str::FromStr;

use bevy::prelude::*;
use bevy::state::state_scoped::StateScoped;

use crate::camera::{page_camera, CameraRig};
use crate::content::{start_content_fetch, stop_content_fetch, FetcherResource};
use crate::scene::{ambient_light, page_lights, track_model_loads, PendingModels, SelectionController};
use crate::ui::Overlay;

#[derive(States, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Topology,
    OsiLayer,
    Transmission,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Topology, Page::OsiLayer, Page::Transmission];

    pub fn route(self) -> &'static str {
        match self {
            Page::Topology => "/topologijaringan",
            Page::OsiLayer => "/osilayer",
            Page::Transmission => "/transmisijaringan",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Topology => "Topologi Jaringan",
            Page::OsiLayer => "OSI Layer",
            Page::Transmission => "Transmisi Jaringan",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("no page at route {0:?}")]
pub struct UnknownRoute(pub String);

impl FromStr for Page {
    type Err = UnknownRoute;

    /// Accepts routes with or without the leading or trailing slash; `/` is the topology page.
    fn from_str(route: &str) -> Result<Self, Self::Err> {
        let normalized = route.trim().trim_matches('/').to_ascii_lowercase();
        if normalized.is_empty() {
            return Ok(Page::Topology);
        }
        Page::ALL
            .into_iter()
            .find(|page| page.route().trim_start_matches('/') == normalized)
            .ok_or_else(|| UnknownRoute(route.to_string()))
    }
}

/// Requires the `Page` state to be inserted already.
pub fn pages_plugin(app: &mut App) {
    app.init_resource::<PendingModels>()
        .add_systems(Update, track_model_loads)
        .add_plugins((
            page_lifecycle_plugin,
            topology::topology_plugin,
            osi::osi_plugin,
            transmission::transmission_plugin,
        ));
}

/// Content fetch on enter; fetch stop, despawn and resource teardown on exit.
fn page_lifecycle_plugin(app: &mut App) {
    app.enable_state_scoped_entities::<Page>();
    for page in Page::ALL {
        app.add_systems(
            OnEnter(page),
            start_content_fetch.run_if(resource_exists::<FetcherResource>),
        )
        .add_systems(OnExit(page), (stop_content_fetch, teardown_page));
    }
}

/// Camera, lights and rig for a page. Everything spawned is scoped to `page`.
pub fn spawn_stage(commands: &mut Commands, page: Page, rig: CameraRig) {
    commands.spawn((page_camera(&rig), StateScoped(page)));
    commands.spawn((page_lights(), StateScoped(page)));
    commands.insert_resource(ambient_light());
    commands.insert_resource(rig);
    info!("entered {}", page.route());
}

fn teardown_page(
    mut commands: Commands,
    mut controller: ResMut<SelectionController>,
    mut overlay: ResMut<Overlay>,
    mut pending: ResMut<PendingModels>,
) {
    controller.forget();
    overlay.hide();
    pending.clear();
    commands.remove_resource::<CameraRig>();
}
