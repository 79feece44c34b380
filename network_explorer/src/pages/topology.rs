//! Topology page: one switchable glTF model whose overlay is a sectioned chat box.

use bevy::prelude::*;
use bevy::state::state_scoped::StateScoped;

use crate::camera::{CameraPose, CameraRig, OrbitBounds, OrbitCamera};
use crate::pages::{spawn_stage, Page};
use crate::scene::{load_model, PendingModels, Selectable, SelectionController};
use crate::ui::Overlay;

const MODEL_SCALE: f32 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TopologyModel {
    #[default]
    Bus,
    Ring,
}

impl TopologyModel {
    pub const ALL: [TopologyModel; 2] = [TopologyModel::Bus, TopologyModel::Ring];

    pub fn path(self) -> &'static str {
        match self {
            TopologyModel::Bus => "topologi/topologi-bus.glb",
            TopologyModel::Ring => "topologi/topologi-ring.glb",
        }
    }

    pub fn content_key(self) -> &'static str {
        match self {
            TopologyModel::Bus => "popup1",
            TopologyModel::Ring => "popup2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TopologyModel::Bus => "Topologi Bus",
            TopologyModel::Ring => "Topologi Ring",
        }
    }
}

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct TopologyState {
    pub current: TopologyModel,
}

/// Root entity of the shown topology model.
#[derive(Component)]
pub struct TopologyRoot;

#[derive(Event, Clone, Copy, Debug)]
pub struct SwitchTopology(pub TopologyModel);

pub fn topology_rig() -> CameraRig {
    let idle = OrbitBounds {
        min_distance: 10.0,
        max_distance: 120.0,
        ..default()
    };
    let focused = OrbitBounds {
        min_distance: 12.0,
        max_distance: 25.0,
        ..default()
    };
    CameraRig::new(
        CameraPose::new(Vec3::new(60.0, 10.0, 15.0), Vec3::ZERO),
        Vec3::splat(10.0),
    )
    .with_bounds(idle, focused)
}

pub fn topology_plugin(app: &mut App) {
    app.add_event::<SwitchTopology>()
        .add_systems(OnEnter(Page::Topology), setup_topology)
        .add_systems(OnExit(Page::Topology), |mut commands: Commands| {
            commands.remove_resource::<TopologyState>();
        })
        .add_systems(
            Update,
            switch_topology_system
                .run_if(in_state(Page::Topology).and(resource_exists::<CameraRig>)),
        );
}

fn setup_topology(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingModels>,
    mut controller: ResMut<SelectionController>,
) {
    let state = TopologyState::default();
    controller.pop_out = 0.0;
    spawn_stage(&mut commands, Page::Topology, topology_rig());
    spawn_topology(&mut commands, &asset_server, &mut pending, state.current);
    commands.insert_resource(state);
}

fn spawn_topology(
    commands: &mut Commands,
    asset_server: &AssetServer,
    pending: &mut PendingModels,
    model: TopologyModel,
) {
    let scene = load_model(asset_server, pending, model.path());
    commands.spawn((
        SceneRoot(scene),
        Transform::from_scale(Vec3::splat(MODEL_SCALE)),
        Selectable::new(model.content_key()),
        TopologyRoot,
        StateScoped(Page::Topology),
        Name::new(model.label()),
    ));
}

#[allow(clippy::too_many_arguments)]
fn switch_topology_system(
    mut commands: Commands,
    mut events: EventReader<SwitchTopology>,
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingModels>,
    mut state: ResMut<TopologyState>,
    mut controller: ResMut<SelectionController>,
    mut overlay: ResMut<Overlay>,
    mut rig: ResMut<CameraRig>,
    roots: Query<Entity, With<TopologyRoot>>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let Some(SwitchTopology(model)) = events.read().last().copied() else {
        return;
    };
    if model == state.current {
        return;
    }

    let was_focused = controller.active().is_some();
    for root in &roots {
        controller.forget_entity(root);
        commands.entity(root).despawn_recursive();
    }
    overlay.hide();
    if was_focused {
        for mut orbit in &mut cameras {
            rig.release(&mut orbit);
        }
    }

    state.current = model;
    spawn_topology(&mut commands, &asset_server, &mut pending, model);
    info!("switched topology to {}", model.label());
}
