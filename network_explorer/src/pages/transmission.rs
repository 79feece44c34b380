//! Transmission page: three procedural network models with a packet
//! travelling their links, plus a toggleable description.

use bevy::prelude::*;
use bevy::state::state_scoped::StateScoped;

use crate::camera::{CameraPose, CameraRig, OrbitBounds};
use crate::content::{ContentState, NetworkModel, OverlayContent};
use crate::pages::{spawn_stage, Page};
use crate::scene::materials::{
    flat_material, LINK_WHITE, NODE_BLUE, NODE_GREEN, PACKET_RED, ROUTER_RED,
};
use crate::ui::Overlay;

const NODE_RADIUS: f32 = 0.3;
const PACKET_RADIUS: f32 = 0.1;
const ROUTER_SIZE: f32 = 1.0;
/// Fraction of the full link cycle covered per second.
const PACKET_SPEED: f32 = 0.6;
const RING: [Vec3; 4] = [
    Vec3::new(3.0, 0.0, 0.0),
    Vec3::new(0.0, 3.0, 0.0),
    Vec3::new(-3.0, 0.0, 0.0),
    Vec3::new(0.0, -3.0, 0.0),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
    Sphere,
    Cube,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeSpec {
    pub position: Vec3,
    pub shape: NodeShape,
    pub color: Color,
}

impl NodeSpec {
    fn sphere(position: Vec3, color: Color) -> Self {
        Self {
            position,
            shape: NodeShape::Sphere,
            color,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModelLayout {
    pub nodes: Vec<NodeSpec>,
    pub links: Vec<(Vec3, Vec3)>,
}

/// Nodes and links of one network model. Every model has four links.
pub fn layout(model: NetworkModel) -> ModelLayout {
    let star = |center: NodeSpec, leaf: Color| ModelLayout {
        nodes: std::iter::once(center)
            .chain(RING.iter().map(|p| NodeSpec::sphere(*p, leaf)))
            .collect(),
        links: RING.iter().map(|p| (Vec3::ZERO, *p)).collect(),
    };

    match model {
        NetworkModel::Basic => ModelLayout {
            nodes: RING.iter().map(|p| NodeSpec::sphere(*p, NODE_GREEN)).collect(),
            links: (0..RING.len())
                .map(|i| (RING[i], RING[(i + 1) % RING.len()]))
                .collect(),
        },
        NetworkModel::Hub => star(NodeSpec::sphere(Vec3::ZERO, NODE_BLUE), NODE_BLUE),
        NetworkModel::Router => star(
            NodeSpec {
                position: Vec3::ZERO,
                shape: NodeShape::Cube,
                color: ROUTER_RED,
            },
            NODE_GREEN,
        ),
    }
}

/// Packet position for `progress` in `[0, 1)`: link `floor(progress * n)`
/// at fraction `fract(progress * n)`.
pub fn packet_position(links: &[(Vec3, Vec3)], progress: f32) -> Option<Vec3> {
    if links.is_empty() {
        return None;
    }
    let scaled = progress.clamp(0.0, 1.0) * links.len() as f32;
    let index = (scaled.floor() as usize).min(links.len() - 1);
    let t = scaled - index as f32;
    let (start, end) = links[index];
    Some(start.lerp(end, t))
}

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct TransmissionState {
    pub model: NetworkModel,
    pub progress: f32,
}

impl TransmissionState {
    pub fn advance(&mut self, dt: f32) {
        self.progress += dt * PACKET_SPEED;
        if self.progress > 1.0 {
            self.progress = 0.0;
        }
    }
}

/// Root of the spawned network model.
#[derive(Component)]
pub struct TransmissionModel;

#[derive(Component, Clone, Debug, Default)]
pub struct NetworkLinks(pub Vec<(Vec3, Vec3)>);

#[derive(Component)]
pub struct DataPacket;

#[derive(Event, Clone, Copy, Debug)]
pub struct SwitchNetworkModel(pub NetworkModel);

#[derive(Event, Clone, Copy, Debug, Default)]
pub struct ToggleDescription;

pub fn transmission_rig() -> CameraRig {
    let bounds = OrbitBounds {
        min_distance: 2.0,
        max_distance: 50.0,
        ..default()
    };
    CameraRig::new(
        CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO),
        Vec3::new(0.0, 0.0, 10.0),
    )
    .with_bounds(bounds, bounds)
}

pub fn transmission_plugin(app: &mut App) {
    app.add_event::<SwitchNetworkModel>()
        .add_event::<ToggleDescription>()
        .add_systems(OnEnter(Page::Transmission), setup_transmission)
        .add_systems(OnExit(Page::Transmission), |mut commands: Commands| {
            commands.remove_resource::<TransmissionState>();
        })
        .add_systems(
            Update,
            (
                switch_model_system,
                toggle_description_system,
                move_packet_system,
                draw_links_system,
            )
                .chain()
                .run_if(in_state(Page::Transmission).and(resource_exists::<TransmissionState>)),
        );
}

fn setup_transmission(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let state = TransmissionState::default();
    spawn_stage(&mut commands, Page::Transmission, transmission_rig());
    spawn_network(&mut commands, &mut meshes, &mut materials, state.model);

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(PACKET_RADIUS))),
        MeshMaterial3d(flat_material(&mut materials, PACKET_RED)),
        Transform::from_translation(RING[0]),
        DataPacket,
        StateScoped(Page::Transmission),
    ));
    commands.insert_resource(state);
}

fn spawn_network(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    model: NetworkModel,
) {
    let ModelLayout { nodes, links } = layout(model);
    commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            NetworkLinks(links),
            TransmissionModel,
            StateScoped(Page::Transmission),
            Name::new(model.title()),
        ))
        .with_children(|parent| {
            for node in nodes {
                let mesh = match node.shape {
                    NodeShape::Sphere => meshes.add(Sphere::new(NODE_RADIUS)),
                    NodeShape::Cube => meshes.add(Cuboid::from_length(ROUTER_SIZE)),
                };
                parent.spawn((
                    Mesh3d(mesh),
                    MeshMaterial3d(flat_material(materials, node.color)),
                    Transform::from_translation(node.position),
                ));
            }
        });
}

#[allow(clippy::too_many_arguments)]
fn switch_model_system(
    mut commands: Commands,
    mut events: EventReader<SwitchNetworkModel>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut state: ResMut<TransmissionState>,
    mut overlay: ResMut<Overlay>,
    content: Option<Res<ContentState>>,
    roots: Query<Entity, With<TransmissionModel>>,
) {
    let Some(SwitchNetworkModel(model)) = events.read().last().copied() else {
        return;
    };
    if model == state.model {
        return;
    }

    for root in &roots {
        commands.entity(root).despawn_recursive();
    }
    spawn_network(&mut commands, &mut meshes, &mut materials, model);
    *state = TransmissionState { model, progress: 0.0 };

    if overlay.is_visible() {
        match content.as_deref().and_then(ContentState::record) {
            Some(record) => overlay.show(
                model.key(),
                OverlayContent::Text(record.network_model(model).to_string()),
            ),
            None => overlay.hide(),
        }
    }
    info!("switched to {}", model.title());
}

fn toggle_description_system(
    mut events: EventReader<ToggleDescription>,
    state: Res<TransmissionState>,
    content: Option<Res<ContentState>>,
    mut overlay: ResMut<Overlay>,
) {
    // Two toggles in one frame cancel out.
    if events.read().count() % 2 == 0 {
        return;
    }
    if overlay.is_visible() {
        overlay.hide();
        return;
    }
    match content.as_deref().and_then(ContentState::record) {
        Some(record) => {
            overlay.show(
                state.model.key(),
                OverlayContent::Text(record.network_model(state.model).to_string()),
            )
        }
        None => warn!("content not loaded yet, no description to show"),
    }
}

fn move_packet_system(
    time: Res<Time>,
    mut state: ResMut<TransmissionState>,
    links: Query<&NetworkLinks, With<TransmissionModel>>,
    mut packets: Query<&mut Transform, With<DataPacket>>,
) {
    state.advance(time.delta_secs());
    let Ok(NetworkLinks(links)) = links.get_single() else {
        return;
    };
    let Some(position) = packet_position(links, state.progress) else {
        return;
    };
    for mut transform in &mut packets {
        transform.translation = position;
    }
}

fn draw_links_system(mut gizmos: Gizmos, links: Query<&NetworkLinks, With<TransmissionModel>>) {
    for NetworkLinks(links) in &links {
        for (start, end) in links {
            gizmos.line(*start, *end, LINK_WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_model_has_four_links() {
        for model in NetworkModel::ALL {
            assert_eq!(layout(model).links.len(), 4, "{model:?}");
        }
    }

    #[test]
    fn basic_network_is_a_closed_ring_of_green_nodes() {
        let basic = layout(NetworkModel::Basic);
        assert_eq!(basic.nodes.len(), 4);
        assert!(basic.nodes.iter().all(|n| n.color == NODE_GREEN));
        assert_eq!(basic.links.last().unwrap().1, basic.links[0].0);
    }

    #[test]
    fn router_network_centres_a_red_cube() {
        let router = layout(NetworkModel::Router);
        assert_eq!(router.nodes.len(), 5);
        assert_eq!(router.nodes[0].shape, NodeShape::Cube);
        assert_eq!(router.nodes[0].color, ROUTER_RED);
        assert!(router.links.iter().all(|(start, _)| *start == Vec3::ZERO));
    }

    #[test]
    fn packet_walks_links_in_order() {
        let links = layout(NetworkModel::Basic).links;
        assert_eq!(packet_position(&links, 0.0), Some(RING[0]));
        assert_eq!(packet_position(&links, 0.25), Some(RING[1]));
        let halfway = packet_position(&links, 0.125).unwrap();
        assert!(halfway.abs_diff_eq(RING[0].lerp(RING[1], 0.5), 1e-5));
        assert_eq!(packet_position(&links, 1.0), Some(RING[0]));
        assert_eq!(packet_position(&[], 0.5), None);
    }

    #[test]
    fn progress_wraps_past_one() {
        let mut state = TransmissionState {
            progress: 0.9,
            ..default()
        };
        state.advance(0.5);
        assert_eq!(state.progress, 0.0);
        state.advance(0.5);
        assert!((state.progress - 0.3).abs() < 1e-6);
    }
}
