//! OSI page: seven stacked layer models; each one pops out when selected.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy::state::state_scoped::StateScoped;

use crate::camera::{CameraPose, CameraRig, OrbitBounds};
use crate::content::OsiLayer;
use crate::pages::{spawn_stage, Page};
use crate::scene::{load_model, PendingModels, Selectable, SelectionController};

const LAYER_SPACING: f32 = 3.0;
const LAYER_POP_OUT: f32 = 6.0;

#[derive(Component, Clone, Copy, Debug)]
pub struct OsiLayerModel(pub OsiLayer);

pub fn layer_path(layer: OsiLayer) -> String {
    format!("osi/layer{}.glb", layer.number())
}

/// Layer 1 sits on the ground; each layer above it is one spacing higher.
pub fn layer_height(layer: OsiLayer) -> f32 {
    (layer.number() - 1) as f32 * LAYER_SPACING
}

pub fn osi_rig() -> CameraRig {
    let idle = OrbitBounds {
        min_distance: 20.0,
        max_distance: 60.0,
        min_polar: 0.0,
        max_polar: FRAC_PI_2,
    };
    let focused = OrbitBounds {
        min_distance: 15.0,
        max_distance: 20.0,
        ..idle
    };
    CameraRig::new(
        CameraPose::new(Vec3::new(30.0, 12.0, 30.0), Vec3::new(0.0, 9.0, 0.0)),
        Vec3::splat(10.0),
    )
    .with_bounds(idle, focused)
}

pub fn osi_plugin(app: &mut App) {
    app.add_systems(OnEnter(Page::OsiLayer), setup_osi);
}

fn setup_osi(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingModels>,
    mut controller: ResMut<SelectionController>,
) {
    controller.pop_out = LAYER_POP_OUT;
    spawn_stage(&mut commands, Page::OsiLayer, osi_rig());

    for layer in OsiLayer::ALL {
        let path = layer_path(layer);
        let scene = load_model(&asset_server, &mut pending, &path);
        commands.spawn((
            SceneRoot(scene),
            Transform::from_xyz(0.0, layer_height(layer), 0.0),
            Selectable::new(layer.key()),
            OsiLayerModel(layer),
            StateScoped(Page::OsiLayer),
            Name::new(layer.label()),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_stack_upwards_from_the_physical_layer() {
        assert_eq!(layer_height(OsiLayer::Physical), 0.0);
        assert_eq!(layer_height(OsiLayer::Application), 18.0);
        assert_eq!(layer_path(OsiLayer::Transport), "osi/layer4.glb");
    }

    #[test]
    fn focus_on_top_layer_stays_above_the_ground() {
        let rig = osi_rig();
        let anchor = Vec3::new(0.0, layer_height(OsiLayer::Application), 0.0);
        let pose = rig.focus_pose(anchor);
        assert!(pose.eye.y >= anchor.y);
        assert!(rig.focused_bounds.contains(anchor, pose.eye));
    }
}
