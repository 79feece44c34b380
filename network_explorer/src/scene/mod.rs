pub(crate) mod interaction;
pub(crate) mod materials;
pub(crate) mod models;
pub(crate) mod picking;
pub(crate) mod selection;

use bevy::prelude::*;

pub use interaction::{interaction_plugin, resolve_click, ClickOutcome};
pub use models::{load_model, track_model_loads, PendingModels};
pub use picking::SelectionClicked;
pub use selection::{
    FocusPhase, Selectable, SelectionChange, SelectionController, TransformAccess,
};

/// Lights shared by every page: soft ambient fill plus one point light.
pub fn page_lights() -> impl Bundle {
    (
        PointLight {
            intensity: 4_000_000.0,
            range: 200.0,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0),
    )
}

pub fn ambient_light() -> AmbientLight {
    AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    }
}
