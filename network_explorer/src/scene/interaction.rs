//! Click → selection → overlay + camera focus, and the reverse on close.

use bevy::prelude::*;

use crate::camera::{CameraRig, OrbitCamera};
use crate::content::{ContentState, OverlayContent};
use crate::scene::picking::{pick_selectable_system, SelectionClicked};
use crate::scene::selection::{
    Selectable, SelectionChange, SelectionController, TransformAccess,
};
use crate::ui::{CloseOverlay, Overlay};

/// How a click was resolved against the controller and the page content.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    Show { content: OverlayContent, anchor: Vec3 },
    /// The active object was clicked again and has been restored.
    Hide,
    /// Content has not arrived yet; nothing changed.
    NotReady,
    /// The record has no entry for the key; nothing changed.
    Missing,
    Ignored,
}

/// Applies one click to the controller. Content is looked up before any
/// transform is touched so a miss leaves the scene as it was.
pub fn resolve_click(
    controller: &mut SelectionController,
    content: Option<&ContentState>,
    click: &SelectionClicked,
    transforms: &mut impl TransformAccess,
) -> ClickOutcome {
    if controller.active() == Some(click.entity) {
        controller.clear(transforms);
        return ClickOutcome::Hide;
    }

    let Some(record) = content.and_then(ContentState::record) else {
        return ClickOutcome::NotReady;
    };
    let Some(overlay) = record.lookup(&click.key) else {
        return ClickOutcome::Missing;
    };

    match controller.select(click.entity, transforms) {
        SelectionChange::Selected { anchor, .. } => ClickOutcome::Show {
            content: overlay,
            anchor,
        },
        _ => ClickOutcome::Ignored,
    }
}

pub fn interaction_plugin(app: &mut App) {
    app.init_resource::<SelectionController>()
        .init_resource::<Overlay>()
        .add_event::<SelectionClicked>()
        .add_event::<CloseOverlay>()
        .add_systems(
            Update,
            (
                pick_selectable_system,
                apply_selection_clicks,
                dismiss_on_escape,
                close_selection_system,
            )
                .chain()
                .run_if(resource_exists::<CameraRig>),
        );
}

#[allow(clippy::type_complexity)]
fn apply_selection_clicks(
    mut clicks: EventReader<SelectionClicked>,
    content: Option<Res<ContentState>>,
    mut controller: ResMut<SelectionController>,
    mut overlay: ResMut<Overlay>,
    mut rig: ResMut<CameraRig>,
    mut cameras: Query<&mut OrbitCamera>,
    mut transforms: Query<&mut Transform, (With<Selectable>, Without<OrbitCamera>)>,
) {
    for click in clicks.read() {
        match resolve_click(&mut controller, content.as_deref(), click, &mut transforms) {
            ClickOutcome::Show {
                content: shown,
                anchor,
            } => {
                overlay.show(click.key.clone(), shown);
                for mut orbit in &mut cameras {
                    rig.engage(&mut orbit, anchor);
                }
            }
            ClickOutcome::Hide => {
                overlay.hide();
                for mut orbit in &mut cameras {
                    rig.release(&mut orbit);
                }
            }
            ClickOutcome::NotReady => warn!("content not loaded yet, ignoring click on {}", click.key),
            ClickOutcome::Missing => error!("content not found for {}", click.key),
            ClickOutcome::Ignored => {}
        }
    }
}

fn dismiss_on_escape(keys: Res<ButtonInput<KeyCode>>, mut close: EventWriter<CloseOverlay>) {
    if keys.just_pressed(KeyCode::Escape) {
        close.send(CloseOverlay);
    }
}

#[allow(clippy::type_complexity)]
fn close_selection_system(
    mut events: EventReader<CloseOverlay>,
    mut controller: ResMut<SelectionController>,
    mut overlay: ResMut<Overlay>,
    mut rig: ResMut<CameraRig>,
    mut cameras: Query<&mut OrbitCamera>,
    mut transforms: Query<&mut Transform, (With<Selectable>, Without<OrbitCamera>)>,
) {
    if events.read().count() == 0 {
        return;
    }
    overlay.hide();
    if controller.clear(&mut transforms).is_some() {
        for mut orbit in &mut cameras {
            rig.release(&mut orbit);
        }
    }
}
