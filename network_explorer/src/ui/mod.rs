//! egui overlays: navigation, per-page panels, popups and the loading indicator.

mod loading;
mod nav;
mod overlay;
mod panels;
mod style;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub use overlay::{CloseOverlay, Overlay};

use crate::content::ContentState;
use crate::pages::Page;

/// Which optional parts of the UI to show.
#[derive(Resource, Clone, Copy, Debug)]
pub struct UiOptions {
    pub nav_bar: bool,
    pub loading_indicator: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            nav_bar: true,
            loading_indicator: true,
        }
    }
}

pub fn ui_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.init_resource::<UiOptions>()
        .init_resource::<Overlay>()
        .add_event::<CloseOverlay>()
        .add_systems(
            Update,
            (
                nav::nav_bar_system.run_if(|options: Res<UiOptions>| options.nav_bar),
                panels::topology_switch_system.run_if(in_state(Page::Topology)),
                panels::transmission_panel_system.run_if(in_state(Page::Transmission)),
                panels::osi_legend_system.run_if(in_state(Page::OsiLayer)),
                overlay::refresh_overlay_system
                    .run_if(resource_exists_and_changed::<ContentState>),
                overlay::overlay_system,
                loading::loading_indicator_system
                    .run_if(|options: Res<UiOptions>| options.loading_indicator),
            )
                .chain(),
        );
}
