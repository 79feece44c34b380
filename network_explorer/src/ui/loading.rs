//! "Loading..." indicator while page content or models are still arriving.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::content::ContentState;
use crate::scene::PendingModels;
use crate::ui::style::{apply_panel_style, panel_frame};

pub fn is_loading(content: Option<&ContentState>, models: &PendingModels) -> bool {
    content.is_some_and(ContentState::is_pending) || !models.is_empty()
}

pub(crate) fn loading_indicator_system(
    mut contexts: EguiContexts,
    content: Option<Res<ContentState>>,
    models: Res<PendingModels>,
) {
    if !is_loading(content.as_deref(), &models) {
        return;
    }

    egui::Area::new(egui::Id::new("loading"))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .interactable(false)
        .show(contexts.ctx_mut(), |ui| {
            panel_frame().show(ui, |ui| {
                apply_panel_style(ui);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRecord;

    #[test]
    fn loading_until_content_and_models_settle() {
        let empty = PendingModels::default();
        assert!(is_loading(Some(&ContentState::Pending), &empty));
        assert!(!is_loading(Some(&ContentState::Ready(ContentRecord::default())), &empty));
        assert!(!is_loading(None, &empty));

        let mut pending = PendingModels::default();
        pending.track("osi/layer1.glb", Handle::default());
        assert!(is_loading(Some(&ContentState::Ready(ContentRecord::default())), &pending));
    }
}
