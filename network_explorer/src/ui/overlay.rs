//! Popup overlay shown for the current selection.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::content::{
    ContentState, LayerEntry, OverlayContent, Sections, ADVANTAGES_LABEL, DISADVANTAGES_LABEL,
};
use crate::ui::style::{apply_panel_style, dismiss_hint, heading, panel_frame, ACCENT};

const OVERLAY_WIDTH: f32 = 360.0;

/// Content currently on screen, if any, with the content key it was looked up by.
#[derive(Resource, Default, Debug)]
pub struct Overlay {
    shown: Option<(String, OverlayContent)>,
}

impl Overlay {
    pub fn show(&mut self, key: impl Into<String>, content: OverlayContent) {
        self.shown = Some((key.into(), content));
    }

    pub fn hide(&mut self) {
        self.shown = None;
    }

    pub fn key(&self) -> Option<&str> {
        self.shown.as_ref().map(|(key, _)| key.as_str())
    }

    pub fn content(&self) -> Option<&OverlayContent> {
        self.shown.as_ref().map(|(_, content)| content)
    }

    pub fn is_visible(&self) -> bool {
        self.shown.is_some()
    }
}

/// Re-reads the shown key from freshly delivered content, e.g. after a reload.
pub(crate) fn refresh_overlay_system(content: Res<ContentState>, mut overlay: ResMut<Overlay>) {
    let Some(record) = content.record() else {
        return;
    };
    let Some(key) = overlay.key().map(str::to_string) else {
        return;
    };
    match record.lookup(&key) {
        Some(fresh) => overlay.show(key, fresh),
        None => warn!("content not found for {key} after reload"),
    }
}

/// Close button or `Esc`: hide the overlay and undo the selection.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct CloseOverlay;

pub(crate) fn overlay_system(
    mut contexts: EguiContexts,
    overlay: Res<Overlay>,
    mut close: EventWriter<CloseOverlay>,
) {
    let Some(content) = overlay.content() else {
        return;
    };

    let (anchor, offset) = match content {
        OverlayContent::Text(_) => (egui::Align2::CENTER_BOTTOM, [0.0, -40.0]),
        _ => (egui::Align2::RIGHT_TOP, [-16.0, 56.0]),
    };

    egui::Window::new("overlay")
        .anchor(anchor, offset)
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .default_width(OVERLAY_WIDTH)
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_panel_style(ui);
            ui.set_max_width(OVERLAY_WIDTH);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                if ui.button("✕").clicked() {
                    close.send(CloseOverlay);
                }
            });

            match content {
                OverlayContent::Sections(sections) => chat_box(ui, sections),
                OverlayContent::Entry(entry) => layer_box(ui, entry),
                OverlayContent::Text(text) => {
                    ui.vertical_centered(|ui| ui.label(text.as_str()));
                }
            }

            ui.add_space(8.0);
            dismiss_hint(ui);
        });
}

fn chat_box(ui: &mut egui::Ui, sections: &Sections) {
    heading(ui, &sections.title);
    ui.add_space(6.0);
    if !sections.description.is_empty() {
        ui.label(sections.description.as_str());
    }
    bullet_list(ui, ADVANTAGES_LABEL, &sections.advantages);
    bullet_list(ui, DISADVANTAGES_LABEL, &sections.disadvantages);
}

fn bullet_list(ui: &mut egui::Ui, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    ui.add_space(8.0);
    ui.label(egui::RichText::new(label).strong().color(ACCENT));
    for item in items {
        ui.label(format!("• {item}"));
    }
}

fn layer_box(ui: &mut egui::Ui, entry: &LayerEntry) {
    heading(ui, &entry.title);
    ui.add_space(6.0);
    ui.label(entry.description.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentError, ContentRecord, NetworkModels, OsiLayer};

    #[test]
    fn show_replaces_and_hide_clears() {
        let mut overlay = Overlay::default();
        assert!(!overlay.is_visible());

        overlay.show("basicNetwork", OverlayContent::Text("first".into()));
        overlay.show("hubNetwork", OverlayContent::Text("second".into()));
        assert_eq!(overlay.key(), Some("hubNetwork"));
        assert_eq!(overlay.content(), Some(&OverlayContent::Text("second".into())));

        overlay.hide();
        assert!(overlay.content().is_none());
        assert!(overlay.key().is_none());
    }

    fn refresh_app(overlay: Overlay, content: ContentState) -> App {
        let mut app = App::new();
        app.insert_resource(overlay)
            .insert_resource(content)
            .add_systems(
                Update,
                refresh_overlay_system.run_if(resource_exists_and_changed::<ContentState>),
            );
        app
    }

    #[test]
    fn reload_replaces_stale_overlay_text() {
        let failed = ContentState::from_fetch(Err(ContentError::MissingCell {
            range: "Sheet1!A5:B11",
            row: 0,
            col: 0,
        }));
        let stale = failed.record().unwrap().lookup("networkLayer").unwrap();
        let mut overlay = Overlay::default();
        overlay.show("networkLayer", stale);
        let mut app = refresh_app(overlay, failed);
        app.update();

        app.insert_resource(ContentState::Pending);
        app.update();
        assert_eq!(
            app.world().resource::<Overlay>().content(),
            Some(&OverlayContent::Entry(
                ContentRecord::error_fallback().layer(OsiLayer::Network).clone()
            ))
        );

        let mut record = ContentRecord::default();
        record.layer_mut(OsiLayer::Network).title = "Network Layer".into();
        app.insert_resource(ContentState::Ready(record));
        app.update();

        match app.world().resource::<Overlay>().content() {
            Some(OverlayContent::Entry(entry)) => assert_eq!(entry.title, "Network Layer"),
            other => panic!("unexpected overlay {other:?}"),
        }
    }

    #[test]
    fn hidden_overlay_stays_hidden_on_reload() {
        let record = ContentRecord {
            network_models: NetworkModels {
                basic_network: "ring".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut app = refresh_app(Overlay::default(), ContentState::Ready(record));
        app.update();
        assert!(!app.world().resource::<Overlay>().is_visible());
    }
}
