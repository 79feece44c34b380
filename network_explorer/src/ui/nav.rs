//! Top navigation bar: page routes, content status and reload.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::content::{ContentState, ReloadContent};
use crate::pages::Page;
use crate::ui::style::{apply_panel_style, bar_frame, ACCENT, HIGHLIGHT, MUTED};

pub fn content_status(content: Option<&ContentState>) -> (&'static str, egui::Color32) {
    match content {
        None => ("no content", MUTED),
        Some(ContentState::Pending) => ("loading content", MUTED),
        Some(ContentState::Ready(_)) => ("content ready", ACCENT),
        Some(ContentState::Failed { .. }) => ("content unavailable", HIGHLIGHT),
    }
}

pub(crate) fn nav_bar_system(
    mut contexts: EguiContexts,
    page: Res<State<Page>>,
    mut next: ResMut<NextState<Page>>,
    content: Option<Res<ContentState>>,
    mut reload: EventWriter<ReloadContent>,
) {
    egui::TopBottomPanel::top("nav")
        .frame(bar_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_panel_style(ui);
            ui.horizontal(|ui| {
                for target in Page::ALL {
                    let current = *page.get() == target;
                    if ui.selectable_label(current, target.title()).clicked() && !current {
                        next.set(target);
                    }
                }

                ui.separator();
                if ui.button("Reload content").clicked() {
                    reload.send(ReloadContent);
                }

                let (status, color) = content_status(content.as_deref());
                if let Some(ContentState::Failed { reason, .. }) = content.as_deref() {
                    ui.label(egui::RichText::new(status).color(color))
                        .on_hover_text(reason.as_str());
                } else {
                    ui.label(egui::RichText::new(status).color(color));
                }
            });
        });
}
