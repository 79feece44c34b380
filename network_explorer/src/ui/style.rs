//! Shared egui look for every panel: dark translucent frames, monospace text.

use bevy_egui::egui;

pub const TEXT: egui::Color32 = egui::Color32::from_rgb(200, 220, 240);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(100, 220, 180);
pub const MUTED: egui::Color32 = egui::Color32::from_rgb(120, 120, 140);
pub const HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(230, 80, 80);

pub fn panel_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 220))
        .inner_margin(egui::Margin::same(12))
        .corner_radius(egui::CornerRadius::same(6))
}

pub fn bar_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
        .inner_margin(egui::Margin::same(8))
        .corner_radius(egui::CornerRadius::same(0))
}

pub fn apply_panel_style(ui: &mut egui::Ui) {
    ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
    ui.visuals_mut().override_text_color = Some(TEXT);
}

pub fn heading(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).size(18.0).color(ACCENT));
}

pub fn dismiss_hint(ui: &mut egui::Ui) {
    ui.label(egui::RichText::new("Esc to dismiss").size(11.0).color(MUTED));
}
