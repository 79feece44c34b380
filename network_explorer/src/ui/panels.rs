//! Per-page controls: topology switch, transmission model picker, OSI legend.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::content::{NetworkModel, OsiLayer};
use crate::pages::topology::{SwitchTopology, TopologyModel, TopologyState};
use crate::pages::transmission::{SwitchNetworkModel, ToggleDescription, TransmissionState};
use crate::scene::SelectionController;
use crate::ui::style::{apply_panel_style, heading, panel_frame, HIGHLIGHT};
use crate::ui::Overlay;

/// Layers drawn in the highlight colour: the upper three, handled by software.
pub fn is_upper_layer(layer: OsiLayer) -> bool {
    layer.number() >= 5
}

pub(crate) fn topology_switch_system(
    mut contexts: EguiContexts,
    controller: Res<SelectionController>,
    state: Option<Res<TopologyState>>,
    mut switch: EventWriter<SwitchTopology>,
) {
    if controller.active().is_some() {
        return;
    }
    let Some(state) = state else {
        return;
    };

    egui::Window::new("topology switch")
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
        .title_bar(false)
        .resizable(false)
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_panel_style(ui);
            ui.horizontal(|ui| {
                for model in TopologyModel::ALL {
                    if ui
                        .selectable_label(state.current == model, model.label())
                        .clicked()
                    {
                        switch.send(SwitchTopology(model));
                    }
                }
            });
        });
}

pub(crate) fn transmission_panel_system(
    mut contexts: EguiContexts,
    state: Option<Res<TransmissionState>>,
    overlay: Res<Overlay>,
    mut switch: EventWriter<SwitchNetworkModel>,
    mut toggle: EventWriter<ToggleDescription>,
) {
    let Some(state) = state else {
        return;
    };

    egui::Window::new("transmission")
        .anchor(egui::Align2::LEFT_TOP, [16.0, 56.0])
        .title_bar(false)
        .resizable(false)
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_panel_style(ui);
            heading(ui, state.model.title());
            ui.add_space(8.0);

            let label = if overlay.is_visible() {
                "Hide Description"
            } else {
                "Show Description"
            };
            if ui.button(label).clicked() {
                toggle.send(ToggleDescription);
            }
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                for model in NetworkModel::ALL {
                    let text = format!("Model {}", model.number());
                    if ui.selectable_label(state.model == model, text).clicked() {
                        switch.send(SwitchNetworkModel(model));
                    }
                }
            });
        });
}

pub(crate) fn osi_legend_system(mut contexts: EguiContexts) {
    egui::Window::new("osi legend")
        .anchor(egui::Align2::LEFT_TOP, [16.0, 56.0])
        .title_bar(false)
        .resizable(false)
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            apply_panel_style(ui);
            heading(ui, "OSI Layer");
            ui.add_space(6.0);
            for layer in OsiLayer::ALL.into_iter().rev() {
                let text = format!("Layer {}: {}", layer.number(), layer.label());
                if is_upper_layer(layer) {
                    ui.label(egui::RichText::new(text).color(HIGHLIGHT));
                } else {
                    ui.label(text);
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_three_layers_are_highlighted() {
        let upper: Vec<_> = OsiLayer::ALL
            .into_iter()
            .filter(|layer| is_upper_layer(*layer))
            .collect();
        assert_eq!(
            upper,
            vec![OsiLayer::Session, OsiLayer::Presentation, OsiLayer::Application]
        );
    }
}
