//! Control Panel Widget
//! Left side panel with the chart catalogue and refresh controls.

use crate::charts::{ChartCategory, ChartKind, StaticChartRenderer};
use egui::{Color32, RichText};

/// Left side control panel with chart selection and data controls.
pub struct ControlPanel {
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        selected: ChartKind,
        auto_refresh: &mut bool,
        ticks: u64,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Chart Gallery")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new(format!("{} chart types", ChartKind::ALL.len()))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Catalogue Section =====
        ui.label(RichText::new("📈 Charts").size(14.0).strong());
        ui.add_space(5.0);

        for category in ChartCategory::ALL {
            egui::CollapsingHeader::new(RichText::new(category.title()).strong())
                .id_salt(category.title())
                .default_open(true)
                .show(ui, |ui| {
                    for kind in category.kinds() {
                        let mut text = RichText::new(kind.title());
                        if kind.is_live() {
                            text = text.color(Color32::from_rgb(40, 167, 69));
                        }
                        if ui.selectable_label(kind == selected, text).clicked() {
                            action = ControlPanelAction::Select(kind);
                        }
                    }
                });
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Live Data Section =====
        ui.label(RichText::new("⏱ Live Data").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                if ui.checkbox(auto_refresh, "Auto-refresh").changed() {
                    action = ControlPanelAction::ToggleAutoRefresh(*auto_refresh);
                }
                ui.label(
                    RichText::new(format!("{} updates since last regenerate", ticks))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            });

        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let button_size = egui::vec2(200.0, 30.0);
            if ui
                .add(egui::Button::new(RichText::new("⟳ Refresh Now").size(14.0)).min_size(button_size))
                .clicked()
            {
                action = ControlPanelAction::RefreshNow;
            }
            ui.add_space(5.0);
            if ui
                .add(egui::Button::new(RichText::new("🎲 Regenerate Data").size(14.0)).min_size(button_size))
                .clicked()
            {
                action = ControlPanelAction::Regenerate;
            }
            ui.add_space(5.0);
            ui.add_enabled_ui(StaticChartRenderer::supports(selected), |ui| {
                let export = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(button_size);
                if ui
                    .add(export)
                    .on_disabled_hover_text("Only axis-based charts can be exported")
                    .clicked()
                {
                    action = ControlPanelAction::ExportPng;
                }
            });
            ui.add_space(5.0);
            if ui
                .add(egui::Button::new(RichText::new("⚙ Settings").size(14.0)).min_size(button_size))
                .clicked()
            {
                action = ControlPanelAction::OpenSettings;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new(&self.status).size(11.0).color(self.status_color()));

        action
    }

    fn status_color(&self) -> Color32 {
        if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Saved") || self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Select(ChartKind),
    ToggleAutoRefresh(bool),
    RefreshNow,
    Regenerate,
    ExportPng,
    OpenSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_color_follows_outcome() {
        let mut panel = ControlPanel::new();
        assert_eq!(panel.status_color(), Color32::GRAY);
        panel.set_status("Error: disk full");
        assert_eq!(panel.status_color(), Color32::from_rgb(220, 53, 69));
        panel.set_status("Exported bar.png");
        assert_eq!(panel.status_color(), Color32::from_rgb(40, 167, 69));
    }
}
