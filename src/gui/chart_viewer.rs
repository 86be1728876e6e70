//! Chart Viewer Widget
//! Central panel showing the selected chart in a titled card.

use crate::charts::{ChartKind, ChartPlotter, ViewOptions};
use crate::data::Datasets;
use crate::layout::Rotation;
use egui::{Color32, RichText};

const LIVE_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const CARD_COLOR: Color32 = Color32::from_rgb(100, 149, 237);

pub struct ChartViewer;

impl ChartViewer {
    pub fn show(
        ui: &mut egui::Ui,
        kind: ChartKind,
        data: &Datasets,
        options: &ViewOptions,
        rotation: &mut Rotation,
        live: bool,
    ) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, CARD_COLOR))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_size(ui.available_size());

                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(kind.title())
                            .size(20.0)
                            .strong()
                            .color(CARD_COLOR),
                    );
                    ui.label(
                        RichText::new(kind.category().title())
                            .size(12.0)
                            .color(Color32::GRAY),
                    );
                    if kind.is_live() {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let (text, color) = if live {
                                ("● LIVE", LIVE_COLOR)
                            } else {
                                ("❚❚ PAUSED", Color32::GRAY)
                            };
                            ui.label(RichText::new(text).size(12.0).strong().color(color));
                        });
                    }
                });
                ui.label(RichText::new(kind.description()).size(13.0));

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(4.0);

                ChartPlotter::draw(ui, kind, data, options, rotation);
            });
    }
}
