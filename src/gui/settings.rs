//! Settings Sheet
//! Modal-style window editing a draft copy of the configuration.

use crate::config::{
    AppConfig, SampleConfig, MAX_HISTOGRAM_BINS, MAX_KDE_POINTS, MAX_LIVE_CAPACITY,
    MAX_REFRESH_INTERVAL_MS, MIN_REFRESH_INTERVAL_MS,
};
use crate::layout::Projection;
use egui::{Color32, DragValue, RichText};

/// Outcome of one frame of the settings window.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    None,
    Apply(AppConfig),
    Save(AppConfig),
    Cancel,
}

#[derive(Default)]
pub struct SettingsSheet {
    open: bool,
    draft: AppConfig,
    error: Option<String>,
}

impl SettingsSheet {
    pub fn open(&mut self, current: &AppConfig) {
        self.draft = current.clone();
        self.error = None;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Validate the draft and close on success.
    fn finish(&mut self, save: bool) -> SettingsAction {
        match self.draft.validate() {
            Ok(()) => {
                self.open = false;
                self.error = None;
                if save {
                    SettingsAction::Save(self.draft.clone())
                } else {
                    SettingsAction::Apply(self.draft.clone())
                }
            }
            Err(e) => {
                self.error = Some(e.to_string());
                SettingsAction::None
            }
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> SettingsAction {
        if !self.open {
            return SettingsAction::None;
        }
        let mut action = SettingsAction::None;
        let mut window_open = true;

        egui::Window::new("⚙ Settings")
            .open(&mut window_open)
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.label(RichText::new("Live data").size(14.0).strong());
                egui::Grid::new("settings_live")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Auto-refresh");
                        ui.checkbox(&mut self.draft.auto_refresh, "");
                        ui.end_row();

                        ui.label("Refresh interval");
                        ui.add(
                            DragValue::new(&mut self.draft.refresh_interval_ms)
                                .range(MIN_REFRESH_INTERVAL_MS..=MAX_REFRESH_INTERVAL_MS)
                                .speed(10)
                                .suffix(" ms"),
                        );
                        ui.end_row();

                        ui.label("Live history");
                        ui.add(
                            DragValue::new(&mut self.draft.live_capacity)
                                .range(2..=MAX_LIVE_CAPACITY)
                                .suffix(" samples"),
                        );
                        ui.end_row();
                    });

                ui.add_space(8.0);
                ui.label(RichText::new("Rendering").size(14.0).strong());
                egui::Grid::new("settings_rendering")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Density grid");
                        ui.add(DragValue::new(&mut self.draft.kde_points).range(2..=MAX_KDE_POINTS));
                        ui.end_row();

                        ui.label("Histogram bins");
                        ui.add(
                            DragValue::new(&mut self.draft.histogram_bins)
                                .range(1..=MAX_HISTOGRAM_BINS),
                        );
                        ui.end_row();

                        ui.label("Dark mode");
                        ui.checkbox(&mut self.draft.dark_mode, "");
                        ui.end_row();

                        ui.label("3D projection");
                        ui.horizontal(|ui| {
                            let perspective =
                                matches!(self.draft.projection, Projection::Perspective { .. });
                            if ui.radio(!perspective, "Orthographic").clicked() {
                                self.draft.projection = Projection::Orthographic;
                            }
                            if ui.radio(perspective, "Perspective").clicked() && !perspective {
                                self.draft.projection = Projection::default();
                            }
                        });
                        ui.end_row();

                        if let Projection::Perspective { distance } = &mut self.draft.projection {
                            ui.label("Camera distance");
                            ui.add(DragValue::new(distance).range(1.5..=20.0).speed(0.05));
                            ui.end_row();
                        }
                    });

                ui.add_space(8.0);
                ui.label(RichText::new("Sample sizes").size(14.0).strong());
                ui.label(
                    RichText::new("Changing these regenerates every dataset.")
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                Self::sample_grid(ui, &mut self.draft.samples);

                if let Some(error) = &self.error {
                    ui.add_space(6.0);
                    ui.label(
                        RichText::new(format!("Error: {}", error))
                            .size(12.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                }

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        action = self.finish(false);
                    }
                    if ui.button("💾 Save").clicked() {
                        action = self.finish(true);
                    }
                    if ui.button("Cancel").clicked() {
                        action = SettingsAction::Cancel;
                    }
                });
            });

        if !window_open || action == SettingsAction::Cancel {
            self.open = false;
            return SettingsAction::Cancel;
        }
        action
    }

    fn sample_grid(ui: &mut egui::Ui, samples: &mut SampleConfig) {
        egui::Grid::new("settings_samples")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                let limits = SampleConfig::MAX;
                let rows: [(&str, &mut usize, usize); 9] = [
                    ("Categories", &mut samples.categories, limits.categories),
                    ("Series points", &mut samples.series_points, limits.series_points),
                    ("Scatter points", &mut samples.scatter_points, limits.scatter_points),
                    ("Samples per group", &mut samples.group_samples, limits.group_samples),
                    ("Candles", &mut samples.candles, limits.candles),
                    ("Weather hours", &mut samples.weather_hours, limits.weather_hours),
                    ("3D points", &mut samples.cloud_points, limits.cloud_points),
                    ("Heat map rows", &mut samples.heat_rows, limits.heat_rows),
                    ("Heat map columns", &mut samples.heat_cols, limits.heat_cols),
                ];
                for (label, value, max) in rows {
                    ui.label(label);
                    ui.add(DragValue::new(value).range(1..=max));
                    ui.end_row();
                }
            });
    }
}
