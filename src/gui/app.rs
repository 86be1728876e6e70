//! Chart Gallery Main Application
//! Main window with control panel, chart viewer and settings sheet.

use crate::charts::{ChartKind, StaticChartRenderer, ViewOptions, DEFAULT_SIZE};
use crate::config::AppConfig;
use crate::data::Datasets;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, SettingsAction, SettingsSheet};
use crate::state::GalleryStore;
use anyhow::Context;
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

/// Export result from background thread
enum ExportResult {
    Complete(PathBuf),
    Error(String),
}

/// Render `kind` to `path`, with the failure described for the status line.
fn export_chart(kind: ChartKind, data: &Datasets, path: &Path) -> anyhow::Result<()> {
    StaticChartRenderer::render_png(kind, data, path, DEFAULT_SIZE)
        .with_context(|| format!("exporting {} to {}", kind.title(), path.display()))
}

fn save_settings(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    config
        .save(path)
        .with_context(|| format!("saving settings to {}", path.display()))
}

/// Main application window.
pub struct GalleryApp {
    store: GalleryStore,
    config_path: PathBuf,
    control_panel: ControlPanel,
    settings: SettingsSheet,

    // Async export
    export_rx: Option<Receiver<ExportResult>>,
    is_exporting: bool,
    dark_mode: Option<bool>,
}

impl GalleryApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig, config_path: PathBuf) -> Self {
        let store = GalleryStore::new(config);
        info!(chart = store.selected.title(), "Gallery ready");
        Self {
            store,
            config_path,
            control_panel: ControlPanel::new(),
            settings: SettingsSheet::default(),
            export_rx: None,
            is_exporting: false,
            dark_mode: None,
        }
    }

    fn view_options(&self) -> ViewOptions {
        ViewOptions {
            kde_points: self.store.config.kde_points,
            histogram_bins: self.store.config.histogram_bins,
            projection: self.store.config.projection,
        }
    }

    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::None => {}
            ControlPanelAction::Select(kind) => self.store.select(kind),
            ControlPanelAction::ToggleAutoRefresh(on) => {
                info!(auto_refresh = on, "Toggled auto-refresh");
                self.control_panel
                    .set_status(if on { "Live updates on" } else { "Live updates paused" });
            }
            ControlPanelAction::RefreshNow => {
                self.store.advance();
                self.control_panel.set_status("Appended one live sample");
            }
            ControlPanelAction::Regenerate => {
                self.store.regenerate();
                self.control_panel.set_status("Regenerated all datasets");
            }
            ControlPanelAction::ExportPng => self.handle_export_png(),
            ControlPanelAction::OpenSettings => self.settings.open(&self.store.config),
        }
    }

    /// Handle PNG export - render on a worker so the UI keeps updating
    fn handle_export_png(&mut self) {
        if self.is_exporting {
            return;
        }
        let kind = self.store.selected;
        let file_name = format!("{}.png", kind.title().to_lowercase().replace(' ', "_"));
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(&file_name)
            .save_file()
        else {
            return; // User cancelled
        };

        self.control_panel.set_status(format!("Exporting {}...", kind.title()));
        self.is_exporting = true;

        let (tx, rx) = channel();
        self.export_rx = Some(rx);
        let data = self.store.view_datasets().clone();

        thread::spawn(move || {
            let result = match export_chart(kind, &data, &path) {
                Ok(()) => ExportResult::Complete(path),
                Err(e) => ExportResult::Error(format!("{:#}", e)),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for export results
    fn check_export_results(&mut self) {
        let Some(rx) = self.export_rx.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(ExportResult::Complete(path)) => {
                self.control_panel
                    .set_status(format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    warn!("Could not open {}: {}", path.display(), e);
                }
                self.is_exporting = false;
            }
            Ok(ExportResult::Error(error)) => {
                warn!("{}", error);
                self.control_panel.set_status(format!("Error: {}", error));
                self.is_exporting = false;
            }
            Err(_) => {
                // Still rendering, keep the receiver
                self.export_rx = Some(rx);
            }
        }
    }

    fn handle_settings(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::None | SettingsAction::Cancel => {}
            SettingsAction::Apply(config) => {
                self.store.apply_config(config);
                self.control_panel.set_status("Settings applied");
            }
            SettingsAction::Save(config) => {
                self.store.apply_config(config);
                match save_settings(&self.store.config, &self.config_path) {
                    Ok(()) => self
                        .control_panel
                        .set_status(format!("Saved settings to {}", self.config_path.display())),
                    Err(e) => {
                        warn!("{:#}", e);
                        self.control_panel.set_status(format!("Error: {:#}", e));
                    }
                }
            }
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let dark = self.store.config.dark_mode;
        if self.dark_mode != Some(dark) {
            ctx.set_visuals(if dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            self.dark_mode = Some(dark);
        }
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_export_results();
        self.store.tick(Instant::now());
        self.apply_theme(ctx);

        if self.is_exporting {
            ctx.request_repaint();
        } else if self.store.config.auto_refresh {
            ctx.request_repaint_after(self.store.config.refresh_interval());
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(
                        ui,
                        self.store.selected,
                        &mut self.store.config.auto_refresh,
                        self.store.ticks,
                    );
                    self.handle_action(action);
                });
            });

        // Central panel - Chart Viewer
        let options = self.view_options();
        let live = self.store.config.auto_refresh;
        let mut rotation = self.store.rotation;
        egui::CentralPanel::default().show(ctx, |ui| {
            ChartViewer::show(
                ui,
                self.store.selected,
                self.store.view_datasets(),
                &options,
                &mut rotation,
                live,
            );
        });
        self.store.rotation = rotation;

        if self.settings.is_open() {
            let action = self.settings.show(ctx);
            self.handle_settings(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_failure_names_chart_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("radar.png");
        let err = export_chart(ChartKind::Radar, &Datasets::default(), &path).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("exporting Radar"));
        assert!(message.contains("cannot be exported"));
    }

    #[test]
    fn settings_save_reports_bad_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("gallery.json");
        let err = save_settings(&AppConfig::default(), &path).unwrap_err();
        assert!(format!("{:#}", err).contains("saving settings"));
    }
}
