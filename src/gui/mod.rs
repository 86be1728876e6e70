//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod settings;

pub use app::GalleryApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use settings::{SettingsAction, SettingsSheet};
