//! Charts module - chart catalogue, interactive drawing and image export

mod kind;
mod painter;
mod plotter;
mod renderer;

pub use kind::{ChartCategory, ChartKind};
pub use plotter::{ChartPlotter, ViewOptions};
pub use renderer::{StaticChartRenderer, DEFAULT_SIZE};
