//! Layout module - chart geometry independent of the UI toolkit

pub mod cartesian;
mod hierarchy;
pub mod projection;
pub mod radial;
pub mod treemap;

pub use projection::{Projection, Rotation};
pub use treemap::Rect;
