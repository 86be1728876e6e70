//! Data module - synthetic datasets and live series

pub mod generator;
mod live;
mod models;

pub use live::LiveSeries;
pub use models::*;
