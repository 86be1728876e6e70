//! Statistics module - descriptive statistics and density estimation

pub mod calculator;
pub mod density;

pub use calculator::{confidence_interval, describe, moving_average, BoxSummary};
pub use density::{histogram, kde_curve};
