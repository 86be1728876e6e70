//! Data Models
//! Plain value records, one family per chart type.

use chrono::{DateTime, Utc};

/// Labelled scalar used by bar, pie, funnel and lollipop charts.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
}

impl CategoryValue {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Named polyline, x ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

impl Series {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p[1]).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub group: usize,
}

/// Daily stock candle.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    pub fn body(&self) -> (f64, f64) {
        (self.open.min(self.close), self.open.max(self.close))
    }
}

/// Hourly weather observation.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSample {
    pub time: DateTime<Utc>,
    pub low: f64,
    pub high: f64,
    pub mean: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Millimetres
    pub precipitation: f64,
}

/// Node of a flat hierarchy. Roots have no parent.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub value: f64,
    pub parent: Option<String>,
    pub color: usize,
}

impl TreeNode {
    pub fn root(name: impl Into<String>, color: usize) -> Self {
        Self {
            name: name.into(),
            value: 0.0,
            parent: None,
            color,
        }
    }

    pub fn leaf(name: impl Into<String>, parent: &str, value: f64, color: usize) -> Self {
        Self {
            name: name.into(),
            value,
            parent: Some(parent.to_string()),
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub group: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatCell {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// One polygon on a radar chart; `values[i]` belongs to axis `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Raw observations of one group (box plot, violin, error bars).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGroup {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallStep {
    pub label: String,
    pub delta: f64,
}

/// Every dataset shown by the gallery.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub categories: Vec<CategoryValue>,
    /// Quarterly values per product, `grouped[series][category]`
    pub grouped: Vec<Series>,
    pub group_labels: Vec<String>,
    pub trends: Vec<Series>,
    pub scatter: Vec<ScatterPoint>,
    pub samples: Vec<SampleGroup>,
    pub candles: Vec<Candle>,
    pub weather: Vec<WeatherSample>,
    pub tree: Vec<TreeNode>,
    pub funnel: Vec<CategoryValue>,
    pub cloud: Vec<Point3>,
    pub heat: Vec<HeatCell>,
    pub heat_rows: Vec<String>,
    pub heat_cols: Vec<String>,
    pub radar_axes: Vec<String>,
    pub radar: Vec<RadarSeries>,
    pub waterfall: Vec<WaterfallStep>,
    /// Gauge reading in `0..=100`
    pub gauge: f64,
}
