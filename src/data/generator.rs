//! Synthetic Data Generator
//! Random sample data for every chart family, refreshed on demand.

use crate::config::SampleConfig;
use crate::data::models::*;
use chrono::{DateTime, Duration, Timelike, Utc};
use rand::Rng;
use std::f64::consts::PI;

const CATEGORY_LABELS: [&str; 10] = [
    "Apples", "Bananas", "Cherries", "Dates", "Figs", "Grapes", "Kiwis", "Lemons", "Mangos",
    "Oranges",
];
const PRODUCTS: [&str; 3] = ["Product A", "Product B", "Product C"];
const QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const RADAR_AXES: [&str; 6] = ["Speed", "Power", "Range", "Comfort", "Safety", "Price"];
const FUNNEL_STAGES: [&str; 5] = ["Visitors", "Sign-ups", "Trials", "Quotes", "Customers"];
const SECTORS: [(&str, &[&str]); 4] = [
    ("Technology", &["Software", "Hardware", "Semiconductors", "Cloud"]),
    ("Healthcare", &["Pharma", "Devices", "Insurance"]),
    ("Finance", &["Banks", "Brokers", "Payments", "Asset Mgmt"]),
    ("Energy", &["Oil & Gas", "Renewables", "Utilities"]),
];

/// Box-Muller transform: one normally distributed draw from two uniforms.
pub fn box_muller<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // u1 in (0, 1] keeps the logarithm finite
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    mean + std_dev * z
}

pub fn normal_samples<R: Rng + ?Sized>(rng: &mut R, n: usize, mean: f64, std_dev: f64) -> Vec<f64> {
    (0..n).map(|_| box_muller(rng, mean, std_dev)).collect()
}

fn label(names: &[&str], i: usize) -> String {
    let base = names[i % names.len()];
    match i / names.len() {
        0 => base.to_string(),
        round => format!("{} {}", base, round + 1),
    }
}

pub fn categories<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<CategoryValue> {
    (0..n)
        .map(|i| CategoryValue::new(label(&CATEGORY_LABELS, i), rng.gen_range(10.0..100.0)))
        .collect()
}

/// One series per product with a value for each quarter.
pub fn grouped<R: Rng + ?Sized>(rng: &mut R) -> Vec<Series> {
    PRODUCTS
        .iter()
        .map(|name| Series {
            name: name.to_string(),
            points: (0..QUARTERS.len())
                .map(|q| [q as f64, rng.gen_range(20.0..80.0)])
                .collect(),
        })
        .collect()
}

/// Random walks starting at different levels.
pub fn trends<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<Series> {
    ["Revenue", "Costs", "Profit"]
        .iter()
        .enumerate()
        .map(|(s, name)| {
            let mut y = 50.0 + 20.0 * s as f64;
            let points = (0..n)
                .map(|i| {
                    y = (y + box_muller(rng, 0.3, 3.0)).max(0.0);
                    [i as f64, y]
                })
                .collect();
            Series {
                name: name.to_string(),
                points,
            }
        })
        .collect()
}

/// Three gaussian clusters.
pub fn scatter<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<ScatterPoint> {
    let centers = [(20.0, 30.0), (55.0, 70.0), (80.0, 35.0)];
    (0..n)
        .map(|i| {
            let group = i % centers.len();
            let (cx, cy) = centers[group];
            ScatterPoint {
                x: box_muller(rng, cx, 8.0),
                y: box_muller(rng, cy, 8.0),
                size: rng.gen_range(2.0..12.0),
                group,
            }
        })
        .collect()
}

/// Groups with different location and spread, plus a few far outliers.
pub fn sample_groups<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<SampleGroup> {
    let params = [("Alpha", 50.0, 8.0), ("Beta", 60.0, 12.0), ("Gamma", 45.0, 5.0), ("Delta", 70.0, 15.0)];
    params
        .iter()
        .map(|&(name, mean, std_dev)| {
            let mut values = normal_samples(rng, n, mean, std_dev);
            if rng.gen_bool(0.7) {
                let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                values.push(mean + sign * std_dev * rng.gen_range(3.5..5.0));
            }
            SampleGroup {
                name: name.to_string(),
                values,
            }
        })
        .collect()
}

fn make_candle<R: Rng + ?Sized>(rng: &mut R, time: DateTime<Utc>, open: f64) -> Candle {
    let close = (open * (1.0 + box_muller(rng, 0.0, 0.02))).max(0.01);
    let high = open.max(close) * (1.0 + box_muller(rng, 0.0, 0.01).abs());
    let low = (open.min(close) * (1.0 - box_muller(rng, 0.0, 0.01).abs())).max(0.0);
    Candle {
        time,
        open,
        high,
        low,
        close,
        volume: rng.gen_range(100_000.0..1_000_000.0),
    }
}

/// Random-walk continuation of a candle series.
pub fn next_candle<R: Rng + ?Sized>(rng: &mut R, prev: &Candle) -> Candle {
    make_candle(rng, prev.time + Duration::days(1), prev.close)
}

/// `n` daily candles ending today.
pub fn candles<R: Rng + ?Sized>(rng: &mut R, n: usize, start_price: f64) -> Vec<Candle> {
    let start = Utc::now() - Duration::days(n as i64);
    let mut out: Vec<Candle> = Vec::with_capacity(n);
    for _ in 0..n {
        let candle = match out.last() {
            Some(prev) => next_candle(rng, prev),
            None => make_candle(rng, start, start_price),
        };
        out.push(candle);
    }
    out
}

/// Daily temperature cycle peaking mid-afternoon.
fn diurnal(hour: u32) -> f64 {
    15.0 + 8.0 * (2.0 * PI * (hour as f64 - 9.0) / 24.0).sin()
}

fn make_weather<R: Rng + ?Sized>(rng: &mut R, time: DateTime<Utc>, drift: f64) -> WeatherSample {
    let mean = diurnal(time.hour()) + drift + box_muller(rng, 0.0, 0.8);
    let low = mean - rng.gen_range(0.5..4.0);
    let high = mean + rng.gen_range(0.5..4.0);
    let humidity = (60.0 - (mean - 15.0) * 2.0 + box_muller(rng, 0.0, 5.0)).clamp(0.0, 100.0);
    let precipitation = if rng.gen_bool(0.2) {
        rng.gen_range(0.1..5.0)
    } else {
        0.0
    };
    WeatherSample {
        time,
        low,
        high,
        mean,
        humidity,
        precipitation,
    }
}

/// Next hourly sample; half of the previous deviation from the cycle carries over.
pub fn next_weather<R: Rng + ?Sized>(rng: &mut R, prev: &WeatherSample) -> WeatherSample {
    let drift = 0.5 * (prev.mean - diurnal(prev.time.hour()));
    make_weather(rng, prev.time + Duration::hours(1), drift)
}

pub fn weather<R: Rng + ?Sized>(rng: &mut R, hours: usize) -> Vec<WeatherSample> {
    let start = Utc::now() - Duration::hours(hours as i64);
    let mut out: Vec<WeatherSample> = Vec::with_capacity(hours);
    for _ in 0..hours {
        let sample = match out.last() {
            Some(prev) => next_weather(rng, prev),
            None => make_weather(rng, start, 0.0),
        };
        out.push(sample);
    }
    out
}

/// Market sectors with their industries as leaves.
pub fn tree<R: Rng + ?Sized>(rng: &mut R) -> Vec<TreeNode> {
    let mut nodes = Vec::new();
    for (color, (sector, industries)) in SECTORS.iter().enumerate() {
        nodes.push(TreeNode::root(*sector, color));
        for industry in industries.iter() {
            nodes.push(TreeNode::leaf(*industry, sector, rng.gen_range(5.0..60.0), color));
        }
    }
    nodes
}

/// Strictly narrowing conversion stages.
pub fn funnel<R: Rng + ?Sized>(rng: &mut R) -> Vec<CategoryValue> {
    let mut value = rng.gen_range(800.0..1200.0);
    FUNNEL_STAGES
        .iter()
        .map(|stage| {
            let stage_value = CategoryValue::new(*stage, value);
            value *= rng.gen_range(0.35..0.85);
            stage_value
        })
        .collect()
}

/// Three clusters inside the unit cube around the origin.
pub fn cloud<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<Point3> {
    let centers = [(-0.5, -0.4, 0.3), (0.4, 0.5, -0.2), (0.3, -0.5, -0.5)];
    (0..n)
        .map(|i| {
            let group = i % centers.len();
            let (cx, cy, cz) = centers[group];
            Point3 {
                x: box_muller(rng, cx, 0.15).clamp(-1.0, 1.0),
                y: box_muller(rng, cy, 0.15).clamp(-1.0, 1.0),
                z: box_muller(rng, cz, 0.15).clamp(-1.0, 1.0),
                group,
            }
        })
        .collect()
}

/// Activity by weekday and hour.
pub fn heat<R: Rng + ?Sized>(rng: &mut R, rows: usize, cols: usize) -> Vec<HeatCell> {
    let mut cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let weekend = row % 7 >= 5;
        for col in 0..cols {
            let phase = 2.0 * PI * col as f64 / cols as f64;
            let base = 50.0 - 35.0 * phase.cos() - if weekend { 15.0 } else { 0.0 };
            cells.push(HeatCell {
                row,
                col,
                value: (base + box_muller(rng, 0.0, 6.0)).clamp(0.0, 100.0),
            });
        }
    }
    cells
}

pub fn radar<R: Rng + ?Sized>(rng: &mut R) -> Vec<RadarSeries> {
    ["Model X", "Model Y", "Model Z"]
        .iter()
        .map(|name| RadarSeries {
            name: name.to_string(),
            values: (0..RADAR_AXES.len()).map(|_| rng.gen_range(20.0..100.0)).collect(),
        })
        .collect()
}

pub fn waterfall<R: Rng + ?Sized>(rng: &mut R) -> Vec<WaterfallStep> {
    let steps = [
        ("Revenue", 1.0, 400.0..600.0),
        ("Services", 1.0, 50.0..150.0),
        ("COGS", -1.0, 150.0..250.0),
        ("Salaries", -1.0, 80.0..160.0),
        ("Marketing", -1.0, 20.0..80.0),
        ("Tax", -1.0, 20.0..60.0),
    ];
    steps
        .into_iter()
        .map(|(name, sign, range)| WaterfallStep {
            label: name.to_string(),
            delta: sign * rng.gen_range(range),
        })
        .collect()
}

impl Datasets {
    /// Generate every dataset at once.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &SampleConfig) -> Self {
        Self {
            categories: categories(rng, config.categories),
            grouped: grouped(rng),
            group_labels: QUARTERS.iter().map(|q| q.to_string()).collect(),
            trends: trends(rng, config.series_points),
            scatter: scatter(rng, config.scatter_points),
            samples: sample_groups(rng, config.group_samples),
            candles: candles(rng, config.candles, 100.0),
            weather: weather(rng, config.weather_hours),
            tree: tree(rng),
            funnel: funnel(rng),
            cloud: cloud(rng, config.cloud_points),
            heat: heat(rng, config.heat_rows, config.heat_cols),
            heat_rows: (0..config.heat_rows).map(|r| label(&WEEKDAYS, r)).collect(),
            heat_cols: (0..config.heat_cols).map(|c| format!("{:02}", c % 24)).collect(),
            radar_axes: RADAR_AXES.iter().map(|a| a.to_string()).collect(),
            radar: radar(rng),
            waterfall: waterfall(rng),
            gauge: rng.gen_range(0.0..100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn box_muller_matches_target_moments() {
        let mut rng = rng();
        let values = normal_samples(&mut rng, 20_000, 10.0, 2.0);
        assert!(values.iter().all(|v| v.is_finite()));

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        assert!((mean - 10.0).abs() < 0.1, "mean {}", mean);
        assert!((var.sqrt() - 2.0).abs() < 0.1, "std {}", var.sqrt());
    }

    #[test]
    fn box_muller_zero_spread_is_constant() {
        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(box_muller(&mut rng, 3.0, 0.0), 3.0);
        }
    }

    #[test]
    fn candles_keep_ohlc_invariant_and_chain() {
        let mut rng = rng();
        let mut series = candles(&mut rng, 200, 100.0);
        for _ in 0..50 {
            let next = next_candle(&mut rng, series.last().unwrap());
            series.push(next);
        }
        for c in &series {
            assert!(c.low <= c.open.min(c.close));
            assert!(c.high >= c.open.max(c.close));
            assert!(c.low >= 0.0 && c.volume >= 0.0);
        }
        for pair in series.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
            assert_eq!(pair[1].time - pair[0].time, Duration::days(1));
        }
    }

    #[test]
    fn weather_keeps_ranges_and_advances_hourly() {
        let mut rng = rng();
        let series = weather(&mut rng, 96);
        for w in &series {
            assert!(w.low <= w.mean && w.mean <= w.high);
            assert!((0.0..=100.0).contains(&w.humidity));
            assert!(w.precipitation >= 0.0);
        }
        let next = next_weather(&mut rng, series.last().unwrap());
        assert_eq!(next.time - series.last().unwrap().time, Duration::hours(1));
    }

    #[test]
    fn datasets_follow_sample_config() {
        let mut rng = rng();
        let config = SampleConfig {
            categories: 12,
            candles: 15,
            heat_rows: 3,
            heat_cols: 5,
            ..SampleConfig::default()
        };
        let data = Datasets::generate(&mut rng, &config);
        assert_eq!(data.categories.len(), 12);
        assert_eq!(data.categories[10].label, "Apples 2");
        assert_eq!(data.candles.len(), 15);
        assert_eq!(data.heat.len(), 15);
        assert_eq!(data.heat_rows.len(), 3);
        assert_eq!(data.cloud.len(), config.cloud_points);
        assert_eq!(data.radar_axes.len(), data.radar[0].values.len());
        assert!((0.0..100.0).contains(&data.gauge));
        assert!(data.categories.iter().all(|c| (10.0..100.0).contains(&c.value)));
    }

    #[test]
    fn tree_leaves_point_at_existing_roots() {
        let mut rng = rng();
        let nodes = tree(&mut rng);
        let roots: Vec<&str> = nodes
            .iter()
            .filter(|n| n.parent.is_none())
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(roots.len(), SECTORS.len());
        for leaf in nodes.iter().filter(|n| n.parent.is_some()) {
            assert!(roots.contains(&leaf.parent.as_deref().unwrap()));
            assert!(leaf.value > 0.0);
        }
    }

    #[test]
    fn funnel_narrows() {
        let mut rng = rng();
        let stages = funnel(&mut rng);
        assert!(stages.windows(2).all(|w| w[1].value < w[0].value));
    }
}
