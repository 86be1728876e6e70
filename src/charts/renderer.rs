//! Static Chart Renderer
//! Exports the cartesian charts as PNG images with plotters.

use crate::charts::plotter::{ChartPlotter, DOWN_COLOR, UP_COLOR};
use crate::charts::ChartKind;
use crate::data::Datasets;
use crate::stats;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_SIZE: (u32, u32) = (1200, 800);
const EXPORT_BINS: usize = 20;
const EXPORT_KDE_POINTS: usize = 200;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0} charts cannot be exported as images")]
    Unsupported(&'static str),
    #[error("nothing to draw for {0}")]
    Empty(&'static str),
    #[error("failed to draw chart: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Draw(e.to_string())
}

fn rgb(color: egui::Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

fn palette(index: usize) -> RGBColor {
    rgb(ChartPlotter::color(index))
}

/// `lo..hi` widened by 5% on both ends; degenerate ranges get a unit span.
pub fn padded(lo: f64, hi: f64) -> Range<f64> {
    if !lo.is_finite() || !hi.is_finite() || hi < lo {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad)..(hi + pad)
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn build<'a, DB: DrawingBackend + 'a>(
    root: &'a DrawingArea<DB, Shift>,
    title: &str,
    x: Range<f64>,
    y: Range<f64>,
) -> Result<Chart<'a, DB>, ExportError> {
    ChartBuilder::on(root)
        .caption(title, ("sans-serif", 40.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x, y)
        .map_err(draw_err)
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(chart: &mut Chart<'a, DB>) -> Result<(), ExportError> {
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    pub fn supports(kind: ChartKind) -> bool {
        matches!(
            kind,
            ChartKind::Bar
                | ChartKind::Line
                | ChartKind::MultiLine
                | ChartKind::Area
                | ChartKind::Scatter
                | ChartKind::Histogram
                | ChartKind::Density
                | ChartKind::Candlestick
        )
    }

    /// Write `kind` drawn from `data` as a PNG at `path`.
    pub fn render_png(
        kind: ChartKind,
        data: &Datasets,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ExportError> {
        if !Self::supports(kind) {
            return Err(ExportError::Unsupported(kind.title()));
        }
        {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            Self::render_on(&root, kind, data)?;
            root.present().map_err(draw_err)?;
        }
        info!(chart = kind.title(), path = %path.display(), "Exported chart image");
        Ok(())
    }

    fn render_on<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        kind: ChartKind,
        data: &Datasets,
    ) -> Result<(), ExportError> {
        match kind {
            ChartKind::Bar => Self::bar(root, data),
            ChartKind::Line => Self::lines(root, data, 1, false),
            ChartKind::MultiLine => Self::lines(root, data, usize::MAX, false),
            ChartKind::Area => Self::lines(root, data, 1, true),
            ChartKind::Scatter => Self::scatter(root, data),
            ChartKind::Histogram => Self::histogram(root, data),
            ChartKind::Density => Self::density(root, data),
            ChartKind::Candlestick => Self::candlestick(root, data),
            other => Err(ExportError::Unsupported(other.title())),
        }
    }

    fn bar<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &Datasets,
    ) -> Result<(), ExportError> {
        if data.categories.is_empty() {
            return Err(ExportError::Empty("Bar"));
        }
        let n = data.categories.len();
        let (_, hi) = bounds(data.categories.iter().map(|c| c.value));
        let mut chart = build(root, "Sales", -0.5..n as f64 - 0.5, 0.0..hi * 1.1)?;

        let label = |x: &f64| {
            let i = x.round();
            if (x - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            data.categories
                .get(i as usize)
                .map(|c| c.label.clone())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&label)
            .y_desc("Sales")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(data.categories.iter().enumerate().map(|(i, c)| {
                let x = i as f64;
                Rectangle::new([(x - 0.35, 0.0), (x + 0.35, c.value)], palette(i).filled())
            }))
            .map_err(draw_err)?;
        Ok(())
    }

    fn lines<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &Datasets,
        limit: usize,
        fill: bool,
    ) -> Result<(), ExportError> {
        let series: Vec<_> = data.trends.iter().take(limit).collect();
        if series.iter().all(|s| s.points.is_empty()) {
            return Err(ExportError::Empty("Line"));
        }
        let (x_lo, x_hi) = bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p[0])));
        let (y_lo, y_hi) = bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p[1])));
        let y_lo = if fill { y_lo.min(0.0) } else { y_lo };
        let title = if series.len() > 1 { "Trends" } else { "Revenue" };
        let mut chart = build(root, title, x_lo..x_hi.max(x_lo + 1.0), padded(y_lo, y_hi))?;

        chart
            .configure_mesh()
            .x_desc("Week")
            .draw()
            .map_err(draw_err)?;

        for (i, s) in series.iter().enumerate() {
            let color = palette(i);
            let points = s.points.iter().map(|p| (p[0], p[1]));
            if fill {
                chart
                    .draw_series(AreaSeries::new(points, 0.0, color.mix(0.3)).border_style(color))
                    .map_err(draw_err)?
                    .label(s.name.as_str())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
            } else {
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(draw_err)?
                    .label(s.name.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
        }
        draw_legend(&mut chart)
    }

    fn scatter<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &Datasets,
    ) -> Result<(), ExportError> {
        if data.scatter.is_empty() {
            return Err(ExportError::Empty("Scatter"));
        }
        let (x_lo, x_hi) = bounds(data.scatter.iter().map(|p| p.x));
        let (y_lo, y_hi) = bounds(data.scatter.iter().map(|p| p.y));
        let mut chart = build(root, "Clusters", padded(x_lo, x_hi), padded(y_lo, y_hi))?;
        chart.configure_mesh().draw().map_err(draw_err)?;

        let groups = data.scatter.iter().map(|p| p.group).max().map_or(0, |g| g + 1);
        for g in 0..groups {
            let color = palette(g);
            chart
                .draw_series(
                    data.scatter
                        .iter()
                        .filter(|p| p.group == g)
                        .map(|p| Circle::new((p.x, p.y), 3, color.filled())),
                )
                .map_err(draw_err)?
                .label(format!("Cluster {}", g + 1))
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
        }
        draw_legend(&mut chart)
    }

    fn histogram<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &Datasets,
    ) -> Result<(), ExportError> {
        let all: Vec<f64> = data.samples.iter().flat_map(|g| g.values.iter().copied()).collect();
        let bins = stats::histogram(&all, EXPORT_BINS);
        let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
            return Err(ExportError::Empty("Histogram"));
        };
        let peak = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;
        let mut chart = build(root, "Distribution", first.start..last.end, 0.0..peak * 1.1 + 1.0)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Value")
            .y_desc("Count")
            .draw()
            .map_err(draw_err)?;

        let color = palette(7);
        chart
            .draw_series(bins.iter().map(|b| {
                Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], color.mix(0.8).filled())
            }))
            .map_err(draw_err)?;
        Ok(())
    }

    fn density<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &Datasets,
    ) -> Result<(), ExportError> {
        let curves: Vec<(String, Vec<[f64; 2]>)> = data
            .samples
            .iter()
            .map(|g| (g.name.clone(), stats::kde_curve(&g.values, EXPORT_KDE_POINTS)))
            .filter(|(_, curve)| !curve.is_empty())
            .collect();
        if curves.is_empty() {
            return Err(ExportError::Empty("Density"));
        }
        let (x_lo, x_hi) = bounds(curves.iter().flat_map(|(_, c)| c.iter().map(|p| p[0])));
        let (_, y_hi) = bounds(curves.iter().flat_map(|(_, c)| c.iter().map(|p| p[1])));
        let mut chart = build(root, "Density", padded(x_lo, x_hi), 0.0..y_hi * 1.1)?;
        chart
            .configure_mesh()
            .x_desc("Value")
            .y_desc("Density")
            .draw()
            .map_err(draw_err)?;

        for (i, (name, curve)) in curves.iter().enumerate() {
            let color = palette(i);
            chart
                .draw_series(
                    AreaSeries::new(curve.iter().map(|p| (p[0], p[1])), 0.0, color.mix(0.25))
                        .border_style(color.stroke_width(2)),
                )
                .map_err(draw_err)?
                .label(name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
        draw_legend(&mut chart)
    }

    fn candlestick<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &Datasets,
    ) -> Result<(), ExportError> {
        if data.candles.is_empty() {
            return Err(ExportError::Empty("Candlestick"));
        }
        let (lo, hi) = bounds(data.candles.iter().flat_map(|c| [c.low, c.high]));
        let n = data.candles.len();
        let mut chart = build(root, "Stock Price", -1.0..n as f64, padded(lo, hi))?;

        let label = |x: &f64| {
            let i = x.round();
            if (x - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            data.candles
                .get(i as usize)
                .map(|c| c.time.format("%m-%d").to_string())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .x_label_formatter(&label)
            .y_desc("Price")
            .draw()
            .map_err(draw_err)?;

        let gain = rgb(UP_COLOR);
        let loss = rgb(DOWN_COLOR);
        let body = ((800 / n.max(1)) as u32).clamp(2, 16);
        chart
            .draw_series(data.candles.iter().enumerate().map(|(i, c)| {
                CandleStick::new(
                    i as f64,
                    c.open,
                    c.high,
                    c.low,
                    c.close,
                    gain.filled(),
                    loss.filled(),
                    body,
                )
            }))
            .map_err(draw_err)?;
        Ok(())
    }
}
