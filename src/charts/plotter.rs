//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::charts::painter::ChartPainter;
use crate::charts::ChartKind;
use crate::data::{Candle, Datasets, WeatherSample};
use crate::layout::{cartesian, Projection, Rotation};
use crate::stats::{self, BoxSummary};
use egui::Color32;
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, LineStyle, MarkerShape,
    Plot, PlotPoint, PlotUi, Points, Polygon, Text,
};
use std::ops::RangeInclusive;

/// Color palette for series
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 87, 34),   // Deep Orange
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

pub const UP_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
pub const DOWN_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

const MOVING_AVERAGE_WINDOW: usize = 6;
const CONFIDENCE_LEVEL: f64 = 0.95;

/// Rendering knobs taken from the settings.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub kde_points: usize,
    pub histogram_bins: usize,
    pub projection: Projection,
}

/// Creates the gallery charts.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw `kind` into the remaining space of `ui`.
    pub fn draw(
        ui: &mut egui::Ui,
        kind: ChartKind,
        data: &Datasets,
        options: &ViewOptions,
        rotation: &mut Rotation,
    ) {
        match kind {
            ChartKind::Bar => Self::draw_bar(ui, data),
            ChartKind::GroupedBar => Self::draw_grouped_bar(ui, data),
            ChartKind::StackedBar => Self::draw_stacked_bar(ui, data),
            ChartKind::HorizontalBar => Self::draw_horizontal_bar(ui, data),
            ChartKind::Lollipop => Self::draw_lollipop(ui, data),
            ChartKind::Line => Self::draw_line(ui, data),
            ChartKind::MultiLine => Self::draw_multi_line(ui, data),
            ChartKind::Step => Self::draw_step(ui, data),
            ChartKind::Area => Self::draw_area(ui, data),
            ChartKind::StackedArea => Self::draw_stacked_area(ui, data),
            ChartKind::Scatter => Self::draw_scatter(ui, data, false),
            ChartKind::Bubble => Self::draw_scatter(ui, data, true),
            ChartKind::Histogram => Self::draw_histogram(ui, data, options.histogram_bins),
            ChartKind::Density => Self::draw_density(ui, data, options.kde_points),
            ChartKind::BoxPlot => Self::draw_boxplot(ui, data),
            ChartKind::Violin => Self::draw_violin(ui, data, options.kde_points),
            ChartKind::ErrorBar => Self::draw_error_bars(ui, data),
            ChartKind::Candlestick => Self::draw_candlestick(ui, &data.candles),
            ChartKind::Ohlc => Self::draw_ohlc(ui, &data.candles),
            ChartKind::Volume => Self::draw_volume(ui, &data.candles),
            ChartKind::Waterfall => Self::draw_waterfall(ui, data),
            ChartKind::Funnel => Self::draw_funnel(ui, data),
            ChartKind::TemperatureRange => Self::draw_temperature(ui, &data.weather),
            ChartKind::Pie => ChartPainter::draw_pie(ui, data, false),
            ChartKind::Donut => ChartPainter::draw_pie(ui, data, true),
            ChartKind::Treemap => ChartPainter::draw_treemap(ui, data),
            ChartKind::Sunburst => ChartPainter::draw_sunburst(ui, data),
            ChartKind::Heatmap => ChartPainter::draw_heatmap(ui, data),
            ChartKind::Radar => ChartPainter::draw_radar(ui, data),
            ChartKind::Gauge => ChartPainter::draw_gauge(ui, data.gauge),
            ChartKind::Scatter3D => {
                ChartPainter::draw_scatter_3d(ui, &data.cloud, rotation, options.projection)
            }
        }
    }

    fn plot<'a>(id: &'a str, ui: &egui::Ui) -> Plot<'a> {
        Plot::new(id)
            .height(ui.available_height().max(240.0))
            .legend(Legend::default())
            .allow_scroll(false)
    }

    /// Axis formatter that names integer grid marks after `labels`.
    fn label_formatter(
        labels: Vec<String>,
    ) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
        move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        }
    }

    /// Fill between two polylines as a run of trapezoids.
    fn fill_between(
        plot_ui: &mut PlotUi,
        name: &str,
        color: Color32,
        left: &[[f64; 2]],
        right: &[[f64; 2]],
    ) {
        for i in 0..left.len().min(right.len()).saturating_sub(1) {
            let quad = vec![left[i], left[i + 1], right[i + 1], right[i]];
            plot_ui.polygon(
                Polygon::new(quad)
                    .fill_color(color)
                    .stroke(egui::Stroke::NONE)
                    .name(name),
            );
        }
    }

    fn draw_bar(ui: &mut egui::Ui, data: &Datasets) {
        let labels: Vec<String> = data.categories.iter().map(|c| c.label.clone()).collect();
        let bars: Vec<Bar> = data
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new(i as f64, c.value)
                    .width(0.7)
                    .name(&c.label)
                    .fill(Self::color(i).gamma_multiply(0.8))
            })
            .collect();

        Self::plot("bar", ui)
            .x_axis_formatter(Self::label_formatter(labels))
            .y_axis_label("Sales")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Sales"));
            });
    }

    fn draw_grouped_bar(ui: &mut egui::Ui, data: &Datasets) {
        let n = data.grouped.len().max(1) as f64;
        let width = 0.8 / n;

        Self::plot("grouped_bar", ui)
            .x_axis_formatter(Self::label_formatter(data.group_labels.clone()))
            .show(ui, |plot_ui| {
                for (s, series) in data.grouped.iter().enumerate() {
                    let offset = (s as f64 - (n - 1.0) / 2.0) * width;
                    let bars = series
                        .points
                        .iter()
                        .map(|p| Bar::new(p[0] + offset, p[1]).width(width * 0.95))
                        .collect();
                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .name(&series.name)
                            .color(Self::color(s)),
                    );
                }
            });
    }

    fn draw_stacked_bar(ui: &mut egui::Ui, data: &Datasets) {
        let values: Vec<Vec<f64>> = data.grouped.iter().map(|s| s.values()).collect();
        let spans = cartesian::stack(&values);

        Self::plot("stacked_bar", ui)
            .x_axis_formatter(Self::label_formatter(data.group_labels.clone()))
            .show(ui, |plot_ui| {
                for (s, (series, spans)) in data.grouped.iter().zip(&spans).enumerate() {
                    let bars = spans
                        .iter()
                        .enumerate()
                        .map(|(q, &(base, top))| {
                            Bar::new(q as f64, top - base).base_offset(base).width(0.6)
                        })
                        .collect();
                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .name(&series.name)
                            .color(Self::color(s)),
                    );
                }
            });
    }

    fn draw_horizontal_bar(ui: &mut egui::Ui, data: &Datasets) {
        let mut ranked = data.categories.clone();
        ranked.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));
        let labels: Vec<String> = ranked.iter().map(|c| c.label.clone()).collect();
        let bars = ranked
            .iter()
            .enumerate()
            .map(|(i, c)| Bar::new(i as f64, c.value).width(0.7).name(&c.label))
            .collect();

        Self::plot("horizontal_bar", ui)
            .y_axis_formatter(Self::label_formatter(labels))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .horizontal()
                        .name("Sales")
                        .color(Self::color(4)),
                );
            });
    }

    fn draw_lollipop(ui: &mut egui::Ui, data: &Datasets) {
        let labels: Vec<String> = data.categories.iter().map(|c| c.label.clone()).collect();
        let color = Self::color(3);

        Self::plot("lollipop", ui)
            .x_axis_formatter(Self::label_formatter(labels))
            .include_y(0.0)
            .show(ui, |plot_ui| {
                for (i, c) in data.categories.iter().enumerate() {
                    let x = i as f64;
                    plot_ui.line(
                        Line::new(vec![[x, 0.0], [x, c.value]])
                            .color(color)
                            .width(2.0),
                    );
                }
                let heads: Vec<[f64; 2]> = data
                    .categories
                    .iter()
                    .enumerate()
                    .map(|(i, c)| [i as f64, c.value])
                    .collect();
                plot_ui.points(Points::new(heads).radius(7.0).color(color).name("Value"));
            });
    }

    fn draw_line(ui: &mut egui::Ui, data: &Datasets) {
        let Some(series) = data.trends.first() else {
            return;
        };
        let averaged: Vec<[f64; 2]> = series
            .points
            .iter()
            .zip(stats::moving_average(&series.values(), MOVING_AVERAGE_WINDOW))
            .map(|(p, avg)| [p[0], avg])
            .collect();

        Self::plot("line", ui)
            .x_axis_label("Week")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(series.points.clone())
                        .color(Self::color(0))
                        .width(2.0)
                        .name(&series.name),
                );
                plot_ui.line(
                    Line::new(averaged)
                        .color(Self::color(4))
                        .style(LineStyle::Dashed { length: 8.0 })
                        .name(format!("{}-week average", MOVING_AVERAGE_WINDOW)),
                );
            });
    }

    fn draw_multi_line(ui: &mut egui::Ui, data: &Datasets) {
        Self::plot("multi_line", ui)
            .x_axis_label("Week")
            .show(ui, |plot_ui| {
                for (s, series) in data.trends.iter().enumerate() {
                    plot_ui.line(
                        Line::new(series.points.clone())
                            .color(Self::color(s))
                            .width(2.0)
                            .name(&series.name),
                    );
                }
            });
    }

    fn draw_step(ui: &mut egui::Ui, data: &Datasets) {
        let Some(series) = data.trends.first() else {
            return;
        };
        Self::plot("step", ui).show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(cartesian::steps(&series.points))
                    .color(Self::color(5))
                    .width(2.0)
                    .name(&series.name),
            );
        });
    }

    fn draw_area(ui: &mut egui::Ui, data: &Datasets) {
        let Some(series) = data.trends.first() else {
            return;
        };
        Self::plot("area", ui).include_y(0.0).show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(series.points.clone())
                    .color(Self::color(0))
                    .width(2.0)
                    .fill(0.0_f32)
                    .name(&series.name),
            );
        });
    }

    fn draw_stacked_area(ui: &mut egui::Ui, data: &Datasets) {
        let values: Vec<Vec<f64>> = data.trends.iter().map(|s| s.values()).collect();
        let spans = cartesian::stack(&values);

        Self::plot("stacked_area", ui).show(ui, |plot_ui| {
            for (s, (series, spans)) in data.trends.iter().zip(&spans).enumerate() {
                let color = Self::color(s);
                let xs = series.points.iter().map(|p| p[0]);
                let lower: Vec<[f64; 2]> = xs.clone().zip(spans).map(|(x, &(b, _))| [x, b]).collect();
                let upper: Vec<[f64; 2]> = xs.zip(spans).map(|(x, &(_, t))| [x, t]).collect();
                Self::fill_between(plot_ui, &series.name, color.gamma_multiply(0.5), &lower, &upper);
                plot_ui.line(Line::new(upper).color(color).width(1.5).name(&series.name));
            }
        });
    }

    fn draw_scatter(ui: &mut egui::Ui, data: &Datasets, bubbles: bool) {
        let groups = data.scatter.iter().map(|p| p.group).max().map_or(0, |g| g + 1);
        let id = if bubbles { "bubble" } else { "scatter" };

        Self::plot(id, ui).show(ui, |plot_ui| {
            for g in 0..groups {
                let name = format!("Cluster {}", g + 1);
                let color = Self::color(g);
                let members = data.scatter.iter().filter(|p| p.group == g);
                if bubbles {
                    for p in members {
                        plot_ui.points(
                            Points::new(vec![[p.x, p.y]])
                                .radius(p.size as f32)
                                .color(color.gamma_multiply(0.5))
                                .name(&name),
                        );
                    }
                } else {
                    let points: Vec<[f64; 2]> = members.map(|p| [p.x, p.y]).collect();
                    plot_ui.points(Points::new(points).radius(3.5).color(color).name(&name));
                }
            }
        });
    }

    fn draw_histogram(ui: &mut egui::Ui, data: &Datasets, bins: usize) {
        let all: Vec<f64> = data.samples.iter().flat_map(|g| g.values.iter().copied()).collect();
        let bars = stats::histogram(&all, bins)
            .iter()
            .map(|b| {
                Bar::new(b.center(), b.count as f64)
                    .width(b.width())
                    .name(format!("{:.1}..{:.1}", b.start, b.end))
            })
            .collect();

        Self::plot("histogram", ui)
            .x_axis_label("Value")
            .y_axis_label("Count")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Samples").color(Self::color(7)));
            });
    }

    fn draw_density(ui: &mut egui::Ui, data: &Datasets, points: usize) {
        Self::plot("density", ui)
            .x_axis_label("Value")
            .y_axis_label("Density")
            .show(ui, |plot_ui| {
                for (i, group) in data.samples.iter().enumerate() {
                    plot_ui.line(
                        Line::new(stats::kde_curve(&group.values, points))
                            .color(Self::color(i))
                            .width(2.0)
                            .fill(0.0_f32)
                            .name(&group.name),
                    );
                }
            });
    }

    fn draw_boxplot(ui: &mut egui::Ui, data: &Datasets) {
        let labels: Vec<String> = data.samples.iter().map(|g| g.name.clone()).collect();

        Self::plot("boxplot", ui)
            .x_axis_formatter(Self::label_formatter(labels))
            .y_axis_label("Value")
            .show(ui, |plot_ui| {
                for (i, group) in data.samples.iter().enumerate() {
                    let Some(summary) = BoxSummary::from_values(&group.values) else {
                        continue;
                    };
                    let color = Self::color(i);
                    let x = i as f64;

                    let box_elem = BoxElem::new(
                        x,
                        BoxSpread::new(
                            summary.whisker_low,
                            summary.q1,
                            summary.median,
                            summary.q3,
                            summary.whisker_high,
                        ),
                    )
                    .name(format!("{} (IQR {:.1})", group.name, summary.iqr()))
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color));
                    plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(&group.name));

                    if !summary.outliers.is_empty() {
                        let outliers: Vec<[f64; 2]> =
                            summary.outliers.iter().map(|&v| [x, v]).collect();
                        plot_ui.points(
                            Points::new(outliers)
                                .shape(MarkerShape::Diamond)
                                .radius(4.0)
                                .color(color)
                                .name(&group.name),
                        );
                    }
                }
            });
    }

    fn draw_violin(ui: &mut egui::Ui, data: &Datasets, points: usize) {
        let labels: Vec<String> = data.samples.iter().map(|g| g.name.clone()).collect();
        let curves: Vec<Vec<[f64; 2]>> = data
            .samples
            .iter()
            .map(|g| stats::kde_curve(&g.values, points))
            .collect();
        let peak = curves
            .iter()
            .flatten()
            .map(|p| p[1])
            .fold(0.0, f64::max);
        let half_width = 0.4;

        Self::plot("violin", ui)
            .x_axis_formatter(Self::label_formatter(labels))
            .y_axis_label("Value")
            .show(ui, |plot_ui| {
                for (i, (group, curve)) in data.samples.iter().zip(&curves).enumerate() {
                    if peak <= 0.0 {
                        break;
                    }
                    let x = i as f64;
                    let color = Self::color(i);
                    let left: Vec<[f64; 2]> = curve
                        .iter()
                        .map(|p| [x - half_width * p[1] / peak, p[0]])
                        .collect();
                    let right: Vec<[f64; 2]> = curve
                        .iter()
                        .map(|p| [x + half_width * p[1] / peak, p[0]])
                        .collect();
                    Self::fill_between(plot_ui, &group.name, color.gamma_multiply(0.45), &left, &right);
                    plot_ui.line(Line::new(left).color(color).width(1.0).name(&group.name));
                    plot_ui.line(Line::new(right).color(color).width(1.0).name(&group.name));

                    if let Some(summary) = BoxSummary::from_values(&group.values) {
                        plot_ui.line(
                            Line::new(vec![[x, summary.q1], [x, summary.q3]])
                                .color(Color32::BLACK)
                                .width(4.0),
                        );
                        plot_ui.points(
                            Points::new(vec![[x, summary.median]])
                                .radius(4.0)
                                .color(Color32::WHITE),
                        );
                    }
                }
            });
    }

    fn draw_error_bars(ui: &mut egui::Ui, data: &Datasets) {
        let labels: Vec<String> = data.samples.iter().map(|g| g.name.clone()).collect();

        Self::plot("error_bars", ui)
            .x_axis_formatter(Self::label_formatter(labels))
            .y_axis_label(format!("Mean ({:.0}% CI)", CONFIDENCE_LEVEL * 100.0))
            .show(ui, |plot_ui| {
                for (i, group) in data.samples.iter().enumerate() {
                    let x = i as f64;
                    let color = Self::color(i);
                    let mean = stats::describe(&group.values).mean;
                    if let Some((lo, hi)) = stats::confidence_interval(&group.values, CONFIDENCE_LEVEL) {
                        let cap = 0.12;
                        for segment in [
                            vec![[x, lo], [x, hi]],
                            vec![[x - cap, lo], [x + cap, lo]],
                            vec![[x - cap, hi], [x + cap, hi]],
                        ] {
                            plot_ui.line(Line::new(segment).color(color).width(2.0).name(&group.name));
                        }
                    }
                    plot_ui.points(
                        Points::new(vec![[x, mean]])
                            .radius(5.0)
                            .color(color)
                            .name(&group.name),
                    );
                }
            });
    }

    fn candle_labels(candles: &[Candle]) -> Vec<String> {
        candles.iter().map(|c| c.time.format("%m-%d").to_string()).collect()
    }

    fn draw_candlestick(ui: &mut egui::Ui, candles: &[Candle]) {
        let (mut up, mut down) = (Vec::new(), Vec::new());
        for (i, c) in candles.iter().enumerate() {
            let (body_lo, body_hi) = c.body();
            let color = if c.is_bullish() { UP_COLOR } else { DOWN_COLOR };
            let elem = BoxElem::new(
                i as f64,
                BoxSpread::new(c.low, body_lo, (body_lo + body_hi) / 2.0, body_hi, c.high),
            )
            .whisker_width(0.0)
            .box_width(0.6)
            .fill(color)
            .stroke(egui::Stroke::new(1.0, color));
            if c.is_bullish() {
                up.push(elem);
            } else {
                down.push(elem);
            }
        }

        Self::plot("candlestick", ui)
            .x_axis_formatter(Self::label_formatter(Self::candle_labels(candles)))
            .y_axis_label("Price")
            .show(ui, |plot_ui| {
                plot_ui.box_plot(BoxPlot::new(up).name("Up").color(UP_COLOR));
                plot_ui.box_plot(BoxPlot::new(down).name("Down").color(DOWN_COLOR));
            });
    }

    fn draw_ohlc(ui: &mut egui::Ui, candles: &[Candle]) {
        Self::plot("ohlc", ui)
            .x_axis_formatter(Self::label_formatter(Self::candle_labels(candles)))
            .y_axis_label("Price")
            .show(ui, |plot_ui| {
                for (i, c) in candles.iter().enumerate() {
                    let x = i as f64;
                    let (name, color) = if c.is_bullish() {
                        ("Up", UP_COLOR)
                    } else {
                        ("Down", DOWN_COLOR)
                    };
                    for segment in [
                        vec![[x, c.low], [x, c.high]],
                        vec![[x - 0.3, c.open], [x, c.open]],
                        vec![[x, c.close], [x + 0.3, c.close]],
                    ] {
                        plot_ui.line(Line::new(segment).color(color).width(1.5).name(name));
                    }
                }
            });
    }

    fn draw_volume(ui: &mut egui::Ui, candles: &[Candle]) {
        let bars = candles
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let color = if c.is_bullish() { UP_COLOR } else { DOWN_COLOR };
                Bar::new(i as f64, c.volume).width(0.7).fill(color.gamma_multiply(0.8))
            })
            .collect();

        Self::plot("volume", ui)
            .x_axis_formatter(Self::label_formatter(Self::candle_labels(candles)))
            .y_axis_label("Shares")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Volume"));
            });
    }

    fn draw_waterfall(ui: &mut egui::Ui, data: &Datasets) {
        let deltas: Vec<f64> = data.waterfall.iter().map(|s| s.delta).collect();
        let spans = cartesian::waterfall(&deltas);
        let mut labels: Vec<String> = data.waterfall.iter().map(|s| s.label.clone()).collect();
        labels.push("Net".to_string());

        let last = spans.len().saturating_sub(1);
        let bars = spans
            .iter()
            .enumerate()
            .map(|(i, &(start, end))| {
                let color = if i == last {
                    PALETTE[0]
                } else if end >= start {
                    UP_COLOR
                } else {
                    DOWN_COLOR
                };
                Bar::new(i as f64, (end - start).abs())
                    .base_offset(start.min(end))
                    .width(0.6)
                    .fill(color)
                    .name(&labels[i])
            })
            .collect();
        let connectors: Vec<Line> = spans
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let level = w[0].1;
                Line::new(vec![[i as f64 + 0.3, level], [i as f64 + 0.7, level]])
                    .color(Color32::GRAY)
                    .style(LineStyle::Dashed { length: 4.0 })
            })
            .collect();

        Self::plot("waterfall", ui)
            .x_axis_formatter(Self::label_formatter(labels))
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Profit and loss"));
                for line in connectors {
                    plot_ui.line(line);
                }
            });
    }

    fn draw_funnel(ui: &mut egui::Ui, data: &Datasets) {
        let n = data.funnel.len();
        // first stage at the top
        let labels: Vec<String> = data.funnel.iter().rev().map(|s| s.label.clone()).collect();
        let bars = data
            .funnel
            .iter()
            .enumerate()
            .map(|(i, stage)| {
                Bar::new((n - 1 - i) as f64, stage.value)
                    .base_offset(-stage.value / 2.0)
                    .width(0.8)
                    .fill(Self::color(i))
                    .name(&stage.label)
            })
            .collect();
        let first = data.funnel.first().map_or(0.0, |s| s.value);

        Self::plot("funnel", ui)
            .y_axis_formatter(Self::label_formatter(labels))
            .show_axes([false, true])
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Stages"));
                for (i, stage) in data.funnel.iter().enumerate() {
                    let share = if first > 0.0 { 100.0 * stage.value / first } else { 0.0 };
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(0.0, (n - 1 - i) as f64),
                            format!("{:.0} ({:.0}%)", stage.value, share),
                        )
                        .color(Color32::WHITE),
                    );
                }
            });
    }

    fn draw_temperature(ui: &mut egui::Ui, weather: &[WeatherSample]) {
        let labels: Vec<String> = weather.iter().map(|w| w.time.format("%H:%M").to_string()).collect();
        let low: Vec<[f64; 2]> = weather.iter().enumerate().map(|(i, w)| [i as f64, w.low]).collect();
        let high: Vec<[f64; 2]> = weather.iter().enumerate().map(|(i, w)| [i as f64, w.high]).collect();
        let mean: Vec<[f64; 2]> = weather.iter().enumerate().map(|(i, w)| [i as f64, w.mean]).collect();
        let rain: Vec<Bar> = weather
            .iter()
            .enumerate()
            .filter(|(_, w)| w.precipitation > 0.0)
            .map(|(i, w)| Bar::new(i as f64, w.precipitation).width(0.6))
            .collect();
        let color = Self::color(8);

        Self::plot("temperature", ui)
            .x_axis_formatter(Self::label_formatter(labels))
            .y_axis_label("°C / mm")
            .show(ui, |plot_ui| {
                Self::fill_between(plot_ui, "Low to high", color.gamma_multiply(0.3), &low, &high);
                plot_ui.line(Line::new(mean).color(color).width(2.0).name("Mean"));
                plot_ui.bar_chart(BarChart::new(rain).name("Precipitation").color(Self::color(7)));
            });
    }
}
