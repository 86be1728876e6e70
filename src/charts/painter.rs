//! Chart Painter Module
//! Charts without cartesian axes, drawn directly with the egui painter.

use crate::charts::plotter::{ChartPlotter, DOWN_COLOR, UP_COLOR};
use crate::data::{Datasets, Point3};
use crate::layout::projection::{self, Projection, Rotation};
use crate::layout::{radial, treemap, Rect};
use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Vec2};
use std::f64::consts::TAU;

/// Segments per full turn when approximating arcs.
const ARC_RESOLUTION: f64 = 180.0;
const DRAG_SPEED: f64 = 0.01;
const GAUGE_START: f64 = -TAU / 3.0;
const GAUGE_SWEEP: f64 = 2.0 * TAU / 3.0;

const COLD: Color32 = Color32::from_rgb(52, 152, 219);
const WARM: Color32 = Color32::from_rgb(243, 156, 18);
const HOT: Color32 = Color32::from_rgb(231, 76, 60);

pub struct ChartPainter;

/// Screen position at `angle` radians clockwise from 12 o'clock.
pub fn polar(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    let (s, c) = angle.sin_cos();
    center + vec2(s as f32, -c as f32) * radius
}

/// Inverse of [`polar`]: angle in `0..TAU` of an offset from the center.
pub fn angle_of(offset: Vec2) -> f64 {
    (offset.x as f64).atan2(-offset.y as f64).rem_euclid(TAU)
}

pub fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

/// Cold to hot scale for `t` in `0..=1`.
pub fn heat_color(t: f32) -> Color32 {
    if t < 0.5 {
        lerp_color(COLD, WARM, t * 2.0)
    } else {
        lerp_color(WARM, HOT, (t - 0.5) * 2.0)
    }
}

/// Fill a ring segment as convex pieces; `inner == 0` gives a pie slice.
fn ring_segment(
    painter: &egui::Painter,
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f64,
    end: f64,
    color: Color32,
) {
    let sweep = end - start;
    if sweep <= 0.0 {
        return;
    }
    let steps = ((sweep / TAU * ARC_RESOLUTION).ceil() as usize).max(1);
    for i in 0..steps {
        let a0 = start + sweep * i as f64 / steps as f64;
        let a1 = start + sweep * (i + 1) as f64 / steps as f64;
        let points = if inner <= 0.0 {
            vec![center, polar(center, outer, a0), polar(center, outer, a1)]
        } else {
            vec![
                polar(center, inner, a0),
                polar(center, outer, a0),
                polar(center, outer, a1),
                polar(center, inner, a1),
            ]
        };
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }
}

fn arc_line(center: Pos2, radius: f32, start: f64, end: f64) -> Vec<Pos2> {
    let steps = (((end - start) / TAU * ARC_RESOLUTION).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| polar(center, radius, start + (end - start) * i as f64 / steps as f64))
        .collect()
}

fn to_screen(rect: &Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        pos2(rect.x as f32, rect.y as f32),
        vec2(rect.w as f32, rect.h as f32),
    )
}

fn canvas(ui: &mut egui::Ui, sense: Sense) -> (egui::Response, egui::Painter) {
    let size = vec2(ui.available_width(), ui.available_height().max(320.0));
    ui.allocate_painter(size, sense)
}

impl ChartPainter {
    pub fn draw_pie(ui: &mut egui::Ui, data: &Datasets, donut: bool) {
        let (response, painter) = canvas(ui, Sense::hover());
        let area = response.rect;
        let text_color = ui.visuals().text_color();

        let legend_width = if area.width() > 520.0 { 180.0 } else { 0.0 };
        let center = pos2(area.left() + (area.width() - legend_width) / 2.0, area.center().y);
        let radius = ((area.width() - legend_width).min(area.height()) / 2.0 - 12.0).max(10.0);
        let hole = if donut { radius * 0.55 } else { 0.0 };

        let values: Vec<f64> = data.categories.iter().map(|c| c.value).collect();
        let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
        let wedges = radial::wedges(&values);

        let hovered = response.hover_pos().and_then(|pos| {
            let offset = pos - center;
            let r = offset.length();
            if r < hole || r > radius {
                return None;
            }
            let angle = angle_of(offset);
            wedges
                .iter()
                .position(|w| w.sweep() > 0.0 && angle >= w.start && angle < w.end)
        });

        for (i, wedge) in wedges.iter().enumerate() {
            let outer = if hovered == Some(i) { radius + 6.0 } else { radius };
            ring_segment(&painter, center, hole, outer, wedge.start, wedge.end, ChartPlotter::color(i));
        }
        for wedge in &wedges {
            if wedge.sweep() > 0.0 {
                painter.line_segment(
                    [polar(center, hole, wedge.start), polar(center, radius, wedge.start)],
                    Stroke::new(1.5, ui.visuals().panel_fill),
                );
            }
        }

        // percentage labels on slices wide enough to hold them
        for (wedge, category) in wedges.iter().zip(&data.categories) {
            if wedge.sweep() < 0.25 || total <= 0.0 {
                continue;
            }
            let label_radius = if donut { (hole + radius) / 2.0 } else { radius * 0.65 };
            painter.text(
                polar(center, label_radius, wedge.mid()),
                Align2::CENTER_CENTER,
                format!("{:.0}%", 100.0 * category.value / total),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
        }

        if donut {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                format!("{:.0}\ntotal", total),
                FontId::proportional(18.0),
                text_color,
            );
        }

        if legend_width > 0.0 {
            let mut y = area.top() + 16.0;
            let x = area.right() - legend_width + 8.0;
            for (i, category) in data.categories.iter().enumerate() {
                painter.rect_filled(
                    egui::Rect::from_min_size(pos2(x, y), vec2(12.0, 12.0)),
                    2.0,
                    ChartPlotter::color(i),
                );
                painter.text(
                    pos2(x + 18.0, y + 6.0),
                    Align2::LEFT_CENTER,
                    &category.label,
                    FontId::proportional(13.0),
                    text_color,
                );
                y += 20.0;
            }
        }

        if let Some(category) = hovered.and_then(|i| data.categories.get(i)) {
            response.on_hover_text_at_pointer(format!("{}: {:.1}", category.label, category.value));
        }
    }

    pub fn draw_treemap(ui: &mut egui::Ui, data: &Datasets) {
        let (response, painter) = canvas(ui, Sense::hover());
        let area = response.rect.shrink(4.0);
        let bounds = Rect::new(
            area.left() as f64,
            area.top() as f64,
            area.width() as f64,
            area.height() as f64,
        );
        let placed = treemap::nest(&data.tree, bounds);
        let hover = response.hover_pos();
        let mut tooltip = None;

        for cell in placed.iter().filter(|c| c.depth > 0) {
            let node = &data.tree[cell.index];
            let rect = to_screen(&cell.rect).shrink(1.0);
            let shade = 0.12 * (cell.index % 4) as f32;
            let mut fill = lerp_color(ChartPlotter::color(node.color), Color32::WHITE, shade);
            if hover.is_some_and(|p| rect.contains(p)) {
                fill = lerp_color(fill, Color32::WHITE, 0.3);
                tooltip = Some(format!("{}: {:.1}", node.name, node.value));
            }
            painter.rect_filled(rect, 2.0, fill);
            if rect.width() > 60.0 && rect.height() > 18.0 {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    &node.name,
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }
        }

        for cell in placed.iter().filter(|c| c.depth == 0) {
            let rect = to_screen(&cell.rect);
            painter.rect_stroke(rect, 0.0, Stroke::new(2.5, ui.visuals().panel_fill));
            painter.text(
                rect.left_top() + vec2(6.0, 4.0),
                Align2::LEFT_TOP,
                &data.tree[cell.index].name,
                FontId::proportional(14.0),
                Color32::WHITE,
            );
        }

        if let Some(text) = tooltip {
            response.on_hover_text_at_pointer(text);
        }
    }

    pub fn draw_sunburst(ui: &mut egui::Ui, data: &Datasets) {
        let (response, painter) = canvas(ui, Sense::hover());
        let area = response.rect;
        let center = area.center();
        let radius = (area.width().min(area.height()) / 2.0 - 10.0).max(10.0);

        let arcs = radial::sunburst(&data.tree);
        let rings = arcs.iter().map(|a| a.depth).max().map_or(1, |d| d + 1);
        let hole = radius * 0.2;
        let ring = (radius - hole) / rings as f32;
        let band = |depth: usize| (hole + ring * depth as f32, hole + ring * (depth + 1) as f32);

        let hovered = response.hover_pos().and_then(|pos| {
            let offset = pos - center;
            let angle = angle_of(offset);
            arcs.iter().position(|arc| {
                let (inner, outer) = band(arc.depth);
                let r = offset.length();
                r >= inner && r < outer && angle >= arc.wedge.start && angle < arc.wedge.end
            })
        });

        for (i, arc) in arcs.iter().enumerate() {
            let (inner, outer) = band(arc.depth);
            let base = ChartPlotter::color(arc.color);
            let mut fill = lerp_color(base, Color32::WHITE, 0.18 * arc.depth as f32);
            if hovered == Some(i) {
                fill = lerp_color(fill, Color32::WHITE, 0.3);
            }
            ring_segment(&painter, center, inner, outer - 1.0, arc.wedge.start, arc.wedge.end, fill);

            if arc.wedge.sweep() * ((inner + outer) / 2.0) as f64 > 48.0 {
                painter.text(
                    polar(center, (inner + outer) / 2.0, arc.wedge.mid()),
                    Align2::CENTER_CENTER,
                    &arc.name,
                    FontId::proportional(11.0),
                    Color32::WHITE,
                );
            }
        }

        if let Some(arc) = hovered.and_then(|i| arcs.get(i)) {
            let node = &data.tree[arc.index];
            let text = match &node.parent {
                Some(parent) => format!("{} / {}: {:.1}", parent, node.name, node.value),
                None => node.name.clone(),
            };
            response.on_hover_text_at_pointer(text);
        }
    }

    pub fn draw_heatmap(ui: &mut egui::Ui, data: &Datasets) {
        let (response, painter) = canvas(ui, Sense::hover());
        let area = response.rect;
        let text_color = ui.visuals().text_color();
        let rows = data.heat_rows.len().max(1);
        let cols = data.heat_cols.len().max(1);

        let margin = vec2(48.0, 24.0);
        let grid = egui::Rect::from_min_max(area.min + margin, area.max - vec2(8.0, 8.0));
        let cell = vec2(grid.width() / cols as f32, grid.height() / rows as f32);

        let (lo, hi) = data
            .heat
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
                (lo.min(c.value), hi.max(c.value))
            });
        let span = if hi > lo { hi - lo } else { 1.0 };
        let mut tooltip = None;

        for c in &data.heat {
            let min = grid.min + vec2(cell.x * c.col as f32, cell.y * c.row as f32);
            let rect = egui::Rect::from_min_size(min, cell).shrink(0.5);
            painter.rect_filled(rect, 0.0, heat_color(((c.value - lo) / span) as f32));
            if response.hover_pos().is_some_and(|p| rect.contains(p)) {
                painter.rect_stroke(rect, 0.0, Stroke::new(2.0, text_color));
                tooltip = Some(format!(
                    "{} {}: {:.1}",
                    data.heat_rows.get(c.row).map_or("", String::as_str),
                    data.heat_cols.get(c.col).map_or("", String::as_str),
                    c.value
                ));
            }
        }

        for (row, name) in data.heat_rows.iter().enumerate() {
            painter.text(
                pos2(grid.left() - 6.0, grid.top() + cell.y * (row as f32 + 0.5)),
                Align2::RIGHT_CENTER,
                name,
                FontId::proportional(12.0),
                text_color,
            );
        }
        // every other column label when cells get narrow
        let stride = if cell.x < 28.0 { 2 } else { 1 };
        for (col, name) in data.heat_cols.iter().enumerate().step_by(stride) {
            painter.text(
                pos2(grid.left() + cell.x * (col as f32 + 0.5), grid.top() - 6.0),
                Align2::CENTER_BOTTOM,
                name,
                FontId::proportional(11.0),
                text_color,
            );
        }

        if let Some(text) = tooltip {
            response.on_hover_text_at_pointer(text);
        }
    }

    pub fn draw_radar(ui: &mut egui::Ui, data: &Datasets) {
        let (response, painter) = canvas(ui, Sense::hover());
        let area = response.rect;
        let center = area.center();
        let radius = (area.width().min(area.height()) / 2.0 - 40.0).max(10.0);
        let text_color = ui.visuals().text_color();
        let grid_stroke = Stroke::new(1.0, ui.visuals().weak_text_color());

        let n = data.radar_axes.len();
        if n < 3 {
            return;
        }
        let angle = |i: usize| TAU * i as f64 / n as f64;
        let max = data
            .radar
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
            .max(100.0);

        for level in 1..=5 {
            let r = radius * level as f32 / 5.0;
            let ring: Vec<Pos2> = (0..n).map(|i| polar(center, r, angle(i))).collect();
            painter.add(Shape::closed_line(ring, grid_stroke));
        }
        for (i, name) in data.radar_axes.iter().enumerate() {
            painter.line_segment([center, polar(center, radius, angle(i))], grid_stroke);
            painter.text(
                polar(center, radius + 18.0, angle(i)),
                Align2::CENTER_CENTER,
                name,
                FontId::proportional(13.0),
                text_color,
            );
        }

        for (s, series) in data.radar.iter().enumerate() {
            let color = ChartPlotter::color(s);
            let outline: Vec<Pos2> = (0..n)
                .map(|i| {
                    let value = series.values.get(i).copied().unwrap_or(0.0).max(0.0);
                    polar(center, radius * (value / max) as f32, angle(i))
                })
                .collect();
            // triangle fan keeps every piece convex
            for i in 0..n {
                painter.add(Shape::convex_polygon(
                    vec![center, outline[i], outline[(i + 1) % n]],
                    color.gamma_multiply(0.2),
                    Stroke::NONE,
                ));
            }
            for p in &outline {
                painter.circle_filled(*p, 3.0, color);
            }
            painter.add(Shape::closed_line(outline, Stroke::new(2.0, color)));

            painter.text(
                area.left_top() + vec2(8.0, 8.0 + 18.0 * s as f32),
                Align2::LEFT_TOP,
                &series.name,
                FontId::proportional(13.0),
                color,
            );
        }
    }

    pub fn draw_gauge(ui: &mut egui::Ui, value: f64) {
        let (response, painter) = canvas(ui, Sense::hover());
        let area = response.rect;
        let center = area.center() + vec2(0.0, area.height() * 0.1);
        let radius = (area.width().min(area.height()) / 2.0 - 30.0).max(10.0);
        let text_color = ui.visuals().text_color();
        let value = value.clamp(0.0, 100.0);
        let at = |v: f64| GAUGE_START + GAUGE_SWEEP * v / 100.0;

        let zones = [(0.0, 60.0, UP_COLOR), (60.0, 85.0, WARM), (85.0, 100.0, DOWN_COLOR)];
        for (lo, hi, color) in zones {
            ring_segment(&painter, center, radius * 0.75, radius, at(lo), at(hi), color.gamma_multiply(0.35));
        }
        ring_segment(&painter, center, radius * 0.75, radius, at(0.0), at(value), ChartPlotter::color(0));
        painter.add(Shape::line(
            arc_line(center, radius, at(0.0), at(100.0)),
            Stroke::new(1.0, ui.visuals().weak_text_color()),
        ));

        for tick in (0..=100).step_by(20) {
            let a = at(tick as f64);
            painter.line_segment(
                [polar(center, radius, a), polar(center, radius + 6.0, a)],
                Stroke::new(1.5, text_color),
            );
            painter.text(
                polar(center, radius + 18.0, a),
                Align2::CENTER_CENTER,
                tick.to_string(),
                FontId::proportional(12.0),
                text_color,
            );
        }

        let needle = polar(center, radius * 0.9, at(value));
        painter.line_segment([center, needle], Stroke::new(3.0, text_color));
        painter.circle_filled(center, 6.0, text_color);
        painter.text(
            center + vec2(0.0, radius * 0.35),
            Align2::CENTER_CENTER,
            format!("{:.1}", value),
            FontId::proportional(28.0),
            text_color,
        );
    }

    /// Rotatable point cloud; dragging turns the camera.
    pub fn draw_scatter_3d(
        ui: &mut egui::Ui,
        cloud: &[Point3],
        rotation: &mut Rotation,
        projection: Projection,
    ) {
        let (response, painter) = canvas(ui, Sense::drag());
        if response.dragged() {
            let delta = response.drag_delta();
            *rotation = rotation.dragged(delta.x as f64 * DRAG_SPEED, delta.y as f64 * DRAG_SPEED);
        }
        let area = response.rect;
        let center = area.center();
        let scale = area.width().min(area.height()) * 0.32;
        let text_color = ui.visuals().text_color();
        let to_screen = |x: f64, y: f64| center + vec2(x as f32, -y as f32) * scale;

        // bounding cube
        let edge_stroke = Stroke::new(1.0, ui.visuals().weak_text_color());
        for (a, b) in cube_edges() {
            let ends = projection::project(&[a, b], *rotation, projection);
            if let [p, q] = ends.as_slice() {
                painter.line_segment([to_screen(p.x, p.y), to_screen(q.x, q.y)], edge_stroke);
            }
        }

        for (axis, (end, name)) in projection::axes(*rotation, projection, 1.3)
            .into_iter()
            .zip(["X", "Y", "Z"])
            .enumerate()
        {
            let Some([x, y]) = end else {
                continue;
            };
            let tip = to_screen(x, y);
            let color = ChartPlotter::color(axis + 4);
            painter.line_segment([center, tip], Stroke::new(2.0, color));
            painter.text(tip, Align2::CENTER_CENTER, name, FontId::proportional(13.0), color);
        }

        let positions: Vec<[f64; 3]> = cloud.iter().map(|p| [p.x, p.y, p.z]).collect();
        for p in projection::project(&positions, *rotation, projection) {
            let group = cloud[p.index].group;
            // nearer points are brighter
            let fade = ((1.0 - p.depth) / 2.0).clamp(0.3, 1.0) as f32;
            let color = ChartPlotter::color(group).gamma_multiply(fade);
            painter.circle_filled(to_screen(p.x, p.y), (4.0 * p.scale as f32).max(1.0), color);
        }

        painter.text(
            area.left_bottom() + vec2(8.0, -8.0),
            Align2::LEFT_BOTTOM,
            format!(
                "yaw {:.0}°  pitch {:.0}°",
                rotation.yaw.to_degrees(),
                rotation.pitch.to_degrees()
            ),
            FontId::proportional(12.0),
            text_color,
        );
    }
}

/// The twelve edges of the `[-1, 1]` cube.
fn cube_edges() -> Vec<([f64; 3], [f64; 3])> {
    let corner = |i: usize| {
        [
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        ]
    };
    let mut edges = Vec::with_capacity(12);
    for i in 0..8 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                edges.push((corner(i), corner(i | bit)));
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn polar_starts_at_twelve_and_turns_clockwise() {
        let c = pos2(100.0, 100.0);
        let top = polar(c, 10.0, 0.0);
        assert!((top.x - 100.0).abs() < 1e-4 && (top.y - 90.0).abs() < 1e-4);
        let right = polar(c, 10.0, FRAC_PI_2);
        assert!((right.x - 110.0).abs() < 1e-4 && (right.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn angle_of_inverts_polar() {
        let c = pos2(0.0, 0.0);
        for angle in [0.1, 1.0, 2.5, 4.0, 6.0] {
            let back = angle_of(polar(c, 50.0, angle) - c);
            assert!((back - angle).abs() < 1e-5, "{} vs {}", back, angle);
        }
    }

    #[test]
    fn heat_scale_hits_its_stops() {
        assert_eq!(heat_color(0.0), COLD);
        assert_eq!(heat_color(0.5), WARM);
        assert_eq!(heat_color(1.0), HOT);
        assert_eq!(heat_color(7.0), HOT);
        assert_eq!(lerp_color(Color32::BLACK, Color32::WHITE, 0.5), Color32::from_rgb(128, 128, 128));
    }

    #[test]
    fn cube_has_twelve_unit_edges() {
        let edges = cube_edges();
        assert_eq!(edges.len(), 12);
        for (a, b) in edges {
            let differing = (0..3).filter(|&k| a[k] != b[k]).count();
            assert_eq!(differing, 1);
        }
    }
}
