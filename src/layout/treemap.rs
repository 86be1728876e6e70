//! Squarified treemap layout.

use super::hierarchy;
use crate::data::TreeNode;

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    #[cfg(test)]
    pub fn contains(&self, other: &Rect, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.x + other.w <= self.x + self.w + eps
            && other.y + other.h <= self.y + self.h + eps
    }
}

/// A hierarchy node placed by [`nest`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRect {
    pub index: usize,
    pub depth: usize,
    pub rect: Rect,
}

/// Worst aspect ratio of a row of areas laid along `side`.
fn worst(row: &[f64], side: f64) -> f64 {
    let sum: f64 = row.iter().sum();
    if sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let side2 = side * side;
    let sum2 = sum * sum;
    row.iter()
        .map(|&a| (side2 * a / sum2).max(sum2 / (side2 * a)))
        .fold(0.0, f64::max)
}

/// Place one row against the shorter side of `bounds` and return what is left.
fn layout_row(row: &[(usize, f64)], bounds: Rect, out: &mut [Rect]) -> Rect {
    let sum: f64 = row.iter().map(|(_, a)| a).sum();
    if bounds.w >= bounds.h {
        // column along the left edge
        let width = if bounds.h > 0.0 { (sum / bounds.h).min(bounds.w) } else { 0.0 };
        let mut y = bounds.y;
        for &(idx, area) in row {
            let h = if width > 0.0 { area / width } else { 0.0 };
            out[idx] = Rect::new(bounds.x, y, width, h);
            y += h;
        }
        Rect::new(bounds.x + width, bounds.y, (bounds.w - width).max(0.0), bounds.h)
    } else {
        // row along the top edge
        let height = if bounds.w > 0.0 { (sum / bounds.w).min(bounds.h) } else { 0.0 };
        let mut x = bounds.x;
        for &(idx, area) in row {
            let w = if height > 0.0 { area / height } else { 0.0 };
            out[idx] = Rect::new(x, bounds.y, w, height);
            x += w;
        }
        Rect::new(bounds.x, bounds.y + height, bounds.w, (bounds.h - height).max(0.0))
    }
}

/// Squarify `values` into `bounds`, one rectangle per value in input order.
///
/// Non-positive or non-finite values get a zero-area rectangle at the origin
/// of `bounds`.
pub fn squarify(values: &[f64], bounds: Rect) -> Vec<Rect> {
    let mut out = vec![Rect::new(bounds.x, bounds.y, 0.0, 0.0); values.len()];

    let items: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite() && **v > 0.0)
        .map(|(i, &v)| (i, v))
        .collect();
    let total: f64 = items.iter().map(|(_, v)| v).sum();
    if items.is_empty() || bounds.area() <= 0.0 {
        return out;
    }

    let scale = bounds.area() / total;
    let mut remaining = bounds;
    let mut row: Vec<(usize, f64)> = Vec::new();
    let mut row_areas: Vec<f64> = Vec::new();

    for (idx, value) in items {
        let area = value * scale;
        let side = remaining.w.min(remaining.h);
        if !row.is_empty() {
            let mut candidate = row_areas.clone();
            candidate.push(area);
            if worst(&candidate, side) > worst(&row_areas, side) {
                remaining = layout_row(&row, remaining, &mut out);
                row.clear();
                row_areas.clear();
            }
        }
        row.push((idx, area));
        row_areas.push(area);
    }
    if !row.is_empty() {
        layout_row(&row, remaining, &mut out);
    }
    out
}

/// Lay out a [`TreeNode`] hierarchy: roots fill `bounds`, children fill their parent.
///
/// Parents come before their children in the output.
pub fn nest(nodes: &[TreeNode], bounds: Rect) -> Vec<NodeRect> {
    let mut out = Vec::with_capacity(nodes.len());
    let roots = hierarchy::roots(nodes);
    place(nodes, &roots, bounds, 0, &mut out);
    out
}

fn place(nodes: &[TreeNode], members: &[usize], bounds: Rect, depth: usize, out: &mut Vec<NodeRect>) {
    if depth > nodes.len() {
        return;
    }
    let totals: Vec<f64> = members
        .iter()
        .map(|&i| hierarchy::subtree_total(nodes, i))
        .collect();
    for (&index, rect) in members.iter().zip(squarify(&totals, bounds)) {
        out.push(NodeRect { index, depth, rect });
        let children = hierarchy::children(nodes, index);
        if !children.is_empty() {
            place(nodes, &children, rect, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-9;

    fn total_area(rects: &[Rect]) -> f64 {
        rects.iter().map(Rect::area).sum()
    }

    #[test]
    fn classic_example_preserves_area_and_bounds() {
        // values from the squarified treemap paper
        let values = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0];
        let bounds = Rect::new(0.0, 0.0, 6.0, 4.0);
        let rects = squarify(&values, bounds);

        assert_eq!(rects.len(), values.len());
        assert!((total_area(&rects) - 24.0).abs() < EPS);
        for (rect, value) in rects.iter().zip(values) {
            assert!(bounds.contains(rect, EPS));
            assert!((rect.area() - value).abs() < EPS);
        }
        // first row stacks the two largest items along the short side
        assert!((rects[0].w - 3.0).abs() < EPS);
        assert!((rects[0].h - 2.0).abs() < EPS);
    }

    #[test]
    fn rectangles_do_not_overlap() {
        let values = [5.0, 1.0, 8.0, 3.0, 3.0, 0.5, 2.0];
        let rects = squarify(&values, Rect::new(10.0, 20.0, 300.0, 120.0));
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                let overlap_w = (a.x + a.w).min(b.x + b.w) - a.x.max(b.x);
                let overlap_h = (a.y + a.h).min(b.y + b.h) - a.y.max(b.y);
                assert!(overlap_w <= EPS || overlap_h <= EPS, "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn skips_non_positive_values() {
        let rects = squarify(&[0.0, 2.0, -1.0, f64::NAN, 2.0], Rect::new(0.0, 0.0, 4.0, 1.0));
        assert_eq!(rects[0].area(), 0.0);
        assert_eq!(rects[2].area(), 0.0);
        assert_eq!(rects[3].area(), 0.0);
        assert!((rects[1].area() - 2.0).abs() < EPS);
        assert!((rects[4].area() - 2.0).abs() < EPS);
        assert!(squarify(&[], Rect::new(0.0, 0.0, 1.0, 1.0)).is_empty());
        assert!(squarify(&[1.0], Rect::new(0.0, 0.0, 0.0, 1.0))[0].area() == 0.0);
    }

    #[test]
    fn nested_children_fill_their_parent() {
        let nodes = vec![
            TreeNode::root("A", 0),
            TreeNode::leaf("a1", "A", 3.0, 0),
            TreeNode::leaf("a2", "A", 1.0, 0),
            TreeNode::root("B", 1),
            TreeNode::leaf("b1", "B", 4.0, 1),
        ];
        let bounds = Rect::new(0.0, 0.0, 8.0, 4.0);
        let laid = nest(&nodes, bounds);
        assert_eq!(laid.len(), nodes.len());

        let find = |i: usize| laid.iter().find(|n| n.index == i).unwrap();
        let a = find(0);
        assert_eq!(a.depth, 0);
        assert!((a.rect.area() - 16.0).abs() < EPS);

        let a1 = find(1);
        let a2 = find(2);
        assert_eq!(a1.depth, 1);
        assert!(a.rect.contains(&a1.rect, EPS) && a.rect.contains(&a2.rect, EPS));
        assert!((a1.rect.area() - 12.0).abs() < EPS);
        assert!((find(4).rect.area() - find(3).rect.area()).abs() < EPS);

        let parent_pos = laid.iter().position(|n| n.index == 0).unwrap();
        let child_pos = laid.iter().position(|n| n.index == 1).unwrap();
        assert!(parent_pos < child_pos);
    }

    #[test]
    fn random_values_keep_area_proportional_and_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..200 {
            let n = rng.gen_range(1..25);
            let values: Vec<f64> = (0..n).map(|_| rng.gen_range(0.1..100.0)).collect();
            let bounds = Rect::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(1.0..600.0),
                rng.gen_range(1.0..400.0),
            );
            let rects = squarify(&values, bounds);
            assert_eq!(rects.len(), n);

            let tol = 1e-6 * bounds.area();
            let edge = 1e-6 * bounds.w.max(bounds.h);
            let total: f64 = values.iter().sum();
            assert!((total_area(&rects) - bounds.area()).abs() < tol);
            for (rect, value) in rects.iter().zip(&values) {
                assert!((rect.area() - bounds.area() * value / total).abs() < tol);
                assert!(bounds.contains(rect, edge), "{:?} outside {:?}", rect, bounds);
            }
        }
    }

    #[test]
    fn random_trees_nest_children_inside_parents() {
        let mut rng = StdRng::seed_from_u64(8);
        let bounds = Rect::new(0.0, 0.0, 800.0, 500.0);
        let tol = 1e-9 * bounds.area();
        for _ in 0..50 {
            let nodes = generator::tree(&mut rng);
            let laid = nest(&nodes, bounds);
            assert_eq!(laid.len(), nodes.len());

            let rect_of = |i: usize| laid.iter().find(|n| n.index == i).unwrap().rect;
            let roots = hierarchy::roots(&nodes);
            let root_area: f64 = roots.iter().map(|&r| rect_of(r).area()).sum();
            assert!((root_area - bounds.area()).abs() < tol);

            for &root in &roots {
                let parent = rect_of(root);
                let children = hierarchy::children(&nodes, root);
                let child_area: f64 = children.iter().map(|&c| rect_of(c).area()).sum();
                assert!((child_area - parent.area()).abs() < tol);
                for &child in &children {
                    assert!(parent.contains(&rect_of(child), 1e-6));
                    let share = nodes[child].value / hierarchy::subtree_total(&nodes, root);
                    assert!((rect_of(child).area() - parent.area() * share).abs() < tol);
                }
            }
        }
    }
}

