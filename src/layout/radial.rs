//! Angular layout for pie, donut and sunburst charts.
//! Angles are radians in `0..TAU`; orientation is up to the painter.

use super::hierarchy;
use crate::data::TreeNode;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub end: f64,
}

impl Wedge {
    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Ring segment of a sunburst.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub index: usize,
    pub name: String,
    pub depth: usize,
    pub color: usize,
    pub wedge: Wedge,
}

fn weight(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Split the circle proportionally to `values`.
pub fn wedges(values: &[f64]) -> Vec<Wedge> {
    split(values, Wedge { start: 0.0, end: TAU }, None)
}

/// Split `span` proportionally to `values`, out of `total` when given.
fn split(values: &[f64], span: Wedge, total: Option<f64>) -> Vec<Wedge> {
    let sum = total.unwrap_or_else(|| values.iter().map(|&v| weight(v)).sum());
    let mut start = span.start;
    values
        .iter()
        .map(|&v| {
            let sweep = if sum > 0.0 {
                span.sweep() * weight(v) / sum
            } else {
                0.0
            };
            let wedge = Wedge {
                start,
                end: start + sweep,
            };
            start += sweep;
            wedge
        })
        .collect()
}

/// Lay out every node of the hierarchy as a ring segment, parents first.
pub fn sunburst(nodes: &[TreeNode]) -> Vec<Arc> {
    let mut out = Vec::with_capacity(nodes.len());
    let roots = hierarchy::roots(nodes);
    let totals: Vec<f64> = roots
        .iter()
        .map(|&i| hierarchy::subtree_total(nodes, i))
        .collect();
    let spans = split(&totals, Wedge { start: 0.0, end: TAU }, None);
    for (&index, wedge) in roots.iter().zip(spans) {
        ring(nodes, index, wedge, 0, &mut out);
    }
    out
}

fn ring(nodes: &[TreeNode], index: usize, wedge: Wedge, depth: usize, out: &mut Vec<Arc>) {
    let node = &nodes[index];
    out.push(Arc {
        index,
        name: node.name.clone(),
        depth,
        color: node.color,
        wedge,
    });
    if depth >= nodes.len() {
        return;
    }

    let children = hierarchy::children(nodes, index);
    let totals: Vec<f64> = children
        .iter()
        .map(|&c| hierarchy::subtree_total(nodes, c))
        .collect();
    // the parent's own value leaves a gap after its children
    let parent_total = hierarchy::subtree_total(nodes, index);
    for (&child, span) in children.iter().zip(split(&totals, wedge, Some(parent_total))) {
        ring(nodes, child, span, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-12;

    #[test]
    fn wedges_cover_the_circle() {
        let w = wedges(&[1.0, 2.0, 1.0]);
        assert_eq!(w[0].start, 0.0);
        assert!((w[1].sweep() - TAU / 2.0).abs() < EPS);
        assert!((w[2].end - TAU).abs() < EPS);
        assert_eq!(w[0].end, w[1].start);
    }

    #[test]
    fn negative_and_empty_values_get_no_sweep() {
        let w = wedges(&[-3.0, 1.0, f64::NAN]);
        assert_eq!(w[0].sweep(), 0.0);
        assert!((w[1].sweep() - TAU).abs() < EPS);
        assert_eq!(w[2].sweep(), 0.0);
        assert!(wedges(&[0.0, 0.0]).iter().all(|w| w.sweep() == 0.0));
    }

    #[test]
    fn sunburst_children_tile_parent() {
        let nodes = vec![
            TreeNode::root("A", 0),
            TreeNode::leaf("a1", "A", 1.0, 0),
            TreeNode::leaf("a2", "A", 3.0, 0),
            TreeNode::root("B", 1),
            TreeNode::leaf("b1", "B", 4.0, 1),
        ];
        let arcs = sunburst(&nodes);
        assert_eq!(arcs.len(), 5);

        let a = &arcs[0];
        assert_eq!((a.name.as_str(), a.depth), ("A", 0));
        assert!((a.wedge.sweep() - TAU / 2.0).abs() < EPS);

        let a1 = arcs.iter().find(|arc| arc.name == "a1").unwrap();
        let a2 = arcs.iter().find(|arc| arc.name == "a2").unwrap();
        assert_eq!(a1.depth, 1);
        assert!((a1.wedge.start - a.wedge.start).abs() < EPS);
        assert!((a2.wedge.end - a.wedge.end).abs() < EPS);
        assert!((a2.wedge.sweep() - 3.0 * a1.wedge.sweep()).abs() < EPS);
    }

    #[test]
    fn own_value_of_parent_leaves_gap() {
        let mut parent = TreeNode::root("P", 0);
        parent.value = 1.0;
        let nodes = vec![parent, TreeNode::leaf("c", "P", 1.0, 0)];
        let arcs = sunburst(&nodes);
        assert!((arcs[1].wedge.sweep() - TAU / 2.0).abs() < EPS);
    }

    #[test]
    fn random_pie_values_split_proportionally() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let n = rng.gen_range(1..15);
            let values: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..50.0)).collect();
            let total: f64 = values.iter().sum();
            let w = wedges(&values);
            assert_eq!(w[0].start, 0.0);
            assert!((w[n - 1].end - TAU).abs() < 1e-9);
            for (i, (wedge, value)) in w.iter().zip(&values).enumerate() {
                assert!((wedge.sweep() - TAU * value / total).abs() < 1e-9);
                if i > 0 {
                    assert_eq!(wedge.start, w[i - 1].end);
                }
            }
        }
    }

    #[test]
    fn random_trees_tile_parent_spans() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..50 {
            let nodes = generator::tree(&mut rng);
            let arcs = sunburst(&nodes);
            assert_eq!(arcs.len(), nodes.len());
            let wedge_of = |i: usize| arcs.iter().find(|a| a.index == i).unwrap().wedge;

            let roots = hierarchy::roots(&nodes);
            let root_sweep: f64 = roots.iter().map(|&r| wedge_of(r).sweep()).sum();
            assert!((root_sweep - TAU).abs() < 1e-9);

            for &root in &roots {
                let parent = wedge_of(root);
                let children = hierarchy::children(&nodes, root);
                let spans: Vec<Wedge> = children.iter().map(|&c| wedge_of(c)).collect();
                assert!((spans[0].start - parent.start).abs() < 1e-9);
                assert!((spans[spans.len() - 1].end - parent.end).abs() < 1e-9);
                for pair in spans.windows(2) {
                    assert!((pair[0].end - pair[1].start).abs() < 1e-12);
                }
                let total = hierarchy::subtree_total(&nodes, root);
                for (&child, span) in children.iter().zip(&spans) {
                    let share = nodes[child].value / total;
                    assert!((span.sweep() - parent.sweep() * share).abs() < 1e-9);
                    assert!(arcs.iter().any(|a| a.index == child && a.depth == 1));
                }
            }
        }
    }
}

