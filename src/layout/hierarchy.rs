//! Helpers over the flat parent-pointer hierarchy of [`TreeNode`]s.

use crate::data::TreeNode;

/// Nodes without a parent, or whose parent is unknown.
pub fn roots(nodes: &[TreeNode]) -> Vec<usize> {
    nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| match &n.parent {
            None => true,
            Some(p) => !nodes.iter().any(|other| &other.name == p),
        })
        .map(|(i, _)| i)
        .collect()
}

pub fn children(nodes: &[TreeNode], index: usize) -> Vec<usize> {
    let name = &nodes[index].name;
    nodes
        .iter()
        .enumerate()
        .filter(|(i, n)| *i != index && n.parent.as_ref() == Some(name))
        .map(|(i, _)| i)
        .collect()
}

/// Own value plus the totals of all descendants. Negative values count as zero.
pub fn subtree_total(nodes: &[TreeNode], index: usize) -> f64 {
    total_at(nodes, index, 0)
}

fn total_at(nodes: &[TreeNode], index: usize, depth: usize) -> f64 {
    let own = nodes[index].value;
    let own = if own.is_finite() { own.max(0.0) } else { 0.0 };
    // cycles in the parent pointers end at the node count
    if depth >= nodes.len() {
        return own;
    }
    own + children(nodes, index)
        .into_iter()
        .map(|c| total_at(nodes, c, depth + 1))
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_include_descendants() {
        let nodes = vec![
            TreeNode::root("root", 0),
            TreeNode::leaf("mid", "root", 1.0, 0),
            TreeNode::leaf("leaf", "mid", 2.0, 0),
            TreeNode::leaf("orphan", "missing", 5.0, 1),
        ];
        assert_eq!(roots(&nodes), vec![0, 3]);
        assert_eq!(children(&nodes, 0), vec![1]);
        assert_eq!(subtree_total(&nodes, 0), 3.0);
        assert_eq!(subtree_total(&nodes, 3), 5.0);
    }

    #[test]
    fn cyclic_parents_terminate() {
        let nodes = vec![
            TreeNode::leaf("a", "b", 1.0, 0),
            TreeNode::leaf("b", "a", 1.0, 0),
        ];
        assert!(roots(&nodes).is_empty());
        assert!(subtree_total(&nodes, 0).is_finite());
    }
}
