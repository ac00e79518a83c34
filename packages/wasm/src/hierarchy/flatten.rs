//! Pre-order flattening of a [`HierarchyNode`] tree.
//!
//! Each visited node appends one [`LayoutRect`] before its children are
//! visited, so a child's index is always greater than its parent's. Internal
//! values are the sum of their leaves; colors come from the node itself or
//! from the depth palette (`palette[depth % len]`).

use super::flat::LayoutRect;
use super::node::{HierarchyNode, sanitize_value};
use crate::geometry::{Color, DEFAULT_PALETTE, Rect};

/// Result of [`flatten`].
#[derive(Debug, Clone, Default)]
pub struct Flattened {
    /// Pre-order entries with no geometry yet.
    pub rects: Vec<LayoutRect>,
    /// Index of the root entry, None for the empty tree.
    pub root: Option<usize>,
}

/// Flatten `root` into a parent-indexed pre-order list.
///
/// An empty `palette` selects [`DEFAULT_PALETTE`]. The empty tree (root with
/// no label and no children) yields an empty list.
///
/// New entries have `current == target == Rect::ZERO`, full target alpha and
/// zero current alpha; the layout and transition stages fill in the rest.
pub fn flatten(root: &HierarchyNode, palette: &[Color]) -> Flattened {
    if root.is_empty() {
        return Flattened::default();
    }

    let palette = if palette.is_empty() {
        &DEFAULT_PALETTE[..]
    } else {
        palette
    };

    let mut rects = Vec::new();
    visit(root, None, 0, palette, &mut rects);

    Flattened {
        rects,
        root: Some(0),
    }
}

/// Append `node` and its subtree; returns the subtree's value.
fn visit(
    node: &HierarchyNode,
    parent: Option<usize>,
    depth: u32,
    palette: &[Color],
    rects: &mut Vec<LayoutRect>,
) -> f64 {
    let index = rects.len();
    let color = node
        .color
        .unwrap_or(palette[depth as usize % palette.len()]);

    rects.push(LayoutRect {
        label: node.label.clone(),
        id: node.id.clone(),
        depth,
        is_leaf: node.is_leaf(),
        parent,
        value: 0.0,
        current: Rect::ZERO,
        target: Rect::ZERO,
        current_color: color,
        target_color: color,
        current_alpha: 0.0,
        target_alpha: 1.0,
    });

    let value = if node.is_leaf() {
        sanitize_value(node.value)
    } else {
        node.children
            .iter()
            .map(|child| visit(child, Some(index), depth + 1, palette, rects))
            .sum()
    };

    rects[index].value = value;
    value
}
