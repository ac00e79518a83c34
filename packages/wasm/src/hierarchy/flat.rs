//! The flattened node list.
//!
//! Entries are stored in pre-order: a parent always precedes its children,
//! and a node's descendants occupy the contiguous range directly after it.
//! `parent` is a lookup-only index into the same list.

use serde::Serialize;

use crate::geometry::{Color, Rect};

/// One flattened node with its layout target and animated state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRect {
    /// Label copied from the source node.
    pub label: String,
    /// Stable id copied from the source node.
    pub id: Option<String>,
    /// Depth in the tree (root = 0).
    pub depth: u32,
    /// Whether the source node had no children.
    pub is_leaf: bool,
    /// Index of the parent entry (None for the root).
    pub parent: Option<usize>,
    /// Own value for leaves, summed leaf value for internal nodes.
    pub value: f64,
    /// Rectangle currently on screen.
    pub current: Rect,
    /// Rectangle computed by the layout solver.
    pub target: Rect,
    /// Color currently on screen.
    pub current_color: Color,
    /// Color the node is animating toward.
    pub target_color: Color,
    /// Opacity currently on screen, in `0..=1`.
    pub current_alpha: f32,
    /// Opacity the node is animating toward, in `0..=1`.
    pub target_alpha: f32,
}

impl LayoutRect {
    /// Whether a renderer should draw this entry.
    pub fn is_drawable(&self, min_size: f32, alpha_epsilon: f32) -> bool {
        self.current.width >= min_size
            && self.current.height >= min_size
            && !self.current.is_empty()
            && self.current_alpha > alpha_epsilon
    }

    /// Jump the animated state to the target.
    pub fn snap(&mut self) {
        self.current = self.target;
        self.current_color = self.target_color;
        self.current_alpha = self.target_alpha;
    }
}

/// One past the last descendant of `index`.
///
/// Relies on pre-order: the subtree ends at the first later entry that is not
/// deeper than `index`.
pub fn subtree_end(rects: &[LayoutRect], index: usize) -> usize {
    let Some(node) = rects.get(index) else {
        return index;
    };
    rects[index + 1..]
        .iter()
        .position(|r| r.depth <= node.depth)
        .map_or(rects.len(), |offset| index + 1 + offset)
}

/// Direct children of `index`, in source order.
pub fn children_of(rects: &[LayoutRect], index: usize) -> Vec<usize> {
    (index + 1..subtree_end(rects, index))
        .filter(|&i| rects[i].parent == Some(index))
        .collect()
}
