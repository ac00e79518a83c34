//! Caller-supplied weighted tree.

use serde::{Deserialize, Serialize};

use crate::geometry::Color;

/// A node of the input hierarchy.
///
/// A node without children is a leaf and carries a meaningful `value`.
/// The `value` of an internal node is ignored; its weight is always the sum
/// of its leaves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HierarchyNode {
    /// Display label, not required to be unique.
    pub label: String,
    /// Leaf weight. Negative and NaN values are treated as zero.
    pub value: f64,
    /// Explicit color overriding the depth palette.
    pub color: Option<Color>,
    /// Optional caller-supplied stable identity used by
    /// [`MatchStrategy::StableId`](crate::animation::MatchStrategy::StableId).
    pub id: Option<String>,
    /// Ordered children.
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Create a leaf.
    pub fn leaf(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            ..Default::default()
        }
    }

    /// Create an internal node.
    pub fn branch(label: impl Into<String>, children: Vec<HierarchyNode>) -> Self {
        Self {
            label: label.into(),
            children,
            ..Default::default()
        }
    }

    /// Set an explicit color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set a stable id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// True if the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// An unlabeled root with no children is the empty tree.
    pub fn is_empty(&self) -> bool {
        self.label.is_empty() && self.children.is_empty()
    }

    /// Walk child labels from this node. The first child whose label matches
    /// each segment is taken; an empty path resolves to `self`.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&HierarchyNode> {
        path.iter().try_fold(self, |node, segment| {
            node.children
                .iter()
                .find(|c| c.label == segment.as_ref())
        })
    }

    /// Mutable variant of [`find`](Self::find).
    pub fn find_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Option<&mut HierarchyNode> {
        let mut node = self;
        for segment in path {
            node = node
                .children
                .iter_mut()
                .find(|c| c.label == segment.as_ref())?;
        }
        Some(node)
    }

    /// Sum of positive leaf values in this subtree.
    pub fn total_value(&self) -> f64 {
        if self.is_leaf() {
            sanitize_value(self.value)
        } else {
            self.children.iter().map(Self::total_value).sum()
        }
    }
}

/// Negative and non-finite weights carry no area.
#[inline]
pub(crate) fn sanitize_value(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
