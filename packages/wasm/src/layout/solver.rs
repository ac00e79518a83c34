//! Recursive treemap layout over a flattened hierarchy.
//!
//! For every node, starting at the root:
//!
//! 1. The node's target rectangle is the space its parent gave it (the root
//!    gets the available area minus outer padding).
//! 2. The children's working area is the target inset by inner padding, with
//!    extra top padding reserved for a label band.
//! 3. If the working area is below `min_node_size` in either dimension, or
//!    the children's total value is not positive, the whole subtree collapses
//!    to a zero-size rectangle at the node's center.
//! 4. Otherwise the working area is partitioned among the direct children
//!    by the configured algorithm and each child is laid out recursively.
//!
//! The solver is a pure function of values, structure, area and config.

use serde::{Deserialize, Serialize};

use super::slice_dice::{dice, slice};
use super::squarify::squarify;
use crate::geometry::Rect;
use crate::hierarchy::{LayoutRect, children_of, subtree_end};

/// Partitioning algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutAlgorithm {
    /// Aspect-ratio minimizing row packing.
    #[default]
    Squarified,
    /// Horizontal rows stacked top to bottom.
    Slice,
    /// Vertical columns left to right.
    Dice,
    /// Dice at even depths, slice at odd depths.
    SliceDice,
}

/// Configuration for the layout solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Partitioning algorithm.
    pub algorithm: LayoutAlgorithm,
    /// Padding between the available area and the root (default: 0).
    pub outer_padding: f32,
    /// Padding between an internal node and its children (default: 1).
    pub inner_padding: f32,
    /// Extra top padding for an internal node's label band (default: 0).
    pub top_padding: f32,
    /// Working areas smaller than this in either dimension get no children
    /// (default: 1).
    pub min_node_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            algorithm: LayoutAlgorithm::Squarified,
            outer_padding: 0.0,
            inner_padding: 1.0,
            top_padding: 0.0,
            min_node_size: 1.0,
        }
    }
}

impl LayoutConfig {
    /// Config with all padding and the size cutoff disabled.
    pub fn unpadded(algorithm: LayoutAlgorithm) -> Self {
        Self {
            algorithm,
            outer_padding: 0.0,
            inner_padding: 0.0,
            top_padding: 0.0,
            min_node_size: 0.0,
        }
    }
}

/// The treemap layout engine.
#[derive(Debug, Clone, Default)]
pub struct LayoutSolver {
    config: LayoutConfig,
}

impl LayoutSolver {
    /// Create a new solver with the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(LayoutConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Compute `target` for every entry in the subtree of `root`.
    ///
    /// Only `target` fields are written. An out-of-range `root` is ignored.
    pub fn layout(&self, rects: &mut [LayoutRect], root: usize, area: Rect) {
        if root >= rects.len() {
            return;
        }
        let area = area.clamped().inset_uniform(self.config.outer_padding);
        self.layout_node(rects, root, area);
    }

    fn layout_node(&self, rects: &mut [LayoutRect], index: usize, available: Rect) {
        rects[index].target = available.clamped();

        let end = subtree_end(rects, index);
        if end == index + 1 {
            return;
        }

        let own = rects[index].target;
        let working = self.working_area(own);
        if !self.fits(working) {
            collapse(rects, index + 1, end, own);
            return;
        }

        let children = children_of(rects, index);
        let values: Vec<f64> = children.iter().map(|&c| rects[c].value).collect();

        let cells = match self.algorithm_at(rects[index].depth) {
            LayoutAlgorithm::Squarified => squarify(&values, working),
            LayoutAlgorithm::Slice => slice(&values, working),
            LayoutAlgorithm::Dice | LayoutAlgorithm::SliceDice => dice(&values, working),
        };

        let Some(cells) = cells else {
            collapse(rects, index + 1, end, own);
            return;
        };

        for (&child, cell) in children.iter().zip(cells) {
            self.layout_node(rects, child, cell);
        }
    }

    /// Children's area inside a node's target.
    fn working_area(&self, target: Rect) -> Rect {
        let pad = self.config.inner_padding.max(0.0);
        let top = pad + self.config.top_padding.max(0.0);
        target.inset(pad, top, pad, pad)
    }

    fn fits(&self, area: Rect) -> bool {
        !area.is_empty()
            && area.width >= self.config.min_node_size
            && area.height >= self.config.min_node_size
    }

    /// Resolve `SliceDice` for a given depth.
    fn algorithm_at(&self, depth: u32) -> LayoutAlgorithm {
        match self.config.algorithm {
            LayoutAlgorithm::SliceDice if depth % 2 == 1 => LayoutAlgorithm::Slice,
            LayoutAlgorithm::SliceDice => LayoutAlgorithm::Dice,
            other => other,
        }
    }
}

/// Give entries `start..end` zero-size targets at the center of `area`.
fn collapse(rects: &mut [LayoutRect], start: usize, end: usize, area: Rect) {
    let point = area.collapsed();
    for rect in &mut rects[start..end] {
        rect.target = point;
    }
}
