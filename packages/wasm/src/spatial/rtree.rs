//! R-tree based rectangle index using the rstar crate.
//!
//! Provides O(log n) point lookups over a snapshot of the current
//! rectangles, with the same "deepest entry wins" answer as
//! [`hit_test`](super::hit_test).

use std::fmt;

use rstar::{AABB, Envelope, PointDistance, RTree, RTreeObject};

use crate::geometry::{Point, Rect};
use crate::hierarchy::LayoutRect;

/// A rectangle in the index with its position in the flat list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedRect {
    /// Index into the flat list.
    pub index: usize,
    /// Rectangle at snapshot time.
    pub rect: Rect,
}

impl RTreeObject for IndexedRect {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.rect.x, self.rect.y],
            [self.rect.max_x(), self.rect.max_y()],
        )
    }
}

impl PointDistance for IndexedRect {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        Envelope::distance_2(&self.envelope(), point)
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        self.rect.contains(Point::new(point[0], point[1]))
    }
}

/// Spatial index over current rectangles.
///
/// Degenerate rectangles are never indexed: they contain no points.
pub struct RectIndex {
    tree: RTree<IndexedRect>,
}

impl fmt::Debug for RectIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RectIndex").field("len", &self.len()).finish()
    }
}

impl RectIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Rebuild the index from the current rectangles of `rects`.
    pub fn rebuild(&mut self, rects: &[LayoutRect]) {
        let items: Vec<_> = rects
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.current.is_empty())
            .map(|(index, r)| IndexedRect {
                index,
                rect: r.current,
            })
            .collect();

        tracing::trace!(indexed = items.len(), total = rects.len(), "rebuilt rect index");
        self.tree = RTree::bulk_load(items);
    }

    /// Index of the deepest indexed rectangle containing `point`.
    pub fn hit(&self, point: Point) -> Option<usize> {
        self.tree
            .locate_all_at_point(&[point.x, point.y])
            .map(|item| item.index)
            .max()
    }

    /// Indices of all rectangles containing `point`, shallowest first.
    pub fn all_at(&self, point: Point) -> Vec<usize> {
        let mut hits: Vec<_> = self
            .tree
            .locate_all_at_point(&[point.x, point.y])
            .map(|item| item.index)
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Remove everything from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Number of indexed rectangles.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for RectIndex {
    fn default() -> Self {
        Self::new()
    }
}
