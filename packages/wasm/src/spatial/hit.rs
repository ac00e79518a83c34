//! Linear hit testing.

use crate::geometry::Point;
use crate::hierarchy::LayoutRect;

/// Index of the deepest entry whose current rectangle contains `point`.
///
/// Children follow their parents in the list and lie inside them, so the
/// last containing entry is the most specific one.
pub fn hit_test(rects: &[LayoutRect], point: Point) -> Option<usize> {
    rects.iter().rposition(|r| r.current.contains(point))
}
