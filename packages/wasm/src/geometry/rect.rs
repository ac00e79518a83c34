//! Axis-aligned rectangles and points.

use serde::{Deserialize, Serialize};

/// A position in screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
///
/// Width and height may be zero or negative while animating; such a rectangle
/// contains no points and is never drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from its corner coordinates.
    ///
    /// Corners are rounded to f32 before the extent is taken, so two cells
    /// built from a shared edge meet at the same f32 coordinate.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let (x0, y0, x1, y1) = (x0 as f32, y0 as f32, x1 as f32, y1 as f32);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Right edge.
    #[inline]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Area, zero for degenerate rectangles.
    pub fn area(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.width * self.height
        }
    }

    /// True if either dimension is not strictly positive (NaN included).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// A zero-size rectangle at this rectangle's center.
    pub fn collapsed(&self) -> Self {
        let c = self.center();
        Self::new(c.x, c.y, 0.0, 0.0)
    }

    /// Clamp negative (or NaN) dimensions to zero.
    pub fn clamped(&self) -> Self {
        Self::new(
            self.x,
            self.y,
            non_negative(self.width),
            non_negative(self.height),
        )
    }

    /// Shrink each edge independently; the result never has negative size.
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(
            self.x + left,
            self.y + top,
            self.width - left - right,
            self.height - top - bottom,
        )
        .clamped()
    }

    /// Shrink all four edges by the same amount.
    pub fn inset_uniform(&self, amount: f32) -> Self {
        self.inset(amount, amount, amount, amount)
    }

    /// Half-open point containment: `x <= px < x + width`, same for y.
    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.x
            && point.x < self.max_x()
            && point.y >= self.y
            && point.y < self.max_y()
    }

    /// True if `other` lies within this rectangle, allowing `tolerance` of
    /// floating-point slack on every edge.
    pub fn contains_rect(&self, other: &Self, tolerance: f32) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.max_x() <= self.max_x() + tolerance
            && other.max_y() <= self.max_y() + tolerance
    }

    /// How far two rectangles interpenetrate: the smaller side of their
    /// intersection, zero if they are disjoint or only touch.
    pub fn overlap_depth(&self, other: &Self) -> f32 {
        let w = self.max_x().min(other.max_x()) - self.x.max(other.x);
        let h = self.max_y().min(other.max_y()) - self.y.max(other.y);
        if w > 0.0 && h > 0.0 { w.min(h) } else { 0.0 }
    }
}

#[inline]
fn non_negative(v: f32) -> f32 {
    if v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.99, 9.99)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, 10.0)));
        assert!(!r.contains(Point::new(-0.01, 5.0)));
    }

    #[test]
    fn test_degenerate_contains_nothing() {
        assert!(!Rect::new(0.0, 0.0, 0.0, 10.0).contains(Point::new(0.0, 1.0)));
        assert!(!Rect::new(5.0, 5.0, -3.0, 4.0).contains(Point::new(3.0, 6.0)));
        assert_eq!(Rect::new(5.0, 5.0, -3.0, 4.0).area(), 0.0);
    }

    #[test]
    fn test_inset_clamps_to_zero() {
        let r = Rect::new(0.0, 0.0, 4.0, 10.0).inset_uniform(3.0);
        assert_eq!(r, Rect::new(3.0, 3.0, 0.0, 4.0));
        assert!(r.is_empty());
    }

    #[test]
    fn test_collapsed_keeps_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0).collapsed();
        assert_eq!(r, Rect::new(25.0, 40.0, 0.0, 0.0));
    }

    #[test]
    fn test_overlap_depth() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 8.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(a.overlap_depth(&b), 2.0, "smaller side of the 5x2 intersection");
        assert_eq!(a.overlap_depth(&c), 0.0, "touching edges do not overlap");
    }

    #[test]
    fn test_from_corners_shares_edges() {
        // Neighbours split at an edge that is not representable in f32.
        let edge = 386.731_863_214_f64;
        let a = Rect::from_corners(1.740_495_7, 0.0, edge, 480.0);
        let b = Rect::from_corners(edge, 0.0, 638.259_5, 480.0);
        assert_eq!(b.x, edge as f32);
        assert!(a.max_x() - b.x <= 1e-4, "a ends at {} past b at {}", a.max_x(), b.x);
        assert!(a.overlap_depth(&b) <= 1e-4);
    }
}
