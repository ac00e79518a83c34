//! Point queries over the current on-screen rectangles.
//!
//! `hit_test` is the reference linear scan; `RectIndex` answers the same
//! query from an R-tree so repeated lookups between ticks stay cheap.

pub mod hit;
pub mod rtree;

pub use hit::hit_test;
pub use rtree::RectIndex;
