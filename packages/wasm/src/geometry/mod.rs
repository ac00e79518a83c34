//! Geometry primitives shared by the layout, animation and query stages.
//!
//! - `Rect`: axis-aligned rectangle in screen space (origin top-left)
//! - `Point`: a position in the same space
//! - `Color`: linear RGBA with hex parsing and the built-in palette

mod color;
mod rect;

pub use color::{Color, ColorRepr, DEFAULT_PALETTE};
pub use rect::{Point, Rect};
