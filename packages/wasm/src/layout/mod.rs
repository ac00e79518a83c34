//! Treemap layout algorithms.
//!
//! This module computes target rectangles for a flattened hierarchy. The
//! targets are then approached frame by frame by the animation driver.
//!
//! - `solver`: recursive per-node layout with padding and size cutoffs
//! - `squarify`: aspect-ratio minimizing partitioning
//! - `slice_dice`: single-axis partitioning

pub mod slice_dice;
pub mod solver;
pub mod squarify;

pub use solver::{LayoutAlgorithm, LayoutConfig, LayoutSolver};
