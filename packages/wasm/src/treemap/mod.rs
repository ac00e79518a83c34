//! The stateful treemap engine.
//!
//! `TreemapEngine` owns the source tree and its flattened list, and wires the
//! flatten → layout → transition → animate pipeline behind the operations a
//! renderer and an input layer need.

mod config;
mod engine;

pub use config::TreemapConfig;
pub use engine::{RECT_STRIDE, TreemapEngine};
