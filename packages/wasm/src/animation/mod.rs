//! Animated state: carrying it across data replacements and advancing it
//! toward layout targets.
//!
//! - `transition`: identity matching between an old and a new flat list
//! - `driver`: per-frame approach of current values toward targets

pub mod driver;
pub mod transition;

pub use driver::{AnimationConfig, AnimationDriver, ApproachMode};
pub use transition::{MatchStrategy, prepare_fade_in, seed_from_previous};
