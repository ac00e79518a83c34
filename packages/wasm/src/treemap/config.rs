//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationConfig, MatchStrategy};
use crate::geometry::Color;
use crate::layout::LayoutConfig;

/// Styling and behavior for one engine instance.
///
/// Every field has a default, so a partial object deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreemapConfig {
    /// Layout algorithm and padding.
    pub layout: LayoutConfig,
    /// Approach function and rates.
    pub animation: AnimationConfig,
    /// Depth palette; empty selects the built-in palette.
    pub palette: Vec<Color>,
    /// Identity rule for transitions.
    pub match_strategy: MatchStrategy,
    /// Entries smaller than this in either dimension are not drawn
    /// (default: 1).
    pub min_draw_size: f32,
    /// Entries at or below this opacity are not drawn (default: 0.01).
    pub alpha_epsilon: f32,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            animation: AnimationConfig::default(),
            palette: Vec::new(),
            match_strategy: MatchStrategy::LabelDepth,
            min_draw_size: 1.0,
            alpha_epsilon: 0.01,
        }
    }
}
