//! Per-frame animation of rectangles, colors and opacity.
//!
//! Every numeric channel (x, y, width, height, r, g, b, a and alpha) moves
//! independently toward its target. The default exponential approach
//!
//! ```text
//! current += (target - current) * (1 - exp(-rate * dt))
//! ```
//!
//! is frame-rate independent: after `ln(2) / rate` seconds half of the
//! remaining distance is covered, whatever the tick size. Channels snap to
//! their target once within [`SETTLE_EPSILON`].

use serde::{Deserialize, Serialize};

use crate::geometry::{Color, Rect};
use crate::hierarchy::LayoutRect;

/// Distance below which a channel jumps to its target.
pub const SETTLE_EPSILON: f32 = 1e-4;

/// How current values approach their targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApproachMode {
    /// First-order low-pass; rates are in 1/s.
    #[default]
    Exponential,
    /// Constant speed; rates are in units per second.
    Linear,
    /// No animation: current is set to target on every tick.
    Snap,
}

/// Configuration for the animation driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Approach function.
    pub mode: ApproachMode,
    /// Rate for rectangle channels (default: 10).
    pub rect_rate: f32,
    /// Rate for color channels (default: 8).
    pub color_rate: f32,
    /// Rate for opacity (default: 8).
    pub alpha_rate: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            mode: ApproachMode::Exponential,
            rect_rate: 10.0,
            color_rate: 8.0,
            alpha_rate: 8.0,
        }
    }
}

impl AnimationConfig {
    /// Constant-speed animation with speeds in units per second.
    pub fn linear(rect_speed: f32, color_speed: f32, alpha_speed: f32) -> Self {
        Self {
            mode: ApproachMode::Linear,
            rect_rate: rect_speed,
            color_rate: color_speed,
            alpha_rate: alpha_speed,
        }
    }

    /// Animation disabled.
    pub fn snap() -> Self {
        Self {
            mode: ApproachMode::Snap,
            ..Self::default()
        }
    }
}

/// Advances animated state toward layout targets.
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    config: AnimationConfig,
}

impl AnimationDriver {
    /// Create a driver with the given configuration.
    pub fn new(config: AnimationConfig) -> Self {
        Self { config }
    }

    /// Create a driver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AnimationConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Advance all entries by `dt` seconds. A non-positive (or NaN) `dt` does
    /// nothing.
    ///
    /// Returns true while any entry has not reached its target.
    pub fn tick(&self, rects: &mut [LayoutRect], dt: f32) -> bool {
        if !(dt > 0.0) {
            return rects.iter().any(|r| !is_settled(r));
        }

        let c = &self.config;
        match c.mode {
            ApproachMode::Snap => {
                snap_all(rects);
                false
            }
            ApproachMode::Exponential => {
                let step = Step {
                    linear: false,
                    rect: exp_factor(c.rect_rate, dt),
                    color: exp_factor(c.color_rate, dt),
                    alpha: exp_factor(c.alpha_rate, dt),
                };
                advance(rects, step)
            }
            ApproachMode::Linear => {
                let step = Step {
                    linear: true,
                    rect: c.rect_rate.max(0.0) * dt,
                    color: c.color_rate.max(0.0) * dt,
                    alpha: c.alpha_rate.max(0.0) * dt,
                };
                advance(rects, step)
            }
        }
    }
}

/// Exponential tick with explicit per-channel rates.
///
/// Returns true while any entry has not reached its target.
pub fn tick(
    rects: &mut [LayoutRect],
    dt: f32,
    rate_rect: f32,
    rate_color: f32,
    rate_alpha: f32,
) -> bool {
    AnimationDriver::new(AnimationConfig {
        mode: ApproachMode::Exponential,
        rect_rate: rate_rect,
        color_rate: rate_color,
        alpha_rate: rate_alpha,
    })
    .tick(rects, dt)
}

/// Set every entry's current state to its target.
pub fn snap_all(rects: &mut [LayoutRect]) {
    for rect in rects {
        rect.snap();
        rect.current_alpha = rect.current_alpha.clamp(0.0, 1.0);
    }
}

/// True if the entry shows exactly its target state.
pub fn is_settled(rect: &LayoutRect) -> bool {
    rect.current == rect.target
        && rect.current_color == rect.target_color
        && rect.current_alpha == rect.target_alpha.clamp(0.0, 1.0)
}

/// Fraction of the remaining distance covered in `dt` at `rate`.
#[inline]
pub fn exp_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate.max(0.0) * dt).exp()
}

/// Per-group amounts for one tick: blend factors (exponential) or maximum
/// distances (linear).
#[derive(Debug, Clone, Copy)]
struct Step {
    linear: bool,
    rect: f32,
    color: f32,
    alpha: f32,
}

impl Step {
    fn apply(self, current: f32, target: f32, amount: f32) -> f32 {
        let delta = target - current;
        let next = if self.linear {
            current + delta.clamp(-amount, amount)
        } else {
            current + delta * amount
        };
        // A step lost to f32 rounding would otherwise never settle.
        if (amount > 0.0 && next == current) || (target - next).abs() <= SETTLE_EPSILON {
            target
        } else {
            next
        }
    }
}

fn advance(rects: &mut [LayoutRect], step: Step) -> bool {
    let mut animating = false;
    for rect in rects.iter_mut() {
        rect.current = approach_rect(rect.current, rect.target, step);
        rect.current_color = approach_color(rect.current_color, rect.target_color, step);
        let alpha_target = rect.target_alpha.clamp(0.0, 1.0);
        rect.current_alpha = step
            .apply(rect.current_alpha, alpha_target, step.alpha)
            .clamp(0.0, 1.0);
        animating |= !is_settled(rect);
    }
    animating
}

fn approach_rect(current: Rect, target: Rect, step: Step) -> Rect {
    Rect::new(
        step.apply(current.x, target.x, step.rect),
        step.apply(current.y, target.y, step.rect),
        step.apply(current.width, target.width, step.rect),
        step.apply(current.height, target.height, step.rect),
    )
}

fn approach_color(current: Color, target: Color, step: Step) -> Color {
    let c = current.to_array();
    let t = target.to_array();
    Color::from_array(std::array::from_fn(|i| step.apply(c[i], t[i], step.color)))
}
