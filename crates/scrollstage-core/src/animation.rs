#![forbid(unsafe_code)]

//! Easing curves and the time-driven scrub playhead.
//!
//! Easing functions map `t` in [0, 1] to an output in [0, 1] and are used by
//! the stage schedule to shape each card's exit. [`Scrub`] is the only
//! time-driven piece: it lets card motion trail the scroll position by a
//! configurable lag instead of snapping to it.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-in.
#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Cubic ease-out. Default curve for card exits.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Named easing curve, for configuration files and schedule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    /// [`linear`].
    Linear,
    /// [`ease_in`].
    EaseIn,
    /// [`ease_out`].
    EaseOut,
    /// [`ease_in_out`].
    EaseInOut,
    /// [`ease_in_cubic`].
    EaseInCubic,
    /// [`ease_out_cubic`].
    #[default]
    EaseOutCubic,
}

impl Easing {
    /// Every named curve, in declaration order.
    pub const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
    ];

    /// The function pointer behind this curve.
    #[must_use]
    pub fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseIn => ease_in,
            Self::EaseOut => ease_out,
            Self::EaseInOut => ease_in_out,
            Self::EaseInCubic => ease_in_cubic,
            Self::EaseOutCubic => ease_out_cubic,
        }
    }

    /// Apply the curve to `t`.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        (self.function())(t)
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Scrub
// ---------------------------------------------------------------------------

/// Residual gap fraction left after one full lag period.
const SCRUB_RESIDUAL: f32 = 0.005;

/// Gap below which the playhead snaps onto its target.
const SCRUB_SNAP: f32 = 1e-4;

/// A playhead that chases a moving target progress.
///
/// Each tick closes the gap exponentially so that after `lag` only
/// [`SCRUB_RESIDUAL`] of the original gap remains. Retargeting mid-flight
/// keeps the current position, so reversing scroll never jumps.
#[derive(Debug, Clone, Copy)]
pub struct Scrub {
    position: f32,
    target: f32,
    /// Decay rate in 1/s.
    rate: f32,
}

impl Scrub {
    /// Create a playhead at 0.0 that catches up within `lag`.
    ///
    /// Lags shorter than a millisecond are treated as one millisecond.
    pub fn new(lag: Duration) -> Self {
        let secs = lag.as_secs_f32().max(1e-3);
        Self {
            position: 0.0,
            target: 0.0,
            rate: -SCRUB_RESIDUAL.ln() / secs,
        }
    }

    /// Point the playhead at a new target in [0, 1].
    pub fn retarget(&mut self, target: f32) {
        self.target = clamp_unit(target);
    }

    /// Jump straight to `position`, clearing any pending motion.
    pub fn snap_to(&mut self, position: f32) {
        let p = clamp_unit(position);
        self.position = p;
        self.target = p;
    }
}

impl Animation for Scrub {
    fn tick(&mut self, dt: Duration) {
        let gap = self.target - self.position;
        if gap.abs() <= SCRUB_SNAP {
            self.position = self.target;
            return;
        }
        let keep = (-self.rate * dt.as_secs_f32()).exp();
        self.position = self.target - gap * keep;
        if (self.target - self.position).abs() <= SCRUB_SNAP {
            self.position = self.target;
        }
    }

    fn is_complete(&self) -> bool {
        self.position == self.target
    }

    fn value(&self) -> f32 {
        self.position
    }

    fn reset(&mut self) {
        self.snap_to(0.0);
    }
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
