#![forbid(unsafe_code)]

//! Scroll progress, active-index banding, and pinned travel distance.
//!
//! # Invariants
//!
//! 1. [`ScrollProgress`] is always finite and within [0, 1].
//! 2. `active_index(p, n)` is within `[0, n - 1]` for every `n >= 1`.
//! 3. `active_index` is non-decreasing in `p`.
//! 4. `active_index(0, n) == 0` and `active_index(1, n) == n - 1`.
//!
//! Progress is split into `n` equal bands with `floor`; the last band is
//! closed at 1.0 by clamping, so exactly full scroll never overflows.

use crate::error::ConfigurationError;

/// Normalized position within the pinned travel distance.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ScrollProgress(f32);

impl ScrollProgress {
    /// Start of travel.
    pub const START: Self = Self(0.0);
    /// End of travel.
    pub const END: Self = Self(1.0);

    /// Clamp `value` into [0, 1]. NaN maps to 0.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Progress of `raw` through a pin that starts at `start` and lasts `travel`.
    ///
    /// A zero or negative travel degenerates to a step at `start`.
    #[must_use]
    pub fn from_offset(raw: f32, start: f32, travel: f32) -> Self {
        let delta = raw - start;
        if !travel.is_finite() || travel <= 0.0 {
            return if delta >= 0.0 { Self::END } else { Self::START };
        }
        Self::new(delta / travel)
    }

    /// The raw value.
    #[inline]
    #[must_use]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl From<f32> for ScrollProgress {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// Map `progress` to the index of the item whose band contains it.
///
/// `n` is the catalog length; `n == 0` returns 0.
#[must_use]
pub fn active_index(progress: ScrollProgress, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let band = (progress.get() * n as f32).floor();
    // `band` is non-negative and finite because progress is clamped.
    (band as usize).min(n - 1)
}

/// How far the host region stays pinned while the timeline plays.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TravelDistance {
    /// `base + (n - 1) * per_item`: every item gets the same dwell.
    PerItem {
        /// Distance for the first item.
        base: f32,
        /// Distance added per additional item.
        per_item: f32,
    },
    /// A fixed distance regardless of item count.
    Fixed(f32),
}

impl Default for TravelDistance {
    fn default() -> Self {
        Self::PerItem {
            base: 1000.0,
            per_item: 800.0,
        }
    }
}

impl TravelDistance {
    /// Total pinned distance for a catalog of `n` items.
    #[must_use]
    pub fn resolve(&self, n: usize) -> f32 {
        match *self {
            Self::PerItem { base, per_item } => {
                base + n.saturating_sub(1) as f32 * per_item
            }
            Self::Fixed(distance) => distance,
        }
    }

    /// Smallest absolute offset at which item `index` becomes active, for a
    /// pin that starts at `start`.
    ///
    /// The arithmetic edge `start + travel * index / n` can round to either
    /// side of the band boundary, so the result is nudged one ulp at a time
    /// until it is the first offset that [`ScrollProgress::from_offset`]
    /// maps into band `index`. Indices past the end resolve to the last item.
    #[must_use]
    pub fn offset_for_index(&self, index: usize, n: usize, start: f32) -> f32 {
        if n == 0 {
            return start;
        }
        let index = index.min(n - 1);
        let travel = self.resolve(n);
        let band =
            |offset: f32| active_index(ScrollProgress::from_offset(offset, start, travel), n);

        let end = start + travel;
        let mut offset = (start + travel * index as f32 / n as f32).clamp(start, end);
        while offset < end && band(offset) < index {
            offset = offset.next_up();
        }
        while offset > start && band(offset.next_down()) >= index {
            offset = offset.next_down();
        }
        offset
    }

    /// Reject negative or non-finite distances.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        let fields = match *self {
            Self::PerItem { base, per_item } => vec![("base", base), ("per_item", per_item)],
            Self::Fixed(distance) => vec![("distance", distance)],
        };
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::InvalidConfig {
                    field,
                    reason: format!("must be finite and non-negative, got {value}"),
                });
            }
        }
        if self.resolve(1) <= 0.0 {
            return Err(ConfigurationError::InvalidConfig {
                field: "travel",
                reason: "must be positive for a single item".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: f32) -> ScrollProgress {
        ScrollProgress::new(v)
    }

    #[test]
    fn progress_clamps_and_rejects_nan() {
        assert_eq!(p(-0.5).get(), 0.0);
        assert_eq!(p(1.5).get(), 1.0);
        assert_eq!(p(f32::NAN).get(), 0.0);
        assert_eq!(p(f32::INFINITY).get(), 1.0);
    }

    #[test]
    fn from_offset_is_relative_to_pin_start() {
        assert_eq!(ScrollProgress::from_offset(600.0, 100.0, 1000.0).get(), 0.5);
        assert_eq!(ScrollProgress::from_offset(50.0, 100.0, 1000.0).get(), 0.0);
        assert_eq!(ScrollProgress::from_offset(5000.0, 100.0, 1000.0).get(), 1.0);
    }

    #[test]
    fn from_offset_zero_travel_is_a_step() {
        assert_eq!(ScrollProgress::from_offset(10.0, 10.0, 0.0).get(), 1.0);
        assert_eq!(ScrollProgress::from_offset(9.0, 10.0, 0.0).get(), 0.0);
    }

    #[test]
    fn five_item_scenario() {
        assert_eq!(active_index(p(0.0), 5), 0);
        assert_eq!(active_index(p(0.45), 5), 2);
        assert_eq!(active_index(p(0.999), 5), 4);
        assert_eq!(active_index(p(1.0), 5), 4);
    }

    #[test]
    fn band_edges_use_floor() {
        // 0.2 is the first value of band 1 for n = 5.
        assert_eq!(active_index(p(0.19), 5), 0);
        assert_eq!(active_index(p(0.2), 5), 1);
        assert_eq!(active_index(p(0.5), 2), 1);
    }

    #[test]
    fn single_item_is_always_zero() {
        for v in [0.0, 0.3, 1.0] {
            assert_eq!(active_index(p(v), 1), 0);
        }
    }

    #[test]
    fn zero_items_does_not_underflow() {
        assert_eq!(active_index(p(1.0), 0), 0);
    }

    #[test]
    fn per_item_travel_grows_with_count() {
        let travel = TravelDistance::default();
        assert_eq!(travel.resolve(1), 1000.0);
        assert_eq!(travel.resolve(5), 4200.0);
        assert!(travel.resolve(6) > travel.resolve(5));
    }

    #[test]
    fn fixed_travel_ignores_count() {
        let travel = TravelDistance::Fixed(2400.0);
        assert_eq!(travel.resolve(1), 2400.0);
        assert_eq!(travel.resolve(9), 2400.0);
    }

    #[test]
    fn offset_for_index_is_the_first_offset_of_its_band() {
        let travels = [
            TravelDistance::default(),
            TravelDistance::Fixed(3000.0),
            TravelDistance::Fixed(1234.5),
        ];
        for travel in travels {
            for start in [0.0, 777.0, 12_345.6] {
                for n in 1..=40 {
                    let total = travel.resolve(n);
                    for i in 0..n {
                        let offset = travel.offset_for_index(i, n, start);
                        let at = ScrollProgress::from_offset(offset, start, total);
                        assert_eq!(active_index(at, n), i, "n={n} i={i} start={start}");
                        if i > 0 {
                            let before = ScrollProgress::from_offset(offset.next_down(), start, total);
                            assert_eq!(active_index(before, n), i - 1, "n={n} i={i} start={start}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn offset_for_index_clamps_and_handles_edges() {
        let travel = TravelDistance::default();
        assert_eq!(travel.offset_for_index(0, 5, 200.0), 200.0);
        assert_eq!(
            travel.offset_for_index(99, 5, 0.0),
            travel.offset_for_index(4, 5, 0.0)
        );
        assert_eq!(travel.offset_for_index(3, 0, 50.0), 50.0);
    }

    fn rejected_field(travel: TravelDistance) -> &'static str {
        match travel.check() {
            Err(ConfigurationError::InvalidConfig { field, .. }) => field,
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn check_rejects_bad_distances() {
        assert!(TravelDistance::default().check().is_ok());
        assert_eq!(rejected_field(TravelDistance::Fixed(-1.0)), "distance");
        assert_eq!(
            rejected_field(TravelDistance::PerItem {
                base: 10.0,
                per_item: f32::NAN,
            }),
            "per_item"
        );
        assert_eq!(rejected_field(TravelDistance::Fixed(0.0)), "travel");
    }
}
