#![forbid(unsafe_code)]

//! Stage schedule: per-card transforms as a pure function of progress.
//!
//! A schedule is a table of [`CardTrack`]s, one per card. Each track is an
//! ordered list of [`Keyframe`]s `(start, end, target)` over the progress
//! axis. Sampling a track never looks at previous samples, so any progress
//! value can be replayed in any order and yields the same transform.
//!
//! The default layout built by [`StageSchedule::build`] gives every card but
//! the last a single exit keyframe. The N-1 exit stages are laid end to end,
//! each preceded by a gap during which nothing moves:
//!
//! ```text
//! progress 0 ─ gap ─[ card 0 exits ]─ gap ─[ card 1 exits ]─ … ─[ card N-2 exits ]─ 1
//! ```
//!
//! # Invariants
//!
//! 1. Before its first keyframe a card is at [`CardTransform::REST`].
//! 2. Outside a keyframe a card holds that keyframe's boundary value
//!    (clamped, never extrapolated).
//! 3. At `p == end` a keyframe is complete: the boundary belongs to the
//!    stage that is finishing.
//! 4. Keyframes within a track never overlap, so transforms are continuous
//!    except across zero-length keyframes.
//! 5. In a built schedule the last card has no keyframes.

use crate::animation::Easing;
use crate::error::ConfigurationError;
use crate::progress::ScrollProgress;

/// Visual state of one card.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardTransform {
    /// Vertical offset from the resting position; negative is up.
    pub offset_y: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Opacity in [0, 1].
    pub opacity: f32,
}

impl CardTransform {
    /// Resting card: in place, full size, opaque.
    pub const REST: Self = Self {
        offset_y: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    /// Default exit: lifted 250 units and fully transparent.
    pub const EXIT: Self = Self {
        offset_y: -250.0,
        scale: 1.0,
        opacity: 0.0,
    };

    /// Create a transform.
    #[must_use]
    pub const fn new(offset_y: f32, scale: f32, opacity: f32) -> Self {
        Self {
            offset_y,
            scale,
            opacity,
        }
    }

    /// Linear interpolation toward `to`; `t` is clamped to [0, 1].
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            offset_y: self.offset_y + (to.offset_y - self.offset_y) * t,
            scale: self.scale + (to.scale - self.scale) * t,
            opacity: (self.opacity + (to.opacity - self.opacity) * t).clamp(0.0, 1.0),
        }
    }

    fn is_finite(&self) -> bool {
        self.offset_y.is_finite() && self.scale.is_finite() && self.opacity.is_finite()
    }
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::REST
    }
}

/// One row of a card's schedule table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    /// Progress at which motion starts.
    pub start: f32,
    /// Progress at which the target is reached.
    pub end: f32,
    /// Transform held from `end` onward.
    pub target: CardTransform,
    /// Curve shaping the motion between `start` and `end`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub easing: Easing,
}

impl Keyframe {
    /// Local time within this keyframe, in [0, 1].
    fn local(&self, p: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if p >= self.end { 1.0 } else { 0.0 };
        }
        ((p - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Ordered, non-overlapping keyframes for one card.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardTrack {
    keyframes: Vec<Keyframe>,
}

impl CardTrack {
    /// A track that never moves.
    #[must_use]
    pub fn resting() -> Self {
        Self::default()
    }

    /// Validate and wrap `keyframes`.
    ///
    /// Keyframes must be finite, lie within [0, 1], have `start <= end`, and
    /// be sorted without overlap.
    pub fn new(keyframes: Vec<Keyframe>) -> Result<Self, ConfigurationError> {
        let mut previous_end = 0.0f32;
        for (i, kf) in keyframes.iter().enumerate() {
            let in_range = (0.0..=1.0).contains(&kf.start) && (0.0..=1.0).contains(&kf.end);
            if !in_range || kf.start > kf.end || !kf.target.is_finite() {
                return Err(ConfigurationError::InvalidConfig {
                    field: "keyframes",
                    reason: format!("keyframe {i} is malformed: {kf:?}"),
                });
            }
            if kf.start < previous_end {
                return Err(ConfigurationError::InvalidConfig {
                    field: "keyframes",
                    reason: format!("keyframe {i} starts before keyframe {} ends", i - 1),
                });
            }
            previous_end = kf.end;
        }
        Ok(Self { keyframes })
    }

    /// The keyframe table.
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Transform at `progress`.
    #[must_use]
    pub fn sample(&self, progress: ScrollProgress) -> CardTransform {
        let p = progress.get();
        let mut current = CardTransform::REST;
        for kf in &self.keyframes {
            if p >= kf.end {
                current = kf.target;
                continue;
            }
            if p <= kf.start {
                break;
            }
            let eased = kf.easing.apply(kf.local(p));
            return current.lerp(kf.target, eased);
        }
        current
    }

    /// Whether `progress` lies strictly inside one of this track's keyframes.
    #[must_use]
    pub fn is_moving(&self, progress: ScrollProgress) -> bool {
        let p = progress.get();
        self.keyframes.iter().any(|kf| kf.start < p && p < kf.end)
    }
}

/// Length of each exit stage and the pause before it, in timeline units.
///
/// Only the ratio between the two matters once the schedule is normalized
/// onto [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageTiming {
    /// Length of one card's exit.
    pub duration: f32,
    /// Pause before each exit.
    pub gap: f32,
}

impl Default for StageTiming {
    fn default() -> Self {
        Self {
            duration: 2.0,
            gap: 0.5,
        }
    }
}

impl StageTiming {
    /// Reject non-positive durations and negative gaps.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ConfigurationError::InvalidConfig {
                field: "duration",
                reason: format!("must be finite and positive, got {}", self.duration),
            });
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(ConfigurationError::InvalidConfig {
                field: "gap",
                reason: format!("must be finite and non-negative, got {}", self.gap),
            });
        }
        Ok(())
    }
}

/// Schedule table for every card in a catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageSchedule {
    tracks: Vec<CardTrack>,
}

impl StageSchedule {
    /// Lay out exit stages for `n` cards.
    ///
    /// Cards `0..n-1` each get one keyframe moving from rest to `exit`; the
    /// last card gets an empty track. `timing` must already be checked.
    #[must_use]
    pub fn build(n: usize, timing: StageTiming, exit: CardTransform, easing: Easing) -> Self {
        let stages = n.saturating_sub(1);
        let step = timing.gap + timing.duration;
        let total = stages as f32 * step;
        let at = |units: f32| if total > 0.0 { units / total } else { 1.0 };

        let mut tracks = Vec::with_capacity(n.max(1));
        for i in 0..stages {
            let keyframe = Keyframe {
                start: at(i as f32 * step + timing.gap),
                end: at((i + 1) as f32 * step),
                target: exit,
                easing,
            };
            tracks.push(CardTrack {
                keyframes: vec![keyframe],
            });
        }
        tracks.push(CardTrack::resting());
        crate::trace!(cards = tracks.len(), stages, "stage schedule built");
        Self { tracks }
    }

    /// Number of tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether there are no tracks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track for card `index`.
    #[must_use]
    pub fn track(&self, index: usize) -> Option<&CardTrack> {
        self.tracks.get(index)
    }

    /// `(start, end)` of card `index`'s first keyframe.
    #[must_use]
    pub fn stage_bounds(&self, index: usize) -> Option<(f32, f32)> {
        let kf = self.tracks.get(index)?.keyframes.first()?;
        Some((kf.start, kf.end))
    }

    /// Transform of card `index` at `progress`; unknown cards rest.
    #[must_use]
    pub fn sample_card(&self, index: usize, progress: ScrollProgress) -> CardTransform {
        self.tracks
            .get(index)
            .map_or(CardTransform::REST, |track| track.sample(progress))
    }

    /// Transforms of all cards at `progress`.
    #[must_use]
    pub fn sample(&self, progress: ScrollProgress) -> Vec<CardTransform> {
        self.tracks.iter().map(|t| t.sample(progress)).collect()
    }

    /// The card currently mid-transition, if any.
    #[must_use]
    pub fn in_transition(&self, progress: ScrollProgress) -> Option<usize> {
        self.tracks.iter().position(|t| t.is_moving(progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: f32) -> ScrollProgress {
        ScrollProgress::new(v)
    }

    fn default_schedule(n: usize) -> StageSchedule {
        StageSchedule::build(n, StageTiming::default(), CardTransform::EXIT, Easing::EaseOutCubic)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn five_cards_have_four_stages() {
        let schedule = default_schedule(5);
        assert_eq!(schedule.len(), 5);
        for i in 0..4 {
            assert_eq!(schedule.track(i).unwrap().keyframes().len(), 1);
        }
        assert!(schedule.track(4).unwrap().keyframes().is_empty());
    }

    #[test]
    fn stage_bounds_follow_gap_then_duration() {
        // 4 stages of 2.5 units: total 10.
        let schedule = default_schedule(5);
        let (s0, e0) = schedule.stage_bounds(0).unwrap();
        assert!(close(s0, 0.05) && close(e0, 0.25), "{s0} {e0}");
        let (s3, e3) = schedule.stage_bounds(3).unwrap();
        assert!(close(s3, 0.80) && close(e3, 1.0), "{s3} {e3}");
        assert!(schedule.stage_bounds(4).is_none());
    }

    #[test]
    fn cards_rest_at_zero() {
        let schedule = default_schedule(5);
        for t in schedule.sample(p(0.0)) {
            assert_eq!(t, CardTransform::REST);
        }
    }

    #[test]
    fn completed_stage_holds_exit() {
        let schedule = default_schedule(5);
        let t = schedule.sample_card(0, p(0.6));
        assert_eq!(t, CardTransform::EXIT);
        // Card 2's stage is [0.55, 0.75]; at 0.6 it is moving.
        let moving = schedule.sample_card(2, p(0.6));
        assert!(moving.offset_y < 0.0 && moving.offset_y > -250.0);
        assert!(moving.opacity > 0.0 && moving.opacity < 1.0);
        // Card 3 has not started.
        assert_eq!(schedule.sample_card(3, p(0.6)), CardTransform::REST);
    }

    #[test]
    fn boundary_belongs_to_completing_stage() {
        let schedule = default_schedule(3);
        let (_, end) = schedule.stage_bounds(0).unwrap();
        assert_eq!(schedule.sample_card(0, p(end)), CardTransform::EXIT);
        assert_eq!(schedule.sample_card(1, p(end)), CardTransform::REST);
    }

    #[test]
    fn last_card_never_exits() {
        let schedule = default_schedule(4);
        assert_eq!(schedule.sample_card(3, p(1.0)), CardTransform::REST);
    }

    #[test]
    fn single_card_never_moves() {
        let schedule = default_schedule(1);
        assert_eq!(schedule.len(), 1);
        for v in [0.0, 0.5, 1.0] {
            assert_eq!(schedule.sample_card(0, p(v)), CardTransform::REST);
            assert_eq!(schedule.in_transition(p(v)), None);
        }
    }

    #[test]
    fn only_one_card_in_transition() {
        let schedule = default_schedule(5);
        assert_eq!(schedule.in_transition(p(0.01)), None); // leading gap
        assert_eq!(schedule.in_transition(p(0.1)), Some(0));
        assert_eq!(schedule.in_transition(p(0.27)), None); // gap before card 1
        assert_eq!(schedule.in_transition(p(0.4)), Some(1));
        assert_eq!(schedule.in_transition(p(1.0)), None);
    }

    #[test]
    fn sampling_is_order_independent() {
        let schedule = default_schedule(5);
        let forward: Vec<_> = [0.1, 0.4, 0.9].iter().map(|&v| schedule.sample(p(v))).collect();
        let backward: Vec<_> = [0.9, 0.4, 0.1].iter().map(|&v| schedule.sample(p(v))).collect();
        assert_eq!(forward[0], backward[2]);
        assert_eq!(forward[1], backward[1]);
        assert_eq!(forward[2], backward[0]);
    }

    #[test]
    fn out_of_range_card_rests() {
        let schedule = default_schedule(2);
        assert_eq!(schedule.sample_card(9, p(1.0)), CardTransform::REST);
    }

    #[test]
    fn multi_keyframe_track_chains_targets() {
        let lifted = CardTransform::new(-100.0, 0.9, 0.8);
        let track = CardTrack::new(vec![
            Keyframe {
                start: 0.0,
                end: 0.5,
                target: lifted,
                easing: Easing::Linear,
            },
            Keyframe {
                start: 0.5,
                end: 1.0,
                target: CardTransform::EXIT,
                easing: Easing::Linear,
            },
        ])
        .unwrap();
        assert_eq!(track.sample(p(0.5)), lifted);
        let mid = track.sample(p(0.75));
        assert!(close(mid.offset_y, -175.0));
        assert!(close(mid.opacity, 0.4));
        assert_eq!(track.sample(p(1.0)), CardTransform::EXIT);
    }

    #[test]
    fn overlapping_keyframes_are_rejected() {
        let kf = |start, end| Keyframe {
            start,
            end,
            target: CardTransform::EXIT,
            easing: Easing::Linear,
        };
        assert!(CardTrack::new(vec![kf(0.0, 0.6), kf(0.5, 1.0)]).is_err());
        assert!(CardTrack::new(vec![kf(0.6, 0.2)]).is_err());
        assert!(CardTrack::new(vec![kf(0.0, 1.5)]).is_err());
        assert!(CardTrack::new(vec![kf(0.0, 0.5), kf(0.5, 1.0)]).is_ok());
    }

    #[test]
    fn zero_gap_stages_touch() {
        let schedule = StageSchedule::build(
            3,
            StageTiming {
                duration: 1.0,
                gap: 0.0,
            },
            CardTransform::EXIT,
            Easing::Linear,
        );
        let (s0, e0) = schedule.stage_bounds(0).unwrap();
        let (s1, e1) = schedule.stage_bounds(1).unwrap();
        assert!(close(s0, 0.0) && close(e0, 0.5));
        assert!(close(s1, 0.5) && close(e1, 1.0));
    }

    #[test]
    fn timing_check_rejects_bad_values() {
        assert!(StageTiming::default().check().is_ok());
        assert!(StageTiming { duration: 0.0, gap: 0.5 }.check().is_err());
        assert!(StageTiming { duration: 1.0, gap: -0.1 }.check().is_err());
        assert!(StageTiming { duration: f32::NAN, gap: 0.0 }.check().is_err());
    }

    #[test]
    fn lerp_clamps_opacity() {
        let t = CardTransform::REST.lerp(CardTransform::new(0.0, 1.0, 2.0), 1.0);
        assert_eq!(t.opacity, 1.0);
    }
}
