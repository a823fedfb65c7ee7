#![forbid(unsafe_code)]

//! Timeline configuration.
//!
//! Defaults reproduce the stacked-card section this crate was built for:
//! 1000 units of travel for the first item plus 800 per additional item,
//! 2-unit exits separated by 0.5-unit pauses, cards lifting 250 units while
//! fading out on a cubic ease-out, and inactive content panels parked 20
//! units below their resting position.
//!
//! With the `serde` feature the config round-trips through JSON; missing
//! fields fall back to the defaults.

use std::fmt;
use std::time::Duration;

use scrollstage_core::animation::Easing;
use scrollstage_core::{
    CardTransform, ConfigurationError, StageSchedule, StageTiming, TimelineError, TravelDistance,
};

/// Tunables for a [`TimelineController`](crate::TimelineController).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimelineConfig {
    /// Pinned travel distance.
    pub travel: TravelDistance,
    /// Exit-stage length and leading pause.
    pub timing: StageTiming,
    /// Transform a card reaches when it has fully exited.
    pub card_exit: CardTransform,
    /// Curve for card exits.
    pub card_easing: Easing,
    /// Offset applied to hidden content panels.
    pub content_hidden_offset: f32,
    /// Lag of the card playhead behind scroll. `None` tracks scroll exactly.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub scrub: Option<Duration>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            travel: TravelDistance::default(),
            timing: StageTiming::default(),
            card_exit: CardTransform::EXIT,
            card_easing: Easing::EaseOutCubic,
            content_hidden_offset: 20.0,
            scrub: None,
        }
    }
}

impl TimelineConfig {
    /// Set the travel distance (builder).
    #[must_use]
    pub fn with_travel(mut self, travel: TravelDistance) -> Self {
        self.travel = travel;
        self
    }

    /// Set stage timing (builder).
    #[must_use]
    pub fn with_timing(mut self, timing: StageTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Set the card exit transform (builder).
    #[must_use]
    pub fn with_card_exit(mut self, exit: CardTransform) -> Self {
        self.card_exit = exit;
        self
    }

    /// Set the card easing (builder).
    #[must_use]
    pub fn with_card_easing(mut self, easing: Easing) -> Self {
        self.card_easing = easing;
        self
    }

    /// Set the hidden content offset (builder).
    #[must_use]
    pub fn with_content_hidden_offset(mut self, offset: f32) -> Self {
        self.content_hidden_offset = offset;
        self
    }

    /// Enable or disable scrub smoothing (builder).
    #[must_use]
    pub fn with_scrub(mut self, lag: Option<Duration>) -> Self {
        self.scrub = lag;
        self
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), TimelineError> {
        self.travel.check()?;
        self.timing.check()?;
        let exit = self.card_exit;
        if !(exit.offset_y.is_finite() && exit.scale.is_finite()) {
            return Err(invalid("card_exit", "offset and scale must be finite"));
        }
        if !(0.0..=1.0).contains(&exit.opacity) {
            return Err(invalid("card_exit", "opacity must lie in [0, 1]"));
        }
        if !self.content_hidden_offset.is_finite() {
            return Err(invalid("content_hidden_offset", "must be finite"));
        }
        if self.scrub.is_some_and(|lag| lag.is_zero()) {
            return Err(invalid("scrub", "use None instead of a zero lag"));
        }
        Ok(())
    }

    /// Build the stage schedule for `n` cards.
    #[must_use]
    pub fn schedule(&self, n: usize) -> StageSchedule {
        StageSchedule::build(n, self.timing, self.card_exit, self.card_easing)
    }
}

fn invalid(field: &'static str, reason: &str) -> TimelineError {
    ConfigurationError::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
    .into()
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON loading
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from loading a config file.
#[derive(Debug)]
pub enum ConfigLoadError {
    /// I/O error reading the file.
    Io(std::io::Error),
    /// The text is not a valid config document.
    #[cfg(feature = "serde")]
    Serialization(String),
    /// The document parsed but failed validation.
    Invalid(TimelineError),
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "serde")]
            Self::Serialization(msg) => write!(f, "serialization error: {msg}"),
            Self::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "serde")]
            Self::Serialization(_) => None,
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<TimelineError> for ConfigLoadError {
    fn from(e: TimelineError) -> Self {
        Self::Invalid(e)
    }
}

#[cfg(feature = "serde")]
impl TimelineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| ConfigLoadError::Serialization(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigLoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigLoadError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigLoadError::Serialization(format!("failed to write config: {e}")))
    }
}

/// `Option<Duration>` as optional whole milliseconds.
#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, ser: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => ser.serialize_some(&(d.as_millis() as u64)),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(de)?.map(Duration::from_millis))
    }
}
