#![forbid(unsafe_code)]

//! Core: content catalog, progress math, easing, and stage schedules.
//!
//! Everything in this crate is pure. Nothing here owns a subscription or
//! touches a visual element; the runtime crate drives these functions from
//! scroll ticks.

pub mod animation;
pub mod catalog;
pub mod error;
pub mod logging;
pub mod progress;
pub mod schedule;

pub use catalog::{Catalog, CardFace, ContentBody, ContentItem, Icon, ItemId};
pub use error::{ConfigurationError, HandleRole, InvalidState, PinError, TimelineError};
pub use progress::{ScrollProgress, TravelDistance, active_index};
pub use schedule::{CardTrack, CardTransform, Keyframe, StageSchedule, StageTiming};

// Re-export tracing macros at crate root so `crate::debug!` resolves with or
// without the feature (the no-op shims are `#[macro_export]`ed to the root).
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
