#![forbid(unsafe_code)]

//! Scrollstage Runtime
//!
//! Binds the pure timeline math in `scrollstage-core` to a host that owns
//! scrolling and to the visual elements it draws.
//!
//! # Key Components
//!
//! - [`TimelineController`] - Lifecycle owner: attach, tick, advance, detach
//! - [`ScrollHost`] - Host capability for pinning a region and emitting ticks
//! - [`VisualHandle`] - Write-only access to one card or content element
//! - [`TimelineConfig`] - Travel, stage timing, exit transform, scrub lag
//!
//! # How it fits in the system
//! The application owns the host and the elements. It hands the controller a
//! host handle and one [`VisualHandle`] per card and content panel, then
//! forwards every [`ScrollTick`] the host emits to
//! [`TimelineController::on_tick`]. The controller never reads scroll state
//! on its own and never outlives its subscription.

pub mod config;
pub mod controller;
pub mod handle;
pub mod host;

pub use config::{ConfigLoadError, TimelineConfig};
pub use controller::{LifecycleState, TickOutcome, TimelineController, TimelineSnapshot};
pub use handle::{VisualHandle, VisualProps, VisualState};
pub use host::{PinGrant, PinRequest, RegionId, ScrollHost, ScrollTick, SubId, Subscription};

pub use scrollstage_core::animation::{Easing, Scrub};
pub use scrollstage_core::{
    CardFace, CardTrack, CardTransform, Catalog, ConfigurationError, ContentBody, ContentItem,
    HandleRole, Icon, InvalidState, ItemId, Keyframe, PinError, ScrollProgress, StageSchedule,
    StageTiming, TimelineError, TravelDistance, active_index,
};
