#![forbid(unsafe_code)]

//! Scroll timeline controller.
//!
//! Owns the lifecycle of one pinned card section:
//!
//! ```text
//! Uninitialized ──attach──▶ Attached ──detach──▶ Detached
//!       └──────────────────detach───────────────────▲
//! ```
//!
//! While attached, every scroll tick re-derives the whole visual state from
//! the tick's offset: progress, the single visible content panel, and each
//! card's staged transform. Nothing accumulates between ticks, so skipped or
//! repeated ticks cannot drift the state. The one exception is the optional
//! scrub playhead, which trails scroll over time and is stepped by
//! [`TimelineController::advance`].
//!
//! # Invariants
//!
//! 1. At most one [`Subscription`] exists per controller, and only while
//!    attached.
//! 2. Exactly one content panel is visible after every applied tick.
//! 3. After `detach` returns, no tick mutates any handle.
//! 4. `detach` is idempotent and runs on drop.

use std::time::Duration;

use scrollstage_core::animation::{Animation, Scrub};
use scrollstage_core::{
    CardTransform, Catalog, ConfigurationError, ContentItem, HandleRole, InvalidState,
    ScrollProgress, StageSchedule, TimelineError, active_index,
};

use crate::config::TimelineConfig;
use crate::handle::{VisualHandle, write_card};
use crate::host::{PinRequest, RegionId, ScrollHost, ScrollTick, SubId, Subscription};

/// Externally visible lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed, not yet attached.
    Uninitialized,
    /// Pinned and observing scroll.
    Attached,
    /// Torn down; the controller is spent.
    Detached,
}

/// Result of routing a tick to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The tick was for this controller and the visual state was rewritten.
    Applied {
        /// Progress derived from the tick.
        progress: ScrollProgress,
        /// Index of the visible content panel.
        active_index: usize,
        /// Whether the active index differs from the previous tick.
        switched: bool,
    },
    /// The tick belongs to another subscription; nothing was touched.
    Foreign,
}

/// Point-in-time view of the derived state.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSnapshot {
    /// Scroll progress from the last applied tick.
    pub progress: ScrollProgress,
    /// Progress the cards are drawn at (differs from `progress` while scrubbing).
    pub playhead: ScrollProgress,
    /// Visible content panel.
    pub active_index: usize,
    /// Per-card transforms at `playhead`.
    pub cards: Vec<CardTransform>,
    /// Card currently mid-exit, if any.
    pub in_transition: Option<usize>,
}

struct Attachment<H> {
    subscription: Subscription,
    cards: Vec<H>,
    contents: Vec<H>,
}

enum Phase<H> {
    Uninitialized,
    Attached(Attachment<H>),
    Detached,
}

/// Drives card and content handles from a pinned region's scroll ticks.
pub struct TimelineController<H: VisualHandle, S: ScrollHost> {
    catalog: Catalog,
    config: TimelineConfig,
    schedule: StageSchedule,
    travel: f32,
    host: S,
    phase: Phase<H>,
    progress: ScrollProgress,
    active: usize,
    scrub: Option<Scrub>,
}

impl<H: VisualHandle, S: ScrollHost> std::fmt::Debug for TimelineController<H, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineController")
            .field("items", &self.catalog.len())
            .field("state", &self.state())
            .field("progress", &self.progress)
            .field("active", &self.active)
            .finish()
    }
}

impl<H: VisualHandle, S: ScrollHost> TimelineController<H, S> {
    /// Create a controller for `catalog`, pinning through `host`.
    ///
    /// Validates `config`; the catalog is already non-empty and
    /// duplicate-free by construction.
    pub fn new(catalog: Catalog, host: S, config: TimelineConfig) -> Result<Self, TimelineError> {
        config.validate()?;
        let n = catalog.len();
        let schedule = config.schedule(n);
        let travel = config.travel.resolve(n);
        let scrub = config.scrub.map(Scrub::new);
        Ok(Self {
            catalog,
            config,
            schedule,
            travel,
            host,
            phase: Phase::Uninitialized,
            progress: ScrollProgress::START,
            active: 0,
            scrub,
        })
    }

    /// Pin `region` and take over the card and content handles.
    ///
    /// `cards` and `contents` must each hold exactly one attached handle per
    /// catalog item, in catalog order. On success the section shows item 0
    /// with every card at rest, and the host's subscription id is returned.
    /// On failure nothing is pinned and no handle is written.
    pub fn attach(
        &mut self,
        region: RegionId,
        cards: Vec<H>,
        contents: Vec<H>,
    ) -> Result<SubId, TimelineError> {
        match self.phase {
            Phase::Uninitialized => {}
            Phase::Attached(ref att) => {
                tracing::warn!(sub_id = att.subscription.id(), "attach on attached timeline");
                return Err(InvalidState::AlreadyAttached.into());
            }
            Phase::Detached => {
                tracing::warn!("attach on detached timeline");
                return Err(InvalidState::Detached.into());
            }
        }

        let n = self.catalog.len();
        check_handles(&cards, n, HandleRole::Card)?;
        check_handles(&contents, n, HandleRole::Content)?;

        let request = PinRequest {
            region,
            travel: self.travel,
        };
        let grant = self.host.pin(request).inspect_err(|err| {
            tracing::warn!(region = region.0, %err, "host refused pin");
        })?;
        let subscription = Subscription::new(grant, request);
        let sub_id = subscription.id();

        let mut attachment = Attachment {
            subscription,
            cards,
            contents,
        };
        for (i, card) in attachment.cards.iter_mut().enumerate() {
            card.set_layer((n - i) as i32);
        }
        if let Some(scrub) = self.scrub.as_mut() {
            scrub.snap_to(0.0);
        }
        self.phase = Phase::Attached(attachment);
        self.apply_progress(ScrollProgress::START);

        tracing::debug!(
            sub_id,
            region = region.0,
            items = n,
            travel = self.travel,
            start_offset = grant.start_offset,
            "timeline attached"
        );
        Ok(sub_id)
    }

    /// Route a host tick to this controller.
    ///
    /// Fails with [`InvalidState::NotAttached`] when there is no live
    /// subscription; ticks for other subscriptions are reported as
    /// [`TickOutcome::Foreign`]. Neither case touches a handle.
    pub fn on_tick(&mut self, tick: &ScrollTick) -> Result<TickOutcome, TimelineError> {
        let progress = match &self.phase {
            Phase::Attached(att) if att.subscription.accepts(tick) => {
                att.subscription.progress(tick.offset)
            }
            Phase::Attached(_) => return Ok(TickOutcome::Foreign),
            Phase::Uninitialized | Phase::Detached => {
                tracing::debug!(sub_id = tick.subscription, "tick without live subscription");
                return Err(InvalidState::NotAttached.into());
            }
        };
        Ok(self.apply_progress(progress))
    }

    /// Step the scrub playhead by `dt` and redraw cards.
    ///
    /// Returns `true` while the playhead is still catching up. Always `false`
    /// without scrub or when not attached.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Phase::Attached(att) = &mut self.phase else {
            return false;
        };
        let Some(scrub) = self.scrub.as_mut() else {
            return false;
        };
        if scrub.is_complete() {
            return false;
        }
        scrub.tick(dt);
        let playhead = ScrollProgress::new(scrub.value());
        write_cards(&self.schedule, &mut att.cards, playhead);
        !scrub.is_complete()
    }

    /// Release the pin, stop observing, and return handles to rest.
    ///
    /// Idempotent. Valid from any state; afterwards the controller is spent.
    pub fn detach(&mut self) {
        match std::mem::replace(&mut self.phase, Phase::Detached) {
            Phase::Attached(mut att) => {
                let sub_id = att.subscription.id();
                att.subscription.cancel(&mut self.host);
                write_cards(&self.schedule, &mut att.cards, ScrollProgress::START);
                write_contents(&mut att.contents, 0, self.config.content_hidden_offset);
                tracing::debug!(sub_id, "timeline detached");
            }
            Phase::Uninitialized => {
                tracing::debug!("timeline detached before attach");
            }
            Phase::Detached => {}
        }
    }

    /// Recompute everything from `progress`. Requires an attachment.
    fn apply_progress(&mut self, progress: ScrollProgress) -> TickOutcome {
        let Phase::Attached(att) = &mut self.phase else {
            return TickOutcome::Foreign;
        };
        let n = self.catalog.len();
        let index = active_index(progress, n);
        write_contents(&mut att.contents, index, self.config.content_hidden_offset);

        let playhead = match self.scrub.as_mut() {
            Some(scrub) => {
                scrub.retarget(progress.get());
                ScrollProgress::new(scrub.value())
            }
            None => progress,
        };
        write_cards(&self.schedule, &mut att.cards, playhead);

        let switched = index != self.active;
        self.progress = progress;
        self.active = index;
        tracing::trace!(
            progress = progress.get(),
            playhead = playhead.get(),
            active = index,
            switched,
            "tick applied"
        );
        TickOutcome::Applied {
            progress,
            active_index: index,
            switched,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        match self.phase {
            Phase::Uninitialized => LifecycleState::Uninitialized,
            Phase::Attached(_) => LifecycleState::Attached,
            Phase::Detached => LifecycleState::Detached,
        }
    }

    /// The catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// The stage schedule.
    #[must_use]
    pub fn schedule(&self) -> &StageSchedule {
        &self.schedule
    }

    /// Pinned travel distance for this catalog.
    #[must_use]
    pub fn travel(&self) -> f32 {
        self.travel
    }

    /// The scroll host.
    #[must_use]
    pub fn host(&self) -> &S {
        &self.host
    }

    /// The live subscription, if attached.
    #[must_use]
    pub fn subscription(&self) -> Option<&Subscription> {
        match &self.phase {
            Phase::Attached(att) => Some(&att.subscription),
            _ => None,
        }
    }

    /// Card handles (empty unless attached).
    #[must_use]
    pub fn cards(&self) -> &[H] {
        match &self.phase {
            Phase::Attached(att) => &att.cards,
            _ => &[],
        }
    }

    /// Content handles (empty unless attached).
    #[must_use]
    pub fn contents(&self) -> &[H] {
        match &self.phase {
            Phase::Attached(att) => &att.contents,
            _ => &[],
        }
    }

    /// Index of the visible content panel.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Catalog item behind the visible content panel.
    #[must_use]
    pub fn active_item(&self) -> &ContentItem {
        // `active` is always < catalog.len() and the catalog is non-empty.
        &self.catalog.as_slice()[self.active]
    }

    /// Absolute scroll offset at which item `index` becomes active.
    #[must_use]
    pub fn offset_for_index(&self, index: usize) -> Option<f32> {
        let sub = self.subscription()?;
        let n = self.catalog.len();
        Some(
            self.config
                .travel
                .offset_for_index(index, n, sub.start_offset()),
        )
    }

    /// Derived state as of the last applied tick.
    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        let playhead = match &self.scrub {
            Some(scrub) => ScrollProgress::new(scrub.value()),
            None => self.progress,
        };
        TimelineSnapshot {
            progress: self.progress,
            playhead,
            active_index: self.active,
            cards: self.schedule.sample(playhead),
            in_transition: self.schedule.in_transition(playhead),
        }
    }
}

impl<H: VisualHandle, S: ScrollHost> Drop for TimelineController<H, S> {
    fn drop(&mut self) {
        self.detach();
    }
}

fn check_handles<H: VisualHandle>(
    handles: &[H],
    n: usize,
    role: HandleRole,
) -> Result<(), TimelineError> {
    let live = |i: usize| handles.get(i).is_some_and(|h| h.is_attached());
    if let Some(index) = (0..n).find(|&i| !live(i)) {
        tracing::warn!(%role, index, "missing handle");
        return Err(TimelineError::MissingHandle { role, index });
    }
    if handles.len() > n {
        return Err(ConfigurationError::InvalidConfig {
            field: match role {
                HandleRole::Card => "cards",
                HandleRole::Content => "contents",
            },
            reason: format!("expected {n} handles, got {}", handles.len()),
        }
        .into());
    }
    Ok(())
}

/// Hide every panel, then reveal `active`. Hard switch, no cross-fade.
fn write_contents<H: VisualHandle>(contents: &mut [H], active: usize, hidden_offset: f32) {
    for panel in contents.iter_mut() {
        panel.set_opacity(0.0);
        panel.set_offset(hidden_offset);
        panel.set_visible(false);
    }
    if let Some(panel) = contents.get_mut(active) {
        panel.set_opacity(1.0);
        panel.set_offset(0.0);
        panel.set_visible(true);
    }
}

fn write_cards<H: VisualHandle>(
    schedule: &StageSchedule,
    cards: &mut [H],
    playhead: ScrollProgress,
) {
    for (i, card) in cards.iter_mut().enumerate() {
        write_card(card, schedule.sample_card(i, playhead));
    }
}
