#![forbid(unsafe_code)]

//! Ready-made controller rigs.

use scrollstage_runtime::{
    Catalog, ContentItem, RegionId, ScrollProgress, SubId, TickOutcome, TimelineConfig,
    TimelineController, TimelineError, VisualState,
};

use crate::recording::{RecordingHandle, states, visible_indices};
use crate::sim_host::{SharedHost, SimulatedScrollHost};

/// Region every rig pins.
pub const RIG_REGION: RegionId = RegionId(1);

/// Catalog of `n` items with ids `1..=n`.
///
/// # Panics
///
/// Panics when `n == 0`; use [`Catalog::new`] directly to exercise the
/// empty-catalog error.
#[must_use]
pub fn numbered_catalog(n: usize) -> Catalog {
    let items = (1..=n as u64)
        .map(|id| {
            ContentItem::new(id, format!("Card {id}"), "zap")
                .heading(format!("Heading {id}"))
                .body(format!("Body text for item {id}."))
                .features([format!("Feature {id}a"), format!("Feature {id}b")])
        })
        .collect();
    Catalog::new(items).expect("numbered catalog needs n > 0")
}

/// Controller with recording handles, attached to a simulated host.
pub struct Rig {
    pub host: SharedHost,
    pub controller: TimelineController<RecordingHandle, SharedHost>,
    pub cards: Vec<RecordingHandle>,
    pub contents: Vec<RecordingHandle>,
    pub subscription: SubId,
    pub start_offset: f32,
}

impl Rig {
    /// Attach `catalog` with `config`; the pin starts at `start_offset`.
    pub fn attach(
        catalog: Catalog,
        config: TimelineConfig,
        start_offset: f32,
    ) -> Result<Self, TimelineError> {
        let host = SimulatedScrollHost::with_region(RIG_REGION, start_offset).shared();
        let n = catalog.len();
        let cards = RecordingHandle::many(n);
        let contents = RecordingHandle::many(n);
        let mut controller = TimelineController::new(catalog, host.clone(), config)?;
        let subscription = controller.attach(RIG_REGION, cards.clone(), contents.clone())?;
        Ok(Self {
            host,
            controller,
            cards,
            contents,
            subscription,
            start_offset,
        })
    }

    /// `n` numbered items, default config, pin at offset 0.
    pub fn numbered(n: usize) -> Result<Self, TimelineError> {
        Self::attach(numbered_catalog(n), TimelineConfig::default(), 0.0)
    }

    /// Scroll the host and route every emitted tick.
    pub fn scroll_to(&mut self, offset: f32) -> Result<Vec<TickOutcome>, TimelineError> {
        let ticks = self.host.borrow_mut().scroll_to(offset);
        ticks.iter().map(|t| self.controller.on_tick(t)).collect()
    }

    /// Scroll to the offset matching `progress` through the pin.
    pub fn scroll_to_progress(&mut self, progress: f32) -> Result<Vec<TickOutcome>, TimelineError> {
        let offset = self.start_offset + progress * self.controller.travel();
        self.scroll_to(offset)
    }

    /// Progress of the last applied tick.
    #[must_use]
    pub fn progress(&self) -> ScrollProgress {
        self.controller.snapshot().progress
    }

    /// Indices of visible content panels.
    #[must_use]
    pub fn visible_panels(&self) -> Vec<usize> {
        visible_indices(&self.contents)
    }

    /// Current card states.
    #[must_use]
    pub fn card_states(&self) -> Vec<VisualState> {
        states(&self.cards)
    }

    /// Current content states.
    #[must_use]
    pub fn content_states(&self) -> Vec<VisualState> {
        states(&self.contents)
    }

    /// Total writes across all handles.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.cards
            .iter()
            .chain(&self.contents)
            .map(RecordingHandle::write_count)
            .sum()
    }

    /// Clear every handle's write log.
    pub fn clear_logs(&self) {
        for h in self.cards.iter().chain(&self.contents) {
            h.clear_log();
        }
    }

    /// Text frame of the current handle states.
    #[must_use]
    pub fn frame(&self) -> String {
        crate::timeline_to_text(&self.cards, &self.contents)
    }
}
