#![forbid(unsafe_code)]

//! Page model that scrolls in the terminal.
//!
//! The page is an intro block, the pinned card section, and an outro block.
//! Scrolling is clamped to the page; while the section is pinned the page
//! grows by the pinned travel.

use scrollstage_runtime::{
    PinError, PinGrant, PinRequest, RegionId, ScrollHost, ScrollTick, SubId,
};

/// The card section's region id.
pub const SECTION: RegionId = RegionId(1);

#[derive(Debug, Clone, Copy)]
struct Pin {
    id: SubId,
    travel: f32,
}

/// Single-section [`ScrollHost`] driven by keyboard and wheel input.
#[derive(Debug)]
pub struct TerminalScrollHost {
    /// Height of the intro block above the section.
    intro: f32,
    /// Height of the outro block after the section unpins.
    outro: f32,
    offset: f32,
    pin: Option<Pin>,
    next_id: SubId,
}

impl TerminalScrollHost {
    #[must_use]
    pub fn new(intro: f32, outro: f32) -> Self {
        Self {
            intro: intro.max(0.0),
            outro: outro.max(0.0),
            offset: 0.0,
            pin: None,
            next_id: 0,
        }
    }

    /// Current offset.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Offset where the section pins.
    #[must_use]
    pub fn section_start(&self) -> f32 {
        self.intro
    }

    /// Largest reachable offset.
    #[must_use]
    pub fn max_offset(&self) -> f32 {
        self.intro + self.pin.map_or(0.0, |p| p.travel) + self.outro
    }

    /// Scroll to `offset` (clamped) and return the ticks to deliver.
    pub fn scroll_to(&mut self, offset: f32) -> Vec<ScrollTick> {
        let clamped = offset.clamp(0.0, self.max_offset());
        if clamped == self.offset {
            return Vec::new();
        }
        self.offset = clamped;
        self.pin
            .map(|p| ScrollTick {
                subscription: p.id,
                offset: clamped,
            })
            .into_iter()
            .collect()
    }

    /// Scroll by `delta` (clamped).
    pub fn scroll_by(&mut self, delta: f32) -> Vec<ScrollTick> {
        self.scroll_to(self.offset + delta)
    }
}

impl ScrollHost for TerminalScrollHost {
    fn pin(&mut self, request: PinRequest) -> Result<PinGrant, PinError> {
        if request.region != SECTION {
            return Err(PinError::UnknownRegion(request.region.0));
        }
        if self.pin.is_some() {
            return Err(PinError::RegionBusy(request.region.0));
        }
        self.next_id += 1;
        self.pin = Some(Pin {
            id: self.next_id,
            travel: request.travel,
        });
        tracing::debug!(sub_id = self.next_id, travel = request.travel, "section pinned");
        Ok(PinGrant {
            subscription: self.next_id,
            start_offset: self.intro,
        })
    }

    fn release(&mut self, subscription: SubId) {
        if self.pin.is_some_and(|p| p.id == subscription) {
            self.pin = None;
            self.offset = self.offset.min(self.max_offset());
            tracing::debug!(sub_id = subscription, "section released");
        }
    }
}
