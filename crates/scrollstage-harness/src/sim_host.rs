#![forbid(unsafe_code)]

//! Deterministic in-memory scroll host.
//!
//! Holds one scroll offset and a table of pinnable regions. Every scroll
//! movement returns the ticks a real host would emit for the live pins, so
//! tests decide exactly when and in what order the controller sees them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use scrollstage_runtime::{
    PinError, PinGrant, PinRequest, RegionId, ScrollHost, ScrollTick, SubId,
};

/// A simulated host shared between a test and a controller.
pub type SharedHost = Rc<RefCell<SimulatedScrollHost>>;

#[derive(Debug, Clone, Copy)]
struct Pin {
    id: SubId,
    region: RegionId,
    travel: f32,
}

/// In-memory [`ScrollHost`].
#[derive(Debug, Default)]
pub struct SimulatedScrollHost {
    regions: HashMap<RegionId, f32>,
    pins: Vec<Pin>,
    released: Vec<SubId>,
    next_id: SubId,
    offset: f32,
    refuse: Option<String>,
}

impl SimulatedScrollHost {
    /// Empty host at offset 0 with no regions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with a single region whose pin starts at `start_offset`.
    #[must_use]
    pub fn with_region(region: RegionId, start_offset: f32) -> Self {
        let mut host = Self::new();
        host.add_region(region, start_offset);
        host
    }

    /// Wrap in the shared form the controller takes.
    #[must_use]
    pub fn shared(self) -> SharedHost {
        Rc::new(RefCell::new(self))
    }

    /// Register a pinnable region.
    pub fn add_region(&mut self, region: RegionId, start_offset: f32) {
        self.regions.insert(region, start_offset);
    }

    /// Make every following `pin` fail with [`PinError::Host`].
    pub fn refuse_pins(&mut self, reason: impl Into<String>) {
        self.refuse = Some(reason.into());
    }

    /// Current scroll offset.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Number of live pins.
    #[must_use]
    pub fn live_subscriptions(&self) -> usize {
        self.pins.len()
    }

    /// Whether `id` is still pinned.
    #[must_use]
    pub fn is_live(&self, id: SubId) -> bool {
        self.pins.iter().any(|p| p.id == id)
    }

    /// Travel requested for a live pin.
    #[must_use]
    pub fn travel_of(&self, id: SubId) -> Option<f32> {
        self.pins.iter().find(|p| p.id == id).map(|p| p.travel)
    }

    /// Ids released so far, in order.
    #[must_use]
    pub fn released(&self) -> &[SubId] {
        &self.released
    }

    /// Ticks for the current offset without moving.
    #[must_use]
    pub fn ticks(&self) -> Vec<ScrollTick> {
        self.pins
            .iter()
            .map(|p| ScrollTick {
                subscription: p.id,
                offset: self.offset,
            })
            .collect()
    }

    /// Jump to `offset` and return the ticks emitted.
    pub fn scroll_to(&mut self, offset: f32) -> Vec<ScrollTick> {
        self.offset = offset;
        self.ticks()
    }

    /// Move by `delta` and return the ticks emitted.
    pub fn scroll_by(&mut self, delta: f32) -> Vec<ScrollTick> {
        self.scroll_to(self.offset + delta)
    }
}

impl ScrollHost for SimulatedScrollHost {
    fn pin(&mut self, request: PinRequest) -> Result<PinGrant, PinError> {
        if let Some(reason) = &self.refuse {
            return Err(PinError::Host(reason.clone()));
        }
        let Some(&start_offset) = self.regions.get(&request.region) else {
            return Err(PinError::UnknownRegion(request.region.0));
        };
        if self.pins.iter().any(|p| p.region == request.region) {
            return Err(PinError::RegionBusy(request.region.0));
        }
        self.next_id += 1;
        self.pins.push(Pin {
            id: self.next_id,
            region: request.region,
            travel: request.travel,
        });
        Ok(PinGrant {
            subscription: self.next_id,
            start_offset,
        })
    }

    fn release(&mut self, subscription: SubId) {
        let before = self.pins.len();
        self.pins.retain(|p| p.id != subscription);
        if self.pins.len() != before {
            self.released.push(subscription);
        }
    }
}
