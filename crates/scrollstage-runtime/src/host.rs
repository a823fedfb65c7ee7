#![forbid(unsafe_code)]

//! Scroll host capability: pinning and scroll observation.
//!
//! The host environment owns the scroll position and the layout. The
//! controller asks it to keep a region pinned for a travel distance and gets
//! back a subscription id; the host then emits [`ScrollTick`]s tagged with
//! that id, and the application routes them to the controller.
//!
//! Everything is host-driven and single-threaded: ticks are plain values, so
//! a tick delivered after its subscription was released is recognised as
//! stale and dropped instead of firing against torn-down elements.

use std::cell::RefCell;
use std::rc::Rc;

use scrollstage_core::{PinError, ScrollProgress};

/// Identifier the host assigns to a pin/observe registration.
pub type SubId = u64;

/// Opaque reference to a host region that can be pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub u64);

/// Request to pin `region` for `travel` units of scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinRequest {
    /// Region to keep fixed in the viewport.
    pub region: RegionId,
    /// Scroll distance over which the region stays pinned.
    pub travel: f32,
}

/// What the host returns for an accepted pin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinGrant {
    /// Id that tags every tick for this pin.
    pub subscription: SubId,
    /// Absolute scroll offset at which pinning begins.
    pub start_offset: f32,
}

/// One scroll-position sample for a subscription.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTick {
    /// Subscription the tick belongs to.
    pub subscription: SubId,
    /// Absolute scroll offset.
    pub offset: f32,
}

/// Pinning and scroll-observation service provided by the host.
pub trait ScrollHost {
    /// Pin a region and start emitting ticks for it.
    fn pin(&mut self, request: PinRequest) -> Result<PinGrant, PinError>;

    /// Stop emitting ticks for `subscription` and release its pin.
    ///
    /// Releasing an unknown id must be a no-op.
    fn release(&mut self, subscription: SubId);
}

impl<S: ScrollHost + ?Sized> ScrollHost for Box<S> {
    fn pin(&mut self, request: PinRequest) -> Result<PinGrant, PinError> {
        (**self).pin(request)
    }

    fn release(&mut self, subscription: SubId) {
        (**self).release(subscription);
    }
}

/// Shared single-threaded host: the application keeps one clone to pump
/// ticks while the controller keeps another to pin and release.
impl<S: ScrollHost + ?Sized> ScrollHost for Rc<RefCell<S>> {
    fn pin(&mut self, request: PinRequest) -> Result<PinGrant, PinError> {
        self.borrow_mut().pin(request)
    }

    fn release(&mut self, subscription: SubId) {
        self.borrow_mut().release(subscription);
    }
}

/// A live pin registration, exclusively owned by one controller.
///
/// Deliberately not `Clone`: the only way to end it is
/// [`Subscription::cancel`], which hands the id back to the host.
#[derive(Debug, PartialEq)]
pub struct Subscription {
    id: SubId,
    region: RegionId,
    start_offset: f32,
    travel: f32,
}

impl Subscription {
    pub(crate) fn new(grant: PinGrant, request: PinRequest) -> Self {
        Self {
            id: grant.subscription,
            region: request.region,
            start_offset: grant.start_offset,
            travel: request.travel,
        }
    }

    /// Host-assigned id.
    #[must_use]
    pub fn id(&self) -> SubId {
        self.id
    }

    /// Pinned region.
    #[must_use]
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Absolute offset where the pin starts.
    #[must_use]
    pub fn start_offset(&self) -> f32 {
        self.start_offset
    }

    /// Pinned travel distance.
    #[must_use]
    pub fn travel(&self) -> f32 {
        self.travel
    }

    /// Whether `tick` was emitted for this subscription.
    #[must_use]
    pub fn accepts(&self, tick: &ScrollTick) -> bool {
        tick.subscription == self.id
    }

    /// Progress of an absolute offset through this pin.
    #[must_use]
    pub fn progress(&self, offset: f32) -> ScrollProgress {
        ScrollProgress::from_offset(offset, self.start_offset, self.travel)
    }

    /// Release the pin. Consumes the subscription.
    pub(crate) fn cancel<S: ScrollHost + ?Sized>(self, host: &mut S) {
        host.release(self.id);
    }
}
