#![forbid(unsafe_code)]

//! End-to-end controller scenarios against the simulated host.
//!
//! ```sh
//! cargo test -p scrollstage-harness --test timeline_scenarios
//! ```

use std::time::Duration;

use pretty_assertions::assert_eq;
use scrollstage_harness::{
    RIG_REGION, RecordingHandle, Rig, SimulatedScrollHost, numbered_catalog, visible_indices,
};
use scrollstage_runtime::{
    Catalog, CardTransform, ConfigurationError, Easing, HandleRole, InvalidState, LifecycleState,
    PinError, RegionId, ScrollTick, TickOutcome, TimelineConfig, TimelineController,
    TimelineError, TravelDistance,
};

// ============================================================================
// Progress banding
// ============================================================================

#[test]
fn five_items_switch_content_at_band_edges() {
    let mut rig = Rig::numbered(5).unwrap();
    assert_eq!(rig.controller.travel(), 4200.0);

    for (progress, expected) in [(0.0, 0), (0.45, 2), (0.999, 4), (1.0, 4)] {
        rig.scroll_to_progress(progress).unwrap();
        assert_eq!(rig.visible_panels(), vec![expected], "progress {progress}");
        assert_eq!(rig.controller.active_index(), expected);
    }
}

#[test]
fn scrolling_outside_the_pin_clamps() {
    let catalog = numbered_catalog(3);
    let mut rig = Rig::attach(catalog, TimelineConfig::default(), 500.0).unwrap();
    rig.scroll_to(0.0).unwrap();
    assert_eq!(rig.visible_panels(), vec![0]);
    assert_eq!(rig.card_states()[0].opacity, 1.0);
    rig.scroll_to(1.0e6).unwrap();
    assert_eq!(rig.visible_panels(), vec![2]);
    assert_eq!(rig.card_states()[1].opacity, 0.0);
}

#[test]
fn exactly_one_panel_visible_along_a_sweep() {
    let mut rig = Rig::numbered(7).unwrap();
    let travel = rig.controller.travel();
    let mut offset = -100.0;
    while offset <= travel + 100.0 {
        rig.scroll_to(offset).unwrap();
        assert_eq!(rig.visible_panels().len(), 1, "offset {offset}");
        offset += 37.0;
    }
}

#[test]
fn reverse_scroll_restores_earlier_state() {
    let mut rig = Rig::numbered(4).unwrap();
    rig.scroll_to_progress(0.2).unwrap();
    let frame = rig.frame();
    rig.scroll_to_progress(0.9).unwrap();
    rig.scroll_to_progress(0.2).unwrap();
    assert_eq!(rig.frame(), frame);
}

// ============================================================================
// Card staging
// ============================================================================

#[test]
fn frame_at_first_stage_end() {
    let mut rig = Rig::numbered(3).unwrap();
    rig.scroll_to(1300.0).unwrap();
    assert_eq!(
        rig.frame(),
        "\
card 0    layer 3  y -250.0  scale 1.00  opacity 0.00
card 1    layer 2  y    0.0  scale 1.00  opacity 1.00
card 2    layer 1  y    0.0  scale 1.00  opacity 1.00
panel 0   hidden   y   20.0  opacity 0.00
panel 1   shown    y    0.0  opacity 1.00
panel 2   hidden   y   20.0  opacity 0.00
"
    );
}

#[test]
fn frame_mid_second_stage_with_linear_easing() {
    let config = TimelineConfig::default().with_card_easing(Easing::Linear);
    let mut rig = Rig::attach(numbered_catalog(3), config, 0.0).unwrap();
    rig.scroll_to_progress(0.8).unwrap();
    assert_eq!(
        rig.frame(),
        "\
card 0    layer 3  y -250.0  scale 1.00  opacity 0.00
card 1    layer 2  y -125.0  scale 1.00  opacity 0.50
card 2    layer 1  y    0.0  scale 1.00  opacity 1.00
panel 0   hidden   y   20.0  opacity 0.00
panel 1   hidden   y   20.0  opacity 0.00
panel 2   shown    y    0.0  opacity 1.00
"
    );
}

#[test]
fn last_card_never_moves() {
    let mut rig = Rig::numbered(4).unwrap();
    for step in 0..=20 {
        rig.scroll_to_progress(step as f32 / 20.0).unwrap();
        let last = rig.card_states()[3];
        assert_eq!(
            (last.offset, last.scale, last.opacity),
            (0.0, 1.0, 1.0),
            "step {step}"
        );
    }
}

#[test]
fn single_item_catalog_is_static() {
    let mut rig = Rig::numbered(1).unwrap();
    assert_eq!(rig.controller.travel(), 1000.0);
    rig.scroll_to_progress(0.7).unwrap();
    assert_eq!(rig.visible_panels(), vec![0]);
    assert_eq!(rig.controller.snapshot().cards, vec![CardTransform::REST]);
}

#[test]
fn fixed_travel_overrides_item_count() {
    let config = TimelineConfig::default().with_travel(TravelDistance::Fixed(900.0));
    let mut rig = Rig::attach(numbered_catalog(3), config, 0.0).unwrap();
    assert_eq!(rig.host.borrow().travel_of(rig.subscription), Some(900.0));
    rig.scroll_to(450.0).unwrap();
    assert_eq!(rig.visible_panels(), vec![1]);
}

// ============================================================================
// Idempotence and routing
// ============================================================================

#[test]
fn repeated_tick_rewrites_identical_values() {
    let mut rig = Rig::numbered(5).unwrap();
    rig.scroll_to(1234.0).unwrap();
    let cards = rig.card_states();
    let contents = rig.content_states();
    let outcomes = rig.scroll_to(1234.0).unwrap();
    assert_eq!(rig.card_states(), cards);
    assert_eq!(rig.content_states(), contents);
    assert!(matches!(
        outcomes.as_slice(),
        [TickOutcome::Applied { switched: false, .. }]
    ));
}

#[test]
fn foreign_ticks_do_not_touch_handles() {
    let mut rig = Rig::numbered(3).unwrap();
    rig.clear_logs();
    let foreign = ScrollTick {
        subscription: rig.subscription + 1,
        offset: 2000.0,
    };
    assert_eq!(rig.controller.on_tick(&foreign), Ok(TickOutcome::Foreign));
    assert_eq!(rig.write_count(), 0);
}

#[test]
fn two_timelines_share_a_host() {
    let mut host = SimulatedScrollHost::with_region(RIG_REGION, 0.0);
    host.add_region(RegionId(2), 3000.0);
    let host = host.shared();
    let (cards_a, contents_a) = (RecordingHandle::many(2), RecordingHandle::many(2));
    let (cards_b, contents_b) = (RecordingHandle::many(2), RecordingHandle::many(2));
    let mut a =
        TimelineController::new(numbered_catalog(2), host.clone(), TimelineConfig::default())
            .unwrap();
    let mut b =
        TimelineController::new(numbered_catalog(2), host.clone(), TimelineConfig::default())
            .unwrap();
    a.attach(RIG_REGION, cards_a, contents_a.clone()).unwrap();
    b.attach(RegionId(2), cards_b, contents_b.clone())
        .unwrap();

    // Offset 1799 ends section A and has not reached section B.
    let ticks = host.borrow_mut().scroll_to(1799.0);
    for tick in &ticks {
        let applied = [a.on_tick(tick).unwrap(), b.on_tick(tick).unwrap()]
            .iter()
            .filter(|o| **o != TickOutcome::Foreign)
            .count();
        assert_eq!(applied, 1);
    }
    assert_eq!(visible_indices(&contents_a), vec![1]);
    assert_eq!(visible_indices(&contents_b), vec![0]);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn empty_catalog_fails_before_any_subscription() {
    let host = SimulatedScrollHost::with_region(RIG_REGION, 0.0).shared();
    let err = Catalog::new(Vec::new()).unwrap_err();
    assert_eq!(
        err,
        TimelineError::Configuration(ConfigurationError::EmptyCatalog)
    );
    assert_eq!(host.borrow().live_subscriptions(), 0);
}

#[test]
fn double_attach_keeps_one_subscription() {
    let mut rig = Rig::numbered(3).unwrap();
    let err = rig
        .controller
        .attach(RIG_REGION, RecordingHandle::many(3), RecordingHandle::many(3))
        .unwrap_err();
    assert_eq!(err, TimelineError::InvalidState(InvalidState::AlreadyAttached));
    assert_eq!(rig.host.borrow().live_subscriptions(), 1);
    assert!(rig.host.borrow().is_live(rig.subscription));
}

#[test]
fn busy_region_is_reported_as_pin_error() {
    let rig = Rig::numbered(2).unwrap();
    let mut other = TimelineController::new(
        numbered_catalog(2),
        rig.host.clone(),
        TimelineConfig::default(),
    )
    .unwrap();
    let err = other
        .attach(RIG_REGION, RecordingHandle::many(2), RecordingHandle::many(2))
        .unwrap_err();
    assert_eq!(err, TimelineError::Pin(PinError::RegionBusy(1)));
    assert_eq!(other.state(), LifecycleState::Uninitialized);
}

#[test]
fn missing_content_handle_is_named() {
    let host = SimulatedScrollHost::with_region(RIG_REGION, 0.0).shared();
    let mut ctl =
        TimelineController::new(numbered_catalog(4), host.clone(), TimelineConfig::default())
            .unwrap();
    let contents = RecordingHandle::many(4);
    contents[3].detach_element();
    let err = ctl
        .attach(RIG_REGION, RecordingHandle::many(4), contents)
        .unwrap_err();
    assert_eq!(
        err,
        TimelineError::MissingHandle {
            role: HandleRole::Content,
            index: 3
        }
    );
    assert_eq!(host.borrow().live_subscriptions(), 0);
}

#[test]
fn no_writes_after_detach() {
    let mut rig = Rig::numbered(3).unwrap();
    rig.scroll_to_progress(0.6).unwrap();
    let sub = rig.subscription;
    rig.controller.detach();
    assert!(!rig.host.borrow().is_live(sub));
    assert_eq!(rig.host.borrow().released(), &[sub]);
    assert_eq!(rig.visible_panels(), vec![0]);

    rig.clear_logs();
    // The host no longer emits for the released pin.
    assert!(rig.scroll_to(2000.0).unwrap().is_empty());
    // A stale tick captured before release is refused.
    let stale = ScrollTick {
        subscription: sub,
        offset: 2000.0,
    };
    assert_eq!(
        rig.controller.on_tick(&stale),
        Err(TimelineError::InvalidState(InvalidState::NotAttached))
    );
    assert!(!rig.controller.advance(Duration::from_millis(16)));
    rig.controller.detach();
    assert_eq!(rig.write_count(), 0);
}

#[test]
fn dropping_the_controller_releases_the_pin() {
    let rig = Rig::numbered(2).unwrap();
    let host = rig.host.clone();
    let sub = rig.subscription;
    drop(rig);
    assert!(!host.borrow().is_live(sub));
    assert_eq!(host.borrow().live_subscriptions(), 0);
}

#[test]
fn remount_after_detach_uses_a_new_controller() {
    let mut rig = Rig::numbered(2).unwrap();
    rig.controller.detach();
    let mut fresh = TimelineController::new(
        numbered_catalog(2),
        rig.host.clone(),
        TimelineConfig::default(),
    )
    .unwrap();
    let sub = fresh
        .attach(RIG_REGION, rig.cards.clone(), rig.contents.clone())
        .unwrap();
    assert_ne!(sub, rig.subscription);
    assert_eq!(rig.host.borrow().live_subscriptions(), 1);
}

// ============================================================================
// Scrub
// ============================================================================

#[test]
fn scrub_lags_cards_but_not_content() {
    let config = TimelineConfig::default().with_scrub(Some(Duration::from_secs(1)));
    let mut rig = Rig::attach(numbered_catalog(3), config, 0.0).unwrap();
    rig.scroll_to_progress(1.0).unwrap();
    assert_eq!(rig.visible_panels(), vec![2]);
    assert_eq!(rig.card_states()[0].opacity, 1.0);

    // Half the lag: card 0 is on its way out.
    for _ in 0..30 {
        rig.controller.advance(Duration::from_millis(16));
    }
    let mid = rig.controller.snapshot();
    assert!(mid.playhead.get() > 0.0 && mid.playhead.get() < 1.0);
    assert!(rig.card_states()[0].opacity < 1.0);

    while rig.controller.advance(Duration::from_millis(16)) {}
    assert_eq!(rig.card_states()[0].opacity, 0.0);
    assert_eq!(rig.card_states()[1].opacity, 0.0);
    assert_eq!(rig.card_states()[2].opacity, 1.0);
}
