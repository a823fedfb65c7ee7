#![forbid(unsafe_code)]

//! Test harness for scrollstage timelines.
//!
//! - **Recording handles**: [`RecordingHandle`] logs every property write
//!   and exposes the resulting [`VisualState`].
//! - **Simulated host**: [`SimulatedScrollHost`] pins regions and emits
//!   ticks on demand, so tick order is fully under test control.
//! - **Rigs**: [`Rig`] wires both to a controller in one call.
//! - **Text frames**: [`timeline_to_text`] prints handle states one per line
//!   for whole-frame assertions.
//!
//! # Quick Start
//!
//! ```ignore
//! use scrollstage_harness::Rig;
//!
//! let mut rig = Rig::numbered(5)?;
//! rig.scroll_to_progress(0.45)?;
//! assert_eq!(rig.visible_panels(), vec![2]);
//! ```

pub mod recording;
pub mod scenario;
pub mod sim_host;

use std::fmt::Write as FmtWrite;

pub use recording::{RecordingHandle, Write, states, visible_indices};
pub use scenario::{RIG_REGION, Rig, numbered_catalog};
pub use sim_host::{SharedHost, SimulatedScrollHost};

use scrollstage_runtime::VisualState;

/// Render card and content states as text, one element per line.
///
/// ```text
/// card 0    layer 3  y -250.0  scale 1.00  opacity 0.00
/// panel 1   shown    y    0.0  opacity 1.00
/// ```
#[must_use]
pub fn timeline_to_text(cards: &[RecordingHandle], contents: &[RecordingHandle]) -> String {
    let mut out = String::new();
    for (i, card) in cards.iter().enumerate() {
        let s = card.state();
        let _ = writeln!(
            out,
            "card {i:<4} layer {:<2} y {:>6.1}  scale {:.2}  opacity {:.2}",
            s.layer,
            norm(s.offset),
            s.scale,
            s.opacity
        );
    }
    for (i, panel) in contents.iter().enumerate() {
        let s = panel.state();
        let _ = writeln!(
            out,
            "panel {i:<3} {:<8} y {:>6.1}  opacity {:.2}",
            shown(&s),
            norm(s.offset),
            s.opacity
        );
    }
    out
}

fn shown(state: &VisualState) -> &'static str {
    if state.visible { "shown" } else { "hidden" }
}

// Avoid "-0.0" in frames.
fn norm(v: f32) -> f32 {
    if v == 0.0 { 0.0 } else { v }
}
