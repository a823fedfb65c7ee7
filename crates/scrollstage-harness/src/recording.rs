#![forbid(unsafe_code)]

//! Recording visual handles.
//!
//! A [`RecordingHandle`] is a cheap clone over shared state: the controller
//! owns one clone, the test keeps another and inspects what was written.

use std::cell::RefCell;
use std::rc::Rc;

use scrollstage_runtime::{VisualHandle, VisualProps, VisualState};

/// One property write, in call order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Write {
    Opacity(f32),
    Offset(f32),
    Scale(f32),
    Visible(bool),
    Layer(i32),
}

impl Write {
    /// The property this write targets.
    #[must_use]
    pub fn prop(&self) -> VisualProps {
        match self {
            Self::Opacity(_) => VisualProps::OPACITY,
            Self::Offset(_) => VisualProps::OFFSET,
            Self::Scale(_) => VisualProps::SCALE,
            Self::Visible(_) => VisualProps::VISIBLE,
            Self::Layer(_) => VisualProps::LAYER,
        }
    }
}

#[derive(Debug, Default)]
struct Recorded {
    state: VisualState,
    log: Vec<Write>,
    touched: VisualProps,
    detached: bool,
}

/// Visual handle that stores its state and logs every write.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandle {
    inner: Rc<RefCell<Recorded>>,
}

impl RecordingHandle {
    /// A fresh handle at the default visual state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `n` independent handles.
    #[must_use]
    pub fn many(n: usize) -> Vec<Self> {
        (0..n).map(|_| Self::new()).collect()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> VisualState {
        self.inner.borrow().state
    }

    /// Every write since creation or the last [`clear_log`](Self::clear_log).
    #[must_use]
    pub fn log(&self) -> Vec<Write> {
        self.inner.borrow().log.clone()
    }

    /// Number of writes since the last clear.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.borrow().log.len()
    }

    /// Properties written since the last clear.
    #[must_use]
    pub fn touched(&self) -> VisualProps {
        self.inner.borrow().touched
    }

    /// Forget the write log; state is kept.
    pub fn clear_log(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.log.clear();
        inner.touched = VisualProps::empty();
    }

    /// Simulate the element leaving the visual tree.
    pub fn detach_element(&self) {
        self.inner.borrow_mut().detached = true;
    }

    fn record(&mut self, write: Write) {
        let mut inner = self.inner.borrow_mut();
        match write {
            Write::Opacity(v) => inner.state.opacity = v,
            Write::Offset(v) => inner.state.offset = v,
            Write::Scale(v) => inner.state.scale = v,
            Write::Visible(v) => inner.state.visible = v,
            Write::Layer(v) => inner.state.layer = v,
        }
        inner.touched |= write.prop();
        inner.log.push(write);
    }
}

impl VisualHandle for RecordingHandle {
    fn set_opacity(&mut self, opacity: f32) {
        self.record(Write::Opacity(opacity));
    }

    fn set_offset(&mut self, offset_y: f32) {
        self.record(Write::Offset(offset_y));
    }

    fn set_scale(&mut self, scale: f32) {
        self.record(Write::Scale(scale));
    }

    fn set_visible(&mut self, visible: bool) {
        self.record(Write::Visible(visible));
    }

    fn set_layer(&mut self, layer: i32) {
        self.record(Write::Layer(layer));
    }

    fn is_attached(&self) -> bool {
        !self.inner.borrow().detached
    }
}

/// Snapshot the states of a handle slice.
#[must_use]
pub fn states(handles: &[RecordingHandle]) -> Vec<VisualState> {
    handles.iter().map(RecordingHandle::state).collect()
}

/// Indices of handles currently visible.
#[must_use]
pub fn visible_indices(handles: &[RecordingHandle]) -> Vec<usize> {
    handles
        .iter()
        .enumerate()
        .filter(|(_, h)| h.state().visible)
        .map(|(i, _)| i)
        .collect()
}
