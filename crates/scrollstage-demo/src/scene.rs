#![forbid(unsafe_code)]

//! Terminal scene: the element tree the controller's handles write into.

use std::cell::RefCell;
use std::rc::Rc;

use scrollstage_runtime::{VisualHandle, VisualState};

/// Presentation state of every card and content panel.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub cards: Vec<VisualState>,
    pub contents: Vec<VisualState>,
    dirty: bool,
}

/// Scene shared between the render loop and the handles.
pub type SharedScene = Rc<RefCell<Scene>>;

impl Scene {
    /// Scene for `n` items, everything at the default state.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            cards: vec![VisualState::default(); n],
            contents: vec![VisualState::default(); n],
            dirty: true,
        }
    }

    /// Wrap for sharing.
    #[must_use]
    pub fn shared(self) -> SharedScene {
        Rc::new(RefCell::new(self))
    }

    /// Whether anything changed since the last [`take_dirty`](Self::take_dirty).
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Force a redraw (e.g. after a resize).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn slot_mut(&mut self, slot: Slot) -> Option<&mut VisualState> {
        match slot {
            Slot::Card(i) => self.cards.get_mut(i),
            Slot::Content(i) => self.contents.get_mut(i),
        }
    }

    fn update(&mut self, slot: Slot, f: impl FnOnce(&mut VisualState)) {
        let Some(state) = self.slot_mut(slot) else {
            return;
        };
        let before = *state;
        f(state);
        if !before.diff(state).is_empty() {
            self.dirty = true;
        }
    }
}

/// Which scene element a handle addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Card(usize),
    Content(usize),
}

/// [`VisualHandle`] over one scene element.
#[derive(Debug, Clone)]
pub struct SceneHandle {
    scene: SharedScene,
    slot: Slot,
}

impl SceneHandle {
    #[must_use]
    pub fn new(scene: SharedScene, slot: Slot) -> Self {
        Self { scene, slot }
    }

    /// One handle per card and one per content panel.
    #[must_use]
    pub fn for_scene(scene: &SharedScene) -> (Vec<Self>, Vec<Self>) {
        let (n_cards, n_contents) = {
            let s = scene.borrow();
            (s.cards.len(), s.contents.len())
        };
        let cards = (0..n_cards)
            .map(|i| Self::new(Rc::clone(scene), Slot::Card(i)))
            .collect();
        let contents = (0..n_contents)
            .map(|i| Self::new(Rc::clone(scene), Slot::Content(i)))
            .collect();
        (cards, contents)
    }

    fn update(&self, f: impl FnOnce(&mut VisualState)) {
        self.scene.borrow_mut().update(self.slot, f);
    }
}

impl VisualHandle for SceneHandle {
    fn set_opacity(&mut self, opacity: f32) {
        self.update(|s| s.opacity = opacity);
    }

    fn set_offset(&mut self, offset_y: f32) {
        self.update(|s| s.offset = offset_y);
    }

    fn set_scale(&mut self, scale: f32) {
        self.update(|s| s.scale = scale);
    }

    fn set_visible(&mut self, visible: bool) {
        self.update(|s| s.visible = visible);
    }

    fn set_layer(&mut self, layer: i32) {
        self.update(|s| s.layer = layer);
    }

    fn is_attached(&self) -> bool {
        let scene = self.scene.borrow();
        match self.slot {
            Slot::Card(i) => i < scene.cards.len(),
            Slot::Content(i) => i < scene.contents.len(),
        }
    }
}
