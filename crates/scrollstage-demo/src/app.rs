#![forbid(unsafe_code)]

//! Demo application state: page host, scene, and the timeline controller.
//!
//! Input events become page scroll movements; every movement's ticks are
//! routed to the controller, which writes the scene through its handles.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use scrollstage_runtime::{Catalog, TimelineConfig, TimelineController, TimelineError};

use crate::host::{SECTION, TerminalScrollHost};
use crate::render::{self, PAGE_PX_PER_ROW, Paint, View};
use crate::scene::{Scene, SceneHandle, SharedScene};

/// Host shared between the app (which scrolls it) and the controller.
pub type SharedHost = Rc<RefCell<TerminalScrollHost>>;

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    controller: TimelineController<SceneHandle, SharedHost>,
    host: SharedHost,
    scene: SharedScene,
    step: f32,
    page: f32,
}

impl App {
    /// Build the page for a viewport `rows` tall and attach the timeline.
    pub fn new(
        catalog: Catalog,
        config: TimelineConfig,
        step: f32,
        rows: u16,
    ) -> Result<Self, TimelineError> {
        let page = f32::from(rows.max(1)) * PAGE_PX_PER_ROW;
        let host: SharedHost = Rc::new(RefCell::new(TerminalScrollHost::new(page, page)));
        let scene = Scene::new(catalog.len()).shared();
        let (cards, contents) = SceneHandle::for_scene(&scene);

        let mut controller = TimelineController::new(catalog, Rc::clone(&host), config)?;
        controller.attach(SECTION, cards, contents)?;
        Ok(Self {
            controller,
            host,
            scene,
            step,
            page,
        })
    }

    /// The controller.
    #[must_use]
    pub fn controller(&self) -> &TimelineController<SceneHandle, SharedHost> {
        &self.controller
    }

    /// Current page offset.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.host.borrow().offset()
    }

    /// Scroll the page to `offset` and deliver the resulting ticks.
    pub fn scroll_to(&mut self, offset: f32) -> Result<(), TimelineError> {
        let ticks = self.host.borrow_mut().scroll_to(offset);
        for tick in &ticks {
            self.controller.on_tick(tick)?;
        }
        Ok(())
    }

    /// Scroll the page by `delta`.
    pub fn scroll_by(&mut self, delta: f32) -> Result<(), TimelineError> {
        let target = self.offset() + delta;
        self.scroll_to(target)
    }

    /// Scroll so item `index` becomes active.
    pub fn jump_to_item(&mut self, index: usize) -> Result<(), TimelineError> {
        let Some(offset) = self.controller.offset_for_index(index) else {
            return Ok(());
        };
        self.scroll_to(offset)
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Flow, TimelineError> {
        if key.kind != KeyEventKind::Press {
            return Ok(Flow::Continue);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Flow::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Flow::Quit);
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(self.step)?,
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-self.step)?,
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(self.page)?,
            KeyCode::PageUp => self.scroll_by(-self.page)?,
            KeyCode::Home => self.scroll_to(0.0)?,
            KeyCode::End => {
                let end = self.host.borrow().max_offset();
                self.scroll_to(end)?;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < self.controller.catalog().len() {
                    self.jump_to_item(index)?;
                }
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    /// Handle a mouse event (wheel only).
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<(), TimelineError> {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(self.step),
            MouseEventKind::ScrollUp => self.scroll_by(-self.step),
            _ => Ok(()),
        }
    }

    /// Step the scrub playhead. Returns `true` while cards are still moving.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.controller.advance(dt)
    }

    /// Read and clear the scene's dirty flag.
    pub fn take_dirty(&self) -> bool {
        self.scene.borrow_mut().take_dirty()
    }

    /// Force the next frame to redraw.
    pub fn mark_dirty(&self) {
        self.scene.borrow_mut().mark_dirty();
    }

    /// Lay out a frame for a `width` × `height` terminal.
    #[must_use]
    pub fn compose(&self, width: u16, height: u16) -> Vec<Paint> {
        let scene = self.scene.borrow();
        let host = self.host.borrow();
        let snapshot = self.controller.snapshot();
        render::compose(&View {
            scene: &scene,
            catalog: self.controller.catalog(),
            progress: snapshot.progress,
            active: snapshot.active_index,
            offset: host.offset(),
            section_start: host.section_start(),
            travel: self.controller.travel(),
            width,
            height,
        })
    }

    /// Detach the timeline. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.controller.detach();
    }
}
