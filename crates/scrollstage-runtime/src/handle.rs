#![forbid(unsafe_code)]

//! Visual handle capability.
//!
//! The controller never paints anything. It issues "set this property on
//! this element" commands through [`VisualHandle`], which the presentation
//! layer implements over whatever element tree it owns. A handle is a
//! reference for writing presentation properties, never an owner of the
//! element behind it.

use bitflags::bitflags;

use scrollstage_core::CardTransform;

/// Write access to one addressable visual element.
pub trait VisualHandle {
    /// Set opacity in [0, 1].
    fn set_opacity(&mut self, opacity: f32);

    /// Set the vertical offset from the element's resting position.
    fn set_offset(&mut self, offset_y: f32);

    /// Set the uniform scale factor.
    fn set_scale(&mut self, scale: f32);

    /// Show or hide the element entirely (display, not just opacity).
    fn set_visible(&mut self, visible: bool);

    /// Set the stacking layer; higher layers draw on top.
    fn set_layer(&mut self, _layer: i32) {}

    /// Whether the element is still part of the visual tree.
    fn is_attached(&self) -> bool {
        true
    }
}

impl<H: VisualHandle + ?Sized> VisualHandle for Box<H> {
    fn set_opacity(&mut self, opacity: f32) {
        (**self).set_opacity(opacity);
    }

    fn set_offset(&mut self, offset_y: f32) {
        (**self).set_offset(offset_y);
    }

    fn set_scale(&mut self, scale: f32) {
        (**self).set_scale(scale);
    }

    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible);
    }

    fn set_layer(&mut self, layer: i32) {
        (**self).set_layer(layer);
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }
}

bitflags! {
    /// Set of presentation properties, used to report what changed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VisualProps: u8 {
        /// Opacity.
        const OPACITY = 0b0_0001;
        /// Vertical offset.
        const OFFSET  = 0b0_0010;
        /// Scale.
        const SCALE   = 0b0_0100;
        /// Visibility.
        const VISIBLE = 0b0_1000;
        /// Stacking layer.
        const LAYER   = 0b1_0000;
    }
}

/// Full presentation state of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Vertical offset.
    pub offset: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Whether the element is displayed.
    pub visible: bool,
    /// Stacking layer.
    pub layer: i32,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            offset: 0.0,
            scale: 1.0,
            visible: true,
            layer: 0,
        }
    }
}

impl VisualState {
    /// Properties whose values differ between `self` and `other`.
    #[must_use]
    pub fn diff(&self, other: &Self) -> VisualProps {
        let mut changed = VisualProps::empty();
        changed.set(VisualProps::OPACITY, self.opacity != other.opacity);
        changed.set(VisualProps::OFFSET, self.offset != other.offset);
        changed.set(VisualProps::SCALE, self.scale != other.scale);
        changed.set(VisualProps::VISIBLE, self.visible != other.visible);
        changed.set(VisualProps::LAYER, self.layer != other.layer);
        changed
    }
}

/// Apply a card transform through a handle.
pub(crate) fn write_card<H: VisualHandle>(handle: &mut H, transform: CardTransform) {
    handle.set_offset(transform.offset_y);
    handle.set_scale(transform.scale);
    handle.set_opacity(transform.opacity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sink {
        state: VisualState,
    }

    impl VisualHandle for Sink {
        fn set_opacity(&mut self, opacity: f32) {
            self.state.opacity = opacity;
        }
        fn set_offset(&mut self, offset_y: f32) {
            self.state.offset = offset_y;
        }
        fn set_scale(&mut self, scale: f32) {
            self.state.scale = scale;
        }
        fn set_visible(&mut self, visible: bool) {
            self.state.visible = visible;
        }
    }

    #[test]
    fn diff_reports_changed_props() {
        let a = VisualState::default();
        let mut b = a;
        assert!(a.diff(&b).is_empty());
        b.opacity = 0.0;
        b.layer = 3;
        assert_eq!(a.diff(&b), VisualProps::OPACITY | VisualProps::LAYER);
    }

    #[test]
    fn boxed_handle_forwards() {
        let mut boxed: Box<Sink> = Box::default();
        write_card(&mut boxed, CardTransform::EXIT);
        boxed.set_visible(false);
        assert_eq!(boxed.state.offset, -250.0);
        assert_eq!(boxed.state.opacity, 0.0);
        assert!(!boxed.state.visible);
        assert!(boxed.is_attached());
    }

}
