//! Overlay objects and the accessor surface they share
//!
//! Anything that can stand in for "the overlay" of a viewer implements
//! [`OverlayAccess`]. State transfer between owners goes through these
//! accessors only, never through an object's internals.

use serde::{Deserialize, Serialize};

use crate::color::BarColor;
use crate::session::OverlaySession;
use crate::text::TextValue;

pub trait OverlayAccess {
    fn visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);

    fn color(&self) -> BarColor;
    fn set_color(&mut self, color: BarColor);

    fn title(&self) -> &TextValue;
    fn set_title(&mut self, title: TextValue);

    fn paused(&self) -> bool;
    fn set_paused(&mut self, paused: bool);
}

/// Plain overlay value, the shape other subsystems hold and get back on unwrap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainOverlay {
    pub visible: bool,
    pub paused: bool,
    pub color: BarColor,
    pub title: TextValue,
}

impl PlainOverlay {
    /// Copy the observable state out of any overlay
    pub fn snapshot(overlay: &dyn OverlayAccess) -> Self {
        Self {
            visible: overlay.visible(),
            paused: overlay.paused(),
            color: overlay.color(),
            title: overlay.title().clone(),
        }
    }
}

impl OverlayAccess for PlainOverlay {
    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn color(&self) -> BarColor {
        self.color
    }

    fn set_color(&mut self, color: BarColor) {
        self.color = color;
    }

    fn title(&self) -> &TextValue {
        &self.title
    }

    fn set_title(&mut self, title: TextValue) {
        self.title = title;
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

/// What a viewer had before attach: someone else's overlay, or one of ours
pub enum ExistingOverlay<'a> {
    Foreign(&'a mut dyn OverlayAccess),
    Managed(OverlaySession),
}
