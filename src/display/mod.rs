//! Display backends
//!
//! The physical widgets live outside this crate and are reached through the
//! `*Api` traits. The adapters in [`legacy`] and [`modern`] sit on top of them,
//! remember the logical state they last pushed, and share the [`BarBackend`]
//! contract so the session can drive either one.

pub mod console;
pub mod flash;
pub mod legacy;
pub mod modern;

#[cfg(test)]
pub mod testing;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::BarColor;
use crate::text::TextValue;

pub use flash::FlashChannel;
pub use legacy::LegacyBar;
pub use modern::ModernBar;

/// Handle of a user receiving overlay updates
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewerId(String);

impl ViewerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Simple bar widget: visibility flag, color, plain-text title
pub trait LegacyBarApi {
    fn set_visible(&mut self, visible: bool) -> Result<()>;
    fn set_color(&mut self, color: BarColor) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;

    fn supports_color(&self, _color: BarColor) -> bool {
        true
    }
}

/// Rich bar widget: structured title and an explicit viewer set
pub trait ModernBarApi {
    fn set_color(&mut self, color: BarColor) -> Result<()>;
    fn set_title(&mut self, title: &TextValue) -> Result<()>;
    fn add_viewer(&mut self, viewer: &ViewerId) -> Result<()>;
    fn remove_viewer(&mut self, viewer: &ViewerId) -> Result<()>;

    fn supports_color(&self, _color: BarColor) -> bool {
        true
    }
}

/// Fire-and-forget transient message
pub trait FlashApi {
    fn send(&mut self, viewer: &ViewerId, text: &TextValue) -> Result<()>;
}

/// Hands out the physical widgets for one viewer
pub trait DisplayProvider {
    fn legacy_bar(&self, viewer: &ViewerId) -> Box<dyn LegacyBarApi>;
    fn modern_bar(&self, viewer: &ViewerId, initial_color: BarColor) -> Box<dyn ModernBarApi>;
    fn flash(&self, viewer: &ViewerId) -> Box<dyn FlashApi>;
}

/// Contract shared by both bar adapters. Every mutator pushes immediately.
pub trait BarBackend {
    fn visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);

    fn color(&self) -> BarColor;
    fn set_color(&mut self, color: BarColor);

    fn title(&self) -> &TextValue;
    fn set_title(&mut self, title: TextValue);
}

/// Concrete color a widget can show: `Auto` and unsupported colors become `neutral`
pub(crate) fn physical_color(
    color: BarColor,
    neutral: BarColor,
    supports: impl Fn(BarColor) -> bool,
) -> BarColor {
    let neutral = neutral.resolve(BarColor::NEUTRAL);
    let color = color.resolve(neutral);
    if supports(color) {
        color
    } else {
        tracing::debug!(color = %color, fallback = %neutral, "Backend lacks color, using neutral color");
        neutral
    }
}
