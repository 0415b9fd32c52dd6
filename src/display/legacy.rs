use tracing::warn;

use super::{physical_color, BarBackend, LegacyBarApi, ViewerId};
use crate::color::BarColor;
use crate::text::TextValue;

/// Adapter over the simple bar widget.
///
/// Rich titles are flattened to plain text on the way out; the adapter keeps
/// the unflattened value so it can be handed back unchanged.
pub struct LegacyBar {
    api: Box<dyn LegacyBarApi>,
    viewer: ViewerId,
    neutral: BarColor,
    visible: bool,
    color: BarColor,
    title: TextValue,
}

impl LegacyBar {
    pub fn new(api: Box<dyn LegacyBarApi>, viewer: ViewerId, neutral: BarColor) -> Self {
        Self {
            api,
            viewer,
            neutral,
            visible: false,
            color: BarColor::Auto,
            title: TextValue::default(),
        }
    }
}

impl BarBackend for LegacyBar {
    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if let Err(e) = self.api.set_visible(visible) {
            warn!(viewer = %self.viewer, visible = visible, error = %e, "Failed to push legacy bar visibility");
        }
    }

    fn color(&self) -> BarColor {
        self.color
    }

    fn set_color(&mut self, color: BarColor) {
        self.color = color;
        let api = &self.api;
        let pushed = physical_color(color, self.neutral, |c| api.supports_color(c));
        if let Err(e) = self.api.set_color(pushed) {
            warn!(viewer = %self.viewer, color = %pushed, error = %e, "Failed to push legacy bar color");
        }
    }

    fn title(&self) -> &TextValue {
        &self.title
    }

    fn set_title(&mut self, title: TextValue) {
        let flat = title.to_plain();
        self.title = title;
        if let Err(e) = self.api.set_title(&flat) {
            warn!(viewer = %self.viewer, error = %e, "Failed to push legacy bar title");
        }
    }
}
