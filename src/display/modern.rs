use std::collections::BTreeSet;
use tracing::{debug, warn};

use super::{physical_color, BarBackend, ModernBarApi, ViewerId};
use crate::color::BarColor;
use crate::text::TextValue;

/// Adapter over the rich bar widget.
///
/// Visibility is subscription: the bar is "visible" for the session viewer
/// exactly when that viewer is in the subscriber set. The set only ever holds
/// viewers this adapter added, so releasing it never detaches someone another
/// session subscribed.
pub struct ModernBar {
    api: Box<dyn ModernBarApi>,
    viewer: ViewerId,
    neutral: BarColor,
    color: BarColor,
    title: TextValue,
    subscribers: BTreeSet<ViewerId>,
}

impl ModernBar {
    pub fn new(api: Box<dyn ModernBarApi>, viewer: ViewerId, neutral: BarColor) -> Self {
        Self {
            api,
            viewer,
            neutral,
            color: BarColor::Auto,
            title: TextValue::default(),
            subscribers: BTreeSet::new(),
        }
    }

    /// Add a viewer. Returns false if it was already subscribed.
    pub fn subscribe(&mut self, viewer: &ViewerId) -> bool {
        if self.subscribers.contains(viewer) {
            return false;
        }
        if let Err(e) = self.api.add_viewer(viewer) {
            warn!(viewer = %viewer, error = %e, "Failed to subscribe viewer to modern bar");
            return false;
        }
        self.subscribers.insert(viewer.clone());
        true
    }

    /// Remove a viewer this adapter added. Viewers it never added are left alone.
    pub fn unsubscribe(&mut self, viewer: &ViewerId) -> bool {
        if !self.subscribers.remove(viewer) {
            return false;
        }
        if let Err(e) = self.api.remove_viewer(viewer) {
            warn!(viewer = %viewer, error = %e, "Failed to unsubscribe viewer from modern bar");
        }
        true
    }

    pub fn subscribers(&self) -> &BTreeSet<ViewerId> {
        &self.subscribers
    }

    /// Drop every subscription this adapter holds. Returns how many were removed.
    pub fn release(&mut self) -> usize {
        let subscribers = std::mem::take(&mut self.subscribers);
        for viewer in &subscribers {
            if let Err(e) = self.api.remove_viewer(viewer) {
                warn!(viewer = %viewer, error = %e, "Failed to unsubscribe viewer during release");
            }
        }
        if !subscribers.is_empty() {
            debug!(viewer = %self.viewer, count = subscribers.len(), "Released modern bar subscribers");
        }
        subscribers.len()
    }
}

impl BarBackend for ModernBar {
    fn visible(&self) -> bool {
        self.subscribers.contains(&self.viewer)
    }

    fn set_visible(&mut self, visible: bool) {
        let viewer = self.viewer.clone();
        if visible {
            self.subscribe(&viewer);
        } else {
            self.unsubscribe(&viewer);
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
            warn!(viewer = %self.viewer, color = %pushed, error = %e, "Failed to push modern bar color");
        }
    }

    fn title(&self) -> &TextValue {
        &self.title
    }

    fn set_title(&mut self, title: TextValue) {
        if let Err(e) = self.api.set_title(&title) {
            warn!(viewer = %self.viewer, error = %e, "Failed to push modern bar title");
        }
        self.title = title;
    }
}
