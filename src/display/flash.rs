use tracing::warn;

use super::{FlashApi, ViewerId};
use crate::text::TextValue;

/// One-shot message channel. No visibility to track.
pub struct FlashChannel {
    api: Box<dyn FlashApi>,
    viewer: ViewerId,
    rich: bool,
}

impl FlashChannel {
    pub fn new(api: Box<dyn FlashApi>, viewer: ViewerId, rich: bool) -> Self {
        Self { api, viewer, rich }
    }

    /// Send a legacy formatted line. Structured when the runtime supports it,
    /// otherwise the raw legacy string goes out as-is.
    pub fn send(&mut self, text: &str) {
        let message = if self.rich {
            TextValue::from_legacy(text)
        } else {
            TextValue::plain(text)
        };
        if let Err(e) = self.api.send(&self.viewer, &message) {
            warn!(viewer = %self.viewer, error = %e, "Failed to send flash message");
        }
    }
}
