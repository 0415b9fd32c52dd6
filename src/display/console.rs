//! Display provider that renders to the log instead of a real widget.
//! Used by the command-line driver.

use anyhow::Result;
use tracing::info;

use super::{DisplayProvider, FlashApi, LegacyBarApi, ModernBarApi, ViewerId};
use crate::color::BarColor;
use crate::text::TextValue;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleDisplay;

impl DisplayProvider for ConsoleDisplay {
    fn legacy_bar(&self, viewer: &ViewerId) -> Box<dyn LegacyBarApi> {
        Box::new(ConsoleLegacyBar {
            viewer: viewer.clone(),
        })
    }

    fn modern_bar(&self, viewer: &ViewerId, initial_color: BarColor) -> Box<dyn ModernBarApi> {
        info!(owner = %viewer, color = %initial_color, "modern bar created");
        Box::new(ConsoleModernBar {
            owner: viewer.clone(),
        })
    }

    fn flash(&self, viewer: &ViewerId) -> Box<dyn FlashApi> {
        Box::new(ConsoleFlash {
            owner: viewer.clone(),
        })
    }
}

struct ConsoleLegacyBar {
    viewer: ViewerId,
}

impl LegacyBarApi for ConsoleLegacyBar {
    fn set_visible(&mut self, visible: bool) -> Result<()> {
        info!(viewer = %self.viewer, visible = visible, "legacy bar visibility");
        Ok(())
    }

    fn set_color(&mut self, color: BarColor) -> Result<()> {
        info!(viewer = %self.viewer, color = %color, "legacy bar color");
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        info!(viewer = %self.viewer, title = %title, "legacy bar title");
        Ok(())
    }
}

struct ConsoleModernBar {
    owner: ViewerId,
}

impl ModernBarApi for ConsoleModernBar {
    fn set_color(&mut self, color: BarColor) -> Result<()> {
        info!(owner = %self.owner, color = %color, "modern bar color");
        Ok(())
    }

    fn set_title(&mut self, title: &TextValue) -> Result<()> {
        info!(owner = %self.owner, title = %title.to_legacy(), "modern bar title");
        Ok(())
    }

    fn add_viewer(&mut self, viewer: &ViewerId) -> Result<()> {
        info!(owner = %self.owner, viewer = %viewer, "modern bar viewer added");
        Ok(())
    }

    fn remove_viewer(&mut self, viewer: &ViewerId) -> Result<()> {
        info!(owner = %self.owner, viewer = %viewer, "modern bar viewer removed");
        Ok(())
    }
}

struct ConsoleFlash {
    owner: ViewerId,
}

impl FlashApi for ConsoleFlash {
    fn send(&mut self, viewer: &ViewerId, text: &TextValue) -> Result<()> {
        info!(owner = %self.owner, viewer = %viewer, text = %text.to_legacy(), "flash");
        Ok(())
    }
}
