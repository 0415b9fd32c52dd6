//! Recording display backends for tests

use anyhow::{bail, Result};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{DisplayProvider, FlashApi, LegacyBarApi, ModernBarApi, ViewerId};
use crate::color::BarColor;
use crate::text::TextValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LegacyVisible(bool),
    LegacyColor(BarColor),
    LegacyTitle(String),
    ModernColor(BarColor),
    ModernTitle(TextValue),
    ModernAdd(ViewerId),
    ModernRemove(ViewerId),
    Flash(ViewerId, TextValue),
}

impl Call {
    pub fn is_legacy(&self) -> bool {
        matches!(self, Call::LegacyVisible(_) | Call::LegacyColor(_) | Call::LegacyTitle(_))
    }

    pub fn is_modern(&self) -> bool {
        matches!(
            self,
            Call::ModernColor(_) | Call::ModernTitle(_) | Call::ModernAdd(_) | Call::ModernRemove(_)
        )
    }

    pub fn is_flash(&self) -> bool {
        matches!(self, Call::Flash(..))
    }
}

/// Shared log of every push, cloned into each fake widget
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
    unsupported: Rc<RefCell<Vec<BarColor>>>,
    failing: Rc<Cell<bool>>,
}

impl Recorder {
    pub fn provider(&self) -> RecordingProvider {
        RecordingProvider {
            recorder: self.clone(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn legacy_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_legacy).collect()
    }

    pub fn modern_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_modern).collect()
    }

    pub fn flash_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_flash).collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn mark_unsupported(&self, color: BarColor) {
        self.unsupported.borrow_mut().push(color);
    }

    /// While set, every push fails and nothing is recorded
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn record(&self, call: Call) -> Result<()> {
        if self.failing.get() {
            bail!("display unavailable");
        }
        self.calls.borrow_mut().push(call);
        Ok(())
    }

    fn supports(&self, color: BarColor) -> bool {
        !self.unsupported.borrow().contains(&color)
    }
}

pub struct RecordingProvider {
    recorder: Recorder,
}

impl DisplayProvider for RecordingProvider {
    fn legacy_bar(&self, _viewer: &ViewerId) -> Box<dyn LegacyBarApi> {
        Box::new(RecordingLegacy(self.recorder.clone()))
    }

    fn modern_bar(&self, _viewer: &ViewerId, _initial_color: BarColor) -> Box<dyn ModernBarApi> {
        Box::new(RecordingModern(self.recorder.clone()))
    }

    fn flash(&self, _viewer: &ViewerId) -> Box<dyn FlashApi> {
        Box::new(RecordingFlash(self.recorder.clone()))
    }
}

struct RecordingLegacy(Recorder);

impl LegacyBarApi for RecordingLegacy {
    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.0.record(Call::LegacyVisible(visible))
    }

    fn set_color(&mut self, color: BarColor) -> Result<()> {
        self.0.record(Call::LegacyColor(color))
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.0.record(Call::LegacyTitle(title.to_string()))
    }

    fn supports_color(&self, color: BarColor) -> bool {
        self.0.supports(color)
    }
}

struct RecordingModern(Recorder);

impl ModernBarApi for RecordingModern {
    fn set_color(&mut self, color: BarColor) -> Result<()> {
        self.0.record(Call::ModernColor(color))
    }

    fn set_title(&mut self, title: &TextValue) -> Result<()> {
        self.0.record(Call::ModernTitle(title.clone()))
    }

    fn add_viewer(&mut self, viewer: &ViewerId) -> Result<()> {
        self.0.record(Call::ModernAdd(viewer.clone()))
    }

    fn remove_viewer(&mut self, viewer: &ViewerId) -> Result<()> {
        self.0.record(Call::ModernRemove(viewer.clone()))
    }

    fn supports_color(&self, color: BarColor) -> bool {
        self.0.supports(color)
    }
}

struct RecordingFlash(Recorder);

impl FlashApi for RecordingFlash {
    fn send(&mut self, viewer: &ViewerId, text: &TextValue) -> Result<()> {
        self.0.record(Call::Flash(viewer.clone(), text.clone()))
    }
}
