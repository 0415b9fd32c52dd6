//! Per-viewer overlay session
//!
//! A session owns the bar adapters and the flash channel for one viewer and
//! decides on every tick which of them shows the status line.
//!
//! ```text
//!            empty text                    text, route = bar
//!   ┌──────────────────────┐        ┌──────────────────────────┐
//!   ▼                      │        ▼                          │
//! Hidden ──────────────────┴──▶ ShowingBar ◀─────────────▶ ShowingFlash
//!          text, route = bar/flash            route changes
//! ```
//!
//! `paused` freezes whatever was last rendered; `cancelled` (set by unwrap)
//! is terminal.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, trace};

use crate::capability::Capabilities;
use crate::color::{auto_color, BarColor};
use crate::config::{Placement, SessionSettings};
use crate::display::{
    BarBackend, DisplayProvider, FlashChannel, LegacyBar, ModernBar, ViewerId,
};
use crate::overlay::{OverlayAccess, PlainOverlay};
use crate::text::{strip_colors, TextValue};

/// Per-viewer override of the configured placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayMode {
    /// Follow the configured placement
    #[default]
    Auto,
    ForcedBar,
    ForcedFlash,
}

impl FromStr for OverlayMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name == "auto" || name == "default" {
            return Ok(OverlayMode::Auto);
        }
        match Placement::from_name(&name) {
            Some(Placement::Bar) => Ok(OverlayMode::ForcedBar),
            Some(Placement::Hotbar) => Ok(OverlayMode::ForcedFlash),
            None if name == "flash" => Ok(OverlayMode::ForcedFlash),
            None => anyhow::bail!("Unknown overlay mode '{}'", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Hidden,
    ShowingBar,
    ShowingFlash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Bar,
    Flash,
}

/// What the resolver gets to look at
#[derive(Debug, Clone, Copy)]
pub struct SessionContext<'a> {
    pub viewer: &'a ViewerId,
    pub mode: OverlayMode,
}

/// Computes the status line for a viewer (what they are looking at).
/// `None` or an empty string hides the overlay.
pub trait TargetResolver {
    fn resolve(&mut self, ctx: &SessionContext<'_>) -> Result<Option<String>>;
}

impl<F> TargetResolver for F
where
    F: FnMut(&SessionContext<'_>) -> Result<Option<String>>,
{
    fn resolve(&mut self, ctx: &SessionContext<'_>) -> Result<Option<String>> {
        self(ctx)
    }
}

pub struct OverlaySession {
    viewer: ViewerId,
    settings: SessionSettings,
    capabilities: Capabilities,

    legacy: LegacyBar,
    /// Present exactly when the runtime has the modern bar
    modern: Option<ModernBar>,
    flash: FlashChannel,

    mode: OverlayMode,
    state: DisplayState,
    paused: bool,
    cancelled: bool,
    last_resolved: Option<String>,
    released: Option<PlainOverlay>,
}

impl OverlaySession {
    pub fn new(
        viewer: ViewerId,
        settings: SessionSettings,
        capabilities: Capabilities,
        provider: &dyn DisplayProvider,
    ) -> Self {
        let neutral = settings.neutral_color;
        let legacy = LegacyBar::new(provider.legacy_bar(&viewer), viewer.clone(), neutral);
        let modern = capabilities.modern_bar.then(|| {
            ModernBar::new(provider.modern_bar(&viewer, neutral), viewer.clone(), neutral)
        });
        let flash = FlashChannel::new(provider.flash(&viewer), viewer.clone(), capabilities.rich_text);

        if modern.is_none() && settings.placement == Placement::Bar {
            debug!(viewer = %viewer, "Modern bar unavailable, using legacy bar");
        }

        Self {
            viewer,
            settings,
            capabilities,
            legacy,
            modern,
            flash,
            mode: OverlayMode::default(),
            state: DisplayState::Hidden,
            paused: false,
            cancelled: false,
            last_resolved: None,
            released: None,
        }
    }

    pub fn viewer(&self) -> &ViewerId {
        &self.viewer
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: OverlayMode) {
        if self.mode != mode {
            debug!(viewer = %self.viewer, from = ?self.mode, to = ?mode, "Overlay mode changed");
        }
        self.mode = mode;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Text from the most recent resolve, paused or not
    pub fn last_resolved(&self) -> Option<&str> {
        self.last_resolved.as_deref()
    }

    pub fn legacy(&self) -> &LegacyBar {
        &self.legacy
    }

    pub fn modern(&self) -> Option<&ModernBar> {
        self.modern.as_ref()
    }

    /// Refresh the overlay for one tick.
    ///
    /// A resolver error is returned as-is and leaves every backend untouched.
    pub fn run<R: TargetResolver + ?Sized>(&mut self, resolver: &mut R) -> Result<()> {
        if self.cancelled {
            trace!(viewer = %self.viewer, "Tick on cancelled session ignored");
            return Ok(());
        }

        let ctx = SessionContext {
            viewer: &self.viewer,
            mode: self.mode,
        };
        let text = resolver
            .resolve(&ctx)
            .with_context(|| format!("Failed to resolve status text for '{}'", self.viewer))?
            .unwrap_or_default();

        self.update(&text);
        Ok(())
    }

    /// Apply an already-resolved status line. Empty text hides the overlay.
    pub fn update(&mut self, text: &str) {
        if self.cancelled {
            return;
        }

        self.last_resolved = Some(text.to_string());
        if self.paused {
            return;
        }

        if text.is_empty() {
            self.hide();
            return;
        }

        match self.route() {
            Route::Bar => self.show_bar(text),
            Route::Flash => self.show_flash(text),
        }
    }

    fn route(&self) -> Route {
        match self.mode {
            OverlayMode::ForcedBar => Route::Bar,
            OverlayMode::ForcedFlash => Route::Flash,
            OverlayMode::Auto => match self.settings.placement {
                Placement::Bar => Route::Bar,
                Placement::Hotbar => Route::Flash,
            },
        }
    }

    fn bar(&self) -> &dyn BarBackend {
        match &self.modern {
            Some(modern) => modern,
            None => &self.legacy,
        }
    }

    fn bar_mut(&mut self) -> &mut dyn BarBackend {
        match &mut self.modern {
            Some(modern) => modern,
            None => &mut self.legacy,
        }
    }

    fn derive_title(&self, text: &str) -> TextValue {
        if self.settings.keep_text_colors {
            TextValue::from_legacy(text)
        } else {
            TextValue::plain(strip_colors(text))
        }
    }

    fn hide(&mut self) {
        // Flash messages expire on their own and the bar is already down
        if self.state != DisplayState::ShowingFlash {
            self.bar_mut().set_visible(false);
        }
        self.state = DisplayState::Hidden;
    }

    fn show_bar(&mut self, text: &str) {
        let title = self.derive_title(text);
        self.push_title(title);
        if self.settings.use_auto_bar_color {
            self.push_color(auto_color(text));
        }
        self.push_visible(true);
        self.state = DisplayState::ShowingBar;
    }

    fn show_flash(&mut self, text: &str) {
        self.flash.send(text);
        let bar = self.bar_mut();
        if bar.visible() {
            bar.set_visible(false);
        }
        self.state = DisplayState::ShowingFlash;
    }

    /// Titles go to both bars so the hidden one can take over at any time
    fn push_title(&mut self, title: TextValue) {
        if let Some(modern) = &mut self.modern {
            modern.set_title(title.clone());
        }
        self.legacy.set_title(title);
    }

    fn push_color(&mut self, color: BarColor) {
        if let Some(modern) = &mut self.modern {
            modern.set_color(color);
        }
        self.legacy.set_color(color);
    }

    /// Show or hide the active bar. With a modern bar the legacy one stays down.
    fn push_visible(&mut self, visible: bool) {
        match &mut self.modern {
            Some(modern) => {
                modern.set_visible(visible);
                if self.legacy.visible() {
                    self.legacy.set_visible(false);
                }
            }
            None => self.legacy.set_visible(visible),
        }
    }

    pub(crate) fn released(&self) -> Option<&PlainOverlay> {
        self.released.as_ref()
    }

    /// Tear down every widget hold and enter the terminal state
    pub(crate) fn cancel(&mut self, snapshot: PlainOverlay) {
        if let Some(modern) = &mut self.modern {
            modern.release();
        }
        if self.legacy.visible() {
            self.legacy.set_visible(false);
        }
        self.state = DisplayState::Hidden;
        self.cancelled = true;
        self.released = Some(snapshot);
    }
}

impl OverlayAccess for OverlaySession {
    fn visible(&self) -> bool {
        self.bar().visible()
    }

    fn set_visible(&mut self, visible: bool) {
        if self.cancelled {
            return;
        }
        self.push_visible(visible);
        self.state = if visible {
            DisplayState::ShowingBar
        } else {
            DisplayState::Hidden
        };
    }

    fn color(&self) -> BarColor {
        self.bar().color()
    }

    fn set_color(&mut self, color: BarColor) {
        if self.cancelled {
            return;
        }
        self.push_color(color);
    }

    fn title(&self) -> &TextValue {
        self.bar().title()
    }

    fn set_title(&mut self, title: TextValue) {
        if self.cancelled {
            return;
        }
        self.push_title(title);
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn set_paused(&mut self, paused: bool) {
        if self.cancelled {
            return;
        }
        self.paused = paused;
    }
}

impl Drop for OverlaySession {
    fn drop(&mut self) {
        // Sessions dropped without unwrap must not leave anything on screen
        if self.cancelled {
            return;
        }
        if let Some(modern) = &mut self.modern {
            modern.release();
        }
        if self.legacy.visible() {
            self.legacy.set_visible(false);
        }
    }
}
