//! Per-viewer HUD overlay controller
//!
//! Shows a short status line ("what am I looking at") to each viewer, either
//! on a persistent bar or as a transient flash message, and can take over an
//! overlay some other subsystem already put on screen and hand it back later.
//!
//! ```text
//!            HudHost  (attach / tick / detach)
//!               |
//!        OverlayController  (wrap / unwrap, capability probe)
//!               |
//!         OverlaySession  (Hidden / ShowingBar / ShowingFlash)
//!          /    |     \
//!   LegacyBar ModernBar FlashChannel   <- DisplayProvider
//! ```

#![forbid(unsafe_code)]

pub mod capability;
pub mod color;
pub mod config;
pub mod constants;
pub mod controller;
pub mod display;
pub mod host;
pub mod overlay;
pub mod session;
pub mod text;

pub use capability::{probe, Capabilities, GameVersion, RuntimeFlavor, RuntimeInfo};
pub use color::BarColor;
pub use config::{HudConfig, Placement, SessionSettings};
pub use controller::OverlayController;
pub use display::{DisplayProvider, ViewerId};
pub use host::{HudHost, SessionHandle};
pub use overlay::{ExistingOverlay, OverlayAccess, PlainOverlay};
pub use session::{DisplayState, OverlayMode, OverlaySession, SessionContext, TargetResolver};
pub use text::TextValue;
