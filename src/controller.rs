//! Taking over and handing back a viewer's overlay
//!
//! `wrap` replaces whatever overlay a viewer had with a managed session that
//! shows the same thing, and silences the original so two owners never drive
//! the same widget. `unwrap` is the reverse and doubles as cancellation.

use tracing::{debug, info, warn};

use crate::capability::{probe, Capabilities, RuntimeInfo};
use crate::config::{HudConfig, SessionSettings};
use crate::display::{DisplayProvider, ViewerId};
use crate::overlay::{ExistingOverlay, OverlayAccess, PlainOverlay};
use crate::session::OverlaySession;

pub struct OverlayController {
    settings: SessionSettings,
    capabilities: Capabilities,
    provider: Box<dyn DisplayProvider>,
}

impl OverlayController {
    pub fn new(
        settings: SessionSettings,
        capabilities: Capabilities,
        provider: Box<dyn DisplayProvider>,
    ) -> Self {
        info!(
            placement = settings.placement.name(),
            modern_bar = capabilities.modern_bar,
            rich_text = capabilities.rich_text,
            "Overlay controller ready"
        );
        Self {
            settings,
            capabilities,
            provider,
        }
    }

    /// Probe the runtime once and read the session settings from config
    pub fn from_config(
        config: &HudConfig,
        runtime: &RuntimeInfo,
        provider: Box<dyn DisplayProvider>,
    ) -> Self {
        Self::new(config.session_settings(), probe(runtime), provider)
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    fn new_session(&self, viewer: ViewerId) -> OverlaySession {
        OverlaySession::new(viewer, self.settings, self.capabilities, self.provider.as_ref())
    }

    /// Produce a managed session showing what `existing` showed.
    ///
    /// A session that is already ours comes back untouched. A foreign overlay
    /// is copied, then made inert (hidden and paused) through its accessors.
    pub fn wrap(&self, viewer: ViewerId, existing: Option<ExistingOverlay<'_>>) -> OverlaySession {
        match existing {
            None => {
                debug!(viewer = %viewer, "Wrapping fresh overlay");
                self.new_session(viewer)
            }
            Some(ExistingOverlay::Managed(session)) => {
                if session.viewer() != &viewer {
                    warn!(viewer = %viewer, owner = %session.viewer(), "Managed overlay belongs to another viewer");
                }
                debug!(viewer = %viewer, "Overlay already managed, not wrapping again");
                session
            }
            Some(ExistingOverlay::Foreign(foreign)) => {
                let state = PlainOverlay::snapshot(&*foreign);

                // Silence the original before ours goes live
                foreign.set_visible(false);
                foreign.set_paused(true);

                let mut session = self.new_session(viewer);
                session.set_color(state.color);
                session.set_title(state.title);
                session.set_visible(state.visible);
                session.set_paused(state.paused);

                info!(
                    viewer = %session.viewer(),
                    visible = state.visible,
                    paused = state.paused,
                    color = %state.color,
                    "Wrapped foreign overlay"
                );
                session
            }
        }
    }

    /// Hand the session's rendered state back as a plain overlay and cancel it.
    ///
    /// Safe to call repeatedly; later calls return the first result and
    /// touch nothing.
    pub fn unwrap(&self, session: &mut OverlaySession) -> PlainOverlay {
        if let Some(released) = session.released() {
            debug!(viewer = %session.viewer(), "Session already unwrapped");
            return released.clone();
        }

        let snapshot = PlainOverlay::snapshot(&*session);
        session.cancel(snapshot.clone());

        info!(
            viewer = %session.viewer(),
            visible = snapshot.visible,
            paused = snapshot.paused,
            "Unwrapped overlay session"
        );
        snapshot
    }
}
