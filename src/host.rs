//! Host side of the session lifecycle
//!
//! Owns the live sessions, keyed by an opaque handle, and drives them with a
//! single status resolver. Handles of detached sessions go stale; using one is
//! a no-op rather than an error.

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, error, info};

use crate::controller::OverlayController;
use crate::display::ViewerId;
use crate::overlay::{ExistingOverlay, OverlayAccess, PlainOverlay};
use crate::session::{OverlayMode, OverlaySession, TargetResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionHandle(u64);

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct HudHost<R: TargetResolver> {
    controller: OverlayController,
    resolver: R,
    sessions: HashMap<SessionHandle, OverlaySession>,
    next_id: u64,
}

impl<R: TargetResolver> HudHost<R> {
    pub fn new(controller: OverlayController, resolver: R) -> Self {
        Self {
            controller,
            resolver,
            sessions: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn controller(&self) -> &OverlayController {
        &self.controller
    }

    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    /// Wrap whatever the viewer had and start managing it
    pub fn attach(&mut self, viewer: ViewerId, existing: Option<ExistingOverlay<'_>>) -> SessionHandle {
        let session = self.controller.wrap(viewer, existing);
        let handle = SessionHandle(self.next_id);
        self.next_id += 1;

        info!(handle = %handle, viewer = %session.viewer(), "Session attached");
        self.sessions.insert(handle, session);
        handle
    }

    /// Run one update cycle for a session
    pub fn tick(&mut self, handle: SessionHandle) -> Result<()> {
        let Some(session) = self.sessions.get_mut(&handle) else {
            debug!(handle = %handle, "Tick for unknown session ignored");
            return Ok(());
        };
        session.run(&mut self.resolver)
    }

    /// Tick every session. Failures are logged and do not stop the others.
    /// Returns how many sessions ticked cleanly.
    pub fn tick_all(&mut self) -> usize {
        let mut ok = 0;
        for (handle, session) in self.sessions.iter_mut() {
            match session.run(&mut self.resolver) {
                Ok(()) => ok += 1,
                Err(e) => error!(handle = %handle, viewer = %session.viewer(), error = ?e, "Session tick failed"),
            }
        }
        ok
    }

    pub fn set_mode(&mut self, handle: SessionHandle, mode: OverlayMode) -> bool {
        match self.sessions.get_mut(&handle) {
            Some(session) => {
                session.set_mode(mode);
                true
            }
            None => false,
        }
    }

    pub fn set_paused(&mut self, handle: SessionHandle, paused: bool) -> bool {
        match self.sessions.get_mut(&handle) {
            Some(session) => {
                session.set_paused(paused);
                debug!(handle = %handle, paused, "Session pause changed");
                true
            }
            None => false,
        }
    }

    /// Stop managing a session and hand back its state. `None` for stale handles.
    pub fn detach(&mut self, handle: SessionHandle) -> Option<PlainOverlay> {
        let mut session = self.sessions.remove(&handle)?;
        let overlay = self.controller.unwrap(&mut session);
        info!(handle = %handle, viewer = %session.viewer(), "Session detached");
        Some(overlay)
    }

    pub fn session(&self, handle: SessionHandle) -> Option<&OverlaySession> {
        self.sessions.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capabilities;
    use crate::color::BarColor;
    use crate::config::SessionSettings;
    use crate::display::testing::{Call, Recorder};
    use crate::session::{DisplayState, SessionContext};
    use crate::text::TextValue;
    use anyhow::bail;

    /// Resolver returning a fixed line per viewer; viewers named "broken" fail
    #[derive(Default)]
    struct TableResolver {
        lines: HashMap<String, String>,
        calls: usize,
    }

    impl TableResolver {
        fn set(&mut self, viewer: &str, line: &str) {
            self.lines.insert(viewer.to_string(), line.to_string());
        }
    }

    impl TargetResolver for TableResolver {
        fn resolve(&mut self, ctx: &SessionContext<'_>) -> Result<Option<String>> {
            self.calls += 1;
            if ctx.viewer.as_str() == "broken" {
                bail!("lookup failed");
            }
            Ok(self.lines.get(ctx.viewer.as_str()).cloned())
        }
    }

    fn host(recorder: &Recorder) -> HudHost<TableResolver> {
        let controller = OverlayController::new(
            SessionSettings::default(),
            Capabilities {
                modern_bar: true,
                rich_text: true,
            },
            Box::new(recorder.provider()),
        );
        HudHost::new(controller, TableResolver::default())
    }

    #[test]
    fn test_attach_tick_detach() {
        let recorder = Recorder::default();
        let mut host = host(&recorder);
        host.resolver_mut().set("alice", "Furnace | Fuel: 20%");

        let handle = host.attach(ViewerId::new("alice"), None);
        host.tick(handle).unwrap();

        let session = host.session(handle).unwrap();
        assert_eq!(session.state(), DisplayState::ShowingBar);
        assert!(session.visible());

        let overlay = host.detach(handle).unwrap();
        assert!(overlay.visible);
        assert_eq!(overlay.title, TextValue::plain("Furnace | Fuel: 20%"));
        assert!(host.is_empty());
        assert!(recorder.calls().contains(&Call::ModernRemove(ViewerId::new("alice"))));
    }

    #[test]
    fn test_stale_handle_is_noop() {
        let recorder = Recorder::default();
        let mut host = host(&recorder);
        let handle = host.attach(ViewerId::new("alice"), None);
        assert!(host.detach(handle).is_some());
        let calls_before = host.resolver_mut().calls;

        assert!(host.tick(handle).is_ok());
        assert!(host.detach(handle).is_none());
        assert!(!host.set_mode(handle, OverlayMode::ForcedFlash));
        assert!(!host.set_paused(handle, true));
        assert_eq!(host.resolver_mut().calls, calls_before);
    }

    #[test]
    fn test_handles_are_unique() {
        let recorder = Recorder::default();
        let mut host = host(&recorder);

        let first = host.attach(ViewerId::new("alice"), None);
        host.detach(first);
        let second = host.attach(ViewerId::new("alice"), None);

        assert_ne!(first, second);
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn test_tick_all_continues_past_failures() {
        let recorder = Recorder::default();
        let mut host = host(&recorder);
        host.resolver_mut().set("alice", "Furnace");
        host.resolver_mut().set("bob", "Solar");

        host.attach(ViewerId::new("alice"), None);
        host.attach(ViewerId::new("broken"), None);
        host.attach(ViewerId::new("bob"), None);

        assert_eq!(host.tick_all(), 2);
        assert_eq!(host.resolver_mut().calls, 3);
    }

    #[test]
    fn test_tick_error_propagates() {
        let recorder = Recorder::default();
        let mut host = host(&recorder);
        let handle = host.attach(ViewerId::new("broken"), None);

        let err = host.tick(handle).unwrap_err();
        assert!(format!("{err:#}").contains("lookup failed"));
    }

    #[test]
    fn test_attach_foreign_transfers_state() {
        let recorder = Recorder::default();
        let mut host = host(&recorder);
        let mut foreign = PlainOverlay {
            visible: true,
            paused: false,
            color: BarColor::Blue,
            title: TextValue::plain("Old"),
        };
        let original = foreign.clone();

        let handle = host.attach(ViewerId::new("alice"), Some(ExistingOverlay::Foreign(&mut foreign)));

        assert!(!foreign.visible);
        assert!(foreign.paused);
        assert_eq!(host.detach(handle), Some(original));
    }

    #[test]
    fn test_set_mode_routes_to_flash() {
        let recorder = Recorder::default();
        let mut host = host(&recorder);
        host.resolver_mut().set("alice", "Furnace");
        let handle = host.attach(ViewerId::new("alice"), None);

        assert!(host.set_mode(handle, OverlayMode::ForcedFlash));
        host.tick(handle).unwrap();

        assert_eq!(host.session(handle).unwrap().state(), DisplayState::ShowingFlash);
        assert_eq!(recorder.flash_calls().len(), 1);
        assert!(recorder.modern_calls().is_empty());
    }

    #[test]
    fn test_paused_session_keeps_display() {
        let recorder = Recorder::default();
        let mut host = host(&recorder);
        host.resolver_mut().set("alice", "Furnace");
        let handle = host.attach(ViewerId::new("alice"), None);
        host.tick(handle).unwrap();

        assert!(host.set_paused(handle, true));
        host.resolver_mut().set("alice", "");
        recorder.clear();
        host.tick(handle).unwrap();

        assert!(recorder.calls().is_empty());
        assert!(host.session(handle).unwrap().visible());
    }
}
