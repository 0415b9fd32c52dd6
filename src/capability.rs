//! Runtime capability detection
//!
//! Capabilities are computed once from a runtime descriptor and handed to the
//! controller. Nothing here is global: callers that want different answers
//! (tests, the demo CLI) just pass a different [`RuntimeInfo`].

use std::fmt;
use std::str::FromStr;

use crate::constants::runtime::{LEGACY_FLAVORS, MODERN_BAR_MIN_VERSION, MODERN_FLAVORS};

/// Server software family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeFlavor {
    /// Ships the component-based display API
    Paper,
    /// Legacy bar API only
    Spigot,
    #[default]
    Unknown,
}

impl RuntimeFlavor {
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        if MODERN_FLAVORS.contains(&name.as_str()) {
            RuntimeFlavor::Paper
        } else if LEGACY_FLAVORS.contains(&name.as_str()) {
            RuntimeFlavor::Spigot
        } else {
            RuntimeFlavor::Unknown
        }
    }
}

/// `major.minor[.patch]` game version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl GameVersion {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn is_at_least(&self, other: GameVersion) -> bool {
        *self >= other
    }
}

impl FromStr for GameVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Tolerate suffixes like "1.20.4-R0.1-SNAPSHOT"
        let core = s.trim().split(['-', ' ']).next().unwrap_or_default();
        let parts = core
            .split('.')
            .map(|part| part.parse::<u16>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid game version '{}': {}", s, e))?;

        match parts.as_slice() {
            [major, minor] => Ok(GameVersion::new(*major, *minor, 0)),
            [major, minor, patch] => Ok(GameVersion::new(*major, *minor, *patch)),
            _ => anyhow::bail!("Invalid game version '{}': expected major.minor[.patch]", s),
        }
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// What the host runtime told us about itself
#[derive(Debug, Clone, Default)]
pub struct RuntimeInfo {
    pub flavor: RuntimeFlavor,
    pub version: Option<GameVersion>,
}

impl RuntimeInfo {
    pub fn new(flavor: RuntimeFlavor, version: Option<GameVersion>) -> Self {
        Self { flavor, version }
    }

    /// Build from raw strings. An unparsable version is treated as unknown.
    pub fn parse(flavor: &str, version: &str) -> Self {
        Self {
            flavor: RuntimeFlavor::from_name(flavor),
            version: version.parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Per-viewer rich bar with a subscriber set
    pub modern_bar: bool,
    /// Structured text in flash messages
    pub rich_text: bool,
}

/// Decide which display features the runtime supports
pub fn probe(info: &RuntimeInfo) -> Capabilities {
    let rich_text = info.flavor == RuntimeFlavor::Paper;
    let (major, minor, patch) = MODERN_BAR_MIN_VERSION;
    let modern_bar = rich_text
        && info
            .version
            .is_some_and(|v| v.is_at_least(GameVersion::new(major, minor, patch)));

    Capabilities {
        modern_bar,
        rich_text,
    }
}
