//! Application-wide constants
//!
//! Magic numbers, alias tables and string literals used throughout the crate,
//! kept in one place so the config parser and the display code agree.

/// Config file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "hud-overlay";

    /// Config filename
    pub const FILENAME: &str = "config.json";

    /// Default bar color name
    pub const DEFAULT_BAR_COLOR: &str = "white";
}

/// Placement preference names
pub mod placement {
    /// Names that select the persistent bar widget
    pub const BAR_ALIASES: &[&str] = &["bossbar", "bar"];

    /// Names that select the transient flash message ("hotbar" and "actionbar" are synonyms)
    pub const FLASH_ALIASES: &[&str] = &["hotbar", "actionbar"];
}

/// Bar color names
pub mod color {
    /// Names that resolve to the neutral color
    pub const NEUTRAL_ALIASES: &[&str] = &["default", "inherit"];
}

/// Legacy text formatting
pub mod text {
    /// Section sign that prefixes a legacy format code
    pub const SECTION: char = '\u{00A7}';

    /// Alternate prefix accepted in user-authored strings
    pub const ALT_PREFIX: char = '&';

    /// Separator between the target name and its detail line (grey pipe)
    pub const FACING_SEPARATOR: &str = " &7| ";
}

/// Runtime capability thresholds
pub mod runtime {
    /// First game version whose component API ships the modern bar type
    pub const MODERN_BAR_MIN_VERSION: (u16, u16, u16) = (1, 20, 1);

    /// Runtime names that share the modern component API
    pub const MODERN_FLAVORS: &[&str] = &["paper", "folia", "purpur"];

    /// Runtime names limited to the legacy bar API
    pub const LEGACY_FLAVORS: &[&str] = &["spigot", "bukkit", "craftbukkit"];
}
