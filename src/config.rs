use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::color::BarColor;
use crate::constants::placement::{BAR_ALIASES, FLASH_ALIASES};

/// Where the status line is shown when the viewer has no override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Persistent bar widget
    #[default]
    Bar,
    /// Transient flash message above the hotbar
    Hotbar,
}

impl Placement {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        if BAR_ALIASES.contains(&name.as_str()) {
            Some(Placement::Bar)
        } else if FLASH_ALIASES.contains(&name.as_str()) {
            Some(Placement::Hotbar)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Placement::Bar => BAR_ALIASES[0],
            Placement::Hotbar => FLASH_ALIASES[0],
        }
    }

    /// Unknown names log a warning and fall back to the bar
    pub fn parse_or_default(name: &str) -> Self {
        Placement::from_name(name).unwrap_or_else(|| {
            warn!(placement = %name, fallback = Placement::default().name(), "Invalid placement, using default");
            Placement::default()
        })
    }
}

impl Serialize for Placement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Placement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Placement::parse_or_default(&name))
    }
}

/// On-disk configuration (JSON)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudConfig {
    #[serde(default)]
    pub placement: Placement,

    /// Keep legacy color codes in bar titles instead of stripping them
    #[serde(default)]
    pub keep_text_colors: bool,

    /// Derive the bar color from the first color code of the status line
    #[serde(default = "default_use_auto_bar_color")]
    pub use_auto_bar_color: bool,

    /// Color name for new bars and for anything that resolves to neutral
    #[serde(default = "default_bar_color")]
    pub bar_color: String,
}

fn default_use_auto_bar_color() -> bool {
    true
}

fn default_bar_color() -> String {
    crate::constants::config::DEFAULT_BAR_COLOR.to_string()
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            keep_text_colors: false,
            use_auto_bar_color: default_use_auto_bar_color(),
            bar_color: default_bar_color(),
        }
    }
}

/// Settings a session reads once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub placement: Placement,
    pub keep_text_colors: bool,
    pub use_auto_bar_color: bool,
    pub neutral_color: BarColor,
}

impl Default for SessionSettings {
    fn default() -> Self {
        HudConfig::default().session_settings()
    }
}

impl HudConfig {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load from the default location, writing defaults there on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::path();

        if !config_path.exists() {
            info!(path = %config_path.display(), "Config file not found, creating default config");
            let config = HudConfig::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: HudConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?;

        info!(path = %path.display(), placement = config.placement.name(), "Loaded config");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        fs::write(path, json).with_context(|| format!("Failed to write config to {:?}", path))?;

        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Configured bar color. `auto` here means neutral, there is no text to derive from.
    pub fn bar_color(&self) -> BarColor {
        BarColor::parse_or_neutral(&self.bar_color).resolve(BarColor::NEUTRAL)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            placement: self.placement,
            keep_text_colors: self.keep_text_colors,
            use_auto_bar_color: self.use_auto_bar_color,
            neutral_color: self.bar_color(),
        }
    }
}
