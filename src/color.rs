use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::constants::color::NEUTRAL_ALIASES;
use crate::text::{first_color, ChatColor};

/// Bar color, plus the `Auto` sentinel meaning "derive from text content"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    #[default]
    Auto,
    Pink,
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    White,
}

impl BarColor {
    /// Every concrete color, `Auto` excluded
    pub const NAMED: [BarColor; 7] = [
        BarColor::Pink,
        BarColor::Blue,
        BarColor::Red,
        BarColor::Green,
        BarColor::Yellow,
        BarColor::Purple,
        BarColor::White,
    ];

    /// Color a widget shows when nothing better is known
    pub const NEUTRAL: BarColor = BarColor::White;

    pub fn name(self) -> &'static str {
        match self {
            BarColor::Auto => "auto",
            BarColor::Pink => "pink",
            BarColor::Blue => "blue",
            BarColor::Red => "red",
            BarColor::Green => "green",
            BarColor::Yellow => "yellow",
            BarColor::Purple => "purple",
            BarColor::White => "white",
        }
    }

    /// Look up a color name, honoring the neutral aliases ("default", "inherit")
    pub fn from_name(name: &str) -> Option<BarColor> {
        let name = name.trim().to_lowercase();
        if NEUTRAL_ALIASES.contains(&name.as_str()) {
            return Some(BarColor::NEUTRAL);
        }
        if name == "auto" {
            return Some(BarColor::Auto);
        }
        BarColor::NAMED.into_iter().find(|color| color.name() == name)
    }

    /// Like [`BarColor::from_name`], but unknown names log a warning and become neutral
    pub fn parse_or_neutral(name: &str) -> BarColor {
        BarColor::from_name(name).unwrap_or_else(|| {
            warn!(color = %name, fallback = %BarColor::NEUTRAL, "Invalid bar color, using neutral color");
            BarColor::NEUTRAL
        })
    }

    /// Concrete color to push to a widget. `Auto` becomes `neutral`.
    pub fn resolve(self, neutral: BarColor) -> BarColor {
        match (self, neutral) {
            (BarColor::Auto, BarColor::Auto) => BarColor::NEUTRAL,
            (BarColor::Auto, neutral) => neutral,
            (color, _) => color,
        }
    }
}

impl fmt::Display for BarColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ChatColor> for BarColor {
    fn from(color: ChatColor) -> Self {
        match color {
            ChatColor::Black | ChatColor::DarkGray | ChatColor::Gray | ChatColor::White => {
                BarColor::White
            }
            ChatColor::DarkBlue | ChatColor::Blue | ChatColor::DarkAqua | ChatColor::Aqua => {
                BarColor::Blue
            }
            ChatColor::DarkGreen | ChatColor::Green => BarColor::Green,
            ChatColor::DarkRed | ChatColor::Red => BarColor::Red,
            ChatColor::DarkPurple => BarColor::Purple,
            ChatColor::LightPurple => BarColor::Pink,
            ChatColor::Gold | ChatColor::Yellow => BarColor::Yellow,
        }
    }
}

/// Pick a bar color from the first color code in a status line
pub fn auto_color(text: &str) -> BarColor {
    first_color(text).map(BarColor::from).unwrap_or(BarColor::NEUTRAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_named_colors() {
        for color in BarColor::NAMED {
            assert_eq!(BarColor::from_name(color.name()), Some(color));
        }
        assert_eq!(BarColor::from_name("  RED "), Some(BarColor::Red));
        assert_eq!(BarColor::from_name("auto"), Some(BarColor::Auto));
    }

    #[test]
    fn test_from_name_neutral_aliases() {
        assert_eq!(BarColor::from_name("default"), Some(BarColor::White));
        assert_eq!(BarColor::from_name("Inherit"), Some(BarColor::White));
    }

    #[test]
    fn test_parse_or_neutral_invalid() {
        assert_eq!(BarColor::from_name("magenta"), None);
        assert_eq!(BarColor::parse_or_neutral("magenta"), BarColor::White);
    }

    #[test]
    fn test_resolve_auto() {
        assert_eq!(BarColor::Auto.resolve(BarColor::Blue), BarColor::Blue);
        assert_eq!(BarColor::Auto.resolve(BarColor::Auto), BarColor::White);
        assert_eq!(BarColor::Red.resolve(BarColor::Blue), BarColor::Red);
    }

    #[test]
    fn test_auto_color_from_text() {
        assert_eq!(auto_color("§cReactor §7| §aOK"), BarColor::Red);
        assert_eq!(auto_color("§l§dPink thing"), BarColor::Pink);
        assert_eq!(auto_color("§6Gold"), BarColor::Yellow);
        assert_eq!(auto_color("Furnace | Fuel: 20%"), BarColor::White);
    }
}
