//! Status text model
//!
//! Status lines arrive as legacy strings with section-sign format codes
//! (`§c`, `§l`, ...). The legacy bar only takes plain text, the modern bar
//! takes structured spans, so both representations live in [`TextValue`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::text::{ALT_PREFIX, FACING_SEPARATOR, SECTION};

/// The sixteen legacy chat colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl ChatColor {
    pub fn from_code(code: char) -> Option<Self> {
        let color = match code.to_ascii_lowercase() {
            '0' => Self::Black,
            '1' => Self::DarkBlue,
            '2' => Self::DarkGreen,
            '3' => Self::DarkAqua,
            '4' => Self::DarkRed,
            '5' => Self::DarkPurple,
            '6' => Self::Gold,
            '7' => Self::Gray,
            '8' => Self::DarkGray,
            '9' => Self::Blue,
            'a' => Self::Green,
            'b' => Self::Aqua,
            'c' => Self::Red,
            'd' => Self::LightPurple,
            'e' => Self::Yellow,
            'f' => Self::White,
            _ => return None,
        };
        Some(color)
    }

    pub fn code(self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
        }
    }
}

/// Color and decorations carried by one span
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ChatColor>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underlined: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub obfuscated: bool,
}

impl TextStyle {
    /// Apply one legacy format code. A color code resets the decorations.
    fn apply(&mut self, code: char) {
        let code = code.to_ascii_lowercase();
        if let Some(color) = ChatColor::from_code(code) {
            *self = TextStyle {
                color: Some(color),
                ..TextStyle::default()
            };
            return;
        }
        match code {
            'k' => self.obfuscated = true,
            'l' => self.bold = true,
            'm' => self.strikethrough = true,
            'n' => self.underlined = true,
            'o' => self.italic = true,
            'r' => *self = TextStyle::default(),
            // hex color introducer, the digits that follow are consumed as codes too
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    #[serde(flatten)]
    pub style: TextStyle,
}

/// A bar title or flash message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TextValue {
    Plain(String),
    Rich(Vec<TextSpan>),
}

impl Default for TextValue {
    fn default() -> Self {
        TextValue::Plain(String::new())
    }
}

impl TextValue {
    pub fn plain(text: impl Into<String>) -> Self {
        TextValue::Plain(text.into())
    }

    /// Parse a legacy formatted string into structured spans
    pub fn from_legacy(input: &str) -> Self {
        TextValue::Rich(parse_legacy(input))
    }

    /// Flatten to plain text, dropping all markup
    pub fn to_plain(&self) -> String {
        match self {
            TextValue::Plain(text) => strip_colors(text),
            TextValue::Rich(spans) => spans.iter().map(|span| span.text.as_str()).collect(),
        }
    }

    /// Re-encode as a legacy string, keeping colors and decorations
    pub fn to_legacy(&self) -> String {
        match self {
            TextValue::Plain(text) => text.clone(),
            TextValue::Rich(spans) => {
                let mut out = String::new();
                for span in spans {
                    if span.style != TextStyle::default() {
                        let style = &span.style;
                        match style.color {
                            Some(color) => {
                                out.push(SECTION);
                                out.push(color.code());
                            }
                            None => {
                                out.push(SECTION);
                                out.push('r');
                            }
                        }
                        for (set, code) in [
                            (style.obfuscated, 'k'),
                            (style.bold, 'l'),
                            (style.strikethrough, 'm'),
                            (style.underlined, 'n'),
                            (style.italic, 'o'),
                        ] {
                            if set {
                                out.push(SECTION);
                                out.push(code);
                            }
                        }
                    } else if !out.is_empty() {
                        out.push(SECTION);
                        out.push('r');
                    }
                    out.push_str(&span.text);
                }
                out
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TextValue::Plain(text) => text.is_empty(),
            TextValue::Rich(spans) => spans.iter().all(|span| span.text.is_empty()),
        }
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain())
    }
}

fn is_format_code(code: char) -> bool {
    matches!(code.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r' | 'x')
}

/// Split a legacy string into styled spans
pub fn parse_legacy(input: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut style = TextStyle::default();
    let mut buf = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == SECTION
            && let Some(&code) = chars.peek()
            && is_format_code(code)
        {
            chars.next();
            if !buf.is_empty() {
                spans.push(TextSpan {
                    text: std::mem::take(&mut buf),
                    style: style.clone(),
                });
            }
            style.apply(code);
            continue;
        }
        buf.push(c);
    }

    if !buf.is_empty() {
        spans.push(TextSpan { text: buf, style });
    }
    spans
}

/// Remove every legacy format code
pub fn strip_colors(input: &str) -> String {
    parse_legacy(input).into_iter().map(|span| span.text).collect()
}

/// Replace `prefix` + code with the section sign + code, e.g. `&c` -> `§c`
pub fn translate_alternate_codes(prefix: char, input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == prefix
            && let Some(&code) = chars.peek()
            && is_format_code(code)
        {
            chars.next();
            out.push(SECTION);
            out.push(code.to_ascii_lowercase());
            continue;
        }
        out.push(c);
    }
    out
}

/// First color code in the string, ignoring decorations
pub fn first_color(input: &str) -> Option<ChatColor> {
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == SECTION
            && let Some(&code) = chars.peek()
        {
            if let Some(color) = ChatColor::from_code(code) {
                return Some(color);
            }
            if is_format_code(code) {
                chars.next();
            }
        }
    }
    None
}

/// Build the status line for a looked-at target: `name &7| info`, `&` codes translated
pub fn compose_facing(name: &str, info: &str) -> String {
    let raw = if info.is_empty() {
        name.to_string()
    } else {
        format!("{name}{FACING_SEPARATOR}{info}")
    };
    translate_alternate_codes(ALT_PREFIX, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_colors_removes_codes() {
        assert_eq!(strip_colors("§6Furnace §7| §aFuel: 20%"), "Furnace | Fuel: 20%");
        assert_eq!(strip_colors("no codes"), "no codes");
    }

    #[test]
    fn test_strip_colors_keeps_dangling_section() {
        // A section sign without a valid code is literal text
        assert_eq!(strip_colors("50§"), "50§");
        assert_eq!(strip_colors("§zoo"), "§zoo");
    }

    #[test]
    fn test_parse_legacy_spans() {
        let spans = parse_legacy("§c§lHot§r plate");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Hot");
        assert_eq!(spans[0].style.color, Some(ChatColor::Red));
        assert!(spans[0].style.bold);
        assert_eq!(spans[1].text, " plate");
        assert_eq!(spans[1].style, TextStyle::default());
    }

    #[test]
    fn test_color_code_resets_decorations() {
        let spans = parse_legacy("§lA§9B");
        assert!(spans[0].style.bold);
        assert_eq!(spans[1].style.color, Some(ChatColor::Blue));
        assert!(!spans[1].style.bold);
    }

    #[test]
    fn test_to_plain_from_rich() {
        let value = TextValue::from_legacy("§eSolar §7| §f12 J/s");
        assert_eq!(value.to_plain(), "Solar | 12 J/s");
        assert_eq!(value.to_string(), "Solar | 12 J/s");
    }

    #[test]
    fn test_to_legacy_keeps_colors() {
        let value = TextValue::from_legacy("§aok§r done");
        assert_eq!(value.to_legacy(), "§aok§r done");
        assert_eq!(strip_colors(&value.to_legacy()), "ok done");
    }

    #[test]
    fn test_translate_alternate_codes() {
        assert_eq!(translate_alternate_codes('&', "&6Gold &Xy & co"), "§6Gold §xy & co");
        assert_eq!(translate_alternate_codes('&', "R&D"), "R§d");
        assert_eq!(translate_alternate_codes('&', "a & b"), "a & b");
    }

    #[test]
    fn test_first_color_skips_decorations() {
        assert_eq!(first_color("§l§cBoom"), Some(ChatColor::Red));
        assert_eq!(first_color("plain"), None);
        assert_eq!(first_color("§lbold only"), None);
    }

    #[test]
    fn test_first_color_after_doubled_section_sign() {
        let line = "\u{00A7}\u{00A7}cHot";
        let spans = parse_legacy(line);
        let title_color = spans.iter().find_map(|span| span.style.color);

        assert_eq!(title_color, Some(ChatColor::Red));
        assert_eq!(first_color(line), title_color);
    }

    #[test]
    fn test_compose_facing() {
        assert_eq!(compose_facing("&6Furnace", "Fuel: 20%"), "§6Furnace §7| Fuel: 20%");
        assert_eq!(compose_facing("&6Furnace", ""), "§6Furnace");
    }

    #[test]
    fn test_is_empty() {
        assert!(TextValue::default().is_empty());
        assert!(TextValue::from_legacy("§c").is_empty());
        assert!(!TextValue::plain("x").is_empty());
    }
}
