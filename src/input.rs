//! Input identifiers: mouse buttons and keyboard hotkeys.
//!
//! Both types parse from and render to short human-readable names so rule
//! descriptors can spell them as plain strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary button.
    #[default]
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

impl MouseButton {
    /// Returns the canonical name of the button.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Middle => "Middle",
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MouseButton {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "lmb" => Ok(Self::Left),
            "right" | "rmb" => Ok(Self::Right),
            "middle" | "mmb" => Ok(Self::Middle),
            _ => Err(ValidationError::UnknownMouseButton {
                input: s.to_string(),
            }),
        }
    }
}

/// Named keys accepted by [`Hotkey`], with their accepted aliases.
const NAMED_KEYS: &[(&str, &[&str])] = &[
    ("Space", &["space"]),
    ("Enter", &["enter", "return"]),
    ("Tab", &["tab"]),
    ("Escape", &["escape", "esc"]),
    ("Backspace", &["backspace", "back"]),
    ("Delete", &["delete", "del"]),
    ("Insert", &["insert", "ins"]),
    ("Home", &["home"]),
    ("End", &["end"]),
    ("PageUp", &["pageup", "pgup"]),
    ("PageDown", &["pagedown", "pgdn"]),
    ("Up", &["up"]),
    ("Down", &["down"]),
    ("Left", &["left"]),
    ("Right", &["right"]),
];

fn canonical_key(raw: &str) -> Option<String> {
    let lower = raw.to_ascii_lowercase();

    if raw.len() == 1 {
        let c = raw.chars().next()?;
        if c.is_ascii_alphanumeric() {
            return Some(c.to_ascii_uppercase().to_string());
        }
        return None;
    }

    if let Some(num) = lower.strip_prefix('f') {
        if let Ok(n) = num.parse::<u8>() {
            if (1..=24).contains(&n) {
                return Some(format!("F{n}"));
            }
            return None;
        }
    }

    NAMED_KEYS
        .iter()
        .find(|(_, aliases)| aliases.contains(&lower.as_str()))
        .map(|(name, _)| (*name).to_string())
}

/// A keyboard key with optional modifiers.
///
/// Parses from `+`-separated text such as `"Ctrl+Shift+F1"`; modifiers may
/// appear in any order and case. The canonical rendering lists modifiers as
/// `Ctrl`, `Shift`, `Alt` followed by the key.
///
/// # Examples
///
/// ```
/// use slotwise::Hotkey;
///
/// let key: Hotkey = "shift+ctrl+a".parse().unwrap();
/// assert_eq!(key.to_string(), "Ctrl+Shift+A");
/// assert_eq!(key, Hotkey::key("A").unwrap().with_ctrl().with_shift());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hotkey {
    key: String,
    ctrl: bool,
    shift: bool,
    alt: bool,
}

impl Hotkey {
    /// Creates a hotkey without modifiers.
    pub fn key(name: &str) -> Result<Self, ValidationError> {
        let key = canonical_key(name.trim()).ok_or_else(|| ValidationError::InvalidHotkey {
            input: name.to_string(),
            reason: "unknown key".to_string(),
        })?;
        Ok(Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
        })
    }

    /// Adds the ctrl modifier.
    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Adds the shift modifier.
    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Adds the alt modifier.
    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Returns the canonical key name, without modifiers.
    #[must_use]
    pub fn key_name(&self) -> &str {
        &self.key
    }

    /// Returns true if any modifier is held.
    #[must_use]
    pub const fn has_modifiers(&self) -> bool {
        self.ctrl || self.shift || self.alt
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        f.write_str(&self.key)
    }
}

impl FromStr for Hotkey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidHotkey {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty hotkey"));
        }

        let parts: Vec<&str> = trimmed.split('+').map(str::trim).collect();
        let Some((key_part, modifier_parts)) = parts.split_last() else {
            return Err(invalid("empty hotkey"));
        };

        let mut hotkey = Self::key(key_part).map_err(|_| invalid("unknown key"))?;
        for part in modifier_parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => hotkey.ctrl = true,
                "shift" => hotkey.shift = true,
                "alt" => hotkey.alt = true,
                "" => return Err(invalid("empty modifier")),
                _ => return Err(invalid("unknown modifier")),
            }
        }
        Ok(hotkey)
    }
}

impl TryFrom<String> for Hotkey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hotkey> for String {
    fn from(value: Hotkey) -> Self {
        value.to_string()
    }
}
