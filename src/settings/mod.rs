//! Accessibility settings bundle.
//!
//! DESIGN
//! ======
//! `AccessibilitySettings` is always fully populated. Persisted copies are
//! parsed strictly (every field required, unknown fields rejected) so a
//! partial or foreign record is discarded as a whole instead of being
//! merged into a half-valid bundle.
//!
//! Mutation goes through `SettingChange`, which pairs a field with a value
//! of the matching type, so a change can never put the wrong kind of value
//! into a field.

pub mod effects;
pub mod store;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use serde::{Deserialize, Serialize};

/// Root font size used when a size label is not recognized.
pub const DEFAULT_FONT_PX: u32 = 16;

// =============================================================================
// FONT SIZE
// =============================================================================

/// Text size preference applied to the root element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontSize {
    #[serde(rename = "small")]
    Small,
    #[default]
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "large")]
    Large,
    #[serde(rename = "x-large")]
    ExtraLarge,
}

impl FontSize {
    pub const ALL: [FontSize; 4] = [FontSize::Small, FontSize::Medium, FontSize::Large, FontSize::ExtraLarge];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::ExtraLarge => "x-large",
        }
    }

    /// Exact, case-sensitive match on the persisted label.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.as_str() == raw)
    }

    /// Root font size in pixels.
    #[must_use]
    pub fn px(self) -> u32 {
        match self {
            Self::Small => 14,
            Self::Medium => DEFAULT_FONT_PX,
            Self::Large => 18,
            Self::ExtraLarge => 20,
        }
    }
}

/// Pixel size for a raw size label; anything unrecognized gets the medium size.
#[must_use]
pub fn font_px_for_label(label: &str) -> u32 {
    FontSize::parse(label).map_or(DEFAULT_FONT_PX, FontSize::px)
}

// =============================================================================
// SETTINGS BUNDLE
// =============================================================================

/// The full accessibility preference bundle for one identity or anonymous session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccessibilitySettings {
    pub font_size: FontSize,
    pub dark_mode: bool,
    pub high_contrast: bool,
    pub sign_language: bool,
    pub screen_reader: bool,
    pub reduce_motion: bool,
}

impl AccessibilitySettings {
    /// Strictly parse a persisted JSON record. Any shape mismatch yields `None`.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Strictly convert a JSON value (e.g. a profile column). Any shape mismatch yields `None`.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }

    /// Return a copy with exactly the field named by `change` replaced.
    #[must_use]
    pub fn with(self, change: SettingChange) -> Self {
        let mut next = self;
        match change {
            SettingChange::FontSize(size) => next.font_size = size,
            SettingChange::DarkMode(on) => next.dark_mode = on,
            SettingChange::HighContrast(on) => next.high_contrast = on,
            SettingChange::SignLanguage(on) => next.sign_language = on,
            SettingChange::ScreenReader(on) => next.screen_reader = on,
            SettingChange::ReduceMotion(on) => next.reduce_motion = on,
        }
        next
    }

    /// Current value of a boolean field, `None` for `FontSize`.
    #[must_use]
    pub fn flag(&self, key: SettingKey) -> Option<bool> {
        match key {
            SettingKey::FontSize => None,
            SettingKey::DarkMode => Some(self.dark_mode),
            SettingKey::HighContrast => Some(self.high_contrast),
            SettingKey::SignLanguage => Some(self.sign_language),
            SettingKey::ScreenReader => Some(self.screen_reader),
            SettingKey::ReduceMotion => Some(self.reduce_motion),
        }
    }
}

// =============================================================================
// CHANGES
// =============================================================================

/// Name of one field of the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    FontSize,
    DarkMode,
    HighContrast,
    SignLanguage,
    ScreenReader,
    ReduceMotion,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::FontSize,
        SettingKey::DarkMode,
        SettingKey::HighContrast,
        SettingKey::SignLanguage,
        SettingKey::ScreenReader,
        SettingKey::ReduceMotion,
    ];

    /// Field name as it appears in the persisted record.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FontSize => "fontSize",
            Self::DarkMode => "darkMode",
            Self::HighContrast => "highContrast",
            Self::SignLanguage => "signLanguage",
            Self::ScreenReader => "screenReader",
            Self::ReduceMotion => "reduceMotion",
        }
    }

    /// Accepts the persisted field name or its kebab-case spelling.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw || key.kebab() == raw)
    }

    fn kebab(self) -> &'static str {
        match self {
            Self::FontSize => "font-size",
            Self::DarkMode => "dark-mode",
            Self::HighContrast => "high-contrast",
            Self::SignLanguage => "sign-language",
            Self::ScreenReader => "screen-reader",
            Self::ReduceMotion => "reduce-motion",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingParseError {
    #[error("unknown setting: {0}")]
    UnknownKey(String),
    #[error("invalid font size '{0}' (expected small, medium, large or x-large)")]
    InvalidFontSize(String),
    #[error("invalid value '{value}' for {key} (expected true or false)")]
    InvalidFlag { key: &'static str, value: String },
}

/// One field paired with a new value of the matching type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    FontSize(FontSize),
    DarkMode(bool),
    HighContrast(bool),
    SignLanguage(bool),
    ScreenReader(bool),
    ReduceMotion(bool),
}

impl SettingChange {
    /// Parse a `key=value` pair as typed on a command line.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown key or a value of the wrong type.
    pub fn parse(key: &str, value: &str) -> Result<Self, SettingParseError> {
        let key = SettingKey::parse(key).ok_or_else(|| SettingParseError::UnknownKey(key.to_owned()))?;
        if key == SettingKey::FontSize {
            return FontSize::parse(value)
                .map(Self::FontSize)
                .ok_or_else(|| SettingParseError::InvalidFontSize(value.to_owned()));
        }
        let on = match value {
            "true" | "on" => true,
            "false" | "off" => false,
            _ => return Err(SettingParseError::InvalidFlag { key: key.as_str(), value: value.to_owned() }),
        };
        Self::flag(key, on).ok_or_else(|| SettingParseError::UnknownKey(key.as_str().to_owned()))
    }

    /// Build a boolean change for `key`. `None` for `FontSize`.
    #[must_use]
    pub fn flag(key: SettingKey, on: bool) -> Option<Self> {
        match key {
            SettingKey::FontSize => None,
            SettingKey::DarkMode => Some(Self::DarkMode(on)),
            SettingKey::HighContrast => Some(Self::HighContrast(on)),
            SettingKey::SignLanguage => Some(Self::SignLanguage(on)),
            SettingKey::ScreenReader => Some(Self::ScreenReader(on)),
            SettingKey::ReduceMotion => Some(Self::ReduceMotion(on)),
        }
    }

    /// The change that flips a boolean field of `current`. `None` for `FontSize`.
    #[must_use]
    pub fn toggle(key: SettingKey, current: &AccessibilitySettings) -> Option<Self> {
        current.flag(key).and_then(|on| Self::flag(key, !on))
    }

    #[must_use]
    pub fn key(self) -> SettingKey {
        match self {
            Self::FontSize(_) => SettingKey::FontSize,
            Self::DarkMode(_) => SettingKey::DarkMode,
            Self::HighContrast(_) => SettingKey::HighContrast,
            Self::SignLanguage(_) => SettingKey::SignLanguage,
            Self::ScreenReader(_) => SettingKey::ScreenReader,
            Self::ReduceMotion(_) => SettingKey::ReduceMotion,
        }
    }

    /// Title and description of the notice shown after this change lands.
    #[must_use]
    pub fn describe(self) -> (String, String) {
        let (title, description) = match self {
            Self::FontSize(size) => {
                return ("Font Size Changed".to_owned(), format!("Text size has been set to {}.", size.as_str()));
            }
            Self::DarkMode(true) => ("Dark Mode Activated", "The display is now in dark mode."),
            Self::DarkMode(false) => ("Light Mode Activated", "The display is now in light mode."),
            Self::HighContrast(true) => {
                ("High Contrast Mode Enabled", "The display now has higher contrast for better visibility.")
            }
            Self::HighContrast(false) => {
                ("High Contrast Mode Disabled", "The display has been set to standard contrast.")
            }
            Self::SignLanguage(true) => ("Sign Language Enabled", "Sign language videos will be shown when available."),
            Self::SignLanguage(false) => {
                ("Sign Language Disabled", "Sign language videos will not be shown by default.")
            }
            Self::ScreenReader(true) => {
                ("Screen Reader Mode Enabled", "Enhanced support for screen readers has been activated.")
            }
            Self::ScreenReader(false) => {
                ("Screen Reader Mode Disabled", "Screen reader optimizations have been disabled.")
            }
            Self::ReduceMotion(true) => ("Reduced Motion Enabled", "Animations and transitions have been reduced."),
            Self::ReduceMotion(false) => ("Reduced Motion Disabled", "Standard animations and transitions restored."),
        };
        (title.to_owned(), description.to_owned())
    }
}
