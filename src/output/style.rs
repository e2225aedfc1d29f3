// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Palette and named styles.
//!
//! ```text
//! [colors] statusAdded = "lightgreen"          "fg[,bg]"
//!            |
//!            v
//! ColorScheme { StyleKey -> Style { fg, bg } }
//!            |
//!            v
//! paint(text, key) --> ESC[fg;bgm text ESC[0m   (or text when disabled)
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::error::ConfigError;

const COLOR_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

const RESET: &str = "\x1b[0m";

/// One of the sixteen terminal colors: `dark<name>` or `light<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(u8);

impl Color {
    pub const DARK_RED: Self = Self(1);
    pub const DARK_GREEN: Self = Self(2);
    pub const DARK_YELLOW: Self = Self(3);
    pub const DARK_MAGENTA: Self = Self(5);
    pub const DARK_WHITE: Self = Self(7);
    pub const LIGHT_BLACK: Self = Self(8);
    pub const LIGHT_RED: Self = Self(9);
    pub const LIGHT_YELLOW: Self = Self(11);
    pub const LIGHT_BLUE: Self = Self(12);
    pub const LIGHT_WHITE: Self = Self(15);

    /// Parses a name such as `darkred` or `lightcyan` (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let (offset, base) = if let Some(base) = name.strip_prefix("dark") {
            (0, base)
        } else if let Some(base) = name.strip_prefix("light") {
            (8, base)
        } else {
            return None;
        };
        let index = COLOR_NAMES.iter().position(|&n| n == base)?;
        u8::try_from(index).ok().map(|i| Self(i + offset))
    }

    const fn fg_code(self) -> u8 {
        if self.0 < 8 { 30 + self.0 } else { 90 + self.0 - 8 }
    }

    const fn bg_code(self) -> u8 {
        if self.0 < 8 { 40 + self.0 } else { 100 + self.0 - 8 }
    }
}

/// Foreground plus optional background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bg: Option<Color>,
}

impl Style {
    const fn fg(fg: Color) -> Self {
        Self { fg, bg: None }
    }

    const fn on(fg: Color, bg: Color) -> Self {
        Self { fg, bg: Some(bg) }
    }

    /// Parses `"fg[,bg]"`. Empty or `default` entries keep `base`'s value.
    fn parse(spec: &str, base: Self) -> Result<Self, String> {
        let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
        if parts.len() > 2 {
            return Err(format!("expected \"fg[,bg]\", got '{spec}'"));
        }
        let pick = |entry: Option<&&str>, current: Option<Color>| match entry {
            None => Ok(current),
            Some(&"") => Ok(current),
            Some(name) if name.eq_ignore_ascii_case("default") => Ok(current),
            Some(name) => Color::from_name(name)
                .map(Some)
                .ok_or_else(|| format!("unknown color '{name}'")),
        };
        let fg = pick(parts.first(), Some(base.fg))?.unwrap_or(base.fg);
        let bg = pick(parts.get(1), base.bg)?;
        Ok(Self { fg, bg })
    }

    fn sgr(self) -> String {
        let mut codes = format!("\x1b[{}", self.fg.fg_code());
        if let Some(bg) = self.bg {
            let _ = write!(codes, ";{}", bg.bg_code());
        }
        codes.push('m');
        codes
    }
}

macro_rules! style_keys {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Named places in the output that carry a style.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum StyleKey {
            $($variant),+
        }

        impl StyleKey {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Name used in the `[colors]` section.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }
    };
}

style_keys! {
    DiffAdd => "diffAdd",
    DiffRemoved => "diffRemoved",
    DiffMisc => "diffMisc",
    Conflict => "conflict",
    StatusAdded => "statusAdded",
    StatusDeleted => "statusDeleted",
    StatusUpdated => "statusUpdated",
    StatusConflict => "statusConflict",
    StatusModified => "statusModified",
    StatusMerged => "statusMerged",
    StatusUntracked => "statusUntracked",
    Status => "status",
    Info => "info",
    LogRev => "logRev",
    LogCommitter => "logCommitter",
    LogDate => "logDate",
    LogNumLines => "logNumLines",
    LogFieldSeparator => "logFieldSeparator",
    LogSeparator => "logSeparator",
    LogText => "logText",
    Warning => "warning",
}

impl StyleKey {
    /// Looks a style up by its `[colors]` name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(name))
    }

    const fn default_style(self) -> Style {
        match self {
            Self::DiffAdd | Self::StatusUpdated | Self::StatusModified | Self::LogCommitter => {
                Style::fg(Color::LIGHT_BLUE)
            }
            Self::DiffRemoved => Style::fg(Color::LIGHT_RED),
            Self::DiffMisc => Style::fg(Color::DARK_YELLOW),
            Self::Conflict | Self::StatusConflict | Self::Warning => {
                Style::on(Color::LIGHT_WHITE, Color::DARK_RED)
            }
            Self::StatusAdded | Self::Info | Self::LogSeparator => Style::fg(Color::DARK_GREEN),
            Self::StatusDeleted => Style::fg(Color::DARK_RED),
            Self::StatusMerged => Style::fg(Color::DARK_MAGENTA),
            Self::StatusUntracked
            | Self::Status
            | Self::LogDate
            | Self::LogNumLines
            | Self::LogFieldSeparator => Style::fg(Color::LIGHT_BLACK),
            Self::LogRev => Style::fg(Color::LIGHT_YELLOW),
            Self::LogText => Style::fg(Color::DARK_WHITE),
        }
    }
}

/// Resolved palette plus the on/off switch for escape sequences.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    styles: BTreeMap<StyleKey, Style>,
    enabled: bool,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            styles: StyleKey::ALL
                .iter()
                .map(|&key| (key, key.default_style()))
                .collect(),
            enabled: false,
        }
    }
}

impl ColorScheme {
    /// Applies `[colors]` overrides on top of the built-in palette.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unknown style name, an
    /// unknown color, or more than two comma-separated entries.
    pub fn with_overrides(colors: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut scheme = Self::default();
        for (name, spec) in colors {
            let invalid = |message: String| ConfigError::InvalidValue {
                section: "colors".to_string(),
                key: name.clone(),
                message,
            };
            let key = StyleKey::from_name(name)
                .ok_or_else(|| invalid(format!("unknown style '{name}'")))?;
            let style = Style::parse(spec, key.default_style()).map_err(invalid)?;
            scheme.styles.insert(key, style);
        }
        Ok(scheme)
    }

    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn style(&self, key: StyleKey) -> Style {
        self.styles
            .get(&key)
            .copied()
            .unwrap_or_else(|| key.default_style())
    }

    /// Wraps `text` in the escape sequences for `key`.
    #[must_use]
    pub fn paint(&self, text: &str, key: StyleKey) -> String {
        if !self.enabled {
            return text.to_string();
        }
        format!("{}{text}{RESET}", self.style(key).sgr())
    }
}
