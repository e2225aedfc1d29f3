// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Classified output lines.

use super::style::StyleKey;
use crate::core::process::Source;

/// What the rule engine decided for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Written as received.
    Normal,
    /// Dropped.
    Suppressed,
    /// Written in one style.
    Highlighted(StyleKey),
    /// A conflict, written in the conflict style and retained.
    Conflict,
    /// A log header, written field by field.
    LogHeader,
    /// Client error output, written in the warning style and retained.
    HighlightedError,
    /// An unterminated prompt, written raw.
    MenuPrompt,
}

/// A line of client output with its origin and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamLine {
    pub text: String,
    pub source: Source,
    /// Arrival order across both streams.
    pub seq: u64,
    pub class: LineClass,
}

impl StreamLine {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self.class, LineClass::Suppressed)
    }
}
