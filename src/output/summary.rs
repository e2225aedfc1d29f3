// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-of-run notices.

use super::style::{ColorScheme, StyleKey};

/// Lines retained while the client runs, replayed once it has exited.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    conflicts: Vec<String>,
    stderr: Vec<String>,
}

impl Summary {
    pub fn add_conflict(&mut self, line: impl Into<String>) {
        self.conflicts.push(line.into());
    }

    pub fn add_stderr(&mut self, line: impl Into<String>) {
        self.stderr.push(line.into());
    }

    #[must_use]
    pub fn stderr_lines(&self) -> &[String] {
        &self.stderr
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty() && self.stderr.is_empty()
    }

    /// Conflict notice for stdout; empty when nothing conflicted.
    #[must_use]
    pub fn render_conflicts(&self, scheme: &ColorScheme) -> String {
        render(
            scheme,
            StyleKey::StatusConflict,
            &format!("Total conflicts: {}", self.conflicts.len()),
            &self.conflicts,
        )
    }

    /// Error-output notice for stderr; empty when the client was silent there.
    #[must_use]
    pub fn render_stderr(&self, scheme: &ColorScheme) -> String {
        let count = self.stderr.len();
        let noun = if count == 1 { "line" } else { "lines" };
        render(
            scheme,
            StyleKey::Warning,
            &format!("Total svn stderr: {count} {noun}"),
            &self.stderr,
        )
    }
}

fn render(scheme: &ColorScheme, key: StyleKey, title: &str, lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = scheme.paint(title, key);
    out.push('\n');
    for line in lines {
        out.push_str(&scheme.paint(line, key));
        out.push('\n');
    }
    out
}
