// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Views over `svn status` output for the status-family shortcuts.
//!
//! ```text
//! svn status ARGS --> lines --> RuleSet(Status) drops noise
//!   stnames      all paths
//!   stmod        paths not marked '?'
//!   stmodroot    first path component of stmod, sorted, unique
//!   stmodrevert  svn revert <stmod paths>
//! ```

use std::collections::BTreeSet;

use crate::output::{Action, RuleSet};

/// Width of the status columns in front of each path.
const STATUS_COLUMNS: usize = 7;

/// What a status-family shortcut prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusView {
    /// `stnames`
    Names,
    /// `stmod`
    Modified,
    /// `stmodroot`
    ModifiedRoots,
}

/// Splits a status line into its status columns and path.
#[must_use]
pub fn split_status(line: &str) -> (&str, &str) {
    let Some((columns, path)) = line
        .is_char_boundary(STATUS_COLUMNS)
        .then(|| line.split_at(STATUS_COLUMNS))
    else {
        return (line, "");
    };
    (columns, path.strip_prefix(' ').unwrap_or(path))
}

fn is_noise(rules: &RuleSet, line: &str) -> bool {
    matches!(
        rules.action_for(line),
        Some(Action::Suppress | Action::ConditionalSuppress)
    )
}

/// Paths of the entries in `output`; `modified_only` drops unversioned
/// (`?`) entries.
#[must_use]
pub fn status_paths(output: &str, rules: &RuleSet, modified_only: bool) -> Vec<String> {
    output
        .lines()
        .filter(|line| !is_noise(rules, line))
        .map(split_status)
        .filter(|(columns, _)| !(modified_only && columns.starts_with('?')))
        .map(|(_, path)| path.to_string())
        .collect()
}

/// Lines printed for `view`.
#[must_use]
pub fn render(output: &str, rules: &RuleSet, view: StatusView) -> Vec<String> {
    match view {
        StatusView::Names => status_paths(output, rules, false),
        StatusView::Modified => status_paths(output, rules, true),
        StatusView::ModifiedRoots => status_paths(output, rules, true)
            .iter()
            .map(|path| path.split('/').next().unwrap_or(path).to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    }
}
