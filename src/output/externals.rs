// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rewrites old-style `svn:externals` property dumps in diff output.
//!
//! Older clients print the whole property twice (`   - old` / `   + new`);
//! this turns the two blocks into a zero-context unified diff.
//!
//! ```text
//! Outside ──"Name|Modified: svn:externals"──► First
//! First   ──"## ... ##"──► Outside       (client already diffs it)
//!         └─other────────► Collecting
//! Collecting ──"word: ..."──► flush diff, Outside
//!            └─other──────► old/new block
//! ```

use similar::{ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    First,
    Collecting,
}

/// Line-at-a-time externals rewriter.
#[derive(Debug)]
pub struct ExternalsDiffer {
    ignore_space_change: bool,
    state: State,
    blocks: [Vec<String>; 2],
    side: usize,
}

impl ExternalsDiffer {
    #[must_use]
    pub const fn new(ignore_space_change: bool) -> Self {
        Self {
            ignore_space_change,
            state: State::Outside,
            blocks: [Vec::new(), Vec::new()],
            side: 0,
        }
    }

    /// Feeds one line and returns the lines to pass on.
    pub fn push(&mut self, line: String) -> Vec<String> {
        match self.state {
            State::Outside => {
                if is_externals_header(&line) {
                    self.state = State::First;
                }
                vec![line]
            }
            State::First if is_hunk_marker(&line) => {
                self.state = State::Outside;
                vec![line]
            }
            State::First | State::Collecting if is_property_header(&line) => {
                let mut out = self.flush();
                out.push(line);
                self.state = State::Outside;
                out
            }
            State::First | State::Collecting => {
                self.state = State::Collecting;
                self.collect(&line);
                Vec::new()
            }
        }
    }

    /// Emits a pending diff at end of output.
    pub fn finish(&mut self) -> Vec<String> {
        if self.state == State::Outside {
            return Vec::new();
        }
        self.state = State::Outside;
        self.flush()
    }

    fn collect(&mut self, line: &str) {
        let mut line = line;
        if let Some(rest) = strip_marker(line, '-') {
            self.side = 0;
            line = rest;
        } else if let Some(rest) = strip_marker(line, '+') {
            self.side = 1;
            line = rest;
        }
        let line = if self.ignore_space_change {
            line.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            line.to_string()
        };
        self.blocks[self.side].push(line);
    }

    fn flush(&mut self) -> Vec<String> {
        let [old, mut new] = std::mem::take(&mut self.blocks);
        self.side = 0;
        let trailing_blank = match new.last() {
            Some(last) if last.trim().is_empty() => new.pop(),
            _ => None,
        };
        let mut out = Vec::new();
        if !old.is_empty() || !new.is_empty() {
            out = unified_diff(&old, &new);
        }
        out.extend(trailing_blank);
        out
    }
}

/// Zero-context unified diff of two line lists.
fn unified_diff(old: &[String], new: &[String]) -> Vec<String> {
    let old: Vec<&str> = old.iter().map(String::as_str).collect();
    let new: Vec<&str> = new.iter().map(String::as_str).collect();
    let diff = TextDiff::from_slices(&old, &new);

    let groups = diff.grouped_ops(0);
    if groups.is_empty() {
        return Vec::new();
    }
    let mut out = vec!["--- Old externals".to_string(), "+++ New externals".to_string()];
    for group in &groups {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;
        out.push(format!(
            "@@ -{} +{} @@",
            hunk_range(old_range),
            hunk_range(new_range)
        ));
        for op in group {
            for change in diff.iter_changes(op) {
                let tag = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                out.push(format!("{tag}{}", change.value()));
            }
        }
    }
    out
}

fn hunk_range(range: std::ops::Range<usize>) -> String {
    let len = range.end - range.start;
    match len {
        0 => format!("{},0", range.start),
        1 => format!("{}", range.start + 1),
        _ => format!("{},{len}", range.start + 1),
    }
}

fn is_externals_header(line: &str) -> bool {
    line.starts_with("Name: svn:externals") || line.starts_with("Modified: svn:externals")
}

/// `## -1 +1,2 ##` position markers of newer clients.
fn is_hunk_marker(line: &str) -> bool {
    line.len() >= 6 && line.starts_with("## ") && line.ends_with(" ##")
}

/// `Name: ...`, `Index: ...`, and similar section headers.
fn is_property_header(line: &str) -> bool {
    let word_len = line
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    word_len > 0
        && line[word_len..].starts_with(':')
        && line[word_len + 1..].starts_with(char::is_whitespace)
}

/// Strips `<ws>- ` / `<ws>+ ` block markers.
fn strip_marker(line: &str, marker: char) -> Option<&str> {
    let rest = line.trim_start();
    if rest.len() == line.len() {
        return None;
    }
    rest.strip_prefix(marker)?.strip_prefix(' ')
}
