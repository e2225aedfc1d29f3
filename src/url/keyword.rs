// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Keyword rules (`tr:`, `tag:`, ...).
//!
//! ```text
//! keyword   target                 prefix + keyword becomes
//! -------   ---------------------  ---------------------------------
//! tr        Head(trunk)            <head>/trunk
//! br        Head(branches)         <head>/branches
//! tag       Head(tags)             <head>/tags
//! rel       Head(tags/release)     <head>/tags/release
//! gb        Head(branches/guests)  <head>/branches/guests
//! gt        Head(tags/guests)      <head>/tags/guests
//! mb        Head(.../{user})       <head>/branches/guests/$USER
//! mt        Head(.../{user})       <head>/tags/guests/$USER
//! ws        Middle(workspace)      <head>/<middle-or-trunk>/workspace
//! pr        Env(P)                 $P
//! pp        Env(PP)                $PP
//! ```

use std::collections::BTreeMap;

use super::split::is_word;
use crate::config::types::KeywordSpec;

/// Placeholder replaced by the current user name.
pub const USER_PLACEHOLDER: &str = "{user}";

/// What a keyword expands to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordTarget {
    /// Replace the role segment with this path below the head.
    Head(String),
    /// Append this path to the current role segment (or `trunk`).
    Middle(String),
    /// Use the whole URL stored in this environment variable.
    Env(String),
}

impl KeywordTarget {
    /// Target named by a configuration entry, if it names exactly one.
    #[must_use]
    pub fn from_spec(spec: &KeywordSpec) -> Option<Self> {
        match (&spec.head, &spec.middle, &spec.env) {
            (Some(head), None, None) => Some(Self::Head(head.clone())),
            (None, Some(middle), None) => Some(Self::Middle(middle.clone())),
            (None, None, Some(env)) => Some(Self::Env(env.clone())),
            _ => None,
        }
    }
}

const DEFAULT_RULES: [(&str, Builtin); 11] = [
    ("tr", Builtin::Head("trunk")),
    ("br", Builtin::Head("branches")),
    ("tag", Builtin::Head("tags")),
    ("rel", Builtin::Head("tags/release")),
    ("gb", Builtin::Head("branches/guests")),
    ("gt", Builtin::Head("tags/guests")),
    ("mb", Builtin::Head("branches/guests/{user}")),
    ("mt", Builtin::Head("tags/guests/{user}")),
    ("ws", Builtin::Middle("workspace")),
    ("pr", Builtin::Env("P")),
    ("pp", Builtin::Env("PP")),
];

#[derive(Clone, Copy)]
enum Builtin {
    Head(&'static str),
    Middle(&'static str),
    Env(&'static str),
}

/// Names of the built-in keywords.
pub fn default_names() -> impl Iterator<Item = &'static str> {
    DEFAULT_RULES.iter().map(|(name, _)| *name)
}

/// A keyword occurrence inside a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch<'a> {
    /// Text before the keyword; empty or ending in `/`.
    pub before: &'a str,
    pub name: &'a str,
    /// Text after the colon.
    pub after: &'a str,
    pub target: &'a KeywordTarget,
}

/// Immutable keyword table for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    rules: BTreeMap<String, KeywordTarget>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(name, rule)| {
                let target = match *rule {
                    Builtin::Head(path) => KeywordTarget::Head(path.to_string()),
                    Builtin::Middle(path) => KeywordTarget::Middle(path.to_string()),
                    Builtin::Env(var) => KeywordTarget::Env(var.to_string()),
                };
                ((*name).to_string(), target)
            })
            .collect();
        Self { rules }
    }
}

impl KeywordTable {
    /// Built-in rules overlaid with configured ones.
    ///
    /// Specs that do not name exactly one target are skipped; configuration
    /// validation rejects them before this point.
    #[must_use]
    pub fn with_overrides(specs: &BTreeMap<String, KeywordSpec>) -> Self {
        let mut table = Self::default();
        for (name, spec) in specs {
            if let Some(target) = KeywordTarget::from_spec(spec) {
                table.rules.insert(name.clone(), target);
            }
        }
        table
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&KeywordTarget> {
        self.rules.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Finds the leftmost registered keyword at a path boundary.
    ///
    /// A keyword is two or more word characters followed by `:`, sitting at
    /// the start of the token or right after a `/`, and the text after the
    /// colon must not start with `//` (that would be a URL scheme).
    /// Keyword-shaped words that are not registered are skipped.
    #[must_use]
    pub fn find<'a>(&'a self, token: &'a str) -> Option<KeywordMatch<'a>> {
        let mut starts = std::iter::once(0).chain(token.match_indices('/').map(|(i, _)| i + 1));
        starts.find_map(|start| {
            let rest = &token[start..];
            let word: usize = rest
                .chars()
                .take_while(|&c| is_word(c))
                .map(char::len_utf8)
                .sum();
            if rest[..word].chars().count() < 2 {
                return None;
            }
            let after = rest[word..].strip_prefix(':')?;
            if after.starts_with("//") {
                return None;
            }
            let name = &rest[..word];
            self.rules.get(name).map(|target| KeywordMatch {
                before: &token[..start],
                name,
                after,
                target,
            })
        })
    }
}
