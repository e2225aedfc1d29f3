// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ordered pattern/action tables for client stdout.
//!
//! ```text
//! Profile ──► built-in table ──┐
//! [suppress] <command> ────────┴─► RuleSet (extras first)
//!
//! RuleEngine::classify(line)
//!   first matching rule wins, no match = Normal
//!   Suppress              ──► Suppressed
//!   ConditionalSuppress   ──► held until a visible line follows
//!                             (replaced by the next held line, dropped at EOF)
//!   Pass                  ──► Normal
//!   Highlight(key)        ──► Highlighted(key)
//!   Conflict / LogHeader  ──► Conflict / LogHeader
//! ```

use regex::Regex;

use super::line::{LineClass, StreamLine};
use super::style::StyleKey;
use crate::core::process::Source;
use crate::error::ConfigError;

/// Output treatment selected by the subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Status,
    /// `update` and `switch`.
    Update,
    Checkout,
    Diff,
    Log,
    /// No built-in rules.
    Plain,
}

impl Profile {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Update => "update",
            Self::Checkout => "checkout",
            Self::Diff => "diff",
            Self::Log => "log",
            Self::Plain => "plain",
        }
    }

    const fn table(self) -> &'static [(&'static str, Action)] {
        match self {
            Self::Status => STATUS_RULES,
            Self::Update => UPDATE_RULES,
            Self::Checkout => CHECKOUT_RULES,
            Self::Diff => DIFF_RULES,
            Self::Log => LOG_RULES,
            Self::Plain => &[],
        }
    }
}

/// What happens to a line a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Suppress,
    ConditionalSuppress,
    Pass,
    Highlight(StyleKey),
    Conflict,
    LogHeader,
}

const STATUS_COLUMN_RULES: [(&str, Action); 8] = [
    (
        r"^(Checked out|Updated to revision|At revision)",
        Action::Highlight(StyleKey::Status),
    ),
    ("^A", Action::Highlight(StyleKey::StatusAdded)),
    ("^D", Action::Highlight(StyleKey::StatusDeleted)),
    ("^U", Action::Highlight(StyleKey::StatusUpdated)),
    ("^C", Action::Conflict),
    ("^M", Action::Highlight(StyleKey::StatusModified)),
    ("^G", Action::Highlight(StyleKey::StatusMerged)),
    (r"^\?", Action::Highlight(StyleKey::StatusUntracked)),
];

const STATUS_RULES: &[(&str, Action)] = &[
    ("^Performing status", Action::ConditionalSuppress),
    (r"^\s*$", Action::Suppress),
    (r"^X[ \t]", Action::Suppress),
    STATUS_COLUMN_RULES[0],
    STATUS_COLUMN_RULES[1],
    STATUS_COLUMN_RULES[2],
    STATUS_COLUMN_RULES[3],
    STATUS_COLUMN_RULES[4],
    STATUS_COLUMN_RULES[5],
    STATUS_COLUMN_RULES[6],
    STATUS_COLUMN_RULES[7],
];

const UPDATE_RULES: &[(&str, Action)] = &[
    ("^Fetching external", Action::ConditionalSuppress),
    ("^External |^Updated external", Action::Suppress),
    (r"^\s*$", Action::Suppress),
    ("^At revision", Action::Suppress),
    STATUS_COLUMN_RULES[0],
    STATUS_COLUMN_RULES[1],
    STATUS_COLUMN_RULES[2],
    STATUS_COLUMN_RULES[3],
    STATUS_COLUMN_RULES[4],
    STATUS_COLUMN_RULES[5],
    STATUS_COLUMN_RULES[6],
    STATUS_COLUMN_RULES[7],
];

const CHECKOUT_RULES: &[(&str, Action)] = &[
    ("^Fetching external", Action::ConditionalSuppress),
    (r"^\s*$", Action::Suppress),
    STATUS_COLUMN_RULES[0],
    STATUS_COLUMN_RULES[1],
    STATUS_COLUMN_RULES[2],
    STATUS_COLUMN_RULES[3],
    STATUS_COLUMN_RULES[4],
    STATUS_COLUMN_RULES[5],
    STATUS_COLUMN_RULES[6],
    STATUS_COLUMN_RULES[7],
];

const DIFF_RULES: &[(&str, Action)] = &[
    (r"^\+", Action::Highlight(StyleKey::DiffAdd)),
    ("^-", Action::Highlight(StyleKey::DiffRemoved)),
    ("^@", Action::Highlight(StyleKey::DiffMisc)),
];

const LOG_RULES: &[(&str, Action)] = &[
    (r"^r\d+ \| .* \| .* \| \d+ lines?$", Action::LogHeader),
    ("^-{72}$", Action::Highlight(StyleKey::LogSeparator)),
    ("", Action::Highlight(StyleKey::LogText)),
];

/// One compiled pattern and its action.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    action: Action,
}

impl Rule {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex error for an invalid pattern.
    pub fn new(pattern: &str, action: Action) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            action,
        })
    }

    #[must_use]
    pub const fn action(&self) -> Action {
        self.action
    }
}

/// The ordered rules for one command.
#[derive(Debug, Clone)]
pub struct RuleSet {
    profile: Profile,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Builds the table for `profile` with `extra_suppress` patterns ahead of
    /// the built-in rules.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a pattern does not compile.
    pub fn new(profile: Profile, extra_suppress: &[String]) -> Result<Self, ConfigError> {
        let compile = |pattern: &str, action: Action| {
            Rule::new(pattern, action).map_err(|e| ConfigError::InvalidValue {
                section: "suppress".to_string(),
                key: profile.name().to_string(),
                message: e.to_string(),
            })
        };
        let mut rules = Vec::with_capacity(extra_suppress.len() + profile.table().len());
        for pattern in extra_suppress {
            rules.push(compile(pattern, Action::Suppress)?);
        }
        for &(pattern, action) in profile.table() {
            rules.push(compile(pattern, action)?);
        }
        Ok(Self { profile, rules })
    }

    #[must_use]
    pub const fn profile(&self) -> Profile {
        self.profile
    }

    /// Action of the first rule matching `line`.
    #[must_use]
    pub fn action_for(&self, line: &str) -> Option<Action> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(line))
            .map(Rule::action)
    }
}

/// Applies a [`RuleSet`] to a stream of stdout lines.
#[derive(Debug)]
pub struct RuleEngine {
    rules: RuleSet,
    held: Option<StreamLine>,
}

impl RuleEngine {
    #[must_use]
    pub const fn new(rules: RuleSet) -> Self {
        Self { rules, held: None }
    }

    /// Classifies one complete line.
    ///
    /// The result may also carry an earlier held line: visible when `text`
    /// is visible, suppressed when `text` replaces it.
    pub fn classify(&mut self, text: String, seq: u64) -> Vec<StreamLine> {
        let class = match self.rules.action_for(&text) {
            None | Some(Action::Pass) => LineClass::Normal,
            Some(Action::Suppress) => LineClass::Suppressed,
            Some(Action::Highlight(key)) => LineClass::Highlighted(key),
            Some(Action::Conflict) => LineClass::Conflict,
            Some(Action::LogHeader) => LineClass::LogHeader,
            Some(Action::ConditionalSuppress) => {
                let line = StreamLine {
                    text,
                    source: Source::Stdout,
                    seq,
                    class: LineClass::Normal,
                };
                return self.hold(line).into_iter().collect();
            }
        };

        let line = StreamLine {
            text,
            source: Source::Stdout,
            seq,
            class,
        };
        if line.is_visible() {
            self.release().into_iter().chain([line]).collect()
        } else {
            vec![line]
        }
    }

    /// Emits the held line, if any, as visible output.
    pub fn release(&mut self) -> Option<StreamLine> {
        self.held.take()
    }

    /// Drops the held line at end of output.
    pub fn finish(&mut self) -> Option<StreamLine> {
        self.held.take().map(|mut line| {
            line.class = LineClass::Suppressed;
            line
        })
    }

    fn hold(&mut self, line: StreamLine) -> Option<StreamLine> {
        self.held.replace(line).map(|mut previous| {
            previous.class = LineClass::Suppressed;
            previous
        })
    }
}
