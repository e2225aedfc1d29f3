// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Separates client switches from positional arguments.
//!
//! ```text
//! --name=value     -> --name value
//! -rHEAD           -> -r HEAD       (one-argument short switch)
//! -qv              -> -q -v         (zero-argument short switches)
//! --ie             -> --ignore-externals
//! --editor-cmd X   -> lifted out as the editor override
//! --               -> everything after it is positional
//! ```

use std::collections::VecDeque;

/// Switches that consume the following argument.
const ONE_ARG_SWITCHES: &[&str] = &[
    "--accept",
    "--change",
    "--changelist",
    "--cl",
    "--config-dir",
    "--config-option",
    "--depth",
    "--diff-cmd",
    "--diff3-cmd",
    "--editor-cmd",
    "--encoding",
    "--extensions",
    "--file",
    "--limit",
    "--message",
    "--native-eol",
    "--new",
    "--old",
    "--password",
    "--revision",
    "--search",
    "--search-and",
    "--set-depth",
    "--show-item",
    "--show-revs",
    "--strip",
    "--targets",
    "--username",
    "--with-revprop",
    "-F",
    "-c",
    "-l",
    "-m",
    "-r",
    "-x",
];

/// Known switches without an argument. Anything unknown is treated the same
/// way but never split apart.
const ZERO_ARG_SWITCHES: &[&str] = &[
    "--adds-as-modification",
    "--allow-mixed-revisions",
    "--auto-props",
    "--diff",
    "--dry-run",
    "--force",
    "--force-interactive",
    "--force-log",
    "--git",
    "--help",
    "--human-readable",
    "--ignore-ancestry",
    "--ignore-externals",
    "--ignore-keywords",
    "--ignore-properties",
    "--ignore-whitespace",
    "--include-externals",
    "--incremental",
    "--internal-diff",
    "--keep-changelists",
    "--keep-local",
    "--log",
    "--no-auth-cache",
    "--no-auto-props",
    "--no-diff-added",
    "--no-diff-deleted",
    "--no-ignore",
    "--no-newline",
    "--no-unlock",
    "--non-interactive",
    "--non-recursive",
    "--notice-ancestry",
    "--parents",
    "--patch-compatible",
    "--pin-externals",
    "--properties-only",
    "--quiet",
    "--record-only",
    "--recursive",
    "--reintegrate",
    "--relocate",
    "--remove",
    "--remove-added",
    "--remove-ignored",
    "--remove-unversioned",
    "--reverse-diff",
    "--revprop",
    "--show-copies-as-adds",
    "--show-inherited-props",
    "--show-passwords",
    "--show-updates",
    "--stop-on-copy",
    "--strict",
    "--summarize",
    "--trust-server-cert",
    "--use-merge-history",
    "--vacuum-pristines",
    "--verbose",
    "--version",
    "--with-all-revprops",
    "--with-no-revprops",
    "--xml",
    "-?",
    "-H",
    "-N",
    "-R",
    "-g",
    "-q",
    "-u",
    "-v",
];

const IGNORE_EXTERNALS_ABBREV: &str = "--ie";
const EDITOR_CMD_SWITCH: &str = "--editor-cmd";
const END_OF_SWITCHES: &str = "--";

/// Whether `switch` consumes an argument.
#[must_use]
pub fn takes_argument(switch: &str) -> bool {
    ONE_ARG_SWITCHES.contains(&switch)
}

fn is_known_flag(switch: &str) -> bool {
    ZERO_ARG_SWITCHES.contains(&switch)
}

/// One switch with its argument, if it takes one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    pub name: String,
    pub value: Option<String>,
}

impl Switch {
    fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// Command line split into switches and positionals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub switches: Vec<Switch>,
    pub positionals: Vec<String>,
    /// Value of `--editor-cmd`, removed from `switches`.
    pub editor_cmd: Option<String>,
    /// `--` was seen; positionals after it must stay behind a `--`.
    pub end_marker: bool,
}

impl ParsedArgs {
    /// Whether switch `name` was given.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.switches.iter().any(|s| s.name == name)
    }

    /// Switches flattened back into client arguments.
    #[must_use]
    pub fn switch_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.switches.len() * 2);
        for switch in &self.switches {
            args.push(switch.name.clone());
            args.extend(switch.value.clone());
        }
        args
    }

    /// `positionals`, preceded by `--` when the user gave one.
    #[must_use]
    pub fn positional_args(&self, positionals: &[String]) -> Vec<String> {
        let marker = (self.end_marker && !positionals.is_empty()).then(|| END_OF_SWITCHES.to_string());
        marker.into_iter().chain(positionals.iter().cloned()).collect()
    }
}

/// Splits `args` (everything after the program name).
///
/// Never fails: a switch missing its argument is forwarded as is, and the
/// client reports the problem.
pub fn parse<I>(args: I) -> ParsedArgs
where
    I: IntoIterator<Item = String>,
{
    let mut queue: VecDeque<String> = args.into_iter().collect();
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = queue.pop_front() {
        if parsed.end_marker {
            parsed.positionals.push(arg);
            continue;
        }
        if arg == END_OF_SWITCHES {
            parsed.end_marker = true;
            continue;
        }
        if arg == IGNORE_EXTERNALS_ABBREV {
            queue.push_front("--ignore-externals".to_string());
            continue;
        }
        if arg == "-" || !arg.starts_with('-') {
            parsed.positionals.push(arg);
            continue;
        }

        let (name, attached) = if arg.starts_with("--") {
            match arg.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (arg, None),
            }
        } else {
            let split_at = arg.char_indices().nth(2).map_or(arg.len(), |(i, _)| i);
            let (name, rest) = arg.split_at(split_at);
            if rest.is_empty() {
                (arg, None)
            } else if takes_argument(name) {
                (name.to_string(), Some(rest.to_string()))
            } else if is_known_flag(name) && !rest.starts_with('-') {
                queue.push_front(format!("-{rest}"));
                (name.to_string(), None)
            } else {
                parsed.switches.push(Switch::flag(arg));
                continue;
            }
        };

        if !takes_argument(&name) {
            // `--flag=value` for a flag: let the client reject it.
            let name = match attached {
                Some(value) => format!("{name}={value}"),
                None => name,
            };
            parsed.switches.push(Switch::flag(name));
            continue;
        }

        let value = attached.or_else(|| queue.pop_front());
        if name == EDITOR_CMD_SWITCH
            && let Some(cmd) = value
        {
            parsed.editor_cmd = Some(cmd);
            continue;
        }
        parsed.switches.push(Switch { name, value });
    }
    parsed
}
