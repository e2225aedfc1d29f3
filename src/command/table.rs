// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Subcommand names, aliases, and output treatment.

use bitflags::bitflags;

use crate::output::Profile;

bitflags! {
    /// How a subcommand is run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CommandTraits: u8 {
        /// Client owns the terminal; nothing is filtered.
        const PASSTHROUGH = 0x01;
        /// Output goes through the pager when stdout is a terminal.
        const PAGED = 0x02;
    }
}

/// One client subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub profile: Profile,
    pub traits: CommandTraits,
    /// Leading positionals that are property names or values, never URLs.
    pub unmapped_positionals: usize,
}

const fn spec(
    name: &'static str,
    aliases: &'static [&'static str],
    profile: Profile,
    traits: CommandTraits,
) -> CommandSpec {
    CommandSpec {
        name,
        aliases,
        profile,
        traits,
        unmapped_positionals: 0,
    }
}

const fn plain(name: &'static str, aliases: &'static [&'static str]) -> CommandSpec {
    spec(name, aliases, Profile::Plain, CommandTraits::empty())
}

const fn property(name: &'static str, aliases: &'static [&'static str], unmapped: usize) -> CommandSpec {
    CommandSpec {
        unmapped_positionals: unmapped,
        ..plain(name, aliases)
    }
}

const PASSTHROUGH: CommandTraits = CommandTraits::PASSTHROUGH;
const PAGED: CommandTraits = CommandTraits::PAGED;

/// Client subcommands plus the wrapper's own diff variants.
pub const COMMANDS: &[CommandSpec] = &[
    plain("add", &[]),
    plain("auth", &[]),
    plain("blame", &["praise", "annotate", "ann"]),
    spec("cat", &[], Profile::Plain, PASSTHROUGH),
    plain("changelist", &["cl"]),
    spec("checkout", &["co"], Profile::Checkout, CommandTraits::empty()),
    plain("cleanup", &[]),
    plain("commit", &["ci"]),
    plain("copy", &["cp"]),
    plain("delete", &["del", "remove", "rm"]),
    spec("diff", &["di", "ediff"], Profile::Diff, PAGED),
    plain("export", &[]),
    spec("help", &["?", "h"], Profile::Plain, PAGED),
    plain("import", &[]),
    plain("info", &[]),
    plain("list", &["ls"]),
    plain("lock", &[]),
    spec("log", &[], Profile::Log, PAGED),
    spec("merge", &[], Profile::Plain, PASSTHROUGH),
    plain("mergeinfo", &[]),
    plain("mkdir", &[]),
    plain("move", &["mv", "rename", "ren"]),
    plain("patch", &[]),
    property("propdel", &["pdel", "pd"], 1),
    property("propedit", &["pedit", "pe"], 1),
    property("propget", &["pget", "pg"], 1),
    plain("proplist", &["plist", "pl"]),
    property("propset", &["pset", "ps"], 2),
    plain("relocate", &[]),
    spec("resolve", &[], Profile::Plain, PASSTHROUGH),
    plain("resolved", &[]),
    plain("revert", &[]),
    spec("status", &["stat", "st"], Profile::Status, CommandTraits::empty()),
    spec("switch", &["sw"], Profile::Update, CommandTraits::empty()),
    plain("unlock", &[]),
    spec("update", &["up"], Profile::Update, CommandTraits::empty()),
    plain("upgrade", &[]),
    spec("bdiff", &["ebdiff"], Profile::Diff, PAGED),
    spec("pdiff", &[], Profile::Diff, PAGED),
    spec("kdiff3", &["kdiff"], Profile::Plain, PASSTHROUGH),
];

/// Looks up a subcommand by name or alias.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|spec| spec.name == name || spec.aliases.contains(&name))
}

/// Canonical name of `name`; unknown names are returned unchanged.
#[must_use]
pub fn canonical(name: &str) -> &str {
    lookup(name).map_or(name, |spec| spec.name)
}
