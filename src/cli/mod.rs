// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! svnwrap [wrapper options] [svn subcommand] [svn args...]
//! svnwrap --editor-proxy FILE...        (started by the client, not users)
//! ```
//!
//! Wrapper options are only recognised before the subcommand; everything
//! from the first other argument on goes to the Command Builder untouched.
//! clap's own `--help`/`--version` are disabled so the client answers them.

pub mod global;

#[cfg(test)]
mod tests;

use std::ffi::OsString;

use clap::Parser;

use crate::cli::global::GlobalOptions;
use crate::editor::EDITOR_PROXY_FLAG;

/// Subversion command wrapper.
#[derive(Debug, Parser)]
#[command(
    name = "svnwrap",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Wrapper options.
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Subcommand and arguments for the client.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// How the program was started.
#[derive(Debug)]
pub enum EntryPoint {
    Wrapper(Cli),
    /// The client asked for an editor on these files.
    EditorProxy(Vec<String>),
}

/// Parses the process's own command line.
///
/// # Errors
///
/// Returns a `clap::Error` for a malformed wrapper option.
pub fn parse() -> Result<EntryPoint, clap::Error> {
    parse_from(std::env::args_os())
}

/// Parses `argv` (program name first).
///
/// # Errors
///
/// Returns a `clap::Error` for a malformed wrapper option.
pub fn parse_from<I, T>(argv: I) -> Result<EntryPoint, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    if argv.get(1).is_some_and(|arg| arg == EDITOR_PROXY_FLAG) {
        let files = argv[2..]
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        return Ok(EntryPoint::EditorProxy(files));
    }
    Cli::try_parse_from(argv).map(EntryPoint::Wrapper)
}
