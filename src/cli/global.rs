// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Options the wrapper consumes itself.
//!
//! ```text
//! --svn PATH        client executable (default: `svn` on PATH)
//! --color WHEN      on | off | auto
//! --no-pager        never start a pager
//! --debug           console log level debug
//! --log-level N     console verbosity (0-6), wins over --debug
//! --log-file FILE   additional log file (trace level)
//! --config FILE     configuration file on top of the per-user one
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::logging::{LogConfig, LogLevel};

/// When to color output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    On,
    Off,
    /// Color when stdout is a terminal.
    #[default]
    Auto,
}

impl ColorChoice {
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            Self::On => true,
            Self::Off => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Wrapper options, accepted before the subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to the svn client.
    #[arg(long = "svn", value_name = "PATH")]
    pub svn: Option<PathBuf>,

    /// Use color in output.
    #[arg(long = "color", value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Disables the automatic use of a pager.
    #[arg(long = "no-pager")]
    pub no_pager: bool,

    /// Enables debug logging.
    #[arg(long)]
    pub debug: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6))]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Configuration file read on top of the per-user one.
    #[arg(long = "config", value_name = "FILE", env = "SVNWRAP_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Logging setup for these options.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        let fallback = if self.debug { LogLevel::DEBUG } else { LogLevel::WARN };
        let console_level = self
            .log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or(fallback);

        LogConfig::builder()
            .with_console_level(console_level)
            .maybe_with_log_file(self.log_file.as_ref().map(|p| p.display().to_string()))
            .build()
    }
}
