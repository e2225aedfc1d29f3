// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-user configuration locations.
//!
//! ```text
//! wrapper:    $XDG_CONFIG_HOME/svnwrap/config.toml
//!             (else %APPDATA% on Windows, else ~/.config)
//! subversion: ~/.subversion/config
//!             (%APPDATA%\Subversion\config on Windows)
//! ```
//!
//! System-wide locations are never consulted.

use std::path::PathBuf;

/// File name of the wrapper configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory holding the wrapper configuration, computed from `lookup`.
pub fn config_dir_with<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let home = lookup("HOME").unwrap_or_default();
    let mut config_home = PathBuf::from(home).join(".config");
    if cfg!(windows)
        && let Some(appdata) = lookup("APPDATA")
    {
        config_home = PathBuf::from(appdata);
    }
    if let Some(xdg) = lookup("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        config_home = PathBuf::from(xdg);
    }
    config_home.join("svnwrap")
}

/// Subversion's per-user runtime configuration file, computed from `lookup`.
pub fn subversion_config_with<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if cfg!(windows) {
        PathBuf::from(lookup("APPDATA").unwrap_or_default())
            .join("Subversion")
            .join("config")
    } else {
        PathBuf::from(lookup("HOME").unwrap_or_default())
            .join(".subversion")
            .join("config")
    }
}

/// The wrapper configuration file for the current user.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir_with(env_lookup).join(CONFIG_FILE_NAME)
}

/// Subversion's configuration file for the current user.
#[must_use]
pub fn subversion_config_file() -> PathBuf {
    subversion_config_with(env_lookup)
}

/// Reads an environment variable, treating non-UTF-8 values as unset.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
