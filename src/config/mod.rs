// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for svnwrap.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. user config.toml ($XDG_CONFIG_HOME/svnwrap, ~/.config/svnwrap)
//! 3. --config FILE / SVNWRAP_CONFIG
//! ```
//!
//! # Example
//!
//! ```toml
//! [aliases]
//! proj = "https://server/SomeProject"
//!
//! [keywords.doc]
//! middle = "docs"
//!
//! [url]
//! infer_suffix = ["switch", "merge"]
//!
//! [suppress]
//! update = ['^Restored ']
//! ```
//!
//! Subversion's own per-user file is read separately (INI, `[helpers]`) and
//! only for the editor fallback.

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::url::keyword;

pub use loader::ConfigLoader;
pub use types::{EditorConfig, KeywordSpec, PagerConfig, UrlConfig};

/// Complete application configuration.
///
/// Built once at startup and passed by reference; never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `//name` URL prefixes.
    pub aliases: BTreeMap<String, String>,
    /// Keyword rules added to or replacing the built-ins.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub keywords: BTreeMap<String, KeywordSpec>,
    pub url: UrlConfig,
    pub pager: PagerConfig,
    pub editor: EditorConfig,
    /// Palette overrides: style name to `"fg[,bg]"`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub colors: BTreeMap<String, String>,
    /// Extra suppression patterns per canonical command.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub suppress: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use svnwrap_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("/home/me/.config/svnwrap/config.toml")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Loads the per-user file, then `explicit` on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error if any file is malformed or `explicit` is missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut loader = Self::builder().add_toml_file_optional(paths::config_file());
        if let Some(path) = explicit {
            loader = loader.add_toml_file(path);
        }
        for line in loader.format_loaded_files() {
            tracing::debug!("config source {line}");
        }
        loader.build()
    }

    /// Checks names and patterns that serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for a malformed alias or keyword name, a keyword
    /// without exactly one target, a name that is both alias and keyword, or
    /// a suppression pattern that is not a valid regex.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for name in self.aliases.keys() {
            if name.is_empty() || name.contains(['/', ':']) {
                return Err(ConfigError::InvalidValue {
                    section: "aliases".to_string(),
                    key: name.clone(),
                    message: "alias names must be non-empty and contain neither '/' nor ':'"
                        .to_string(),
                });
            }
        }
        for (name, spec) in &self.keywords {
            if name.chars().count() < 2 || !name.chars().all(|c| c.is_alphanumeric() || c == '_')
            {
                return Err(ConfigError::InvalidValue {
                    section: format!("keywords.{name}"),
                    key: name.clone(),
                    message: "keyword names need two or more word characters".to_string(),
                });
            }
            spec.validate(name)?;
        }
        if let Some(name) = self
            .aliases
            .keys()
            .find(|name| self.is_keyword_name(name))
        {
            return Err(ConfigError::AmbiguousMarker { name: name.clone() });
        }
        for (command, patterns) in &self.suppress {
            for pattern in patterns {
                regex::Regex::new(pattern).map_err(|e| ConfigError::InvalidValue {
                    section: "suppress".to_string(),
                    key: command.clone(),
                    message: e.to_string(),
                })?;
            }
        }
        Ok(())
    }

    fn is_keyword_name(&self, name: &str) -> bool {
        self.keywords.contains_key(name) || keyword::default_names().any(|k| k == name)
    }

    /// Format configuration options for display (`svn helpwrap`).
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        for (name, prefix) in &self.aliases {
            options.insert(format!("aliases.{name}"), prefix.clone());
        }
        for (name, spec) in &self.keywords {
            let value = match (&spec.head, &spec.middle, &spec.env) {
                (Some(head), _, _) => format!("head = {head}"),
                (_, Some(middle), _) => format!("middle = {middle}"),
                (_, _, Some(env)) => format!("env = {env}"),
                _ => String::new(),
            };
            options.insert(format!("keywords.{name}"), value);
        }
        options.insert("url.infer_suffix".into(), self.url.infer_suffix.join(", "));
        options.insert("pager.enabled".into(), self.pager.enabled.to_string());
        if let Some(cmd) = &self.pager.cmd {
            options.insert("pager.cmd".into(), cmd.clone());
        }
        if let Some(cmd) = &self.editor.cmd {
            options.insert("editor.cmd".into(), cmd.clone());
        }
        for (style, value) in &self.colors {
            options.insert(format!("colors.{style}"), value.clone());
        }

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

/// Reads `editor-cmd` from the `[helpers]` section of Subversion's per-user
/// configuration file.
///
/// A missing or unreadable file simply yields `None`.
#[must_use]
pub fn subversion_editor_cmd(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    let cfg = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Ini))
        .build()
        .inspect_err(|e| tracing::debug!("ignoring {}: {e}", path.display()))
        .ok()?;
    cfg.get_string("helpers.editor-cmd")
        .ok()
        .map(|cmd| cmd.trim().to_string())
        .filter(|cmd| !cmd.is_empty())
}
