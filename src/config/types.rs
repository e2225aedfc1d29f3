// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! [keywords.rel]  head = "tags/release"     replace role segment
//! [keywords.ws]   middle = "workspace"      append to role segment
//! [keywords.pr]   env = "P"                 whole URL from $P
//! [url]           infer_suffix = [...]
//! [pager]         enabled, cmd
//! [editor]        cmd
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One `[keywords.<name>]` entry. Exactly one field must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordSpec {
    /// Path below the repository head that replaces the role segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
    /// Path appended to the current role segment (or `trunk`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    /// Environment variable holding a complete URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

impl KeywordSpec {
    /// Checks that exactly one target is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when zero or several targets are set.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let set = [&self.head, &self.middle, &self.env]
            .iter()
            .filter(|field| field.is_some())
            .count();
        if set == 1 {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                section: format!("keywords.{name}"),
                key: "head|middle|env".to_string(),
                message: format!("exactly one of head, middle or env must be set, found {set}"),
            })
        }
    }
}

/// URL handling options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UrlConfig {
    /// Commands for which a missing URL suffix is taken from the working copy.
    pub infer_suffix: Vec<String>,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            infer_suffix: vec!["switch".to_string(), "merge".to_string()],
        }
    }
}

/// Pager options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagerConfig {
    /// Set to false to never page.
    pub enabled: bool,
    /// Shell command for the pager; `SVN_PAGER` and `PAGER` are consulted
    /// when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cmd: None,
        }
    }
}

/// Editor options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Explicit editor command; wins over every environment variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
}
