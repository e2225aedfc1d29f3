// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::io::Write;

use svnwrap_rs::config::Config;
use svnwrap_rs::output::{ColorScheme, RuleSet};

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_empty_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert!(config.aliases.is_empty());
    assert_eq!(config.url.infer_suffix, ["switch", "merge"]);
    assert!(config.pager.enabled);
    assert_eq!(config.editor.cmd, None);
}

#[test]
fn config_parse_full() {
    let toml = r#"
[aliases]
proj = "https://server/SomeProject"

[keywords.rc]
head = "tags/candidates"

[pager]
enabled = false

[editor]
cmd = "vim"

[colors]
warning = "lightred"

[suppress]
status = ["^Performing"]
"#;
    let config = Config::parse(toml).unwrap();
    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    aliases.proj     = https://server/SomeProject
    colors.warning   = lightred
    editor.cmd       = vim
    keywords.rc      = head = tags/candidates
    pager.enabled    = false
    url.infer_suffix = switch, merge
    ");

    let scheme = ColorScheme::with_overrides(&config.colors).unwrap();
    assert!(!scheme.is_enabled());
    let extra = &config.suppress["status"];
    assert!(RuleSet::new(svnwrap_rs::output::Profile::Status, extra).is_ok());
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn config_rejects_alias_that_is_a_keyword() {
    let err = Config::parse(
        r#"
[aliases]
tr = "http://elsewhere"
"#,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("tr"), "{err:#}");
}

#[test]
fn config_rejects_bad_suppress_pattern() {
    assert!(Config::parse("[suppress]\nstatus = [\"(\"]\n").is_err());
}

#[test]
fn config_rejects_unknown_section() {
    assert!(Config::parse("[nope]\nx = 1\n").is_err());
}

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn config_explicit_file_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[aliases]\nproj = \"http://server/Project\"").unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.aliases["proj"], "http://server/Project");
}

#[test]
fn config_missing_explicit_file_is_error() {
    assert!(Config::load(Some(std::path::Path::new("/nonexistent/svnwrap.toml"))).is_err());
}
