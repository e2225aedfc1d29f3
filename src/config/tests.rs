// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write;
use std::path::PathBuf;

use super::paths::{config_dir_with, subversion_config_with};
use super::{Config, ConfigLoader, subversion_editor_cmd};
use crate::error::ConfigError;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.aliases.is_empty());
    assert_eq!(config.url.infer_suffix, ["switch", "merge"]);
    assert!(config.pager.enabled);
    assert!(config.pager.cmd.is_none());
    assert!(config.editor.cmd.is_none());
}

#[test]
fn test_parse_full_config() {
    let config = Config::parse(
        r#"
        [aliases]
        proj = "http://server/Project"

        [keywords.doc]
        middle = "docs"

        [url]
        infer_suffix = ["switch"]

        [pager]
        enabled = false

        [editor]
        cmd = "vim -u NONE"

        [colors]
        conflict = "lightwhite,darkred"

        [suppress]
        update = ['^Restored ']
        "#,
    )
    .unwrap();

    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    aliases.proj     = http://server/Project
    colors.conflict  = lightwhite,darkred
    editor.cmd       = vim -u NONE
    keywords.doc     = middle = docs
    pager.enabled    = false
    url.infer_suffix = switch
    ");
}

#[test]
fn test_unknown_section_rejected() {
    assert!(Config::parse("[bogus]\nx = 1\n").is_err());
}

#[test]
fn test_alias_name_validation() {
    let err = Config::parse("[aliases]\n\"a/b\" = \"http://x\"\n").unwrap_err();
    assert!(err.to_string().contains("alias names"));
}

#[test]
fn test_keyword_needs_one_target() {
    let err = Config::parse("[keywords.doc]\nhead = \"docs\"\nmiddle = \"x\"\n").unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().unwrap();
    assert!(matches!(config_err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_alias_keyword_collision_is_ambiguous() {
    let err = Config::parse("[aliases]\ntr = \"http://x\"\n").unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().unwrap();
    assert!(matches!(config_err, ConfigError::AmbiguousMarker { name } if name == "tr"));
}

#[test]
fn test_bad_suppress_regex() {
    let err = Config::parse("[suppress]\nstatus = ['(']\n").unwrap_err();
    assert!(err.to_string().contains("[suppress]"));
}

#[test]
fn test_loader_layers_files() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.toml");
    let over = dir.path().join("over.toml");
    std::fs::write(&base, "[aliases]\nproj = \"http://a\"\nlib = \"http://lib\"\n").unwrap();
    std::fs::write(&over, "[aliases]\nproj = \"http://b\"\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(&base)
        .add_toml_file_optional(dir.path().join("missing.toml"))
        .add_toml_file(&over);
    assert_eq!(loader.loaded_files().len(), 2);

    let config = loader.build().unwrap();
    assert_eq!(config.aliases["proj"], "http://b");
    assert_eq!(config.aliases["lib"], "http://lib");
}

#[test]
fn test_required_file_missing() {
    assert!(Config::from_file("/nonexistent/svnwrap.toml").is_err());
}

#[test]
fn test_config_dir_precedence() {
    let home_only = config_dir_with(|name| (name == "HOME").then(|| "/home/u".to_string()));
    if !cfg!(windows) {
        assert_eq!(home_only, PathBuf::from("/home/u/.config/svnwrap"));
    }

    let xdg = config_dir_with(|name| match name {
        "HOME" => Some("/home/u".to_string()),
        "XDG_CONFIG_HOME" => Some("/xdg".to_string()),
        _ => None,
    });
    assert_eq!(xdg, PathBuf::from("/xdg/svnwrap"));
}

#[test]
fn test_subversion_config_path() {
    let path = subversion_config_with(|name| match name {
        "HOME" => Some("/home/u".to_string()),
        "APPDATA" => Some("/appdata".to_string()),
        _ => None,
    });
    if cfg!(windows) {
        assert!(path.ends_with("Subversion/config"));
    } else {
        assert_eq!(path, PathBuf::from("/home/u/.subversion/config"));
    }
}

#[test]
fn test_subversion_editor_cmd() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[auth]\nstore-passwords = no\n\n[helpers]\neditor-cmd = nano -w\n").unwrap();
    assert_eq!(subversion_editor_cmd(file.path()).as_deref(), Some("nano -w"));

    let mut empty = tempfile::NamedTempFile::new().unwrap();
    writeln!(empty, "[helpers]\n").unwrap();
    assert_eq!(subversion_editor_cmd(empty.path()), None);

    assert_eq!(subversion_editor_cmd(std::path::Path::new("/nonexistent/config")), None);
}
