// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::global::ColorChoice;
use crate::cli::{EntryPoint, parse_from};
use crate::logging::LogLevel;

fn wrapper(argv: &[&str]) -> crate::cli::Cli {
    match parse_from(argv).unwrap() {
        EntryPoint::Wrapper(cli) => cli,
        EntryPoint::EditorProxy(files) => panic!("unexpected editor proxy for {files:?}"),
    }
}

#[test]
fn test_wrapper_options_before_subcommand() {
    let cli = wrapper(&["svnwrap", "--color", "off", "--no-pager", "--svn", "/opt/svn", "st", "-q"]);
    assert_eq!(cli.global.color, ColorChoice::Off);
    assert!(cli.global.no_pager);
    assert_eq!(cli.global.svn, Some(PathBuf::from("/opt/svn")));
    assert_eq!(cli.args, ["st", "-q"]);
}

#[test]
fn test_client_help_and_version_reach_client() {
    let cli = wrapper(&["svnwrap", "--version"]);
    assert_eq!(cli.args, ["--version"]);

    let cli = wrapper(&["svnwrap", "help", "--help"]);
    assert_eq!(cli.args, ["help", "--help"]);

    let cli = wrapper(&["svnwrap", "log", "--color", "on"]);
    assert_eq!(cli.global.color, ColorChoice::Auto);
    assert_eq!(cli.args, ["log", "--color", "on"]);
}

#[test]
fn test_editor_proxy_entry() {
    let entry = parse_from(["svnwrap", "--editor-proxy", "svn-commit.tmp"]).unwrap();
    assert!(matches!(entry, EntryPoint::EditorProxy(files) if files == ["svn-commit.tmp"]));
}

#[test]
fn test_bad_wrapper_option() {
    assert!(parse_from(["svnwrap", "--color", "sometimes", "st"]).is_err());
    assert!(parse_from(["svnwrap", "--log-level", "9"]).is_err());
}

#[test]
fn test_log_config() {
    let cli = wrapper(&["svnwrap", "--debug", "st"]);
    assert_eq!(cli.global.log_config().console_level(), LogLevel::DEBUG);

    let cli = wrapper(&["svnwrap", "--debug", "--log-level", "1", "--log-file", "/tmp/svnwrap.log"]);
    let config = cli.global.log_config();
    assert_eq!(config.console_level(), LogLevel::ERROR);
    assert_eq!(config.log_file(), Some("/tmp/svnwrap.log"));

    let cli = wrapper(&["svnwrap", "up"]);
    assert_eq!(cli.global.log_config().console_level(), LogLevel::WARN);
}
