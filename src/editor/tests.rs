// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use super::*;
use crate::error::WrapError;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

const NO_SVN_CONFIG: &str = "/nonexistent/.subversion/config";

#[test]
fn test_override_wins() {
    let choice = determine_editor(
        Some("code --wait"),
        lookup(&[("SVN_EDITOR", "vi")]),
        Path::new(NO_SVN_CONFIG),
    )
    .unwrap();
    assert_eq!(choice.command, "code --wait");
    assert_eq!(choice.source, EditorSource::Override);
}

#[test]
fn test_environment_order() {
    let env = lookup(&[("VISUAL", "emacs"), ("EDITOR", "nano")]);
    let choice = determine_editor(None, env, Path::new(NO_SVN_CONFIG)).unwrap();
    assert_eq!(choice.command, "emacs");
    assert_eq!(choice.source, EditorSource::Environment("VISUAL"));

    let env = lookup(&[("SVN_EDITOR", "vim"), ("VISUAL", "emacs")]);
    let choice = determine_editor(None, env, Path::new(NO_SVN_CONFIG)).unwrap();
    assert_eq!(choice.source, EditorSource::Environment("SVN_EDITOR"));
}

#[test]
fn test_proxy_editor_variable_is_skipped() {
    let env = lookup(&[
        ("SVN_EDITOR", "/usr/bin/svnwrap --editor-proxy"),
        ("EDITOR", "nano"),
    ]);
    let choice = determine_editor(None, env, Path::new(NO_SVN_CONFIG)).unwrap();
    assert_eq!(choice.command, "nano");
}

#[test]
fn test_subversion_config_before_generic_variables() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[helpers]\neditor-cmd = joe").unwrap();

    let env = lookup(&[("VISUAL", "emacs"), ("EDITOR", "nano")]);
    let choice = determine_editor(None, env, file.path()).unwrap();
    assert_eq!(choice.command, "joe");
    assert_eq!(choice.source, EditorSource::SubversionConfig);

    let env = lookup(&[("SVN_EDITOR", "vim"), ("VISUAL", "emacs")]);
    let choice = determine_editor(None, env, file.path()).unwrap();
    assert_eq!(choice.command, "vim");
    assert_eq!(choice.source, EditorSource::Environment("SVN_EDITOR"));
}

#[test]
fn test_no_editor_anywhere() {
    assert_eq!(determine_editor(None, lookup(&[]), Path::new(NO_SVN_CONFIG)), None);
}

#[test]
fn test_redirect_env() {
    let choice = EditorChoice {
        command: "vim".to_string(),
        source: EditorSource::Environment("EDITOR"),
    };
    let redirect = EditorRedirect::prepare(Path::new("/opt/my tools/svnwrap"), Some(choice));
    assert_eq!(
        redirect.env_vars(),
        [
            ("SVN_EDITOR", Some("\"/opt/my tools/svnwrap\" --editor-proxy".to_string())),
            ("SVNWRAP_REAL_EDITOR", Some("vim".to_string())),
        ]
    );

    let redirect = EditorRedirect::prepare(Path::new("/usr/bin/svnwrap"), None);
    assert_eq!(redirect.proxy_command(), "/usr/bin/svnwrap --editor-proxy");
    assert_eq!(redirect.real_editor(), None);
}

#[test]
fn test_invocation_needs_editor() {
    let err = EditorInvocation::from_env(
        vec!["svn-commit.tmp".to_string()],
        lookup(&[]),
        Path::new(NO_SVN_CONFIG),
    )
    .unwrap_err();
    assert!(matches!(err, WrapError::Editor(_)));
    assert!(err.to_string().contains(NO_SVN_CONFIG), "{err}");
}

#[cfg(unix)]
#[test]
fn test_invocation_command() {
    let invocation = EditorInvocation::from_env(
        vec!["svn-commit.tmp".to_string()],
        lookup(&[("SVNWRAP_REAL_EDITOR", "vim -u NONE")]),
        Path::new(NO_SVN_CONFIG),
    )
    .unwrap();
    assert_eq!(invocation.editor(), "vim -u NONE");
    assert_eq!(
        invocation.command().args_slice(),
        ["-c", "vim -u NONE \"$@\"", "sh", "svn-commit.tmp"]
    );
}
