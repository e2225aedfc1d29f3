// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the Process Orchestrator.
//!
//! A shell one-liner stands in for the client; output is collected in memory.

#![cfg(unix)]

use svnwrap_rs::core::process::ProcessBuilder;
use svnwrap_rs::output::{ColorScheme, LineFilter, Orchestrator, OutputMode, Profile, RuleSet, Sink};

fn filter(profile: Profile) -> LineFilter {
    LineFilter::new(RuleSet::new(profile, &[]).unwrap(), ColorScheme::default())
}

#[tokio::test]
async fn failing_client_exit_code_and_stderr_summary() {
    let process = ProcessBuilder::raw(
        "echo one; echo 'svn: E1' >&2; echo two; echo 'svn: E2' >&2; echo three; exit 1",
    );
    let mut sink = Sink::new(Vec::new(), Vec::new());

    let code = Orchestrator::new()
        .run(process, OutputMode::Filtered(filter(Profile::Plain)), &mut sink)
        .await
        .unwrap();

    let (out, err) = sink.into_inner();
    assert_eq!(code, 1);
    assert_eq!(String::from_utf8(out).unwrap(), "one\ntwo\nthree\n");
    insta::assert_snapshot!(String::from_utf8(err).unwrap().trim_end(), @r"
    svn: E1
    svn: E2
    Total svn stderr: 2 lines
    svn: E1
    svn: E2
    ");
}

#[tokio::test]
async fn noisy_update_lines_are_suppressed() {
    let process = ProcessBuilder::raw(concat!(
        r#"echo "Updating '.':"; echo "U    file.c"; echo "Updated to revision 8."; echo; "#,
        r#"echo "Fetching external item into 'ext':"; echo "External at revision 7.""#,
    ));
    let mut sink = Sink::new(Vec::new(), Vec::new());

    let code = Orchestrator::new()
        .run(process, OutputMode::Filtered(filter(Profile::Update)), &mut sink)
        .await
        .unwrap();

    let (out, err) = sink.into_inner();
    assert_eq!(code, 0);
    assert!(err.is_empty());
    insta::assert_snapshot!(String::from_utf8(out).unwrap().trim_end(), @r"
    Updating '.':
    U    file.c
    Updated to revision 8.
    ");
}

#[tokio::test]
async fn passthrough_leaves_sink_untouched() {
    let mut sink = Sink::new(Vec::new(), Vec::new());
    let code = Orchestrator::new()
        .run(
            ProcessBuilder::raw("printf 'Select: (p) postpone\\r(p) postpone, (df) show diff\\r'; exit 0"),
            OutputMode::Passthrough,
            &mut sink,
        )
        .await
        .unwrap();
    assert_eq!(code, 0);
    let (out, err) = sink.into_inner();
    assert!(out.is_empty() && err.is_empty());
}
