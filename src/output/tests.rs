// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use tokio::sync::mpsc;

use super::externals::ExternalsDiffer;
use super::sink::{DEFAULT_PAGER, pager_command};
use super::*;
use crate::config::PagerConfig;
use crate::core::process::ChunkKind;
use crate::error::ConfigError;

fn engine(profile: Profile) -> RuleEngine {
    RuleEngine::new(RuleSet::new(profile, &[]).unwrap())
}

fn classify_all(engine: &mut RuleEngine, lines: &[&str]) -> Vec<StreamLine> {
    let mut out = Vec::new();
    for (seq, line) in (0..).zip(lines) {
        out.extend(engine.classify((*line).to_string(), seq));
    }
    out.extend(engine.finish());
    out
}

fn visible(lines: &[StreamLine]) -> Vec<&str> {
    lines
        .iter()
        .filter(|line| line.is_visible())
        .map(|line| line.text.as_str())
        .collect()
}

fn chunk(source: Source, kind: ChunkKind, text: &str) -> Chunk {
    Chunk {
        source,
        kind,
        text: text.to_string(),
    }
}

async fn pump_chunks(filter: &mut LineFilter, chunks: Vec<Chunk>) -> (String, String, Flow) {
    let (tx, rx) = mpsc::channel(chunks.len().max(1));
    for chunk in chunks {
        tx.send(chunk).await.unwrap();
    }
    drop(tx);
    let mut sink = Sink::new(Vec::new(), Vec::new());
    let flow = pump(rx, filter, &mut sink).await.unwrap();
    let (out, err) = sink.into_inner();
    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
        flow,
    )
}

// =============================================================================
// Styles
// =============================================================================

#[test]
fn test_color_names() {
    assert_eq!(Color::from_name("darkred"), Some(Color::DARK_RED));
    assert_eq!(Color::from_name("LightBlue"), Some(Color::LIGHT_BLUE));
    assert_eq!(Color::from_name("red"), None);
    assert_eq!(Color::from_name("lightpurple"), None);
}

#[test]
fn test_paint_uses_overrides() {
    let colors = BTreeMap::from([
        ("statusadded".to_string(), "lightgreen".to_string()),
        ("warning".to_string(), ",darkblue".to_string()),
    ]);
    let scheme = ColorScheme::with_overrides(&colors).unwrap().enabled(true);

    assert_eq!(scheme.paint("A x", StyleKey::StatusAdded), "\x1b[92mA x\x1b[0m");
    assert_eq!(scheme.paint("oops", StyleKey::Warning), "\x1b[97;44moops\x1b[0m");
    assert_eq!(scheme.paint("-old", StyleKey::DiffRemoved), "\x1b[91m-old\x1b[0m");
}

#[test]
fn test_paint_disabled_is_plain() {
    let scheme = ColorScheme::default();
    assert!(!scheme.is_enabled());
    assert_eq!(scheme.paint("text", StyleKey::Conflict), "text");
}

#[test]
fn test_bad_color_overrides() {
    for (name, value) in [
        ("nosuchstyle", "darkred"),
        ("info", "purple"),
        ("info", "darkred,darkblue,darkgreen"),
    ] {
        let colors = BTreeMap::from([(name.to_string(), value.to_string())]);
        let err = ColorScheme::with_overrides(&colors).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref section, .. } if section == "colors"),
            "{name} = {value}: {err}"
        );
    }
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn test_status_rules() {
    let mut engine = engine(Profile::Status);
    let lines = classify_all(
        &mut engine,
        &[
            "M       file.c",
            "?       new.txt",
            "X       ext",
            "",
            "Performing status on external item at 'ext':",
            "",
            "Performing status on external item at 'ext2':",
            "C       ext2/conflict.c",
        ],
    );

    assert_eq!(
        visible(&lines),
        [
            "M       file.c",
            "?       new.txt",
            "Performing status on external item at 'ext2':",
            "C       ext2/conflict.c",
        ]
    );
    let classes: Vec<_> = lines.iter().map(|l| (l.seq, l.class)).collect();
    assert_eq!(
        classes,
        [
            (0, LineClass::Highlighted(StyleKey::StatusModified)),
            (1, LineClass::Highlighted(StyleKey::StatusUntracked)),
            (2, LineClass::Suppressed),
            (3, LineClass::Suppressed),
            (5, LineClass::Suppressed),
            (4, LineClass::Suppressed),
            (6, LineClass::Normal),
            (7, LineClass::Conflict),
        ]
    );
}

#[test]
fn test_update_rules_hold_external_headers() {
    let mut engine = engine(Profile::Update);
    let lines = classify_all(
        &mut engine,
        &[
            "Updating '.':",
            "Fetching external item into 'lib':",
            "External at revision 12.",
            "",
            "Fetching external item into 'vendor':",
            "U    vendor/a.c",
            "Updated external to revision 13.",
            "",
            "Updated to revision 40.",
            "Fetching external item into 'empty':",
        ],
    );

    insta::assert_snapshot!(visible(&lines).join("\n"), @r"
    Updating '.':
    Fetching external item into 'vendor':
    U    vendor/a.c
    Updated to revision 40.
    ");
    assert_eq!(
        lines.iter().find(|l| l.text.starts_with("Updated to")).map(|l| l.class),
        Some(LineClass::Highlighted(StyleKey::Status))
    );
}

#[test]
fn test_extra_suppress_patterns_come_first() {
    let rules = RuleSet::new(Profile::Status, &["^M.*generated".to_string()]).unwrap();
    assert_eq!(rules.action_for("M       generated.h"), Some(Action::Suppress));
    assert_eq!(
        rules.action_for("M       main.c"),
        Some(Action::Highlight(StyleKey::StatusModified))
    );
    assert_eq!(rules.action_for(" M      props"), None);

    let err = RuleSet::new(Profile::Plain, &["(".to_string()]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "plain"));
}

#[test]
fn test_classification_is_deterministic() {
    let input = [
        "Index: a.c",
        "@@ -1 +1 @@",
        "-old",
        "+new",
        " same",
    ];
    let first = classify_all(&mut engine(Profile::Diff), &input);
    let second = classify_all(&mut engine(Profile::Diff), &input);
    assert_eq!(first, second);
    let classes: Vec<_> = first.iter().map(|l| l.class).collect();
    assert_eq!(
        classes,
        [
            LineClass::Normal,
            LineClass::Highlighted(StyleKey::DiffMisc),
            LineClass::Highlighted(StyleKey::DiffRemoved),
            LineClass::Highlighted(StyleKey::DiffAdd),
            LineClass::Normal,
        ]
    );
}

// =============================================================================
// Externals
// =============================================================================

#[test]
fn test_externals_blocks_become_unified_diff() {
    let mut differ = ExternalsDiffer::new(false);
    let mut out = Vec::new();
    for line in [
        "Property changes on: .",
        "Modified: svn:externals",
        "   - lib http://server/lib",
        "vendor http://server/vendor",
        "   + lib http://server/lib2",
        "vendor http://server/vendor",
        "",
        "Index: next.c",
    ] {
        out.extend(differ.push(line.to_string()));
    }
    out.extend(differ.finish());

    assert_eq!(
        out,
        [
            "Property changes on: .",
            "Modified: svn:externals",
            "--- Old externals",
            "+++ New externals",
            "@@ -1 +1 @@",
            "-lib http://server/lib",
            "+lib http://server/lib2",
            "",
            "Index: next.c",
        ]
    );
}

#[test]
fn test_externals_already_diffed_pass_through() {
    let mut differ = ExternalsDiffer::new(false);
    let input = ["Modified: svn:externals", "## -1 +1 ##", "-lib a", "+lib b"];
    let mut out = Vec::new();
    for line in input {
        out.extend(differ.push(line.to_string()));
    }
    out.extend(differ.finish());
    assert_eq!(out, input);
}

#[test]
fn test_externals_ignore_space_change() {
    let mut differ = ExternalsDiffer::new(true);
    let mut out = Vec::new();
    for line in [
        "Name: svn:externals",
        "   - lib   http://server/lib",
        "   + lib http://server/lib",
    ] {
        out.extend(differ.push(line.to_string()));
    }
    out.extend(differ.finish());
    assert_eq!(out, ["Name: svn:externals"]);
}

// =============================================================================
// Filter and pump
// =============================================================================

#[tokio::test]
async fn test_pump_prompts_and_stderr() {
    let mut filter = LineFilter::new(RuleSet::new(Profile::Plain, &[]).unwrap(), ColorScheme::default());
    let (out, err, flow) = pump_chunks(
        &mut filter,
        vec![
            chunk(Source::Stdout, ChunkKind::Line, "U    a.c"),
            chunk(Source::Stdout, ChunkKind::Partial, "Select: (p) postpone: "),
            chunk(Source::Stdout, ChunkKind::Tail, "p"),
            chunk(Source::Stderr, ChunkKind::Line, "svn: E155011: out of date"),
            chunk(Source::Stderr, ChunkKind::Partial, "Password: "),
        ],
    )
    .await;

    assert_eq!(flow, Flow::Drained);
    assert_eq!(out, "U    a.c\nSelect: (p) postpone: p\n");
    assert_eq!(err, "svn: E155011: out of date\nPassword: ");
    assert_eq!(
        filter.summary().stderr_lines(),
        ["svn: E155011: out of date", "Password: "]
    );
}

#[test]
fn test_stderr_tail_keeps_error_highlight() {
    let scheme = ColorScheme::default().enabled(true);
    let mut filter = LineFilter::new(RuleSet::new(Profile::Plain, &[]).unwrap(), scheme.clone());
    filter.process(chunk(Source::Stderr, ChunkKind::Partial, "svn: warning: "));
    let lines = filter.process(chunk(Source::Stderr, ChunkKind::Tail, "W155010: not found"));

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].class, LineClass::HighlightedError);
    assert_eq!(
        filter.render(&lines[0]),
        Some(scheme.paint("W155010: not found", StyleKey::Warning) + "\n")
    );
    assert_eq!(filter.summary().stderr_lines(), ["svn: warning: W155010: not found"]);
}

#[tokio::test]
async fn test_pump_prompt_releases_held_line() {
    let mut filter = LineFilter::new(RuleSet::new(Profile::Update, &[]).unwrap(), ColorScheme::default());
    let (out, _, _) = pump_chunks(
        &mut filter,
        vec![
            chunk(Source::Stdout, ChunkKind::Line, "Fetching external item into 'ext':"),
            chunk(Source::Stdout, ChunkKind::Partial, "Password for 'bob': "),
        ],
    )
    .await;
    assert_eq!(out, "Fetching external item into 'ext':\nPassword for 'bob': ");
}

#[tokio::test]
async fn test_pump_colors_log() {
    let scheme = ColorScheme::default().enabled(true);
    let mut filter = LineFilter::new(RuleSet::new(Profile::Log, &[]).unwrap(), scheme);
    let separator = "-".repeat(72);
    let (out, _, _) = pump_chunks(
        &mut filter,
        vec![
            chunk(Source::Stdout, ChunkKind::Line, &separator),
            chunk(
                Source::Stdout,
                ChunkKind::Line,
                "r12 | alice | 2026-01-02 10:00:00 +0000 | 1 line",
            ),
            chunk(Source::Stdout, ChunkKind::Line, "Fixed it."),
        ],
    )
    .await;

    let bar = "\x1b[90m|\x1b[0m";
    let expected = format!(
        "\x1b[32m{separator}\x1b[0m\n\
         \x1b[93mr12\x1b[0m {bar} \x1b[94malice\x1b[0m {bar} \
         \x1b[90m2026-01-02 10:00:00 +0000\x1b[0m {bar} \x1b[90m1 line\x1b[0m\n\
         \x1b[37mFixed it.\x1b[0m\n"
    );
    assert_eq!(out, expected);
}

#[tokio::test]
async fn test_pump_rewrites_externals_in_diff() {
    let mut filter = LineFilter::new(RuleSet::new(Profile::Diff, &[]).unwrap(), ColorScheme::default());
    let lines = [
        "Modified: svn:externals",
        "   - lib http://server/lib",
        "   + lib http://server/lib2",
    ];
    let chunks = lines
        .iter()
        .map(|line| chunk(Source::Stdout, ChunkKind::Line, line))
        .collect();
    let (out, _, _) = pump_chunks(&mut filter, chunks).await;
    insta::assert_snapshot!(out.trim_end(), @r"
    Modified: svn:externals
    --- Old externals
    +++ New externals
    @@ -1 +1 @@
    -lib http://server/lib
    +lib http://server/lib2
    ");
}

#[test]
fn test_summary_rendering() {
    let mut summary = Summary::default();
    assert!(summary.render_conflicts(&ColorScheme::default()).is_empty());
    summary.add_conflict("C       a.c");
    summary.add_stderr("svn: warning: W155010: skipped");
    summary.add_stderr("svn: E200009: failed");

    let scheme = ColorScheme::default();
    insta::assert_snapshot!(summary.render_conflicts(&scheme).trim_end(), @r"
    Total conflicts: 1
    C       a.c
    ");
    insta::assert_snapshot!(summary.render_stderr(&scheme).trim_end(), @r"
    Total svn stderr: 2 lines
    svn: warning: W155010: skipped
    svn: E200009: failed
    ");
}

#[test]
fn test_pager_command_precedence() {
    let config = PagerConfig {
        enabled: true,
        cmd: Some("most".to_string()),
    };
    let env = |pairs: &'static [(&'static str, &'static str)]| {
        move |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    };

    assert_eq!(
        pager_command(&config, env(&[("SVN_PAGER", "less"), ("PAGER", "more")])).as_deref(),
        Some("less")
    );
    assert_eq!(pager_command(&config, env(&[("PAGER", "more")])).as_deref(), Some("most"));
    assert_eq!(
        pager_command(&PagerConfig::default(), env(&[("PAGER", "more")])).as_deref(),
        Some("more")
    );
    assert_eq!(
        pager_command(&PagerConfig::default(), env(&[])).as_deref(),
        Some(DEFAULT_PAGER)
    );
    let disabled = PagerConfig {
        enabled: false,
        cmd: None,
    };
    assert_eq!(pager_command(&disabled, env(&[])), None);
}

// =============================================================================
// Orchestrator
// =============================================================================

#[cfg(unix)]
#[tokio::test]
async fn test_run_filtered_relays_exit_and_summary() {
    let process = ProcessBuilder::raw(
        "printf 'A  one\\nC  two\\n'; echo 'svn: warning' >&2; exit 1",
    );
    let filter = LineFilter::new(RuleSet::new(Profile::Status, &[]).unwrap(), ColorScheme::default());
    let mut sink = Sink::new(Vec::new(), Vec::new());

    let code = Orchestrator::new()
        .run(process, OutputMode::Filtered(filter), &mut sink)
        .await
        .unwrap();

    let (out, err) = sink.into_inner();
    assert_eq!(code, 1);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "A  one\nC  two\nTotal conflicts: 1\nC  two\n"
    );
    assert_eq!(
        String::from_utf8(err).unwrap(),
        "svn: warning\nTotal svn stderr: 1 line\nsvn: warning\n"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_passthrough_returns_code() {
    let mut sink = Sink::new(Vec::new(), Vec::new());
    let code = Orchestrator::new()
        .run(ProcessBuilder::raw("exit 3"), OutputMode::Passthrough, &mut sink)
        .await
        .unwrap();
    assert_eq!(code, 3);
    let (out, err) = sink.into_inner();
    assert!(out.is_empty() && err.is_empty());
}

#[tokio::test]
async fn test_run_missing_client_is_error() {
    let filter = LineFilter::new(RuleSet::new(Profile::Plain, &[]).unwrap(), ColorScheme::default());
    let mut sink = Sink::new(Vec::new(), Vec::new());
    let result = Orchestrator::new()
        .run(
            ProcessBuilder::new("svnwrap-definitely-missing-svn"),
            OutputMode::Filtered(filter),
            &mut sink,
        )
        .await;
    assert!(result.is_err());
}
