// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns raw chunks into classified, rendered lines.
//!
//! ```text
//! Chunk(stdout, Line)    ──► [externals] ──► RuleEngine ──► StreamLine*
//! Chunk(stdout, Partial) ──► release held line, MenuPrompt (raw, no newline)
//! Chunk(*, Tail)         ──► Normal (raw, bypasses the rules)
//! Chunk(stderr, Line)    ──► HighlightedError, retained for the summary
//! Chunk(stderr, Partial) ──► MenuPrompt, completed by the Tail
//! ```
//!
//! No I/O happens here; rendering yields the exact text for one stream.

use super::externals::ExternalsDiffer;
use super::line::{LineClass, StreamLine};
use super::rules::{Profile, RuleEngine, RuleSet};
use super::style::{ColorScheme, StyleKey};
use super::summary::Summary;
use crate::core::process::{Chunk, ChunkKind, Source};

/// Stateful classifier for one client run.
#[derive(Debug)]
pub struct LineFilter {
    engine: RuleEngine,
    externals: Option<ExternalsDiffer>,
    scheme: ColorScheme,
    summary: Summary,
    seq: u64,
    stderr_partial: String,
}

impl LineFilter {
    #[must_use]
    pub fn new(rules: RuleSet, scheme: ColorScheme) -> Self {
        let externals = (rules.profile() == Profile::Diff).then(|| ExternalsDiffer::new(false));
        Self {
            engine: RuleEngine::new(rules),
            externals,
            scheme,
            summary: Summary::default(),
            seq: 0,
            stderr_partial: String::new(),
        }
    }

    /// Normalizes whitespace inside rewritten externals blocks.
    #[must_use]
    pub fn ignore_space_change(mut self, ignore: bool) -> Self {
        if self.externals.is_some() {
            self.externals = Some(ExternalsDiffer::new(ignore));
        }
        self
    }

    #[must_use]
    pub const fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    #[must_use]
    pub const fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Classifies one chunk. Suppressed lines are included.
    pub fn process(&mut self, chunk: Chunk) -> Vec<StreamLine> {
        let Chunk { source, kind, text } = chunk;
        match (source, kind) {
            (Source::Stdout, ChunkKind::Line) => {
                let lines = match &mut self.externals {
                    Some(differ) => differ.push(text),
                    None => vec![text],
                };
                let mut out = Vec::new();
                for line in lines {
                    out.extend(self.classify(line));
                }
                out
            }
            (Source::Stdout, ChunkKind::Partial) => {
                let mut out: Vec<_> = self.engine.release().into_iter().collect();
                out.push(self.line(text, source, LineClass::MenuPrompt));
                out
            }
            (Source::Stderr, ChunkKind::Partial) => {
                self.stderr_partial.push_str(&text);
                vec![self.line(text, source, LineClass::MenuPrompt)]
            }
            (Source::Stderr, ChunkKind::Line) => {
                self.summary.add_stderr(text.clone());
                vec![self.line(text, source, LineClass::HighlightedError)]
            }
            (Source::Stderr, ChunkKind::Tail) => {
                let full = std::mem::take(&mut self.stderr_partial) + &text;
                self.summary.add_stderr(full);
                vec![self.line(text, source, LineClass::HighlightedError)]
            }
            (Source::Stdout, ChunkKind::Tail) => vec![self.line(text, source, LineClass::Normal)],
        }
    }

    /// Flushes buffered state once both streams have closed.
    pub fn finish(&mut self) -> Vec<StreamLine> {
        let mut out = Vec::new();
        if let Some(differ) = &mut self.externals {
            for line in differ.finish() {
                out.extend(self.classify(line));
            }
        }
        out.extend(self.engine.finish());
        if !self.stderr_partial.is_empty() {
            let partial = std::mem::take(&mut self.stderr_partial);
            self.summary.add_stderr(partial);
        }
        out
    }

    /// Text to write for `line`, or `None` when it is suppressed.
    #[must_use]
    pub fn render(&self, line: &StreamLine) -> Option<String> {
        let paint = |key| self.scheme.paint(&line.text, key);
        let text = match line.class {
            LineClass::Suppressed => return None,
            LineClass::MenuPrompt => return Some(line.text.clone()),
            LineClass::Normal => line.text.clone(),
            LineClass::Highlighted(key) => paint(key),
            LineClass::Conflict => paint(StyleKey::StatusConflict),
            LineClass::HighlightedError => paint(StyleKey::Warning),
            LineClass::LogHeader => self.render_log_header(&line.text),
        };
        Some(text + "\n")
    }

    fn render_log_header(&self, text: &str) -> String {
        let fields: Vec<&str> = text.split(" | ").collect();
        let keys = [
            StyleKey::LogRev,
            StyleKey::LogCommitter,
            StyleKey::LogDate,
            StyleKey::LogNumLines,
        ];
        if fields.len() != keys.len() {
            return self.scheme.paint(text, StyleKey::LogText);
        }
        let separator = format!(" {} ", self.scheme.paint("|", StyleKey::LogFieldSeparator));
        fields
            .iter()
            .zip(keys)
            .map(|(field, key)| self.scheme.paint(field, key))
            .collect::<Vec<_>>()
            .join(&separator)
    }

    fn classify(&mut self, text: String) -> Vec<StreamLine> {
        let seq = self.next_seq();
        let lines = self.engine.classify(text, seq);
        for line in &lines {
            if line.class == LineClass::Conflict {
                self.summary.add_conflict(line.text.clone());
            }
        }
        lines
    }

    fn line(&mut self, text: String, source: Source, class: LineClass) -> StreamLine {
        StreamLine {
            text,
            source,
            seq: self.next_seq(),
            class,
        }
    }

    const fn next_seq(&mut self) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }
}
