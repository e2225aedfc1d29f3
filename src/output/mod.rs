// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client process orchestration and output filtering.
//!
//! ```text
//!                    Orchestrator::run(process, mode, sink)
//!                                 |
//!          +----------------------+---------------------+
//!          | Passthrough                                | Filtered(LineFilter)
//!          v                                            v
//!   inherit stdio, status()                  spawn with piped stdout/stderr,
//!                                            own process group when stdin
//!                                            is not a terminal
//!   (menus and redraws untouched)                       |
//!                                   reader(stdout) --+  |
//!                                                    +--> mpsc --> pump()
//!                                   reader(stderr) --+        LineFilter
//!                                                             Sink (single writer)
//!                                                       |
//!                                          wait child, then summary
//!                                                       |
//!                                                       v
//!                                              client exit code
//! ```
//!
//! A failing client is not an error here: its exit code is returned for the
//! wrapper to exit with.

pub mod externals;
pub mod filter;
pub mod line;
pub mod rules;
pub mod sink;
pub mod style;
pub mod summary;

#[cfg(test)]
mod tests;

use std::io::{self, IsTerminal as _};
use std::time::Duration;

use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tracing::{debug, trace};

pub use filter::LineFilter;
pub use line::{LineClass, StreamLine};
pub use rules::{Action, Profile, Rule, RuleEngine, RuleSet};
pub use sink::{Pager, Sink, TerminalSink};
pub use style::{Color, ColorScheme, Style, StyleKey};
pub use summary::Summary;

use crate::core::process::io::spawn_reader;
use crate::core::process::{Chunk, PARTIAL_LINE_TIMEOUT, ProcessBuilder, Source, StreamFlags, exit_code};
use crate::core::signal::SignalForwarder;
use crate::error::WrapResult;

/// How the client's output reaches the terminal.
#[derive(Debug)]
pub enum OutputMode {
    /// Client inherits the terminal; nothing is filtered.
    Passthrough,
    /// Both streams are piped through the filter.
    Filtered(LineFilter),
}

/// Why [`pump`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Both streams reached end of file.
    Drained,
    /// The reader of our output went away.
    Closed,
}

/// Runs client processes.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    partial_timeout: Duration,
    own_group: bool,
}

impl Default for Orchestrator {
    /// Filtered clients get their own process group unless stdin is a
    /// terminal; a background group would be stopped on its first read.
    fn default() -> Self {
        Self {
            partial_timeout: PARTIAL_LINE_TIMEOUT,
            own_group: !io::stdin().is_terminal(),
        }
    }
}

impl Orchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle time before an unterminated line counts as a prompt.
    #[must_use]
    pub const fn with_partial_timeout(mut self, timeout: Duration) -> Self {
        self.partial_timeout = timeout;
        self
    }

    /// Whether filtered clients lead their own process group, so forwarded
    /// signals also reach whatever the client started.
    #[must_use]
    pub const fn with_process_group(mut self, enabled: bool) -> Self {
        self.own_group = enabled;
        self
    }

    /// Runs `process` to completion and returns its exit code.
    ///
    /// When the sink's reader goes away the client is stopped and the run
    /// counts as successful.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be spawned or awaited, or if
    /// writing to the sink fails for a reason other than a closed reader.
    pub async fn run<O, E>(
        &self,
        process: ProcessBuilder,
        mode: OutputMode,
        sink: &mut Sink<O, E>,
    ) -> WrapResult<i32>
    where
        O: AsyncWrite + Unpin,
        E: AsyncWrite + Unpin,
    {
        let mut filter = match mode {
            OutputMode::Passthrough => {
                debug!("passthrough run");
                return process.inherit_stdio().status().await;
            }
            OutputMode::Filtered(filter) => filter,
        };

        let process = process
            .own_process_group(self.own_group)
            .stdout_flags(StreamFlags::PIPE)
            .stderr_flags(StreamFlags::PIPE);
        let mut child = process.spawn()?;

        let (tx, rx) = mpsc::channel(64);
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_reader(stdout, Source::Stdout, tx.clone(), self.partial_timeout));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_reader(stderr, Source::Stderr, tx.clone(), self.partial_timeout));
        }
        drop(tx);

        let forwarder = SignalForwarder::spawn(child.id(), process.signal_scope());
        let flow = pump(rx, &mut filter, sink).await;
        if !matches!(flow, Ok(Flow::Drained)) {
            let _ = child.start_kill();
        }
        let status = child.wait().await;
        forwarder.stop().await;
        for reader in readers {
            let _ = reader.await;
        }

        let code = exit_code(status?);
        trace!(exit_code = code, "client finished");
        if flow? == Flow::Closed {
            debug!("output closed early; client stopped");
            return Ok(0);
        }

        let summary = filter.summary();
        let conflicts = summary.render_conflicts(filter.scheme());
        let stderr = summary.render_stderr(filter.scheme());
        for (target, text) in [(Source::Stdout, conflicts), (Source::Stderr, stderr)] {
            if text.is_empty() {
                continue;
            }
            match sink.write(target, &text).await {
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => break,
                other => other?,
            }
        }
        Ok(code)
    }
}

/// Moves chunks from `rx` through `filter` into `sink` until every sender
/// is gone.
///
/// Lines from one stream keep their order; the two streams interleave in
/// arrival order.
///
/// # Errors
///
/// Returns any write error other than `BrokenPipe`, which ends the pump with
/// [`Flow::Closed`].
pub async fn pump<O, E>(
    mut rx: mpsc::Receiver<Chunk>,
    filter: &mut LineFilter,
    sink: &mut Sink<O, E>,
) -> io::Result<Flow>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    while let Some(chunk) = rx.recv().await {
        let lines = filter.process(chunk);
        if write_lines(filter, &lines, sink).await? == Flow::Closed {
            return Ok(Flow::Closed);
        }
    }
    let lines = filter.finish();
    write_lines(filter, &lines, sink).await
}

async fn write_lines<O, E>(
    filter: &LineFilter,
    lines: &[StreamLine],
    sink: &mut Sink<O, E>,
) -> io::Result<Flow>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    for line in lines {
        let Some(text) = filter.render(line) else {
            continue;
        };
        match sink.write(line.source, &text).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(Flow::Closed),
            Err(e) => return Err(e),
        }
    }
    Ok(Flow::Drained)
}
