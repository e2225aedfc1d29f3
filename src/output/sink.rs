// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Destinations for rendered output.
//!
//! ```text
//! Sink { out, err }
//!   out: stdout  or  pager stdin
//!   err: stderr  (or out, when paging to a terminal)
//! every write is flushed immediately
//! ```

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, ChildStdin};
use tracing::debug;

use crate::config::PagerConfig;
use crate::core::process::{ProcessBuilder, Source, StreamFlags};
use crate::error::{ProcessError, WrapResult};

/// Pager used when neither configuration nor environment names one.
pub const DEFAULT_PAGER: &str = "less -FKRX";

/// Boxed writer so stdout and a pager pipe share one sink type.
pub type BoxWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Sink writing to the real terminal or a pager.
pub type TerminalSink = Sink<BoxWriter, tokio::io::Stderr>;

/// Single writer for both output streams.
pub struct Sink<O, E> {
    out: O,
    err: E,
    err_to_out: bool,
}

impl<O, E> Sink<O, E>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    pub const fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            err_to_out: false,
        }
    }

    /// Sends error output through the stdout writer as well.
    #[must_use]
    pub const fn merge_stderr(mut self, merge: bool) -> Self {
        self.err_to_out = merge;
        self
    }

    /// Writes and flushes `text` to the stream for `target`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; `BrokenPipe` means the reader (for
    /// example a pager) has gone away.
    pub async fn write(&mut self, target: Source, text: &str) -> io::Result<()> {
        if target == Source::Stderr && !self.err_to_out {
            self.err.write_all(text.as_bytes()).await?;
            self.err.flush().await
        } else {
            self.out.write_all(text.as_bytes()).await?;
            self.out.flush().await
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl TerminalSink {
    /// Sink on the process's own stdout and stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(Box::new(tokio::io::stdout()), tokio::io::stderr())
    }
}

/// Picks the pager command.
///
/// `SVN_PAGER` wins over `[pager] cmd`, which wins over `PAGER`. Returns
/// `None` when paging is disabled.
pub fn pager_command<F>(config: &PagerConfig, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if !config.enabled {
        return None;
    }
    let non_empty = |value: String| (!value.trim().is_empty()).then_some(value);
    lookup("SVN_PAGER")
        .and_then(non_empty)
        .or_else(|| config.cmd.clone().and_then(non_empty))
        .or_else(|| lookup("PAGER").and_then(non_empty))
        .or_else(|| Some(DEFAULT_PAGER.to_string()))
}

/// A running pager fed through its stdin.
pub struct Pager {
    child: Child,
}

impl Pager {
    /// Starts `command` through the shell and returns it with its input pipe.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the pager cannot be started.
    pub fn spawn(command: &str) -> WrapResult<(Self, ChildStdin)> {
        let mut child = ProcessBuilder::raw(command)
            .name("pager")
            .stdin_flags(StreamFlags::PIPE)
            .stdout_flags(StreamFlags::INHERIT)
            .stderr_flags(StreamFlags::INHERIT)
            .spawn()?;
        let stdin = child.stdin.take().ok_or_else(|| ProcessError::OutputError {
            command: command.to_string(),
            stream: "stdin",
            message: "pager input is not piped".to_string(),
        })?;
        Ok((Self { child }, stdin))
    }

    /// Waits for the user to leave the pager. Its input must be closed first.
    pub async fn wait(mut self) {
        match self.child.wait().await {
            Ok(status) => debug!(?status, "pager exited"),
            Err(e) => debug!(error = %e, "waiting for pager failed"),
        }
    }
}
