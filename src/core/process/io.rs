// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line-oriented stream reading for child processes.
//!
//! ```text
//! spawn_reader(stdout) ──┐
//!                        ├──► mpsc<Chunk> ──► single consumer
//! spawn_reader(stderr) ──┘
//!
//! read_chunks()
//!   read ──► complete line ──► Chunk::Line
//!        └─► idle > timeout with bytes pending ──► Chunk::Partial
//!            (rest of that line later arrives as Chunk::Tail)
//!   EOF / read error ──► flush pending, drop sender
//! ```
//!
//! Lines are decoded lossily as UTF-8; partial chunks never split a
//! multi-byte sequence.

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

/// Idle time after which an unterminated line is emitted as a prompt.
pub const PARTIAL_LINE_TIMEOUT: Duration = Duration::from_millis(200);

/// Which child stream a chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Stdout,
    Stderr,
}

impl Source {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// How a chunk relates to line boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// A whole line (terminator stripped).
    Line,
    /// The start of a line that has not been terminated yet.
    Partial,
    /// The terminated remainder of a line begun by `Partial` chunks.
    Tail,
}

/// A piece of child output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub source: Source,
    pub kind: ChunkKind,
    pub text: String,
}

/// Spawns a reader task feeding `tx` until the stream closes.
pub fn spawn_reader<R>(
    reader: R,
    source: Source,
    tx: mpsc::Sender<Chunk>,
    partial_timeout: Duration,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        read_chunks(reader, source, tx, partial_timeout).await;
    })
}

/// Reads `reader` to the end, sending each line (or idle partial line).
///
/// A read error is logged and treated as end of stream, so the consumer can
/// still drain the other stream and wait for the child.
pub async fn read_chunks<R>(
    mut reader: R,
    source: Source,
    tx: mpsc::Sender<Chunk>,
    partial_timeout: Duration,
) where
    R: AsyncRead + Unpin,
{
    let mut pending: Vec<u8> = Vec::new();
    let mut in_partial = false;
    let mut buf = [0u8; 4096];

    loop {
        let read = if pending.is_empty() {
            Some(reader.read(&mut buf).await)
        } else {
            tokio::time::timeout(partial_timeout, reader.read(&mut buf))
                .await
                .ok()
        };

        match read {
            Some(Ok(0)) => break,
            Some(Ok(n)) => {
                pending.extend_from_slice(&buf[..n]);
                while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = pending.drain(..=pos).collect();
                    let kind = if in_partial { ChunkKind::Tail } else { ChunkKind::Line };
                    in_partial = false;
                    if !send(&tx, source, kind, decode_line(&line)).await {
                        return;
                    }
                }
            }
            None => {
                let text = take_partial(&mut pending);
                if !text.is_empty() {
                    in_partial = true;
                    if !send(&tx, source, ChunkKind::Partial, text).await {
                        return;
                    }
                }
            }
            Some(Err(e)) => {
                warn!(stream = source.as_str(), error = %e, "error reading child output");
                break;
            }
        }
    }

    if !pending.is_empty() {
        let kind = if in_partial { ChunkKind::Tail } else { ChunkKind::Line };
        send(&tx, source, kind, decode_line(&pending)).await;
    }
    trace!(stream = source.as_str(), "stream closed");
}

async fn send(tx: &mpsc::Sender<Chunk>, source: Source, kind: ChunkKind, text: String) -> bool {
    tx.send(Chunk { source, kind, text }).await.is_ok()
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Removes and decodes the longest prefix of `pending` that does not end in
/// an incomplete UTF-8 sequence.
pub(super) fn take_partial(pending: &mut Vec<u8>) -> String {
    let cut = match std::str::from_utf8(pending) {
        Ok(_) => pending.len(),
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        Err(_) => pending.len(),
    };
    let taken: Vec<u8> = pending.drain(..cut).collect();
    String::from_utf8_lossy(&taken).into_owned()
}
