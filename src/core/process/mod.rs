// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("svn")
//!   .args() .env() .stdout_flags()
//!   .spawn() / .run() / .status()
//!       --> tokio::process::Command
//!           pipes | inherit | null | console device
//!       --> Child / ProcessOutput / exit code
//!
//! io::spawn_reader(pipe) --> Chunk { source, kind, text }
//! ```

pub mod builder;
pub mod io;
mod runner;

pub use builder::{ProcessBuilder, ProcessOutput, StreamFlags};
pub use io::{Chunk, ChunkKind, PARTIAL_LINE_TIMEOUT, Source};
pub use runner::{CONSOLE_OUT, exit_code};
