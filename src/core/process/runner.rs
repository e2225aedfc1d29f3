// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//!      build_command()
//!   args, env, stdio, group
//!   CONSOLE -> open tty device
//!            |
//!    +-------+--------+
//!    |       |        |
//!    v       v        v
//!  spawn()  run()   status()
//!  Child    capture  inherit stdio,
//!  (pipes)  output   forward signals
//!            |        |
//!            v        v
//!   ProcessOutput  exit code
//! ```

use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};
use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::core::signal::{SignalForwarder, SignalScope};
use crate::error::{EditorError, ProcessError, WrapResult};

/// Platform device for the controlling terminal's output.
#[cfg(windows)]
pub const CONSOLE_OUT: &str = "CONOUT$";
/// Platform device for the controlling terminal's output.
#[cfg(not(windows))]
pub const CONSOLE_OUT: &str = "/dev/tty";

/// Converts an exit status into the code the wrapper should exit with.
///
/// A child killed by signal N maps to `128 + N`, as shells report it.
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt as _;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    status.code().unwrap_or(1)
}

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            use std::fmt::Write as _;
            if arg.contains(' ') || arg.is_empty() {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns the process and hands back the child with its pipes.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` when the program does not
    /// exist, `ProcessError::SpawnFailed` for any other spawn failure, and
    /// `EditorError::ConsoleUnavailable` when a `CONSOLE` stream cannot be
    /// connected.
    pub fn spawn(&self) -> WrapResult<Child> {
        let cmd_line = self.command_line();
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command()?;
        let child = command.spawn().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ProcessError::ExecutableNotFound {
                    name: self.program().display().to_string(),
                }
            } else {
                ProcessError::SpawnFailed {
                    command: cmd_line,
                    source,
                }
            }
        })?;
        trace!(process = %self.display_name(), pid = ?child.id(), "spawned");
        Ok(child)
    }

    /// Runs the process to completion, capturing its output.
    ///
    /// # Errors
    ///
    /// Returns an error if spawning fails, the output cannot be read, or the
    /// process exits with a non-zero status.
    pub async fn run(self) -> WrapResult<ProcessOutput> {
        let name = self.display_name();
        let child = self.spawn()?;
        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ProcessError::OutputError {
                command: name.clone(),
                stream: "stdout",
                message: e.to_string(),
            })?;

        let keep = |flags: StreamFlags, bytes: &[u8]| {
            if flags.contains(StreamFlags::KEEP_IN_STRING) {
                String::from_utf8_lossy(bytes).into_owned()
            } else {
                String::new()
            }
        };
        let output = ProcessOutput::new(
            exit_code(output.status),
            keep(self.stdout_config(), &output.stdout),
            keep(self.stderr_config(), &output.stderr),
        );

        if !output.success() {
            if !output.stderr().is_empty() {
                debug!(process = %name, stderr = %output.stderr().trim_end(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code(),
            }
            .into());
        }
        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    /// Runs the process with its configured stdio and returns its exit code.
    ///
    /// Interrupt and terminate signals received meanwhile are forwarded to
    /// the child (or its whole group, see [`Self::own_process_group`])
    /// instead of ending the wrapper.
    ///
    /// # Errors
    ///
    /// Returns an error if spawning or waiting fails.
    pub async fn status(self) -> WrapResult<i32> {
        let name = self.display_name();
        let mut child = self.spawn()?;
        let forwarder = SignalForwarder::spawn(child.id(), self.signal_scope());
        let status = child.wait().await;
        forwarder.stop().await;
        let code = exit_code(status?);
        trace!(process = %name, exit_code = code, "completed");
        Ok(code)
    }

    /// How signals reach this process once spawned.
    #[must_use]
    pub const fn signal_scope(&self) -> SignalScope {
        if cfg!(unix) && self.has_own_process_group() {
            SignalScope::Group
        } else {
            SignalScope::Shared
        }
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> WrapResult<Command> {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());

        #[cfg(unix)]
        if self.has_own_process_group() {
            command.process_group(0);
        }

        for (key, value) in self.env_overrides() {
            match value {
                Some(value) => command.env(key, value),
                None => command.env_remove(key),
            };
        }

        command.stdin(Self::stdio_from_flags(self.stdin_config())?);
        command.stdout(Self::stdio_from_flags(self.stdout_config())?);
        command.stderr(Self::stdio_from_flags(self.stderr_config())?);

        command.kill_on_drop(true);
        Ok(command)
    }

    /// Converts `StreamFlags` to Stdio configuration.
    fn stdio_from_flags(flags: StreamFlags) -> WrapResult<Stdio> {
        let stdio = if flags.contains(StreamFlags::INHERIT) {
            Stdio::inherit()
        } else if flags.contains(StreamFlags::BIT_BUCKET) {
            Stdio::null()
        } else if flags.contains(StreamFlags::CONSOLE) {
            let console = std::fs::OpenOptions::new()
                .read(true)
                .write(true)
                .open(CONSOLE_OUT)
                .map_err(|source| EditorError::ConsoleUnavailable {
                    device: CONSOLE_OUT,
                    source,
                })?;
            Stdio::from(console)
        } else {
            Stdio::piped()
        };
        Ok(stdio)
    }
}
