// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Keeps interactive editors on the terminal while client output is piped.
//!
//! ```text
//! wrapper (normal mode)
//!   determine_editor(): override > SVN_EDITOR
//!                       > ~/.subversion/config [helpers] editor-cmd
//!                       > VISUAL > EDITOR
//!   child env:  SVN_EDITOR          = "<wrapper>" --editor-proxy
//!               SVNWRAP_REAL_EDITOR = <real editor>
//!        |
//!        v
//!   svn commit ... (stdout/stderr piped)
//!        |  needs a log message
//!        v
//! wrapper --editor-proxy FILE (proxy mode)
//!   stdout/stderr --> console device (/dev/tty, CONOUT$)
//!   <real editor> FILE  --> exit code back to svn
//! ```

#[cfg(test)]
mod tests;

use std::path::Path;

use tracing::debug;

use crate::config::subversion_editor_cmd;
use crate::core::process::{ProcessBuilder, StreamFlags};
use crate::error::{EditorError, WrapResult};

/// Hidden first argument selecting editor-proxy mode.
pub const EDITOR_PROXY_FLAG: &str = "--editor-proxy";

/// Variable carrying the real editor command to the proxy.
pub const REAL_EDITOR_VAR: &str = "SVNWRAP_REAL_EDITOR";

/// Variable the client reads its editor command from.
pub const CLIENT_EDITOR_VAR: &str = "SVN_EDITOR";

/// Generic editor variables, consulted after Subversion's own settings.
const FALLBACK_EDITOR_VARS: [&str; 2] = ["VISUAL", "EDITOR"];

/// Where the editor command was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorSource {
    /// `[editor] cmd` or `--editor-cmd`.
    Override,
    Environment(&'static str),
    SubversionConfig,
}

/// The editor the proxy will run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorChoice {
    pub command: String,
    pub source: EditorSource,
}

/// Finds the real editor from per-user sources only, in the order the
/// client itself uses: `SVN_EDITOR`, then `[helpers] editor-cmd`, then
/// `VISUAL` and `EDITOR`.
///
/// A client editor variable that already points at the proxy is skipped so
/// nested wrapper runs do not recurse.
pub fn determine_editor<F>(
    override_cmd: Option<&str>,
    lookup: F,
    svn_config: &Path,
) -> Option<EditorChoice>
where
    F: Fn(&str) -> Option<String>,
{
    let usable = |cmd: &str| !cmd.trim().is_empty() && !cmd.contains(EDITOR_PROXY_FLAG);

    if let Some(cmd) = override_cmd.filter(|cmd| usable(cmd)) {
        return Some(EditorChoice {
            command: cmd.to_string(),
            source: EditorSource::Override,
        });
    }
    let from_env = |var: &'static str| {
        lookup(var).filter(|cmd| usable(cmd)).map(|command| EditorChoice {
            command,
            source: EditorSource::Environment(var),
        })
    };

    from_env(CLIENT_EDITOR_VAR)
        .or_else(|| {
            subversion_editor_cmd(svn_config)
                .filter(|cmd| usable(cmd))
                .map(|command| EditorChoice {
                    command,
                    source: EditorSource::SubversionConfig,
                })
        })
        .or_else(|| FALLBACK_EDITOR_VARS.into_iter().find_map(from_env))
}

/// Environment changes that route the child's editor through the proxy.
#[derive(Debug, Clone)]
pub struct EditorRedirect {
    proxy_cmd: String,
    real_editor: Option<String>,
}

impl EditorRedirect {
    /// Plans the redirect through `wrapper_exe`.
    ///
    /// With no real editor the redirect still happens, so a missing editor is
    /// only reported if the client actually asks for one.
    #[must_use]
    pub fn prepare(wrapper_exe: &Path, real_editor: Option<EditorChoice>) -> Self {
        if let Some(choice) = &real_editor {
            debug!(editor = %choice.command, source = ?choice.source, "real editor");
        }
        Self {
            proxy_cmd: format!("{} {EDITOR_PROXY_FLAG}", quote(&wrapper_exe.to_string_lossy())),
            real_editor: real_editor.map(|choice| choice.command),
        }
    }

    /// Value for the client's editor variable.
    #[must_use]
    pub fn proxy_command(&self) -> &str {
        &self.proxy_cmd
    }

    #[must_use]
    pub fn real_editor(&self) -> Option<&str> {
        self.real_editor.as_deref()
    }

    /// Variables to set (`Some`) or clear (`None`) in the child environment.
    #[must_use]
    pub fn env_vars(&self) -> [(&'static str, Option<String>); 2] {
        [
            (CLIENT_EDITOR_VAR, Some(self.proxy_cmd.clone())),
            (REAL_EDITOR_VAR, self.real_editor.clone()),
        ]
    }

    /// Applies [`Self::env_vars`] to `process`.
    #[must_use]
    pub fn apply(&self, process: ProcessBuilder) -> ProcessBuilder {
        self.env_vars()
            .into_iter()
            .fold(process, |process, (key, value)| match value {
                Some(value) => process.env(key, value),
                None => process.env_remove(key),
            })
    }
}

/// One editor request received in proxy mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorInvocation {
    editor: String,
    files: Vec<String>,
}

impl EditorInvocation {
    /// Reads the real editor handed over by the parent wrapper.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::NoEditorConfigured` when no editor was handed
    /// over; `svn_config` is named in the remediation text.
    pub fn from_env<F>(files: Vec<String>, lookup: F, svn_config: &Path) -> WrapResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let editor = lookup(REAL_EDITOR_VAR)
            .filter(|cmd| !cmd.trim().is_empty())
            .ok_or_else(|| EditorError::NoEditorConfigured {
                svn_config: svn_config.display().to_string(),
            })?;
        Ok(Self { editor, files })
    }

    #[must_use]
    pub fn editor(&self) -> &str {
        &self.editor
    }

    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// The editor process, attached to the console instead of the pipes the
    /// client gave us.
    #[must_use]
    pub fn command(&self) -> ProcessBuilder {
        ProcessBuilder::raw_with_args(&self.editor, &self.files)
            .name("editor")
            .stdin_flags(StreamFlags::INHERIT)
            .stdout_flags(StreamFlags::CONSOLE)
            .stderr_flags(StreamFlags::CONSOLE)
    }

    /// Runs the editor and returns its exit code for the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the console cannot be opened or the editor cannot
    /// be started.
    pub async fn run(&self) -> WrapResult<i32> {
        debug!(editor = %self.editor, files = ?self.files, "editor proxy");
        self.command().status().await
    }
}

fn quote(path: &str) -> String {
    if path.contains(char::is_whitespace) {
        format!("\"{path}\"")
    } else {
        path.to_string()
    }
}
