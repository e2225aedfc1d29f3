// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              WrapError (~24 bytes)
//!                     |
//!   +---------+-------+-------+---------+
//!   |         |       |       |         |
//!   v         v       v       v         v
//! Resolve  Process  Editor  Config   Io/Other
//!   Box      Box     Box     Box     Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Resolution UnknownAlias, NoContext, MissingEnv, WorkingCopyQuery,
//!              MappingLoop
//!   Process    ExecutableNotFound, SpawnFailed, NonZeroExit,
//!              OutputError
//!   Editor     NoEditorConfigured, ConsoleUnavailable
//!   Config     ParseError, InvalidValue, AmbiguousMarker
//!
//! A non-zero client exit is not an error: it is relayed as the wrapper's
//! own exit status.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`WrapError`].
pub type WrapResult<T> = std::result::Result<T, WrapError>;

/// Exit code used for failures of the wrapper itself (as opposed to the
/// client's own exit status).
pub const WRAPPER_FAILURE: u8 = 2;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum WrapError {
    /// URL alias/keyword resolution failed.
    #[error("{0}")]
    Resolution(#[from] Box<ResolutionError>),

    /// Spawning or talking to a subprocess failed.
    #[error("{0}")]
    Process(#[from] Box<ProcessError>),

    /// Editor proxy failure.
    #[error("{0}")]
    Editor(#[from] Box<EditorError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for WrapError {
                fn from(err: $error) -> Self {
                    WrapError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ResolutionError => Resolution,
    ProcessError => Process,
    EditorError => Editor,
    ConfigError => Config,
    std::io::Error => Io,
}

impl From<String> for WrapError {
    fn from(message: String) -> Self {
        Self::Other(message.into_boxed_str())
    }
}

// --- Resolution Errors ---

/// Errors raised while turning alias/keyword tokens into URLs.
///
/// All of these are fatal and surface before the client is spawned.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// `//name/...` used an alias that is not configured.
    #[error("undefined alias '{alias}'")]
    UnknownAlias { alias: String },

    /// A keyword needed working-copy context that could not be obtained.
    #[error("keyword '{keyword}:' needs a working copy at '{path}': {reason}")]
    NoContext {
        keyword: String,
        path: String,
        reason: String,
    },

    /// A keyword is bound to an environment variable that is not set.
    #[error("keyword '{keyword}:' needs environment variable {var}")]
    MissingEnv { keyword: String, var: String },

    /// The URL of a working-copy path could not be determined.
    #[error("cannot determine URL of working copy '{path}': {reason}")]
    WorkingCopyQuery { path: String, reason: String },

    /// Alias/keyword expansion revisited a URL it already produced.
    #[error("mapping loop for URL '{url}'")]
    MappingLoop { url: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status where a result was required.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Failed to read process output.
    #[error("failed to read {stream} from process '{command}': {message}")]
    OutputError {
        command: String,
        stream: &'static str,
        message: String,
    },
}

// --- Editor Errors ---

/// Editor proxy errors.
#[derive(Debug, Error)]
pub enum EditorError {
    /// No editor could be determined from any per-user source.
    #[error(
        "no editor configured; set SVN_EDITOR, VISUAL or EDITOR, \
         or add 'editor-cmd' under [helpers] in {svn_config}"
    )]
    NoEditorConfigured { svn_config: String },

    /// The console device could not be opened.
    #[error("cannot open console device '{device}': {source}")]
    ConsoleUnavailable {
        device: &'static str,
        #[source]
        source: std::io::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A name is usable both as `//alias` and as `keyword:`.
    #[error("'{name}' is defined both as an alias and as a keyword")]
    AmbiguousMarker { name: String },
}
