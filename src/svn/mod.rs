// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Adapter for the Subversion command-line client.
//!
//! ```text
//! SvnClient::locate(--svn PATH | PATH lookup)
//!   command()  --> ProcessBuilder for the run itself
//!   url_of(p)  --> svn info --non-interactive p  --> "URL: ..." line
//!   status()   --> svn status ARGS, captured for status::render
//!   add()/revert() --> run on the terminal, exit code returned
//! ```

pub mod mergeraw;
pub mod status;


use std::path::{Path, PathBuf};

use anyhow::Context;
use futures_util::future::BoxFuture;
use tracing::trace;

use crate::core::process::ProcessBuilder;
use crate::error::{Result, WrapResult};
use crate::url::WorkingCopy;
use crate::url::split::is_url;

/// Name of the client executable looked up on PATH.
pub const SVN_PROGRAM: &str = "svn";

/// The underlying client.
#[derive(Debug, Clone)]
pub struct SvnClient {
    program: PathBuf,
}

impl SvnClient {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Uses `explicit` when given, otherwise finds `svn` on PATH.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` when no client is found.
    pub fn locate(explicit: Option<&Path>) -> WrapResult<Self> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }
        let builder = ProcessBuilder::which(SVN_PROGRAM)?;
        Ok(Self::new(builder.program().clone()))
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// A process running this client with `args`.
    #[must_use]
    pub fn command<I, S>(&self, args: I) -> ProcessBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        ProcessBuilder::new(&self.program).name("svn").args(args)
    }

    /// Repository URL of a working-copy path (URLs are returned as is).
    ///
    /// # Errors
    ///
    /// Returns an error if `svn info` fails or prints no URL.
    pub async fn info_url(&self, target: &str) -> Result<String> {
        if is_url(target) {
            return Ok(target.to_string());
        }
        let output = self
            .command(["info", "--non-interactive", target])
            .capture_output()
            .run()
            .await
            .with_context(|| format!("svn info {target}"))?;
        let url = parse_info_url(output.stdout())
            .with_context(|| format!("invalid subversion path '{target}'"))?;
        trace!(target, %url, "working copy URL");
        Ok(url)
    }

    /// Captured `svn status` output.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails.
    pub async fn status(&self, args: &[String]) -> Result<String> {
        let output = self
            .command(["status"])
            .args(args)
            .capture_output()
            .run()
            .await
            .with_context(|| format!("svn status {}", args.join(" ")))?;
        Ok(output.stdout().to_string())
    }

    /// Schedules `path` for addition.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be started.
    pub async fn add(&self, path: &Path) -> WrapResult<i32> {
        self.command(["add"]).arg(path).inherit_stdio().status().await
    }

    /// Reverts `paths`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be started.
    pub async fn revert(&self, paths: &[String]) -> WrapResult<i32> {
        self.command(["revert"]).args(paths).inherit_stdio().status().await
    }
}

impl WorkingCopy for SvnClient {
    fn url_of<'a>(&'a self, target: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(self.info_url(target))
    }
}

/// The `URL:` field of the first `svn info` record.
#[must_use]
pub fn parse_info_url(output: &str) -> Option<String> {
    output
        .trim_start()
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            (key.trim() == "URL").then(|| value.trim().to_string())
        })
        .filter(|url| !url.is_empty())
}
