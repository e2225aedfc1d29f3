// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run handlers.
//!
//! ```text
//! EntryPoint::Wrapper(cli)       --> run_wrapper_command
//!   Config::load, ColorScheme, KeywordTable, SvnClient::locate
//!   CommandBuilder::build
//!     Plan::Local(..)  --> local::run_local_action
//!     Plan::Run(..)    --> adjustments, editor redirect, sink/pager,
//!                          Orchestrator::run, trailer
//! EntryPoint::EditorProxy(files) --> run_editor_proxy_command
//! ```

pub mod local;

use std::io::IsTerminal;

use tracing::{debug, warn};

use crate::cli::Cli;
use crate::cli::global::GlobalOptions;
use crate::command::{CommandBuilder, Invocation, Plan};
use crate::config::Config;
use crate::config::paths::{env_lookup, subversion_config_file};
use crate::core::process::Source;
use crate::editor::{EditorInvocation, EditorRedirect, determine_editor};
use crate::error::Result;
use crate::output::sink::{BoxWriter, pager_command};
use crate::output::{ColorScheme, LineFilter, Orchestrator, OutputMode, Pager, RuleSet, Sink, TerminalSink};
use crate::svn::SvnClient;
use crate::url::{KeywordTable, Resolver};

/// Output destination for one run, plus the pager behind it if any.
pub struct Output {
    pub sink: TerminalSink,
    pub pager: Option<Pager>,
}

impl Output {
    /// Opens the terminal, or a pager in front of it when `paged` and stdout
    /// is a terminal.
    ///
    /// A pager that fails to start is skipped.
    #[must_use]
    pub fn open(paged: bool, global: &GlobalOptions, config: &Config) -> Self {
        let command = (paged && !global.no_pager && std::io::stdout().is_terminal())
            .then(|| pager_command(&config.pager, env_lookup))
            .flatten();
        let Some(command) = command else {
            return Self {
                sink: TerminalSink::stdio(),
                pager: None,
            };
        };
        match Pager::spawn(&command) {
            Ok((pager, stdin)) => {
                debug!(pager = %command, "paging output");
                let out: BoxWriter = Box::new(stdin);
                Self {
                    sink: Sink::new(out, tokio::io::stderr()).merge_stderr(std::io::stderr().is_terminal()),
                    pager: Some(pager),
                }
            }
            Err(e) => {
                warn!(pager = %command, error = %e, "pager unavailable; writing to the terminal");
                Self {
                    sink: TerminalSink::stdio(),
                    pager: None,
                }
            }
        }
    }

    /// Writes `text` to stdout, ignoring a reader that went away.
    ///
    /// # Errors
    ///
    /// Returns any other I/O error.
    pub async fn write(&mut self, text: &str) -> std::io::Result<()> {
        match self.sink.write(Source::Stdout, text).await {
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
            other => other,
        }
    }

    /// Closes the pager's input and waits for the user to leave it.
    pub async fn close(self) {
        drop(self.sink);
        if let Some(pager) = self.pager {
            pager.wait().await;
        }
    }
}

/// Main handler for normal invocations. Returns the exit code to relay.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the client cannot be found
/// or started, or a URL cannot be resolved.
pub async fn run_wrapper_command(cli: &Cli) -> Result<i32> {
    let config = Config::load(cli.global.config.as_deref())?;
    let scheme = ColorScheme::with_overrides(&config.colors)?.enabled(cli.global.color.enabled());
    let keywords = KeywordTable::with_overrides(&config.keywords);
    let svn = SvnClient::locate(cli.global.svn.as_deref())?;
    debug!(client = %svn.program().display(), "using svn client");

    let resolver = Resolver::new(&config.aliases, &keywords, &svn);
    let builder = CommandBuilder::new(resolver, &config.url.infer_suffix);

    match builder.build(cli.args.clone()).await? {
        Plan::Local(action) => local::run_local_action(&action, &cli.global, &config, &keywords, &svn).await,
        Plan::Run(invocation) => run_invocation(invocation, &cli.global, &config, &svn, scheme).await,
    }
}

async fn run_invocation(
    invocation: Invocation,
    global: &GlobalOptions,
    config: &Config,
    svn: &SvnClient,
    scheme: ColorScheme,
) -> Result<i32> {
    for adjustment in &invocation.adjustments {
        print!("{}", adjustment.report(&scheme));
    }

    let editor_override = invocation
        .editor_override
        .as_deref()
        .or(config.editor.cmd.as_deref());
    let editor = determine_editor(editor_override, env_lookup, &subversion_config_file());
    let redirect = EditorRedirect::prepare(&std::env::current_exe()?, editor);
    let process = redirect.apply(svn.command(&invocation.args));

    let mode = if invocation.is_passthrough() {
        OutputMode::Passthrough
    } else {
        let extra = invocation
            .command
            .as_ref()
            .and_then(|command| config.suppress.get(command))
            .map_or(&[][..], Vec::as_slice);
        let rules = RuleSet::new(invocation.profile, extra)?;
        OutputMode::Filtered(LineFilter::new(rules, scheme).ignore_space_change(invocation.ignore_space_change))
    };

    let paged = invocation.is_paged() && !invocation.is_passthrough();
    let mut output = Output::open(paged, global, config);
    let code = Orchestrator::new().run(process, mode, &mut output.sink).await?;
    if let Some(trailer) = &invocation.trailer {
        output.write(&format!("{trailer}\n")).await?;
    }
    output.close().await;
    Ok(code)
}

/// Handler for `--editor-proxy FILE...`, run by the client.
///
/// # Errors
///
/// Returns an error if no real editor was handed over or it cannot be
/// started on the console.
pub async fn run_editor_proxy_command(files: Vec<String>) -> Result<i32> {
    let invocation = EditorInvocation::from_env(files, env_lookup, &subversion_config_file())?;
    Ok(invocation.run().await?)
}
