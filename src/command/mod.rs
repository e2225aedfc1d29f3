// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns the user's command line into a client invocation.
//!
//! ```text
//! raw args --> switches::parse --> switches + positionals
//!                                        |
//!            first positional = subcommand (aliases canonicalised)
//!                                        |
//!      +--------------+------------------+------------------+
//!      v              v                  v                  v
//!  helpwrap, url     br NAME        pge pgi ee ei      anything else
//!  stnames, stmod   (copy trunk     pdiff bdiff kdiff3  (forwarded)
//!  stmodroot,        to branch)     (expanded)
//!  stmodrevert,
//!  mergeraw
//!  (answered here)
//!                                        |
//!             URL-like positionals --> Resolver::resolve
//!             infer_suffix commands --> Resolver::infer_suffix
//!                                        |
//!                                        v
//!                   Plan::Run(Invocation { command, args, ... })
//! ```

pub mod help;
pub mod switches;
pub mod table;


use tracing::debug;

pub use switches::{ParsedArgs, Switch};
pub use table::{CommandSpec, CommandTraits};

use crate::error::{WrapError, WrapResult};
use crate::output::{ColorScheme, Profile, StyleKey};
use crate::svn::status::StatusView;
use crate::url::split::is_repository_url;
use crate::url::{ResolvedUrl, Resolver, SuffixOrigin, WorkingCopy};

/// Printed for a bare invocation, like the client does.
pub const USAGE_HINT: &str = "Type 'svn help' for usage.";

/// Printed after the client's own top-level help.
pub const HELPWRAP_HINT: &str = "Type 'svn helpwrap' for help on svnwrap extensions.";

/// Shortcut subcommand expanded into a client subcommand plus fixed
/// arguments.
struct Shortcut {
    name: &'static str,
    command: &'static str,
    prefix: &'static [&'static str],
    /// Target `.` when no positional is given.
    default_target: bool,
}

const SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        name: "pge",
        command: "propget",
        prefix: &["svn:externals", "--strict"],
        default_target: true,
    },
    Shortcut {
        name: "pgi",
        command: "propget",
        prefix: &["svn:ignore"],
        default_target: true,
    },
    Shortcut {
        name: "ee",
        command: "propedit",
        prefix: &["svn:externals"],
        default_target: true,
    },
    Shortcut {
        name: "ei",
        command: "propedit",
        prefix: &["svn:ignore"],
        default_target: true,
    },
    Shortcut {
        name: "pdiff",
        command: "diff",
        prefix: &["--diff-cmd", "diff", "-x", "-U1000000", "--patch-compatible"],
        default_target: false,
    },
    Shortcut {
        name: "bdiff",
        command: "diff",
        prefix: &["-x", "-b"],
        default_target: false,
    },
    Shortcut {
        name: "kdiff3",
        command: "diff",
        prefix: &["--diff-cmd", "kdiff3", "-x", "--qall"],
        default_target: false,
    },
];

/// Work answered by the wrapper without running a client subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalAction {
    /// No arguments at all.
    UsageHint,
    /// Help on the wrapper's own extensions.
    HelpWrap,
    /// Print the repository URL of each (already mapped) path.
    Url(Vec<String>),
    /// `stnames`, `stmod`, `stmodroot`: a view over `svn status ARGS`.
    Status { view: StatusView, args: Vec<String> },
    /// `stmodrevert`: revert every modified path `svn status ARGS` lists.
    RevertModified(Vec<String>),
    /// `mergeraw RAWPATH [WCPATH]`.
    MergeRaw { raw_root: String, wc_root: String },
}

/// A URL rewritten (or deliberately left alone) by suffix inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub original: String,
    pub resolved: ResolvedUrl,
}

impl Adjustment {
    /// Notice shown before the client runs.
    #[must_use]
    pub fn report(&self, scheme: &ColorScheme) -> String {
        match self.resolved.suffix {
            SuffixOrigin::OptedOut => format!(
                "Skipping adjustment for URL ending with {}:\n  {}\n",
                scheme.paint("'/.'", StyleKey::Info),
                scheme.paint(&self.original, StyleKey::Info),
            ),
            _ => format!(
                "Adjusting URL to match working copy tail:\n  Was: {}\n  Now: {}\n  (append {} to URL to avoid adjustment)\n",
                scheme.paint(&self.original, StyleKey::Info),
                scheme.paint(&self.resolved.url, StyleKey::Info),
                scheme.paint("'/.'", StyleKey::Info),
            ),
        }
    }
}

/// A fully built client run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Canonical subcommand; `None` when only switches were given.
    pub command: Option<String>,
    /// Client arguments, subcommand first.
    pub args: Vec<String>,
    pub profile: Profile,
    pub traits: CommandTraits,
    /// Diff whitespace changes are ignored, externals included.
    pub ignore_space_change: bool,
    /// `--editor-cmd` lifted out of the arguments.
    pub editor_override: Option<String>,
    pub adjustments: Vec<Adjustment>,
    /// Text printed after the client exits.
    pub trailer: Option<String>,
}

impl Invocation {
    fn new(command: Option<String>, args: Vec<String>, spec: Option<&CommandSpec>) -> Self {
        Self {
            command,
            args,
            profile: spec.map_or(Profile::Plain, |spec| spec.profile),
            traits: spec.map_or_else(CommandTraits::empty, |spec| spec.traits),
            ignore_space_change: false,
            editor_override: None,
            adjustments: Vec::new(),
            trailer: None,
        }
    }

    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        self.traits.contains(CommandTraits::PASSTHROUGH)
    }

    #[must_use]
    pub const fn is_paged(&self) -> bool {
        self.traits.contains(CommandTraits::PAGED)
    }
}

/// Outcome of [`CommandBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Local(LocalAction),
    Run(Invocation),
}

/// Builds client invocations, mapping URLs through a [`Resolver`].
pub struct CommandBuilder<'a, W> {
    resolver: Resolver<'a, W>,
    infer_suffix: &'a [String],
}

impl<'a, W: WorkingCopy> CommandBuilder<'a, W> {
    /// `infer_suffix` lists the canonical subcommands whose URLs take their
    /// missing tail from the working copy.
    #[must_use]
    pub const fn new(resolver: Resolver<'a, W>, infer_suffix: &'a [String]) -> Self {
        Self {
            resolver,
            infer_suffix,
        }
    }

    /// Builds the plan for `raw` (the arguments after the program name).
    ///
    /// Unknown subcommands and switches are forwarded verbatim.
    ///
    /// # Errors
    ///
    /// Returns a resolution error when a URL token cannot be mapped, or an
    /// error when `br` is not given exactly one name or `mergeraw` is given
    /// no paths or too many.
    pub async fn build(&self, raw: Vec<String>) -> WrapResult<Plan> {
        let parsed = switches::parse(raw);
        let mut positionals = parsed.positionals.clone();

        if positionals.is_empty() {
            if parsed.switches.is_empty() {
                return Ok(Plan::Local(LocalAction::UsageHint));
            }
            let mut invocation = Invocation::new(None, parsed.switch_args(), None);
            invocation.editor_override.clone_from(&parsed.editor_cmd);
            invocation.trailer = Some(if parsed.has("--version") {
                format!("svnwrap version {}", env!("CARGO_PKG_VERSION"))
            } else {
                HELPWRAP_HINT.to_string()
            });
            return Ok(Plan::Run(invocation));
        }

        let word = positionals.remove(0);
        let command = table::canonical(&word).to_string();
        debug!(subcommand = %word, canonical = %command, "building invocation");

        match command.as_str() {
            "helpwrap" => return Ok(Plan::Local(LocalAction::HelpWrap)),
            "url" => {
                let mut paths = self.map_all(positionals, 0).await?;
                if paths.is_empty() {
                    paths.push(".".to_string());
                }
                return Ok(Plan::Local(LocalAction::Url(paths)));
            }
            "br" => return self.branch(&parsed, &positionals).await.map(Plan::Run),
            "stnames" | "stmod" | "stmodroot" | "stmodrevert" => {
                let mut args = parsed.switch_args();
                args.extend(parsed.positional_args(&positionals));
                let action = match command.as_str() {
                    "stnames" => LocalAction::Status { view: StatusView::Names, args },
                    "stmod" => LocalAction::Status { view: StatusView::Modified, args },
                    "stmodroot" => LocalAction::Status { view: StatusView::ModifiedRoots, args },
                    _ => LocalAction::RevertModified(args),
                };
                return Ok(Plan::Local(action));
            }
            "mergeraw" => {
                let (raw_root, wc_root) = match positionals.as_slice() {
                    [raw] => (raw.clone(), ".".to_string()),
                    [raw, wc] => (raw.clone(), wc.clone()),
                    _ => return Err(WrapError::from("usage: mergeraw RAWPATH [WCPATH]".to_string())),
                };
                return Ok(Plan::Local(LocalAction::MergeRaw { raw_root, wc_root }));
            }
            _ => {}
        }

        if let Some(shortcut) = SHORTCUTS.iter().find(|s| s.name == command) {
            let mut targets = self.map_all(positionals, 0).await?;
            if targets.is_empty() && shortcut.default_target {
                targets.push(".".to_string());
            }
            let spec = table::lookup(shortcut.name).or_else(|| table::lookup(shortcut.command));
            let mut args = vec![shortcut.command.to_string()];
            args.extend(shortcut.prefix.iter().map(|s| (*s).to_string()));
            args.extend(parsed.switch_args());
            args.extend(parsed.positional_args(&targets));

            let mut invocation = Invocation::new(Some(shortcut.command.to_string()), args, spec);
            invocation.ignore_space_change = shortcut.name == "bdiff";
            invocation.editor_override.clone_from(&parsed.editor_cmd);
            return Ok(Plan::Run(invocation));
        }

        let spec = table::lookup(&command);
        let unmapped = spec.map_or(0, |spec| spec.unmapped_positionals);
        let mut positionals = self.map_all(positionals, unmapped).await?;

        let mut adjustments = Vec::new();
        if self.infer_suffix.contains(&command) && !parsed.has("--relocate") {
            adjustments = self.infer(&mut positionals, unmapped).await?;
        }

        let bare_help = command == "help" && positionals.is_empty() && parsed.switches.is_empty();
        let mut args = vec![command.clone()];
        args.extend(parsed.switch_args());
        args.extend(parsed.positional_args(&positionals));

        let mut invocation = Invocation::new(Some(command), args, spec);
        invocation.editor_override.clone_from(&parsed.editor_cmd);
        invocation.adjustments = adjustments;
        if bare_help {
            invocation.trailer = Some(HELPWRAP_HINT.to_string());
        }
        Ok(Plan::Run(invocation))
    }

    /// `br NAME`: copies the trunk of the current project to a branch.
    async fn branch(&self, parsed: &ParsedArgs, positionals: &[String]) -> WrapResult<Invocation> {
        let [name] = positionals else {
            return Err(WrapError::from("br takes exactly one URL".to_string()));
        };
        let branch = self.resolver.resolve(&format!("br:{name}")).await?.url;
        let trunk = self.resolver.resolve(&format!("{branch}/tr:")).await?.url;
        debug!(%trunk, %branch, "branch shortcut");

        let mut args = vec!["copy".to_string(), trunk, branch];
        args.extend(parsed.switch_args());
        let mut invocation = Invocation::new(Some("copy".to_string()), args, table::lookup("copy"));
        invocation.editor_override.clone_from(&parsed.editor_cmd);
        Ok(invocation)
    }

    async fn map_all(&self, tokens: Vec<String>, unmapped: usize) -> WrapResult<Vec<String>> {
        let mut mapped = Vec::with_capacity(tokens.len());
        for (index, token) in tokens.into_iter().enumerate() {
            if index >= unmapped && self.resolver.is_mappable(&token) {
                mapped.push(self.resolver.resolve(&token).await?.url);
            } else {
                mapped.push(token);
            }
        }
        Ok(mapped)
    }

    /// Fills in missing URL tails from the target working copy.
    ///
    /// The working copy is the last positional when it is not a URL and
    /// more than one positional is given, otherwise `.`.
    async fn infer(&self, positionals: &mut [String], unmapped: usize) -> WrapResult<Vec<Adjustment>> {
        let wc_index = match positionals.last() {
            Some(last) if positionals.len() > 1 && !is_repository_url(last) => Some(positionals.len() - 1),
            _ => None,
        };
        let wc_path = wc_index.map_or_else(|| ".".to_string(), |i| positionals[i].clone());

        let mut adjustments = Vec::new();
        for (index, token) in positionals.iter_mut().enumerate() {
            if index < unmapped || Some(index) == wc_index || !is_repository_url(token) {
                continue;
            }
            let resolved = self.resolver.infer_suffix(token, &wc_path).await?;
            match resolved.suffix {
                SuffixOrigin::Inferred => {
                    let original = std::mem::replace(token, resolved.url.clone());
                    adjustments.push(Adjustment { original, resolved });
                }
                SuffixOrigin::OptedOut => adjustments.push(Adjustment {
                    original: token.clone(),
                    resolved,
                }),
                SuffixOrigin::Explicit | SuffixOrigin::Absent => {}
            }
        }
        Ok(adjustments)
    }
}
