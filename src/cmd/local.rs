// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Subcommands answered without running a client subcommand.

use std::path::Path;

use anyhow::Context;
use tracing::{debug, warn};

use crate::cli::global::GlobalOptions;
use crate::cmd::Output;
use crate::command::help::helpwrap_text;
use crate::command::{HELPWRAP_HINT, LocalAction, USAGE_HINT};
use crate::config::Config;
use crate::config::paths::config_file;
use crate::error::Result;
use crate::output::{Profile, RuleSet};
use crate::svn::SvnClient;
use crate::svn::mergeraw::{self, MergeStep};
use crate::svn::status::{self, StatusView};
use crate::url::KeywordTable;

/// Handles one [`LocalAction`].
///
/// # Errors
///
/// Returns an error if a `url` path is not a working copy, `svn status`
/// fails, a `mergeraw` root is unusable, or output fails.
pub async fn run_local_action(
    action: &LocalAction,
    global: &GlobalOptions,
    config: &Config,
    keywords: &KeywordTable,
    svn: &SvnClient,
) -> Result<i32> {
    match action {
        LocalAction::UsageHint => {
            println!("{USAGE_HINT}");
            println!("{HELPWRAP_HINT}");
        }
        LocalAction::HelpWrap => {
            let text = helpwrap_text(keywords, &config_file(), &config.format_options());
            let mut output = Output::open(true, global, config);
            output.write(&text).await?;
            output.close().await;
        }
        LocalAction::Url(paths) => {
            for path in paths {
                println!("{}", svn.info_url(path).await?);
            }
        }
        LocalAction::Status { view, args } => {
            for line in status::render(&svn.status(args).await?, &status_rules(config)?, *view) {
                println!("{line}");
            }
        }
        LocalAction::RevertModified(args) => {
            let paths = status::render(&svn.status(args).await?, &status_rules(config)?, StatusView::Modified);
            if paths.is_empty() {
                debug!("nothing modified; skipping revert");
                return Ok(0);
            }
            return Ok(svn.revert(&paths).await?);
        }
        LocalAction::MergeRaw { raw_root, wc_root } => {
            return merge_raw(svn, Path::new(raw_root), Path::new(wc_root)).await;
        }
    }
    Ok(0)
}

fn status_rules(config: &Config) -> Result<RuleSet> {
    let extra = config.suppress.get("status").map_or(&[][..], Vec::as_slice);
    Ok(RuleSet::new(Profile::Status, extra)?)
}

/// Copies `raw_root` over `wc_root`, adding new entries. The result is the
/// worst `svn add` exit code.
async fn merge_raw(svn: &SvnClient, raw_root: &Path, wc_root: &Path) -> Result<i32> {
    mergeraw::check_roots(raw_root, wc_root)?;
    let mut code = 0;
    for step in mergeraw::plan(raw_root, wc_root)? {
        let (rel, add) = match &step {
            MergeStep::AddTree(rel) => {
                println!("adding directory '{}'", rel.display());
                mergeraw::copy_tree(&raw_root.join(rel), &wc_root.join(rel))?;
                (rel, true)
            }
            MergeStep::CopyFile { rel, add } => {
                println!("copying file '{}'", rel.display());
                let target = wc_root.join(rel);
                std::fs::copy(raw_root.join(rel), &target)
                    .with_context(|| format!("cannot copy to '{}'", target.display()))?;
                if *add {
                    println!("adding file '{}'", rel.display());
                }
                (rel, *add)
            }
        };
        if add {
            let added = svn.add(&wc_root.join(rel)).await?;
            if added != 0 {
                warn!(path = %rel.display(), exit_code = added, "svn add failed");
                code = code.max(added);
            }
        }
    }
    Ok(code)
}
