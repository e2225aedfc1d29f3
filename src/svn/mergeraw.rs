// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `mergeraw RAWPATH [WCPATH]`: overlays an unversioned tree onto a working
//! copy.
//!
//! ```text
//! check_roots()  RAWPATH is a plain directory, WCPATH has .svn
//! plan()         walk RAWPATH (.svn/_svn skipped, sorted)
//!   dir missing in WCPATH   --> AddTree   (contents not visited)
//!   file                    --> CopyFile  (add = not yet in WCPATH)
//! caller runs the steps: copy, then `svn add` new entries
//! ```
//!
//! A file replaced by a directory (or the reverse) is not handled.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use ignore::{DirEntry, Walk, WalkBuilder};

use crate::error::Result;

/// One change to the working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStep {
    /// Directory absent from the working copy; copied whole and added.
    AddTree(PathBuf),
    /// File copied over; `add` when the working copy did not have it.
    CopyFile { rel: PathBuf, add: bool },
}

fn is_admin_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
        && matches!(entry.file_name().to_str(), Some(".svn" | "_svn"))
}

fn is_working_copy(path: &Path) -> bool {
    path.join(".svn").is_dir()
}

/// Every entry below `root`, administrative directories excluded.
fn walk(root: &Path) -> Walk {
    WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| !is_admin_dir(entry))
        .build()
}

/// Rejects roots the merge cannot work with.
///
/// # Errors
///
/// Returns an error when `raw_root` is not a directory or is itself a
/// working copy, or when `wc_root` is not a working copy.
pub fn check_roots(raw_root: &Path, wc_root: &Path) -> Result<()> {
    if !raw_root.is_dir() {
        bail!("not a directory: '{}'", raw_root.display());
    }
    if is_working_copy(raw_root) {
        bail!("cannot use Subversion working copy: '{}'", raw_root.display());
    }
    if !is_working_copy(wc_root) {
        bail!("not a Subversion working copy: '{}'", wc_root.display());
    }
    Ok(())
}

/// The steps that bring `wc_root` up to the contents of `raw_root`.
///
/// # Errors
///
/// Returns an error if `raw_root` cannot be traversed.
pub fn plan(raw_root: &Path, wc_root: &Path) -> Result<Vec<MergeStep>> {
    let mut steps = Vec::new();
    let mut new_trees: Vec<PathBuf> = Vec::new();

    for entry in walk(raw_root) {
        let entry = entry.with_context(|| format!("cannot read '{}'", raw_root.display()))?;
        if entry.depth() == 0 {
            continue;
        }
        let rel = entry.path().strip_prefix(raw_root)?.to_path_buf();
        if new_trees.iter().any(|tree| rel.starts_with(tree)) {
            continue;
        }
        if entry.file_type().is_some_and(|t| t.is_dir()) {
            if !wc_root.join(&rel).is_dir() {
                new_trees.push(rel.clone());
                steps.push(MergeStep::AddTree(rel));
            }
        } else {
            let add = !wc_root.join(&rel).is_file();
            steps.push(MergeStep::CopyFile { rel, add });
        }
    }
    Ok(steps)
}

/// Copies the directory tree `from` to `to`.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or a file copied.
pub fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in walk(from) {
        let entry = entry.with_context(|| format!("cannot read '{}'", from.display()))?;
        let target = to.join(entry.path().strip_prefix(from)?);
        if entry.file_type().is_some_and(|t| t.is_dir()) {
            fs::create_dir_all(&target)
                .with_context(|| format!("cannot create '{}'", target.display()))?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("cannot copy to '{}'", target.display()))?;
        }
    }
    Ok(())
}
