// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working-copy context for keyword expansion and suffix inference.

use futures_util::future::BoxFuture;

use super::split::{split, split_peg};
use crate::error::Result;

/// Source of working-copy URLs.
///
/// Implemented by the Subversion client adapter; tests supply a fixed map.
pub trait WorkingCopy {
    /// Returns the repository URL of `target` (a working-copy path).
    ///
    /// # Errors
    ///
    /// Returns an error when `target` is not under version control or the
    /// query itself fails.
    fn url_of<'a>(&'a self, target: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Snapshot of one working-copy URL split around its role segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordContext {
    /// Everything before the role segment (the whole URL when there is none).
    pub base: String,
    /// Role segment, e.g. `trunk` or `branches/fix`.
    pub middle: Option<String>,
    /// Path below the role segment, without leading slash or peg revision.
    pub suffix: String,
}

impl KeywordContext {
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let (url, _peg) = split_peg(url);
        match split(url) {
            Some(parts) => Self {
                base: parts.head.to_string(),
                middle: Some(parts.middle.to_string()),
                suffix: parts.tail.trim_matches('/').to_string(),
            },
            None => Self {
                base: url.to_string(),
                middle: None,
                suffix: String::new(),
            },
        }
    }
}
