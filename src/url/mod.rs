// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! URL alias/keyword resolution and suffix inference.
//!
//! ```text
//! split.rs    head | middle | tail, peg revisions, URL detection
//! keyword.rs  KeywordTable (built-ins + [keywords.*])
//! context.rs  KeywordContext, WorkingCopy trait
//! resolver.rs Resolver::resolve / Resolver::infer_suffix
//! ```

pub mod context;
pub mod keyword;
pub mod resolver;
pub mod split;

pub use context::{KeywordContext, WorkingCopy};
pub use keyword::{KeywordTable, KeywordTarget};
pub use resolver::{ResolvedUrl, Resolver, SuffixOrigin};

#[cfg(test)]
mod tests;
