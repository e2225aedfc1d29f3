// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Alias and keyword resolution.
//!
//! ```text
//! token ──► //alias/rest ─────────► prefix + /rest ─┐
//!       ├─► path/scheme://x ──────► scheme://x ─────┤
//!       ├─► [prefix/]kw:rest ─────► template + rest ┤   repeat until
//!       └─► anything else ──────► done ◄────────────┘   no rule fires
//!                                                       (seen twice ⇒ loop)
//! ```
//!
//! Keyword context comes from the text before the keyword: nothing means the
//! working copy `.`, a URL is used as is, any other text is a working-copy
//! path queried through [`WorkingCopy`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use tracing::debug;

use super::context::{KeywordContext, WorkingCopy};
use super::keyword::{KeywordMatch, KeywordTable, KeywordTarget, USER_PLACEHOLDER};
use super::split::{is_url, join, scheme_len, split, split_peg};
use crate::config::paths::env_lookup;
use crate::error::{ResolutionError, WrapResult};

/// Whether a resolved URL's path below the role segment was given or derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixOrigin {
    /// The token itself named a path below the role segment.
    Explicit,
    /// The path was copied from the working copy's URL.
    Inferred,
    /// No path below the role segment (or no role segment at all).
    Absent,
    /// The URL ends in `/.`, which disables inference.
    OptedOut,
}

/// Final URL plus the origin of its suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub url: String,
    pub suffix: SuffixOrigin,
}

impl ResolvedUrl {
    fn classify(url: String) -> Self {
        let (base, _) = split_peg(&url);
        let suffix = match split(base) {
            Some(parts) if !parts.tail.trim_matches('/').is_empty() => SuffixOrigin::Explicit,
            _ => SuffixOrigin::Absent,
        };
        Self { url, suffix }
    }
}

type EnvLookup<'a> = Box<dyn Fn(&str) -> Option<String> + Send + Sync + 'a>;

/// Resolves `//alias` and `keyword:` tokens against one working copy.
pub struct Resolver<'a, W> {
    aliases: &'a BTreeMap<String, String>,
    keywords: &'a KeywordTable,
    wc: &'a W,
    env: EnvLookup<'a>,
    urls: Mutex<HashMap<String, String>>,
}

impl<'a, W: WorkingCopy> Resolver<'a, W> {
    #[must_use]
    pub fn new(aliases: &'a BTreeMap<String, String>, keywords: &'a KeywordTable, wc: &'a W) -> Self {
        Self {
            aliases,
            keywords,
            wc,
            env: Box::new(env_lookup),
            urls: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces the environment lookup used for `env` keywords and `{user}`.
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'a,
    {
        self.env = Box::new(lookup);
        self
    }

    /// Whether `token` would be rewritten by [`Self::resolve`].
    #[must_use]
    pub fn is_mappable(&self, token: &str) -> bool {
        token.starts_with("//") || embedded_url(token).is_some() || self.keywords.find(token).is_some()
    }

    /// Expands aliases and keywords in `token` until no rule applies.
    ///
    /// Tokens without any marker come back unchanged.
    ///
    /// # Errors
    ///
    /// Returns a `ResolutionError` for an undefined alias, a keyword whose
    /// context or environment variable is unavailable, or a mapping loop.
    pub async fn resolve(&self, token: &str) -> WrapResult<ResolvedUrl> {
        let mut url = token.to_string();
        let mut seen = HashSet::new();
        while let Some(next) = self.step(&url).await? {
            if !seen.insert(next.clone()) {
                return Err(ResolutionError::MappingLoop { url: next }.into());
            }
            debug!(from = %url, to = %next, "mapped URL");
            url = next;
        }
        Ok(ResolvedUrl::classify(url))
    }

    /// Fills in a missing suffix from the working copy at `wc_path`.
    ///
    /// Only URLs with a role segment and nothing below it are adjusted.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::WorkingCopyQuery` when the working copy's URL
    /// cannot be determined.
    pub async fn infer_suffix(&self, url: &str, wc_path: &str) -> WrapResult<ResolvedUrl> {
        let (base, peg) = split_peg(url);
        if base.ends_with("/.") {
            return Ok(ResolvedUrl {
                url: url.to_string(),
                suffix: SuffixOrigin::OptedOut,
            });
        }
        let Some(parts) = split(base) else {
            return Ok(ResolvedUrl::classify(url.to_string()));
        };
        if !parts.tail.trim_matches('/').is_empty() {
            return Ok(ResolvedUrl {
                url: url.to_string(),
                suffix: SuffixOrigin::Explicit,
            });
        }
        let wc_url = self
            .url_of(wc_path)
            .await
            .map_err(|reason| ResolutionError::WorkingCopyQuery {
                path: wc_path.to_string(),
                reason,
            })?;
        let context = KeywordContext::from_url(&wc_url);
        if context.suffix.is_empty() {
            return Ok(ResolvedUrl {
                url: url.to_string(),
                suffix: SuffixOrigin::Absent,
            });
        }
        let adjusted = join(parts.head, parts.middle, &context.suffix) + peg;
        debug!(%url, %adjusted, wc = wc_path, "inferred URL suffix");
        Ok(ResolvedUrl {
            url: adjusted,
            suffix: SuffixOrigin::Inferred,
        })
    }

    async fn step(&self, url: &str) -> WrapResult<Option<String>> {
        if let Some(rest) = url.strip_prefix("//") {
            let name_len = rest.find('/').unwrap_or(rest.len());
            if name_len > 0 {
                let (name, after) = rest.split_at(name_len);
                let prefix = self.aliases.get(name).ok_or_else(|| ResolutionError::UnknownAlias {
                    alias: name.to_string(),
                })?;
                return Ok(Some(format!("{}{after}", prefix.trim_end_matches('/'))));
            }
        }
        if let Some(embedded) = embedded_url(url) {
            return Ok(Some(embedded.to_string()));
        }
        match self.keywords.find(url) {
            Some(found) => self.expand(&found).await.map(Some),
            None => Ok(None),
        }
    }

    async fn expand(&self, found: &KeywordMatch<'_>) -> WrapResult<String> {
        let keyword = found.name;
        let expanded = match found.target {
            KeywordTarget::Env(var) => self.env_var(keyword, var)?,
            KeywordTarget::Head(path) => {
                let context = self.context_for(keyword, found.before).await?;
                join(&context.base, &self.fill_user(keyword, path)?, "")
            }
            KeywordTarget::Middle(path) => {
                let context = self.context_for(keyword, found.before).await?;
                let middle = context.middle.as_deref().unwrap_or("trunk");
                let path = self.fill_user(keyword, path)?;
                join(&context.base, &format!("{middle}/{path}"), "")
            }
        };
        Ok(join(&expanded, "", found.after))
    }

    async fn context_for(&self, keyword: &str, before: &str) -> WrapResult<KeywordContext> {
        let target = match before.trim_end_matches('/') {
            _ if before.is_empty() => ".",
            "" => before,
            trimmed => trimmed,
        };
        if is_url(target) {
            return Ok(KeywordContext::from_url(target));
        }
        let url = self
            .url_of(target)
            .await
            .map_err(|reason| ResolutionError::NoContext {
                keyword: keyword.to_string(),
                path: target.to_string(),
                reason,
            })?;
        Ok(KeywordContext::from_url(&url))
    }

    async fn url_of(&self, target: &str) -> Result<String, String> {
        if let Some(url) = self.cached(target) {
            return Ok(url);
        }
        let url = self
            .wc
            .url_of(target)
            .await
            .map_err(|e| format!("{e:#}"))?;
        if let Ok(mut urls) = self.urls.lock() {
            urls.insert(target.to_string(), url.clone());
        }
        Ok(url)
    }

    fn cached(&self, target: &str) -> Option<String> {
        self.urls.lock().ok()?.get(target).cloned()
    }

    fn env_var(&self, keyword: &str, var: &str) -> WrapResult<String> {
        (self.env)(var)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                ResolutionError::MissingEnv {
                    keyword: keyword.to_string(),
                    var: var.to_string(),
                }
                .into()
            })
    }

    fn fill_user(&self, keyword: &str, template: &str) -> WrapResult<String> {
        if !template.contains(USER_PLACEHOLDER) {
            return Ok(template.to_string());
        }
        let user = (self.env)("USER")
            .or_else(|| (self.env)("USERNAME"))
            .filter(|user| !user.is_empty())
            .ok_or_else(|| ResolutionError::MissingEnv {
                keyword: keyword.to_string(),
                var: "USER".to_string(),
            })?;
        Ok(template.replace(USER_PLACEHOLDER, &user))
    }
}

/// An absolute URL embedded after a `:` or `/` (e.g. `wc/http://host/x`).
///
/// The rightmost candidate wins.
fn embedded_url(token: &str) -> Option<&str> {
    token
        .char_indices()
        .rev()
        .filter(|&(_, c)| c == ':' || c == '/')
        .find_map(|(i, _)| {
            let rest = &token[i + 1..];
            let scheme = scheme_len(rest)?;
            (rest[..scheme].chars().count() >= 2).then_some(rest)
        })
}
