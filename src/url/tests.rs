// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::{BTreeMap, HashMap};

use futures_util::future::BoxFuture;

use super::split::{is_repository_url, is_url, join, split, split_peg};
use super::{KeywordContext, KeywordTable, KeywordTarget, Resolver, SuffixOrigin, WorkingCopy};
use crate::config::types::KeywordSpec;
use crate::error::{ResolutionError, WrapError};

const WC_URL: &str = "http://server/Project/trunk/some/path";

struct FakeWc(HashMap<&'static str, &'static str>);

impl FakeWc {
    fn at(url: &'static str) -> Self {
        Self(HashMap::from([(".", url)]))
    }
}

impl WorkingCopy for FakeWc {
    fn url_of<'a>(&'a self, target: &'a str) -> BoxFuture<'a, crate::error::Result<String>> {
        Box::pin(async move {
            self.0
                .get(target)
                .map(|url| (*url).to_string())
                .ok_or_else(|| anyhow::anyhow!("'{target}' is not a working copy"))
        })
    }
}

fn aliases() -> BTreeMap<String, String> {
    BTreeMap::from([("proj".to_string(), "http://server/Project".to_string())])
}

fn env(name: &str) -> Option<String> {
    match name {
        "USER" => Some("bob".to_string()),
        "P" => Some("http://server/Other/trunk".to_string()),
        _ => None,
    }
}

// --- split / join ---

#[test]
fn test_split_role_segments() {
    let cases = [
        "http://server/Project/trunk/some/path",
        "http://server/Project/tags/v1.0",
        "http://server/Project/branches/guests/bob/fix/src@42",
        "http://server/Project/tags/guests",
        "^/branches/feature",
        "http://server/Project/trunkish/x",
    ];
    let rendered: Vec<_> = cases
        .iter()
        .map(|url| match split(url) {
            Some(p) => format!("{} | {} | {}", p.head, p.middle, p.tail),
            None => format!("{url} (no role)"),
        })
        .collect();
    insta::assert_debug_snapshot!(rendered, @r#"
    [
        "http://server/Project/ | trunk | /some/path",
        "http://server/Project/ | tags/v1.0 | ",
        "http://server/Project/ | branches/guests/bob/fix | /src@42",
        "http://server/Project/ | tags/guests | ",
        "^/ | branches/feature | ",
        "http://server/Project/trunkish/x (no role)",
    ]
    "#);
}

#[test]
fn test_join_slashes() {
    assert_eq!(join("http://h/P/", "trunk", ""), "http://h/P/trunk");
    assert_eq!(join("http://h/P", "/tags/x/", "/a/b"), "http://h/P/tags/x/a/b");
    assert_eq!(join("http://h/P/trunk", "", "@12"), "http://h/P/trunk@12");
    assert_eq!(join("http://h/P/tags", "", "name/"), "http://h/P/tags/name");
}

#[test]
fn test_split_peg() {
    assert_eq!(split_peg("http://h/P/trunk@123"), ("http://h/P/trunk", "@123"));
    assert_eq!(split_peg("http://h/P/trunk@HEAD"), ("http://h/P/trunk@HEAD", ""));
    assert_eq!(split_peg("svn://user@host/x"), ("svn://user@host/x", ""));
}

#[test]
fn test_url_detection() {
    assert!(is_url("http://server/x"));
    assert!(is_url("svn+ssh://host/repo"));
    assert!(!is_url("//proj/x"));
    assert!(!is_url("^/trunk"));
    assert!(is_repository_url("^/trunk"));
    assert!(!is_url("C:/work"));
}

#[test]
fn test_keyword_context_from_url() {
    let ctx = KeywordContext::from_url(WC_URL);
    assert_eq!(ctx.base, "http://server/Project/");
    assert_eq!(ctx.middle.as_deref(), Some("trunk"));
    assert_eq!(ctx.suffix, "some/path");

    let root = KeywordContext::from_url("http://server/Project");
    assert_eq!(root.base, "http://server/Project");
    assert_eq!(root.middle, None);
    assert!(root.suffix.is_empty());
}

// --- keyword table ---

#[test]
fn test_keyword_find_boundaries() {
    let table = KeywordTable::default();

    let found = table.find("tag:v1/src").map(|m| (m.before, m.name, m.after));
    assert_eq!(found, Some(("", "tag", "v1/src")));

    let found = table.find("../other/br:fix").map(|m| (m.before, m.name, m.after));
    assert_eq!(found, Some(("../other/", "br", "fix")));

    // drive letters, URL schemes and unregistered words are not keywords
    assert!(table.find("C:/work").is_none());
    assert!(table.find("http://server/x").is_none());
    assert!(table.find("zz:foo").is_none());
    assert!(table.find("xtr:foo").is_none());
}

#[test]
fn test_keyword_overrides() {
    let specs = BTreeMap::from([
        (
            "tag".to_string(),
            KeywordSpec {
                head: Some("tags/archive".to_string()),
                ..KeywordSpec::default()
            },
        ),
        (
            "doc".to_string(),
            KeywordSpec {
                middle: Some("docs".to_string()),
                ..KeywordSpec::default()
            },
        ),
    ]);
    let table = KeywordTable::with_overrides(&specs);
    assert_eq!(
        table.get("tag"),
        Some(&KeywordTarget::Head("tags/archive".to_string()))
    );
    assert_eq!(table.get("doc"), Some(&KeywordTarget::Middle("docs".to_string())));
    assert!(table.contains("tr"));
}

// --- resolver ---

#[tokio::test]
async fn test_resolve_alias() {
    let aliases = aliases();
    let keywords = KeywordTable::default();
    let wc = FakeWc::at(WC_URL);
    let resolver = Resolver::new(&aliases, &keywords, &wc);

    let resolved = resolver.resolve("//proj/some/path").await.unwrap();
    assert_eq!(resolved.url, "http://server/Project/some/path");

    let err = resolver.resolve("//nope/x").await.unwrap_err();
    assert!(matches!(
        err,
        WrapError::Resolution(ref e) if matches!(**e, ResolutionError::UnknownAlias { .. })
    ));
}

#[tokio::test]
async fn test_resolve_keywords_from_working_copy() {
    let aliases = aliases();
    let keywords = KeywordTable::default();
    let wc = FakeWc::at(WC_URL);
    let resolver = Resolver::new(&aliases, &keywords, &wc).with_env(env);

    let mut urls = Vec::new();
    for token in ["tr:", "tag:tagname", "tag:tagname/sub@7", "mb:", "ws:", "pr:", "//proj/br:x"] {
        urls.push(resolver.resolve(token).await.unwrap().url);
    }
    insta::assert_debug_snapshot!(urls, @r#"
    [
        "http://server/Project/trunk",
        "http://server/Project/tags/tagname",
        "http://server/Project/tags/tagname/sub@7",
        "http://server/Project/branches/guests/bob",
        "http://server/Project/trunk/workspace",
        "http://server/Other/trunk",
        "http://server/Project/branches/x",
    ]
    "#);
}

#[tokio::test]
async fn test_resolve_passthrough_is_identity() {
    let aliases = aliases();
    let keywords = KeywordTable::default();
    let wc = FakeWc(HashMap::new());
    let resolver = Resolver::new(&aliases, &keywords, &wc);

    for token in ["foo.c", "http://server/x", "C:/work", "https://host:8443/repo", "^/trunk"] {
        let resolved = resolver.resolve(token).await.unwrap();
        assert_eq!(resolved.url, token);
    }
}

#[tokio::test]
async fn test_resolve_embedded_url() {
    let aliases = aliases();
    let keywords = KeywordTable::default();
    let wc = FakeWc(HashMap::new());
    let resolver = Resolver::new(&aliases, &keywords, &wc);

    let resolved = resolver.resolve("some/dir/http://elsewhere/x").await.unwrap();
    assert_eq!(resolved.url, "http://elsewhere/x");
}

#[tokio::test]
async fn test_resolve_keyword_without_context() {
    let aliases = aliases();
    let keywords = KeywordTable::default();
    let wc = FakeWc(HashMap::new());
    let resolver = Resolver::new(&aliases, &keywords, &wc);

    let err = resolver.resolve("tr:").await.unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"keyword 'tr:' needs a working copy at '.': '.' is not a working copy"
    );
}

#[tokio::test]
async fn test_resolve_missing_env() {
    let aliases = aliases();
    let keywords = KeywordTable::default();
    let wc = FakeWc::at(WC_URL);
    let resolver = Resolver::new(&aliases, &keywords, &wc).with_env(|_| None);

    let err = resolver.resolve("pp:").await.unwrap_err();
    assert_eq!(err.to_string(), "keyword 'pp:' needs environment variable PP");
}

#[tokio::test]
async fn test_resolve_mapping_loop() {
    let aliases = BTreeMap::from([("a".to_string(), "//b".to_string()), ("b".to_string(), "//a".to_string())]);
    let keywords = KeywordTable::default();
    let wc = FakeWc(HashMap::new());
    let resolver = Resolver::new(&aliases, &keywords, &wc);

    let err = resolver.resolve("//a").await.unwrap_err();
    assert!(err.to_string().starts_with("mapping loop"));
}

#[tokio::test]
async fn test_infer_suffix() {
    let aliases = aliases();
    let keywords = KeywordTable::default();
    let wc = FakeWc::at(WC_URL);
    let resolver = Resolver::new(&aliases, &keywords, &wc);

    let inferred = resolver
        .infer_suffix("http://server/Project/tags/tagname", ".")
        .await
        .unwrap();
    assert_eq!(inferred.url, "http://server/Project/tags/tagname/some/path");
    assert_eq!(inferred.suffix, SuffixOrigin::Inferred);

    let pegged = resolver.infer_suffix("^/branches/fix@12", ".").await.unwrap();
    assert_eq!(pegged.url, "^/branches/fix/some/path@12");

    let explicit = resolver
        .infer_suffix("http://server/Project/tags/t/other", ".")
        .await
        .unwrap();
    assert_eq!(explicit.suffix, SuffixOrigin::Explicit);
    assert_eq!(explicit.url, "http://server/Project/tags/t/other");

    let opted_out = resolver
        .infer_suffix("http://server/Project/tags/t/.", ".")
        .await
        .unwrap();
    assert_eq!(opted_out.suffix, SuffixOrigin::OptedOut);
}
