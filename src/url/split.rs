// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Splitting repository URLs around their role segment.
//!
//! ```text
//! http://server/Project/branches/guests/bob/fix/src/lib@42
//! |-------- head ------|------- middle -------|-- tail ---|
//!                       branches/guests/bob/fix  /src/lib@42
//! ```
//!
//! The middle is `trunk`, `tags/NAME`, `branches/NAME` or
//! `tags|branches/guests/USER/NAME`. Only the tail may carry a peg revision.

/// A URL split into head, role segment and tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// Everything before the role segment, always ending in `/`.
    pub head: &'a str,
    /// Role segment without surrounding slashes.
    pub middle: &'a str,
    /// Remainder, empty or starting with `/` or `@`.
    pub tail: &'a str,
}

/// Splits `url` at its leftmost role segment.
///
/// Returns `None` when the URL contains no recognizable role segment.
#[must_use]
pub fn split(url: &str) -> Option<UrlParts<'_>> {
    url.match_indices('/').find_map(|(slash, _)| {
        let rest = &url[slash + 1..];
        role_len(rest).map(|len| UrlParts {
            head: &url[..=slash],
            middle: &rest[..len],
            tail: &rest[len..],
        })
    })
}

fn role_len(rest: &str) -> Option<usize> {
    if let Some(after) = rest.strip_prefix("trunk")
        && ends_segment(after)
    {
        return Some("trunk".len());
    }
    ["tags/", "branches/"].into_iter().find_map(|kind| {
        let after = rest.strip_prefix(kind)?;
        let guest = after.strip_prefix("guests/").and_then(|user_part| {
            let user = segment_len(user_part);
            let name_part = user_part[user..].strip_prefix('/')?;
            let name = segment_len(name_part);
            (user > 0 && name > 0).then(|| "guests/".len() + user + 1 + name)
        });
        let len = guest.or_else(|| Some(segment_len(after)).filter(|&n| n > 0))?;
        Some(kind.len() + len)
    })
}

fn segment_len(s: &str) -> usize {
    s.find(['/', '@']).unwrap_or(s.len())
}

fn ends_segment(s: &str) -> bool {
    s.is_empty() || s.starts_with('/') || s.starts_with('@')
}

/// Joins URL pieces, inserting slashes only where needed.
///
/// Slashes around `middle` and `tail` are dropped; a tail starting with `@`
/// is appended directly.
#[must_use]
pub fn join(head: &str, middle: &str, tail: &str) -> String {
    let mut url = head.to_string();
    let middle = middle.trim_matches('/');
    let tail = tail.trim_matches('/');
    if !middle.is_empty() {
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(middle);
    }
    if !tail.is_empty() {
        if !tail.starts_with('@') && !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(tail);
    }
    url
}

/// Separates a trailing numeric peg revision (`@123`) from the URL.
#[must_use]
pub fn split_peg(url: &str) -> (&str, &str) {
    if let Some(at) = url.rfind('@') {
        let digits = &url[at + 1..];
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return url.split_at(at);
        }
    }
    (url, "")
}

/// Length of the `scheme` in `scheme://...`, if `s` starts with one.
pub(crate) fn scheme_len(s: &str) -> Option<usize> {
    let len: usize = s
        .chars()
        .take_while(|&c| is_word(c) || c == '+' || c == '.' || c == '-')
        .map(char::len_utf8)
        .sum();
    (len > 0 && s[len..].starts_with("://")).then_some(len)
}

/// Whether `s` is an absolute URL (`scheme://...`).
#[must_use]
pub fn is_url(s: &str) -> bool {
    scheme_len(s).is_some()
}

/// Whether `s` is an absolute or repository-relative (`^/`) URL.
#[must_use]
pub fn is_repository_url(s: &str) -> bool {
    is_url(s) || s.starts_with("^/")
}

pub(crate) fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
