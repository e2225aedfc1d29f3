// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `svn helpwrap` text.

use std::fmt::Write;
use std::path::Path;

use crate::url::keyword::USER_PLACEHOLDER;
use crate::url::{KeywordTable, KeywordTarget};

const COMMANDS: &str = "\
status (st, stat) - show status (prettied output)
stnames           - status output, names only
stmod             - names of modified (versioned) paths
stmodroot         - top-level directories holding modified paths
stmodrevert       - revert every modified path
update (up)       - update (prettied output)
switch (sw)       - switch (prettied output) with url adjustment
merge             - merge with url adjustment
checkout (co)     - checkout (prettied output)
diff, ediff (di)  - highlighted diff output with linewise svn:externals diffing
bdiff, ebdiff     - like diff but ignoring space changes
kdiff (kdiff3)    - diff with \"--diff-cmd kdiff3\"
pdiff             - generate patch-compatible diff; equivalent to:
                    diff --diff-cmd diff -x -U1000000 --patch-compatible
br NAME           - copy trunk of the current project to branches/NAME
ee                - propedit svn:externals
ei                - propedit svn:ignore
pge               - propget svn:externals
pgi               - propget svn:ignore
url [PATH...]     - show URL as received from \"svn info\"
mergeraw RAWPATH [WCPATH]
                  - copy an unversioned tree over a working copy and
                    add the new files and directories
helpwrap          - this help";

const OPTIONS: &str = "\
svnwrap options:
  --color on|off|auto       use color in output (defaults to auto)
  --no-pager                disable the automatic use of a pager
  --ie                      abbreviation for --ignore-externals
  --debug                   enable debug logging
  --log-level N             console log level (0-6)
  --log-file FILE           also log to FILE
  --config FILE             read FILE on top of the per-user configuration
  --svn path/to/svn         change path to the svn client";

const ALIASES: &str = "\
\"//alias\" at start of URL expands as defined in the [aliases] table. E.g., if:
      proj = \"https://server/SomeProject\"
  then the following two operations would be identical:
    svn co //proj/trunk/etc
    svn co https://server/SomeProject/trunk/etc

\"keyword:\" mapping for URLs:
- The keyword (including colon) may be at the URL start or after any \"/\".
- URL is composed of _prefix_, keyword, _suffix_
- _prefix_ + keyword become new _prefix_; _suffix_ (if present) is appended.
- _head_ means that part of _prefix_ which comes before \"trunk\", \"tags\", etc.
- _middle-or-trunk_ is the current \"middle\" part (e.g., \"trunk\",
  \"tags/tagname\", ...) or \"trunk\" if there is none.";

const ADJUSTMENT: &str = "\
\"URL adjustment\" infers the \"tail\" of a URL from the working copy. In a
working copy checked out from http://server/repo/trunk/comp, the tail \"comp\"
need not be supplied for switch and merge, so these are equivalent:
  svn switch ^/branches/somebranch/comp
  svn switch ^/branches/somebranch

To avoid URL adjustment, append \"/.\" to the end of the URL, e.g.:
  svn switch ^/branches/somebranch/.

If your editor isn't launching correctly, set SVN_EDITOR or [editor] cmd.";

/// What `keyword:` expands to, in the notation of the help text.
fn describe(target: &KeywordTarget) -> String {
    match target {
        KeywordTarget::Head(path) => format!("_head_/{}", path.replace(USER_PLACEHOLDER, "$USER")),
        KeywordTarget::Middle(path) => format!("_head_/_middle-or-trunk_/{path}"),
        KeywordTarget::Env(var) => format!("${var}"),
    }
}

/// Renders the extension help.
///
/// `options` are the effective configuration lines from
/// `Config::format_options`.
#[must_use]
pub fn helpwrap_text(keywords: &KeywordTable, config_path: &Path, options: &[String]) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "svnwrap version {} providing:", env!("CARGO_PKG_VERSION"));
    text.push_str(
        "- Suppression of noisy status output\n\
         - Highlighting of status, diff, and other outputs\n\
         - URL aliases and mapping\n\
         - URL adjustment to infer the \"tail\" of a URL from context (see below).\n\n",
    );
    text.push_str(COMMANDS);
    text.push_str("\n\n");
    text.push_str(OPTIONS);
    text.push_str("\n\n");

    let _ = writeln!(text, "svnwrap configuration file: {}", config_path.display());
    for line in options {
        let _ = writeln!(text, "  {line}");
    }
    text.push('\n');

    text.push_str(ALIASES);
    text.push_str("\n\nKeyword     _prefix_ + keyword becomes:\n");
    text.push_str("-------     -------------------------------------------------------\n");
    for name in keywords.names() {
        if let Some(target) = keywords.get(name) {
            let _ = writeln!(text, "{:<12}{}", format!("{name}:"), describe(target));
        }
    }
    text.push_str("\n(Above, $NAME stands for environment variable NAME.)\n\n");
    text.push_str(ADJUSTMENT);
    text.push('\n');
    text
}
