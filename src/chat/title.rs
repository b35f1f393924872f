//! Default titles for new tabs.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static DEFAULT_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^chat\s+([0-9]+)$").expect("title pattern is valid"));

/// `"Chat {n}"` with the smallest positive `n` not already taken.
///
/// A title counts as taken when, trimmed, it reads `chat <integer>` in any case.
pub fn next_default_title<'a, I>(titles: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let used: HashSet<u64> = titles
        .into_iter()
        .filter_map(|title| {
            DEFAULT_TITLE_RE
                .captures(title.trim())
                .and_then(|caps| caps[1].parse().ok())
        })
        .collect();

    let n = (1..).find(|n| !used.contains(n)).unwrap_or(1);
    format!("Chat {n}")
}
