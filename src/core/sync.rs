//! Language pack mutations driven by document text.

use std::sync::LazyLock;

use regex::Regex;

use super::{
    pack::LanguagePack,
    scan::{DATA_PREFIX, attribute_matches},
};

static ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(.+?)\s*=\s*(.+?)\s*$").unwrap());

/// Result of synchronizing a document with its language pack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Keys inserted into the pack, in document order.
    pub added: Vec<String>,
    /// Replacement for the whole document, present only when keys were added.
    pub text: Option<String>,
}

impl SyncOutcome {
    pub fn has_new_keys(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Adds every missing key in `text` to `pack` (value = key) and strips the
/// `data-` prefix from every matched attribute, in a single pass.
///
/// The caller persists the pack and replaces the document when
/// [`SyncOutcome::has_new_keys`] is true.
pub fn sync_keys(pack: &mut LanguagePack, text: &str) -> SyncOutcome {
    let mut added = Vec::new();
    let mut rewritten = String::with_capacity(text.len());
    let mut last = 0;

    for m in attribute_matches(text) {
        if !m.in_comment && !m.key.is_empty() && !m.is_interpolated() && !pack.contains(m.key) {
            pack.insert(m.key, m.key);
            added.push(m.key.to_string());
        }

        let matched = &text[m.span.clone()];
        rewritten.push_str(&text[last..m.span.start]);
        rewritten.push_str(if m.data_prefixed {
            &matched[DATA_PREFIX.len()..]
        } else {
            matched
        });
        last = m.span.end;
    }
    rewritten.push_str(&text[last..]);

    let text = (!added.is_empty()).then_some(rewritten);
    SyncOutcome { added, text }
}

/// Parses `key=value` input, trimming whitespace around both parts.
///
/// ```
/// use vdife::core::parse_entry;
///
/// assert_eq!(parse_entry("  title = Hello world "), Some(("title", "Hello world")));
/// assert_eq!(parse_entry("no separator"), None);
/// ```
pub fn parse_entry(input: &str) -> Option<(&str, &str)> {
    let caps = ENTRY_REGEX.captures(input)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}
