//! Localization attribute scanning over raw HTML text.
//!
//! Matches attributes such as `localize="key"`, `data-localize-title='key'`.
//! Attributes inside `<!-- ... -->` are skipped, and keys containing
//! `{{ ... }}` interpolation are reported separately since they cannot be
//! checked against a language pack.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use super::{deprecated::DeprecatedApi, pack::LanguagePack};

static LOCALIZE_ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // Group 1: `data-` prefix; group 2/3: double/single quoted key
    Regex::new(
        r#"(data-)?localize(?:-title|-placeholder|-href|-tip)?=(?:"([^"\r\n]+)"|'([^'\r\n]+)')"#,
    )
    .unwrap()
});

static INTERPOLATION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{.*?\}\}").unwrap());

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Attribute prefix stripped by key synchronization.
pub const DATA_PREFIX: &str = "data-";

/// One matched span of interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Byte range of the whole match.
    pub span: Range<usize>,
    pub kind: OccurrenceKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OccurrenceKind {
    /// A localization key to check against the language pack.
    LocalizeKey { key: String },
    /// A key built with `{{ ... }}` interpolation.
    InterpolatedKey { key: String },
    DeprecatedCall { api: DeprecatedApi },
}

/// How an occurrence relates to the language pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Exists,
    Missing,
    /// Whitespace-only key; never checked or added.
    Blank,
    Interpolated,
    Fixable,
    Unfixable,
}

impl Occurrence {
    /// Returns `None` for a localization key when there is no pack to check
    /// it against.
    pub fn classify(&self, pack: Option<&LanguagePack>) -> Option<Classification> {
        let classification = match &self.kind {
            OccurrenceKind::LocalizeKey { key } if key.is_empty() => Classification::Blank,
            OccurrenceKind::LocalizeKey { key } => {
                if pack?.contains(key) {
                    Classification::Exists
                } else {
                    Classification::Missing
                }
            }
            OccurrenceKind::InterpolatedKey { .. } => Classification::Interpolated,
            OccurrenceKind::DeprecatedCall { api } if api.is_fixable() => Classification::Fixable,
            OccurrenceKind::DeprecatedCall { .. } => Classification::Unfixable,
        };
        Some(classification)
    }
}

/// A raw localization attribute match, before comment filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatch<'a> {
    pub span: Range<usize>,
    /// Quoted content with surrounding whitespace trimmed.
    pub key: &'a str,
    pub data_prefixed: bool,
    pub in_comment: bool,
}

impl AttributeMatch<'_> {
    pub fn is_interpolated(&self) -> bool {
        INTERPOLATION_REGEX.is_match(self.key)
    }
}

/// Byte ranges of `<!-- ... -->` comments.
///
/// Each opening marker pairs with the next closing marker after it. An
/// unterminated comment ends the scan without producing a range.
pub fn comment_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut cursor = 0;
    while let Some(open) = text[cursor..].find(COMMENT_OPEN) {
        let start = cursor + open;
        let Some(close) = text[start..].find(COMMENT_CLOSE) else {
            break;
        };
        let end = start + close + COMMENT_CLOSE.len();
        ranges.push(start..end);
        cursor = end;
    }
    ranges
}

/// Every localization attribute in `text`, including those in comments.
///
/// Each call starts a fresh scan; nothing carries over between calls.
pub fn attribute_matches(text: &str) -> impl Iterator<Item = AttributeMatch<'_>> {
    let comments = comment_ranges(text);
    LOCALIZE_ATTRIBUTE_REGEX
        .captures_iter(text)
        .filter_map(move |caps| {
            let whole = caps.get(0)?;
            let key = caps.get(2).or_else(|| caps.get(3))?.as_str().trim();
            let span = whole.range();
            let in_comment = comments
                .iter()
                .any(|c| c.start <= span.start && span.end <= c.end);
            Some(AttributeMatch {
                span,
                key,
                data_prefixed: caps.get(1).is_some(),
                in_comment,
            })
        })
}

/// Localization key occurrences outside comments.
pub fn scan_localization_keys(text: &str) -> impl Iterator<Item = Occurrence> + '_ {
    attribute_matches(text)
        .filter(|m| !m.in_comment)
        .map(|m| {
            let key = m.key.to_string();
            let kind = if m.is_interpolated() {
                OccurrenceKind::InterpolatedKey { key }
            } else {
                OccurrenceKind::LocalizeKey { key }
            };
            Occurrence { span: m.span, kind }
        })
}
