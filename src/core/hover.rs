//! Hover lookup: the localize key under the cursor and its translation.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use super::{pack::LanguagePack, text::floor_char_boundary};

// Line text before the cursor must end inside a localize attribute value.
static HOVER_CONTEXT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:data-)?localize(?:-title|-place[hH]older|-href|-tip)?\s*=\s*["'].*$"#)
        .unwrap()
});

/// Translation shown for the key under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hover {
    pub span: Range<usize>,
    pub key: String,
    pub translation: Option<String>,
}

impl Hover {
    pub fn contents(&self) -> String {
        format!(
            "translation: {}",
            self.translation.as_deref().unwrap_or("(missing)")
        )
    }
}

/// Looks up the key under `offset` when it sits in a localize attribute.
pub fn hover_at(text: &str, offset: usize, pack: &LanguagePack) -> Option<Hover> {
    let offset = floor_char_boundary(text, offset);
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    if !HOVER_CONTEXT_REGEX.is_match(&text[line_start..offset]) {
        return None;
    }

    let span = word_range_at(text, offset)?;
    let key = &text[span.clone()];
    Some(Hover {
        key: key.to_string(),
        translation: pack.display_value(key),
        span,
    })
}

fn is_key_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '"' | '\'' | '<' | '>' | '=' | '`' | '{' | '}')
}

fn word_range_at(text: &str, offset: usize) -> Option<Range<usize>> {
    let start = text[..offset]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_key_char(*c))
        .last()
        .map_or(offset, |(i, _)| i);
    let end = text[offset..]
        .char_indices()
        .find(|(_, c)| !is_key_char(*c))
        .map_or(text.len(), |(i, _)| offset + i);
    (start < end).then_some(start..end)
}
