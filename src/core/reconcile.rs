//! Diagnostics produced from scanned occurrences, and their quick fixes.

use std::{fmt, ops::Range};

use super::{
    pack::LanguagePack,
    scan::{Classification, Occurrence, OccurrenceKind},
};

/// Which check produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSource {
    /// Localization key missing from ngconsole_resources.
    Localize,
    DeprecatedApi,
}

impl fmt::Display for DiagnosticSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSource::Localize => write!(f, "missing-localize"),
            DiagnosticSource::DeprecatedApi => write!(f, "deprecated-api"),
        }
    }
}

/// An error-severity finding in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Range<usize>,
    pub message: String,
    pub source: DiagnosticSource,
    /// The missing key, for localization diagnostics.
    pub code: Option<String>,
    /// Whether a rewrite exists for a deprecated call.
    pub fixable: bool,
}

/// Quick fix offered for a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickFix {
    /// Add the key to the language pack with itself as value.
    AddLocalize { key: String },
    /// Rewrite the deprecated call in the given range.
    FixDeprecated { span: Range<usize> },
}

impl QuickFix {
    pub fn title(&self) -> String {
        match self {
            QuickFix::AddLocalize { key } => {
                format!("Add translation {} to ngconsole_resources", key)
            }
            QuickFix::FixDeprecated { .. } => "Convert to new API".to_string(),
        }
    }
}

impl Diagnostic {
    pub fn quick_fix(&self) -> Option<QuickFix> {
        match self.source {
            DiagnosticSource::Localize => self
                .code
                .clone()
                .map(|key| QuickFix::AddLocalize { key }),
            DiagnosticSource::DeprecatedApi if self.fixable => Some(QuickFix::FixDeprecated {
                span: self.span.clone(),
            }),
            DiagnosticSource::DeprecatedApi => None,
        }
    }
}

/// Turns occurrences into diagnostics.
///
/// Localization keys are only checked when a pack is available. Keys present
/// in the pack, blank keys and interpolated keys produce nothing.
pub fn reconcile<I>(occurrences: I, pack: Option<&LanguagePack>) -> Vec<Diagnostic>
where
    I: IntoIterator<Item = Occurrence>,
{
    occurrences
        .into_iter()
        .filter_map(|occurrence| {
            let classification = occurrence.classify(pack)?;
            match (classification, occurrence.kind) {
                (Classification::Missing, OccurrenceKind::LocalizeKey { key }) => Some(Diagnostic {
                    span: occurrence.span,
                    message: format!("missing translation: {}", key),
                    source: DiagnosticSource::Localize,
                    code: Some(key),
                    fixable: false,
                }),
                (
                    Classification::Fixable | Classification::Unfixable,
                    OccurrenceKind::DeprecatedCall { api },
                ) => Some(Diagnostic {
                    span: occurrence.span,
                    message: api.message().to_string(),
                    source: DiagnosticSource::DeprecatedApi,
                    code: None,
                    fixable: classification == Classification::Fixable,
                }),
                _ => None,
            }
        })
        .collect()
}
