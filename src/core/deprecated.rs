//! Deprecated ngconsole API calls and their replacements.

use std::sync::LazyLock;

use regex::Regex;

use super::scan::{Occurrence, OccurrenceKind};

static I18N_GET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$\$I18N\.get\((.*?)\)").unwrap());

static MSG_GET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$\$MSG\.get\((.*?)\)").unwrap());

static BIG_BOX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\.bigBox\(\{[\s\S]*?\}\);?").unwrap());

static WIDGET_GRID_MODAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\$modal\.open\(\{\s+template\s*:\s*"<section id='widget-grid'>[\s\S]*?controller\s*:[\s\S]*?size\s*:[\s\S]*?\}\);?"#,
    )
    .unwrap()
});

/// One deprecated call pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeprecatedApi {
    /// `$$$I18N.get(...)`
    I18nGet,
    /// `$$$MSG.get(...)`
    MsgGet,
    /// `$.bigBox({ ... })`
    BigBox,
    /// `$modal.open({ template: "<section id='widget-grid'>..." ... })`
    WidgetGridModal,
}

impl DeprecatedApi {
    /// Rules in the order they are checked.
    pub const ALL: [DeprecatedApi; 4] = [
        DeprecatedApi::I18nGet,
        DeprecatedApi::MsgGet,
        DeprecatedApi::BigBox,
        DeprecatedApi::WidgetGridModal,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            DeprecatedApi::I18nGet => &*I18N_GET_REGEX,
            DeprecatedApi::MsgGet => &*MSG_GET_REGEX,
            DeprecatedApi::BigBox => &*BIG_BOX_REGEX,
            DeprecatedApi::WidgetGridModal => &*WIDGET_GRID_MODAL_REGEX,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            DeprecatedApi::I18nGet => {
                "`$$$I18N.get()` is deprecated, use `i18n.translateText()` instead"
            }
            DeprecatedApi::MsgGet => {
                "`$$$MSG.get()` is deprecated, use `i18n.translateCode()` instead"
            }
            DeprecatedApi::BigBox => {
                "`$.bigBox({ ... })` is deprecated, use `uihelper.alertXXX()` instead"
            }
            DeprecatedApi::WidgetGridModal => "use `uihelper.confirmWithModal({ ... })` instead",
        }
    }

    fn replacement(self) -> Option<&'static str> {
        match self {
            DeprecatedApi::I18nGet => Some("i18n.translateText(${1})"),
            DeprecatedApi::MsgGet => Some("i18n.translateCode(${1})"),
            DeprecatedApi::BigBox | DeprecatedApi::WidgetGridModal => None,
        }
    }

    pub fn is_fixable(self) -> bool {
        self.replacement().is_some()
    }

    /// The wrapper file is where `$.bigBox` legitimately lives.
    fn allowed_in_wrapper(self) -> bool {
        matches!(self, DeprecatedApi::BigBox)
    }

    /// Rewrites the first deprecated call in `code`.
    ///
    /// Returns `None` when the rule has no replacement or `code` contains no
    /// call to rewrite.
    ///
    /// ```
    /// use vdife::core::DeprecatedApi;
    ///
    /// let fixed = DeprecatedApi::I18nGet.rewrite("$$$I18N.get('x')");
    /// assert_eq!(fixed.as_deref(), Some("i18n.translateText('x')"));
    /// assert_eq!(DeprecatedApi::I18nGet.rewrite("i18n.translateText('x')"), None);
    /// ```
    pub fn rewrite(self, code: &str) -> Option<String> {
        let replacement = self.replacement()?;
        let regex = self.regex();
        regex
            .is_match(code)
            .then(|| regex.replace(code, replacement).into_owned())
    }
}

/// Scans `text` for every deprecated call, rule by rule.
///
/// `is_wrapper_file` skips the rule whose call the wrapper file legitimately
/// contains.
pub fn scan_deprecated_apis(
    text: &str,
    is_wrapper_file: bool,
) -> impl Iterator<Item = Occurrence> + '_ {
    DeprecatedApi::ALL
        .into_iter()
        .filter(move |api| !(is_wrapper_file && api.allowed_in_wrapper()))
        .flat_map(move |api| {
            api.regex().find_iter(text).map(move |m| Occurrence {
                span: m.range(),
                kind: OccurrenceKind::DeprecatedCall { api },
            })
        })
}

/// Applies the first fixable rule that rewrites `code`.
pub fn fix_deprecated(code: &str) -> Option<String> {
    DeprecatedApi::ALL
        .into_iter()
        .filter_map(|api| api.rewrite(code))
        .find(|fixed| fixed != code)
}
