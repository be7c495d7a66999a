use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================
// Tool parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenDocumentParams {
    /// Path of the HTML view or script
    pub path: String,
    /// Document text; read from disk when omitted
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDocumentParams {
    /// Path of an open document
    pub path: String,
    /// New full text of the document
    pub text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentParams {
    /// Path of an open document
    pub path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoverParams {
    /// Path of an open HTML view
    pub path: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub col: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewLocalizeParams {
    /// Path of an open HTML view
    pub path: String,
    /// Entry in `key=value` form
    pub entry: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddLocalizeParams {
    /// Path of an open HTML view
    pub path: String,
    pub key: String,
    /// Translation; defaults to the key itself
    pub value: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixDeprecatedParams {
    /// Path of an open script
    pub path: String,
    /// 1-based line of the call to fix; every fixable call when omitted
    pub line: Option<u32>,
    /// 1-based column of the call to fix
    pub col: Option<u32>,
}

// ============================================================
// Tool results
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticItem {
    pub line: usize,
    pub col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub message: String,
    /// `missing-localize` or `deprecated-api`
    pub source: String,
    /// The missing key, for localization diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub fixable: bool,
    /// Title of the quick fix, if one is offered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_fix: Option<String>,
}

/// State of one open document after a tool call.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResult {
    pub path: String,
    pub language: String,
    /// `lang.json` the document resolves to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_file: Option<String>,
    pub diagnostics: Vec<DiagnosticItem>,
    /// Errors raised while handling the call, e.g. a branch mismatch
    pub notifications: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloseDocumentResult {
    pub path: String,
    pub closed: bool,
    /// Language packs still cached after closing
    pub cached_packs: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoverResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncLocalizeResult {
    /// Keys added to the language pack, in document order
    pub added: Vec<String>,
    /// Rewritten document text, present when keys were added
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub document: DocumentResult,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddLocalizeResult {
    pub added: bool,
    pub document: DocumentResult,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditItem {
    pub line: usize,
    pub col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub new_text: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixDeprecatedResult {
    /// Applied edits, positioned in the text before the fix
    pub edits: Vec<EditItem>,
    pub text: String,
    pub document: DocumentResult,
}
