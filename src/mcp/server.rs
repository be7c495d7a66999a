use std::{ops::Range, path::PathBuf, sync::Arc};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::core::{
    DocumentId, Language, LineIndex, Position, TextEdit, Workspace, WorkspaceSettings,
};

use super::types::{
    AddLocalizeParams, AddLocalizeResult, ChangeDocumentParams, CloseDocumentResult,
    DiagnosticItem, DocumentParams, DocumentResult, EditItem, FixDeprecatedParams,
    FixDeprecatedResult, HoverParams, HoverResult, NewLocalizeParams, OpenDocumentParams,
    SyncLocalizeResult,
};

/// MCP server holding one document session for its whole lifetime.
#[derive(Clone)]
pub struct VdifeMcpServer {
    workspace: Arc<Mutex<Workspace>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl VdifeMcpServer {
    pub fn new(settings: WorkspaceSettings) -> Self {
        Self {
            workspace: Arc::new(Mutex::new(Workspace::new(settings))),
            tool_router: Self::tool_router(),
        }
    }

    /// Open a document and compute its diagnostics
    #[tool(
        description = "Open an ngconsole HTML view or script and return its diagnostics: localization keys missing from ngconsole_resources, or deprecated API calls. Reopening a path replaces the previous session of that document."
    )]
    pub async fn open_document(
        &self,
        params: Parameters<OpenDocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = normalize(&params.0.path);
        let text = match params.0.text {
            Some(text) => text,
            None => tokio::fs::read_to_string(&path).await.map_err(|e| {
                McpError::invalid_params(format!("Failed to read {}: {}", path.display(), e), None)
            })?,
        };

        let mut workspace = self.workspace.lock().await;
        if let Some(previous) = workspace.find_document(&path) {
            workspace.close(previous);
        }
        let id = workspace.open(path, text).await;
        to_result(&document_result(&mut workspace, id))
    }

    /// Replace the text of an open document
    #[tool(description = "Replace the full text of an open document and return its new diagnostics.")]
    pub async fn change_document(
        &self,
        params: Parameters<ChangeDocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut workspace = self.workspace.lock().await;
        let id = open_document_id(&workspace, &params.0.path)?;
        workspace.change(id, params.0.text);
        to_result(&document_result(&mut workspace, id))
    }

    /// Close an open document
    #[tool(
        description = "Close a document. Its language pack is dropped once no open document uses it."
    )]
    pub async fn close_document(
        &self,
        params: Parameters<DocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut workspace = self.workspace.lock().await;
        let path = normalize(&params.0.path);
        let closed = match workspace.find_document(&path) {
            Some(id) => workspace.close(id).is_some(),
            None => false,
        };
        to_result(&CloseDocumentResult {
            path: path.to_string_lossy().into_owned(),
            closed,
            cached_packs: workspace.cached_packs(),
        })
    }

    /// Current diagnostics of an open document
    #[tool(description = "Get the current diagnostics of an open document.")]
    pub async fn get_diagnostics(
        &self,
        params: Parameters<DocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut workspace = self.workspace.lock().await;
        let id = open_document_id(&workspace, &params.0.path)?;
        to_result(&document_result(&mut workspace, id))
    }

    /// Translation of the key at a position
    #[tool(
        description = "Show the translation of the localization key at a 1-based line and column of an open HTML view."
    )]
    pub async fn hover(&self, params: Parameters<HoverParams>) -> Result<CallToolResult, McpError> {
        let workspace = self.workspace.lock().await;
        let id = open_document_id(&workspace, &params.0.path)?;
        let offset = workspace.document(id).and_then(|document| {
            LineIndex::new(&document.text).offset(Position {
                line: params.0.line as usize,
                col: params.0.col as usize,
            })
        });

        let hover = offset.and_then(|offset| workspace.hover(id, offset));
        to_result(&HoverResult {
            found: hover.is_some(),
            contents: hover.as_ref().map(|hover| hover.contents()),
            translation: hover.as_ref().and_then(|hover| hover.translation.clone()),
            key: hover.map(|hover| hover.key),
        })
    }

    /// Add every missing key of a view to its language pack
    #[tool(
        description = "Add every missing localization key of an open HTML view to ngconsole_resources (value = key), save lang.json, and strip `data-` prefixes from localize attributes. Returns the rewritten text when keys were added."
    )]
    pub async fn sync_localize(
        &self,
        params: Parameters<DocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut workspace = self.workspace.lock().await;
        let id = open_document_id(&workspace, &params.0.path)?;
        let outcome = workspace.sync_localize(id).await.unwrap_or_default();
        to_result(&SyncLocalizeResult {
            added: outcome.added,
            text: outcome.text,
            document: document_result(&mut workspace, id),
        })
    }

    /// Add a `key=value` entry
    #[tool(
        description = "Add a translation given as `key=value` to the language pack of an open HTML view and save lang.json. Whitespace around key and value is trimmed."
    )]
    pub async fn new_localize(
        &self,
        params: Parameters<NewLocalizeParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut workspace = self.workspace.lock().await;
        let id = open_document_id(&workspace, &params.0.path)?;
        let added = workspace.new_localize(id, &params.0.entry).await;
        to_result(&AddLocalizeResult {
            added,
            document: document_result(&mut workspace, id),
        })
    }

    /// Add or overwrite one key
    #[tool(
        description = "Add or overwrite a key in the language pack of an open HTML view and save lang.json. This is the quick fix for a missing translation; the value defaults to the key."
    )]
    pub async fn add_localize(
        &self,
        params: Parameters<AddLocalizeParams>,
    ) -> Result<CallToolResult, McpError> {
        let AddLocalizeParams { path, key, value } = params.0;
        let mut workspace = self.workspace.lock().await;
        let id = open_document_id(&workspace, &path)?;
        let value = value.unwrap_or_else(|| key.clone());
        let added = workspace.add_localize(id, key, value).await;
        to_result(&AddLocalizeResult {
            added,
            document: document_result(&mut workspace, id),
        })
    }

    /// Rewrite deprecated calls
    #[tool(
        description = "Rewrite deprecated `$$$I18N.get()` / `$$$MSG.get()` calls of an open script to the i18n API. Fixes the call at line/col, or every fixable call when no position is given."
    )]
    pub async fn fix_deprecated(
        &self,
        params: Parameters<FixDeprecatedParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut workspace = self.workspace.lock().await;
        let id = open_document_id(&workspace, &params.0.path)?;
        let original = workspace
            .document(id)
            .map(|document| document.text.clone())
            .unwrap_or_default();
        let index = LineIndex::new(&original);

        let edits: Vec<TextEdit> = match (params.0.line, params.0.col) {
            (Some(line), Some(col)) => {
                let offset = index.offset(Position {
                    line: line as usize,
                    col: col as usize,
                });
                let span = offset.and_then(|offset| fixable_span_at(&workspace, id, offset));
                span.and_then(|span| workspace.fix_deprecated(id, span))
                    .into_iter()
                    .collect()
            }
            (None, None) => workspace.fix_all_deprecated(id),
            _ => {
                return Err(McpError::invalid_params(
                    "line and col must be given together",
                    None,
                ));
            }
        };

        let edits = edits
            .iter()
            .map(|edit| {
                let (start, end) = span_positions(&index, &edit.span);
                EditItem {
                    line: start.line,
                    col: start.col,
                    end_line: end.line,
                    end_col: end.col,
                    new_text: edit.new_text.clone(),
                }
            })
            .collect();
        let text = workspace
            .document(id)
            .map(|document| document.text.clone())
            .unwrap_or_default();
        to_result(&FixDeprecatedResult {
            edits,
            text,
            document: document_result(&mut workspace, id),
        })
    }
}

#[tool_handler]
impl ServerHandler for VdifeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "vdife checks ngconsole HTML views against the ngconsole_resources language pack \
                 of the matching branch, and flags deprecated API calls in ngconsole scripts.\n\n\
                 Available tools:\n\
                 1. open_document - Open a view or script and get its diagnostics\n\
                 2. change_document - Replace the text of an open document\n\
                 3. close_document - Close a document\n\
                 4. get_diagnostics - Get the diagnostics of an open document\n\
                 5. hover - Show the translation of the key at a position\n\
                 6. sync_localize - Add every missing key of a view to lang.json\n\
                 7. new_localize - Add a `key=value` translation\n\
                 8. add_localize - Add or overwrite one key\n\
                 9. fix_deprecated - Rewrite deprecated i18n calls\n\n\
                 Documents sharing a lang.json share one language pack; adding a key \
                 refreshes the diagnostics of all of them. Check `notifications` in each \
                 result: a branch mismatch between the two repositories disables \
                 localization checks."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server(settings: WorkspaceSettings) -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = VdifeMcpServer::new(settings);
            let workspace = Arc::clone(&service.workspace);
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            workspace.lock().await.shutdown();
            Ok(())
        })
}

/// Canonical form of an existing path; other paths are kept as given.
fn normalize(path: &str) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path))
}

fn open_document_id(workspace: &Workspace, path: &str) -> Result<DocumentId, McpError> {
    workspace
        .find_document(&normalize(path))
        .ok_or_else(|| McpError::invalid_params(format!("Document is not open: {}", path), None))
}

fn fixable_span_at(workspace: &Workspace, id: DocumentId, offset: usize) -> Option<Range<usize>> {
    workspace
        .diagnostics(id)
        .iter()
        .find(|diagnostic| {
            diagnostic.fixable && diagnostic.span.start <= offset && offset < diagnostic.span.end
        })
        .map(|diagnostic| diagnostic.span.clone())
}

fn span_positions(index: &LineIndex<'_>, span: &Range<usize>) -> (Position, Position) {
    (index.position(span.start), index.position(span.end))
}

fn document_result(workspace: &mut Workspace, id: DocumentId) -> DocumentResult {
    let notifications = workspace
        .take_notifications()
        .into_iter()
        .map(|notification| notification.message)
        .collect();

    let Some(document) = workspace.document(id) else {
        return DocumentResult {
            path: String::new(),
            language: String::new(),
            resource_file: None,
            diagnostics: Vec::new(),
            notifications,
        };
    };

    let index = LineIndex::new(&document.text);
    let diagnostics = workspace
        .diagnostics(id)
        .iter()
        .map(|diagnostic| {
            let (start, end) = span_positions(&index, &diagnostic.span);
            DiagnosticItem {
                line: start.line,
                col: start.col,
                end_line: end.line,
                end_col: end.col,
                message: diagnostic.message.clone(),
                source: diagnostic.source.to_string(),
                key: diagnostic.code.clone(),
                fixable: diagnostic.fixable,
                quick_fix: diagnostic.quick_fix().map(|fix| fix.title()),
            }
        })
        .collect();

    DocumentResult {
        path: document.path.to_string_lossy().into_owned(),
        language: language_name(document.language).to_string(),
        resource_file: workspace.resource_file(id).map(ToString::to_string),
        diagnostics,
        notifications,
    }
}

fn language_name(language: Language) -> &'static str {
    match language {
        Language::Html => "html",
        Language::JavaScript => "javascript",
        Language::Other => "other",
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("JSON serialization failed: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}
