//! Open documents, their diagnostics and the actions that edit them.
//!
//! A [`Workspace`] is the stateful session behind both the CLI commands and
//! the MCP server. It owns the [`ResourceCache`], so every mutation of a
//! language pack goes through here and the diagnostics of all documents
//! sharing that pack are refreshed together.

use std::{
    collections::HashMap,
    ops::Range,
    path::{Path, PathBuf},
};

use serde_json::Value;

use super::{
    branch::{BranchSource, GitCli},
    cache::{DocumentId, ResourceCache},
    deprecated::{fix_deprecated, scan_deprecated_apis},
    hover::{Hover, hover_at},
    pack::LanguagePack,
    reconcile::{Diagnostic, reconcile},
    resource::{RepoRoots, ResourceId},
    scan::scan_localization_keys,
    sync::{SyncOutcome, parse_entry, sync_keys},
};

/// Script that wraps the legacy dialog helpers, relative to the ngconsole root.
pub const DEFAULT_WRAPPER_FILE: &str = "js/vdi/utils/ui.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Html,
    JavaScript,
    Other,
}

impl Language {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("html" | "htm") => Language::Html,
            Some("js") => Language::JavaScript,
            _ => Language::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocumentId,
    pub path: PathBuf,
    pub language: Language,
    pub text: String,
}

/// Error surfaced to the user instead of being returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub document: DocumentId,
    pub message: String,
}

/// Replacement of `span` in the document text by `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub span: Range<usize>,
    pub new_text: String,
}

#[derive(Debug, Clone)]
pub struct WorkspaceSettings {
    pub roots: RepoRoots,
    /// Globs, relative to the ngconsole root, of scripts not checked for
    /// deprecated calls.
    pub ignores: Vec<glob::Pattern>,
    /// Relative to the ngconsole root.
    pub wrapper_file: PathBuf,
}

impl WorkspaceSettings {
    pub fn new(roots: RepoRoots) -> Self {
        Self {
            roots,
            ignores: Vec::new(),
            wrapper_file: PathBuf::from(DEFAULT_WRAPPER_FILE),
        }
    }

    /// Scripts of the ngconsole repository not excluded by `ignores`.
    pub fn is_project_script(&self, path: &Path) -> bool {
        path.starts_with(&self.roots.app) && !self.is_ignored(path)
    }

    /// Whether an ngconsole path matches one of `ignores`.
    pub fn is_ignored(&self, path: &Path) -> bool {
        path.strip_prefix(&self.roots.app).is_ok_and(|relative| {
            self.ignores
                .iter()
                .any(|pattern| pattern.matches_path(relative))
        })
    }

    pub fn is_wrapper_file(&self, path: &Path) -> bool {
        path.strip_prefix(&self.roots.app)
            .is_ok_and(|relative| relative == self.wrapper_file)
    }
}

pub struct Workspace<B = GitCli> {
    settings: WorkspaceSettings,
    branches: B,
    cache: ResourceCache,
    documents: HashMap<DocumentId, Document>,
    diagnostics: HashMap<DocumentId, Vec<Diagnostic>>,
    notifications: Vec<Notification>,
    next_id: u64,
}

impl Workspace<GitCli> {
    pub fn new(settings: WorkspaceSettings) -> Self {
        Self::with_branches(settings, GitCli)
    }
}

impl<B: BranchSource> Workspace<B> {
    pub fn with_branches(settings: WorkspaceSettings, branches: B) -> Self {
        Self {
            settings,
            branches,
            cache: ResourceCache::new(),
            documents: HashMap::new(),
            diagnostics: HashMap::new(),
            notifications: Vec::new(),
            next_id: 1,
        }
    }

    pub fn settings(&self) -> &WorkspaceSettings {
        &self.settings
    }

    /// Opens a document and computes its diagnostics.
    ///
    /// HTML documents acquire their language pack first. Failing to do so is
    /// reported as a notification; the document stays open without
    /// localization diagnostics.
    pub async fn open(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;

        let path = path.into();
        let language = Language::from_path(&path);
        tracing::debug!(document = %id, path = %path.display(), ?language, "open document");

        if language == Language::Html {
            let acquired = self
                .cache
                .acquire(id, &path, &self.settings.roots, &self.branches)
                .await
                .map(|_| ());
            if let Err(err) = acquired {
                self.notify(id, err.to_string());
            }
        }

        self.documents.insert(
            id,
            Document {
                id,
                path,
                language,
                text: text.into(),
            },
        );
        self.refresh(id);
        id
    }

    /// Replaces the whole text of a document. Returns false for unknown ids.
    pub fn change(&mut self, id: DocumentId, text: impl Into<String>) -> bool {
        let Some(document) = self.documents.get_mut(&id) else {
            return false;
        };
        document.text = text.into();
        self.refresh(id);
        true
    }

    pub fn close(&mut self, id: DocumentId) -> Option<Document> {
        self.cache.release(id);
        self.diagnostics.remove(&id);
        let document = self.documents.remove(&id);
        if document.is_some() {
            tracing::debug!(document = %id, "closed document");
        }
        document
    }

    /// Recomputes the diagnostics of one document, replacing the previous set.
    pub fn refresh(&mut self, id: DocumentId) {
        let Some(document) = self.documents.get(&id) else {
            return;
        };
        let diagnostics = match document.language {
            Language::Html => match self.cache.lookup(id) {
                Some(pack) => reconcile(scan_localization_keys(&document.text), Some(pack)),
                None => return,
            },
            Language::JavaScript if self.settings.is_project_script(&document.path) => {
                let is_wrapper = self.settings.is_wrapper_file(&document.path);
                reconcile(scan_deprecated_apis(&document.text, is_wrapper), None)
            }
            Language::JavaScript | Language::Other => return,
        };
        self.diagnostics.insert(id, diagnostics);
    }

    pub fn diagnostics(&self, id: DocumentId) -> &[Diagnostic] {
        self.diagnostics.get(&id).map_or(&[], Vec::as_slice)
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn find_document(&self, path: &Path) -> Option<DocumentId> {
        self.documents
            .values()
            .find(|document| document.path == path)
            .map(|document| document.id)
    }

    /// Open documents ordered by id.
    pub fn documents(&self) -> Vec<&Document> {
        let mut documents: Vec<&Document> = self.documents.values().collect();
        documents.sort_by_key(|document| document.id);
        documents
    }

    pub fn language_pack(&self, id: DocumentId) -> Option<&LanguagePack> {
        self.cache.lookup(id)
    }

    pub fn resource_file(&self, id: DocumentId) -> Option<&ResourceId> {
        self.cache.identity_of(id)
    }

    pub fn cached_packs(&self) -> usize {
        self.cache.len()
    }

    pub fn hover(&self, id: DocumentId, offset: usize) -> Option<Hover> {
        let document = self.documents.get(&id)?;
        let pack = self.cache.lookup(id)?;
        hover_at(&document.text, offset, pack)
    }

    /// Adds every missing key of an HTML document to its pack, persists the
    /// pack and strips `data-` prefixes from the document.
    ///
    /// Returns `None` when the document has no pack.
    pub async fn sync_localize(&mut self, id: DocumentId) -> Option<SyncOutcome> {
        let document = self.documents.get_mut(&id)?;
        let pack = self.cache.lookup_mut(id)?;
        let outcome = sync_keys(pack, &document.text);
        if !outcome.has_new_keys() {
            return Some(outcome);
        }

        if let Some(text) = &outcome.text {
            document.text.clone_from(text);
        }
        tracing::info!(document = %id, added = outcome.added.len(), "synchronized keys");

        let persisted = match self.cache.lookup(id) {
            Some(pack) => self.cache.persist(pack).await,
            None => Ok(()),
        };
        if let Err(err) = persisted {
            self.notify(id, err.to_string());
        }
        self.refresh_dependents(id);
        Some(outcome)
    }

    /// Adds a `key=value` entry to the pack of `id`.
    ///
    /// Returns false when the input is malformed or the document has no pack.
    pub async fn new_localize(&mut self, id: DocumentId, input: &str) -> bool {
        let Some((key, value)) = parse_entry(input) else {
            tracing::debug!(input, "ignored malformed entry");
            return false;
        };
        let (key, value) = (key.to_string(), value.to_string());
        self.add_localize(id, key, value).await
    }

    /// Inserts or overwrites `key` in the pack of `id` and persists it.
    /// Blank keys are rejected.
    ///
    /// A failed write is reported as a notification; the in-memory change
    /// stays and the diagnostics reflect it.
    pub async fn add_localize(
        &mut self,
        id: DocumentId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> bool {
        let key: String = key.into();
        if key.trim().is_empty() {
            return false;
        }
        match self.cache.add_key(id, key, value).await {
            Ok(false) => return false,
            Ok(true) => {}
            Err(err) => self.notify(id, err.to_string()),
        }
        self.refresh_dependents(id);
        true
    }

    /// Rewrites the deprecated call in `span` and applies the edit.
    pub fn fix_deprecated(&mut self, id: DocumentId, span: Range<usize>) -> Option<TextEdit> {
        let document = self.documents.get_mut(&id)?;
        let new_text = fix_deprecated(document.text.get(span.clone())?)?;
        document.text.replace_range(span.clone(), &new_text);
        self.refresh(id);
        Some(TextEdit { span, new_text })
    }

    /// Applies every fixable deprecated call in the document, last first.
    pub fn fix_all_deprecated(&mut self, id: DocumentId) -> Vec<TextEdit> {
        let mut spans: Vec<Range<usize>> = self
            .diagnostics(id)
            .iter()
            .filter(|diagnostic| diagnostic.fixable)
            .map(|diagnostic| diagnostic.span.clone())
            .collect();
        spans.sort_by_key(|span| std::cmp::Reverse(span.start));
        spans.dedup_by(|a, b| a.start < b.end && b.start < a.end);

        spans
            .into_iter()
            .filter_map(|span| self.fix_deprecated(id, span))
            .collect()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Closes every document and drops every cached pack.
    pub fn shutdown(&mut self) {
        tracing::debug!(documents = self.documents.len(), "shutting down workspace");
        self.documents.clear();
        self.diagnostics.clear();
        self.notifications.clear();
        self.cache.clear();
    }

    fn refresh_dependents(&mut self, id: DocumentId) {
        let dependents = self.cache.dependents_of(id);
        if dependents.is_empty() {
            self.refresh(id);
        }
        for dependent in dependents {
            self.refresh(dependent);
        }
    }

    fn notify(&mut self, document: DocumentId, message: String) {
        tracing::debug!(%document, "{}", message);
        self.notifications.push(Notification { document, message });
    }
}
