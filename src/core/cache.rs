//! Shared language packs keyed by resource file.
//!
//! Every open document that resolves to the same `lang.json` shares one
//! [`LanguagePack`]. An entry lives exactly as long as at least one document
//! depends on it.

use std::{
    collections::{HashMap, HashSet, hash_map::Entry},
    fmt,
    path::Path,
};

use serde_json::Value;

use super::{
    branch::BranchSource,
    pack::LanguagePack,
    resource::{RepoRoots, ResourceId, resolve_resource_file},
};
use crate::error::{Error, Result};

/// Opaque handle of an open document, minted by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct CacheEntry {
    pack: LanguagePack,
    dependents: HashSet<DocumentId>,
}

#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: HashMap<ResourceId, CacheEntry>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the language pack for an ngconsole document and registers the
    /// document as one of its dependents.
    ///
    /// The backing file is read only when no other document holds the entry.
    pub async fn acquire<B>(
        &mut self,
        document: DocumentId,
        path: &Path,
        roots: &RepoRoots,
        branches: &B,
    ) -> Result<&LanguagePack>
    where
        B: BranchSource + ?Sized,
    {
        if !roots.contains_document(path) {
            return Err(Error::NotApplicationDocument {
                path: path.to_path_buf(),
            });
        }
        let id = resolve_resource_file(roots, branches).await?;
        self.acquire_resolved(document, id).await
    }

    /// Registers `document` against an already-resolved resource file,
    /// loading it if needed.
    pub async fn acquire_resolved(
        &mut self,
        document: DocumentId,
        id: ResourceId,
    ) -> Result<&LanguagePack> {
        // A document depends on at most one entry.
        if self.identity_of(document).is_some_and(|current| *current != id) {
            self.release(document);
        }

        let entry = match self.entries.entry(id) {
            Entry::Occupied(occupied) => {
                tracing::debug!(file = %occupied.key(), %document, "language pack cache hit");
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => {
                let pack = LanguagePack::load(vacant.key().path()).await?;
                tracing::debug!(
                    file = %vacant.key(),
                    keys = pack.len(),
                    %document,
                    "loaded language pack"
                );
                vacant.insert(CacheEntry {
                    pack,
                    dependents: HashSet::new(),
                })
            }
        };
        entry.dependents.insert(document);
        Ok(&entry.pack)
    }

    /// The pack `document` depends on, if any.
    pub fn lookup(&self, document: DocumentId) -> Option<&LanguagePack> {
        self.entry_of(document).map(|(_, entry)| &entry.pack)
    }

    pub fn lookup_mut(&mut self, document: DocumentId) -> Option<&mut LanguagePack> {
        self.entries
            .values_mut()
            .find(|entry| entry.dependents.contains(&document))
            .map(|entry| &mut entry.pack)
    }

    pub fn identity_of(&self, document: DocumentId) -> Option<&ResourceId> {
        self.entry_of(document).map(|(id, _)| id)
    }

    /// Documents sharing the entry `document` depends on, `document` included.
    pub fn dependents_of(&self, document: DocumentId) -> Vec<DocumentId> {
        let mut dependents: Vec<DocumentId> = self
            .entry_of(document)
            .map(|(_, entry)| entry.dependents.iter().copied().collect())
            .unwrap_or_default();
        dependents.sort();
        dependents
    }

    /// Drops `document` from its entry, evicting the entry once nothing
    /// depends on it. Unknown documents are ignored.
    ///
    /// Returns true if the document was registered.
    pub fn release(&mut self, document: DocumentId) -> bool {
        let Some(id) = self.identity_of(document).cloned() else {
            return false;
        };
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.dependents.remove(&document);
            if entry.dependents.is_empty() {
                self.entries.remove(&id);
                tracing::debug!(file = %id, "evicted language pack");
            }
        }
        true
    }

    /// Writes `pack` back to the file of the entry holding this very
    /// instance. Packs not owned by the cache are ignored.
    pub async fn persist(&self, pack: &LanguagePack) -> Result<()> {
        let Some(id) = self
            .entries
            .iter()
            .find(|(_, entry)| std::ptr::eq(&entry.pack, pack))
            .map(|(id, _)| id)
        else {
            tracing::debug!("pack to persist is not cached");
            return Ok(());
        };

        save(id, pack).await
    }

    /// Inserts or overwrites `key` in the pack of `document` and persists it.
    ///
    /// Returns `Ok(false)` when the document has no pack. A failed write
    /// keeps the in-memory change.
    pub async fn add_key(
        &mut self,
        document: DocumentId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<bool> {
        let Some((id, entry)) = self
            .entries
            .iter_mut()
            .find(|(_, entry)| entry.dependents.contains(&document))
        else {
            return Ok(false);
        };

        entry.pack.insert(key, value);
        save(id, &entry.pack).await?;
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn entry_of(&self, document: DocumentId) -> Option<(&ResourceId, &CacheEntry)> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.dependents.contains(&document))
    }
}

async fn save(id: &ResourceId, pack: &LanguagePack) -> Result<()> {
    match pack.save(id.path()).await {
        Ok(()) => {
            tracing::info!(file = %id, keys = pack.len(), "saved language pack");
            Ok(())
        }
        Err(err) => {
            tracing::warn!(file = %id, error = %err, "failed to save language pack");
            Err(err)
        }
    }
}
