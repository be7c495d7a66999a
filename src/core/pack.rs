//! Language packs: ordered key/value JSON files loaded and saved as a unit.

use std::{io, path::Path};

use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};

use crate::error::{Error, Result};

/// Translation key → value mapping loaded from one `lang.json`.
///
/// Key order is preserved so that writes produce minimal diffs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguagePack {
    entries: Map<String, Value>,
}

impl LanguagePack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let entries: Map<String, Value> = serde_json::from_str(text)?;
        Ok(Self { entries })
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::ResourceLoad {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&text).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrites `path` with the pretty-printed pack.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let persist_error = |source| Error::Persist {
            path: path.to_path_buf(),
            source,
        };
        let bytes = self.to_pretty_bytes().map_err(|e| persist_error(io::Error::other(e)))?;
        tokio::fs::write(path, bytes).await.map_err(persist_error)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Value rendered for display: strings as-is, other values as JSON.
    pub fn display_value(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Inserts or overwrites a key, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON with 4-space indentation, matching the resources repository.
    pub fn to_pretty_bytes(&self) -> serde_json::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
        self.entries.serialize(&mut serializer)?;
        Ok(bytes)
    }
}
