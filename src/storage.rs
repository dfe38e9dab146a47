//! Local persistence for document snapshots.
//!
//! The adapter wraps any [`StateStore`] with the JSON encode/decode of
//! the document model. Reads are null-safe (`None`, never a panic),
//! writes are best-effort (`false` on rejection), and decoding is loud:
//! malformed persisted data surfaces as [`StorageError::Parse`] for the
//! caller to handle rather than being swallowed here.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::document::Document;
use crate::traits::StateStore;

/// The fixed key the editor shell persists its document under.
pub const CONTENT_KEY: &str = "editor-content";

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The persisted blob is not a valid document snapshot.
    #[error("malformed persisted content: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serialize a document snapshot to its persisted textual form.
///
/// "Nothing to persist" is the caller's branch to take before calling
/// this; an encoding failure is an error, never a silent null.
pub fn encode(document: &Document) -> Result<String> {
    Ok(serde_json::to_string(document)?)
}

/// Parse a persisted blob back into a document.
///
/// Malformed JSON is a [`StorageError::Parse`]; callers decide whether to
/// fall back to an empty document or fail visibly. Structurally valid
/// blobs with out-of-range spans or no blocks at all are repaired rather
/// than rejected.
pub fn decode(text: &str) -> Result<Document> {
    let document: Document = serde_json::from_str(text)?;
    Ok(document.sanitized())
}

/// Key-value persistence with JSON encode/decode for documents.
#[derive(Debug, Clone)]
pub struct StorageAdapter<S: StateStore> {
    store: S,
}

impl<S: StateStore> StorageAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the raw value under `key`. `None` when absent or the store is
    /// unavailable.
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// Write a raw value under `key`. `false` when the store rejects the
    /// write.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        self.store.set(key, value)
    }

    /// Load the document under `key`. `Ok(None)` when nothing is stored;
    /// `Err` when something is stored but malformed.
    pub fn load(&self, key: &str) -> Result<Option<Document>> {
        match self.get(key) {
            Some(blob) => Ok(Some(decode(&blob)?)),
            None => Ok(None),
        }
    }

    /// Encode and write the document under `key`. Returns whether the
    /// store accepted the write.
    pub fn save(&mut self, key: &str, document: &Document) -> bool {
        match encode(document) {
            Ok(blob) => {
                let accepted = self.set(key, &blob);
                if !accepted {
                    tracing::warn!(key, "store rejected document write");
                }
                accepted
            }
            Err(err) => {
                tracing::warn!(key, %err, "document failed to encode");
                false
            }
        }
    }
}

/// An in-memory store. Always accepts writes; useful for tests and for
/// hosts that manage durability themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.values.insert(key.to_string(), value.to_string());
        true
    }
}

/// A store keeping one file per key under a directory.
///
/// Read failures of any sort collapse to `None`; write failures to
/// `false`. The directory is created lazily on the first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are fixed short identifiers, not user input, but keep
        // path separators out of filenames anyway.
        let name: String = key
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        if std::fs::create_dir_all(&self.dir).is_err() {
            return false;
        }
        std::fs::write(self.path_for(key), value).is_ok()
    }
}
