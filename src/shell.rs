//! The editor shell: the single owner of document state.
//!
//! The shell wires a [`StateStore`] and an [`Engine`] together: it loads
//! the persisted snapshot once at construction, routes every input event
//! through the engine first, folds handled commands into a fresh
//! [`Document`] value, and falls back to plain editing (insert the typed
//! character, honor Backspace) when the engine declines. Saving is an
//! explicit action, never implicit.

use crate::document::Document;
use crate::engine::Engine;
use crate::key::{InputEvent, KeyCode};
use crate::storage::{CONTENT_KEY, StorageAdapter};
use crate::style::StyleSheet;
use crate::traits::{ContentOps, StateStore};
use crate::types::{Caret, Command, Outcome, Range};

pub struct EditorShellBuilder {
    engine: Engine,
    key: String,
    styles: StyleSheet,
}

impl Default for EditorShellBuilder {
    fn default() -> Self {
        Self {
            engine: Engine::new(),
            key: CONTENT_KEY.to_string(),
            styles: StyleSheet::default(),
        }
    }
}

impl EditorShellBuilder {
    /// Use a custom engine (e.g. a different trigger table).
    pub fn engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Persist under a different key than [`CONTENT_KEY`].
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Build the shell over `store`, loading any persisted snapshot.
    ///
    /// A missing blob starts an empty document; a malformed one logs a
    /// warning and starts empty as well, so startup never fails on bad
    /// stored data.
    pub fn build<S: StateStore>(self, store: S) -> EditorShell<S> {
        let storage = StorageAdapter::new(store);
        let document = match storage.load(&self.key) {
            Ok(Some(document)) => document,
            Ok(None) => Document::empty(),
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "stored content is malformed; starting empty");
                Document::empty()
            }
        };
        EditorShell {
            engine: self.engine,
            storage,
            key: self.key,
            styles: self.styles,
            document,
            caret: Caret::ZERO,
        }
    }
}

/// A complete editor over a persistence backend.
pub struct EditorShell<S: StateStore> {
    engine: Engine,
    storage: StorageAdapter<S>,
    key: String,
    styles: StyleSheet,
    document: Document,
    caret: Caret,
}

impl<S: StateStore> EditorShell<S> {
    /// Shell with the default engine, style sheet, and content key.
    pub fn new(store: S) -> Self {
        EditorShellBuilder::default().build(store)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Move the caret (clamped to the document).
    pub fn set_caret(&mut self, caret: Caret) {
        self.caret = self.document.clamp(caret);
    }

    /// Serialize the current document and write it under the content key,
    /// overwriting any prior snapshot. Returns whether the store accepted
    /// the write.
    pub fn save(&mut self) -> bool {
        self.storage.save(&self.key, &self.document)
    }

    /// Route one input event: engine first, default editing otherwise.
    pub fn handle_event(&mut self, input: InputEvent) -> Outcome {
        let (outcome, cmds) = self
            .engine
            .handle_event(&self.document, self.caret, input.clone());
        match outcome {
            Outcome::Handled => {
                let mut document = self.document.clone();
                for cmd in &cmds {
                    if let Command::SetCaret(caret) = cmd {
                        self.caret = *caret;
                    }
                    document = document.apply(cmd);
                }
                self.document = document;
                self.caret = self.document.clamp(self.caret);
            }
            Outcome::NotHandled => self.default_edit(input),
        }
        outcome
    }

    /// What the backing widget would do on its own: insert the typed
    /// character styled by the block's active set, delete on Backspace
    /// (merging into the previous block at offset zero), ignore the rest.
    fn default_edit(&mut self, input: InputEvent) {
        match input {
            InputEvent::BeforeInput(c) => {
                self.document = self.document.type_text(self.caret, &c.to_string());
                self.caret = self.document.clamp(Caret {
                    block: self.caret.block,
                    offset: self.caret.offset + 1,
                });
            }
            InputEvent::Key(ke) if ke.code == KeyCode::Backspace => {
                if self.caret.offset > 0 {
                    let range = Range {
                        block: self.caret.block,
                        start: self.caret.offset - 1,
                        end: self.caret.offset,
                    };
                    self.document = self.document.replace_range(range, "");
                    self.caret.offset -= 1;
                } else if self.caret.block > 0 {
                    let prev = self.caret.block - 1;
                    let offset = self.document.block_len(prev);
                    self.document = self.document.merge_block(self.caret.block);
                    self.caret = Caret {
                        block: prev,
                        offset,
                    };
                }
            }
            InputEvent::Key(_) => {}
        }
    }
}
