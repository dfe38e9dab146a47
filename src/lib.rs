pub mod document;
pub mod engine;
pub mod key;
pub mod rules;
pub mod shell;
pub mod storage;
pub mod style;
pub mod traits;
pub mod types;

pub use crate::document::{Block, Document};
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::key::{InputEvent, KeyCode, KeyEvent, Modifiers};
pub use crate::rules::{DEFAULT_RULES, RuleSet, TriggerAction, TriggerRule};
pub use crate::shell::{EditorShell, EditorShellBuilder};
pub use crate::storage::{CONTENT_KEY, FileStore, MemoryStore, StorageAdapter, StorageError};
pub use crate::style::{StyleSheet, Treatment};
pub use crate::traits::{ContentOps, StateStore};
pub use crate::types::{BlockKind, Caret, Command, Outcome, Range, StyleSet, StyleSpan};
