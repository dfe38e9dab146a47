use crate::types::{BlockKind, Caret};

/// Read-only view of a rich-text backend's content, as the engine sees it.
///
/// The engine only ever *inspects* content through this trait; every
/// mutation it decides on is emitted as a
/// [`Command`](crate::types::Command) for the host to execute. A backend
/// is compliant when it exposes these queries and can apply the command
/// vocabulary.
pub trait ContentOps {
    /// Number of blocks in the document. Never zero: an empty document
    /// has one empty paragraph block.
    fn block_count(&self) -> u32;

    /// Length of a block's text in grapheme clusters.
    fn block_len(&self, block: u32) -> u32;

    /// The full text of a block. Out-of-range blocks read as empty.
    fn block_text(&self, block: u32) -> String;

    /// The kind of a block. Out-of-range blocks read as paragraphs.
    fn block_kind(&self, block: u32) -> BlockKind;

    fn clamp(&self, caret: Caret) -> Caret {
        let last_block = self.block_count().saturating_sub(1);
        let block = caret.block.min(last_block);
        let offset = caret.offset.min(self.block_len(block));
        Caret { block, offset }
    }
}

/// A persistent key-value store with the null-safe, best-effort contract.
///
/// Mirrors a browser-local storage surface: reads absorb every failure
/// into `None`, writes report acceptance but guarantee nothing. Neither
/// operation may panic.
pub trait StateStore {
    /// Read the value under `key`. `None` when the key is absent or the
    /// store is unavailable; never an error.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any prior value. Returns
    /// `false` when the store rejects the write (quota, disabled, I/O);
    /// the contract is best-effort, not guaranteed-durable.
    fn set(&mut self, key: &str, value: &str) -> bool;
}
