use serde::{Deserialize, Serialize};

/// A caret location within a document.
///
/// Carets are zero-indexed and offsets are counted in grapheme clusters,
/// not bytes or chars. This ensures correct handling of emoji and
/// combining characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Caret {
    /// Zero-based block index.
    pub block: u32,
    /// Zero-based offset into the block's text, in grapheme clusters.
    pub offset: u32,
}

impl Caret {
    /// The origin caret (first block, offset 0).
    pub const ZERO: Caret = Caret {
        block: 0,
        offset: 0,
    };
}

/// A range of text within a single block, defined by start and end offsets.
///
/// Ranges are half-open intervals [start, end), meaning the start offset
/// is included but the end offset is excluded. Offsets are grapheme
/// clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// The block the range lies in.
    pub block: u32,
    /// The start offset (inclusive).
    pub start: u32,
    /// The end offset (exclusive).
    pub end: u32,
}

impl Range {
    /// A collapsed range at the given caret.
    pub fn caret(at: Caret) -> Self {
        Self {
            block: at.block,
            start: at.offset,
            end: at.offset,
        }
    }

    /// true if start == end
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// A per-block classification affecting layout and rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    /// An ordinary paragraph.
    #[default]
    Paragraph,
    /// A top-level heading.
    Heading,
    /// A monospace code block.
    Code,
}

bitflags::bitflags! {
    /// Character-range-scoped visual attributes, independent of block kind.
    ///
    /// Kept as flags so a run of text can carry several styles at once and
    /// so a block's caret style set is a single cheap value. Serialized in
    /// the human-readable flags form (e.g. `"BOLD | UNDERLINE"`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct StyleSet: u8 {
        const BOLD      = 0b0001;
        const HIGHLIGHT = 0b0010;
        const UNDERLINE = 0b0100;
    }
}

impl Default for StyleSet {
    fn default() -> Self {
        Self::empty()
    }
}

/// An inline style run over a block's text.
///
/// Offsets are grapheme clusters, half-open [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpan {
    /// The styles carried by the run.
    pub styles: StyleSet,
    /// The start offset (inclusive).
    pub start: u32,
    /// The end offset (exclusive).
    pub end: u32,
}

/// Whether the engine consumed an input event.
///
/// `Handled` means the engine emitted the full effect of the event as
/// commands and the host must suppress its default behavior (for a
/// [`BeforeInput`](crate::key::InputEvent::BeforeInput) character, the
/// character is discarded). `NotHandled` means the host proceeds normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The engine performed a transformation; suppress default handling.
    Handled,
    /// No transformation applies; the host processes the event normally.
    NotHandled,
}

/// Commands emitted by the autoformat engine for the host to execute.
///
/// These are the capability primitives any compliant rich-text backend
/// must implement. The host is responsible for applying them to its
/// content model; the crate's [`Document`](crate::document::Document)
/// is one such backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the text in `range` with `text`. Deleting is replacing
    /// with the empty string; inserting is replacing a collapsed range.
    ReplaceRange { range: Range, text: String },
    /// Split the block at the caret into two blocks, both keeping the
    /// original block's kind.
    SplitBlock { at: Caret },
    /// Toggle inline styles over `range`. A collapsed range flips the
    /// styles applied to text subsequently typed at the caret.
    ToggleStyle { range: Range, styles: StyleSet },
    /// Set the kind of the block containing the caret.
    SetBlockKind { block: u32, kind: BlockKind },
    /// Move the caret.
    SetCaret(Caret),
}
