//! The reference rich-text content model.
//!
//! A [`Document`] is a sequence of [`Block`]s; a block is a run of text
//! with a kind, inline style spans over grapheme ranges, and the style
//! set applied to text typed at the caret. Every operation is an
//! immutable update: it returns a new `Document` value and leaves the
//! receiver untouched, so a host can keep old values for its own history.
//!
//! The model implements [`ContentOps`] and can execute the engine's
//! [`Command`] vocabulary, making it a compliant backend on its own. It
//! serializes to a plain nested-object form for persistence; only
//! content round-trips, never carets.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::traits::ContentOps;
use crate::types::{BlockKind, Caret, Command, Range, StyleSet, StyleSpan};

/// One paragraph-like unit of document content.
///
/// A block may contain literal newlines (soft breaks); those do not
/// create new blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub kind: BlockKind,
    #[serde(default)]
    pub text: String,
    /// Inline style runs over `text`, grapheme-indexed.
    #[serde(default)]
    pub spans: Vec<StyleSpan>,
    /// Styles applied to text typed at the caret. Part of the block, not
    /// transient editor state, so a style toggled on an empty line
    /// survives a save/reload.
    #[serde(default)]
    pub active: StyleSet,
}

impl Block {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            spans: Vec::new(),
            active: StyleSet::empty(),
        }
    }

    /// Length of the block's text in grapheme clusters.
    pub fn len(&self) -> u32 {
        self.text.graphemes(true).count() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Union of the styles of every span covering `offset`.
    pub fn styles_at(&self, offset: u32) -> StyleSet {
        self.spans
            .iter()
            .filter(|s| s.start <= offset && offset < s.end)
            .fold(StyleSet::empty(), |acc, s| acc | s.styles)
    }

    fn byte_of(&self, offset: u32) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(offset as usize)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// The document state: an opaque-to-the-engine sequence of blocks.
///
/// Invariant: a document always holds at least one block; an "empty"
/// document is one empty paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    /// A single empty paragraph.
    pub fn empty() -> Self {
        Self {
            blocks: vec![Block::default()],
        }
    }

    /// Build a document from explicit blocks. An empty vector becomes the
    /// empty document.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }.sanitized()
    }

    /// Build a document of plain paragraphs, one per line of `text`.
    pub fn from_text(text: &str) -> Self {
        let blocks = text
            .lines()
            .map(|line| Block::new(BlockKind::Paragraph, line))
            .collect::<Vec<_>>();
        Self::from_blocks(blocks)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: u32) -> Option<&Block> {
        self.blocks.get(index as usize)
    }

    /// Repair invariants after deserializing untrusted data: at least one
    /// block, spans clipped to their block's text, empties dropped.
    pub(crate) fn sanitized(mut self) -> Self {
        if self.blocks.is_empty() {
            self.blocks.push(Block::default());
        }
        for block in &mut self.blocks {
            let len = block.len();
            for span in &mut block.spans {
                span.start = span.start.min(len);
                span.end = span.end.min(len);
            }
            block.spans = normalize(std::mem::take(&mut block.spans));
        }
        self
    }

    /// Replace the text in `range` with `text`, style-neutrally: spans
    /// shift and clip around the edit, no new spans appear.
    pub fn replace_range(&self, range: Range, text: &str) -> Document {
        let mut doc = self.clone();
        let Some(block) = doc.blocks.get_mut(range.block as usize) else {
            return doc;
        };
        let len = block.len();
        let start = range.start.min(range.end).min(len);
        let end = range.start.max(range.end).min(len);

        let from = block.byte_of(start);
        let to = block.byte_of(end);
        block.text.replace_range(from..to, text);

        let del = end - start;
        let ins = text.graphemes(true).count() as u32;
        let spans = std::mem::take(&mut block.spans);
        let spans = spans_after_delete(spans, start, del);
        block.spans = normalize(spans_after_insert(spans, start, ins));
        doc
    }

    /// Insert text at the caret, styling the inserted run with the
    /// block's active style set. This is what typing does.
    pub fn type_text(&self, at: Caret, text: &str) -> Document {
        let at = self.clamp(at);
        let mut doc = self.replace_range(Range::caret(at), text);
        let block = &mut doc.blocks[at.block as usize];
        if !block.active.is_empty() {
            let ins = text.graphemes(true).count() as u32;
            let mut spans = std::mem::take(&mut block.spans);
            spans.push(StyleSpan {
                styles: block.active,
                start: at.offset,
                end: at.offset + ins,
            });
            block.spans = normalize(spans);
        }
        doc
    }

    /// Split the block at the caret into two blocks (a hard break). Both
    /// halves keep the block's kind; the new block inherits the active
    /// style set. Spans straddling the split are divided.
    pub fn split_block(&self, at: Caret) -> Document {
        let at = self.clamp(at);
        let mut doc = self.clone();
        let block = &mut doc.blocks[at.block as usize];
        let split = block.byte_of(at.offset);
        let tail_text = block.text.split_off(split);

        let mut head_spans = Vec::new();
        let mut tail_spans = Vec::new();
        for span in block.spans.drain(..) {
            if span.end <= at.offset {
                head_spans.push(span);
            } else if span.start >= at.offset {
                tail_spans.push(StyleSpan {
                    styles: span.styles,
                    start: span.start - at.offset,
                    end: span.end - at.offset,
                });
            } else {
                head_spans.push(StyleSpan {
                    styles: span.styles,
                    start: span.start,
                    end: at.offset,
                });
                tail_spans.push(StyleSpan {
                    styles: span.styles,
                    start: 0,
                    end: span.end - at.offset,
                });
            }
        }
        block.spans = head_spans;

        let tail = Block {
            kind: block.kind,
            text: tail_text,
            spans: tail_spans,
            active: block.active,
        };
        doc.blocks.insert(at.block as usize + 1, tail);
        doc
    }

    /// Merge block `index` into the block before it; the surviving block
    /// keeps its own kind and active set. A no-op for the first block.
    pub fn merge_block(&self, index: u32) -> Document {
        if index == 0 || index as usize >= self.blocks.len() {
            return self.clone();
        }
        let mut doc = self.clone();
        let merged = doc.blocks.remove(index as usize);
        let prev = &mut doc.blocks[index as usize - 1];
        let shift = prev.len();
        prev.text.push_str(&merged.text);
        let mut spans = std::mem::take(&mut prev.spans);
        spans.extend(merged.spans.into_iter().map(|s| StyleSpan {
            styles: s.styles,
            start: s.start + shift,
            end: s.end + shift,
        }));
        prev.spans = normalize(spans);
        doc
    }

    /// Toggle inline styles over `range`. A collapsed range flips the
    /// bits in the block's active set; a real range applies the styles
    /// to it, or removes them if every grapheme in it already carries
    /// them all.
    pub fn toggle_style(&self, range: Range, styles: StyleSet) -> Document {
        let mut doc = self.clone();
        let Some(block) = doc.blocks.get_mut(range.block as usize) else {
            return doc;
        };
        if styles.is_empty() {
            return doc;
        }
        let len = block.len();
        let start = range.start.min(range.end).min(len);
        let end = range.start.max(range.end).min(len);
        if start == end {
            block.active ^= styles;
            return doc;
        }
        block.spans = if range_covered(&block.spans, start, end, styles) {
            carve_styles(&block.spans, start, end, styles)
        } else {
            let mut spans = block.spans.clone();
            spans.push(StyleSpan { styles, start, end });
            normalize(spans)
        };
        doc
    }

    pub fn set_block_kind(&self, index: u32, kind: BlockKind) -> Document {
        let mut doc = self.clone();
        if let Some(block) = doc.blocks.get_mut(index as usize) {
            block.kind = kind;
        }
        doc
    }

    /// Execute one engine command, producing the updated document.
    /// `SetCaret` is a no-op here; carets belong to the host.
    pub fn apply(&self, cmd: &Command) -> Document {
        match cmd {
            Command::ReplaceRange { range, text } => self.replace_range(*range, text),
            Command::SplitBlock { at } => self.split_block(*at),
            Command::ToggleStyle { range, styles } => self.toggle_style(*range, *styles),
            Command::SetBlockKind { block, kind } => self.set_block_kind(*block, *kind),
            Command::SetCaret(_) => self.clone(),
        }
    }
}

impl ContentOps for Document {
    fn block_count(&self) -> u32 {
        self.blocks.len() as u32
    }

    fn block_len(&self, block: u32) -> u32 {
        self.block(block).map(Block::len).unwrap_or(0)
    }

    fn block_text(&self, block: u32) -> String {
        self.block(block).map(|b| b.text.clone()).unwrap_or_default()
    }

    fn block_kind(&self, block: u32) -> BlockKind {
        self.block(block).map(|b| b.kind).unwrap_or_default()
    }
}

fn spans_after_delete(spans: Vec<StyleSpan>, start: u32, del: u32) -> Vec<StyleSpan> {
    if del == 0 {
        return spans;
    }
    let shift = |p: u32| {
        if p <= start {
            p
        } else {
            p.saturating_sub(del).max(start)
        }
    };
    spans
        .into_iter()
        .filter_map(|s| {
            let (a, b) = (shift(s.start), shift(s.end));
            (a < b).then_some(StyleSpan {
                styles: s.styles,
                start: a,
                end: b,
            })
        })
        .collect()
}

fn spans_after_insert(spans: Vec<StyleSpan>, at: u32, ins: u32) -> Vec<StyleSpan> {
    if ins == 0 {
        return spans;
    }
    spans
        .into_iter()
        .map(|s| StyleSpan {
            styles: s.styles,
            // Insertion at a span boundary does not extend the span;
            // interior insertion does.
            start: if s.start >= at { s.start + ins } else { s.start },
            end: if s.end > at { s.end + ins } else { s.end },
        })
        .collect()
}

/// Sort, drop empties, and merge touching runs with identical styles.
fn normalize(mut spans: Vec<StyleSpan>) -> Vec<StyleSpan> {
    spans.retain(|s| s.start < s.end && !s.styles.is_empty());
    spans.sort_by_key(|s| (s.start, s.end, s.styles.bits()));
    let mut out: Vec<StyleSpan> = Vec::with_capacity(spans.len());
    for s in spans {
        if let Some(last) = out.last_mut()
            && last.styles == s.styles
            && s.start <= last.end
        {
            last.end = last.end.max(s.end);
            continue;
        }
        out.push(s);
    }
    out
}

/// true if every grapheme in [start, end) carries all of `styles`.
fn range_covered(spans: &[StyleSpan], start: u32, end: u32, styles: StyleSet) -> bool {
    let mut carrying: Vec<&StyleSpan> = spans.iter().filter(|s| s.styles.contains(styles)).collect();
    carrying.sort_by_key(|s| s.start);
    let mut pos = start;
    for s in carrying {
        if s.start > pos {
            break;
        }
        pos = pos.max(s.end);
        if pos >= end {
            return true;
        }
    }
    pos >= end
}

/// Remove `styles` from [start, end), splitting spans that straddle the
/// boundary so the parts outside keep everything they had.
fn carve_styles(spans: &[StyleSpan], start: u32, end: u32, styles: StyleSet) -> Vec<StyleSpan> {
    let mut out = Vec::with_capacity(spans.len());
    for s in spans {
        if !s.styles.intersects(styles) || s.end <= start || s.start >= end {
            out.push(*s);
            continue;
        }
        if s.start < start {
            out.push(StyleSpan {
                styles: s.styles,
                start: s.start,
                end: start,
            });
        }
        let kept = s.styles & !styles;
        if !kept.is_empty() {
            out.push(StyleSpan {
                styles: kept,
                start: s.start.max(start),
                end: s.end.min(end),
            });
        }
        if s.end > end {
            out.push(StyleSpan {
                styles: s.styles,
                start: end,
                end: s.end,
            });
        }
    }
    normalize(out)
}
