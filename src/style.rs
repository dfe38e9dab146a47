use crate::types::{BlockKind, StyleSet};

/// How one style or block kind should look. Rendering guidance only; the
/// data model never depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Treatment {
    pub bold: bool,
    pub underline: bool,
    pub monospace: bool,
    /// Foreground color, RGB.
    pub fg: Option<(u8, u8, u8)>,
    /// Background color, RGB.
    pub bg: Option<(u8, u8, u8)>,
}

/// Explicit style-to-visual configuration passed to the rendering layer.
///
/// Frontends resolve a run's [`StyleSet`] and its block's
/// [`BlockKind`] through this table instead of hard-coding visuals.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    inline: Vec<(StyleSet, Treatment)>,
    blocks: Vec<(BlockKind, Treatment)>,
}

impl Default for StyleSheet {
    /// The stock sheet: bold is bold, highlighted text is red, underlined
    /// text is underlined, code blocks are monospace on light grey.
    fn default() -> Self {
        Self {
            inline: vec![
                (
                    StyleSet::BOLD,
                    Treatment {
                        bold: true,
                        ..Treatment::default()
                    },
                ),
                (
                    StyleSet::HIGHLIGHT,
                    Treatment {
                        fg: Some((255, 0, 0)),
                        ..Treatment::default()
                    },
                ),
                (
                    StyleSet::UNDERLINE,
                    Treatment {
                        underline: true,
                        ..Treatment::default()
                    },
                ),
            ],
            blocks: vec![
                (
                    BlockKind::Heading,
                    Treatment {
                        bold: true,
                        ..Treatment::default()
                    },
                ),
                (
                    BlockKind::Code,
                    Treatment {
                        monospace: true,
                        bg: Some((243, 243, 243)),
                        ..Treatment::default()
                    },
                ),
            ],
        }
    }
}

impl StyleSheet {
    pub fn new(inline: Vec<(StyleSet, Treatment)>, blocks: Vec<(BlockKind, Treatment)>) -> Self {
        Self { inline, blocks }
    }

    /// Resolve a run's style set to one merged treatment.
    pub fn resolve(&self, styles: StyleSet) -> Treatment {
        let mut out = Treatment::default();
        for (set, treatment) in &self.inline {
            if styles.contains(*set) {
                merge(&mut out, treatment);
            }
        }
        out
    }

    /// The treatment for a block kind, if the sheet defines one.
    pub fn block_treatment(&self, kind: BlockKind) -> Option<Treatment> {
        self.blocks
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, t)| *t)
    }
}

fn merge(into: &mut Treatment, from: &Treatment) {
    into.bold |= from.bold;
    into.underline |= from.underline;
    into.monospace |= from.monospace;
    if from.fg.is_some() {
        into.fg = from.fg;
    }
    if from.bg.is_some() {
        into.bg = from.bg;
    }
}
