use crate::types::{BlockKind, StyleSet};

/// The transformation a trigger prefix maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// Set the caret block's kind (toggling back to a paragraph if the
    /// block already has that kind).
    BlockKind(BlockKind),
    /// Toggle inline styles at the caret.
    Style(StyleSet),
}

/// One autoformat rule: a literal prefix and the action it fires.
///
/// A rule fires only when the caret block's *trimmed* text equals the
/// prefix exactly, and only on a trailing space keystroke. The prefix
/// characters are consumed by the transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRule {
    pub prefix: &'static str,
    pub action: TriggerAction,
}

/// The default rule table: `#` for a heading, `*`/`**`/`***` for bold,
/// highlighted, and underlined text.
pub const DEFAULT_RULES: &[TriggerRule] = &[
    TriggerRule {
        prefix: "#",
        action: TriggerAction::BlockKind(BlockKind::Heading),
    },
    TriggerRule {
        prefix: "*",
        action: TriggerAction::Style(StyleSet::BOLD),
    },
    TriggerRule {
        prefix: "**",
        action: TriggerAction::Style(StyleSet::HIGHLIGHT),
    },
    TriggerRule {
        prefix: "***",
        action: TriggerAction::Style(StyleSet::UNDERLINE),
    },
];

/// An ordered collection of trigger rules.
///
/// Lookup is longest-exact-match: among rules whose prefix equals the
/// trimmed line, the longest prefix wins, so `***` shadows `*` no matter
/// how the table is ordered.
#[derive(Debug, Clone)]
pub struct RuleSet(Vec<TriggerRule>);

impl Default for RuleSet {
    fn default() -> Self {
        Self(DEFAULT_RULES.to_vec())
    }
}

impl RuleSet {
    pub fn new(rules: Vec<TriggerRule>) -> Self {
        Self(rules)
    }

    /// Look up the rule for a trimmed line of text.
    ///
    /// Exact full-line match is required, not a substring or prefix match
    /// elsewhere in the line.
    pub fn lookup(&self, trimmed: &str) -> Option<&TriggerRule> {
        self.0
            .iter()
            .filter(|rule| rule.prefix == trimmed)
            .max_by_key(|rule| rule.prefix.len())
    }

    pub fn rules(&self) -> &[TriggerRule] {
        &self.0
    }
}
