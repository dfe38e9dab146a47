use crate::key::{InputEvent, KeyCode, Modifiers};
use crate::rules::{RuleSet, TriggerAction};
use crate::traits::ContentOps;
use crate::types::{BlockKind, Caret, Command, Outcome, Range, StyleSet};

/// The autoformat engine.
///
/// Holds only the trigger rule table; every decision is re-evaluated
/// fresh from the content on each event, so there is no state to keep in
/// sync across keystrokes. The engine never mutates content itself: it
/// emits [`Command`]s for the host to execute against its backend.
#[derive(Debug, Clone)]
pub struct Engine {
    rules: RuleSet,
}

pub struct EngineBuilder {
    rules: RuleSet,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
        }
    }
}

impl EngineBuilder {
    /// Replace the default trigger table.
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn build(self) -> Engine {
        Engine { rules: self.rules }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Decide what an input event does to the content under the caret.
    ///
    /// Returns the outcome plus the commands realizing it. On
    /// [`Outcome::NotHandled`] the command list is empty and the host
    /// applies its default behavior (normally: insert the character).
    /// On [`Outcome::Handled`] the host must apply every command and
    /// suppress the default, including discarding a
    /// [`BeforeInput`](InputEvent::BeforeInput) character.
    pub fn handle_event<C: ContentOps>(
        &self,
        content: &C,
        caret: Caret,
        input: InputEvent,
    ) -> (Outcome, Vec<Command>) {
        let caret = content.clamp(caret);
        match input {
            InputEvent::BeforeInput(' ') => self.space_trigger(content, caret),
            InputEvent::BeforeInput(_) => (Outcome::NotHandled, vec![]),
            InputEvent::Key(ke) => match ke.code {
                KeyCode::Enter => self.line_break(content, caret),
                KeyCode::Char('b') if ke.mods.contains(Modifiers::CTRL) => {
                    toggle_at_caret(caret, StyleSet::BOLD)
                }
                KeyCode::Char('u') if ke.mods.contains(Modifiers::CTRL) => {
                    toggle_at_caret(caret, StyleSet::UNDERLINE)
                }
                KeyCode::Char(' ') if ke.mods.contains(Modifiers::SHIFT | Modifiers::ALT) => {
                    let kind = toggled_kind(content.block_kind(caret.block), BlockKind::Code);
                    (
                        Outcome::Handled,
                        vec![Command::SetBlockKind {
                            block: caret.block,
                            kind,
                        }],
                    )
                }
                _ => (Outcome::NotHandled, vec![]),
            },
        }
    }

    /// A space is about to commit: check the trimmed caret block against
    /// the rule table. On a match the prefix is stripped, the mapped
    /// transformation applied, and the space itself discarded.
    fn space_trigger<C: ContentOps>(&self, content: &C, caret: Caret) -> (Outcome, Vec<Command>) {
        let text = content.block_text(caret.block);
        let Some(rule) = self.rules.lookup(text.trim()) else {
            return (Outcome::NotHandled, vec![]);
        };
        tracing::debug!(prefix = rule.prefix, "autoformat trigger fired");

        let mut cmds = vec![Command::ReplaceRange {
            range: Range {
                block: caret.block,
                start: 0,
                end: caret.offset,
            },
            text: String::new(),
        }];
        let start = Caret {
            block: caret.block,
            offset: 0,
        };
        match rule.action {
            TriggerAction::BlockKind(kind) => cmds.push(Command::SetBlockKind {
                block: caret.block,
                kind: toggled_kind(content.block_kind(caret.block), kind),
            }),
            TriggerAction::Style(styles) => cmds.push(Command::ToggleStyle {
                range: Range::caret(start),
                styles,
            }),
        }
        cmds.push(Command::SetCaret(start));
        (Outcome::Handled, cmds)
    }

    /// Enter is always handled: a blank block takes a soft break (literal
    /// newline, block count unchanged), anything else splits at the caret.
    /// The caret lands immediately after the break either way.
    fn line_break<C: ContentOps>(&self, content: &C, caret: Caret) -> (Outcome, Vec<Command>) {
        let text = content.block_text(caret.block);
        let cmds = if text.trim().is_empty() {
            vec![
                Command::ReplaceRange {
                    range: Range::caret(caret),
                    text: "\n".to_string(),
                },
                Command::SetCaret(Caret {
                    block: caret.block,
                    offset: caret.offset + 1,
                }),
            ]
        } else {
            vec![
                Command::SplitBlock { at: caret },
                Command::SetCaret(Caret {
                    block: caret.block + 1,
                    offset: 0,
                }),
            ]
        };
        (Outcome::Handled, cmds)
    }
}

fn toggle_at_caret(caret: Caret, styles: StyleSet) -> (Outcome, Vec<Command>) {
    (
        Outcome::Handled,
        vec![Command::ToggleStyle {
            range: Range::caret(caret),
            styles,
        }],
    )
}

// Matches the toggle semantics of block-type shortcuts: re-applying the
// kind a block already has reverts it to a paragraph.
fn toggled_kind(current: BlockKind, target: BlockKind) -> BlockKind {
    if current == target {
        BlockKind::Paragraph
    } else {
        target
    }
}
