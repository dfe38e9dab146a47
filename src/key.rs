/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A character key carried by a key-command chord (e.g. Ctrl+B).
    /// Plain typed characters should arrive as [`InputEvent::BeforeInput`]
    /// instead, so the engine can inspect them before they commit.
    Char(char),
    /// The Enter/Return key. Line-break handling is always routed through
    /// the engine, never through the backend's default behavior.
    Enter,
    /// The Backspace key. The engine leaves it unhandled; the shell's
    /// default editing deletes the grapheme before the caret.
    Backspace,
    /// The Escape key.
    Esc,
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press event with optional modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

/// Input events that can be processed by the autoformat engine.
///
/// The split matters: `BeforeInput` is a character the host is *about to*
/// commit to the document, intercepted so the engine can inspect the caret
/// block exactly as the user left it and veto the insertion. `Key` carries
/// everything else (Enter, command chords).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A printable character about to be inserted at the caret. If the
    /// engine reports [`Outcome::Handled`](crate::types::Outcome::Handled),
    /// the character must be discarded, not inserted.
    BeforeInput(char),
    /// A key press event, used for line breaks and command chords.
    Key(KeyEvent),
}
