use proptest::prelude::*;
use scribe_mini::{
    Caret, ContentOps, Document, Engine, InputEvent, KeyCode, KeyEvent, MemoryStore, Modifiers,
    Outcome, Range, StyleSet,
    shell::EditorShell,
    storage,
};

fn key(code: KeyCode, mods: Modifiers) -> InputEvent {
    InputEvent::Key(KeyEvent { code, mods })
}

// Strategy for single input events, weighted toward the interesting ones
fn event_strategy() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        // Plain typing, including the trigger characters and whitespace
        prop_oneof![
            Just('#'),
            Just('*'),
            Just(' '),
            Just('a'),
            Just('é'),
            Just('😀'),
            any::<char>().prop_filter("printable", |c| !c.is_control()),
        ]
        .prop_map(InputEvent::BeforeInput),
        Just(key(KeyCode::Enter, Modifiers::empty())),
        Just(key(KeyCode::Backspace, Modifiers::empty())),
        Just(key(KeyCode::Char('b'), Modifiers::CTRL)),
        Just(key(KeyCode::Char('u'), Modifiers::CTRL)),
        Just(key(KeyCode::Char(' '), Modifiers::SHIFT | Modifiers::ALT)),
        Just(key(KeyCode::Esc, Modifiers::empty())),
    ]
}

// Strategy for text content with edge cases, as lines of typed input
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("".to_string()),
        "[a-zA-Z0-9 .!?,;:\\-_]{0,50}",
        "[ \t]{0,10}",
        "[#*]{0,5}",
        "[\u{0020}-\u{007E}\u{00A0}-\u{00FF}\u{4E00}-\u{9FFF}\u{1F600}-\u{1F64F}]{0,30}",
    ]
}

proptest! {
    #[test]
    fn arbitrary_event_sequences_never_panic(
        events in prop::collection::vec(event_strategy(), 0..40),
    ) {
        let mut ed = EditorShell::new(MemoryStore::new());
        for event in events {
            let _ = ed.handle_event(event);

            // The caret stays inside the document at all times
            let caret = ed.caret();
            let doc = ed.document();
            assert!(caret.block < doc.block_count());
            assert!(caret.offset <= doc.block_len(caret.block));
        }
    }

    #[test]
    fn engine_is_safe_from_any_caret(
        text in text_strategy(),
        block in 0u32..8,
        offset in 0u32..64,
        event in event_strategy(),
    ) {
        let doc = Document::from_text(&text);
        let engine = Engine::new();
        // Out-of-range carets clamp instead of panicking
        let (_, cmds) = engine.handle_event(&doc, Caret { block, offset }, event);
        for cmd in &cmds {
            let _ = doc.apply(cmd);
        }
    }

    #[test]
    fn round_trip_preserves_edited_documents(
        events in prop::collection::vec(event_strategy(), 0..40),
    ) {
        let mut ed = EditorShell::new(MemoryStore::new());
        for event in events {
            let _ = ed.handle_event(event);
        }
        let doc = ed.document().clone();
        let blob = storage::encode(&doc).unwrap();
        assert_eq!(storage::decode(&blob).unwrap(), doc);
    }

    #[test]
    fn splitting_preserves_total_text(
        text in text_strategy(),
        offset in 0u32..64,
    ) {
        let doc = Document::from_text(&text);
        let at = doc.clamp(Caret { block: 0, offset });
        let split = doc.split_block(at);

        assert_eq!(split.block_count(), doc.block_count() + 1);
        let joined = format!(
            "{}{}",
            split.blocks()[0].text,
            split.blocks()[1].text
        );
        assert_eq!(joined, doc.blocks()[0].text);
    }

    #[test]
    fn non_trigger_lines_never_autoformat(
        text in text_strategy(),
    ) {
        let trimmed = text.trim();
        prop_assume!(!matches!(trimmed, "#" | "*" | "**" | "***"));

        let doc = Document::from_text(&text);
        let engine = Engine::new();
        let caret = doc.clamp(Caret { block: 0, offset: u32::MAX });
        let (outcome, cmds) = engine.handle_event(&doc, caret, InputEvent::BeforeInput(' '));

        assert_eq!(outcome, Outcome::NotHandled);
        assert!(cmds.is_empty());
    }

    #[test]
    fn ranged_style_toggle_is_an_involution(
        text in "[a-z]{1,20}",
        a in 0u32..20,
        b in 0u32..20,
    ) {
        let doc = Document::from_text(&text);
        let len = doc.block_len(0);
        let (start, end) = (a.min(len), b.min(len));
        prop_assume!(start != end);

        let range = Range { block: 0, start, end };
        let once = doc.toggle_style(range, StyleSet::HIGHLIGHT);
        let twice = once.toggle_style(range, StyleSet::HIGHLIGHT);
        assert_eq!(twice, doc);
    }

    #[test]
    fn enter_always_handled_and_text_preserved(
        text in text_strategy(),
        offset in 0u32..64,
    ) {
        let mut ed = EditorShell::new(MemoryStore::new());
        for c in text.chars().filter(|c| *c != ' ') {
            ed.handle_event(InputEvent::BeforeInput(c));
        }
        let before: String = ed.document().blocks().iter().map(|b| b.text.as_str()).collect();
        ed.set_caret(Caret { block: 0, offset });

        let outcome = ed.handle_event(key(KeyCode::Enter, Modifiers::empty()));
        assert_eq!(outcome, Outcome::Handled);

        let after: String = ed.document().blocks().iter().map(|b| b.text.as_str()).collect();
        // Hard break reshuffles blocks, soft break adds one newline; either
        // way no other character appears or disappears.
        let strip = |s: &str| s.chars().filter(|c| *c != '\n').collect::<String>();
        assert_eq!(strip(&after), strip(&before));
        let newlines = |s: &str| s.chars().filter(|c| *c == '\n').count();
        assert!(newlines(&after) <= newlines(&before) + 1);
    }
}

// Specific edge cases worth pinning outside the property harness
#[test]
fn empty_document_accepts_everything() {
    let mut ed = EditorShell::new(MemoryStore::new());
    for event in [
        key(KeyCode::Backspace, Modifiers::empty()),
        InputEvent::BeforeInput(' '),
        key(KeyCode::Enter, Modifiers::empty()),
        key(KeyCode::Char('b'), Modifiers::CTRL),
    ] {
        let _ = ed.handle_event(event);
    }
    assert!(ed.document().block_count() >= 1);
}

#[test]
fn clamp_is_idempotent() {
    let doc = Document::from_text("ab\ncd");
    let caret = doc.clamp(Caret {
        block: 99,
        offset: 99,
    });
    assert_eq!(caret, doc.clamp(caret));
    assert_eq!(caret, Caret { block: 1, offset: 2 });
}
