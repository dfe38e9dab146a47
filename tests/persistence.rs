use scribe_mini::{
    Block, BlockKind, CONTENT_KEY, Caret, Document, FileStore, InputEvent, KeyCode, KeyEvent,
    MemoryStore, Modifiers, StorageAdapter, StorageError, StyleSet, StyleSpan,
    shell::{EditorShell, EditorShellBuilder},
    storage,
};

mod support;
use support::mock_store::{RejectingStore, SharedStore, UnavailableStore};

fn ch(c: char) -> InputEvent {
    InputEvent::BeforeInput(c)
}

fn enter() -> InputEvent {
    InputEvent::Key(KeyEvent {
        code: KeyCode::Enter,
        mods: Modifiers::empty(),
    })
}

fn type_str<S: scribe_mini::StateStore>(shell: &mut EditorShell<S>, s: &str) {
    for c in s.chars() {
        shell.handle_event(ch(c));
    }
}

fn sample_document() -> Document {
    Document::from_blocks(vec![
        Block {
            kind: BlockKind::Heading,
            text: "Title".to_string(),
            spans: vec![],
            active: StyleSet::empty(),
        },
        Block {
            kind: BlockKind::Paragraph,
            text: "soft\nbroken bold".to_string(),
            spans: vec![StyleSpan {
                styles: StyleSet::BOLD,
                start: 12,
                end: 16,
            }],
            active: StyleSet::HIGHLIGHT,
        },
        Block {
            kind: BlockKind::Code,
            text: "let x = 1;".to_string(),
            spans: vec![],
            active: StyleSet::empty(),
        },
    ])
}

#[test]
fn get_on_absent_key_is_none() {
    let adapter = StorageAdapter::new(MemoryStore::new());
    assert_eq!(adapter.get("missing"), None);
}

#[test]
fn unavailable_store_reads_none_and_rejects_writes() {
    let mut adapter = StorageAdapter::new(UnavailableStore);
    assert_eq!(adapter.get(CONTENT_KEY), None);
    assert!(!adapter.set(CONTENT_KEY, "{}"));
}

#[test]
fn set_then_get_round_trips_raw_values() {
    let mut adapter = StorageAdapter::new(MemoryStore::new());
    assert!(adapter.set("k", "v1"));
    assert!(adapter.set("k", "v2")); // overwrite, not append
    assert_eq!(adapter.get("k").as_deref(), Some("v2"));
}

#[test]
fn decode_of_invalid_json_is_a_parse_error() {
    let err = storage::decode("{not json").unwrap_err();
    assert!(matches!(err, StorageError::Parse(_)));
}

#[test]
fn encode_decode_round_trip_is_lossless() {
    let doc = sample_document();
    let blob = storage::encode(&doc).unwrap();
    let back = storage::decode(&blob).unwrap();
    assert_eq!(back, doc); // block texts, kinds, spans, active sets
}

#[test]
fn decode_repairs_structurally_valid_but_broken_blobs() {
    // No blocks at all: becomes the empty document.
    let doc = storage::decode(r#"{"blocks":[]}"#).unwrap();
    assert_eq!(doc.blocks().len(), 1);
    assert_eq!(doc.blocks()[0].text, "");

    // Span past the end of its text: clipped away.
    let doc = storage::decode(
        r#"{"blocks":[{"kind":"paragraph","text":"ab","spans":[{"styles":"BOLD","start":1,"end":9}]}]}"#,
    )
    .unwrap();
    assert_eq!(
        doc.blocks()[0].spans,
        vec![StyleSpan {
            styles: StyleSet::BOLD,
            start: 1,
            end: 2
        }]
    );
}

#[test]
fn adapter_load_distinguishes_absent_from_malformed() {
    let mut adapter = StorageAdapter::new(MemoryStore::new());
    assert!(matches!(adapter.load(CONTENT_KEY), Ok(None)));

    adapter.set(CONTENT_KEY, "][");
    assert!(adapter.load(CONTENT_KEY).is_err());
}

#[test]
fn save_returns_false_when_the_store_rejects() {
    let mut ed = EditorShell::new(RejectingStore::new());
    type_str(&mut ed, "unsaved");
    assert!(!ed.save());
}

#[test]
fn malformed_blob_starts_an_empty_document() {
    let store = SharedStore::new();
    store.seed(CONTENT_KEY, "{definitely not a document");

    let ed = EditorShell::new(store);
    assert_eq!(ed.document().blocks().len(), 1);
    assert_eq!(ed.document().blocks()[0].text, "");
}

#[test]
fn save_then_reload_restores_content_but_not_the_caret() {
    let store = SharedStore::new();

    let mut ed = EditorShell::new(store.clone());
    type_str(&mut ed, "# ");
    type_str(&mut ed, "Hello");
    ed.handle_event(enter());
    type_str(&mut ed, "* ");
    assert!(ed.save());
    drop(ed);

    // Fresh session over the same store.
    let ed = EditorShell::new(store);
    let blocks = ed.document().blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].kind, BlockKind::Heading);
    assert_eq!(blocks[0].text, "Hello");
    assert_eq!(blocks[1].kind, BlockKind::Heading); // split inherits kind
    assert_eq!(blocks[1].text, "");
    assert_eq!(blocks[1].active, StyleSet::BOLD);
    assert_eq!(ed.caret(), Caret::ZERO); // selection never round-trips
}

#[test]
fn unsaved_changes_are_not_persisted() {
    let store = SharedStore::new();

    let mut ed = EditorShell::new(store.clone());
    type_str(&mut ed, "draft");
    drop(ed); // no save

    let ed = EditorShell::new(store);
    assert_eq!(ed.document().blocks()[0].text, "");
}

#[test]
fn custom_storage_key_is_honored() {
    let store = SharedStore::new();

    let mut ed = EditorShellBuilder::default()
        .storage_key("scratch")
        .build(store.clone());
    type_str(&mut ed, "hi");
    assert!(ed.save());
    drop(ed);

    assert!(store.raw("scratch").is_some());
    assert!(store.raw(CONTENT_KEY).is_none());
}

#[test]
fn file_store_round_trips_documents() {
    let dir = tempfile::tempdir().unwrap();
    let mut adapter = StorageAdapter::new(FileStore::new(dir.path()));

    assert_eq!(adapter.get(CONTENT_KEY), None);
    let doc = sample_document();
    assert!(adapter.save(CONTENT_KEY, &doc));
    assert_eq!(adapter.load(CONTENT_KEY).unwrap(), Some(doc));
}

#[test]
fn file_store_write_failure_reports_false() {
    // A file where the directory should be: create_dir_all fails.
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    std::fs::write(&blocker, "file, not dir").unwrap();

    let mut store = FileStore::new(&blocker);
    let mut adapter = StorageAdapter::new(store.clone());
    assert!(!adapter.save(CONTENT_KEY, &Document::empty()));
    assert!(!scribe_mini::StateStore::set(&mut store, "k", "v"));
}
