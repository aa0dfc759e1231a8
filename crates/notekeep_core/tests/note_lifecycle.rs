use notekeep_core::db::{open_db, open_db_in_memory};
use notekeep_core::{
    KvRepository, MemoryKvRepository, Note, NoteManager, SqliteKvRepository, DRAFT_KEY, NOTES_KEY,
};
use std::cell::Cell;
use std::rc::Rc;

fn sqlite_manager() -> NoteManager<SqliteKvRepository> {
    let repo = SqliteKvRepository::try_new(open_db_in_memory().unwrap()).unwrap();
    NoteManager::open(repo)
}

fn restart<R: KvRepository>(manager: NoteManager<R>) -> NoteManager<R> {
    NoteManager::open(manager.into_repository())
}

#[test]
fn save_new_note_prepends_most_recent() {
    let mut manager = sqlite_manager();
    manager.save_new_note("A").unwrap();
    manager.save_new_note("B").unwrap();

    let contents: Vec<&str> = manager.notes().iter().map(|n| n.content.as_str()).collect();
    assert_eq!(contents, vec!["B", "A"]);
}

#[test]
fn save_new_note_with_empty_text_changes_nothing() {
    let mut manager = sqlite_manager();
    manager.save_new_note("kept").unwrap();
    let before = manager.notes().to_vec();

    assert!(manager.save_new_note("").is_none());
    assert_eq!(manager.notes(), before.as_slice());
}

#[test]
fn save_new_note_grows_by_one_with_matching_head() {
    let mut manager = sqlite_manager();
    for (index, text) in ["one", "two", "  ", "多字节"].iter().enumerate() {
        let note = manager.save_new_note(text).unwrap();
        assert_eq!(manager.notes().len(), index + 1);
        assert_eq!(manager.notes()[0], note);
        assert_eq!(manager.notes()[0].content, *text);
    }
}

#[test]
fn update_keeps_identity_and_creation_time() {
    let mut manager = sqlite_manager();
    let original = manager.save_new_note("draft").unwrap();

    assert!(manager.update_note(&original, "new"));

    let stored = &manager.notes()[0];
    assert_eq!(stored.id, original.id);
    assert_eq!(stored.created_at, original.created_at);
    assert_eq!(stored.content, "new");
    assert!(stored.updated_at >= stored.created_at);
}

#[test]
fn update_and_delete_of_unknown_note_are_silent_misses() {
    let mut manager = sqlite_manager();
    manager.save_new_note("kept").unwrap();
    let stranger = Note::new("not stored").unwrap();

    assert!(!manager.update_note(&stranger, "changed"));
    assert!(!manager.delete_note(&stranger));
    assert_eq!(manager.notes().len(), 1);
    assert_eq!(manager.notes()[0].content, "kept");
}

#[test]
fn delete_removes_exactly_one_and_keeps_order() {
    let mut manager = sqlite_manager();
    let a = manager.save_new_note("A").unwrap();
    let b = manager.save_new_note("B").unwrap();
    let c = manager.save_new_note("C").unwrap();

    assert!(manager.delete_note(&b));

    let ids: Vec<_> = manager.notes().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![c.id, a.id]);
}

#[test]
fn mutations_survive_restart() {
    let mut manager = sqlite_manager();
    let a = manager.save_new_note("A").unwrap();
    let b = manager.save_new_note("B").unwrap();
    manager.update_note(&a, "A2");
    manager.save_new_note("C").unwrap();
    let snapshot = manager.notes().to_vec();
    let c = snapshot[0].clone();
    manager.delete_note(&c);

    let manager = restart(manager);
    let ids: Vec<_> = manager.notes().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
    assert_eq!(manager.notes()[1].content, "A2");
    assert_eq!(manager.notes(), &snapshot[1..]);
}

#[test]
fn clear_all_notes_empties_memory_and_storage() {
    let mut manager = sqlite_manager();
    manager.save_new_note("A").unwrap();
    manager.save_current_text("pending");

    manager.clear_all_notes();
    assert!(manager.notes().is_empty());
    assert_eq!(manager.load_current_text(), "");

    let manager = restart(manager);
    assert!(manager.notes().is_empty());
    assert_eq!(manager.load_current_text(), "");

    let repo = manager.into_repository();
    assert_eq!(repo.load(NOTES_KEY).unwrap(), None);
    assert_eq!(repo.load(DRAFT_KEY).unwrap(), None);
}

#[test]
fn draft_round_trips_across_restart_and_clears() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notekeep.sqlite3");

    {
        let repo = SqliteKvRepository::try_new(open_db(&path).unwrap()).unwrap();
        let mut manager = NoteManager::open(repo);
        manager.save_current_text("ab");
        manager.save_current_text("abc");
    }

    let repo = SqliteKvRepository::try_new(open_db(&path).unwrap()).unwrap();
    let mut manager = NoteManager::open(repo);
    assert!(manager.has_pending_draft());
    assert_eq!(manager.load_current_text(), "abc");

    manager.clear_current_text();
    assert_eq!(manager.load_current_text(), "");

    let manager = restart(manager);
    assert_eq!(manager.load_current_text(), "");
    assert!(!manager.has_pending_draft());
}

#[test]
fn empty_draft_is_kept_as_pending() {
    let mut manager = NoteManager::open(MemoryKvRepository::new());
    manager.save_current_text("");

    let manager = restart(manager);
    assert!(manager.has_pending_draft());
    assert_eq!(manager.load_current_text(), "");
}

#[test]
fn malformed_storage_loads_as_empty_list() {
    let mut repo = MemoryKvRepository::new();
    repo.save(NOTES_KEY, b"[{\"id\": 42}]").unwrap();
    repo.save(DRAFT_KEY, b"\xff\xfe").unwrap();

    let manager = NoteManager::open(repo);
    assert!(manager.notes().is_empty());
    assert_eq!(manager.load_current_text(), "");
}

#[test]
fn duplicate_ids_in_storage_keep_first_occurrence() {
    let mut first = NoteManager::open(MemoryKvRepository::new());
    let note = first.save_new_note("original").unwrap();
    let mut repo = first.into_repository();

    let mut shadow = note.clone();
    shadow.content = "shadow".to_string();
    let payload = serde_json::to_vec(&vec![note.clone(), shadow]).unwrap();
    repo.save(NOTES_KEY, &payload).unwrap();

    let manager = NoteManager::open(repo);
    assert_eq!(manager.notes().len(), 1);
    assert_eq!(manager.notes()[0].content, "original");
}

#[test]
fn observers_fire_once_per_state_change() {
    let hits = Rc::new(Cell::new(0));
    let mut manager = NoteManager::new(MemoryKvRepository::new());
    let counter = Rc::clone(&hits);
    let subscription = manager.subscribe(move || counter.set(counter.get() + 1));

    manager.initialize();
    assert_eq!(hits.get(), 1);

    let note = manager.save_new_note("A").unwrap();
    manager.save_new_note("");
    manager.update_note(&note, "A2");
    manager.update_note(&Note::new("x").unwrap(), "y");
    manager.save_current_text("draft");
    manager.delete_note(&note);
    manager.clear_all_notes();
    assert_eq!(hits.get(), 5);

    assert!(manager.unsubscribe(subscription));
    manager.save_new_note("B");
    assert_eq!(hits.get(), 5);
}
