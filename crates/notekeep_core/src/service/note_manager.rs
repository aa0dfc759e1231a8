//! Note lifecycle orchestration.
//!
//! # Responsibility
//! - Own the note list and the draft buffer for one session.
//! - Persist after every note-list mutation before returning.
//! - Notify observers when the note list changed.
//!
//! # Invariants
//! - Empty creates and update/delete misses mutate nothing and write nothing.
//! - A failed write never rolls back the in-memory mutation.
//! - `initialize` loads from storage at most once, and always before the
//!   first write, so a session never overwrites notes it has not loaded.

use crate::model::draft::DraftBuffer;
use crate::model::note::Note;
use crate::model::note_store::NoteStore;
use crate::repo::kv_repo::KvRepository;
use crate::repo::note_repo::NotePersistence;
use crate::service::notify::{ChangeNotifier, SubscriptionId};
use log::{debug, info, warn};

/// Aggregate figures shown by settings-style views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteStats {
    pub note_count: usize,
    pub total_characters: usize,
}

/// Session state container and the single entry point for UI callers.
pub struct NoteManager<R: KvRepository> {
    store: NoteStore,
    draft: DraftBuffer,
    persistence: NotePersistence<R>,
    notifier: ChangeNotifier,
    initialized: bool,
}

impl<R: KvRepository> NoteManager<R> {
    /// Creates an empty, not yet initialized manager.
    pub fn new(repo: R) -> Self {
        Self {
            store: NoteStore::new(),
            draft: DraftBuffer::new(),
            persistence: NotePersistence::new(repo),
            notifier: ChangeNotifier::new(),
            initialized: false,
        }
    }

    /// Creates a manager and loads persisted state.
    pub fn open(repo: R) -> Self {
        let mut manager = Self::new(repo);
        manager.initialize();
        manager
    }

    /// Loads notes and the pending draft from storage.
    ///
    /// Returns `false` when the manager was already initialized.
    pub fn initialize(&mut self) -> bool {
        if self.initialized {
            debug!("event=manager_init module=service status=skipped reason=already_initialized");
            return false;
        }
        self.initialized = true;

        let (store, dropped) = NoteStore::from_persisted(self.persistence.load_notes());
        if dropped > 0 {
            warn!("event=manager_init module=service status=recovered dropped_duplicates={dropped}");
        }
        self.store = store;
        self.draft = DraftBuffer::restored(self.persistence.load_pending_draft());

        info!(
            "event=manager_init module=service status=ok notes={} draft_pending={}",
            self.store.len(),
            self.draft.is_pending()
        );
        self.notifier.notify();
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current note list, most recently created first.
    pub fn notes(&self) -> &[Note] {
        self.store.list()
    }

    /// Commits `text` as a new note at the head of the list.
    ///
    /// Returns `None` and does nothing for empty text.
    pub fn save_new_note(&mut self, text: &str) -> Option<Note> {
        self.ensure_initialized();
        let note = self.store.create(text)?;
        self.persist_notes();
        info!(
            "event=note_create module=service status=ok count={}",
            self.store.len()
        );
        self.notifier.notify();
        Some(note)
    }

    /// Replaces the content of the stored note sharing `note.id`.
    pub fn update_note(&mut self, note: &Note, text: &str) -> bool {
        self.ensure_initialized();
        if !self.store.update(note.id, text) {
            debug!("event=note_update module=service status=miss note_id={}", note.id);
            return false;
        }
        self.persist_notes();
        self.notifier.notify();
        true
    }

    /// Removes the stored note sharing `note.id`.
    pub fn delete_note(&mut self, note: &Note) -> bool {
        self.ensure_initialized();
        if !self.store.delete(note.id) {
            debug!("event=note_delete module=service status=miss note_id={}", note.id);
            return false;
        }
        self.persist_notes();
        self.notifier.notify();
        true
    }

    /// Drops every note and the pending draft, in memory and in storage.
    pub fn clear_all_notes(&mut self) {
        self.ensure_initialized();
        let removed = self.store.len();
        self.store.clear();
        self.draft.clear();
        let notes_cleared = self.persistence.clear_notes();
        let draft_cleared = self.persistence.clear_draft();
        info!(
            "event=notes_clear module=service status={} removed={removed}",
            if notes_cleared && draft_cleared { "ok" } else { "partial" }
        );
        self.notifier.notify();
    }

    /// Overwrites the pending draft and persists it immediately.
    pub fn save_current_text(&mut self, text: &str) {
        self.ensure_initialized();
        self.draft.set(text);
        self.persistence.save_draft(text);
    }

    /// Last draft handed to `save_current_text`, `""` when none.
    ///
    /// Once initialized this is the session buffer, which matches the
    /// persisted slot except after a failed draft write; the buffer then
    /// keeps the newer text. Before initialization the slot is read directly.
    pub fn load_current_text(&self) -> String {
        if self.initialized {
            self.draft.text().to_string()
        } else {
            self.persistence.load_draft()
        }
    }

    /// Discards the pending draft and its storage slot.
    pub fn clear_current_text(&mut self) {
        self.ensure_initialized();
        self.draft.clear();
        self.persistence.clear_draft();
    }

    pub fn has_pending_draft(&self) -> bool {
        self.draft.is_pending()
    }

    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn stats(&self) -> NoteStats {
        NoteStats {
            note_count: self.store.len(),
            total_characters: self.store.total_characters(),
        }
    }

    /// Where the backing medium keeps its data.
    pub fn storage_location(&self) -> String {
        self.persistence.repository().location()
    }

    /// Ends the session and hands the medium back.
    pub fn into_repository(self) -> R {
        self.persistence.into_repository()
    }

    fn ensure_initialized(&mut self) {
        if !self.initialized {
            self.initialize();
        }
    }

    fn persist_notes(&mut self) {
        self.persistence.save_notes(self.store.list());
    }
}

#[cfg(test)]
mod tests {
    use super::NoteManager;
    use crate::repo::kv_repo::MemoryKvRepository;

    #[test]
    fn initialize_runs_once() {
        let mut manager = NoteManager::new(MemoryKvRepository::new());
        assert!(!manager.is_initialized());
        assert!(manager.initialize());
        assert!(!manager.initialize());
    }

    #[test]
    fn first_write_loads_persisted_notes_before_saving() {
        let mut earlier = NoteManager::open(MemoryKvRepository::new());
        earlier.save_new_note("old1");
        earlier.save_new_note("old2");

        let mut manager = NoteManager::new(earlier.into_repository());
        manager.save_new_note("new").unwrap();
        assert!(manager.is_initialized());
        assert!(!manager.initialize());

        let reopened = NoteManager::open(manager.into_repository());
        let contents: Vec<&str> = reopened
            .notes()
            .iter()
            .map(|note| note.content.as_str())
            .collect();
        assert_eq!(contents, vec!["new", "old2", "old1"]);
    }

    #[test]
    fn draft_write_before_initialize_keeps_notes() {
        let mut earlier = NoteManager::open(MemoryKvRepository::new());
        earlier.save_new_note("kept");
        earlier.save_current_text("stored draft");

        let mut manager = NoteManager::new(earlier.into_repository());
        assert_eq!(manager.load_current_text(), "stored draft");

        manager.save_current_text("typed");
        assert_eq!(manager.notes().len(), 1);
        assert_eq!(manager.load_current_text(), "typed");
    }

    #[test]
    fn stats_track_note_list() {
        let mut manager = NoteManager::open(MemoryKvRepository::new());
        manager.save_new_note("abc");
        manager.save_new_note("de");
        let stats = manager.stats();
        assert_eq!(stats.note_count, 2);
        assert_eq!(stats.total_characters, 5);
        assert_eq!(manager.storage_location(), "memory");
    }
}
