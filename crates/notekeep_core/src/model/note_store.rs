//! In-memory ordered collection of committed notes.
//!
//! # Responsibility
//! - Hold the canonical note list for one session.
//! - Apply create/update/delete/clear with list invariants.
//!
//! # Invariants
//! - Order is most-recently-created first; new notes are prepended.
//! - `id` is unique across the sequence at all times.
//! - The store performs no I/O. Callers persist after every mutation.

use crate::model::note::{Note, NoteId};
use chrono::Utc;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteStore {
    notes: Vec<Note>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a persisted sequence.
    ///
    /// Later duplicates of an already-seen id are dropped so the uniqueness
    /// invariant holds even for hand-edited storage. Returns the store and
    /// the number of dropped records.
    pub fn from_persisted(notes: Vec<Note>) -> (Self, usize) {
        let total = notes.len();
        let mut seen = HashSet::with_capacity(total);
        let notes: Vec<Note> = notes
            .into_iter()
            .filter(|note| seen.insert(note.id))
            .collect();
        let dropped = total - notes.len();
        (Self { notes }, dropped)
    }

    /// Prepends a new note. Returns `None` for empty content.
    pub fn create(&mut self, content: impl Into<String>) -> Option<Note> {
        let note = Note::new(content).ok()?;
        self.notes.insert(0, note.clone());
        Some(note)
    }

    /// Replaces the content of the note with `id`.
    ///
    /// Returns `false` when no note matches.
    pub fn update(&mut self, id: NoteId, content: impl Into<String>) -> bool {
        match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) => {
                note.set_content(content, Utc::now());
                true
            }
            None => false,
        }
    }

    /// Removes the note with `id`, keeping the relative order of the rest.
    pub fn delete(&mut self, id: NoteId) -> bool {
        match self.notes.iter().position(|note| note.id == id) {
            Some(index) => {
                self.notes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Read-only view in store order.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Sum of character counts over all note bodies.
    pub fn total_characters(&self) -> usize {
        self.notes.iter().map(Note::char_count).sum()
    }
}
