//! Domain model for notes and drafts.
//!
//! # Responsibility
//! - Define the committed note record and the in-memory state containers.
//! - Keep list/draft invariants free of any storage concern.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Model types perform no I/O.

pub mod draft;
pub mod note;
pub mod note_store;
