//! Note/draft persistence adapter over a key-value medium.
//!
//! # Responsibility
//! - Serialize the full note list under `savedNotes` and the draft under
//!   `currentNote`.
//! - Translate storage and decode failures into empty/absent results.
//!
//! # Invariants
//! - Every write re-serializes the whole value; no deltas.
//! - Failures are logged as metadata only and never reach the caller.
//! - The adapter holds no note state of its own.

use crate::model::note::Note;
use crate::repo::kv_repo::{KvRepository, RepoError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key for the serialized note list.
pub const NOTES_KEY: &str = "savedNotes";
/// Storage key for the serialized draft.
pub const DRAFT_KEY: &str = "currentNote";

/// Failure inside one persistence round-trip.
#[derive(Debug)]
pub enum PersistError {
    Repo(RepoError),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    InvalidRecord(String),
}

impl PersistError {
    fn code(&self) -> &'static str {
        match self {
            Self::Repo(_) => "storage_failed",
            Self::Encode(_) => "encode_failed",
            Self::Decode(_) => "decode_failed",
            Self::InvalidRecord(_) => "invalid_record",
        }
    }
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode value: {err}"),
            Self::Decode(err) => write!(f, "failed to decode value: {err}"),
            Self::InvalidRecord(message) => write!(f, "invalid persisted note: {message}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::InvalidRecord(_) => None,
        }
    }
}

impl From<RepoError> for PersistError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Stateless gateway translating notes and drafts to key-value writes.
pub struct NotePersistence<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> NotePersistence<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Writes the whole note list. Returns whether the write landed.
    pub fn save_notes(&mut self, notes: &[Note]) -> bool {
        match self.try_save_notes(notes) {
            Ok(bytes) => {
                debug!(
                    "event=notes_save module=persist status=ok count={} bytes={bytes}",
                    notes.len()
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=notes_save module=persist status=error count={} error_code={} error={err}",
                    notes.len(),
                    err.code()
                );
                false
            }
        }
    }

    /// Reads the note list; absent, unreadable or malformed data yields `[]`.
    pub fn load_notes(&self) -> Vec<Note> {
        match self.try_load_notes() {
            Ok(Some(notes)) => {
                debug!(
                    "event=notes_load module=persist status=ok count={}",
                    notes.len()
                );
                notes
            }
            Ok(None) => {
                debug!("event=notes_load module=persist status=empty");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=persist status=error error_code={} error={err}",
                    err.code()
                );
                Vec::new()
            }
        }
    }

    /// Removes the note list key.
    pub fn clear_notes(&mut self) -> bool {
        self.clear_key(NOTES_KEY)
    }

    /// Overwrites the draft slot. Returns whether the write landed.
    pub fn save_draft(&mut self, text: &str) -> bool {
        let result = serde_json::to_vec(text)
            .map_err(PersistError::Encode)
            .and_then(|bytes| {
                self.repo
                    .save(DRAFT_KEY, &bytes)
                    .map_err(PersistError::from)
            });
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=draft_save module=persist status=error error_code={} error={err}",
                    err.code()
                );
                false
            }
        }
    }

    /// Last persisted draft, or `""`.
    pub fn load_draft(&self) -> String {
        self.load_pending_draft().unwrap_or_default()
    }

    /// Last persisted draft, `None` when no draft is pending or it is unreadable.
    pub fn load_pending_draft(&self) -> Option<String> {
        match self.try_load_draft() {
            Ok(draft) => draft,
            Err(err) => {
                warn!(
                    "event=draft_load module=persist status=error error_code={} error={err}",
                    err.code()
                );
                None
            }
        }
    }

    /// Removes the draft slot entirely.
    pub fn clear_draft(&mut self) -> bool {
        self.clear_key(DRAFT_KEY)
    }

    fn try_save_notes(&mut self, notes: &[Note]) -> Result<usize, PersistError> {
        let bytes = serde_json::to_vec(notes).map_err(PersistError::Encode)?;
        self.repo.save(NOTES_KEY, &bytes)?;
        Ok(bytes.len())
    }

    fn try_load_notes(&self) -> Result<Option<Vec<Note>>, PersistError> {
        let Some(bytes) = self.repo.load(NOTES_KEY)? else {
            return Ok(None);
        };
        Ok(Some(decode_notes(&bytes)?))
    }

    fn try_load_draft(&self) -> Result<Option<String>, PersistError> {
        let Some(bytes) = self.repo.load(DRAFT_KEY)? else {
            return Ok(None);
        };
        let text = serde_json::from_slice::<String>(&bytes).map_err(PersistError::Decode)?;
        Ok(Some(text))
    }

    fn clear_key(&mut self, key: &'static str) -> bool {
        match self.repo.clear(key) {
            Ok(()) => true,
            Err(err) => {
                warn!("event=key_clear module=persist status=error key={key} error={err}");
                false
            }
        }
    }
}

/// Decodes a `savedNotes` payload, rejecting records that break note invariants.
pub fn decode_notes(bytes: &[u8]) -> Result<Vec<Note>, PersistError> {
    let notes: Vec<Note> = serde_json::from_slice(bytes).map_err(PersistError::Decode)?;
    for note in &notes {
        note.validate()
            .map_err(|err| PersistError::InvalidRecord(err.to_string()))?;
    }
    Ok(notes)
}
