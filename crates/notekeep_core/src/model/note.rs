//! Note domain model.
//!
//! # Responsibility
//! - Define the committed note record and its wire shape.
//! - Provide derived read-only views (`preview`, `formatted_date`).
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is set once; `updated_at >= created_at` always.
//! - Derived views are computed on read and never persisted.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every committed note.
pub type NoteId = Uuid;

/// Number of characters kept by [`Note::preview`].
pub const PREVIEW_CHARS: usize = 50;
/// Suffix appended to truncated previews.
pub const PREVIEW_ELLIPSIS: &str = "...";
/// Display format used by [`Note::formatted_date`].
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Validation errors for note writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Notes must carry at least one character of content.
    EmptyContent,
    /// Persisted record has `updated_at` earlier than `created_at`.
    UpdatedBeforeCreated { id: NoteId },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content cannot be empty"),
            Self::UpdatedBeforeCreated { id } => {
                write!(f, "note {id} has updatedAt earlier than createdAt")
            }
        }
    }
}

impl Error for NoteValidationError {}

/// One committed piece of text.
///
/// Serialized with camelCase field names to match the `savedNotes` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable global ID, hyphenated string form on the wire.
    pub id: NoteId,
    /// Text body.
    pub content: String,
    /// Creation instant. Never mutated after construction.
    pub created_at: DateTime<Utc>,
    /// Last content mutation instant.
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note with a fresh ID and both timestamps set to now.
    ///
    /// # Errors
    /// - Returns [`NoteValidationError::EmptyContent`] for empty input.
    pub fn new(content: impl Into<String>) -> Result<Self, NoteValidationError> {
        Self::with_id(Uuid::new_v4(), content, Utc::now())
    }

    /// Creates a note with a caller-provided ID and creation instant.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: NoteId,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, NoteValidationError> {
        let content = content.into();
        if content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }

        Ok(Self {
            id,
            content,
            created_at,
            updated_at: created_at,
        })
    }

    /// Replaces content and bumps `updated_at`.
    ///
    /// `at` is clamped to `created_at` so a clock that stepped backwards
    /// cannot break the timestamp ordering.
    pub fn set_content(&mut self, content: impl Into<String>, at: DateTime<Utc>) {
        self.content = content.into();
        self.updated_at = at.max(self.created_at);
    }

    /// Checks invariants of a record read back from storage.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.updated_at < self.created_at {
            return Err(NoteValidationError::UpdatedBeforeCreated { id: self.id });
        }
        Ok(())
    }

    /// First [`PREVIEW_CHARS`] characters, with an ellipsis when truncated.
    pub fn preview(&self) -> String {
        let mut chars = self.content.chars();
        let mut preview: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            preview.push_str(PREVIEW_ELLIPSIS);
        }
        preview
    }

    /// `updated_at` rendered as `YYYY-MM-DD HH:MM` in local time.
    pub fn formatted_date(&self) -> String {
        self.formatted_date_in(&Local)
    }

    /// `updated_at` rendered as `YYYY-MM-DD HH:MM` in the given zone.
    pub fn formatted_date_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.updated_at
            .with_timezone(tz)
            .format(DISPLAY_DATE_FORMAT)
            .to_string()
    }

    /// Character count of the body.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}
