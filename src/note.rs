//! Core data structures for the pinnotes application.
//!
//! This module contains the note record persisted to storage and the
//! draft type produced by the editor.
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a single note in our system.
///
/// Field names are renamed to camelCase on the wire so the persisted
/// layout is `{id, title, content, isPinned, createdAt, updatedAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier for the note, immutable after creation
    pub id: String,
    /// Note title
    pub title: String,
    /// Free-text content, may contain newlines
    pub content: String,
    /// Whether the note is pinned to the top section
    pub is_pinned: bool,
    /// Creation time in epoch milliseconds, set once
    pub created_at: i64,
    /// Last edit time in epoch milliseconds; pin toggles do not touch it
    pub updated_at: i64,
}

/// The title/content pair produced by the editor on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl Note {
    /// Creates a new unpinned note from a draft.
    ///
    /// Generates a fresh UUID and stamps `created_at` and `updated_at`
    /// from a single clock read.
    pub fn new(draft: NoteDraft) -> Self {
        let now = Utc::now().timestamp_millis();

        Note {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            content: draft.content,
            is_pinned: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces title and content from a draft and bumps `updated_at`.
    ///
    /// `id`, `created_at`, and `is_pinned` are preserved.
    pub fn apply_draft(&mut self, draft: NoteDraft) {
        self.title = draft.title;
        self.content = draft.content;
        self.updated_at = Utc::now().timestamp_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_stamps_both_timestamps_from_one_read() {
        let note = Note::new(NoteDraft::new("A", "B"));
        assert_eq!(note.created_at, note.updated_at);
        assert!(!note.is_pinned);
        assert!(!note.id.is_empty());
    }

    #[test]
    fn apply_draft_preserves_identity_fields() {
        let mut note = Note::new(NoteDraft::new("A", "B"));
        note.is_pinned = true;
        let id = note.id.clone();
        let created = note.created_at;

        std::thread::sleep(std::time::Duration::from_millis(5));
        note.apply_draft(NoteDraft::new("C", "D"));

        assert_eq!(note.id, id);
        assert_eq!(note.created_at, created);
        assert!(note.is_pinned);
        assert_eq!(note.title, "C");
        assert!(note.updated_at > created);
    }

    #[test]
    fn serialized_field_names_match_storage_layout() {
        let note = Note::new(NoteDraft::new("A", "B"));
        let json = serde_json::to_value(&note).unwrap();
        for key in ["id", "title", "content", "isPinned", "createdAt", "updatedAt"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}
