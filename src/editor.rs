//! The modal note editor: a single-purpose form bound to at most one note.
//!
//! The editor owns two text fields seeded from its binding. Rebinding
//! (switching which note is edited, or switching to "none" for creation)
//! resets the fields. Submission validates both fields and emits a draft;
//! closing without submitting discards everything.

use log::debug;

use crate::{Note, NoteDraft, NotesError, Result};

/// A modal draft form for creating or editing one note.
#[derive(Debug, Default)]
pub struct NoteEditor {
    binding: Option<String>,
    title: String,
    content: String,
}

impl NoteEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the editor to an existing note, seeding the fields from it.
    pub fn bind(&mut self, note: &Note) {
        debug!("Editor bound to note {}", note.id);
        self.binding = Some(note.id.clone());
        self.title = note.title.clone();
        self.content = note.content.clone();
    }

    /// Binds the editor to "none" for creating a new note; fields reset
    /// to empty.
    pub fn bind_new(&mut self) {
        debug!("Editor bound for a new note");
        self.binding = None;
        self.title.clear();
        self.content.clear();
    }

    /// The id of the bound note, or `None` when creating.
    pub fn bound_id(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Validates the fields and emits the draft, leaving the editor
    /// closed. Both fields must be non-empty.
    pub fn submit(&mut self) -> Result<NoteDraft> {
        if self.title.trim().is_empty() {
            return Err(NotesError::ValidationFailed {
                message: "a note needs a title".to_string(),
            });
        }
        if self.content.trim().is_empty() {
            return Err(NotesError::ValidationFailed {
                message: "a note needs some content".to_string(),
            });
        }

        let draft = NoteDraft::new(self.title.clone(), self.content.clone());
        self.close();
        Ok(draft)
    }

    /// Discards the current draft with no effect on the store.
    pub fn close(&mut self) {
        self.binding = None;
        self.title.clear();
        self.content.clear();
    }
}
