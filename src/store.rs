//! In-memory note collection with write-through persistence.
//!
//! The store holds the ordered collection for the whole session and
//! re-persists it in full after every mutation, so the in-memory state and
//! the stored copy converge before the next observable action.

use log::{debug, info};

use crate::{Note, NoteDraft, NoteRepository, Result};

/// Manages the ordered note collection and its persistence.
///
/// New notes are prepended, so the collection reads newest-created first;
/// mutations otherwise keep the order stable. Operations addressing an id
/// that is not present are silent no-ops.
pub struct NoteStore {
    notes: Vec<Note>,
    repository: Box<dyn NoteRepository>,
}

impl NoteStore {
    /// Opens the store, loading the persisted collection once.
    pub fn open(repository: Box<dyn NoteRepository>) -> Result<Self> {
        let notes = repository.load()?;
        Ok(Self { notes, repository })
    }

    /// The current collection, newest-created first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Looks up a note by id.
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Creates a new unpinned note from the draft and prepends it.
    ///
    /// The editor guarantees non-empty fields before submission; the store
    /// accepts the draft as given.
    pub fn create(&mut self, draft: NoteDraft) -> Result<Note> {
        let note = Note::new(draft);
        info!("Creating note: {}", note.id);
        self.notes.insert(0, note.clone());
        self.persist()?;
        Ok(note)
    }

    /// Replaces title/content of the matching note and bumps its
    /// `updated_at`; no-op if the id is absent.
    pub fn update(&mut self, id: &str, draft: NoteDraft) -> Result<()> {
        match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) => {
                info!("Updating note: {}", id);
                note.apply_draft(draft);
            }
            None => debug!("Update for unknown note {}, ignoring", id),
        }
        self.persist()
    }

    /// Removes the matching note; no-op if the id is absent.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() < before {
            info!("Deleted note: {}", id);
        } else {
            debug!("Delete for unknown note {}, ignoring", id);
        }
        self.persist()
    }

    /// Flips `is_pinned` on the matching note; no-op if the id is absent.
    /// Does not change `updated_at`.
    pub fn toggle_pin(&mut self, id: &str) -> Result<()> {
        match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) => {
                note.is_pinned = !note.is_pinned;
                info!(
                    "Note {} is now {}",
                    id,
                    if note.is_pinned { "pinned" } else { "unpinned" }
                );
            }
            None => debug!("Pin toggle for unknown note {}, ignoring", id),
        }
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.repository.save(&self.notes)
    }
}
