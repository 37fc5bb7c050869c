//! Persistence layer for the pinnotes application.
//!
//! Storage is a flat string key-value store, mirroring the layout the
//! application persists to: key `notes` holds the serialized note
//! collection, key `theme` holds the explicit theme choice (absent means
//! "follow system"). [`FileStore`] is the on-disk backend, one file per
//! key under the data directory. [`NoteRepository`] layers the collection
//! load/save contract on top of a backend.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{debug, error, info, warn};
use tempfile::NamedTempFile;

use crate::{Note, NotesError, Result};

/// Storage key holding the serialized note collection.
pub const NOTES_KEY: &str = "notes";

/// Storage key holding the explicit theme choice.
pub const THEME_KEY: &str = "theme";

/// A string-valued key-value store.
///
/// The seam between in-memory state and persistence: the note repository
/// and the theme state both write through this interface, so storage
/// backends can be swapped without touching mutation logic.
pub trait StorageBackend {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key` if present; removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed storage: one file per key under a root directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            debug!("Data directory does not exist, creating: {}", root.display());
            fs::create_dir_all(&root).map_err(|e| {
                error!("Failed to create data directory: {}", e);
                NotesError::DirectoryError { path: root.clone() }
            })?;
        }
        Ok(Self { root })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl StorageBackend for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            debug!("No stored value for key `{}`", key);
            return Ok(None);
        }
        let value = fs::read_to_string(&path).map_err(|e| {
            error!("Failed to read {}: {}", path.display(), e);
            NotesError::Io(e)
        })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let dir = path.parent().unwrap_or_else(|| Path::new("."));

        // Write to a temporary file in the same directory and move it into
        // place so a crash mid-write never leaves a truncated value.
        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            NotesError::Io(e)
        })?;

        temp_file.write_all(value.as_bytes()).map_err(|e| {
            error!("Failed to write to temporary file: {}", e);
            NotesError::Io(e)
        })?;

        temp_file.flush().map_err(|e| {
            error!("Failed to flush temporary file: {}", e);
            NotesError::Io(e)
        })?;

        temp_file.persist(&path).map_err(|e| {
            error!("Failed to persist file {}: {}", path.display(), e.error);
            NotesError::Io(e.error)
        })?;

        debug!("Stored value for key `{}`", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                error!("Failed to remove {}: {}", path.display(), e);
                NotesError::Io(e)
            })?;
            debug!("Removed key `{}`", key);
        }
        Ok(())
    }
}

/// Load/save contract for the full note collection.
pub trait NoteRepository {
    /// Loads the persisted collection; an absent value yields an empty one.
    fn load(&self) -> Result<Vec<Note>>;

    /// Persists the full collection, replacing the previous value.
    fn save(&self, notes: &[Note]) -> Result<()>;
}

/// Note repository persisting the collection as a JSON array under
/// [`NOTES_KEY`].
pub struct BackendNoteRepository {
    backend: Arc<dyn StorageBackend>,
}

impl BackendNoteRepository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }
}

impl NoteRepository for BackendNoteRepository {
    fn load(&self) -> Result<Vec<Note>> {
        let Some(raw) = self.backend.get(NOTES_KEY)? else {
            info!("No persisted notes found, starting with an empty collection");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => {
                info!("Loaded {} notes from storage", notes.len());
                Ok(notes)
            }
            Err(e) => {
                // Corrupted data is surfaced but not fatal; the next save
                // overwrites it.
                warn!("Persisted notes are malformed, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, notes: &[Note]) -> Result<()> {
        let json = serde_json::to_string_pretty(notes).map_err(|e| {
            error!("Failed to serialize note collection: {}", e);
            NotesError::Serialization(e)
        })?;
        self.backend.set(NOTES_KEY, &json)?;
        debug!("Persisted {} notes", notes.len());
        Ok(())
    }
}
