//! Application shell: owns the note store, theme state, and editor, and
//! routes user commands between them.

use std::io::{stdin, stdout, Write};

use console::style;
use log::info;

use crate::{render_notes, Commands, NoteEditor, NoteStore, NotesError, Result, ThemeState};

/// A request shown to the user before a destructive action.
pub struct ConfirmPrompt<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub confirm_label: &'a str,
    pub cancel_label: &'a str,
}

/// Interactive confirmation capability.
///
/// The terminal implementation blocks the logical flow on a prompt; stub
/// implementations in tests answer immediately.
pub trait ConfirmDialog {
    /// Presents the prompt and returns whether the user confirmed.
    fn confirm(&self, prompt: &ConfirmPrompt<'_>) -> Result<bool>;

    /// Shows a brief acknowledgment after a completed action.
    fn acknowledge(&self, message: &str);
}

/// `[y/N]` confirmation on the controlling terminal.
pub struct TerminalDialog;

impl ConfirmDialog for TerminalDialog {
    fn confirm(&self, prompt: &ConfirmPrompt<'_>) -> Result<bool> {
        println!("{}", style(prompt.title).bold());
        println!("{}", prompt.body);
        print!("{} [y/N] ({} / {}): ", style("Proceed?").bold(), prompt.confirm_label, prompt.cancel_label);
        stdout().flush().map_err(NotesError::Io)?;

        let mut input = String::new();
        stdin().read_line(&mut input).map_err(NotesError::Io)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }

    fn acknowledge(&self, message: &str) {
        println!("{}", style(message).green());
    }
}

/// Application handler - processes commands and mediates between the
/// editor, the note store, and the theme state.
pub struct App {
    store: NoteStore,
    theme: ThemeState,
    editor: NoteEditor,
    dialog: Box<dyn ConfirmDialog>,
}

impl App {
    pub fn new(store: NoteStore, theme: ThemeState, dialog: Box<dyn ConfirmDialog>) -> Self {
        Self {
            store,
            theme,
            editor: NoteEditor::new(),
            dialog,
        }
    }

    /// Runs a single command against the application state.
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::New { title, content } => self.handle_new(title, content),
            Commands::Edit { id, title, content } => self.handle_edit(id, title, content),
            Commands::Delete { id, force } => self.handle_delete(id, force),
            Commands::Pin { id } => self.handle_pin(id),
            Commands::List { json, detailed } => self.handle_list(json, detailed),
            Commands::Theme { choice } => self.handle_theme(choice.map(Into::into)),
        }
    }

    fn handle_new(&mut self, title: Option<String>, content: Option<String>) -> Result<()> {
        self.editor.bind_new();

        let title = match title {
            Some(t) => t,
            None => prompt_line("Title", None)?,
        };
        let content = match content {
            Some(c) => c,
            None => prompt_content(None)?,
        };
        self.editor.set_title(title);
        self.editor.set_content(content);

        self.submit_editor()
    }

    fn handle_edit(
        &mut self,
        id: String,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<()> {
        let note = self
            .store
            .get(&id)
            .cloned()
            .ok_or(NotesError::NoteNotFound { id: id.clone() })?;
        self.editor.bind(&note);

        let title = match title {
            Some(t) => t,
            None => prompt_line("Title", Some(self.editor.title()))?,
        };
        let content = match content {
            Some(c) => c,
            None => prompt_content(Some(self.editor.content()))?,
        };
        self.editor.set_title(title);
        self.editor.set_content(content);

        self.submit_editor()
    }

    /// Routes a submitted draft to create or update depending on whether
    /// the editor was bound to an existing note.
    fn submit_editor(&mut self) -> Result<()> {
        let bound = self.editor.bound_id().map(str::to_string);
        let draft = self.editor.submit()?;
        match bound {
            Some(id) => {
                self.store.update(&id, draft)?;
                println!("Note {} updated", id);
            }
            None => {
                let note = self.store.create(draft)?;
                println!("Note created with ID: {}", note.id);
            }
        }
        Ok(())
    }

    fn handle_delete(&mut self, id: String, force: bool) -> Result<()> {
        let note = self
            .store
            .get(&id)
            .cloned()
            .ok_or(NotesError::NoteNotFound { id: id.clone() })?;

        if !force {
            let confirmed = self.dialog.confirm(&ConfirmPrompt {
                title: "Are you sure?",
                body: "You won't be able to revert this!",
                confirm_label: "Yes, delete it!",
                cancel_label: "Cancel",
            })?;
            if !confirmed {
                info!("Deletion of {} cancelled", id);
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        self.store.delete(&id)?;
        self.dialog
            .acknowledge(&format!("Deleted! \"{}\" has been removed.", note.title));
        Ok(())
    }

    fn handle_pin(&mut self, id: String) -> Result<()> {
        if self.store.get(&id).is_none() {
            return Err(NotesError::NoteNotFound { id });
        }
        self.store.toggle_pin(&id)?;

        let pinned = self.store.get(&id).map(|n| n.is_pinned).unwrap_or(false);
        println!(
            "Note {} is now {}",
            id,
            if pinned { "pinned" } else { "unpinned" }
        );
        Ok(())
    }

    fn handle_list(&self, json: bool, detailed: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(self.store.notes())?);
        } else {
            render_notes(self.store.notes(), detailed);
        }
        Ok(())
    }

    fn handle_theme(&mut self, choice: Option<crate::ThemeChoice>) -> Result<()> {
        match choice {
            Some(choice) => self.theme.set(choice)?,
            None => {
                self.theme.cycle()?;
            }
        }

        if self.theme.is_following_system() {
            println!("Theme: system (currently {})", self.theme.current());
        } else {
            println!("Theme: {}", self.theme.current());
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &NoteStore {
        &self.store
    }
}

/// Reads one line from stdin, falling back to `default` on empty input.
fn prompt_line(label: &str, default: Option<&str>) -> Result<String> {
    match default {
        Some(value) if !value.is_empty() => print!("{} [{}]: ", label, value),
        _ => print!("{}: ", label),
    }
    stdout().flush().map_err(NotesError::Io)?;

    let mut input = String::new();
    stdin().read_line(&mut input).map_err(NotesError::Io)?;
    let input = input.trim_end_matches(['\r', '\n']).to_string();

    if input.is_empty() {
        Ok(default.unwrap_or("").to_string())
    } else {
        Ok(input)
    }
}

/// Reads multi-line content from stdin, terminated by an empty line.
/// Empty input keeps the existing content when editing.
fn prompt_content(existing: Option<&str>) -> Result<String> {
    match existing {
        Some(value) if !value.is_empty() => {
            println!("Content (finish with an empty line, leave empty to keep current):")
        }
        _ => println!("Content (finish with an empty line):"),
    }

    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let read = stdin().read_line(&mut line).map_err(NotesError::Io)?;
        let line = line.trim_end_matches(['\r', '\n']);
        if read == 0 || line.is_empty() {
            break;
        }
        lines.push(line.to_string());
    }

    if lines.is_empty() {
        Ok(existing.unwrap_or("").to_string())
    } else {
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        BackendNoteRepository, ColorfgbgScheme, FileStore, StorageBackend, Theme, ThemeChoice,
    };
    use std::sync::Arc;
    use tempfile::tempdir;

    /// Dialog stub with a canned answer.
    struct CannedDialog {
        answer: bool,
    }

    impl ConfirmDialog for CannedDialog {
        fn confirm(&self, _prompt: &ConfirmPrompt<'_>) -> Result<bool> {
            Ok(self.answer)
        }

        fn acknowledge(&self, _message: &str) {}
    }

    fn app_in(dir: &std::path::Path, answer: bool) -> App {
        let backend: Arc<dyn StorageBackend> = Arc::new(FileStore::open(dir).unwrap());
        let store = NoteStore::open(Box::new(BackendNoteRepository::new(Arc::clone(
            &backend,
        ))))
        .unwrap();
        let theme = ThemeState::load(backend, Arc::new(ColorfgbgScheme)).unwrap();
        App::new(store, theme, Box::new(CannedDialog { answer }))
    }

    #[test]
    fn new_note_from_flags_lands_in_store() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path(), true);
        app.run(Commands::New {
            title: Some("Groceries".into()),
            content: Some("Milk, eggs".into()),
        })
        .unwrap();

        assert_eq!(app.store().notes().len(), 1);
        assert_eq!(app.store().notes()[0].title, "Groceries");
    }

    #[test]
    fn edit_from_flags_updates_the_bound_note() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path(), true);
        app.run(Commands::New {
            title: Some("A".into()),
            content: Some("B".into()),
        })
        .unwrap();
        let id = app.store().notes()[0].id.clone();

        app.run(Commands::Edit {
            id: id.clone(),
            title: Some("C".into()),
            content: Some("D".into()),
        })
        .unwrap();

        let note = app.store().get(&id).unwrap();
        assert_eq!(note.title, "C");
        assert_eq!(note.content, "D");

        let missing = app.run(Commands::Edit {
            id: "missing".into(),
            title: Some("X".into()),
            content: Some("Y".into()),
        });
        assert!(matches!(missing, Err(NotesError::NoteNotFound { .. })));
    }

    #[test]
    fn confirmed_delete_removes_the_note() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path(), true);
        app.run(Commands::New {
            title: Some("A".into()),
            content: Some("B".into()),
        })
        .unwrap();
        let id = app.store().notes()[0].id.clone();

        app.run(Commands::Delete { id, force: false }).unwrap();
        assert!(app.store().notes().is_empty());
    }

    #[test]
    fn cancelled_delete_is_a_no_op() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path(), false);
        app.run(Commands::New {
            title: Some("A".into()),
            content: Some("B".into()),
        })
        .unwrap();
        let id = app.store().notes()[0].id.clone();

        app.run(Commands::Delete { id, force: false }).unwrap();
        assert_eq!(app.store().notes().len(), 1);
    }

    #[test]
    fn delete_of_unknown_id_is_reported() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path(), true);
        let result = app.run(Commands::Delete {
            id: "missing".into(),
            force: true,
        });
        assert!(matches!(result, Err(NotesError::NoteNotFound { .. })));
    }

    #[test]
    fn theme_command_sets_and_reports_state() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path(), true);
        app.run(Commands::Theme {
            choice: Some(crate::ThemeArg::Dark),
        })
        .unwrap();
        assert_eq!(app.theme.current(), Theme::Dark);
        assert!(!app.theme.is_following_system());

        app.theme.set(ThemeChoice::System).unwrap();
        assert!(app.theme.is_following_system());
    }
}
