use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::ThemeChoice;

/// Main CLI application arguments and command structure
#[derive(Parser)]
#[clap(version, about = "Pinnable note-taking for the terminal")]
pub struct Cli {
    /// Directory for the note storage (defaults to the platform data dir)
    #[clap(long, value_parser)]
    pub data_dir: Option<PathBuf>,

    /// Subcommands for the pinnotes application
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the pinnotes application
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    New {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// Content of the note
        #[clap(short, long)]
        content: Option<String>,
    },

    /// Edit an existing note
    Edit {
        /// ID of the note to edit
        id: String,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Pin or unpin a note by ID
    Pin {
        /// ID of the note to toggle
        id: String,
    },

    /// List all notes, pinned first
    List {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,

        /// Show full note content instead of a preview
        #[clap(short, long)]
        detailed: bool,
    },

    /// Show or change the display theme
    Theme {
        /// Theme to switch to; omit to cycle light -> dark -> system
        #[clap(value_enum)]
        choice: Option<ThemeArg>,
    },
}

/// Theme selection as a CLI argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for ThemeChoice {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeChoice::Light,
            ThemeArg::Dark => ThemeChoice::Dark,
            ThemeArg::System => ThemeChoice::System,
        }
    }
}
