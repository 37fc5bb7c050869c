//! Pinnable note-taking library
//!
//! This library provides functionality for creating, editing, pinning, and
//! deleting short text notes persisted in a local key-value store, with
//! light/dark/system theme support.

mod cli;
mod config;
mod editor;
mod errors;
mod note;
mod render;
mod storage;
mod store;
mod theme;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use editor::*;
pub use errors::*;
pub use note::*;
pub use render::*;
pub use storage::*;
pub use store::*;
pub use theme::*;
