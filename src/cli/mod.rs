//! CLI module for the pinnotes application
//!
//! This module handles the command-line interface for interacting with the
//! note store and theme state.

mod app;
mod main;

pub use app::*;
pub use main::*;
