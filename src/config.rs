use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{NotesError, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory holding the key-value storage files
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolves the configuration, preferring an explicit data directory
    /// over the platform default.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Self { data_dir })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "pinnotes")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NotesError::ApplicationError {
            message: "could not determine a platform data directory".to_string(),
        })
}
