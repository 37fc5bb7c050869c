//! Display theme state: light/dark with optional follow-the-system mode.
//!
//! An explicit user choice is persisted under the `theme` storage key;
//! when the key is absent the active theme follows the operating system's
//! preference, re-resolved through the [`SystemScheme`] capability and
//! updated on preference-change notifications for as long as the state
//! value is alive.

use std::{env, fmt, sync::Arc};

use log::{debug, info, warn};

use crate::{Result, StorageBackend, THEME_KEY};

/// An active display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn from_stored(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-facing theme selection: an explicit theme or "follow system".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Light,
    Dark,
    System,
}

impl fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeChoice::Light => f.write_str("light"),
            ThemeChoice::Dark => f.write_str("dark"),
            ThemeChoice::System => f.write_str("system"),
        }
    }
}

/// The operating system's "prefers dark" signal.
pub trait SystemScheme {
    fn prefers_dark(&self) -> bool;
}

/// Detects the terminal color scheme from the conventional `COLORFGBG`
/// hint ("fg;bg", dark background codes 0-6 and 8). Defaults to light
/// when the hint is absent or unparseable.
pub struct ColorfgbgScheme;

impl SystemScheme for ColorfgbgScheme {
    fn prefers_dark(&self) -> bool {
        let Ok(hint) = env::var("COLORFGBG") else {
            return false;
        };
        let Some(bg) = hint.rsplit(';').next().and_then(|s| s.parse::<u8>().ok()) else {
            debug!("Unparseable COLORFGBG hint: {}", hint);
            return false;
        };
        bg <= 6 || bg == 8
    }
}

/// Tracks the active theme and whether it follows the system preference.
pub struct ThemeState {
    current: Theme,
    following_system: bool,
    backend: Arc<dyn StorageBackend>,
    system: Arc<dyn SystemScheme>,
}

impl ThemeState {
    /// Resolves the initial state: a persisted explicit choice wins,
    /// otherwise the theme follows the current system preference.
    pub fn load(
        backend: Arc<dyn StorageBackend>,
        system: Arc<dyn SystemScheme>,
    ) -> Result<Self> {
        let stored = backend.get(THEME_KEY)?;
        let (current, following_system) = match stored.as_deref() {
            Some(value) => match Theme::from_stored(value) {
                Some(theme) => {
                    debug!("Using persisted theme: {}", theme);
                    (theme, false)
                }
                None => {
                    warn!("Unrecognized persisted theme `{}`, following system", value);
                    (resolve_system(system.as_ref()), true)
                }
            },
            None => (resolve_system(system.as_ref()), true),
        };

        Ok(Self {
            current,
            following_system,
            backend,
            system,
        })
    }

    /// The currently active theme.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// True iff no explicit choice is persisted.
    pub fn is_following_system(&self) -> bool {
        self.following_system
    }

    /// Applies a user selection.
    ///
    /// `System` clears the persisted choice and resolves the active theme
    /// from the OS preference immediately; an explicit theme is persisted
    /// and stops system tracking.
    pub fn set(&mut self, choice: ThemeChoice) -> Result<()> {
        match choice {
            ThemeChoice::System => {
                self.backend.remove(THEME_KEY)?;
                self.following_system = true;
                self.current = resolve_system(self.system.as_ref());
                info!("Theme now follows the system (currently {})", self.current);
            }
            ThemeChoice::Light | ThemeChoice::Dark => {
                let theme = match choice {
                    ThemeChoice::Light => Theme::Light,
                    _ => Theme::Dark,
                };
                self.backend.set(THEME_KEY, theme.as_str())?;
                self.following_system = false;
                self.current = theme;
                info!("Theme set to {}", theme);
            }
        }
        Ok(())
    }

    /// Advances the theme one step along Light -> Dark -> System -> Light.
    pub fn cycle(&mut self) -> Result<ThemeChoice> {
        let next = if self.following_system {
            ThemeChoice::Light
        } else {
            match self.current {
                Theme::Light => ThemeChoice::Dark,
                Theme::Dark => ThemeChoice::System,
            }
        };
        self.set(next)?;
        Ok(next)
    }

    /// Handles an OS preference-change notification.
    ///
    /// Applied only while no explicit choice is persisted; ignored
    /// otherwise.
    pub fn handle_system_change(&mut self, theme: Theme) {
        if self.following_system {
            debug!("System preference changed to {}", theme);
            self.current = theme;
        } else {
            debug!("Ignoring system preference change, explicit theme set");
        }
    }
}

fn resolve_system(system: &dyn SystemScheme) -> Theme {
    if system.prefers_dark() {
        Theme::Dark
    } else {
        Theme::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileStore;
    use tempfile::tempdir;

    struct FixedScheme(bool);

    impl SystemScheme for FixedScheme {
        fn prefers_dark(&self) -> bool {
            self.0
        }
    }

    fn state_with(prefers_dark: bool) -> (ThemeState, Arc<dyn StorageBackend>, tempfile::TempDir)
    {
        let dir = tempdir().unwrap();
        let backend: Arc<dyn StorageBackend> =
            Arc::new(FileStore::open(dir.path()).unwrap());
        let state = ThemeState::load(
            Arc::clone(&backend),
            Arc::new(FixedScheme(prefers_dark)),
        )
        .unwrap();
        (state, backend, dir)
    }

    #[test]
    fn initial_state_follows_system_when_nothing_stored() {
        let (state, _, _dir) = state_with(true);
        assert_eq!(state.current(), Theme::Dark);
        assert!(state.is_following_system());
    }

    #[test]
    fn explicit_choice_persists_and_stops_tracking() {
        let (mut state, backend, _dir) = state_with(false);
        state.set(ThemeChoice::Dark).unwrap();

        assert_eq!(state.current(), Theme::Dark);
        assert!(!state.is_following_system());
        assert_eq!(backend.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        state.handle_system_change(Theme::Light);
        assert_eq!(state.current(), Theme::Dark);
    }

    #[test]
    fn system_choice_clears_persisted_value_and_tracks_changes() {
        let (mut state, backend, _dir) = state_with(false);
        state.set(ThemeChoice::Dark).unwrap();
        state.set(ThemeChoice::System).unwrap();

        assert!(state.is_following_system());
        assert_eq!(state.current(), Theme::Light);
        assert!(backend.get(THEME_KEY).unwrap().is_none());

        state.handle_system_change(Theme::Dark);
        assert_eq!(state.current(), Theme::Dark);
        assert!(state.is_following_system());
    }

    #[test]
    fn persisted_choice_survives_reload() {
        let dir = tempdir().unwrap();
        let backend: Arc<dyn StorageBackend> =
            Arc::new(FileStore::open(dir.path()).unwrap());
        {
            let mut state =
                ThemeState::load(Arc::clone(&backend), Arc::new(FixedScheme(false))).unwrap();
            state.set(ThemeChoice::Dark).unwrap();
        }

        let state = ThemeState::load(backend, Arc::new(FixedScheme(false))).unwrap();
        assert_eq!(state.current(), Theme::Dark);
        assert!(!state.is_following_system());
    }

    #[test]
    fn cycle_walks_light_dark_system() {
        let (mut state, _, _dir) = state_with(false);
        state.set(ThemeChoice::Light).unwrap();

        assert_eq!(state.cycle().unwrap(), ThemeChoice::Dark);
        assert_eq!(state.cycle().unwrap(), ThemeChoice::System);
        assert!(state.is_following_system());
        assert_eq!(state.cycle().unwrap(), ThemeChoice::Light);
        assert!(!state.is_following_system());
    }

    #[test]
    fn unrecognized_stored_value_falls_back_to_system() {
        let dir = tempdir().unwrap();
        let backend: Arc<dyn StorageBackend> =
            Arc::new(FileStore::open(dir.path()).unwrap());
        backend.set(THEME_KEY, "solarized").unwrap();

        let state =
            ThemeState::load(Arc::clone(&backend), Arc::new(FixedScheme(true))).unwrap();
        assert!(state.is_following_system());
        assert_eq!(state.current(), Theme::Dark);
    }
}
