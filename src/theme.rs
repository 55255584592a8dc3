//! Light/dark theme and its persisted preference.
//!
//! The preference lives in `preferences.toml` under the config directory:
//! 1. an explicit directory passed to [`PreferenceStore::at`]
//! 2. the `KEYNOTE_CONFIG_DIR` environment variable, when set and non-empty
//! 3. the platform config directory joined with `keynote`

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PreferenceError;

pub const CONFIG_DIR_ENV: &str = "KEYNOTE_CONFIG_DIR";
const APP_DIR: &str = "keynote";
const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    theme: Option<Theme>,
}

/// Reads and writes the single theme preference.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
}

impl PreferenceStore {
    /// Store at the default location.
    pub fn new() -> Self {
        Self {
            path: config_dir().map(|dir| dir.join(PREFERENCES_FILE)),
        }
    }

    /// Store inside an explicit directory.
    pub fn at(dir: &Path) -> Self {
        Self {
            path: Some(dir.join(PREFERENCES_FILE)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Saved theme, or the default when nothing usable is stored.
    pub fn load_theme(&self) -> Theme {
        let Some(path) = &self.path else {
            return Theme::default();
        };
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no saved preferences");
                return Theme::default();
            }
        };
        match toml::from_str::<Preferences>(&contents) {
            Ok(preferences) => preferences.theme.unwrap_or_default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable preferences");
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), PreferenceError> {
        let path = self.path.as_ref().ok_or(PreferenceError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(&Preferences { theme: Some(theme) })?;
        fs::write(path, contents)?;
        debug!(path = %path.display(), theme = theme.name(), "saved theme");
        Ok(())
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

fn config_dir() -> Option<PathBuf> {
    config_dir_from(std::env::var_os(CONFIG_DIR_ENV))
}

/// Resolves the config directory from the override variable's value.
fn config_dir_from(env: Option<OsString>) -> Option<PathBuf> {
    match env {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|dir| dir.join(APP_DIR)),
    }
}
