//! Presenter configuration.
//!
//! Optional TOML file selecting which affordances are active. Every section
//! and field has a default, so an empty file (or no file) gives the full
//! presenter.
//!
//! ```toml
//! [ui]
//! controls = false
//! notes = false
//!
//! [pacing]
//! talk_minutes = 20
//! ```

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::input::DEFAULT_SWIPE_THRESHOLD;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PresenterConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub input: InputConfig,
}

/// Optional on-screen affordances.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Elapsed-time widget
    pub timer: bool,
    /// Thumbnail overview (`G`)
    pub grid: bool,
    /// Speaker notes panel (`N`)
    pub notes: bool,
    /// "3 / 12" counter, clickable to jump
    pub counter: bool,
    /// Progress bar along the bottom edge
    pub progress: bool,
    /// Prev/next and toggle buttons
    pub controls: bool,
    /// Window title and log carry the `deck.md#N` address
    pub address: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timer: true,
            grid: true,
            notes: true,
            counter: true,
            progress: true,
            controls: true,
            address: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    /// Planned talk length; `0` disables the overtime warning.
    pub talk_minutes: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { talk_minutes: 30 }
    }
}

impl PacingConfig {
    pub fn talk_length(&self) -> Option<Duration> {
        (self.talk_minutes > 0).then(|| Duration::from_secs(self.talk_minutes * 60))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Minimum horizontal swipe distance in render pixels.
    pub swipe_threshold: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

impl PresenterConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        contents.parse()
    }

    /// Just the slides, progress bar and pacing timer.
    pub fn minimal() -> Self {
        Self {
            ui: UiConfig {
                grid: false,
                notes: false,
                counter: false,
                controls: false,
                ..UiConfig::default()
            },
            ..Self::default()
        }
    }
}

impl FromStr for PresenterConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_config_enables_everything() {
        let config: PresenterConfig = "".parse().unwrap();
        assert_eq!(config, PresenterConfig::default());
        assert!(config.ui.grid && config.ui.timer && config.ui.controls);
        assert_eq!(config.pacing.talk_length(), Some(Duration::from_secs(1800)));
        assert_eq!(config.input.swipe_threshold, 40.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: PresenterConfig = "[ui]\nnotes = false\n\n[pacing]\ntalk_minutes = 0\n"
            .parse()
            .unwrap();
        assert!(!config.ui.notes);
        assert!(config.ui.counter);
        assert_eq!(config.pacing.talk_length(), None);
    }

    #[test]
    fn rejects_wrong_types() {
        let err = "[ui]\ntimer = \"yes\"".parse::<PresenterConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn minimal_preset_drops_chrome() {
        let config = PresenterConfig::minimal();
        assert!(config.ui.timer && config.ui.progress);
        assert!(!config.ui.grid && !config.ui.controls && !config.ui.counter);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keynote.toml");
        std::fs::write(&path, "[input]\nswipe_threshold = 64.0\n").unwrap();
        let config = PresenterConfig::from_file(&path).unwrap();
        assert_eq!(config.input.swipe_threshold, 64.0);
    }
}
