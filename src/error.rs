use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a deck file.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read deck {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("deck contains no slides")]
    EmptyDeck,
}

/// Errors raised by navigator operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("a deck needs at least one slide")]
    EmptyDeck,

    /// Jump input was not an integer in `[1, N]`.
    #[error("invalid slide number {input:?} (expected 1..={total})")]
    InvalidTarget { input: String, total: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("no config directory available")]
    NoConfigDir,

    #[error("preference file i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}
