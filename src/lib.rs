//! keynote: a Markdown slide deck presenter.
//!
//! The deck is a Markdown file split into slides by `---`. Blocks tagged
//! `{.fragment}` are revealed one step at a time before the deck moves on.
//! [`navigator::Navigator`] holds that state machine; [`presenter::Presenter`]
//! wires it to input decoding, the pacing timer, the theme preference and the
//! `deck.md#N` address; [`engine::run`] drives it from a raylib window.

pub mod config;
pub mod constants;
pub mod deck;
pub mod engine;
pub mod error;
pub mod input;
pub mod layout;
pub mod location;
pub mod navigator;
pub mod presenter;
pub mod render;
pub mod state;
pub mod texture_loader;
pub mod theme;
pub mod timer;
pub mod view;

pub use config::PresenterConfig;
pub use deck::Deck;
pub use error::{ConfigError, DeckError, NavError, PreferenceError};
pub use location::Location;
pub use navigator::{Navigator, Step};
pub use presenter::{Effect, Presenter};
