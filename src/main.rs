use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use keynote::engine;
use keynote::theme::PreferenceStore;
use keynote::{Deck, Location, Presenter, PresenterConfig};

/// Present a Markdown slide deck
#[derive(Parser, Debug)]
#[command(name = "keynote")]
#[command(version)]
struct Args {
    /// Deck file, optionally with a 1-based slide number: talk.md#3
    deck: String,

    /// Presenter configuration (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only slides, progress bar and timer (ignored with --config)
    #[arg(long)]
    minimal: bool,

    /// Start in fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over --verbose
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();

    let location = Location::parse(&args.deck);
    let deck = Deck::load(location.path())
        .with_context(|| format!("Failed to load deck {}", location.path().display()))?;

    let config = match &args.config {
        Some(path) => PresenterConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None if args.minimal => PresenterConfig::minimal(),
        None => PresenterConfig::default(),
    };

    let presenter = Presenter::new(deck, location, config, PreferenceStore::new())?;
    engine::run(presenter, args.fullscreen)
}
