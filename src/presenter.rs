//! Presenter session: the navigator plus every leaf utility around it.
//!
//! All state changes go through [`Presenter::handle`] / [`Presenter::apply`],
//! one action at a time, and the address is rewritten after each one. Window
//! effects (fullscreen, quitting) are returned to the caller instead of being
//! performed here, so a session can be driven without a window.

use std::time::Instant;

use raylib::prelude::{Rectangle, Vector2};
use tracing::{debug, info, warn};

use crate::config::PresenterConfig;
use crate::deck::Deck;
use crate::error::NavError;
use crate::input::{Action, InputEvent, Target, handle_input};
use crate::layout::{GridLayout, control_bar, hit_control};
use crate::location::Location;
use crate::navigator::{Navigator, Step};
use crate::state::PresenterState;
use crate::theme::{PreferenceStore, Theme};
use crate::timer::PacingTimer;
use crate::view::SlideView;

/// Longest input the jump prompt accepts.
const PROMPT_MAX_LEN: usize = 8;

/// Things only the window can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ToggleFullscreen,
    Quit,
}

pub struct Presenter {
    deck: Deck,
    navigator: Navigator,
    config: PresenterConfig,
    location: Location,
    state: PresenterState,
    notes_visible: bool,
    theme: Theme,
    preferences: PreferenceStore,
    timer: PacingTimer,
    grid: GridLayout,
    controls: Vec<(Target, Rectangle)>,
}

impl Presenter {
    /// Starts a session. Fragments all start hidden; the slide comes from the
    /// location's fragment when it names one, else the first slide.
    pub fn new(
        deck: Deck,
        mut location: Location,
        config: PresenterConfig,
        preferences: PreferenceStore,
    ) -> Result<Self, NavError> {
        let seed = location.seed(deck.len());
        if seed.is_none() && location.fragment().is_some() {
            debug!(address = %location, "ignoring unusable slide number");
        }
        let navigator = Navigator::with_start(&deck.fragment_counts(), seed)?;
        location.set_slide(navigator.current());

        let theme = preferences.load_theme();
        info!(
            slides = deck.len(),
            start = navigator.current() + 1,
            theme = theme.name(),
            "presentation ready"
        );

        Ok(Self {
            grid: GridLayout::new(deck.len()),
            controls: control_bar(&config.ui),
            timer: PacingTimer::new(config.pacing.talk_length()),
            deck,
            navigator,
            config,
            location,
            state: PresenterState::default(),
            notes_visible: false,
            theme,
            preferences,
        })
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn state(&self) -> &PresenterState {
        &self.state
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn timer(&self) -> &PacingTimer {
        &self.timer
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    pub fn controls(&self) -> &[(Target, Rectangle)] {
        &self.controls
    }

    /// Window title carrying the address, or the bare app name when the
    /// address is disabled.
    pub fn title(&self) -> String {
        if self.config.ui.address {
            format!("keynote - {}", self.location)
        } else {
            "keynote".to_string()
        }
    }

    pub fn view(&self) -> SlideView<'_> {
        SlideView::build(&self.deck, &self.navigator, &self.config.ui, self.notes_visible)
    }

    /// Click target under a render-space point: a thumbnail while the grid
    /// is open, otherwise a control.
    pub fn target_at(&self, point: Vector2) -> Option<Target> {
        match self.state {
            PresenterState::Grid => self.grid.hit(point).map(Target::Thumbnail),
            PresenterState::Prompt { .. } => None,
            PresenterState::Slides => hit_control(&self.controls, point),
        }
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Option<Effect> {
        let action = handle_input(event, &self.state, self.config.input.swipe_threshold)?;
        self.apply(action, now)
    }

    pub fn apply(&mut self, action: Action, now: Instant) -> Option<Effect> {
        debug!(?action, "input");
        match action {
            Action::Advance => {
                if self.config.ui.timer {
                    self.timer.start(now);
                }
                let step = self.navigator.advance();
                self.settle(step);
            }
            Action::Retreat => {
                let step = self.navigator.retreat();
                self.settle(step);
            }
            Action::Show(index) => {
                let step = self.navigator.show(index);
                if self.state.is_grid() {
                    self.state = PresenterState::Slides;
                }
                self.settle(step);
            }
            Action::OpenPrompt => {
                self.state = PresenterState::Prompt { buffer: String::new() };
            }
            Action::PromptInput(c) => {
                if let PresenterState::Prompt { buffer } = &mut self.state {
                    if buffer.chars().count() < PROMPT_MAX_LEN {
                        buffer.push(c);
                    }
                }
            }
            Action::PromptBackspace => {
                if let PresenterState::Prompt { buffer } = &mut self.state {
                    buffer.pop();
                }
            }
            Action::SubmitPrompt => {
                if let PresenterState::Prompt { buffer } = std::mem::take(&mut self.state) {
                    match self.navigator.jump_to(&buffer) {
                        Ok(step) => self.settle(step),
                        Err(e) => debug!(error = %e, "jump ignored"),
                    }
                }
            }
            Action::CancelPrompt => self.state = PresenterState::Slides,
            Action::ToggleFullscreen => return Some(Effect::ToggleFullscreen),
            Action::ToggleTheme => self.toggle_theme(),
            Action::ToggleGrid => {
                if self.config.ui.grid {
                    self.state = match self.state {
                        PresenterState::Grid => PresenterState::Slides,
                        _ => PresenterState::Grid,
                    };
                }
            }
            Action::ToggleNotes => {
                if self.config.ui.notes {
                    self.notes_visible = !self.notes_visible;
                }
            }
            Action::Quit => return Some(Effect::Quit),
        }
        None
    }

    /// Refreshes the timer display; never touches navigation.
    pub fn tick(&mut self, now: Instant) {
        self.timer.tick(now);
    }

    fn settle(&mut self, step: Step) {
        if let Step::Moved { .. } = step {
            self.location.set_slide(self.navigator.current());
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        debug!(theme = self.theme.name(), "theme toggled");
        if let Err(e) = self.preferences.save_theme(self.theme) {
            warn!(error = %e, "could not save theme preference");
        }
    }
}
