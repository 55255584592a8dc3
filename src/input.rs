//! Raw input decoding.
//!
//! [`handle_input`] maps one input event to at most one [`Action`]. It knows
//! nothing about rendering or navigator state beyond the presenter mode, so
//! the whole key map can be tested without a window.

use crate::state::PresenterState;

/// Keys the presenter reacts to. Letters are matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Right,
    Left,
    PageDown,
    PageUp,
    Space,
    Backspace,
    Enter,
    Escape,
    Char(char),
}

/// On-screen click targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Prev,
    Next,
    Counter,
    ThemeToggle,
    GridToggle,
    NotesToggle,
    Thumbnail(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// A printable character typed (used by the jump prompt).
    Typed(char),
    Click(Target),
    /// Press-to-release displacement of a drag or touch.
    Swipe { dx: f32, dy: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Advance,
    Retreat,
    Show(usize),
    OpenPrompt,
    PromptInput(char),
    PromptBackspace,
    SubmitPrompt,
    CancelPrompt,
    ToggleFullscreen,
    ToggleTheme,
    ToggleGrid,
    ToggleNotes,
    Quit,
}

/// Horizontal distance (render pixels) a swipe must exceed.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 40.0;

pub fn handle_input(
    event: InputEvent,
    mode: &PresenterState,
    swipe_threshold: f32,
) -> Option<Action> {
    if mode.is_prompt() {
        return prompt_input(event);
    }
    match event {
        InputEvent::Key(key) => key_action(key, mode),
        InputEvent::Typed(_) => None,
        InputEvent::Click(target) => Some(click_action(target)),
        InputEvent::Swipe { dx, dy } => swipe_action(dx, dy, swipe_threshold),
    }
}

fn key_action(key: Key, mode: &PresenterState) -> Option<Action> {
    match key {
        Key::Right | Key::PageDown | Key::Space => Some(Action::Advance),
        Key::Left | Key::PageUp | Key::Backspace => Some(Action::Retreat),
        Key::Escape if mode.is_grid() => Some(Action::ToggleGrid),
        Key::Escape | Key::Enter => None,
        Key::Char(c) => match c.to_ascii_lowercase() {
            'j' => Some(Action::OpenPrompt),
            'f' => Some(Action::ToggleFullscreen),
            't' => Some(Action::ToggleTheme),
            'g' => Some(Action::ToggleGrid),
            'n' => Some(Action::ToggleNotes),
            'q' => Some(Action::Quit),
            _ => None,
        },
    }
}

fn click_action(target: Target) -> Action {
    match target {
        Target::Prev => Action::Retreat,
        Target::Next => Action::Advance,
        Target::Counter => Action::OpenPrompt,
        Target::ThemeToggle => Action::ToggleTheme,
        Target::GridToggle => Action::ToggleGrid,
        Target::NotesToggle => Action::ToggleNotes,
        Target::Thumbnail(index) => Action::Show(index),
    }
}

fn swipe_action(dx: f32, dy: f32, threshold: f32) -> Option<Action> {
    if dx.abs() > threshold && dx.abs() > dy.abs() {
        Some(if dx < 0.0 { Action::Advance } else { Action::Retreat })
    } else {
        None
    }
}

// The prompt swallows everything; navigation keys do not leak through.
fn prompt_input(event: InputEvent) -> Option<Action> {
    match event {
        InputEvent::Key(Key::Enter) => Some(Action::SubmitPrompt),
        InputEvent::Key(Key::Escape) => Some(Action::CancelPrompt),
        InputEvent::Key(Key::Backspace) => Some(Action::PromptBackspace),
        InputEvent::Typed(c) if !c.is_control() => Some(Action::PromptInput(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(event: InputEvent) -> Option<Action> {
        handle_input(event, &PresenterState::Slides, DEFAULT_SWIPE_THRESHOLD)
    }

    fn prompt(event: InputEvent) -> Option<Action> {
        let mode = PresenterState::Prompt { buffer: String::new() };
        handle_input(event, &mode, DEFAULT_SWIPE_THRESHOLD)
    }

    #[test]
    fn navigation_keys() {
        for key in [Key::Right, Key::PageDown, Key::Space] {
            assert_eq!(slides(InputEvent::Key(key)), Some(Action::Advance));
        }
        for key in [Key::Left, Key::PageUp, Key::Backspace] {
            assert_eq!(slides(InputEvent::Key(key)), Some(Action::Retreat));
        }
    }

    #[test]
    fn letter_shortcuts_ignore_case() {
        assert_eq!(slides(InputEvent::Key(Key::Char('F'))), Some(Action::ToggleFullscreen));
        assert_eq!(slides(InputEvent::Key(Key::Char('t'))), Some(Action::ToggleTheme));
        assert_eq!(slides(InputEvent::Key(Key::Char('G'))), Some(Action::ToggleGrid));
        assert_eq!(slides(InputEvent::Key(Key::Char('n'))), Some(Action::ToggleNotes));
        assert_eq!(slides(InputEvent::Key(Key::Char('j'))), Some(Action::OpenPrompt));
        assert_eq!(slides(InputEvent::Key(Key::Char('x'))), None);
    }

    #[test]
    fn escape_only_closes_grid() {
        assert_eq!(slides(InputEvent::Key(Key::Escape)), None);
        assert_eq!(
            handle_input(
                InputEvent::Key(Key::Escape),
                &PresenterState::Grid,
                DEFAULT_SWIPE_THRESHOLD,
            ),
            Some(Action::ToggleGrid)
        );
    }

    #[test]
    fn grid_keeps_navigation_keys() {
        assert_eq!(
            handle_input(
                InputEvent::Key(Key::Right),
                &PresenterState::Grid,
                DEFAULT_SWIPE_THRESHOLD,
            ),
            Some(Action::Advance)
        );
    }

    #[test]
    fn clicks_map_to_actions() {
        assert_eq!(slides(InputEvent::Click(Target::Prev)), Some(Action::Retreat));
        assert_eq!(slides(InputEvent::Click(Target::Next)), Some(Action::Advance));
        assert_eq!(slides(InputEvent::Click(Target::Counter)), Some(Action::OpenPrompt));
        assert_eq!(slides(InputEvent::Click(Target::Thumbnail(4))), Some(Action::Show(4)));
    }

    #[test]
    fn swipe_needs_distance_and_horizontal_dominance() {
        assert_eq!(slides(InputEvent::Swipe { dx: -41.0, dy: 5.0 }), Some(Action::Advance));
        assert_eq!(slides(InputEvent::Swipe { dx: 80.0, dy: -10.0 }), Some(Action::Retreat));
        assert_eq!(slides(InputEvent::Swipe { dx: -40.0, dy: 0.0 }), None);
        assert_eq!(slides(InputEvent::Swipe { dx: 60.0, dy: 90.0 }), None);
    }

    #[test]
    fn prompt_captures_keys() {
        assert_eq!(prompt(InputEvent::Typed('3')), Some(Action::PromptInput('3')));
        assert_eq!(prompt(InputEvent::Key(Key::Backspace)), Some(Action::PromptBackspace));
        assert_eq!(prompt(InputEvent::Key(Key::Enter)), Some(Action::SubmitPrompt));
        assert_eq!(prompt(InputEvent::Key(Key::Escape)), Some(Action::CancelPrompt));
        assert_eq!(prompt(InputEvent::Key(Key::Right)), None);
        assert_eq!(prompt(InputEvent::Key(Key::Char('q'))), None);
        assert_eq!(prompt(InputEvent::Swipe { dx: -100.0, dy: 0.0 }), None);
    }

    #[test]
    fn typed_characters_are_ignored_outside_prompt() {
        assert_eq!(slides(InputEvent::Typed('5')), None);
    }
}
