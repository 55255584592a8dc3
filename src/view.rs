//! What one render pass shows, derived from deck and navigator.

use crate::config::UiConfig;
use crate::deck::{Block, Deck, Slide};
use crate::navigator::Navigator;

pub struct SlideView<'a> {
    pub index: usize,
    pub total: usize,
    pub slide: &'a Slide,
    pub blocks: Vec<&'a Block>,
    /// Width fraction of the progress bar; `None` when the bar is disabled.
    pub progress: Option<f32>,
    /// `"{n} / {N}"`; `None` when the counter is disabled.
    pub counter: Option<String>,
    /// Speaker notes; `None` when notes are disabled or hidden.
    pub notes: Option<&'a str>,
}

impl<'a> SlideView<'a> {
    /// Builds the view of the active slide. Only the current slide is ever
    /// shown; disabled affordances are left out.
    pub fn build(
        deck: &'a Deck,
        navigator: &'a Navigator,
        ui: &UiConfig,
        notes_visible: bool,
    ) -> Self {
        let position = navigator.position();
        let slide = &deck.slides[position.index];
        Self {
            index: position.index,
            total: position.total,
            slide,
            blocks: slide.visible_blocks(position.revealed).collect(),
            progress: ui.progress.then(|| progress(position.index, position.total)),
            counter: ui.counter.then(|| counter_text(position.index, position.total)),
            notes: (ui.notes && notes_visible).then_some(slide.notes.as_str()),
        }
    }
}

pub fn progress(index: usize, total: usize) -> f32 {
    (index + 1) as f32 / total as f32
}

pub fn counter_text(index: usize, total: usize) -> String {
    format!("{} / {}", index + 1, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn deck() -> Deck {
        Deck::parse(
            "# Intro\n\nhello {.fragment}\n\nNote: smile\n\n---\n\n\
             # Two\n\n---\n\n# Three\n\n---\n\n# Four\n",
            Path::new("."),
        )
        .unwrap()
    }

    #[test]
    fn progress_and_counter_follow_position() {
        let deck = deck();
        let mut nav = Navigator::new(&deck.fragment_counts()).unwrap();
        nav.show(1);
        let view = SlideView::build(&deck, &nav, &UiConfig::default(), false);
        assert_eq!(view.index, 1);
        assert_eq!(view.progress, Some(0.5));
        assert_eq!(view.counter.as_deref(), Some("2 / 4"));
        assert_eq!(view.slide.title, "Two");
    }

    #[test]
    fn hidden_fragments_are_not_in_view() {
        let deck = deck();
        let mut nav = Navigator::new(&deck.fragment_counts()).unwrap();
        let ui = UiConfig::default();

        let before = SlideView::build(&deck, &nav, &ui, false).blocks.len();
        nav.advance();
        let after = SlideView::build(&deck, &nav, &ui, false).blocks.len();
        assert_eq!((before, after), (1, 2));
    }

    #[test]
    fn disabled_collaborators_are_skipped() {
        let deck = deck();
        let nav = Navigator::new(&deck.fragment_counts()).unwrap();
        let ui = UiConfig {
            progress: false,
            counter: false,
            notes: false,
            ..UiConfig::default()
        };
        let view = SlideView::build(&deck, &nav, &ui, true);
        assert!(view.progress.is_none() && view.counter.is_none() && view.notes.is_none());
    }

    #[test]
    fn notes_show_only_when_toggled() {
        let deck = deck();
        let nav = Navigator::new(&deck.fragment_counts()).unwrap();
        let ui = UiConfig::default();
        assert_eq!(SlideView::build(&deck, &nav, &ui, false).notes, None);
        assert_eq!(SlideView::build(&deck, &nav, &ui, true).notes, Some("smile"));
    }
}
