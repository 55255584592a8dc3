//! Slide/fragment navigation state machine.
//!
//! A [`Navigator`] owns the current slide index and the reveal flags of every
//! fragment in the deck. `advance` reveals the next hidden fragment of the
//! current slide before moving on, `retreat` hides the last revealed one
//! before moving back, and both clamp at the ends of the deck. Jumps bypass
//! the fragment rules and leave the destination's reveal state as it was.

use crate::error::NavError;
use tracing::debug;

/// Outcome of a navigation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Fragment `fragment` of the current slide became visible.
    Revealed { fragment: usize },
    /// Fragment `fragment` of the current slide was hidden again.
    Hidden { fragment: usize },
    /// The current slide changed.
    Moved { from: usize, to: usize },
    /// Clamped at an end of the deck, nothing changed.
    Stayed,
}

/// Read-only view of where the navigator stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position<'a> {
    pub index: usize,
    pub total: usize,
    /// Reveal flags of the current slide's fragments, in display order.
    pub revealed: &'a [bool],
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: usize,
    fragments: Vec<Vec<bool>>,
}

impl Navigator {
    /// Builds a navigator over slides with the given fragment counts.
    /// Every fragment starts hidden and the deck starts at slide 0.
    pub fn new(fragment_counts: &[usize]) -> Result<Self, NavError> {
        if fragment_counts.is_empty() {
            return Err(NavError::EmptyDeck);
        }
        Ok(Self {
            current: 0,
            fragments: fragment_counts.iter().map(|&n| vec![false; n]).collect(),
        })
    }

    /// Like [`Navigator::new`], but starts at `seed` when it is a valid
    /// 0-based index. Fragments are hidden either way.
    pub fn with_start(fragment_counts: &[usize], seed: Option<usize>) -> Result<Self, NavError> {
        let mut navigator = Self::new(fragment_counts)?;
        if let Some(index) = seed.filter(|&i| i < navigator.len()) {
            navigator.current = index;
        }
        Ok(navigator)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn position(&self) -> Position<'_> {
        Position {
            index: self.current,
            total: self.len(),
            revealed: &self.fragments[self.current],
        }
    }

    /// Reveal flags of any slide, current or not.
    pub fn revealed(&self, slide: usize) -> Option<&[bool]> {
        self.fragments.get(slide).map(Vec::as_slice)
    }

    /// Bounds `n` to `[0, N-1]`.
    pub fn clamp_index(&self, n: isize) -> usize {
        n.clamp(0, self.len() as isize - 1) as usize
    }

    pub fn advance(&mut self) -> Step {
        let current = self.current;
        if let Some(fragment) = self.fragments[current].iter().position(|revealed| !revealed) {
            self.fragments[current][fragment] = true;
            debug!(slide = current, fragment, "revealed fragment");
            return Step::Revealed { fragment };
        }
        self.move_to(self.clamp_index(current as isize + 1))
    }

    pub fn retreat(&mut self) -> Step {
        let current = self.current;
        if let Some(fragment) = self.fragments[current].iter().rposition(|revealed| *revealed) {
            self.fragments[current][fragment] = false;
            debug!(slide = current, fragment, "hid fragment");
            return Step::Hidden { fragment };
        }
        self.move_to(self.clamp_index(current as isize - 1))
    }

    /// Jumps to a 1-based slide number typed by the user.
    ///
    /// Anything that is not an integer in `[1, N]` is rejected and leaves
    /// the navigator untouched. Fragment state at the destination is kept.
    pub fn jump_to(&mut self, input: &str) -> Result<Step, NavError> {
        let total = self.len();
        let invalid = || NavError::InvalidTarget {
            input: input.to_string(),
            total,
        };
        let number: usize = input.trim().parse().map_err(|_| invalid())?;
        if !(1..=total).contains(&number) {
            return Err(invalid());
        }
        Ok(self.move_to(number - 1))
    }

    /// Direct 0-based positioning (grid overview); clamps like every other
    /// positioning operation.
    pub fn show(&mut self, index: usize) -> Step {
        let target = index.min(self.len() - 1);
        self.move_to(target)
    }

    fn move_to(&mut self, target: usize) -> Step {
        if target == self.current {
            return Step::Stayed;
        }
        let from = self.current;
        self.current = target;
        debug!(from, to = target, "moved slide");
        Step::Moved { from, to: target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(n: usize) -> Navigator {
        Navigator::new(&vec![0; n]).unwrap()
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert_eq!(Navigator::new(&[]).unwrap_err(), NavError::EmptyDeck);
    }

    #[test]
    fn clamp_bounds_to_deck() {
        let nav = plain(4);
        assert_eq!(nav.clamp_index(-3), 0);
        assert_eq!(nav.clamp_index(2), 2);
        assert_eq!(nav.clamp_index(9), 3);
    }

    #[test]
    fn index_stays_in_range_for_any_sequence() {
        for n in 1..6 {
            let mut nav = Navigator::new(&(0..n).map(|i| i % 3).collect::<Vec<_>>()).unwrap();
            // Deterministic but irregular pattern of moves.
            for step in 0..200usize {
                if (step * 7 + step / 5) % 3 == 0 {
                    nav.retreat();
                } else {
                    nav.advance();
                }
                assert!(nav.current() < n);
            }
        }
    }

    #[test]
    fn advance_then_retreat_without_fragments_is_a_no_op() {
        let mut nav = plain(3);
        nav.show(1);
        nav.advance();
        nav.retreat();
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn fragments_reveal_in_order_before_moving() {
        let mut nav = Navigator::new(&[2, 0]).unwrap();

        assert_eq!(nav.advance(), Step::Revealed { fragment: 0 });
        assert_eq!(nav.position().revealed, &[true, false]);
        assert_eq!(nav.current(), 0);

        assert_eq!(nav.advance(), Step::Revealed { fragment: 1 });
        assert_eq!(nav.current(), 0);

        assert_eq!(nav.advance(), Step::Moved { from: 0, to: 1 });
        // Left behind fully revealed.
        assert_eq!(nav.revealed(0), Some(&[true, true][..]));
    }

    #[test]
    fn retreat_hides_last_revealed_first() {
        let mut nav = Navigator::new(&[0, 2]).unwrap();
        nav.show(1);
        nav.advance();
        nav.advance();

        assert_eq!(nav.retreat(), Step::Hidden { fragment: 1 });
        assert_eq!(nav.retreat(), Step::Hidden { fragment: 0 });
        assert_eq!(nav.retreat(), Step::Moved { from: 1, to: 0 });
    }

    #[test]
    fn retreat_at_first_slide_stays() {
        let mut nav = plain(3);
        assert_eq!(nav.retreat(), Step::Stayed);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn advance_at_last_slide_fully_revealed_stays() {
        let mut nav = Navigator::new(&[0, 1]).unwrap();
        nav.show(1);
        nav.advance();
        assert_eq!(nav.advance(), Step::Stayed);
        assert_eq!(nav.advance(), Step::Stayed);
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn jump_accepts_one_based_numbers() {
        let mut nav = plain(5);
        assert_eq!(nav.jump_to("4"), Ok(Step::Moved { from: 0, to: 3 }));
        assert_eq!(nav.jump_to(" 1 "), Ok(Step::Moved { from: 3, to: 0 }));
        assert_eq!(nav.jump_to("1"), Ok(Step::Stayed));
    }

    #[test]
    fn jump_rejects_bad_input_and_keeps_state() {
        let mut nav = plain(3);
        nav.show(1);
        for input in ["0", "4", "abc", "", "-1", "2.5", "2abc"] {
            assert!(matches!(
                nav.jump_to(input),
                Err(NavError::InvalidTarget { total: 3, .. })
            ));
            assert_eq!(nav.current(), 1);
        }
    }

    #[test]
    fn jump_keeps_destination_fragment_state() {
        let mut nav = Navigator::new(&[2, 0]).unwrap();
        nav.advance();
        nav.jump_to("2").unwrap();
        nav.jump_to("1").unwrap();
        assert_eq!(nav.position().revealed, &[true, false]);
    }

    #[test]
    fn seed_is_used_only_when_valid() {
        let nav = Navigator::with_start(&[1, 1, 1], Some(2)).unwrap();
        assert_eq!(nav.current(), 2);
        assert_eq!(nav.position().revealed, &[false]);

        let nav = Navigator::with_start(&[1, 1, 1], Some(3)).unwrap();
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn show_clamps_past_the_end() {
        let mut nav = plain(3);
        assert_eq!(nav.show(10), Step::Moved { from: 0, to: 2 });
    }

    #[test]
    fn three_slide_walkthrough() {
        let mut nav = Navigator::new(&[1, 0, 0]).unwrap();
        assert_eq!((nav.current(), nav.position().revealed), (0, &[false][..]));

        nav.advance();
        assert_eq!((nav.current(), nav.position().revealed), (0, &[true][..]));
        nav.advance();
        assert_eq!(nav.current(), 1);
        nav.advance();
        assert_eq!(nav.current(), 2);
        nav.advance();
        assert_eq!(nav.current(), 2);
    }
}
