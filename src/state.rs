/// What the presenter shows on top of (or instead of) the current slide.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PresenterState {
    #[default]
    Slides,                    // Current slide only
    Grid,                      // Thumbnail overview of the whole deck
    Prompt { buffer: String }, // Jump-to-slide prompt capturing input
}

impl PresenterState {
    pub fn is_grid(&self) -> bool {
        matches!(self, Self::Grid)
    }

    pub fn is_prompt(&self) -> bool {
        matches!(self, Self::Prompt { .. })
    }
}
