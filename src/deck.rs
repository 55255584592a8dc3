//! Markdown deck model.
//!
//! Slides are separated by thematic breaks (`---`). A block whose text ends
//! with `{.fragment}` is revealed incrementally, and a paragraph starting
//! with `Note:` holds speaker notes instead of visible content.

use std::fs;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use tracing::debug;

use crate::error::DeckError;

const FRAGMENT_MARKER: &str = "{.fragment}";
const NOTE_PREFIX: &str = "Note:";

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    Item { depth: usize, number: Option<u64> },
    Code,
    Image { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Rendered text; alt text for images.
    pub text: String,
    /// Position among the slide's fragments, `None` for always-visible blocks.
    pub fragment: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub title: String,
    pub blocks: Vec<Block>,
    pub notes: String,
    fragment_count: usize,
}

impl Slide {
    pub fn fragment_count(&self) -> usize {
        self.fragment_count
    }

    /// Blocks to draw given the reveal flags of this slide.
    pub fn visible_blocks<'a>(&'a self, revealed: &'a [bool]) -> impl Iterator<Item = &'a Block> {
        self.blocks.iter().filter(move |block| match block.fragment {
            None => true,
            Some(i) => revealed.get(i).copied().unwrap_or(false),
        })
    }

    fn is_blank(&self) -> bool {
        self.blocks.is_empty() && self.notes.is_empty()
    }

    fn push(&mut self, kind: BlockKind, text: String, fragment: bool) -> usize {
        let fragment = fragment.then(|| self.next_fragment());
        self.blocks.push(Block { kind, text, fragment });
        self.blocks.len() - 1
    }

    fn next_fragment(&mut self) -> usize {
        self.fragment_count += 1;
        self.fragment_count - 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let source = fs::read_to_string(path).map_err(|source| DeckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&source, base_dir)
    }

    /// Parses Markdown into slides; image paths resolve against `base_dir`.
    pub fn parse(source: &str, base_dir: &Path) -> Result<Self, DeckError> {
        let mut builder = DeckBuilder::new(base_dir);
        for event in Parser::new(source) {
            builder.event(event);
        }
        let slides = builder.finish();
        if slides.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        debug!(slides = slides.len(), "parsed deck");
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn fragment_counts(&self) -> Vec<usize> {
        self.slides.iter().map(Slide::fragment_count).collect()
    }

    pub fn image_paths(&self) -> impl Iterator<Item = &Path> {
        self.slides
            .iter()
            .flat_map(|slide| slide.blocks.iter())
            .filter_map(|block| match &block.kind {
                BlockKind::Image { path } => Some(path.as_path()),
                _ => None,
            })
    }
}

enum Pending {
    Heading(u8),
    Paragraph,
    Item { depth: usize, number: Option<u64> },
    Code,
}

struct DeckBuilder<'a> {
    base_dir: &'a Path,
    slides: Vec<Slide>,
    slide: Slide,
    pending: Option<Pending>,
    text: String,
    /// Next number for each open list; `None` for bullet lists.
    lists: Vec<Option<u64>>,
    image: Option<(PathBuf, String)>,
    /// Images met inside the pending block, placed after its text on flush.
    images: Vec<(PathBuf, String)>,
}

impl<'a> DeckBuilder<'a> {
    fn new(base_dir: &'a Path) -> Self {
        Self {
            base_dir,
            slides: Vec::new(),
            slide: Slide::default(),
            pending: None,
            text: String::new(),
            lists: Vec::new(),
            image: None,
            images: Vec::new(),
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.begin(Pending::Heading(heading_depth(level)))
            }
            Event::End(TagEnd::Heading(_)) => self.flush(),
            // Loose list items wrap their text in paragraphs.
            Event::Start(Tag::Paragraph) => match self.pending {
                None => self.begin(Pending::Paragraph),
                Some(Pending::Item { .. }) if !self.text.trim().is_empty() => self.text.push('\n'),
                Some(_) => {}
            },
            Event::End(TagEnd::Paragraph) => {
                if matches!(self.pending, Some(Pending::Paragraph)) {
                    self.flush();
                }
            }
            Event::Start(Tag::List(first)) => {
                self.flush();
                self.lists.push(first);
            }
            Event::End(TagEnd::List(_)) => {
                self.flush();
                self.lists.pop();
            }
            Event::Start(Tag::Item) => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let number = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        *next += 1;
                        Some(*next - 1)
                    }
                    _ => None,
                };
                self.begin(Pending::Item { depth, number });
            }
            Event::End(TagEnd::Item) => self.flush(),
            Event::Start(Tag::CodeBlock(_)) => self.begin(Pending::Code),
            Event::End(TagEnd::CodeBlock) => self.flush(),
            Event::Start(Tag::Image { dest_url, .. }) => {
                self.image = Some((self.resolve(&dest_url), String::new()));
            }
            Event::End(TagEnd::Image) => {
                if let Some((path, alt)) = self.image.take() {
                    match self.pending {
                        Some(_) => self.images.push((path, alt)),
                        None => {
                            self.slide.push(BlockKind::Image { path }, alt, false);
                        }
                    }
                }
            }
            Event::Text(text) | Event::Code(text) => self.append(&text),
            Event::SoftBreak => self.append(" "),
            Event::HardBreak => self.append("\n"),
            Event::Rule => {
                self.flush();
                self.end_slide();
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Slide> {
        self.flush();
        self.end_slide();
        self.slides
    }

    fn begin(&mut self, pending: Pending) {
        self.flush();
        self.pending = Some(pending);
    }

    fn append(&mut self, text: &str) {
        match &mut self.image {
            Some((_, alt)) => alt.push_str(text),
            None => self.text.push_str(text),
        }
    }

    fn flush(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let raw = std::mem::take(&mut self.text);
        let images = std::mem::take(&mut self.images);

        let (text, fragment) = strip_fragment_marker(raw.trim());
        let kind = match pending {
            Pending::Code => {
                let code = raw.trim_end_matches('\n').to_string();
                self.slide.push(BlockKind::Code, code, false);
                return;
            }
            Pending::Heading(level) => {
                if self.slide.title.is_empty() {
                    self.slide.title = text.clone();
                }
                BlockKind::Heading(level)
            }
            Pending::Paragraph => {
                if let Some(note) = text.strip_prefix(NOTE_PREFIX) {
                    if !self.slide.notes.is_empty() {
                        self.slide.notes.push('\n');
                    }
                    self.slide.notes.push_str(note.trim());
                    for (path, alt) in images {
                        self.slide.push(BlockKind::Image { path }, alt, false);
                    }
                    return;
                }
                BlockKind::Paragraph
            }
            Pending::Item { depth, number } => BlockKind::Item { depth, number },
        };

        // Images alone in a tagged block become one fragment each.
        if text.is_empty() {
            for (path, alt) in images {
                self.slide.push(BlockKind::Image { path }, alt, fragment);
            }
            return;
        }
        let index = self.slide.push(kind, text, fragment);
        let shared = self.slide.blocks[index].fragment;
        for (path, alt) in images {
            self.slide.blocks.push(Block {
                kind: BlockKind::Image { path },
                text: alt,
                fragment: shared,
            });
        }
    }

    fn end_slide(&mut self) {
        let slide = std::mem::take(&mut self.slide);
        if slide.is_blank() {
            return;
        }
        self.slides.push(slide);
        let number = self.slides.len();
        if let Some(slide) = self.slides.last_mut() {
            if slide.title.is_empty() {
                slide.title = format!("Slide {number}");
            }
        }
    }

    fn resolve(&self, dest: &str) -> PathBuf {
        let path = Path::new(dest);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn strip_fragment_marker(text: &str) -> (String, bool) {
    match text.strip_suffix(FRAGMENT_MARKER) {
        Some(rest) => (rest.trim_end().to_string(), true),
        None => (text.to_string(), false),
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Deck {
        Deck::parse(source, Path::new("/talks")).unwrap()
    }

    #[test]
    fn splits_slides_on_rules() {
        let deck = parse("# One\n\ntext\n\n---\n\n# Two\n\n---\n\n# Three\n");
        assert_eq!(deck.len(), 3);
        let titles: Vec<_> = deck.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["One", "Two", "Three"]);
    }

    #[test]
    fn blank_slides_are_dropped() {
        let deck = parse("---\n\n# Only\n\n---\n\n---\n");
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn empty_source_is_an_error() {
        assert!(matches!(
            Deck::parse("\n\n---\n", Path::new(".")),
            Err(DeckError::EmptyDeck)
        ));
    }

    #[test]
    fn untitled_slide_gets_numbered_title() {
        let deck = parse("# A\n\n---\n\njust text\n");
        assert_eq!(deck.slides[1].title, "Slide 2");
    }

    #[test]
    fn fragment_markers_number_blocks_in_order() {
        let deck = parse(
            "# Points\n\n- always\n- first {.fragment}\n- second {.fragment}\n\n\
             closing {.fragment}\n",
        );
        let slide = &deck.slides[0];
        assert_eq!(slide.fragment_count(), 3);

        let fragments: Vec<_> = slide
            .blocks
            .iter()
            .map(|b| (b.text.as_str(), b.fragment))
            .collect();
        assert_eq!(
            fragments,
            [
                ("Points", None),
                ("always", None),
                ("first", Some(0)),
                ("second", Some(1)),
                ("closing", Some(2)),
            ]
        );
        assert_eq!(deck.fragment_counts(), vec![3]);
    }

    #[test]
    fn visible_blocks_follow_reveal_flags() {
        let deck = parse("# T\n\na {.fragment}\n\nb {.fragment}\n");
        let slide = &deck.slides[0];
        let shown: Vec<_> = slide
            .visible_blocks(&[true, false])
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(shown, ["T", "a"]);
    }

    #[test]
    fn notes_are_collected_not_shown() {
        let deck = parse("# T\n\nNote: say hello\n\nNote: then wave\n\nbody\n");
        let slide = &deck.slides[0];
        assert_eq!(slide.notes, "say hello\nthen wave");
        assert_eq!(slide.blocks.len(), 2);
    }

    #[test]
    fn nested_and_ordered_lists() {
        let deck = parse("1. one\n2. two\n   - inner\n");
        let kinds: Vec<_> = deck.slides[0].blocks.iter().map(|b| b.kind.clone()).collect();
        assert_eq!(
            kinds,
            [
                BlockKind::Item { depth: 0, number: Some(1) },
                BlockKind::Item { depth: 0, number: Some(2) },
                BlockKind::Item { depth: 1, number: None },
            ]
        );
    }

    #[test]
    fn code_blocks_keep_their_lines() {
        let deck = parse("```rust\nfn main() {}\nlet x = 1;\n```\n");
        let block = &deck.slides[0].blocks[0];
        assert_eq!(block.kind, BlockKind::Code);
        assert_eq!(block.text, "fn main() {}\nlet x = 1;");
    }

    #[test]
    fn images_resolve_against_deck_dir_and_can_be_fragments() {
        let deck = parse("![diagram](img/arch.png) {.fragment}\n");
        let slide = &deck.slides[0];
        assert_eq!(slide.fragment_count(), 1);
        let block = &slide.blocks[0];
        assert_eq!(
            block.kind,
            BlockKind::Image { path: PathBuf::from("/talks/img/arch.png") }
        );
        assert_eq!(block.text, "diagram");
        assert_eq!(block.fragment, Some(0));
        assert_eq!(deck.image_paths().count(), 1);
    }

    #[test]
    fn image_in_tagged_item_is_the_fragment() {
        let deck = parse("# T\n\n- ![pic](a.png) {.fragment}\n");
        let slide = &deck.slides[0];
        assert_eq!(slide.fragment_count(), 1);
        assert_eq!(slide.blocks.len(), 2);
        let image = &slide.blocks[1];
        assert_eq!(image.kind, BlockKind::Image { path: PathBuf::from("/talks/a.png") });
        assert_eq!(image.fragment, Some(0));
        // Nothing is revealed before the image itself.
        let shown: Vec<_> = slide.visible_blocks(&[false]).map(|b| b.text.as_str()).collect();
        assert_eq!(shown, ["T"]);
    }

    #[test]
    fn image_shares_fragment_with_its_paragraph_text() {
        let deck = parse("See ![pic](a.png) {.fragment}\n\nafter\n");
        let slide = &deck.slides[0];
        assert_eq!(slide.fragment_count(), 1);
        let blocks: Vec<_> = slide
            .blocks
            .iter()
            .map(|b| (b.text.as_str(), b.fragment))
            .collect();
        assert_eq!(blocks, [("See", Some(0)), ("pic", Some(0)), ("after", None)]);
        assert_eq!(slide.blocks[0].kind, BlockKind::Paragraph);
        assert!(matches!(slide.blocks[1].kind, BlockKind::Image { .. }));
    }

    #[test]
    fn loose_item_paragraphs_stay_apart() {
        let deck = parse("- first para\n\n  second para\n- next\n");
        let texts: Vec<_> = deck.slides[0].blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, ["first para\nsecond para", "next"]);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Deck::load(Path::new("/definitely/not/here.md")).unwrap_err();
        assert!(matches!(err, DeckError::Read { .. }));
    }
}
