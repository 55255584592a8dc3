//! Screen geometry: grid overview cells, control hit-boxes, text wrapping.
//!
//! Everything is expressed in render space (the fixed-size framebuffer);
//! [`to_render_space`] converts window coordinates first.

use raylib::prelude::{Rectangle, Vector2};

use crate::config::UiConfig;
use crate::constants::*;
use crate::input::Target;

pub fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x < rect.x + rect.width
        && point.y >= rect.y
        && point.y < rect.y + rect.height
}

/// Maps a window position onto the framebuffer stretched across the window.
pub fn to_render_space(point: Vector2, screen_width: f32, screen_height: f32) -> Vector2 {
    if screen_width <= 0.0 || screen_height <= 0.0 {
        return point;
    }
    Vector2::new(
        point.x * RENDER_WIDTH as f32 / screen_width,
        point.y * RENDER_HEIGHT as f32 / screen_height,
    )
}

/// Thumbnail grid for the overview.
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<Rectangle>,
}

impl GridLayout {
    pub fn new(count: usize) -> Self {
        let (columns, rows) = grid_dimensions(count);
        if count == 0 {
            return Self { columns, rows, cells: Vec::new() };
        }

        let gap = 24.0;
        let area_width = RENDER_WIDTH as f32 - 2.0 * MARGIN;
        let area_height = RENDER_HEIGHT as f32 - 2.0 * MARGIN;
        let cell_width = (area_width - gap * (columns - 1) as f32) / columns as f32;
        let cell_height = (area_height - gap * (rows - 1) as f32) / rows as f32;

        let cells = (0..count)
            .map(|i| {
                let column = i % columns;
                let row = i / columns;
                Rectangle::new(
                    MARGIN + column as f32 * (cell_width + gap),
                    MARGIN + row as f32 * (cell_height + gap),
                    cell_width,
                    cell_height,
                )
            })
            .collect();

        Self { columns, rows, cells }
    }

    pub fn hit(&self, point: Vector2) -> Option<usize> {
        self.cells.iter().position(|cell| contains(cell, point))
    }
}

/// Columns and rows for `count` thumbnails, keeping roughly the render
/// aspect ratio: rows * (rows * ratio) ≈ count.
pub fn grid_dimensions(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let display_ratio = RENDER_WIDTH as f32 / RENDER_HEIGHT as f32;
    let rows = (count as f32 / display_ratio).sqrt().ceil().max(1.0) as usize;
    let columns = count.div_ceil(rows);
    (columns, rows)
}

/// Clickable controls along the bottom bar. Only affordances enabled in the
/// config get a hit-box.
pub fn control_bar(ui: &UiConfig) -> Vec<(Target, Rectangle)> {
    let size = BAR_HEIGHT - 16.0;
    let y = RENDER_HEIGHT as f32 - BAR_HEIGHT + 8.0;
    let right = RENDER_WIDTH as f32 - 16.0;
    let mut controls = Vec::new();

    if ui.controls {
        controls.push((Target::Prev, Rectangle::new(16.0, y, size, size)));
        controls.push((Target::Next, Rectangle::new(24.0 + size, y, size, size)));

        let mut toggles = vec![Target::ThemeToggle];
        if ui.grid {
            toggles.push(Target::GridToggle);
        }
        if ui.notes {
            toggles.push(Target::NotesToggle);
        }
        for (i, target) in toggles.into_iter().enumerate() {
            let x = right - (i + 1) as f32 * (size + 8.0) + 8.0;
            controls.push((target, Rectangle::new(x, y, size, size)));
        }
    }
    if ui.counter {
        let width = 180.0;
        controls.push((
            Target::Counter,
            Rectangle::new((RENDER_WIDTH as f32 - width) / 2.0, y, width, size),
        ));
    }
    controls
}

pub fn hit_control(controls: &[(Target, Rectangle)], point: Vector2) -> Option<Target> {
    controls
        .iter()
        .find(|(_, rect)| contains(rect, point))
        .map(|(target, _)| *target)
}

/// Greedy word wrap using an average glyph width for `font_size`.
/// Explicit newlines are kept; a word longer than the line stays whole.
pub fn wrap_text(text: &str, font_size: i32, max_width: f32) -> Vec<String> {
    let glyph = font_size as f32 * GLYPH_WIDTH_RATIO;
    let max_chars = ((max_width / glyph).floor() as usize).max(1);

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}
