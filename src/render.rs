use std::collections::HashMap;
use std::path::PathBuf;

use raylib::prelude::*;

use crate::constants::*;
use crate::deck::{Block, BlockKind};
use crate::input::Target;
use crate::layout::wrap_text;
use crate::presenter::Presenter;
use crate::state::PresenterState;
use crate::theme::Theme;
use crate::timer::TimerDisplay;
use crate::view::SlideView;

struct Palette {
    background: Color,
    text: Color,
    muted: Color,
    panel: Color,
    accent: Color,
    warning: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::new(18, 18, 22, 255),
                text: Color::new(236, 236, 240, 255),
                muted: Color::new(140, 140, 150, 255),
                panel: Color::new(36, 36, 44, 255),
                accent: Color::new(94, 160, 255, 255),
                warning: Color::new(255, 110, 90, 255),
            },
            Theme::Light => Self {
                background: Color::new(250, 250, 247, 255),
                text: Color::new(24, 24, 28, 255),
                muted: Color::new(110, 110, 118, 255),
                panel: Color::new(232, 232, 228, 255),
                accent: Color::new(30, 100, 210, 255),
                warning: Color::new(200, 50, 30, 255),
            },
        }
    }
}

/// Draws one full frame of the presenter into render space.
pub fn draw_frame(
    d: &mut impl RaylibDraw,
    presenter: &Presenter,
    textures: &HashMap<PathBuf, Texture2D>,
) {
    let palette = Palette::for_theme(presenter.theme());
    d.clear_background(palette.background);

    match presenter.state() {
        PresenterState::Grid => draw_grid(d, presenter, &palette),
        _ => {
            let view = presenter.view();
            draw_slide(d, &view, textures, &palette);
            draw_chrome(d, presenter, &view, &palette);
        }
    }

    if let PresenterState::Prompt { buffer } = presenter.state() {
        draw_prompt(d, buffer, &palette);
    }
}

fn draw_slide(
    d: &mut impl RaylibDraw,
    view: &SlideView<'_>,
    textures: &HashMap<PathBuf, Texture2D>,
    palette: &Palette,
) {
    let width = RENDER_WIDTH as f32 - 2.0 * MARGIN;
    let bottom = RENDER_HEIGHT as f32 - BAR_HEIGHT - MARGIN / 2.0;
    let mut y = MARGIN;

    for block in &view.blocks {
        if y >= bottom {
            break;
        }
        y = draw_block(d, block, y, width, bottom, textures, palette);
    }
}

// Returns the y coordinate below the drawn block.
fn draw_block(
    d: &mut impl RaylibDraw,
    block: &Block,
    y: f32,
    width: f32,
    bottom: f32,
    textures: &HashMap<PathBuf, Texture2D>,
    palette: &Palette,
) -> f32 {
    match &block.kind {
        BlockKind::Heading(level) => {
            let size = match level {
                1 => 72,
                2 => 56,
                3 => 44,
                _ => 38,
            };
            let y = draw_lines(d, &block.text, MARGIN, y, size, width, palette.text);
            y + size as f32 * 0.4
        }
        BlockKind::Paragraph => {
            let y = draw_lines(d, &block.text, MARGIN, y, 36, width, palette.text);
            y + 16.0
        }
        BlockKind::Item { depth, number } => {
            let indent = MARGIN + 48.0 * (*depth as f32 + 1.0);
            let marker = match number {
                Some(n) => format!("{n}."),
                None => "-".to_string(),
            };
            d.draw_text(&marker, (indent - 40.0) as i32, y as i32, 36, palette.accent);
            let item_width = width - (indent - MARGIN);
            let y = draw_lines(d, &block.text, indent, y, 36, item_width, palette.text);
            y + 8.0
        }
        BlockKind::Code => {
            let size = 30;
            let line_height = size as f32 * 1.3;
            let lines: Vec<&str> = block.text.lines().collect();
            let height = lines.len() as f32 * line_height + 32.0;
            d.draw_rectangle(MARGIN as i32, y as i32, width as i32, height as i32, palette.panel);
            for (i, line) in lines.iter().enumerate() {
                let line_y = y + 16.0 + i as f32 * line_height;
                d.draw_text(line, (MARGIN + 24.0) as i32, line_y as i32, size, palette.text);
            }
            y + height + 16.0
        }
        BlockKind::Image { path } => match textures.get(path) {
            Some(texture) => {
                let tex_width = texture.width() as f32;
                let tex_height = texture.height() as f32;
                let scale = (width / tex_width).min((bottom - y) / tex_height).min(1.0);
                let scaled_width = tex_width * scale;
                let scaled_height = tex_height * scale;
                let x = MARGIN + (width - scaled_width) / 2.0;
                d.draw_texture_pro(
                    texture,
                    Rectangle::new(0.0, 0.0, tex_width, tex_height),
                    Rectangle::new(x, y, scaled_width, scaled_height),
                    Vector2::new(0.0, 0.0),
                    0.0,
                    Color::WHITE,
                );
                y + scaled_height + 16.0
            }
            None => {
                let alt = format!("[image: {}]", block.text);
                draw_lines(d, &alt, MARGIN, y, 30, width, palette.muted) + 16.0
            }
        },
    }
}

fn draw_lines(
    d: &mut impl RaylibDraw,
    text: &str,
    x: f32,
    y: f32,
    size: i32,
    width: f32,
    color: Color,
) -> f32 {
    let line_height = size as f32 * 1.25;
    let mut y = y;
    for line in wrap_text(text, size, width) {
        d.draw_text(&line, x as i32, y as i32, size, color);
        y += line_height;
    }
    y
}

fn draw_chrome(
    d: &mut impl RaylibDraw,
    presenter: &Presenter,
    view: &SlideView<'_>,
    palette: &Palette,
) {
    let ui = &presenter.config().ui;

    if let Some(notes) = view.notes {
        let top = RENDER_HEIGHT as f32 - BAR_HEIGHT - NOTES_HEIGHT;
        d.draw_rectangle(0, top as i32, RENDER_WIDTH, NOTES_HEIGHT as i32, palette.panel);
        let text = if notes.is_empty() { "(no notes)" } else { notes };
        let width = RENDER_WIDTH as f32 - 2.0 * MARGIN;
        draw_lines(d, text, MARGIN, top + 20.0, 28, width, palette.muted);
    }

    for (target, rect) in presenter.controls() {
        match target {
            Target::Counter => {
                if let Some(counter) = &view.counter {
                    let (x, y) = ((rect.x + 40.0) as i32, (rect.y + 8.0) as i32);
                    d.draw_text(counter, x, y, 32, palette.muted);
                }
            }
            _ => {
                d.draw_rectangle_rec(*rect, palette.panel);
                let label = match target {
                    Target::Prev => "<",
                    Target::Next => ">",
                    Target::ThemeToggle => "T",
                    Target::GridToggle => "G",
                    Target::NotesToggle => "N",
                    _ => "",
                };
                d.draw_text(label, (rect.x + 16.0) as i32, (rect.y + 8.0) as i32, 32, palette.text);
            }
        }
    }

    if let Some(progress) = view.progress {
        let y = RENDER_HEIGHT - PROGRESS_HEIGHT as i32;
        let width = (RENDER_WIDTH as f32 * progress) as i32;
        d.draw_rectangle(0, y, width, PROGRESS_HEIGHT as i32, palette.accent);
    }

    if ui.timer {
        draw_timer(d, presenter.timer().display(), palette);
    }
}

fn draw_timer(d: &mut impl RaylibDraw, display: TimerDisplay, palette: &Palette) {
    let color = if display.overtime { palette.warning } else { palette.muted };
    let x = RENDER_WIDTH - 200;
    let y = 32;
    d.draw_text(&format!("{:02}", display.minutes), x, y, 40, color);
    let dot = Color::new(color.r, color.g, color.b, (255.0 * display.dot_opacity) as u8);
    d.draw_circle(x + 64, y + 20, 5.0, dot);
    d.draw_text(&format!("{:02}", display.seconds), x + 80, y, 40, color);
}

fn draw_grid(d: &mut impl RaylibDraw, presenter: &Presenter, palette: &Palette) {
    let current = presenter.navigator().current();
    let cells = presenter.grid().cells.iter();
    for (i, (cell, slide)) in cells.zip(&presenter.deck().slides).enumerate() {
        let fill = if i == current { palette.accent } else { palette.panel };
        d.draw_rectangle_rec(*cell, fill);
        let text_color = if i == current { palette.background } else { palette.text };
        let caption = format!("{}. {}", i + 1, slide.title);
        let lines = wrap_text(&caption, 28, cell.width - 24.0);
        for (row, line) in lines.iter().take(3).enumerate() {
            let y = cell.y + 12.0 + row as f32 * 34.0;
            d.draw_text(line, (cell.x + 12.0) as i32, y as i32, 28, text_color);
        }
        // Lightweight preview: the first block after the title.
        if let Some(block) = slide.blocks.iter().find(|b| b.text != slide.title) {
            let y = cell.y + cell.height - 36.0;
            let preview: String = block.text.chars().take(40).collect();
            d.draw_text(&preview, (cell.x + 12.0) as i32, y as i32, 20, palette.muted);
        }
    }
}

fn draw_prompt(d: &mut impl RaylibDraw, buffer: &str, palette: &Palette) {
    let width = 640;
    let height = 140;
    let x = (RENDER_WIDTH - width) / 2;
    let y = (RENDER_HEIGHT - height) / 2;
    d.draw_rectangle(x, y, width, height, palette.panel);
    d.draw_rectangle_lines(x, y, width, height, palette.accent);
    d.draw_text(&format!("Go to slide: {buffer}_"), x + 32, y + 48, 44, palette.text);
}
