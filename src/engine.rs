//! The raylib window loop.
//!
//! Each frame polls keyboard, text and pointer input, hands the decoded
//! events to the presenter in arrival order, refreshes the timer, then draws
//! into a fixed-size framebuffer that is stretched over the window.

use std::time::Instant;

use anyhow::{Result, anyhow};
use raylib::prelude::*;
use tracing::info;

use crate::constants::*;
use crate::input::{InputEvent, Key};
use crate::layout::to_render_space;
use crate::presenter::{Effect, Presenter};
use crate::render::draw_frame;
use crate::texture_loader::load_deck_textures;

/// Pointer travel (render pixels) below which a press/release is a click.
const CLICK_TOLERANCE: f32 = 8.0;

pub fn run(mut presenter: Presenter, fullscreen: bool) -> Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title(&presenter.title())
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    // Escape belongs to the grid and the prompt
    rl.set_exit_key(None);
    if fullscreen {
        rl.toggle_fullscreen();
    }

    let textures = load_deck_textures(&mut rl, &thread, presenter.deck().image_paths());

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow!("failed to create render texture: {e}"))?;

    let mut title = presenter.title();
    let mut pointer: Option<Vector2> = None;

    'frames: while !rl.window_should_close() {
        let now = Instant::now();

        for event in poll_events(&mut rl, &presenter, &mut pointer) {
            match presenter.handle(event, now) {
                Some(Effect::ToggleFullscreen) => rl.toggle_fullscreen(),
                Some(Effect::Quit) => break 'frames,
                None => {}
            }
        }
        presenter.tick(now);

        let next_title = presenter.title();
        if next_title != title {
            rl.set_window_title(&thread, &next_title);
            title = next_title;
        }

        {
            let mut d = rl.begin_texture_mode(&thread, &mut framebuffer);
            draw_frame(&mut d, &presenter, &textures);
        }

        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.clear_background(Color::BLACK);
        // Render textures are stored upside down
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    info!(address = %presenter.location(), "presentation closed");
    Ok(())
}

/// Drains this frame's input into presenter events.
fn poll_events(
    rl: &mut RaylibHandle,
    presenter: &Presenter,
    pointer: &mut Option<Vector2>,
) -> Vec<InputEvent> {
    let mut events = Vec::new();
    // Decided before any key is handled, so the key that opens the prompt
    // does not also land in it.
    let prompt_open = presenter.state().is_prompt();

    while let Some(key) = rl.get_key_pressed() {
        if let Some(key) = map_key(key) {
            events.push(InputEvent::Key(key));
        }
    }
    while let Some(c) = rl.get_char_pressed() {
        if prompt_open {
            events.push(InputEvent::Typed(c));
        }
    }

    let screen_width = rl.get_screen_width() as f32;
    let screen_height = rl.get_screen_height() as f32;
    let position = to_render_space(rl.get_mouse_position(), screen_width, screen_height);

    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        *pointer = Some(position);
    }
    if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
        if let Some(start) = pointer.take() {
            let dx = position.x - start.x;
            let dy = position.y - start.y;
            if dx.abs() < CLICK_TOLERANCE && dy.abs() < CLICK_TOLERANCE {
                if let Some(target) = presenter.target_at(position) {
                    events.push(InputEvent::Click(target));
                }
            } else {
                events.push(InputEvent::Swipe { dx, dy });
            }
        }
    }

    events
}

fn map_key(key: KeyboardKey) -> Option<Key> {
    let key = match key {
        KeyboardKey::KEY_RIGHT => Key::Right,
        KeyboardKey::KEY_LEFT => Key::Left,
        KeyboardKey::KEY_PAGE_DOWN => Key::PageDown,
        KeyboardKey::KEY_PAGE_UP => Key::PageUp,
        KeyboardKey::KEY_SPACE => Key::Space,
        KeyboardKey::KEY_BACKSPACE => Key::Backspace,
        KeyboardKey::KEY_ENTER | KeyboardKey::KEY_KP_ENTER => Key::Enter,
        KeyboardKey::KEY_ESCAPE => Key::Escape,
        KeyboardKey::KEY_F => Key::Char('f'),
        KeyboardKey::KEY_G => Key::Char('g'),
        KeyboardKey::KEY_J => Key::Char('j'),
        KeyboardKey::KEY_N => Key::Char('n'),
        KeyboardKey::KEY_Q => Key::Char('q'),
        KeyboardKey::KEY_T => Key::Char('t'),
        _ => return None,
    };
    Some(key)
}
