pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second

pub const MARGIN: f32 = 96.0;                 // Slide content inset (render pixels)
pub const BAR_HEIGHT: f32 = 64.0;             // Bottom control bar
pub const PROGRESS_HEIGHT: f32 = 6.0;         // Progress bar thickness
pub const NOTES_HEIGHT: f32 = 220.0;          // Speaker notes panel above the bar
pub const GLYPH_WIDTH_RATIO: f32 = 0.55;      // Average glyph width / font size of the default font
