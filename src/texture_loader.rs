use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("failed to upload texture for {path}: {message}")]
    Upload { path: PathBuf, message: String },
}

/// Textures for every image block of the deck, keyed by resolved path.
/// Images that fail to load are logged and left out; the renderer falls back
/// to their alt text.
pub fn load_deck_textures<'a>(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    paths: impl IntoIterator<Item = &'a Path>,
) -> HashMap<PathBuf, Texture2D> {
    let mut textures = HashMap::new();
    for path in paths {
        if textures.contains_key(path) {
            continue;
        }
        match load_texture_with_exif_rotation(rl, thread, path) {
            Ok(texture) => {
                textures.insert(path.to_path_buf(), texture);
            }
            Err(e) => warn!("{e}"),
        }
    }
    textures
}

/// EXIF orientation of a JPEG, 1 when absent or unreadable.
pub fn exif_orientation(file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            debug!(error = %e, "no EXIF data");
            1
        }
    }
}

pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D, TextureError> {
    let file_bytes = fs::read(image_path).map_err(|source| TextureError::Read {
        path: image_path.to_path_buf(),
        source,
    })?;

    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    // EXIF is only read reliably from JPEG containers
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(&file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes).map_err(|e| {
        TextureError::Decode {
            path: image_path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    // 3 = 180°, 6 = 90° clockwise, 8 = 90° counter-clockwise; flips are ignored
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!(path = %image_path.display(), orientation, "applied EXIF rotation");
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| TextureError::Upload {
            path: image_path.to_path_buf(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_defaults_without_exif() {
        assert_eq!(exif_orientation(b"not a jpeg"), 1);
    }
}
