use std::path::Path;

use crate::error::LoadError;

/// Decoded RGB8 image, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }
}

pub fn load_texture<P: AsRef<Path>>(path: P) -> Result<TextureImage, LoadError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| LoadError::Texture {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    if width == 0 || height == 0 {
        return Err(LoadError::Texture {
            path: path.to_path_buf(),
            reason: format!("texture has empty dimensions {}x{}", width, height),
        });
    }

    tracing::info!("Loaded texture {}: {}x{}", path.display(), width, height);
    Ok(TextureImage {
        width,
        height,
        pixels: rgb.into_raw(),
    })
}
