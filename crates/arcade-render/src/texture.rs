use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;

use arcade_types::TextureId;

use crate::backend::RenderBackend;

/// Decode an image file into RGBA8 pixels.
pub fn decode_image(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)
        .with_context(|| format!("decoding image {}", path.display()))?
        .to_rgba8())
}

/// Upload decoded pixels through the backend. `path` only labels errors.
pub fn upload_image(
    backend: &mut dyn RenderBackend,
    image: &RgbaImage,
    path: &Path,
) -> Result<TextureId> {
    let (width, height) = image.dimensions();
    let id = backend
        .upload_texture(width, height, image.as_raw())
        .with_context(|| format!("uploading texture {}", path.display()))?;
    log::debug!("loaded texture {} ({width}x{height}) as {id:?}", path.display());
    Ok(id)
}

/// Decode an image file and upload it through the backend.
pub fn load_texture(backend: &mut dyn RenderBackend, path: &Path) -> Result<TextureId> {
    let image = decode_image(path)?;
    upload_image(backend, &image, path)
}
