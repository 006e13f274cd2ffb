use std::path::Path;

use anyhow::Result;

use arcade_types::{Color, DstRect, TextureId};

use crate::backend::RenderBackend;
use crate::font::atlas::{GlyphAtlas, cell_size};
use crate::texture::{decode_image, upload_image};

/// Monospaced text drawn from a fixed-grid glyph atlas.
///
/// Characters index atlas cells by code point; anything without a cell is
/// skipped but still advances the cursor. An unloaded font measures every
/// string as 0×0 and draws nothing.
#[derive(Debug, Clone, Default)]
pub struct BitmapFont {
    atlas: Option<GlyphAtlas>,
}

impl BitmapFont {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an atlas image and slice it into `rows`×`cols` cells.
    ///
    /// On failure the font is left unloaded.
    pub fn load(
        &mut self,
        renderer: &mut dyn RenderBackend,
        path: &Path,
        rows: u32,
        cols: u32,
    ) -> Result<()> {
        self.unload();
        let image = decode_image(path)?;
        let (width, height) = image.dimensions();
        // Reject the grid before anything reaches the backend.
        cell_size(width, height, rows, cols)?;
        let texture = upload_image(renderer, &image, path)?;
        self.atlas = Some(GlyphAtlas::new(texture, width, height, rows, cols)?);
        log::info!(
            "bitmap font {} loaded: {rows}x{cols} cells of {}x{}",
            path.display(),
            width / cols,
            height / rows
        );
        Ok(())
    }

    /// Build a font over a texture that is already uploaded.
    pub fn from_texture(
        texture: TextureId,
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    ) -> Result<Self> {
        Ok(Self {
            atlas: Some(GlyphAtlas::new(texture, width, height, rows, cols)?),
        })
    }

    pub fn unload(&mut self) {
        self.atlas = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.atlas.is_some()
    }

    pub fn atlas(&self) -> Option<&GlyphAtlas> {
        self.atlas.as_ref()
    }

    /// Cell size in pixels, `(0, 0)` when unloaded.
    pub fn cell_size(&self) -> (u32, u32) {
        self.atlas
            .as_ref()
            .map_or((0, 0), |a| (a.cell_width(), a.cell_height()))
    }

    /// Widest line's character count times the cell width.
    pub fn text_width(&self, text: &str) -> u32 {
        let (cell_width, _) = self.cell_size();
        let longest = text
            .split('\n')
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        longest as u32 * cell_width
    }

    /// Line count times the cell height. Empty text has no lines.
    pub fn text_height(&self, text: &str) -> u32 {
        if text.is_empty() {
            return 0;
        }
        let (_, cell_height) = self.cell_size();
        text.split('\n').count() as u32 * cell_height
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    ///
    /// `'\n'` returns the cursor to `x` and moves down one cell.
    pub fn draw(
        &self,
        renderer: &mut dyn RenderBackend,
        text: &str,
        x: f32,
        y: f32,
        color: Color,
    ) -> Result<()> {
        let Some(atlas) = &self.atlas else {
            return Ok(());
        };
        let w = atlas.cell_width() as f32;
        let h = atlas.cell_height() as f32;

        let (mut cx, mut cy) = (x, y);
        for ch in text.chars() {
            if ch == '\n' {
                cx = x;
                cy += h;
                continue;
            }
            if let Some(src) = atlas.glyph(ch as u32) {
                renderer.draw_sprite(atlas.texture(), src, DstRect::new(cx, cy, w, h), color)?;
            }
            cx += w;
        }
        Ok(())
    }

    /// Draw `text` so its bounding block is centered on (`cx`, `cy`).
    pub fn draw_centered(
        &self,
        renderer: &mut dyn RenderBackend,
        text: &str,
        cx: f32,
        cy: f32,
        color: Color,
    ) -> Result<()> {
        let x = cx - self.text_width(text) as f32 / 2.0;
        let y = cy - self.text_height(text) as f32 / 2.0;
        self.draw(renderer, text, x, y, color)
    }
}
