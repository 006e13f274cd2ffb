use thiserror::Error;

use arcade_types::{SrcRect, TextureId};

/// Number of distinct glyph indices a font can address (one per byte value).
pub const GLYPH_SLOTS: usize = 256;

/// Glyph atlas construction failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FontError {
    #[error("glyph grid must have at least one row and column (got {rows}x{cols})")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("{width}x{height} image is too small for a {rows}x{cols} glyph grid")]
    ImageTooSmall {
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    },
}

/// Cell size of a `rows`×`cols` grid over a `width`×`height` image.
pub fn cell_size(width: u32, height: u32, rows: u32, cols: u32) -> Result<(u32, u32), FontError> {
    if rows == 0 || cols == 0 {
        return Err(FontError::EmptyGrid { rows, cols });
    }
    let cell_width = width / cols;
    let cell_height = height / rows;
    if cell_width == 0 || cell_height == 0 {
        return Err(FontError::ImageTooSmall {
            width,
            height,
            rows,
            cols,
        });
    }
    Ok((cell_width, cell_height))
}

/// Fixed-grid glyph atlas over a single texture.
///
/// Cell `i` (row-major) holds the glyph for code point `i`. Cells beyond
/// [`GLYPH_SLOTS`] are never addressed.
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    texture: TextureId,
    cell_width: u32,
    cell_height: u32,
    rects: Vec<SrcRect>,
}

impl GlyphAtlas {
    /// Slice a `width`×`height` texture into `rows`×`cols` cells.
    pub fn new(
        texture: TextureId,
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    ) -> Result<Self, FontError> {
        let (cell_width, cell_height) = cell_size(width, height, rows, cols)?;

        let cells = (rows as usize * cols as usize).min(GLYPH_SLOTS);
        let rects = (0..cells)
            .map(|i| {
                let row = (i / cols as usize) as u32;
                let col = (i % cols as usize) as u32;
                SrcRect::new(
                    (col * cell_width) as f32,
                    (row * cell_height) as f32,
                    cell_width as f32,
                    cell_height as f32,
                )
            })
            .collect();

        Ok(Self {
            texture,
            cell_width,
            cell_height,
            rects,
        })
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Number of addressable glyph cells.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Source rectangle for a glyph index, or `None` when the atlas has no cell for it.
    pub fn glyph(&self, index: u32) -> Option<SrcRect> {
        self.rects.get(index as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_cells() {
        let atlas = GlyphAtlas::new(TextureId(1), 128, 128, 16, 16).unwrap();
        assert_eq!(atlas.len(), 256);
        assert_eq!((atlas.cell_width(), atlas.cell_height()), (8, 8));
        // 'A' = 65 = row 4, col 1
        assert_eq!(atlas.glyph(65), Some(SrcRect::new(8.0, 32.0, 8.0, 8.0)));
        assert_eq!(atlas.glyph(255), Some(SrcRect::new(120.0, 120.0, 8.0, 8.0)));
        assert_eq!(atlas.glyph(256), None);
    }

    #[test]
    fn small_grid_skips_high_indices() {
        let atlas = GlyphAtlas::new(TextureId(1), 80, 80, 8, 8).unwrap();
        assert_eq!(atlas.len(), 64);
        assert!(atlas.glyph(63).is_some());
        assert!(atlas.glyph(64).is_none());
    }

    #[test]
    fn uneven_image_truncates_cells() {
        let atlas = GlyphAtlas::new(TextureId(1), 100, 50, 4, 8).unwrap();
        assert_eq!((atlas.cell_width(), atlas.cell_height()), (12, 12));
    }

    #[test]
    fn invalid_grids() {
        assert_eq!(
            GlyphAtlas::new(TextureId(1), 64, 64, 0, 16).unwrap_err(),
            FontError::EmptyGrid { rows: 0, cols: 16 }
        );
        assert!(matches!(
            GlyphAtlas::new(TextureId(1), 8, 8, 16, 16),
            Err(FontError::ImageTooSmall { .. })
        ));
    }
}
