mod atlas;
mod bitmap_font;

pub use atlas::{FontError, GlyphAtlas};
pub use bitmap_font::BitmapFont;
