//! Drawing seam and bitmap-font text.
//!
//! The host graphics library sits behind [`RenderBackend`]; everything here
//! only issues textured-quad draws through it.

pub mod backend;
pub mod command_recorder;
pub mod font;
pub mod texture;

pub use backend::RenderBackend;
pub use command_recorder::{CommandRecorder, DrawCommand};
pub use font::{BitmapFont, FontError, GlyphAtlas};
pub use texture::{decode_image, load_texture, upload_image};
