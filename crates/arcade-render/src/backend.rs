use anyhow::Result;

use arcade_types::{Color, DstRect, SrcRect, TextureId};

/// Abstraction over rendering backends.
/// Implementations: the host window's renderer (production), [`CommandRecorder`](crate::CommandRecorder) (testing, headless).
pub trait RenderBackend {
    fn begin_frame(&mut self) -> Result<()>;
    fn end_frame(&mut self) -> Result<()>;
    fn clear(&mut self, color: Color) -> Result<()>;

    /// Upload tightly packed RGBA8 pixels as a new texture.
    fn upload_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureId>;
    fn texture_size(&self, id: TextureId) -> Option<(u32, u32)>;

    fn draw_sprite(
        &mut self,
        texture: TextureId,
        src: SrcRect,
        dst: DstRect,
        color: Color,
    ) -> Result<()>;

    fn screen_size(&self) -> (u32, u32);
}
