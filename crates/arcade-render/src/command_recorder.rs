use std::collections::HashMap;

use anyhow::{Result, bail};

use arcade_types::{Color, DstRect, SrcRect, TextureId};

use crate::backend::RenderBackend;

/// Recorded draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginFrame,
    EndFrame,
    Clear(Color),
    DrawSprite {
        texture: TextureId,
        src: SrcRect,
        dst: DstRect,
        color: Color,
    },
}

/// A RenderBackend that records draw commands instead of rasterizing.
/// Used by tests and the headless runner; does not require a GPU.
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    textures: HashMap<TextureId, (u32, u32)>,
    next_texture_id: u64,
    screen_width: u32,
    screen_height: u32,
}

impl CommandRecorder {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            commands: Vec::new(),
            textures: HashMap::new(),
            next_texture_id: 1,
            screen_width,
            screen_height,
        }
    }

    /// Get all recorded commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Clear recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Destination rectangles of every recorded sprite draw, in order.
    pub fn sprite_destinations(&self) -> Vec<DstRect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::DrawSprite { dst, .. } => Some(*dst),
                _ => None,
            })
            .collect()
    }

    /// Number of textures uploaded or registered so far.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Register a texture with the given dimensions without pixel data.
    pub fn register_texture(&mut self, width: u32, height: u32) -> TextureId {
        let id = TextureId(self.next_texture_id);
        self.next_texture_id += 1;
        self.textures.insert(id, (width, height));
        id
    }
}

impl RenderBackend for CommandRecorder {
    fn begin_frame(&mut self) -> Result<()> {
        self.commands.push(DrawCommand::BeginFrame);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.commands.push(DrawCommand::EndFrame);
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn upload_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureId> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            bail!(
                "texture data is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            );
        }
        Ok(self.register_texture(width, height))
    }

    fn texture_size(&self, id: TextureId) -> Option<(u32, u32)> {
        self.textures.get(&id).copied()
    }

    fn draw_sprite(
        &mut self,
        texture: TextureId,
        src: SrcRect,
        dst: DstRect,
        color: Color,
    ) -> Result<()> {
        if !self.textures.contains_key(&texture) {
            bail!("draw with unknown texture {texture:?}");
        }
        self.commands.push(DrawCommand::DrawSprite {
            texture,
            src,
            dst,
            color,
        });
        Ok(())
    }

    fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_frame_sequence() {
        let mut rec = CommandRecorder::new(320, 240);
        let tex = rec.register_texture(16, 16);

        rec.begin_frame().unwrap();
        rec.clear(Color::BLACK).unwrap();
        rec.draw_sprite(
            tex,
            SrcRect::new(0.0, 0.0, 16.0, 16.0),
            DstRect::new(4.0, 4.0, 16.0, 16.0),
            Color::WHITE,
        )
        .unwrap();
        rec.end_frame().unwrap();

        assert_eq!(rec.commands().len(), 4);
        assert_eq!(rec.commands()[0], DrawCommand::BeginFrame);
        assert_eq!(rec.sprite_destinations(), vec![DstRect::new(4.0, 4.0, 16.0, 16.0)]);
        assert_eq!(rec.screen_size(), (320, 240));
    }

    #[test]
    fn upload_rejects_short_buffer() {
        let mut rec = CommandRecorder::new(320, 240);
        assert!(rec.upload_texture(2, 2, &[0; 8]).is_err());
        let id = rec.upload_texture(2, 2, &[0; 16]).unwrap();
        assert_eq!(rec.texture_size(id), Some((2, 2)));
    }

    #[test]
    fn unknown_texture_is_error() {
        let mut rec = CommandRecorder::new(320, 240);
        let src = SrcRect::new(0.0, 0.0, 1.0, 1.0);
        let dst = DstRect::new(0.0, 0.0, 1.0, 1.0);
        assert!(rec.draw_sprite(TextureId(99), src, dst, Color::WHITE).is_err());
    }
}
