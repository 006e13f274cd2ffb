use anyhow::Result;

use arcade_input::{Mouse, MouseButton};
use arcade_render::{BitmapFont, RenderBackend};
use arcade_types::{Color, DstRect, SrcRect, TextureId};

/// Caller-chosen identifier reported back in [`ButtonEvent::Clicked`].
pub type ButtonId = u32;

/// Result of one [`Button::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    None,
    /// Cursor is over the button.
    Hovered,
    /// Left button was pressed and released over the button.
    Clicked(ButtonId),
}

/// A clickable textured rectangle with an optional caption.
///
/// A click needs both the press and the release to land inside the button;
/// dragging off before releasing cancels it.
#[derive(Debug, Clone)]
pub struct Button {
    pub id: ButtonId,
    pub bounds: DstRect,
    texture: Option<TextureId>,
    normal: SrcRect,
    hover: SrcRect,
    pressed: SrcRect,
    pub caption: Option<String>,
    pub caption_color: Color,
    hovered: bool,
    held: bool,
}

impl Button {
    /// A button with no texture; only its caption is drawn.
    pub fn new(id: ButtonId, bounds: DstRect) -> Self {
        let full = SrcRect::new(0.0, 0.0, bounds.w, bounds.h);
        Self {
            id,
            bounds,
            texture: None,
            normal: full,
            hover: full,
            pressed: full,
            caption: None,
            caption_color: Color::WHITE,
            hovered: false,
            held: false,
        }
    }

    /// Draw from `texture` using a different source rect per state.
    pub fn with_texture(
        mut self,
        texture: TextureId,
        normal: SrcRect,
        hover: SrcRect,
        pressed: SrcRect,
    ) -> Self {
        self.texture = Some(texture);
        self.normal = normal;
        self.hover = hover;
        self.pressed = pressed;
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn update(&mut self, mouse: &Mouse) -> ButtonEvent {
        let (mx, my) = mouse.position();
        let inside = self.bounds.contains(mx, my);
        self.hovered = inside;

        if inside && mouse.is_down(MouseButton::Left) {
            self.held = true;
        }
        if mouse.is_up(MouseButton::Left) {
            let clicked = self.held && inside;
            self.held = false;
            if clicked {
                return ButtonEvent::Clicked(self.id);
            }
        } else if !mouse.is_pressed(MouseButton::Left) {
            self.held = false;
        }

        if inside {
            ButtonEvent::Hovered
        } else {
            ButtonEvent::None
        }
    }

    fn current_src(&self) -> SrcRect {
        match (self.hovered, self.held) {
            (true, true) => self.pressed,
            (true, false) => self.hover,
            _ => self.normal,
        }
    }

    pub fn draw(&self, font: &BitmapFont, renderer: &mut dyn RenderBackend) -> Result<()> {
        if let Some(texture) = self.texture {
            renderer.draw_sprite(texture, self.current_src(), self.bounds, Color::WHITE)?;
        }
        if let Some(caption) = &self.caption {
            let cx = self.bounds.x + self.bounds.w / 2.0;
            let cy = self.bounds.y + self.bounds.h / 2.0;
            font.draw_centered(renderer, caption, cx, cy, self.caption_color)?;
        }
        Ok(())
    }
}
