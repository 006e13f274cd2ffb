use anyhow::Result;

use arcade_render::{BitmapFont, RenderBackend};
use arcade_types::Color;

/// A line (or block) of bitmap-font text at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub color: Color,
    /// When set, (`x`, `y`) is the center of the text block instead of its
    /// top-left corner.
    pub centered: bool,
}

impl Label {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            color: Color::WHITE,
            centered: false,
        }
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn draw(&self, font: &BitmapFont, renderer: &mut dyn RenderBackend) -> Result<()> {
        if self.centered {
            font.draw_centered(renderer, &self.text, self.x, self.y, self.color)
        } else {
            font.draw(renderer, &self.text, self.x, self.y, self.color)
        }
    }
}
