use anyhow::Result;

use arcade_input::Key;
use arcade_state::{AppContext, Button, ButtonEvent, ButtonId, Label, Screen, Transition};
use arcade_types::{Color, DstRect};

use super::exit::ExitScreen;

const NEXT_SONG: ButtonId = 1;
const TOGGLE_SFX: ButtonId = 2;
const QUIT: ButtonId = 3;

const BUTTON_WIDTH: f32 = 160.0;
const BUTTON_HEIGHT: f32 = 24.0;
const BUTTON_GAP: f32 = 8.0;

/// Main menu: skip tracks, toggle effects, quit.
///
/// Mouse clicks and the keyboard (Up/Down + Enter, Escape to quit) both
/// drive it.
pub struct MenuScreen {
    title: Label,
    status: Label,
    buttons: Vec<Button>,
    selected: usize,
}

impl MenuScreen {
    pub fn new() -> Self {
        Self {
            title: Label::new("MAIN MENU", 0.0, 0.0).centered(),
            status: Label::new("", 0.0, 0.0).centered().with_color(Color::GRAY),
            buttons: Vec::new(),
            selected: 0,
        }
    }

    fn layout(&mut self, width: f32, height: f32) {
        let cx = width / 2.0;
        self.title.x = cx;
        self.title.y = height / 4.0;
        self.status.x = cx;
        self.status.y = height - 32.0;

        let captions = [(NEXT_SONG, "NEXT SONG"), (TOGGLE_SFX, "SOUND FX"), (QUIT, "QUIT")];
        let top = height / 2.0 - BUTTON_HEIGHT;
        self.buttons = captions
            .iter()
            .enumerate()
            .map(|(i, &(id, caption))| {
                let y = top + i as f32 * (BUTTON_HEIGHT + BUTTON_GAP);
                let bounds = DstRect::new(cx - BUTTON_WIDTH / 2.0, y, BUTTON_WIDTH, BUTTON_HEIGHT);
                Button::new(id, bounds).with_caption(caption)
            })
            .collect();
    }

    fn activate(&mut self, ctx: &mut AppContext, id: ButtonId) -> Transition<AppContext> {
        ctx.sounds.play("select");
        match id {
            NEXT_SONG => {
                match ctx.music.next_song() {
                    Some(index) => self.status.set_text(format!("TRACK {}", index + 1)),
                    None => self.status.set_text("NO PLAYLIST"),
                }
                Transition::None
            }
            TOGGLE_SFX => {
                let muted = !ctx.sounds.is_muted();
                ctx.sounds.set_muted(muted);
                self.status
                    .set_text(if muted { "SOUND FX OFF" } else { "SOUND FX ON" });
                Transition::None
            }
            QUIT => Transition::to(ExitScreen::new()),
            other => {
                log::warn!("menu: unknown button {other}");
                Transition::None
            }
        }
    }
}

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen<AppContext> for MenuScreen {
    fn initialize(&mut self, ctx: &mut AppContext) -> Result<()> {
        let (width, height) = ctx.renderer.screen_size();
        self.layout(width as f32, height as f32);
        ctx.keyboard.reset();
        ctx.mouse.reset();
        Ok(())
    }

    fn draw(&mut self, ctx: &mut AppContext, _dt_ms: u64) -> Result<()> {
        let renderer = ctx.renderer.as_mut();
        self.title.draw(&ctx.font, renderer)?;
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.caption_color = if i == self.selected {
                Color::YELLOW
            } else {
                Color::WHITE
            };
            button.draw(&ctx.font, renderer)?;
        }
        self.status.draw(&ctx.font, renderer)
    }

    fn update(&mut self, ctx: &mut AppContext, _dt_ms: u64) -> Transition<AppContext> {
        if ctx.keyboard.is_down(Key::Escape) {
            return Transition::to(ExitScreen::new());
        }

        let count = self.buttons.len();
        if count > 0 {
            if ctx.keyboard.is_down(Key::Down) {
                self.selected = (self.selected + 1) % count;
            }
            if ctx.keyboard.is_down(Key::Up) {
                self.selected = (self.selected + count - 1) % count;
            }
        }

        let mut clicked = None;
        for (i, button) in self.buttons.iter_mut().enumerate() {
            match button.update(&ctx.mouse) {
                ButtonEvent::Clicked(id) => clicked = Some(id),
                ButtonEvent::Hovered => self.selected = i,
                ButtonEvent::None => {}
            }
        }
        if clicked.is_none() && ctx.keyboard.is_down(Key::Enter) {
            clicked = self.buttons.get(self.selected).map(|b| b.id);
        }

        match clicked {
            Some(id) => self.activate(ctx, id),
            None => Transition::None,
        }
    }
}
