use anyhow::Result;

use arcade_state::{AppContext, Label, Screen, Transition};

/// Fades the music out, then ends the run.
pub struct ExitScreen {
    farewell: Label,
}

impl ExitScreen {
    pub fn new() -> Self {
        Self {
            farewell: Label::new("GOODBYE", 0.0, 0.0).centered(),
        }
    }
}

impl Default for ExitScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen<AppContext> for ExitScreen {
    fn initialize(&mut self, ctx: &mut AppContext) -> Result<()> {
        let (width, height) = ctx.renderer.screen_size();
        self.farewell.x = width as f32 / 2.0;
        self.farewell.y = height as f32 / 2.0;
        ctx.sounds.stop_all();
        ctx.music.clear_playlist();
        ctx.music.slow_stop();
        Ok(())
    }

    fn draw(&mut self, ctx: &mut AppContext, _dt_ms: u64) -> Result<()> {
        self.farewell.draw(&ctx.font, ctx.renderer.as_mut())
    }

    fn update(&mut self, ctx: &mut AppContext, _dt_ms: u64) -> Transition<AppContext> {
        if ctx.music.is_playing() {
            Transition::None
        } else {
            Transition::Exit
        }
    }
}
