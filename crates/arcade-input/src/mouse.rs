use crate::backend::MouseBackend;
use crate::button_states::ButtonStates;
use crate::key::MouseButton;

/// Per-frame mouse snapshot with edge detection, cursor position and wheel.
#[derive(Debug, Clone)]
pub struct Mouse {
    states: ButtonStates,
    position: (f32, f32),
    wheel_delta: f32,
}

impl Mouse {
    pub fn new() -> Self {
        Self {
            states: ButtonStates::new(MouseButton::COUNT),
            position: (0.0, 0.0),
            wheel_delta: 0.0,
        }
    }

    /// Poll buttons, cursor and wheel. Call once per frame before any query.
    pub fn update(&mut self, backend: &mut dyn MouseBackend) {
        self.states
            .update(|i| backend.is_button_pressed(MouseButton::ALL[i]));
        self.position = backend.position();
        self.wheel_delta = backend.take_wheel_delta();
    }

    pub fn reset(&mut self) {
        log::debug!("mouse snapshot reset");
        self.states.reset();
        self.wheel_delta = 0.0;
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.states.is_pressed(button.index())
    }

    /// Just pressed this frame.
    pub fn is_down(&self, button: MouseButton) -> bool {
        self.states.is_down(button.index())
    }

    /// Just released this frame.
    pub fn is_up(&self, button: MouseButton) -> bool {
        self.states.is_up(button.index())
    }

    pub fn is_any_pressed(&self) -> bool {
        self.states.is_any_pressed()
    }

    pub fn is_any_down(&self) -> bool {
        self.states.is_any_down()
    }

    pub fn is_any_up(&self) -> bool {
        self.states.is_any_up()
    }

    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    /// Wheel notches scrolled during the last frame.
    pub fn wheel_delta(&self) -> f32 {
        self.wheel_delta
    }
}

impl Default for Mouse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::VirtualMouseBackend;

    #[test]
    fn click_edges() {
        let mut backend = VirtualMouseBackend::new();
        let mut mouse = Mouse::new();

        backend.press(MouseButton::Left);
        mouse.update(&mut backend);
        assert!(mouse.is_down(MouseButton::Left));
        assert!(!mouse.is_down(MouseButton::Right));

        backend.release(MouseButton::Left);
        mouse.update(&mut backend);
        assert!(mouse.is_up(MouseButton::Left));
        assert!(!mouse.is_any_pressed());
    }

    #[test]
    fn position_and_wheel_snapshot() {
        let mut backend = VirtualMouseBackend::new();
        let mut mouse = Mouse::new();

        backend.move_to(12.0, 34.0);
        backend.scroll(-1.0);
        mouse.update(&mut backend);
        assert_eq!(mouse.position(), (12.0, 34.0));
        assert_eq!(mouse.wheel_delta(), -1.0);

        mouse.update(&mut backend);
        assert_eq!(mouse.wheel_delta(), 0.0);
    }
}
