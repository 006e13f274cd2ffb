use crate::backend::KeyboardBackend;
use crate::button_states::ButtonStates;
use crate::key::Key;

/// Per-frame keyboard snapshot with edge detection.
#[derive(Debug, Clone)]
pub struct Keyboard {
    states: ButtonStates,
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            states: ButtonStates::new(Key::COUNT),
        }
    }

    /// Poll every key from the backend. Call once per frame before any query.
    pub fn update(&mut self, backend: &dyn KeyboardBackend) {
        self.states.update(|i| backend.is_key_pressed(Key::ALL[i]));
    }

    /// Forget held keys so nothing carries into the next frame as an edge.
    pub fn reset(&mut self) {
        log::debug!("keyboard snapshot reset");
        self.states.reset();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.states.is_pressed(key.index())
    }

    /// Just pressed this frame.
    pub fn is_down(&self, key: Key) -> bool {
        self.states.is_down(key.index())
    }

    /// Just released this frame.
    pub fn is_up(&self, key: Key) -> bool {
        self.states.is_up(key.index())
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

    /// Keys that went down this frame, in slot order.
    pub fn pressed_this_frame(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.iter().copied().filter(|&k| self.is_down(k))
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}
