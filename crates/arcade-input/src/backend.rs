use std::collections::HashSet;

use crate::key::{Key, MouseButton};

/// Platform abstraction for keyboard state queries.
pub trait KeyboardBackend {
    /// Returns `true` if the given key is currently held down.
    fn is_key_pressed(&self, key: Key) -> bool;
}

/// Platform abstraction for mouse state queries.
pub trait MouseBackend {
    /// Returns `true` if the given button is currently held down.
    fn is_button_pressed(&self, button: MouseButton) -> bool;

    /// Cursor position relative to the window, in pixels.
    fn position(&self) -> (f32, f32);

    /// Wheel movement since the last call, in notches. Resets the counter.
    fn take_wheel_delta(&mut self) -> f32;
}

/// Virtual keyboard backend for testing and scripted runs.
#[derive(Debug, Default)]
pub struct VirtualKeyboardBackend {
    pressed: HashSet<Key>,
}

impl VirtualKeyboardBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.pressed.clear();
    }
}

impl KeyboardBackend for VirtualKeyboardBackend {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

/// Virtual mouse backend for testing and scripted runs.
#[derive(Debug, Default)]
pub struct VirtualMouseBackend {
    pressed: HashSet<MouseButton>,
    position: (f32, f32),
    wheel: f32,
}

impl VirtualMouseBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: MouseButton) {
        self.pressed.insert(button);
    }

    pub fn release(&mut self, button: MouseButton) {
        self.pressed.remove(&button);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.position = (x, y);
    }

    pub fn scroll(&mut self, notches: f32) {
        self.wheel += notches;
    }
}

impl MouseBackend for VirtualMouseBackend {
    fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed.contains(&button)
    }

    fn position(&self) -> (f32, f32) {
        self.position
    }

    fn take_wheel_delta(&mut self) -> f32 {
        std::mem::take(&mut self.wheel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_keyboard_press_release() {
        let mut kb = VirtualKeyboardBackend::new();
        kb.press(Key::Space);
        assert!(kb.is_key_pressed(Key::Space));
        assert!(!kb.is_key_pressed(Key::Enter));
        kb.release(Key::Space);
        assert!(!kb.is_key_pressed(Key::Space));
    }

    #[test]
    fn virtual_mouse_wheel_is_drained() {
        let mut mouse = VirtualMouseBackend::new();
        mouse.scroll(1.0);
        mouse.scroll(2.0);
        assert_eq!(mouse.take_wheel_delta(), 3.0);
        assert_eq!(mouse.take_wheel_delta(), 0.0);
    }
}
