use serde::{Deserialize, Serialize};

macro_rules! key_codes {
    ($($name:ident),* $(,)?) => {
        /// Keyboard key code. The discriminant is the slot index in a snapshot.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Key {
            $($name),*
        }

        impl Key {
            /// Every key, in slot order.
            pub const ALL: &'static [Key] = &[$(Key::$name),*];
            /// Number of key slots.
            pub const COUNT: usize = Self::ALL.len();
        }
    };
}

key_codes! {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    Escape, LControl, LShift, LAlt, LSystem, RControl, RShift, RAlt, RSystem, Menu,
    LBracket, RBracket, Semicolon, Comma, Period, Quote, Slash, Backslash,
    Tilde, Equal, Hyphen, Space, Enter, Backspace, Tab,
    PageUp, PageDown, End, Home, Insert, Delete,
    Add, Subtract, Multiply, Divide,
    Left, Right, Up, Down,
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12, F13, F14, F15,
    Pause,
}

impl Key {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Mouse button code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    XButton1,
    XButton2,
}

impl MouseButton {
    pub const ALL: &'static [MouseButton] = &[
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::XButton1,
        MouseButton::XButton2,
    ];
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_slots_match_discriminants() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), i, "{key:?}");
        }
        assert_eq!(Key::COUNT, 101);
    }

    #[test]
    fn mouse_slots_match_discriminants() {
        for (i, button) in MouseButton::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
    }

    #[test]
    fn key_deserializes_from_name() {
        let key: Key = serde_json::from_str("\"Enter\"").unwrap();
        assert_eq!(key, Key::Enter);
    }
}
