mod button;
mod label;

pub use button::{Button, ButtonEvent, ButtonId};
pub use label::Label;
