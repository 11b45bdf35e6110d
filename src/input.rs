//! Platform-neutral input events
//!
//! Hosts translate keyboard, mouse, touch and soft-keyboard events into these
//! and queue them on the running `GameLoop`. Games consume them at the start
//! of the next tick.

use crate::settings::SnakeSpeed;

/// Keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    /// A printable character (typing games)
    Char(char),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            " " | "Spacebar" => Some(Key::Space),
            "Enter" => Some(Key::Enter),
            "Escape" => Some(Key::Escape),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Whether this key counts as a "tap" action
    pub fn is_tap(&self) -> bool {
        matches!(self, Key::Space | Key::Up | Key::Enter)
    }
}

/// Where a pointer event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// On-screen buttons some games expose next to the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiButton {
    /// Snake's on-screen direction pad
    Pad(Key),
    /// Snake speed selector
    Speed(SnakeSpeed),
    /// Slide puzzle hint: solve the current level
    Solve,
}

/// A single input event, in canvas-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerMove { x: f32, y: f32, kind: PointerKind },
    PointerDown { x: f32, y: f32, kind: PointerKind },
    PointerUp { kind: PointerKind },
    /// Text from the soft-keyboard shim (mobile)
    Text(String),
    Button(UiButton),
}

impl InputEvent {
    /// Characters typed by this event, if any
    pub fn typed_chars(&self) -> Vec<char> {
        match self {
            InputEvent::KeyDown(Key::Char(c)) => vec![*c],
            InputEvent::Text(text) => text.chars().filter(|c| c.is_alphanumeric()).collect(),
            _ => Vec::new(),
        }
    }
}
