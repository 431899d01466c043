//! Platform abstraction layer
//!
//! The simulation only needs two held-key queries and two discrete presses.
//! Anything that can answer those (a real keyboard, the demo autopilot, a
//! scripted test) is an `InputSource`.

pub mod autopilot;

pub use autopilot::Autopilot;

use crate::sim::TickInput;

/// Discrete key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// Space on the start screen
    Launch,
    /// R on the win / game over screen
    Restart,
}

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
    R,
}

impl Key {
    /// Map a DOM/winit-style key name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            " " | "Space" => Some(Key::Space),
            "r" | "R" | "KeyR" => Some(Key::R),
            _ => None,
        }
    }
}

/// Something the game can poll for input once per tick
pub trait InputSource {
    fn left_held(&self) -> bool;
    fn right_held(&self) -> bool;
    /// Discrete presses since the last call
    fn take_presses(&mut self) -> Vec<KeyPress>;
}

/// Poll an input source into this tick's commands
pub fn sample<S: InputSource + ?Sized>(source: &mut S) -> TickInput {
    let mut input = TickInput {
        left: source.left_held(),
        right: source.right_held(),
        ..Default::default()
    };
    for press in source.take_presses() {
        match press {
            KeyPress::Launch => input.launch = true,
            KeyPress::Restart => input.restart = true,
        }
    }
    input
}

/// Keyboard state fed by key down/up events
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    left: bool,
    right: bool,
    presses: Vec<KeyPress>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Space => self.presses.push(KeyPress::Launch),
            Key::R => self.presses.push(KeyPress::Restart),
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Space | Key::R => {}
        }
    }

    /// Forget held keys (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
    }
}

impl InputSource for KeyboardState {
    fn left_held(&self) -> bool {
        self.left
    }

    fn right_held(&self) -> bool {
        self.right
    }

    fn take_presses(&mut self) -> Vec<KeyPress> {
        std::mem::take(&mut self.presses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys() {
        let mut kb = KeyboardState::new();
        kb.key_down(Key::Left);
        let input = sample(&mut kb);
        assert!(input.left);
        assert_eq!(input.direction(), -1);

        kb.key_down(Key::Right);
        assert_eq!(sample(&mut kb).direction(), 0);

        kb.key_up(Key::Left);
        assert_eq!(sample(&mut kb).direction(), 1);

        kb.release_all();
        assert_eq!(sample(&mut kb).direction(), 0);
    }

    #[test]
    fn test_presses_are_one_shot() {
        let mut kb = KeyboardState::new();
        kb.key_down(Key::Space);
        kb.key_down(Key::R);
        let input = sample(&mut kb);
        assert!(input.launch && input.restart);

        let input = sample(&mut kb);
        assert!(!input.launch && !input.restart);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name(" "), Some(Key::Space));
        assert_eq!(Key::from_name("KeyR"), Some(Key::R));
        assert_eq!(Key::from_name("Enter"), None);
    }
}
