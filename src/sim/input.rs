//! Frame input consumed by the simulation
//!
//! The platform layer translates raw DOM (or synthetic) events into this
//! state; the sim only ever reads it.

use glam::Vec2;
use std::collections::HashSet;

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Restart,
}

impl Key {
    /// Map a lowercase DOM key name to an action
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "w" | "arrowup" => Some(Key::Up),
            "s" | "arrowdown" => Some(Key::Down),
            "a" | "arrowleft" => Some(Key::Left),
            "d" | "arrowright" => Some(Key::Right),
            " " => Some(Key::Fire),
            "r" => Some(Key::Restart),
            _ => None,
        }
    }
}

/// Pressed keys plus pointer state, in field coordinates
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
    pointer: Option<Vec2>,
    pointer_down: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Press by DOM key name; returns whether the name mapped to an action
    pub fn press_name(&mut self, name: &str) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.press(key);
                true
            }
            None => false,
        }
    }

    pub fn release_name(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.release(key);
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn set_pointer_down(&mut self, down: bool) {
        self.pointer_down = down;
    }

    /// Fire key or held pointer button both request a shot
    pub fn shoot_intent(&self) -> bool {
        self.is_pressed(Key::Fire) || self.pointer_down
    }

    /// Clear all transient press state (keys and pointer button)
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.pointer_down = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_map_to_actions() {
        assert_eq!(Key::from_name("w"), Some(Key::Up));
        assert_eq!(Key::from_name("arrowleft"), Some(Key::Left));
        assert_eq!(Key::from_name(" "), Some(Key::Fire));
        assert_eq!(Key::from_name("q"), None);
    }

    #[test]
    fn shoot_intent_from_key_or_pointer() {
        let mut input = InputState::new();
        assert!(!input.shoot_intent());

        input.press(Key::Fire);
        assert!(input.shoot_intent());

        input.release(Key::Fire);
        input.set_pointer_down(true);
        assert!(input.shoot_intent());
    }

    #[test]
    fn reset_clears_presses_but_keeps_pointer_position() {
        let mut input = InputState::new();
        input.press(Key::Up);
        input.set_pointer_down(true);
        input.set_pointer(Vec2::new(100.0, 100.0));

        input.reset();

        assert!(!input.is_pressed(Key::Up));
        assert!(!input.shoot_intent());
        assert_eq!(input.pointer(), Some(Vec2::new(100.0, 100.0)));
    }
}
