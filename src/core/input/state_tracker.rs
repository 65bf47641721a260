//=========================================================================
// Input Snapshot
//=========================================================================
//
// Held-state of every key and mouse button at one point in time.
//
// Architecture:
//   InputEvent → apply() → HashSet (keys/buttons held) → query
//
// The InputManager keeps two snapshots (current and previous frame) and
// derives edges (pressed / released) by comparing them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputSnapshot =======================================================

/// Keys and buttons held, cursor position and modifiers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,
}

impl InputSnapshot {
    /// Creates an empty snapshot (nothing held, cursor at the origin).
    pub fn new() -> Self {
        Self::default()
    }

    //--- Mutation ---------------------------------------------------------

    /// Applies a batch of events in order.
    pub(super) fn apply_all(&mut self, events: &[InputEvent]) {
        for event in events {
            self.apply(event);
        }
    }

    /// Applies one event.
    pub(super) fn apply(&mut self, event: &InputEvent) {
        if let Some(modifiers) = event.modifiers() {
            self.modifiers = modifiers;
        }

        match *event {
            InputEvent::KeyDown { key, .. } => {
                self.keys_down.insert(key);
            }
            InputEvent::KeyUp { key, .. } => {
                self.keys_down.remove(&key);
            }
            InputEvent::MouseButtonDown { button, .. } => {
                self.buttons_down.insert(button);
            }
            InputEvent::MouseButtonUp { button, .. } => {
                self.buttons_down.remove(&button);
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (x, y);
            }
            InputEvent::FocusLost => {
                self.keys_down.clear();
                self.buttons_down.clear();
                self.modifiers = Modifiers::NONE;
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while `key` is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` while `button` is held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Cursor position in window pixels (top-left origin).
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Last modifier state reported by a key or button event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Iterates over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
