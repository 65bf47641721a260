//=========================================================================
// Input Manager
//
// Resolves per-frame input state from platform events.
//
// Responsibilities:
// - Drain raw `InputEvent`s queued by the platform layer
// - Maintain current and previous frame snapshots for edge detection
// - Accumulate discrete mouse wheel motion between frames
//
// Frame lifecycle (driven by the GameManager):
//   mouse_wheel()*  → update() → [screens query] → update_prev_input()
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, trace};

//=== Internal Modules ====================================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};
use super::state_tracker::InputSnapshot;
use super::InputService;
use crate::core::Subsystem;

//=== InputManager ========================================================

/// Engine-level input state with current/previous frame separation.
///
/// Events reach the manager either through a crossbeam [`Receiver`] fed by
/// the platform pump or directly through [`push_event`](Self::push_event).
/// They only become visible to queries after [`update`](InputService::update).
pub struct InputManager {
    receiver: Option<Receiver<InputEvent>>,
    pending: Vec<InputEvent>,
    current: InputSnapshot,
    previous: InputSnapshot,
    wheel: i32,
}

impl InputManager {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with no platform feed.
    pub fn new() -> Self {
        Self {
            receiver: None,
            pending: Vec::with_capacity(32),
            current: InputSnapshot::new(),
            previous: InputSnapshot::new(),
            wheel: 0,
        }
    }

    /// Creates a manager that drains `receiver` on every update.
    pub fn with_receiver(receiver: Receiver<InputEvent>) -> Self {
        Self {
            receiver: Some(receiver),
            ..Self::new()
        }
    }

    //--- Feeding ----------------------------------------------------------

    /// Queues an event for the next `update()`.
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    //--- Snapshots --------------------------------------------------------

    /// State resolved by the last `update()`.
    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    /// State captured by the last `update_prev_input()`.
    pub fn previous(&self) -> &InputSnapshot {
        &self.previous
    }

    //--- Internal Helpers -------------------------------------------------

    fn drain_receiver(&mut self) {
        let Some(receiver) = &self.receiver else {
            return;
        };

        loop {
            match receiver.try_recv() {
                Ok(event) => self.pending.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "input", "Platform input feed disconnected");
                    self.receiver = None;
                    break;
                }
            }
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

//=== Service Implementation ==============================================

impl InputService for InputManager {
    fn update(&mut self) {
        self.drain_receiver();

        if !self.pending.is_empty() {
            trace!(target: "input", "Applying {} input events", self.pending.len());
            self.current.apply_all(&self.pending);
            self.pending.clear();
        }
    }

    fn update_prev_input(&mut self) {
        self.previous.clone_from(&self.current);
        self.wheel = 0;
    }

    fn mouse_wheel(&mut self, delta: i32) {
        self.wheel = self.wheel.saturating_add(delta);
    }

    fn key_down(&self, key: KeyCode) -> bool {
        self.current.is_key_down(key)
    }

    fn key_pressed(&self, key: KeyCode) -> bool {
        self.current.is_key_down(key) && !self.previous.is_key_down(key)
    }

    fn key_released(&self, key: KeyCode) -> bool {
        !self.current.is_key_down(key) && self.previous.is_key_down(key)
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.current.is_button_down(button)
    }

    fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.current.is_button_down(button) && !self.previous.is_button_down(button)
    }

    fn mouse_button_released(&self, button: MouseButton) -> bool {
        !self.current.is_button_down(button) && self.previous.is_button_down(button)
    }

    fn mouse_position(&self) -> (f32, f32) {
        self.current.mouse_position()
    }

    fn wheel_delta(&self) -> i32 {
        self.wheel
    }

    fn modifiers(&self) -> Modifiers {
        self.current.modifiers()
    }
}

impl Subsystem for InputManager {
    fn name(&self) -> &'static str {
        "input"
    }

    fn release(&mut self) {
        self.receiver = None;
        self.pending.clear();
        self.current = InputSnapshot::new();
        self.previous = InputSnapshot::new();
        self.wheel = 0;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
