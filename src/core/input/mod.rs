//=========================================================================
// Input System
//
// High-level interface for input handling within the framework.
//
// Responsibilities:
// - Define the `InputService` contract used by the GameManager and screens
// - Provide the default `InputManager` implementation
// - Expose engine-side input types (`KeyCode`, `MouseButton`, ...)
//
// Notes:
// The GameManager drives three operations per frame: `mouse_wheel()` while
// draining platform events, `update()` at the start of a step and
// `update_prev_input()` at the start of the late update. Everything else
// is read-only and meant for screens.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod input_manager;
mod state_tracker;

//=== Public Exports ======================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use input_manager::InputManager;
pub use state_tracker::InputSnapshot;

//=== Internal Imports ====================================================

use crate::core::Subsystem;

//=== InputService ========================================================

/// Per-frame input contract.
pub trait InputService: Subsystem {
    //--- Driven by the GameManager ----------------------------------------

    /// Resolves pending raw events into the current frame state.
    fn update(&mut self);

    /// Snapshots the current state as "previous" and clears per-frame
    /// accumulators such as the wheel delta.
    fn update_prev_input(&mut self);

    /// Records discrete wheel motion. Called once per wheel event, whether
    /// or not a step runs this iteration.
    fn mouse_wheel(&mut self, delta: i32);

    //--- Queries ----------------------------------------------------------

    fn key_down(&self, key: KeyCode) -> bool;

    /// Down this frame, up the previous one.
    fn key_pressed(&self, key: KeyCode) -> bool;

    /// Up this frame, down the previous one.
    fn key_released(&self, key: KeyCode) -> bool;

    fn mouse_button_down(&self, button: MouseButton) -> bool;
    fn mouse_button_pressed(&self, button: MouseButton) -> bool;
    fn mouse_button_released(&self, button: MouseButton) -> bool;

    /// Cursor position in window pixels.
    fn mouse_position(&self) -> (f32, f32);

    /// Wheel motion accumulated since the last `update_prev_input()`.
    fn wheel_delta(&self) -> i32;

    fn modifiers(&self) -> Modifiers;
}
