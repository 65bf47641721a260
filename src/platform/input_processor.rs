//=========================================================================
// Input Processor
//=========================================================================
//
// Translates winit window events into framework events.
//
// Architecture:
// ```text
//   WindowEvent ─→ InputProcessor::translate() ─┬─→ Translated::Platform → run loop
//                                               ├─→ Translated::Input    → InputManager feed
//                                               └─→ Translated::Nothing
// ```
//
// Modifier state is sticky: `ModifiersChanged` updates the cached state and
// every later key or button event carries it. Unmapped keys are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};
use crate::core::platform_bridge::PlatformEvent;

//=== Translated ==========================================================

/// Where a translated window event is routed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Translated {
    /// Polled by the run loop.
    Platform(PlatformEvent),

    /// Sent to the InputManager feed.
    Input(InputEvent),

    /// Consumed here (modifier updates, unmapped keys, zero wheel motion).
    Nothing,
}

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            modifiers: Modifiers::NONE,
        }
    }

    pub(crate) fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    //--- Translation ------------------------------------------------------

    pub(crate) fn translate(&mut self, event: &WindowEvent) -> Translated {
        match event {
            WindowEvent::CloseRequested => Translated::Platform(PlatformEvent::Quit),

            WindowEvent::MouseWheel { delta, .. } => match wheel_steps(*delta) {
                0 => Translated::Nothing,
                y => Translated::Platform(PlatformEvent::MouseWheel { y }),
            },

            WindowEvent::ModifiersChanged(state) => {
                self.update_modifiers(state.state());
                Translated::Nothing
            }

            WindowEvent::KeyboardInput { event, .. } => match self.key_event(event) {
                Some(input) => Translated::Input(input),
                None => Translated::Nothing,
            },

            WindowEvent::MouseInput { state, button, .. } => {
                Translated::Input(self.mouse_button(*button, *state))
            }

            WindowEvent::CursorMoved { position, .. } => Translated::Input(InputEvent::MouseMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),

            WindowEvent::Focused(false) => {
                self.modifiers = Modifiers::NONE;
                Translated::Input(InputEvent::FocusLost)
            }

            _ => Translated::Platform(PlatformEvent::Other),
        }
    }

    fn key_event(&self, event: &KeyEvent) -> Option<InputEvent> {
        let key = match event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };
        if key == KeyCode::Unidentified || event.repeat {
            return None;
        }
        Some(self.key_input(key, event.state))
    }

    fn key_input(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        }
    }

    fn mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }
}

/// Whole wheel steps in a scroll delta; positive is away from the user.
///
/// Line deltas are rounded. Pixel deltas (touchpads) count as one step in
/// their direction.
pub(crate) fn wheel_steps(delta: MouseScrollDelta) -> i32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y.round() as i32,
        MouseScrollDelta::PixelDelta(position) => {
            if position.y > 0.0 {
                1
            } else if position.y < 0.0 {
                -1
            } else {
                0
            }
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            W::Digit0 => KeyCode::Digit0,
            W::Digit1 => KeyCode::Digit1,
            W::Digit2 => KeyCode::Digit2,
            W::Digit3 => KeyCode::Digit3,
            W::Digit4 => KeyCode::Digit4,
            W::Digit5 => KeyCode::Digit5,
            W::Digit6 => KeyCode::Digit6,
            W::Digit7 => KeyCode::Digit7,
            W::Digit8 => KeyCode::Digit8,
            W::Digit9 => KeyCode::Digit9,

            W::KeyA => KeyCode::KeyA,
            W::KeyB => KeyCode::KeyB,
            W::KeyC => KeyCode::KeyC,
            W::KeyD => KeyCode::KeyD,
            W::KeyE => KeyCode::KeyE,
            W::KeyF => KeyCode::KeyF,
            W::KeyG => KeyCode::KeyG,
            W::KeyH => KeyCode::KeyH,
            W::KeyI => KeyCode::KeyI,
            W::KeyJ => KeyCode::KeyJ,
            W::KeyK => KeyCode::KeyK,
            W::KeyL => KeyCode::KeyL,
            W::KeyM => KeyCode::KeyM,
            W::KeyN => KeyCode::KeyN,
            W::KeyO => KeyCode::KeyO,
            W::KeyP => KeyCode::KeyP,
            W::KeyQ => KeyCode::KeyQ,
            W::KeyR => KeyCode::KeyR,
            W::KeyS => KeyCode::KeyS,
            W::KeyT => KeyCode::KeyT,
            W::KeyU => KeyCode::KeyU,
            W::KeyV => KeyCode::KeyV,
            W::KeyW => KeyCode::KeyW,
            W::KeyX => KeyCode::KeyX,
            W::KeyY => KeyCode::KeyY,
            W::KeyZ => KeyCode::KeyZ,

            W::ArrowUp => KeyCode::ArrowUp,
            W::ArrowDown => KeyCode::ArrowDown,
            W::ArrowLeft => KeyCode::ArrowLeft,
            W::ArrowRight => KeyCode::ArrowRight,

            W::Space => KeyCode::Space,
            W::Enter => KeyCode::Enter,
            W::Escape => KeyCode::Escape,
            W::Tab => KeyCode::Tab,
            W::Backspace => KeyCode::Backspace,
            W::Delete => KeyCode::Delete,
            W::ShiftLeft => KeyCode::ShiftLeft,
            W::ShiftRight => KeyCode::ShiftRight,
            W::ControlLeft => KeyCode::ControlLeft,
            W::ControlRight => KeyCode::ControlRight,

            _ => KeyCode::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
