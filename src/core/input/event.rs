//=========================================================================
// Input Event Types
//
// Engine-side representation of keyboard and mouse input.
//
// The platform layer (winit) converts its own events into these types and
// hands them to the InputManager. Nothing outside `platform` ever sees a
// winit type.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)  ── crossbeam channel ──┐
//                                                     ↓
//                                     InputManager::update()
//                                                     ↓
//                                       InputSnapshot (current frame)
// ```
//
// Mouse wheel motion is NOT an InputEvent: it is a platform event routed by
// the GameManager directly to `InputService::mouse_wheel`.
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Side buttons, thumb buttons, macro keys.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier (location, not character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    /// Keys the platform reports but this enum does not name.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Left/right variants are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Alt only.
    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };

    /// Returns `true` if any modifier is held.
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

//=== InputEvent ==========================================================

/// Low-level input event delivered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown { key: KeyCode, modifiers: Modifiers },

    /// Key released.
    KeyUp { key: KeyCode, modifiers: Modifiers },

    /// Mouse button pressed.
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },

    /// Mouse button released.
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor moved, in window pixels with a top-left origin.
    MouseMoved { x: f32, y: f32 },

    /// Keyboard focus lost; every held key and button is considered released.
    FocusLost,
}

impl InputEvent {
    /// Modifier state carried by the event, if any.
    pub fn modifiers(&self) -> Option<Modifiers> {
        match *self {
            Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. } => Some(modifiers),
            Self::MouseMoved { .. } | Self::FocusLost => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
