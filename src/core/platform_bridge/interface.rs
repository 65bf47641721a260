//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core contract: the events the run loop reacts to and the
// source it polls them from.
//
//=========================================================================

//=== PlatformEvent =======================================================

/// Event polled by the GameManager once per loop iteration.
///
/// Keyboard and mouse state reach the InputManager through their own feed,
/// not through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Window close or OS shutdown request.
    Quit,

    /// Discrete vertical wheel motion (positive = away from the user).
    MouseWheel { y: i32 },

    /// Anything else; ignored by the run loop.
    Other,
}

//=== EventSource =========================================================

/// Non-blocking supplier of [`PlatformEvent`]s.
pub trait EventSource {
    /// Returns the next pending event, or `None` once the queue is empty
    /// for this iteration. Never blocks.
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    /// Shuts the windowing layer down. Called once, after every subsystem
    /// has been released.
    fn shutdown(&mut self) {}
}
