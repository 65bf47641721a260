//=========================================================================
// Subsystem Lifecycle
//=========================================================================
//
// Lifecycle contract shared by every subsystem owned by the GameManager.
//
// Lifecycle:
//   construct (builder, fixed order) → per-frame calls → release() → drop
//
// The GameManager is the only caller of `release()`. It calls it exactly
// once per subsystem, in the teardown order documented on `GameManager`.
//
//=========================================================================

//=== Subsystem ===========================================================

/// Lifecycle hooks common to all subsystems.
///
/// Construction acquires whatever the subsystem needs. `release()` gives it
/// back while the other subsystems are still alive.
pub trait Subsystem {
    /// Short, stable identifier used in log output.
    fn name(&self) -> &'static str;

    /// Releases held resources. Called once, during GameManager teardown.
    fn release(&mut self) {}
}
