//=========================================================================
// Screen System
//=========================================================================
//
// Stack of game screens (title, gameplay, pause, ...).
//
// Architecture:
//   ScreenManager
//     ├─ screens: HashMap<K, Box<dyn Screen<K>>>
//     └─ stack: Vec<K>
//
// Flow:
//   update() → collect_active() → Screen::update() → apply transitions
//   render() → collect_active() → Screen::render() (bottom → top)
//
//=========================================================================

//=== Module Declarations =================================================

mod screen_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use screen_manager::{ScreenKey, ScreenManager, ScreenTransition};
pub use transition_queue::TransitionQueue;

//=== Internal Dependencies ===============================================

use crate::core::context::{FrameContext, RenderContext};
use crate::core::Subsystem;

//=== ScreenService =======================================================

/// Per-frame contract the GameManager drives.
pub trait ScreenService: Subsystem {
    fn update(&mut self, ctx: &mut FrameContext<'_>);
    fn render(&mut self, ctx: &mut RenderContext<'_>);
}

//=== Screen Trait ========================================================

/// One screen on the stack.
///
/// Only `update()` is required.
///
/// ```rust
/// # use arcade_framework::prelude::*;
/// struct Title;
///
/// impl Screen<&'static str> for Title {
///     fn update(&mut self, ctx: &mut FrameContext, transitions: &mut TransitionQueue<&'static str>) {
///         if ctx.input.key_pressed(KeyCode::Enter) {
///             transitions.push(ScreenTransition::Replace("title", "play"));
///         }
///     }
/// }
/// ```
pub trait Screen<K: ScreenKey> {
    /// Called when the screen enters the stack.
    fn on_enter(&mut self, _ctx: &mut FrameContext<'_>) {}

    /// Called when the screen leaves the stack through a transition.
    fn on_exit(&mut self, _ctx: &mut FrameContext<'_>) {}

    /// Called every step while the screen is active.
    fn update(&mut self, ctx: &mut FrameContext<'_>, transitions: &mut TransitionQueue<K>);

    /// Called every step while the screen is active, after all updates.
    fn render(&mut self, _ctx: &mut RenderContext<'_>) {}

    /// Transparent screens (pause overlays) let the screen below keep
    /// updating and rendering.
    fn is_transparent(&self) -> bool {
        false
    }
}
