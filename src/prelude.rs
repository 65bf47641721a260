//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use arcade_framework::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Run loop
pub use crate::engine::{GameManager, GameManagerBuilder, ManagerSlot};

// Configuration and logging
pub use crate::config::{FrameworkConfig, StepPolicy};
pub use crate::logging::init_logging;

// Platform
pub use crate::core::platform_bridge::{ChannelEventSource, EventSource, PlatformEvent};
pub use crate::platform::{PlatformError, WinitEventPump};

// Subsystem contracts
pub use crate::core::{
    AssetService, AudioService, CameraService, GraphicsBackend, InputService, PhysicsService,
    PlatformService, ScreenService, Subsystem,
};

// Default subsystems
pub use crate::core::{
    AssetManager, AudioManager, Camera, InputManager, PhysicsManager, PlatformManager,
    ScreenManager, Timer,
};

// Screens
pub use crate::core::{FrameContext, RenderContext, Screen, ScreenKey, ScreenTransition, TransitionQueue};

// Input
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

// Value types
pub use crate::core::{
    Aabb, BodyId, Clock, CollisionFlags, CollisionLayer, Color, ManualClock, MusicState, Rect,
    RenderMode, SystemClock, Vec2,
};
