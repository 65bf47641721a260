//=========================================================================
// Core Subsystems
//
// Everything the GameManager owns and drives, plus the contracts it drives
// them through.
//
// Responsibilities:
// - Define one service trait per subsystem (`InputService`, ...)
// - Provide the default implementation of each service
// - Define the borrowed contexts screens receive each phase
// - Define the platform event contract polled by the run loop
//
// Notes:
// Nothing in here is global. Each subsystem is a plain value constructed by
// `GameManagerBuilder` and released by `GameManager` on drop.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod audio;
pub mod camera;
pub mod context;
pub mod graphics;
pub mod input;
pub mod physics;
pub mod platform_bridge;
pub mod platform_manager;
pub mod screen;
pub mod timer;

mod subsystem;

//=== Public API ==========================================================

pub use assets::{AssetError, AssetManager, AssetService};
pub use audio::{AudioManager, AudioService, MusicState, DEFAULT_SFX_CHANNELS};
pub use camera::{Camera, CameraService, Vec2};
pub use context::{FrameContext, RenderContext};
pub use graphics::{Color, GraphicsBackend, NullGraphics, Rect, RenderMode, SoftwareGraphics};
pub use input::{InputManager, InputService};
pub use physics::{
    Aabb, BodyId, CollisionFlags, CollisionLayer, CollisionMatrix, Contact, PhysicsManager,
    PhysicsService,
};
pub use platform_bridge::{ChannelEventSource, EventSource, PlatformEvent};
pub use platform_manager::{PlatformManager, PlatformService};
pub use screen::{Screen, ScreenKey, ScreenManager, ScreenService, ScreenTransition, TransitionQueue};
pub use subsystem::Subsystem;
pub use timer::{Clock, ManualClock, SystemClock, Timer};
