//=========================================================================
// Frame Contexts
//=========================================================================
//
// Borrowed views of the GameManager's subsystems handed to screens.
//
// Architecture:
//   GameManager::update() → FrameContext  → ScreenService::update()
//   GameManager::render() → RenderContext → ScreenService::render()
//
// Screens never own or look up subsystems; whatever they may touch during
// a phase is lent to them for that call only.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::assets::AssetService;
use super::audio::AudioService;
use super::camera::CameraService;
use super::graphics::GraphicsBackend;
use super::input::InputService;
use super::physics::PhysicsService;
use super::platform_manager::PlatformService;
use super::timer::Timer;

//=== FrameContext ========================================================

/// Subsystems available during the update phase.
///
/// Input is read-only here: it was already resolved for this frame.
pub struct FrameContext<'a> {
    pub input: &'a dyn InputService,
    pub physics: &'a mut dyn PhysicsService,
    pub camera: &'a mut dyn CameraService,
    pub audio: &'a mut dyn AudioService,
    pub assets: &'a mut dyn AssetService,
    pub platform: &'a dyn PlatformService,
    pub timer: &'a Timer,
    quit_requested: bool,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        input: &'a dyn InputService,
        physics: &'a mut dyn PhysicsService,
        camera: &'a mut dyn CameraService,
        audio: &'a mut dyn AudioService,
        assets: &'a mut dyn AssetService,
        platform: &'a dyn PlatformService,
        timer: &'a Timer,
    ) -> Self {
        Self {
            input,
            physics,
            camera,
            audio,
            assets,
            platform,
            timer,
            quit_requested: false,
        }
    }

    /// Asks the GameManager to stop after the current iteration.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Seconds elapsed since the previous step.
    pub fn delta_secs(&self) -> f32 {
        self.timer.delta_secs()
    }
}

//=== RenderContext =======================================================

/// Subsystems available during the render phase.
pub struct RenderContext<'a> {
    pub graphics: &'a mut dyn GraphicsBackend,
    pub camera: &'a dyn CameraService,
}

impl<'a> RenderContext<'a> {
    pub fn new(graphics: &'a mut dyn GraphicsBackend, camera: &'a dyn CameraService) -> Self {
        Self { graphics, camera }
    }
}
