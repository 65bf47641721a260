//=========================================================================
// Camera
//=========================================================================
//
// 2D follow camera.
//
// The camera position is the world coordinate shown at the top-left corner
// of the viewport. A target, if set, is a world point the camera keeps
// centred, approached by `follow_smoothing` each late update.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::Subsystem;

//=== Vec2 ================================================================

/// 2D vector in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        Vec2::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }
}

//=== CameraService =======================================================

/// Camera contract used by the GameManager and screens.
pub trait CameraService: Subsystem {
    /// Advances the follow behaviour by one step.
    fn update(&mut self);

    /// World coordinate at the top-left of the viewport.
    fn position(&self) -> Vec2;

    fn set_position(&mut self, position: Vec2);

    /// World point to keep centred, or `None` to stop following.
    fn set_target(&mut self, target: Option<Vec2>);

    fn target(&self) -> Option<Vec2>;

    /// Viewport size in pixels.
    fn viewport(&self) -> (u32, u32);

    /// Converts a world point to viewport pixels.
    fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let position = self.position();
        Vec2::new(world.x - position.x, world.y - position.y)
    }
}

//=== Camera ==============================================================

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec2,
    target: Option<Vec2>,
    viewport: (u32, u32),
    smoothing: f32,
}

impl Camera {
    /// Creates a camera at the origin.
    ///
    /// `smoothing` is clamped to `(0, 1]`; `1.0` snaps to the target.
    pub fn new(viewport: (u32, u32), smoothing: f32) -> Self {
        let smoothing = if smoothing.is_finite() && smoothing > 0.0 {
            smoothing.min(1.0)
        } else {
            1.0
        };

        Self {
            position: Vec2::ZERO,
            target: None,
            viewport,
            smoothing,
        }
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    /// Position that centres `target` in the viewport.
    fn centred_on(&self, target: Vec2) -> Vec2 {
        Vec2::new(
            target.x - self.viewport.0 as f32 * 0.5,
            target.y - self.viewport.1 as f32 * 0.5,
        )
    }
}

impl CameraService for Camera {
    fn update(&mut self) {
        let Some(target) = self.target else {
            return;
        };

        let goal = self.centred_on(target);
        self.position = if self.smoothing >= 1.0 {
            goal
        } else {
            self.position.lerp(goal, self.smoothing)
        };
        trace!(target: "camera", "Camera at {:?}", self.position);
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn set_target(&mut self, target: Option<Vec2>) {
        self.target = target;
    }

    fn target(&self) -> Option<Vec2> {
        self.target
    }

    fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}

impl Subsystem for Camera {
    fn name(&self) -> &'static str {
        "camera"
    }

    fn release(&mut self) {
        self.target = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
