//=========================================================================
// Demo Screen
//=========================================================================
//
// A friendly box moved with the arrow keys over a row of platforms. The
// camera follows the box; Escape quits.
//
//=========================================================================

use arcade_framework::prelude::*;
use log::info;

//=== Keys ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoScreen {
    Play,
}

impl ScreenKey for DemoScreen {}

//=== PlayScreen ==========================================================

const PLAYER_SPEED: f32 = 240.0;
const PLAYER_SIZE: f32 = 32.0;

const PLATFORMS: [Aabb; 4] = [
    Aabb::new(0.0, 400.0, 320.0, 24.0),
    Aabb::new(380.0, 340.0, 200.0, 24.0),
    Aabb::new(640.0, 280.0, 240.0, 24.0),
    Aabb::new(-400.0, 460.0, 300.0, 24.0),
];

const PLATFORM_COLOR: Color = Color::rgb(90, 110, 140);
const PLAYER_COLOR: Color = Color::rgb(90, 200, 120);
const PLAYER_TOUCHING_COLOR: Color = Color::rgb(240, 200, 80);

#[derive(Default)]
pub struct PlayScreen {
    player: Option<BodyId>,
    platforms: Vec<BodyId>,
    bounds: Aabb,
    touching: bool,
}

impl PlayScreen {
    pub fn new() -> Self {
        Self {
            bounds: Aabb::new(100.0, 300.0, PLAYER_SIZE, PLAYER_SIZE),
            ..Self::default()
        }
    }

    fn direction(input: &dyn InputService) -> (f32, f32) {
        let axis = |neg: KeyCode, pos: KeyCode| {
            let mut value = 0.0;
            if input.key_down(neg) {
                value -= 1.0;
            }
            if input.key_down(pos) {
                value += 1.0;
            }
            value
        };
        (
            axis(KeyCode::ArrowLeft, KeyCode::ArrowRight),
            axis(KeyCode::ArrowUp, KeyCode::ArrowDown),
        )
    }
}

impl Screen<DemoScreen> for PlayScreen {
    fn on_enter(&mut self, ctx: &mut FrameContext<'_>) {
        self.platforms = PLATFORMS
            .iter()
            .map(|bounds| ctx.physics.add_body(CollisionLayer::Platforms, *bounds))
            .collect();
        self.player = Some(ctx.physics.add_body(CollisionLayer::Friendly, self.bounds));

        let (cx, cy) = self.bounds.center();
        ctx.camera.set_target(Some(Vec2::new(cx, cy)));
        ctx.audio.play_music("theme", None);

        info!(target: "screens", "Demo started on {}", ctx.platform.os());
    }

    fn on_exit(&mut self, ctx: &mut FrameContext<'_>) {
        for id in self.platforms.drain(..).chain(self.player.take()) {
            ctx.physics.remove_body(id);
        }
        ctx.audio.stop_music();
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>, _transitions: &mut TransitionQueue<DemoScreen>) {
        if ctx.input.key_pressed(KeyCode::Escape) {
            ctx.request_quit();
            return;
        }

        let Some(player) = self.player else {
            return;
        };

        self.touching = ctx.physics.contacts().iter().any(|contact| contact.involves(player));

        let (dx, dy) = Self::direction(ctx.input);
        let step = PLAYER_SPEED * ctx.delta_secs();
        self.bounds = self.bounds.translated(dx * step, dy * step);
        ctx.physics.set_body_bounds(player, self.bounds);

        let (cx, cy) = self.bounds.center();
        ctx.camera.set_target(Some(Vec2::new(cx, cy)));
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        for platform in PLATFORMS {
            let rect = screen_rect(ctx.camera, platform);
            ctx.graphics.draw_rect(rect, PLATFORM_COLOR);
        }

        let color = if self.touching { PLAYER_TOUCHING_COLOR } else { PLAYER_COLOR };
        let rect = screen_rect(ctx.camera, self.bounds);
        ctx.graphics.draw_rect(rect, color);
    }
}

fn screen_rect(camera: &dyn CameraService, bounds: Aabb) -> Rect {
    let origin = camera.world_to_screen(Vec2::new(bounds.x, bounds.y));
    Rect::new(
        origin.x.round() as i32,
        origin.y.round() as i32,
        bounds.width.round() as u32,
        bounds.height.round() as u32,
    )
}

/// Screen stack for the demo binary.
pub fn screens() -> ScreenManager<DemoScreen> {
    let mut screens = ScreenManager::new();
    screens.register_default(DemoScreen::Play, PlayScreen::new());
    screens
}

//=========================================================================
// Unit Tests
//=========================================================================
