//=========================================================================
// Test Support
//=========================================================================
//
// Shared doubles for unit tests.
//
// - `CallLog`: ordered record of calls, shared between doubles
// - `Recorder`: one double that can stand in for any subsystem
// - `RecordingClock`: clock that logs the timer's creation and release
// - `ScriptedEvents`: event source that replays per-iteration batches and
//   drives a `ManualClock`
// - `SubsystemHarness`: real default subsystems for building contexts
//
//=========================================================================

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::core::assets::{AssetError, AssetManager, AssetService};
use crate::core::audio::{AudioManager, AudioService, MusicState};
use crate::core::camera::{Camera, CameraService, Vec2};
use crate::core::context::{FrameContext, RenderContext};
use crate::core::graphics::{Color, GraphicsBackend, NullGraphics, Rect};
use crate::core::input::{InputManager, InputService, KeyCode, Modifiers, MouseButton};
use crate::core::physics::{
    Aabb, BodyId, CollisionFlags, CollisionLayer, Contact, PhysicsManager, PhysicsService,
};
use crate::core::platform_bridge::{EventSource, PlatformEvent};
use crate::core::platform_manager::{PlatformManager, PlatformService};
use crate::core::screen::ScreenService;
use crate::core::timer::{Clock, ManualClock, Timer};
use crate::core::Subsystem;

//=== CallLog =============================================================

#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    /// Returns and clears everything recorded so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

//=== Recorder ============================================================

/// Logs `<name>.<call>` for every lifecycle call it receives.
///
/// Queries answer with neutral values. Collision masks and bodies go to a
/// real `PhysicsManager` so layer rules can be read back.
pub struct Recorder {
    name: &'static str,
    log: CallLog,
    initialized: bool,
    quit_after: Option<u32>,
    updates: u32,
    frames: u64,
    physics: PhysicsManager,
    music: MusicState,
    base_path: PathBuf,
}

impl Recorder {
    pub fn new(name: &'static str, log: &CallLog) -> Self {
        log.record(format!("{name}.new"));
        Self {
            name,
            log: log.clone(),
            initialized: true,
            quit_after: None,
            updates: 0,
            frames: 0,
            physics: PhysicsManager::new(),
            music: MusicState::Stopped,
            base_path: PathBuf::from("."),
        }
    }

    /// Reports a failed graphics initialization.
    pub fn uninitialized(mut self) -> Self {
        self.initialized = false;
        self
    }

    /// As a screen service, requests quit on the `n`th update.
    pub fn quit_after(mut self, n: u32) -> Self {
        self.quit_after = Some(n);
        self
    }

    fn record(&self, call: &str) {
        self.log.record(format!("{}.{}", self.name, call));
    }
}

impl Subsystem for Recorder {
    fn name(&self) -> &'static str {
        self.name
    }

    fn release(&mut self) {
        self.record("release");
    }
}

impl GraphicsBackend for Recorder {
    fn initialized(&self) -> bool {
        self.initialized
    }

    fn clear_back_buffer(&mut self) {
        self.record("clear_back_buffer");
    }

    fn draw_rect(&mut self, _rect: Rect, _color: Color) {}

    fn render(&mut self) {
        self.frames += 1;
        self.record("render");
    }

    fn size(&self) -> (u32, u32) {
        (0, 0)
    }

    fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl InputService for Recorder {
    fn update(&mut self) {
        self.record("update");
    }

    fn update_prev_input(&mut self) {
        self.record("update_prev_input");
    }

    fn mouse_wheel(&mut self, delta: i32) {
        self.record(&format!("mouse_wheel({delta})"));
    }

    fn key_down(&self, _key: KeyCode) -> bool {
        false
    }

    fn key_pressed(&self, _key: KeyCode) -> bool {
        false
    }

    fn key_released(&self, _key: KeyCode) -> bool {
        false
    }

    fn mouse_button_down(&self, _button: MouseButton) -> bool {
        false
    }

    fn mouse_button_pressed(&self, _button: MouseButton) -> bool {
        false
    }

    fn mouse_button_released(&self, _button: MouseButton) -> bool {
        false
    }

    fn mouse_position(&self) -> (f32, f32) {
        (0.0, 0.0)
    }

    fn wheel_delta(&self) -> i32 {
        0
    }

    fn modifiers(&self) -> Modifiers {
        Modifiers::default()
    }
}

impl PhysicsService for Recorder {
    fn set_layer_collision_mask(&mut self, layer: CollisionLayer, mask: CollisionFlags) {
        self.record(&format!("set_layer_collision_mask({layer:?})"));
        self.physics.set_layer_collision_mask(layer, mask);
    }

    fn layer_collision_mask(&self, layer: CollisionLayer) -> CollisionFlags {
        self.physics.layer_collision_mask(layer)
    }

    fn update(&mut self) {
        self.record("update");
    }

    fn add_body(&mut self, layer: CollisionLayer, bounds: Aabb) -> BodyId {
        self.physics.add_body(layer, bounds)
    }

    fn remove_body(&mut self, id: BodyId) -> bool {
        self.physics.remove_body(id)
    }

    fn set_body_bounds(&mut self, id: BodyId, bounds: Aabb) -> bool {
        self.physics.set_body_bounds(id, bounds)
    }

    fn body_bounds(&self, id: BodyId) -> Option<Aabb> {
        self.physics.body_bounds(id)
    }

    fn contacts(&self) -> &[Contact] {
        self.physics.contacts()
    }
}

impl CameraService for Recorder {
    fn update(&mut self) {
        self.record("update");
    }

    fn position(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn set_position(&mut self, _position: Vec2) {}

    fn set_target(&mut self, _target: Option<Vec2>) {}

    fn target(&self) -> Option<Vec2> {
        None
    }

    fn viewport(&self) -> (u32, u32) {
        (0, 0)
    }
}

impl ScreenService for Recorder {
    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.updates += 1;
        self.record("update");
        if self.quit_after == Some(self.updates) {
            ctx.request_quit();
        }
    }

    fn render(&mut self, _ctx: &mut RenderContext<'_>) {
        self.record("render");
    }
}

impl AssetService for Recorder {
    fn load(&mut self, path: &str) -> Result<Arc<[u8]>, AssetError> {
        Err(AssetError::OutsideRoot(PathBuf::from(path)))
    }

    fn unload(&mut self, _path: &str) -> bool {
        false
    }

    fn loaded_count(&self) -> usize {
        0
    }
}

impl AudioService for Recorder {
    fn play_music(&mut self, _track: &str, _loops: Option<u32>) {}

    fn pause_music(&mut self) {}

    fn resume_music(&mut self) {}

    fn stop_music(&mut self) {}

    fn music_state(&self) -> &MusicState {
        &self.music
    }

    fn play_sfx(&mut self, _sound: &str) -> usize {
        0
    }

    fn stop_sfx(&mut self, _channel: usize) {}

    fn set_music_volume(&mut self, _volume: f32) {}

    fn set_sfx_volume(&mut self, _volume: f32) {}

    fn music_volume(&self) -> f32 {
        0.0
    }

    fn sfx_volume(&self) -> f32 {
        0.0
    }
}

impl PlatformService for Recorder {
    fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn os(&self) -> &'static str {
        "test"
    }
}

//=== RecordingClock ======================================================

/// `ManualClock` that logs `timer.new` on its first sample and
/// `timer.release` when stopped.
///
/// `Timer::new` samples its clock once, so the first sample marks where
/// the timer was built.
pub struct RecordingClock {
    clock: ManualClock,
    log: CallLog,
    sampled: Cell<bool>,
}

impl RecordingClock {
    pub fn new(clock: ManualClock, log: &CallLog) -> Self {
        Self {
            clock,
            log: log.clone(),
            sampled: Cell::new(false),
        }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> Duration {
        if !self.sampled.replace(true) {
            self.log.record("timer.new");
        }
        self.clock.now()
    }

    fn stop(&mut self) {
        self.log.record("timer.release");
    }
}

//=== ScriptedEvents ======================================================

/// Events delivered during one loop iteration, and the time that passes
/// while that iteration runs.
///
/// The time is added after `timer.update()` has sampled the clock. If the
/// iteration steps, the timer reset that follows absorbs it, as it would
/// absorb time spent stepping in a real run.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    events: Vec<PlatformEvent>,
    elapsed: Duration,
}

impl Batch {
    /// An iteration with no events during which `elapsed` passes.
    pub fn advance(elapsed: Duration) -> Self {
        Self {
            events: Vec::new(),
            elapsed,
        }
    }

    /// An iteration delivering `events`, with no time passing.
    pub fn events(events: Vec<PlatformEvent>) -> Self {
        Self {
            events,
            elapsed: Duration::ZERO,
        }
    }
}

#[derive(Default)]
struct Script {
    pending: VecDeque<Batch>,
    current: Option<(VecDeque<PlatformEvent>, Duration)>,
    quit_sent: bool,
}

/// Replays one [`Batch`] per drain.
///
/// The drain that ends a batch advances the clock. The elapsed time is
/// seen by the next iteration's `timer.update()` unless the current
/// iteration steps and resets the timer. Once the script runs out the
/// source sends `Quit`.
#[derive(Clone)]
pub struct ScriptedEvents {
    script: Rc<RefCell<Script>>,
    clock: ManualClock,
    log: CallLog,
    drains: Rc<Cell<u32>>,
}

impl ScriptedEvents {
    pub fn new(batches: Vec<Batch>, clock: ManualClock, log: &CallLog) -> Self {
        Self {
            script: Rc::new(RefCell::new(Script {
                pending: batches.into(),
                ..Script::default()
            })),
            clock,
            log: log.clone(),
            drains: Rc::new(Cell::new(0)),
        }
    }

    /// Batches not yet started.
    pub fn remaining(&self) -> usize {
        self.script.borrow().pending.len()
    }

    /// Drains completed, i.e. polls that returned `None`.
    pub fn drains(&self) -> u32 {
        self.drains.get()
    }

    fn end_drain(&self) -> Option<PlatformEvent> {
        self.drains.set(self.drains.get() + 1);
        self.log.record("events.drained");
        None
    }
}

impl EventSource for ScriptedEvents {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        let mut script = self.script.borrow_mut();

        if script.current.is_none() {
            let next_batch = script.pending.pop_front();
            match next_batch {
                Some(batch) => script.current = Some((batch.events.into(), batch.elapsed)),
                None if !script.quit_sent => {
                    script.quit_sent = true;
                    return Some(PlatformEvent::Quit);
                }
                None => {
                    drop(script);
                    return self.end_drain();
                }
            }
        }

        let next = script.current.as_mut().and_then(|(events, _)| events.pop_front());
        match next {
            Some(event) => Some(event),
            None => {
                if let Some((_, elapsed)) = script.current.take() {
                    self.clock.advance(elapsed);
                }
                drop(script);
                self.end_drain()
            }
        }
    }

    fn shutdown(&mut self) {
        self.log.record("events.shutdown");
    }
}

//=== SubsystemHarness ====================================================

/// Real default subsystems, for code that needs a `FrameContext` or a
/// `RenderContext` outside the run loop.
pub struct SubsystemHarness {
    pub clock: ManualClock,
    pub input: InputManager,
    pub physics: PhysicsManager,
    pub camera: Camera,
    pub audio: AudioManager,
    pub assets: AssetManager,
    pub platform: PlatformManager,
    pub timer: Timer,
    pub graphics: NullGraphics,
}

impl SubsystemHarness {
    pub fn new() -> Self {
        let clock = ManualClock::new();
        Self {
            timer: Timer::new(Box::new(clock.clone())),
            clock,
            input: InputManager::new(),
            physics: PhysicsManager::new(),
            camera: Camera::new((320, 240), 1.0),
            audio: AudioManager::new(1.0, 1.0),
            assets: AssetManager::new("test-assets"),
            platform: PlatformManager::with_base_path("."),
            graphics: NullGraphics::new(320, 240),
        }
    }

    pub fn frame(&mut self) -> FrameContext<'_> {
        FrameContext::new(
            &self.input,
            &mut self.physics,
            &mut self.camera,
            &mut self.audio,
            &mut self.assets,
            &self.platform,
            &self.timer,
        )
    }

    pub fn render(&mut self) -> RenderContext<'_> {
        RenderContext::new(&mut self.graphics, &self.camera)
    }
}
