//=========================================================================
// Game Manager
//
// Owns every subsystem and drives the fixed-step run loop.
//
// Architecture:
// ```text
//   GameManagerBuilder ──build()──> GameManager ──run()──> [loop until quit]
//         │                              │
//         ├─ with_clock()                ├─ timer.update()
//         ├─ with_event_source()         ├─ drain EventSource
//         ├─ with_input_feed()           └─ gate: update → late_update → render
//         └─ with_<subsystem>()
//
//   drop(GameManager) ──> release subsystems in fixed order ──> shutdown events
// ```
//
// There is no global instance. `ManagerSlot` gives callers the lazy
// "build on first use, rebuild after release" behaviour with an owned value.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::Receiver;
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::config::{FrameworkConfig, StepPolicy};
use crate::core::assets::{AssetManager, AssetService};
use crate::core::audio::{AudioManager, AudioService};
use crate::core::camera::{Camera, CameraService};
use crate::core::context::{FrameContext, RenderContext};
use crate::core::graphics::{create_graphics, GraphicsBackend};
use crate::core::input::{InputEvent, InputManager, InputService};
use crate::core::physics::{CollisionLayer, CollisionMatrix, PhysicsManager, PhysicsService};
use crate::core::platform_bridge::{EventSource, PlatformEvent};
use crate::core::platform_manager::{PlatformManager, PlatformService};
use crate::core::screen::{ScreenManager, ScreenService};
use crate::core::timer::{Clock, SystemClock, Timer};
use crate::core::Subsystem;

//=== Subsystem Factories =================================================

pub type GraphicsFactory = Box<dyn FnOnce(&FrameworkConfig) -> Box<dyn GraphicsBackend>>;
pub type CameraFactory = Box<dyn FnOnce(&FrameworkConfig) -> Box<dyn CameraService>>;
pub type AssetFactory = Box<dyn FnOnce(&FrameworkConfig) -> Box<dyn AssetService>>;
pub type InputFactory = Box<dyn FnOnce(&FrameworkConfig) -> Box<dyn InputService>>;
pub type AudioFactory = Box<dyn FnOnce(&FrameworkConfig) -> Box<dyn AudioService>>;
pub type ScreenFactory = Box<dyn FnOnce(&FrameworkConfig) -> Box<dyn ScreenService>>;
pub type PhysicsFactory = Box<dyn FnOnce(&FrameworkConfig) -> Box<dyn PhysicsService>>;
pub type PlatformFactory = Box<dyn FnOnce(&FrameworkConfig) -> Box<dyn PlatformService>>;

//=== GameManagerBuilder ==================================================

/// Builder for configuring and constructing a [`GameManager`].
///
/// Every subsystem has a default built from the config. Any of them can be
/// replaced with a factory, which is how games install their screens and
/// how tests install recording doubles.
///
/// # Examples
///
/// ```no_run
/// use arcade_framework::prelude::*;
/// use crossbeam_channel::unbounded;
///
/// let (_events_tx, events_rx) = unbounded();
///
/// let mut manager = GameManagerBuilder::new(FrameworkConfig::default())
///     .with_event_source(ChannelEventSource::new(events_rx))
///     .with_screens(|_config| Box::new(ScreenManager::<&'static str>::new()))
///     .build();
///
/// manager.run();
/// ```
pub struct GameManagerBuilder {
    config: FrameworkConfig,
    clock: Option<Box<dyn Clock>>,
    events: Option<Box<dyn EventSource>>,
    input_feed: Option<Receiver<InputEvent>>,
    graphics: Option<GraphicsFactory>,
    camera: Option<CameraFactory>,
    assets: Option<AssetFactory>,
    input: Option<InputFactory>,
    audio: Option<AudioFactory>,
    screens: Option<ScreenFactory>,
    physics: Option<PhysicsFactory>,
    platform: Option<PlatformFactory>,
}

impl GameManagerBuilder {
    /// Creates a builder that uses the default subsystems for `config`.
    pub fn new(config: FrameworkConfig) -> Self {
        Self {
            config,
            clock: None,
            events: None,
            input_feed: None,
            graphics: None,
            camera: None,
            assets: None,
            input: None,
            audio: None,
            screens: None,
            physics: None,
            platform: None,
        }
    }

    //--- Runtime Wiring ---------------------------------------------------

    /// Time source for the frame timer. Default: [`SystemClock`].
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Platform event source polled by the run loop.
    ///
    /// Without one, the manager has nothing to poll and only stops when a
    /// screen requests it.
    pub fn with_event_source(mut self, events: impl EventSource + 'static) -> Self {
        self.events = Some(Box::new(events));
        self
    }

    /// Raw keyboard/mouse feed for the default InputManager.
    pub fn with_input_feed(mut self, feed: Receiver<InputEvent>) -> Self {
        self.input_feed = Some(feed);
        self
    }

    //--- Subsystem Overrides ----------------------------------------------

    pub fn with_graphics<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&FrameworkConfig) -> Box<dyn GraphicsBackend> + 'static,
    {
        self.graphics = Some(Box::new(factory));
        self
    }

    pub fn with_camera<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&FrameworkConfig) -> Box<dyn CameraService> + 'static,
    {
        self.camera = Some(Box::new(factory));
        self
    }

    pub fn with_assets<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&FrameworkConfig) -> Box<dyn AssetService> + 'static,
    {
        self.assets = Some(Box::new(factory));
        self
    }

    pub fn with_input<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&FrameworkConfig) -> Box<dyn InputService> + 'static,
    {
        self.input = Some(Box::new(factory));
        self
    }

    pub fn with_audio<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&FrameworkConfig) -> Box<dyn AudioService> + 'static,
    {
        self.audio = Some(Box::new(factory));
        self
    }

    /// Installs the game's screens. Default: an empty `ScreenManager`.
    pub fn with_screens<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&FrameworkConfig) -> Box<dyn ScreenService> + 'static,
    {
        self.screens = Some(Box::new(factory));
        self
    }

    pub fn with_physics<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&FrameworkConfig) -> Box<dyn PhysicsService> + 'static,
    {
        self.physics = Some(Box::new(factory));
        self
    }

    pub fn with_platform<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&FrameworkConfig) -> Box<dyn PlatformService> + 'static,
    {
        self.platform = Some(Box::new(factory));
        self
    }

    //--- Construction -----------------------------------------------------

    /// Constructs every subsystem in the fixed order:
    /// graphics, camera, assets, input, audio, timer, screens, physics,
    /// platform.
    ///
    /// If graphics fails to initialize the manager is returned with quit
    /// already set; `run()` will return without stepping.
    pub fn build(self) -> GameManager {
        let config = self.config;
        let mut quit = false;

        info!(
            target: "engine",
            "Building game manager ({} fps, {:?})",
            config.frame.frame_rate, config.frame.step_policy
        );

        //--- Graphics (mode chosen before construction) -----------------
        let graphics = match self.graphics {
            Some(factory) => factory(&config),
            None => create_graphics(
                config.graphics.mode,
                config.window.width,
                config.window.height,
                config.graphics.clear_color,
            ),
        };
        if !graphics.initialized() {
            warn!(target: "engine", "Graphics failed to initialize, the run loop will not start");
            quit = true;
        }

        //--- Remaining subsystems ---------------------------------------
        let camera = match self.camera {
            Some(factory) => factory(&config),
            None => Box::new(Camera::new(
                (config.window.width, config.window.height),
                config.camera.follow_smoothing,
            )),
        };

        let assets = match self.assets {
            Some(factory) => factory(&config),
            None => Box::new(AssetManager::new(config.assets.root.clone())),
        };

        let input_feed = self.input_feed;
        let input = match self.input {
            Some(factory) => factory(&config),
            None => Box::new(match input_feed {
                Some(feed) => InputManager::with_receiver(feed),
                None => InputManager::new(),
            }),
        };

        let audio = match self.audio {
            Some(factory) => factory(&config),
            None => Box::new(AudioManager::new(
                config.audio.music_volume,
                config.audio.sfx_volume,
            )),
        };

        let timer = Timer::new(self.clock.unwrap_or_else(|| Box::new(SystemClock::new())));

        let screens = match self.screens {
            Some(factory) => factory(&config),
            None => Box::new(ScreenManager::<&'static str>::new()),
        };

        let mut physics = match self.physics {
            Some(factory) => factory(&config),
            None => Box::new(PhysicsManager::new()),
        };
        configure_collision_layers(physics.as_mut());

        let platform = match self.platform {
            Some(factory) => factory(&config),
            None => Box::new(PlatformManager::new()),
        };

        let events = self.events.unwrap_or_else(|| {
            warn!(target: "engine", "No event source installed; only screens can stop the loop");
            Box::new(NoEvents)
        });

        GameManager {
            quit,
            interval: config.frame.interval(),
            step_policy: config.frame.step_policy,
            max_steps: config.frame.max_steps_per_iteration.max(1),
            steps: 0,
            events,
            graphics,
            camera,
            assets,
            input,
            audio,
            timer,
            screens,
            physics,
            platform,
        }
    }
}

/// Installs the startup collision rules and reports one-sided entries.
fn configure_collision_layers(physics: &mut dyn PhysicsService) {
    for (layer, mask) in CollisionMatrix::GAME_RULES {
        physics.set_layer_collision_mask(layer, mask);
    }

    let mut installed = CollisionMatrix::new();
    for layer in CollisionLayer::ALL {
        installed.set_mask(layer, physics.layer_collision_mask(layer));
    }
    for (a, b) in installed.asymmetric_pairs() {
        debug!(
            target: "physics",
            "{:?} lists {:?} but not the reverse; the pair will not collide",
            a, b
        );
    }
}

/// Event source used when none is installed.
struct NoEvents;

impl EventSource for NoEvents {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        None
    }
}

//=== GameManager =========================================================

/// Run-loop orchestrator.
///
/// # Frame Lifecycle
///
/// Each loop iteration:
/// 1. `timer.update()`
/// 2. drain the event source: `Quit` sets the quit flag, `MouseWheel`
///    goes straight to `input.mouse_wheel()`, anything else is ignored
/// 3. if `delta_time() >= 1 / frame_rate`: update, late update, render,
///    then reset the timer
///
/// # Teardown
///
/// Dropping the manager releases screens, timer, audio, input, assets,
/// physics, graphics, platform and camera, in that order, then shuts the
/// event source down.
pub struct GameManager {
    quit: bool,
    interval: Duration,
    step_policy: StepPolicy,
    max_steps: u32,
    steps: u64,
    events: Box<dyn EventSource>,
    graphics: Box<dyn GraphicsBackend>,
    camera: Box<dyn CameraService>,
    assets: Box<dyn AssetService>,
    input: Box<dyn InputService>,
    audio: Box<dyn AudioService>,
    timer: Timer,
    screens: Box<dyn ScreenService>,
    physics: Box<dyn PhysicsService>,
    platform: Box<dyn PlatformService>,
}

impl GameManager {
    //--- Execution --------------------------------------------------------

    /// Runs until quit is requested. Returns immediately if it already was.
    pub fn run(&mut self) {
        info!(target: "engine", "Entering run loop (step {:?})", self.interval);

        while !self.quit {
            self.timer.update();
            self.drain_events();

            match self.step_policy {
                StepPolicy::DiscardExcess => {
                    if self.timer.delta_time() >= self.interval {
                        self.step();
                        self.timer.reset();
                    }
                }
                StepPolicy::CarryOver => self.step_carry_over(),
            }
        }

        info!(target: "engine", "Run loop exited after {} steps", self.steps);
    }

    /// Stops the loop at the end of the current iteration.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    //--- Frame Phases -----------------------------------------------------

    fn drain_events(&mut self) {
        while let Some(event) = self.events.poll_event() {
            match event {
                PlatformEvent::Quit => {
                    info!(target: "engine", "Quit requested by platform");
                    self.quit = true;
                }
                PlatformEvent::MouseWheel { y } => self.input.mouse_wheel(y),
                PlatformEvent::Other => trace!(target: "engine", "Ignoring platform event"),
            }
        }
    }

    fn step_carry_over(&mut self) {
        let mut taken = 0;
        while self.timer.delta_time() >= self.interval {
            if taken >= self.max_steps {
                warn!(
                    target: "engine",
                    "Fell behind by {:?}, dropping the backlog",
                    self.timer.delta_time()
                );
                self.timer.reset();
                break;
            }
            self.step();
            self.timer.consume(self.interval);
            taken += 1;
        }
    }

    fn step(&mut self) {
        self.update();
        self.late_update();
        self.render();
        self.steps += 1;
    }

    fn update(&mut self) {
        self.input.update();

        let mut ctx = FrameContext::new(
            &*self.input,
            &mut *self.physics,
            &mut *self.camera,
            &mut *self.audio,
            &mut *self.assets,
            &*self.platform,
            &self.timer,
        );
        self.screens.update(&mut ctx);

        if ctx.quit_requested() {
            info!(target: "engine", "Quit requested by a screen");
            self.quit = true;
        }
    }

    fn late_update(&mut self) {
        self.input.update_prev_input();
        self.physics.update();
        self.camera.update();
    }

    fn render(&mut self) {
        self.graphics.clear_back_buffer();

        let mut ctx = RenderContext::new(&mut *self.graphics, &*self.camera);
        self.screens.render(&mut ctx);

        self.graphics.render();
    }

    //--- Accessors --------------------------------------------------------

    pub fn is_quitting(&self) -> bool {
        self.quit
    }

    /// Steps (update + late update + render) run so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn frame_interval(&self) -> Duration {
        self.interval
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn graphics(&self) -> &dyn GraphicsBackend {
        &*self.graphics
    }

    pub fn physics(&self) -> &dyn PhysicsService {
        &*self.physics
    }

    pub fn input(&self) -> &dyn InputService {
        &*self.input
    }

    pub fn camera(&self) -> &dyn CameraService {
        &*self.camera
    }

    pub fn platform(&self) -> &dyn PlatformService {
        &*self.platform
    }
}

impl Drop for GameManager {
    fn drop(&mut self) {
        info!(target: "engine", "Releasing subsystems");

        release(&mut *self.screens);
        release(&mut self.timer);
        release(&mut *self.audio);
        release(&mut *self.input);
        release(&mut *self.assets);
        release(&mut *self.physics);
        release(&mut *self.graphics);
        release(&mut *self.platform);
        release(&mut *self.camera);

        self.events.shutdown();
        info!(target: "engine", "Shutdown complete");
    }
}

fn release<S: Subsystem + ?Sized>(subsystem: &mut S) {
    debug!(target: "engine", "Releasing {}", subsystem.name());
    subsystem.release();
}

//=== ManagerSlot =========================================================

/// Owned holder with build-on-demand and explicit release.
///
/// `instance()` builds on first use and returns the same manager after
/// that. `release()` tears it down; the next `instance()` builds a fresh
/// one with fresh subsystems.
pub struct ManagerSlot {
    factory: Box<dyn FnMut() -> GameManager>,
    instance: Option<GameManager>,
    builds: u32,
}

impl ManagerSlot {
    pub fn new<F>(factory: F) -> Self
    where
        F: FnMut() -> GameManager + 'static,
    {
        Self {
            factory: Box::new(factory),
            instance: None,
            builds: 0,
        }
    }

    /// Returns the live manager, building it if needed.
    pub fn instance(&mut self) -> &mut GameManager {
        let factory = &mut self.factory;
        let builds = &mut self.builds;
        self.instance.get_or_insert_with(|| {
            *builds += 1;
            debug!(target: "engine", "Building manager instance #{}", builds);
            factory()
        })
    }

    /// Drops the live manager, if any.
    pub fn release(&mut self) {
        if let Some(manager) = self.instance.take() {
            drop(manager);
        }
    }

    pub fn is_live(&self) -> bool {
        self.instance.is_some()
    }

    /// Number of managers built so far.
    pub fn builds(&self) -> u32 {
        self.builds
    }
}

impl Drop for ManagerSlot {
    fn drop(&mut self) {
        self.release();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::CollisionFlags;
    use crate::core::timer::ManualClock;
    use crate::testing::{Batch, CallLog, Recorder, RecordingClock, ScriptedEvents};

    //--- Test Helpers -----------------------------------------------------

    /// 100 ms steps.
    fn ten_fps() -> FrameworkConfig {
        let mut config = FrameworkConfig::default();
        config.frame.frame_rate = 10;
        config
    }

    const STEP: Duration = Duration::from_millis(100);

    struct Rig {
        log: CallLog,
        clock: ManualClock,
        events: ScriptedEvents,
    }

    impl Rig {
        fn new(batches: Vec<Batch>) -> Self {
            let log = CallLog::new();
            let clock = ManualClock::new();
            let events = ScriptedEvents::new(batches, clock.clone(), &log);
            Self { log, clock, events }
        }

        fn builder(&self, config: FrameworkConfig) -> GameManagerBuilder {
            let log = &self.log;
            let (g, c, a, i, au, s, p, pl) = (
                log.clone(),
                log.clone(),
                log.clone(),
                log.clone(),
                log.clone(),
                log.clone(),
                log.clone(),
                log.clone(),
            );
            GameManagerBuilder::new(config)
                .with_clock(RecordingClock::new(self.clock.clone(), log))
                .with_event_source(self.events.clone())
                .with_graphics(move |_| Box::new(Recorder::new("graphics", &g)))
                .with_camera(move |_| Box::new(Recorder::new("camera", &c)))
                .with_assets(move |_| Box::new(Recorder::new("assets", &a)))
                .with_input(move |_| Box::new(Recorder::new("input", &i)))
                .with_audio(move |_| Box::new(Recorder::new("audio", &au)))
                .with_screens(move |_| Box::new(Recorder::new("screens", &s)))
                .with_physics(move |_| Box::new(Recorder::new("physics", &p)))
                .with_platform(move |_| Box::new(Recorder::new("platform", &pl)))
        }

        fn build(&self) -> GameManager {
            self.builder(ten_fps()).build()
        }
    }

    fn step_calls() -> Vec<&'static str> {
        vec![
            "input.update",
            "screens.update",
            "input.update_prev_input",
            "physics.update",
            "camera.update",
            "graphics.clear_back_buffer",
            "screens.render",
            "graphics.render",
        ]
    }

    //=====================================================================
    // Construction / Teardown
    //=====================================================================

    #[test]
    fn subsystems_built_in_fixed_order() {
        let rig = Rig::new(vec![]);
        let _manager = rig.build();

        let built: Vec<String> = rig
            .log
            .snapshot()
            .into_iter()
            .filter(|call| call.ends_with(".new"))
            .collect();
        assert_eq!(
            built,
            [
                "graphics.new",
                "camera.new",
                "assets.new",
                "input.new",
                "audio.new",
                "timer.new",
                "screens.new",
                "physics.new",
                "platform.new",
            ]
        );
    }

    #[test]
    fn collision_rules_installed_at_startup() {
        let rig = Rig::new(vec![]);
        let manager = rig.build();

        for (layer, mask) in CollisionMatrix::GAME_RULES {
            assert_eq!(manager.physics().layer_collision_mask(layer), mask);
        }
        assert_eq!(
            manager.physics().layer_collision_mask(CollisionLayer::Friendly),
            CollisionFlags::HOSTILE | CollisionFlags::HOSTILE_PROJECTILES | CollisionFlags::PLATFORMS
        );
    }

    #[test]
    fn collision_rules_unchanged_by_running() {
        // Each stepping iteration's reset absorbs the time that passed
        // during it, so four batches of one interval give two steps.
        let rig = Rig::new(vec![Batch::advance(STEP); 4]);
        let mut manager = rig.build();

        let before: Vec<_> = CollisionLayer::ALL
            .iter()
            .map(|&layer| manager.physics().layer_collision_mask(layer))
            .collect();
        manager.run();
        let after: Vec<_> = CollisionLayer::ALL
            .iter()
            .map(|&layer| manager.physics().layer_collision_mask(layer))
            .collect();

        assert_eq!(before, after);
        assert_eq!(manager.steps(), 2);
    }

    #[test]
    fn drop_releases_in_fixed_order() {
        let rig = Rig::new(vec![]);
        let manager = rig.build();
        rig.log.take();

        drop(manager);

        assert_eq!(
            rig.log.take(),
            [
                "screens.release",
                "timer.release",
                "audio.release",
                "input.release",
                "assets.release",
                "physics.release",
                "graphics.release",
                "platform.release",
                "camera.release",
                "events.shutdown",
            ]
        );
    }

    #[test]
    fn default_subsystems_build_and_run() {
        let rig = Rig::new(vec![Batch::advance(STEP); 4]);
        let mut config = ten_fps();
        config.graphics.mode = crate::core::graphics::RenderMode::Null;

        let mut manager = GameManagerBuilder::new(config)
            .with_clock(rig.clock.clone())
            .with_event_source(rig.events.clone())
            .build();
        manager.run();

        assert_eq!(manager.steps(), 2);
        assert_eq!(manager.graphics().frames_presented(), 2);
    }

    //=====================================================================
    // Run Loop
    //=====================================================================

    #[test]
    fn no_step_below_interval_but_events_drained() {
        let third = Duration::from_millis(30);
        let rig = Rig::new(vec![Batch::advance(third), Batch::advance(third), Batch::advance(third)]);
        let mut manager = rig.build();
        rig.log.take();

        manager.run();

        let calls = rig.log.take();
        assert!(!calls.iter().any(|c| c == "input.update"), "no step ran: {:?}", calls);
        assert_eq!(rig.events.drains(), 4, "three scripted iterations plus the quit one");
        assert_eq!(manager.steps(), 0);
    }

    #[test]
    fn delta_equal_to_interval_runs_one_step_and_resets() {
        let rig = Rig::new(vec![Batch::advance(STEP)]);
        let mut manager = rig.build();
        rig.log.take();

        manager.run();

        assert_eq!(manager.steps(), 1);
        assert_eq!(manager.timer().delta_time(), Duration::ZERO);
    }

    #[test]
    fn time_passing_during_a_step_is_discarded() {
        // Iteration 2 steps on the first interval; the second interval
        // passes during it and is dropped by the reset.
        let rig = Rig::new(vec![Batch::advance(STEP), Batch::advance(STEP)]);
        let mut manager = rig.build();

        manager.run();

        assert_eq!(manager.steps(), 1);
        assert_eq!(rig.events.drains(), 3);
    }

    #[test]
    fn step_calls_in_order() {
        let rig = Rig::new(vec![Batch::advance(STEP)]);
        let mut manager = rig.build();
        rig.log.take();

        manager.run();

        let calls: Vec<String> = rig
            .log
            .take()
            .into_iter()
            .filter(|c| !c.starts_with("events."))
            .collect();
        assert_eq!(calls, step_calls());
    }

    #[test]
    fn quit_mid_drain_finishes_iteration_then_stops() {
        let rig = Rig::new(vec![
            Batch::events(vec![PlatformEvent::Quit, PlatformEvent::MouseWheel { y: 3 }]),
            Batch::advance(STEP),
        ]);
        let mut manager = rig.build();
        rig.clock.advance(STEP);
        rig.log.take();

        manager.run();

        let calls = rig.log.take();
        assert_eq!(calls[0], "input.mouse_wheel(3)", "drain continues after Quit");
        assert_eq!(manager.steps(), 1, "the quitting iteration still steps");
        assert_eq!(rig.events.remaining(), 1, "no further iteration polled");
    }

    #[test]
    fn wheel_forwarded_once_without_step() {
        let rig = Rig::new(vec![Batch::events(vec![PlatformEvent::MouseWheel { y: -2 }])]);
        let mut manager = rig.build();
        rig.log.take();

        manager.run();

        let calls = rig.log.take();
        let wheel: Vec<_> = calls.iter().filter(|c| c.starts_with("input.mouse_wheel")).collect();
        assert_eq!(wheel, ["input.mouse_wheel(-2)"]);
        assert_eq!(manager.steps(), 0);
    }

    #[test]
    fn wheel_forwarded_once_with_step() {
        let rig = Rig::new(vec![Batch::events(vec![PlatformEvent::MouseWheel { y: 5 }])]);
        let mut manager = rig.build();
        rig.clock.advance(STEP);
        rig.log.take();

        manager.run();

        let calls = rig.log.take();
        assert_eq!(calls.iter().filter(|c| *c == "input.mouse_wheel(5)").count(), 1);
        let wheel_at = calls.iter().position(|c| c == "input.mouse_wheel(5)");
        let update_at = calls.iter().position(|c| c == "input.update");
        assert!(wheel_at < update_at, "wheel arrives before the step");
    }

    #[test]
    fn other_events_are_ignored() {
        let rig = Rig::new(vec![Batch::events(vec![PlatformEvent::Other, PlatformEvent::Other])]);
        let mut manager = rig.build();
        rig.log.take();

        manager.run();

        assert!(rig.log.take().iter().all(|c| c.starts_with("events.")));
    }

    #[test]
    fn leftover_time_is_discarded() {
        // 250 ms elapse in one iteration: one step, the extra 150 ms is lost.
        let rig = Rig::new(vec![Batch::advance(Duration::from_millis(250))]);
        let mut manager = rig.build();

        manager.run();

        assert_eq!(manager.steps(), 1);
    }

    #[test]
    fn screen_can_request_quit() {
        let rig = Rig::new(vec![Batch::advance(STEP); 10]);
        let log = rig.log.clone();
        let mut manager = rig
            .builder(ten_fps())
            .with_screens(move |_| Box::new(Recorder::new("screens", &log).quit_after(2)))
            .build();

        manager.run();

        // Steps run in iterations 2 and 4.
        assert_eq!(manager.steps(), 2);
        assert_eq!(rig.events.remaining(), 6);
    }

    #[test]
    fn request_quit_before_run_skips_loop() {
        let rig = Rig::new(vec![Batch::advance(STEP)]);
        let mut manager = rig.build();
        manager.request_quit();

        manager.run();

        assert_eq!(rig.events.drains(), 0);
        assert_eq!(manager.steps(), 0);
    }

    //=====================================================================
    // Step Policies
    //=====================================================================

    #[test]
    fn carry_over_runs_backlog() {
        let rig = Rig::new(vec![Batch::advance(Duration::from_millis(250)), Batch::advance(Duration::from_millis(50))]);
        let mut config = ten_fps();
        config.frame.step_policy = StepPolicy::CarryOver;
        let mut manager = rig.builder(config).build();

        manager.run();

        // 250 ms -> two steps, 50 ms kept; +50 ms -> one more step.
        assert_eq!(manager.steps(), 3);
        assert_eq!(manager.timer().delta_time(), Duration::ZERO);
    }

    #[test]
    fn carry_over_caps_steps_per_iteration() {
        let rig = Rig::new(vec![Batch::advance(Duration::from_secs(2))]);
        let mut config = ten_fps();
        config.frame.step_policy = StepPolicy::CarryOver;
        config.frame.max_steps_per_iteration = 3;
        let mut manager = rig.builder(config).build();

        manager.run();

        assert_eq!(manager.steps(), 3);
    }

    //=====================================================================
    // Graphics Failure
    //=====================================================================

    #[test]
    fn graphics_failure_quits_before_first_iteration() {
        let rig = Rig::new(vec![Batch::advance(STEP)]);
        let log = rig.log.clone();
        let mut manager = rig
            .builder(ten_fps())
            .with_graphics(move |_| Box::new(Recorder::new("graphics", &log).uninitialized()))
            .build();

        assert!(manager.is_quitting());
        manager.run();

        assert_eq!(manager.steps(), 0);
        assert_eq!(rig.events.drains(), 0);
        assert!(rig.log.snapshot().contains(&"platform.new".to_string()), "construction completes");
    }

    #[test]
    fn graphics_failure_still_tears_down() {
        let rig = Rig::new(vec![]);
        let log = rig.log.clone();
        let manager = rig
            .builder(ten_fps())
            .with_graphics(move |_| Box::new(Recorder::new("graphics", &log).uninitialized()))
            .build();

        drop(manager);

        assert!(rig.log.snapshot().ends_with(&["camera.release".to_string(), "events.shutdown".to_string()]));
    }

    //=====================================================================
    // ManagerSlot
    //=====================================================================

    fn slot(rig: &Rig) -> ManagerSlot {
        let log = rig.log.clone();
        let clock = rig.clock.clone();
        ManagerSlot::new(move || {
            let g = log.clone();
            GameManagerBuilder::new(ten_fps())
                .with_clock(clock.clone())
                .with_graphics(move |_| Box::new(Recorder::new("graphics", &g)))
                .build()
        })
    }

    #[test]
    fn instance_is_idempotent() {
        let rig = Rig::new(vec![]);
        let mut slot = slot(&rig);

        let first = slot.instance() as *const GameManager;
        let second = slot.instance() as *const GameManager;

        assert_eq!(first, second);
        assert_eq!(slot.builds(), 1);
        assert_eq!(rig.log.snapshot().iter().filter(|c| *c == "graphics.new").count(), 1);
    }

    #[test]
    fn release_then_instance_rebuilds() {
        let rig = Rig::new(vec![]);
        let mut slot = slot(&rig);

        slot.instance();
        slot.release();
        assert!(!slot.is_live());
        assert!(rig.log.snapshot().contains(&"graphics.release".to_string()));

        slot.instance();
        assert!(slot.is_live());
        assert_eq!(slot.builds(), 2);
        assert_eq!(rig.log.snapshot().iter().filter(|c| *c == "graphics.new").count(), 2);
    }

    #[test]
    fn release_when_empty_is_safe() {
        let rig = Rig::new(vec![]);
        let mut slot = slot(&rig);

        slot.release();
        slot.release();

        assert_eq!(slot.builds(), 0);
        assert!(rig.log.snapshot().is_empty());
    }
}
