//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS window and events) with the single-threaded run loop.
//
// Architecture:
// ```text
//  GameManager::run()
//    └─ drain: poll_event() ──→ WinitEventPump
//                                 │  pump_app_events(timeout = 0)  (once per drain)
//                                 ↓
//                               PumpState (ApplicationHandler)
//                                 └─ InputProcessor::translate()
//                                      ├─ PlatformEvent → pending queue → poll_event()
//                                      └─ InputEvent    → crossbeam Sender → InputManager
// ```
//
// Key points:
// - The OS event queue is pumped without blocking, so the run loop keeps
//   ownership of timing.
// - The window is created lazily on the first `resumed()` callback.
// - Keyboard and mouse state travel on their own channel; only the events
//   the run loop reacts to are queued as `PlatformEvent`s.
// - Once winit reports exit, a single `Quit` is delivered and the loop is
//   never pumped again.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::collections::VecDeque;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::config::WindowConfig;
use crate::core::input::InputEvent;
use crate::core::platform_bridge::{EventSource, PlatformEvent};
use input_processor::{InputProcessor, Translated};

//=== PlatformError =======================================================

/// Platform initialization errors.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// No display, or the OS refused to create an event loop.
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[from] winit::error::EventLoopError),
}

//=== WinitEventPump ======================================================

/// [`EventSource`] backed by a winit window.
///
/// # Lifecycle
///
/// 1. `WinitEventPump::new()` creates the event loop and the input feed
/// 2. the first `poll_event()` pumps winit, which opens the window
/// 3. each drain pumps once and hands out the queued events
/// 4. `shutdown()` closes the window
///
/// Must be created and used on the main thread.
pub struct WinitEventPump {
    event_loop: EventLoop<()>,
    state: PumpState,
    pumped: bool,
    exited: bool,
}

impl WinitEventPump {
    /// Creates the event loop. Returns the pump and the receiving end of
    /// the keyboard/mouse feed, meant for `GameManagerBuilder::with_input_feed`.
    pub fn new(window: &WindowConfig) -> Result<(Self, Receiver<InputEvent>), PlatformError> {
        let event_loop = EventLoop::new()?;
        let (input_tx, input_rx) = unbounded();

        info!(target: "platform", "Event loop created");

        let pump = Self {
            event_loop,
            state: PumpState::new(window.clone(), input_tx),
            pumped: false,
            exited: false,
        };
        Ok((pump, input_rx))
    }

    fn pump(&mut self) {
        if self.exited {
            return;
        }

        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state);

        if let PumpStatus::Exit(code) = status {
            info!(target: "platform", "Event loop exited with code {}", code);
            self.exited = true;
            self.state.queue(PlatformEvent::Quit);
        }
    }
}

impl EventSource for WinitEventPump {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if !self.pumped {
            self.pump();
            self.pumped = true;
        }

        let event = self.state.pending.pop_front();
        if event.is_none() {
            self.pumped = false;
        }
        event
    }

    fn shutdown(&mut self) {
        if self.state.window.take().is_some() {
            info!(target: "platform", "Window closed");
        }
        self.state.pending.clear();
    }
}

//=== PumpState ===========================================================

struct PumpState {
    window: Option<Window>,
    config: WindowConfig,
    processor: InputProcessor,
    pending: VecDeque<PlatformEvent>,
    input_tx: Sender<InputEvent>,
    quit_queued: bool,
}

impl PumpState {
    fn new(config: WindowConfig, input_tx: Sender<InputEvent>) -> Self {
        Self {
            window: None,
            config,
            processor: InputProcessor::new(),
            pending: VecDeque::new(),
            input_tx,
            quit_queued: false,
        }
    }

    /// Queues `event` for the run loop. At most one `Quit` is ever queued.
    fn queue(&mut self, event: PlatformEvent) {
        if event == PlatformEvent::Quit {
            if self.quit_queued {
                return;
            }
            self.quit_queued = true;
        }
        self.pending.push_back(event);
    }

    fn forward_input(&self, event: InputEvent) {
        if self.input_tx.send(event).is_err() {
            trace!(target: "platform::input", "Input feed closed, dropping {:?}", event);
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for PumpState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.queue(PlatformEvent::Quit);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match self.processor.translate(&event) {
            Translated::Platform(PlatformEvent::Quit) => {
                info!(target: "platform", "Window close requested");
                self.queue(PlatformEvent::Quit);
                event_loop.exit();
            }
            Translated::Platform(platform_event) => self.queue(platform_event),
            Translated::Input(input) => self.forward_input(input),
            Translated::Nothing => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
