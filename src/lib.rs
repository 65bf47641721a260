//=========================================================================
// Arcade Framework: Library Root
//
// A single-threaded, fixed-step game framework core.
//
// Responsibilities:
// - Expose the run-loop orchestrator (`GameManager`) and its builder
// - Expose every subsystem contract and its default implementation
// - Provide configuration loading and logging initialization
// - Provide the winit-backed event source for windowed runs
//
// Typical usage:
// ```no_run
// use arcade_framework::prelude::*;
//
// fn main() -> anyhow::Result<()> {
//     let config = FrameworkConfig::default();
//     init_logging(&config.logging);
//
//     let (pump, input_feed) = WinitEventPump::new(&config.window)?;
//     let mut manager = GameManagerBuilder::new(config)
//         .with_event_source(pump)
//         .with_input_feed(input_feed)
//         .build();
//
//     manager.run();
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the subsystems and the contracts the GameManager drives
// them through. `engine` holds the GameManager itself.
//
pub mod config;
pub mod core;
pub mod engine;
pub mod logging;
pub mod platform;
pub mod prelude;

//--- Test Support --------------------------------------------------------

#[cfg(test)]
pub(crate) mod testing;

//--- Public Exports ------------------------------------------------------

pub use config::{ConfigError, FrameworkConfig};
pub use engine::{GameManager, GameManagerBuilder, ManagerSlot};
