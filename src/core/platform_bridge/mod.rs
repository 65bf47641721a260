//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit, headless drivers) with the run loop.
//
// This module defines the contract between platform implementations and
// the GameManager, so a backend can be swapped without touching the core.
//
// Components:
// - `interface`: `PlatformEvent` and the `EventSource` trait
// - `event_collector`: `ChannelEventSource`, a crossbeam-fed source
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::ChannelEventSource;
pub use interface::{EventSource, PlatformEvent};
