//=========================================================================
// Channel Event Source
//=========================================================================
//
// EventSource backed by a crossbeam receiver.
//
// Architecture:
//   Sender<PlatformEvent> → Receiver → poll_event() → GameManager
//
// Whoever holds the sender (a headless driver, a replay, a test) feeds the
// run loop. Dropping every sender ends the run: the source reports a single
// `Quit` and is silent afterwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{EventSource, PlatformEvent};

//=== ChannelEventSource ==================================================

pub struct ChannelEventSource {
    receiver: Receiver<PlatformEvent>,
    disconnected: bool,
    shut_down: bool,
}

impl ChannelEventSource {
    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            disconnected: false,
            shut_down: false,
        }
    }

    /// Returns `true` once `shutdown()` has run.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl EventSource for ChannelEventSource {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if self.disconnected {
            return None;
        }

        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!(target: "platform", "Event channel disconnected, requesting quit");
                self.disconnected = true;
                Some(PlatformEvent::Quit)
            }
        }
    }

    fn shutdown(&mut self) {
        debug!(target: "platform", "Channel event source shut down");
        self.shut_down = true;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
