//=========================================================================
// Transition Queue
//=========================================================================
//
// Screens queue stack changes here while they update. The ScreenManager
// applies them once the whole update pass is done, so the set of screens
// being updated never changes mid-pass.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{ScreenKey, ScreenTransition};

//=== TransitionQueue =====================================================

/// FIFO of pending [`ScreenTransition`]s.
#[derive(Debug)]
pub struct TransitionQueue<K: ScreenKey> {
    queue: Vec<ScreenTransition<K>>,
}

impl<K: ScreenKey> TransitionQueue<K> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues `transition` for the end of the update pass.
    pub fn push(&mut self, transition: ScreenTransition<K>) {
        self.queue.push(transition);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all transitions, leaving the queue empty.
    pub fn take(&mut self) -> Vec<ScreenTransition<K>> {
        std::mem::take(&mut self.queue)
    }
}

impl<K: ScreenKey> Default for TransitionQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
