//=========================================================================
// Screen Manager
//=========================================================================
//
// Screen registration, stack operations and lifecycle.
//
// Screens are stored by key and referenced from a stack of keys, so a
// screen keeps its state when it leaves and later re-enters the stack.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Screen, ScreenService, TransitionQueue};
use crate::core::context::{FrameContext, RenderContext};
use crate::core::Subsystem;

//=== ScreenTransition ====================================================

/// Stack operation requested by a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition<K: ScreenKey> {
    /// Adds a screen on top of the stack.
    Push(K),

    /// Removes a screen from anywhere in the stack.
    Remove(K),

    /// Swaps a stacked screen for another one, in place.
    Replace(K, K),

    /// Empties the stack.
    Clear,
}

//=== ScreenKey ===========================================================

/// Identifier of a registered screen. Usually a game-specific enum.
pub trait ScreenKey: Clone + Copy + Eq + Hash + Debug + 'static {}

impl ScreenKey for &'static str {}

//=== ScreenManager =======================================================

/// Default [`ScreenService`].
///
/// The topmost opaque screen and every transparent screen above it are
/// active. Active screens update and render bottom to top.
pub struct ScreenManager<K: ScreenKey> {
    screens: HashMap<K, Box<dyn Screen<K>>>,
    stack: Vec<K>,
    transitions: TransitionQueue<K>,
    started: bool,
}

impl<K: ScreenKey> ScreenManager<K> {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with nothing registered.
    pub fn new() -> Self {
        Self {
            screens: HashMap::new(),
            stack: Vec::new(),
            transitions: TransitionQueue::new(),
            started: false,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a screen. It stays inactive until pushed.
    pub fn register_screen<T>(&mut self, key: K, screen: T)
    where
        T: Screen<K> + 'static,
    {
        if self.screens.insert(key, Box::new(screen)).is_some() {
            warn!(target: "screens", "Screen {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a screen and places it on the stack.
    ///
    /// Its `on_enter` runs at the start of the first update.
    pub fn register_default<T>(&mut self, key: K, screen: T)
    where
        T: Screen<K> + 'static,
    {
        self.register_screen(key, screen);

        if self.stack.contains(&key) {
            warn!(target: "screens", "Screen {:?} is already in the stack", key);
        } else {
            debug!(target: "screens", "Registered screen {:?} as default", key);
            self.stack.push(key);
        }
    }

    //--- Introspection ----------------------------------------------------

    /// Stack contents, bottom first.
    pub fn stack(&self) -> &[K] {
        &self.stack
    }

    pub fn top(&self) -> Option<K> {
        self.stack.last().copied()
    }

    pub fn is_registered(&self, key: K) -> bool {
        self.screens.contains_key(&key)
    }

    //--- Internal Helpers -------------------------------------------------

    fn start(&mut self, ctx: &mut FrameContext<'_>) {
        self.started = true;
        for key in self.stack.clone() {
            debug!(target: "screens", "Starting with screen {:?}", key);
            match self.screens.get_mut(&key) {
                Some(screen) => screen.on_enter(ctx),
                None => warn!(target: "screens", "Initial screen {:?} not registered", key),
            }
        }
    }

    fn collect_active(&self) -> Vec<K> {
        let mut active = Vec::new();

        for &key in self.stack.iter().rev() {
            active.push(key);

            if let Some(screen) = self.screens.get(&key) {
                if !screen.is_transparent() {
                    break;
                }
            }
        }

        active.reverse();
        active
    }

    fn apply_transitions(&mut self, ctx: &mut FrameContext<'_>) {
        for transition in self.transitions.take() {
            match transition {
                ScreenTransition::Push(key) => self.push_internal(key, ctx),
                ScreenTransition::Remove(key) => self.remove_internal(key, ctx),
                ScreenTransition::Replace(old, new) => self.replace_internal(old, new, ctx),
                ScreenTransition::Clear => self.clear_internal(ctx),
            }
        }
    }

    fn push_internal(&mut self, key: K, ctx: &mut FrameContext<'_>) {
        if self.stack.contains(&key) {
            warn!(target: "screens", "Screen {:?} is already in the stack, skipping push", key);
            return;
        }

        let Some(screen) = self.screens.get_mut(&key) else {
            warn!(target: "screens", "Attempted to push unregistered screen {:?}", key);
            return;
        };

        debug!(target: "screens", "Pushing screen {:?}", key);
        self.stack.push(key);
        screen.on_enter(ctx);
    }

    fn remove_internal(&mut self, key: K, ctx: &mut FrameContext<'_>) {
        let Some(pos) = self.stack.iter().position(|&k| k == key) else {
            debug!(target: "screens", "Screen {:?} not in stack, skipping removal", key);
            return;
        };

        debug!(target: "screens", "Removing screen {:?} at position {}", key, pos);
        self.stack.remove(pos);
        if let Some(screen) = self.screens.get_mut(&key) {
            screen.on_exit(ctx);
        }
    }

    fn replace_internal(&mut self, old: K, new: K, ctx: &mut FrameContext<'_>) {
        let Some(pos) = self.stack.iter().position(|&k| k == old) else {
            warn!(target: "screens", "Screen {:?} not in stack, skipping replacement", old);
            return;
        };

        if self.stack.contains(&new) {
            warn!(target: "screens", "Screen {:?} is already in the stack, skipping replacement", new);
            return;
        }

        if !self.screens.contains_key(&new) {
            warn!(target: "screens", "Attempted to replace with unregistered screen {:?}", new);
            return;
        }

        debug!(target: "screens", "Replacing screen {:?} with {:?} at position {}", old, new, pos);

        if let Some(screen) = self.screens.get_mut(&old) {
            screen.on_exit(ctx);
        }

        self.stack[pos] = new;

        if let Some(screen) = self.screens.get_mut(&new) {
            screen.on_enter(ctx);
        }
    }

    fn clear_internal(&mut self, ctx: &mut FrameContext<'_>) {
        debug!(target: "screens", "Clearing screen stack");

        for key in std::mem::take(&mut self.stack).into_iter().rev() {
            if let Some(screen) = self.screens.get_mut(&key) {
                screen.on_exit(ctx);
            }
        }
    }
}

impl<K: ScreenKey> Default for ScreenManager<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Service Implementation ==============================================

impl<K: ScreenKey> ScreenService for ScreenManager<K> {
    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if !self.started {
            self.start(ctx);
        }

        for key in self.collect_active() {
            if let Some(screen) = self.screens.get_mut(&key) {
                screen.update(ctx, &mut self.transitions);
            }
        }

        self.apply_transitions(ctx);
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        for key in self.collect_active() {
            if let Some(screen) = self.screens.get_mut(&key) {
                screen.render(ctx);
            }
        }
    }
}

impl<K: ScreenKey> Subsystem for ScreenManager<K> {
    fn name(&self) -> &'static str {
        "screens"
    }

    fn release(&mut self) {
        debug!(
            target: "screens",
            "Releasing {} screens ({} stacked)",
            self.screens.len(),
            self.stack.len()
        );
        self.stack.clear();
        self.screens.clear();
        self.transitions.take();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallLog, SubsystemHarness};

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScreen {
        A,
        B,
        C,
    }

    impl ScreenKey for TestScreen {}

    /// Records lifecycle calls and runs a scripted transition on its first
    /// update.
    struct Probe {
        key: TestScreen,
        log: CallLog,
        transparent: bool,
        on_first_update: Option<ScreenTransition<TestScreen>>,
    }

    impl Probe {
        fn new(key: TestScreen, log: &CallLog) -> Self {
            Self {
                key,
                log: log.clone(),
                transparent: false,
                on_first_update: None,
            }
        }

        fn transparent(mut self) -> Self {
            self.transparent = true;
            self
        }

        fn then(mut self, transition: ScreenTransition<TestScreen>) -> Self {
            self.on_first_update = Some(transition);
            self
        }
    }

    impl Screen<TestScreen> for Probe {
        fn on_enter(&mut self, _ctx: &mut FrameContext<'_>) {
            self.log.record(format!("{:?}.enter", self.key));
        }

        fn on_exit(&mut self, _ctx: &mut FrameContext<'_>) {
            self.log.record(format!("{:?}.exit", self.key));
        }

        fn update(&mut self, _ctx: &mut FrameContext<'_>, transitions: &mut TransitionQueue<TestScreen>) {
            self.log.record(format!("{:?}.update", self.key));
            if let Some(transition) = self.on_first_update.take() {
                transitions.push(transition);
            }
        }

        fn render(&mut self, _ctx: &mut RenderContext<'_>) {
            self.log.record(format!("{:?}.render", self.key));
        }

        fn is_transparent(&self) -> bool {
            self.transparent
        }
    }

    //--- Stack Behaviour --------------------------------------------------

    #[test]
    fn default_screen_enters_on_first_update() {
        let log = CallLog::new();
        let mut harness = SubsystemHarness::new();
        let mut screens = ScreenManager::new();
        screens.register_default(TestScreen::A, Probe::new(TestScreen::A, &log));

        screens.update(&mut harness.frame());
        screens.update(&mut harness.frame());

        assert_eq!(log.take(), ["A.enter", "A.update", "A.update"]);
    }

    #[test]
    fn opaque_top_hides_lower_screens() {
        let log = CallLog::new();
        let mut harness = SubsystemHarness::new();
        let mut screens = ScreenManager::new();
        screens.register_default(TestScreen::A, Probe::new(TestScreen::A, &log));
        screens.register_default(TestScreen::B, Probe::new(TestScreen::B, &log));

        screens.update(&mut harness.frame());

        assert_eq!(log.take(), ["A.enter", "B.enter", "B.update"]);
    }

    #[test]
    fn transparent_top_updates_and_renders_bottom_up() {
        let log = CallLog::new();
        let mut harness = SubsystemHarness::new();
        let mut screens = ScreenManager::new();
        screens.register_default(TestScreen::A, Probe::new(TestScreen::A, &log));
        screens.register_default(TestScreen::B, Probe::new(TestScreen::B, &log).transparent());

        screens.update(&mut harness.frame());
        log.take();
        screens.render(&mut harness.render());

        assert_eq!(log.take(), ["A.render", "B.render"]);
    }

    //--- Transitions ------------------------------------------------------

    #[test]
    fn push_applies_after_update_pass() {
        let log = CallLog::new();
        let mut harness = SubsystemHarness::new();
        let mut screens = ScreenManager::new();
        screens.register_default(
            TestScreen::A,
            Probe::new(TestScreen::A, &log).then(ScreenTransition::Push(TestScreen::B)),
        );
        screens.register_screen(TestScreen::B, Probe::new(TestScreen::B, &log));

        screens.update(&mut harness.frame());
        assert_eq!(log.take(), ["A.enter", "A.update", "B.enter"]);
        assert_eq!(screens.stack(), &[TestScreen::A, TestScreen::B]);

        screens.update(&mut harness.frame());
        assert_eq!(log.take(), ["B.update"]);
    }

    #[test]
    fn replace_keeps_position() {
        let log = CallLog::new();
        let mut harness = SubsystemHarness::new();
        let mut screens = ScreenManager::new();
        screens.register_default(
            TestScreen::A,
            Probe::new(TestScreen::A, &log).then(ScreenTransition::Replace(TestScreen::A, TestScreen::C)),
        );
        screens.register_screen(TestScreen::C, Probe::new(TestScreen::C, &log));

        screens.update(&mut harness.frame());

        assert_eq!(log.take(), ["A.enter", "A.update", "A.exit", "C.enter"]);
        assert_eq!(screens.top(), Some(TestScreen::C));
    }

    #[test]
    fn invalid_transitions_are_ignored() {
        let log = CallLog::new();
        let mut harness = SubsystemHarness::new();
        let mut screens = ScreenManager::new();
        screens.register_default(
            TestScreen::A,
            Probe::new(TestScreen::A, &log).then(ScreenTransition::Push(TestScreen::C)),
        );

        screens.update(&mut harness.frame());

        assert_eq!(screens.stack(), &[TestScreen::A], "C is not registered");
        assert!(!screens.is_registered(TestScreen::C));
    }

    #[test]
    fn clear_exits_top_down() {
        let log = CallLog::new();
        let mut harness = SubsystemHarness::new();
        let mut screens = ScreenManager::new();
        screens.register_default(TestScreen::A, Probe::new(TestScreen::A, &log));
        screens.register_default(
            TestScreen::B,
            Probe::new(TestScreen::B, &log).then(ScreenTransition::Clear),
        );

        screens.update(&mut harness.frame());

        assert_eq!(log.take(), ["A.enter", "B.enter", "B.update", "B.exit", "A.exit"]);
        assert!(screens.stack().is_empty());
    }

    #[test]
    fn empty_stack_is_a_noop() {
        let mut harness = SubsystemHarness::new();
        let mut screens: ScreenManager<TestScreen> = ScreenManager::new();

        screens.update(&mut harness.frame());
        screens.render(&mut harness.render());

        assert_eq!(screens.top(), None);
    }

    #[test]
    fn release_drops_every_screen() {
        let log = CallLog::new();
        let mut screens = ScreenManager::new();
        screens.register_default(TestScreen::A, Probe::new(TestScreen::A, &log));

        screens.release();

        assert!(screens.stack().is_empty());
        assert!(!screens.is_registered(TestScreen::A));
        assert!(log.take().is_empty(), "release does not run on_exit");
    }
}
