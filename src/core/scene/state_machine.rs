//=========================================================================
// Scene State Machine
//=========================================================================
//
// Owns exactly one active scene and drives its lifecycle.
//
// Scenes are built by factories registered per kind, so every switch
// yields a fresh instance. Switching:
//   1. on_exit() on the outgoing scene
//   2. drop it (its tasks and handlers go with it)
//   3. begin a new remote epoch
//   4. build the target scene, then on_enter()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneKind, SceneState};
use crate::config::GameConfig;
use crate::core::globals::SceneContext;
use crate::core::remote::RemoteEvent;

//=== SceneFactory ========================================================

/// Builds a fresh scene from the game configuration.
pub type SceneFactory = Box<dyn Fn(&GameConfig) -> Box<dyn Scene> + Send>;

//=== SceneStateMachine ===================================================

/// Manages scene registration, the active scene and switching.
pub struct SceneStateMachine {
    factories: HashMap<SceneKind, SceneFactory>,
    initial: Option<SceneKind>,
    active: Option<Box<dyn Scene>>,
}

impl SceneStateMachine {
    //--- Construction -----------------------------------------------------

    /// Creates a state machine with no registered scenes.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            initial: None,
            active: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers the factory for `kind`.
    pub fn register<F>(&mut self, kind: SceneKind, factory: F)
    where
        F: Fn(&GameConfig) -> Box<dyn Scene> + Send + 'static,
    {
        if self.factories.insert(kind, Box::new(factory)).is_some() {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", kind);
        }
    }

    /// Registers the factory for `kind` and makes it the starting scene.
    pub fn register_default<F>(&mut self, kind: SceneKind, factory: F)
    where
        F: Fn(&GameConfig) -> Box<dyn Scene> + Send + 'static,
    {
        self.register(kind, factory);
        debug!(target: "scene", "Registered scene {:?} as default", kind);
        self.initial = Some(kind);
    }

    /// Builds and enters the starting scene.
    pub fn start(&mut self, context: &mut SceneContext<'_>) {
        match self.initial {
            Some(initial) => self.enter(initial, context),
            None => warn!(target: "scene", "No default scene registered"),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Hands this frame's remote completions to the active scene.
    pub fn deliver_remote(&mut self, events: Vec<RemoteEvent>, context: &mut SceneContext<'_>) {
        let Some(scene) = self.active.as_mut() else {
            return;
        };
        for event in events {
            scene.on_remote(event, context);
        }
    }

    /// Updates the active scene.
    pub fn update(&mut self, context: &mut SceneContext<'_>) {
        if let Some(scene) = self.active.as_mut() {
            scene.update(context);
        }
    }

    //--- Transition Processing --------------------------------------------

    /// Applies the last switch requested this frame, if any.
    ///
    /// Should be called at the tick boundary after the scene update.
    pub fn process_transitions(&mut self, context: &mut SceneContext<'_>) {
        let Some(target) = context.transitions.take_last() else {
            return;
        };

        if !self.factories.contains_key(&target) {
            warn!(target: "scene", "Attempted to switch to unregistered scene {:?}", target);
            return;
        }

        if let Some(mut outgoing) = self.active.take() {
            info!(target: "scene", "Switching scene {:?} -> {:?}", outgoing.kind(), target);
            outgoing.on_exit(context);
        }

        context.remote.begin_epoch();
        self.enter(target, context);
    }

    fn enter(&mut self, kind: SceneKind, context: &mut SceneContext<'_>) {
        let Some(factory) = self.factories.get(&kind) else {
            warn!(target: "scene", "Scene {:?} not registered", kind);
            return;
        };

        let mut scene = factory(context.config);
        scene.on_enter(context);
        self.active = Some(scene);
    }

    //--- Queries ----------------------------------------------------------

    pub fn active_kind(&self) -> Option<SceneKind> {
        self.active.as_ref().map(|scene| scene.kind())
    }

    /// State of the active scene.
    pub fn state(&self) -> Option<SceneState> {
        self.active.as_ref().map(|scene| scene.state())
    }
}

impl Default for SceneStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::test_support::Harness;
    use std::sync::{Arc, Mutex};

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Probe {
        kind: SceneKind,
        journal: Journal,
        updates: u32,
    }

    impl Scene for Probe {
        fn kind(&self) -> SceneKind {
            self.kind
        }

        fn state(&self) -> SceneState {
            match self.kind {
                SceneKind::Menu => SceneState::Menu,
                SceneKind::Play => SceneState::Playing,
            }
        }

        fn on_enter(&mut self, _context: &mut SceneContext<'_>) {
            self.journal.lock().unwrap().push(format!("enter {:?}", self.kind));
        }

        fn on_exit(&mut self, _context: &mut SceneContext<'_>) {
            self.journal
                .lock()
                .unwrap()
                .push(format!("exit {:?} after {}", self.kind, self.updates));
        }

        fn on_remote(&mut self, event: RemoteEvent, _context: &mut SceneContext<'_>) {
            self.journal.lock().unwrap().push(format!("remote {:?}", event));
        }

        fn update(&mut self, _context: &mut SceneContext<'_>) {
            self.updates += 1;
        }
    }

    fn machine(journal: &Journal) -> SceneStateMachine {
        let mut machine = SceneStateMachine::new();
        for kind in [SceneKind::Menu, SceneKind::Play] {
            let journal = journal.clone();
            let factory = move |_: &GameConfig| -> Box<dyn Scene> {
                Box::new(Probe { kind, journal: journal.clone(), updates: 0 })
            };
            if kind == SceneKind::Menu {
                machine.register_default(kind, factory);
            } else {
                machine.register(kind, factory);
            }
        }
        machine
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn start_enters_default_scene() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        let mut harness = Harness::new();

        machine.start(&mut harness.context());

        assert_eq!(machine.active_kind(), Some(SceneKind::Menu));
        assert_eq!(machine.state(), Some(SceneState::Menu));
        assert_eq!(*journal.lock().unwrap(), vec!["enter Menu"]);
    }

    #[test]
    fn switch_exits_then_builds_fresh_scene() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        let mut harness = Harness::new();
        machine.start(&mut harness.context());

        machine.update(&mut harness.context());
        harness.transitions.request(SceneKind::Play);
        machine.process_transitions(&mut harness.context());
        harness.transitions.request(SceneKind::Menu);
        machine.process_transitions(&mut harness.context());

        assert_eq!(
            *journal.lock().unwrap(),
            vec!["enter Menu", "exit Menu after 1", "enter Play", "exit Play after 0", "enter Menu"]
        );
    }

    #[test]
    fn multiple_requests_collapse_to_last() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        let mut harness = Harness::new();
        machine.start(&mut harness.context());

        harness.transitions.request(SceneKind::Play);
        harness.transitions.request(SceneKind::Menu);
        machine.process_transitions(&mut harness.context());

        assert_eq!(machine.active_kind(), Some(SceneKind::Menu));
        assert_eq!(journal.lock().unwrap().len(), 3);
    }

    //=====================================================================
    // Remote Epochs
    //=====================================================================

    #[test]
    fn completions_of_old_scene_are_not_delivered() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        let mut harness = Harness::new();
        machine.start(&mut harness.context());

        harness.remote.fetch_leaderboard("Highscore", 0, 10);
        harness.transitions.request(SceneKind::Play);
        machine.process_transitions(&mut harness.context());

        let events = harness.remote.poll();
        machine.deliver_remote(events, &mut harness.context());

        assert!(journal.lock().unwrap().iter().all(|line| !line.starts_with("remote")));
    }
}
