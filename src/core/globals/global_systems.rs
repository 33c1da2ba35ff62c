//=========================================================================
// Game Systems
//=========================================================================
//
// Container for the systems that run once per frame.
//
// Contains the scene state machine, the remote client and the game
// configuration. Builds the SceneContext each frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::{FrameContext, SceneContext};
use crate::config::GameConfig;
use crate::core::host::HostFrame;
use crate::core::remote::RemoteClient;
use crate::core::scene::{MenuScene, PlayScene, Scene, SceneKind, SceneState, SceneStateMachine, TransitionQueue};

//=== GameSystems =========================================================

/// Container for frame-driven logic systems.
///
/// # Available Systems
///
/// - `scenes`: the single-active-scene state machine
/// - `remote`: identity and leaderboard client
/// - `config`: tunables handed to scene factories and updates
pub struct GameSystems {
    pub scenes: SceneStateMachine,
    pub remote: RemoteClient,
    pub config: GameConfig,
    transitions: TransitionQueue,
    started: bool,
}

impl GameSystems {
    /// Creates systems with no scenes registered.
    pub fn new(config: GameConfig, remote: RemoteClient) -> Self {
        Self {
            scenes: SceneStateMachine::new(),
            remote,
            config,
            transitions: TransitionQueue::new(),
            started: false,
        }
    }

    /// Creates systems with the menu (default) and play scenes registered.
    pub fn with_default_scenes(config: GameConfig, remote: RemoteClient) -> Self {
        let mut systems = Self::new(config, remote);
        systems
            .scenes
            .register_default(SceneKind::Menu, |config: &GameConfig| -> Box<dyn Scene> {
                Box::new(MenuScene::new(config))
            });
        systems
            .scenes
            .register(SceneKind::Play, |config: &GameConfig| -> Box<dyn Scene> {
                Box::new(PlayScene::new(config))
            });
        systems
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one frame and returns the commands it produced.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Remote Polling**: Applies completions that arrived since last frame
    /// 2. **Remote Delivery**: Hands current-epoch completions to the scene
    /// 3. **Startup**: Enters the default scene on the first frame
    /// 4. **Scene Update**: Updates the active scene with this frame's context
    /// 5. **Transition Processing**: Applies the last requested scene switch
    pub fn update(&mut self, frame: &FrameContext) -> HostFrame {
        let mut commands = HostFrame::new();
        let mut context = SceneContext {
            frame,
            config: &self.config,
            remote: &mut self.remote,
            commands: &mut commands,
            transitions: &mut self.transitions,
        };

        // 1. Poll remote completions
        let events = context.remote.poll();

        // 2. Deliver them to the active scene
        self.scenes.deliver_remote(events, &mut context);

        // 3. Enter the default scene; its calls complete on a later frame
        if !self.started {
            info!(target: "scene", "Starting scene state machine");
            self.scenes.start(&mut context);
            self.started = true;
        }

        // 4. Update the active scene
        self.scenes.update(&mut context);

        // 5. Process scene transitions
        self.scenes.process_transitions(&mut context);

        commands
    }

    /// State of the active scene, once started.
    pub fn state(&self) -> Option<SceneState> {
        self.scenes.state()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::{ElementId, HostCommand};
    use crate::core::remote::MemoryTransport;
    use crate::core::storage::MemoryStore;

    fn systems() -> GameSystems {
        let remote = RemoteClient::new(Box::new(MemoryTransport::new()), Box::new(MemoryStore::new()));
        GameSystems::with_default_scenes(GameConfig::default(), remote)
    }

    fn name_label(commands: &HostFrame) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|command| match command {
                HostCommand::SetText { element: ElementId::NameLabel, text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn startup_login_completes_on_a_later_frame() {
        let mut systems = systems();
        let frame = FrameContext::default();

        let first = systems.update(&frame);
        assert_eq!(systems.state(), Some(SceneState::Menu));
        assert_eq!(name_label(&first), vec!["Registering..."]);
        assert_eq!(systems.remote.in_flight(), 1);

        let second = systems.update(&frame);
        assert_eq!(name_label(&second), vec!["Welcome!"]);
        assert!(systems.remote.identity().is_some());
    }

    #[test]
    fn nothing_runs_before_first_update() {
        let systems = systems();
        assert_eq!(systems.state(), None);
        assert_eq!(systems.remote.in_flight(), 0);
    }
}
