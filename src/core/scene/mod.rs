//=========================================================================
// Scene System
//=========================================================================
//
// Manages the single active screen and scene-to-scene switching.
//
// Architecture:
//   SceneStateMachine
//     ├─ factories: HashMap<SceneKind, SceneFactory>
//     └─ active: Box<dyn Scene>
//
// Flow:
//   deliver_remote() → Scene::on_remote()
//   update()         → Scene::update()
//   process_transitions() → on_exit → drop → new epoch → build → on_enter
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::SceneContext;
use crate::core::remote::RemoteEvent;

//=== Module Declarations =================================================

mod leaderboard;
mod menu;
mod play;
mod stage;
mod state_machine;
mod transition_queue;

#[cfg(test)]
pub(crate) mod test_support;

//=== Public API ==========================================================

pub use leaderboard::{row_text, short_name, LeaderboardView};
pub use menu::{MenuAction, MenuScene};
pub use play::{PlayAction, PlayScene};
pub use stage::Stage;
pub use state_machine::{SceneFactory, SceneStateMachine};
pub use transition_queue::TransitionQueue;

//=== Scene Identity ======================================================

/// The two screens of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Menu,
    Play,
}

/// Externally visible game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneState {
    /// Title screen with identity bootstrap and leaderboard.
    Menu,

    /// Round in progress.
    Playing,

    /// Countdown has ended; waiting on submission and the delay.
    Ending,

    /// Leaderboard fetched and revealing.
    Finished,
}

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and update logic.
///
/// A scene is built fresh by its factory on every switch and dropped when
/// switched away from, taking its tasks and handlers with it.
///
/// Only `kind`, `state` and `update` are required:
///
/// ```rust
/// # use deep_debt::core::scene::{Scene, SceneKind, SceneState};
/// # use deep_debt::core::globals::SceneContext;
/// struct Splash;
///
/// impl Scene for Splash {
///     fn kind(&self) -> SceneKind { SceneKind::Menu }
///     fn state(&self) -> SceneState { SceneState::Menu }
///     fn update(&mut self, _context: &mut SceneContext<'_>) {}
/// }
/// ```
pub trait Scene: Send {
    fn kind(&self) -> SceneKind;

    fn state(&self) -> SceneState;

    /// Called once after construction, before the first update.
    fn on_enter(&mut self, _context: &mut SceneContext<'_>) {}

    /// Called once before the scene is dropped.
    fn on_exit(&mut self, _context: &mut SceneContext<'_>) {}

    /// Called for each remote completion addressed to this scene.
    fn on_remote(&mut self, _event: RemoteEvent, _context: &mut SceneContext<'_>) {}

    /// Called every tick while the scene is active.
    fn update(&mut self, context: &mut SceneContext<'_>);
}
