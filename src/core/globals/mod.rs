//=========================================================================
// Global Engine State
//=========================================================================
//
// Separates systems (logic components) from context (per-frame data).
//
// Architecture:
//   GameSystems:  SceneStateMachine + RemoteClient + GameConfig (owned by engine)
//   FrameContext: timing + FrameInput (built each frame)
//   SceneContext: borrowed view handed to scenes
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;
mod global_systems;

//=== Public API ==========================================================

pub use global_context::{FrameContext, SceneContext};
pub use global_systems::GameSystems;
