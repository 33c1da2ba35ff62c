//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use deep_debt::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::config::GameConfig;
pub use crate::engine::{Engine, EngineBuilder, HostLink};

// Global systems and context
pub use crate::core::globals::{FrameContext, GameSystems, SceneContext};

// Host interface
pub use crate::core::host::{ElementId, HostCommand, HostEvent, HostFrame, PointerPhase};

// Scene system
pub use crate::core::scene::{Scene, SceneKind, SceneState};

// Remote services
pub use crate::core::remote::{MemoryTransport, OfflineTransport, RemoteClient, RemoteTransport};
pub use crate::core::storage::{KeyValueStore, MemoryStore};
