//=========================================================================
// Frame & Scene Context
//=========================================================================
//
// Explicit per-frame data passed into every update.
//
// Contains:
// - FrameContext: timing and the host input snapshot (owned per frame)
// - SceneContext: FrameContext plus the services a scene may use
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use crate::core::host::{HostCommand, HostFrame};
use crate::core::input::FrameInput;
use crate::core::remote::RemoteClient;
use crate::core::scene::{SceneKind, TransitionQueue};

//=== FrameContext ========================================================

/// Timing and input for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameContext {
    /// Frame time for cosmetic motion.
    pub delta_time: f32,

    /// Unscaled frame time. Timers and tasks run on this.
    pub real_delta_time: f32,

    /// Unscaled seconds since the engine started.
    pub total_time: f32,

    pub input: FrameInput,
}

impl FrameContext {
    pub fn new(real_delta_time: f32, total_time: f32, input: FrameInput) -> Self {
        Self {
            delta_time: real_delta_time,
            real_delta_time,
            total_time,
            input,
        }
    }
}

//=== SceneContext ========================================================

/// Everything a scene may read or use during one call.
///
/// Scenes receive `&mut SceneContext` in every lifecycle method. This keeps
/// the remote client, configuration and command output explicit instead of
/// global.
pub struct SceneContext<'a> {
    pub frame: &'a FrameContext,
    pub config: &'a GameConfig,
    pub remote: &'a mut RemoteClient,

    /// Commands for the host, in order.
    pub commands: &'a mut HostFrame,

    /// Scene switch requests, applied at the tick boundary.
    pub transitions: &'a mut TransitionQueue,
}

impl SceneContext<'_> {
    /// Queues a command for the host.
    pub fn send(&mut self, command: HostCommand) {
        self.commands.push(command);
    }

    /// Requests a switch to `kind` at the end of this frame.
    pub fn switch_to(&mut self, kind: SceneKind) {
        self.transitions.request(kind);
    }
}
