//=========================================================================
// Scene Test Support
//=========================================================================
//
// Owns everything a SceneContext borrows, so scene tests can drive a
// scene frame by frame without an engine.
//
//=========================================================================

use crate::config::GameConfig;
use crate::core::globals::{FrameContext, SceneContext};
use crate::core::host::{ElementId, HostCommand, HostEvent, PointerPhase};
use crate::core::input::FrameInput;
use crate::core::remote::{MemoryTransport, RemoteClient, RemoteEvent, RemoteTransport};
use crate::core::scene::{Scene, SceneKind, TransitionQueue};
use crate::core::storage::MemoryStore;

pub(crate) struct Harness {
    pub frame: FrameContext,
    pub config: GameConfig,
    pub remote: RemoteClient,
    pub commands: Vec<HostCommand>,
    pub transitions: TransitionQueue,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_transport(Box::new(MemoryTransport::new()), GameConfig::default())
    }

    pub fn with_transport(transport: Box<dyn RemoteTransport>, config: GameConfig) -> Self {
        Self {
            frame: FrameContext::default(),
            config,
            remote: RemoteClient::new(transport, Box::new(MemoryStore::new())),
            commands: Vec::new(),
            transitions: TransitionQueue::new(),
        }
    }

    pub fn context(&mut self) -> SceneContext<'_> {
        SceneContext {
            frame: &self.frame,
            config: &self.config,
            remote: &mut self.remote,
            commands: &mut self.commands,
            transitions: &mut self.transitions,
        }
    }

    /// Runs one frame of `dt` seconds: remote delivery, then update.
    pub fn step(&mut self, scene: &mut dyn Scene, dt: f32, events: Vec<HostEvent>) {
        let mut input = FrameInput::new();
        for event in events {
            input.record(event);
        }
        let total = self.frame.total_time + dt;
        self.frame = FrameContext::new(dt, total, input);

        let completions: Vec<RemoteEvent> = self.remote.poll();
        for event in completions {
            scene.on_remote(event, &mut self.context());
        }
        scene.update(&mut self.context());
    }

    /// Runs `frames` empty frames of `dt` seconds.
    pub fn run(&mut self, scene: &mut dyn Scene, dt: f32, frames: usize) {
        for _ in 0..frames {
            self.step(scene, dt, Vec::new());
        }
    }

    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn take_switch(&mut self) -> Option<SceneKind> {
        self.transitions.take_last()
    }

    /// Last text sent to `element`, if any.
    pub fn last_text(&self, element: ElementId) -> Option<&str> {
        self.commands.iter().rev().find_map(|command| match command {
            HostCommand::SetText { element: e, text } if *e == element => Some(text.as_str()),
            _ => None,
        })
    }

    /// Last visibility sent to `element`, if any.
    pub fn last_visible(&self, element: ElementId) -> Option<bool> {
        self.commands.iter().rev().find_map(|command| match command {
            HostCommand::SetVisible { element: e, visible } if *e == element => Some(*visible),
            _ => None,
        })
    }
}

pub(crate) fn pointer(element: ElementId, phase: PointerPhase) -> HostEvent {
    HostEvent::Pointer { element, phase }
}

pub(crate) fn click(element: ElementId) -> HostEvent {
    pointer(element, PointerPhase::Up)
}
