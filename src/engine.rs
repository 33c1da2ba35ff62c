//=========================================================================
// Deep Debt Engine
//
// Main entry point and coordinator for the game core.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  (Engine, HostLink)
//         │                          │        │
//         ├─ with_tps()              │        └─ host side: events in,
//         ├─ with_channel_capacity() │           command frames out
//         └─ with_config()           └─ run() / spawn()
//                                       fixed-TPS logic loop
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use crate::core::globals::{FrameContext, GameSystems};
use crate::core::host::{EventCollector, HostEvent, HostFrame, TickControl};
use crate::core::remote::{RemoteClient, RemoteTransport};
use crate::core::scene::SceneState;
use crate::core::storage::KeyValueStore;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 (host events and command frames)
/// - **Config**: [`GameConfig::default`]
///
/// # Examples
///
/// ```no_run
/// use deep_debt::core::remote::OfflineTransport;
/// use deep_debt::core::storage::MemoryStore;
/// use deep_debt::{EngineBuilder, GameConfig};
///
/// let (engine, link) = EngineBuilder::new()
///     .with_tps(120.0)
///     .with_config(GameConfig::default().with_round_length(60.0))
///     .build(OfflineTransport, MemoryStore::new());
///
/// let handle = engine.spawn();
/// while let Ok(frame) = link.commands.recv() {
///     // apply `frame` to the presentation
/// #   let _ = frame;
/// }
/// handle.join().ok();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    config: GameConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            config: GameConfig::default(),
        }
    }

    /// Sets the target ticks per second for the logic loop.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of both host channels.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Replaces the game configuration.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the engine and the host's end of its channels.
    ///
    /// The menu and play scenes are registered, with the menu as the
    /// starting scene. Nothing runs until [`Engine::run`] or
    /// [`Engine::spawn`] is called.
    pub fn build<T, K>(self, transport: T, store: K) -> (Engine, HostLink)
    where
        T: RemoteTransport + 'static,
        K: KeyValueStore + 'static,
    {
        info!(
            target: "engine",
            "Building engine (TPS: {}, channel: {})",
            self.tps,
            self.channel_capacity
        );

        let (event_tx, event_rx) = bounded(self.channel_capacity);
        let (command_tx, command_rx) = bounded(self.channel_capacity);

        let remote = RemoteClient::new(Box::new(transport), Box::new(store));
        let engine = Engine {
            systems: GameSystems::with_default_scenes(self.config, remote),
            collector: EventCollector::new(event_rx),
            commands: command_tx,
            backlog: HostFrame::new(),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            total_time: 0.0,
        };
        let link = HostLink {
            events: event_tx,
            commands: command_rx,
        };

        (engine, link)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== HostLink ============================================================

/// The host's end of the engine channels.
///
/// Dropping `events` or sending [`HostEvent::WindowClosed`] stops the
/// engine, as does dropping `commands`.
pub struct HostLink {
    pub events: Sender<HostEvent>,
    pub commands: Receiver<HostFrame>,
}

//=== Engine ==============================================================

/// Deep Debt game core runtime.
///
/// # Architecture
///
/// ```text
/// Host (window, audio, UI)
///   │ HostEvent ──bounded channel──►  Engine (logic loop @ TPS)
///   │                                   ├─► EventCollector → FrameInput
///   │                                   └─► GameSystems::update
///   ◄── HostFrame ──bounded channel───────┘
/// ```
pub struct Engine {
    systems: GameSystems,
    collector: EventCollector,
    commands: Sender<HostFrame>,
    backlog: HostFrame,
    tps: f64,
    channel_capacity: usize,
    total_time: f32,
}

impl Engine {
    //--- Execution --------------------------------------------------------

    /// Runs the logic loop on the calling thread until the host closes.
    pub fn run(mut self) {
        info!(target: "engine", "Starting engine loop (TPS: {})", self.tps);

        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);
        let mut last_frame = Instant::now();

        loop {
            let frame_start = Instant::now();
            let real_dt = frame_start.duration_since(last_frame).as_secs_f32();
            last_frame = frame_start;

            if let TickControl::Exit = self.frame(real_dt) {
                info!(target: "engine", "Engine loop exiting");
                break;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }
    }

    /// Runs the logic loop on its own thread.
    pub fn spawn(self) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run())
    }

    /// Runs one frame of `real_dt` seconds.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Event Collection**: Drains host events into a FrameInput
    /// 2. **Systems Update**: Remote delivery, scene update, transitions
    /// 3. **Command Delivery**: Sends the frame's commands to the host
    pub(crate) fn frame(&mut self, real_dt: f32) -> TickControl {
        // 1. Collect host events
        if let TickControl::Exit = self.collector.collect_frame() {
            return TickControl::Exit;
        }

        // 2. Update systems
        self.total_time += real_dt;
        let frame = FrameContext::new(real_dt, self.total_time, self.collector.take_input());
        let mut commands = self.systems.update(&frame);

        // 3. Deliver commands
        self.backlog.append(&mut commands);
        if self.backlog.is_empty() {
            return TickControl::Continue;
        }

        match self.commands.try_send(std::mem::take(&mut self.backlog)) {
            Ok(()) => TickControl::Continue,
            Err(TrySendError::Full(frame)) => {
                debug!(
                    target: "engine",
                    "Host is {} frames behind, holding {} commands",
                    self.channel_capacity,
                    frame.len()
                );
                self.backlog = frame;
                TickControl::Continue
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "engine", "Host stopped receiving commands");
                TickControl::Exit
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// State of the active scene, once the first frame has run.
    pub fn state(&self) -> Option<SceneState> {
        self.systems.state()
    }

    pub fn config(&self) -> &GameConfig {
        &self.systems.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
