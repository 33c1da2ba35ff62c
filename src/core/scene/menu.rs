//=========================================================================
// Menu Scene
//=========================================================================
//
// Title screen: identity bootstrap, display name prompt and the
// leaderboard.
//
// Flow:
//   on_enter  → music, status texts, login with the stored token
//   Login     → status text, leaderboard fetch (success or not)
//   Start     → Play when a display name exists, otherwise prompt first
//   NameEntered → update_display_name → Play if a start was pending
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::leaderboard::LeaderboardView;
use super::stage::{hover_in, hover_out, sway, Stage};
use super::{Scene, SceneKind, SceneState};
use crate::config::GameConfig;
use crate::core::globals::SceneContext;
use crate::core::host::{ElementId, HostCommand, PointerPhase, Tint, MENU_MUSIC};
use crate::core::input::{Action, HandlerRegistry};
use crate::core::remote::RemoteEvent;
use crate::core::tasks::TaskScheduler;
use crate::core::timer::beat_signal;

//=== Texts ===============================================================

const NAME_PROMPT: &str = "Leaderboard user name:";

//=== MenuAction ==========================================================

/// Pointer actions bound on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    StartEnter,
    StartExit,
    Start,
    NameEnter,
    NameExit,
    Rename,
}

impl Action for MenuAction {}

//=== MenuScene ===========================================================

pub struct MenuScene {
    tasks: TaskScheduler<Stage>,
    stage: Stage,
    handlers: HandlerRegistry<MenuAction>,
    view: LeaderboardView,
    hover_duration: f32,

    /// Preview of the open name prompt.
    prompt: Option<String>,

    /// Start was pressed without a display name.
    start_pending: bool,
}

impl MenuScene {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tasks: TaskScheduler::new(),
            stage: Stage::new(),
            handlers: HandlerRegistry::new(),
            view: LeaderboardView::default(),
            hover_duration: config.hover_duration,
            prompt: None,
            start_pending: false,
        }
    }

    fn bind_handlers(&mut self) {
        let handlers = &mut self.handlers;
        handlers.bind(ElementId::Start, PointerPhase::Enter, MenuAction::StartEnter);
        handlers.bind(ElementId::Start, PointerPhase::Exit, MenuAction::StartExit);
        handlers.bind(ElementId::Start, PointerPhase::Up, MenuAction::Start);
        handlers.bind(ElementId::NameLabel, PointerPhase::Enter, MenuAction::NameEnter);
        handlers.bind(ElementId::NameLabel, PointerPhase::Exit, MenuAction::NameExit);
        handlers.bind(ElementId::NameLabel, PointerPhase::Up, MenuAction::Rename);
    }

    //--- Actions ----------------------------------------------------------

    fn handle(&mut self, action: MenuAction, context: &mut SceneContext<'_>) {
        match action {
            MenuAction::StartEnter => hover_in(&mut self.tasks, ElementId::Start, self.hover_duration),
            MenuAction::StartExit => hover_out(&mut self.tasks, ElementId::Start, self.hover_duration),
            MenuAction::Start => {
                if context.remote.display_name().is_some() {
                    info!(target: "scene", "Starting round");
                    context.switch_to(SceneKind::Play);
                } else {
                    self.start_pending = true;
                    self.open_prompt(NAME_PROMPT.to_string(), context);
                }
            }
            MenuAction::NameEnter => self.set_name_tint(Tint::WHITE),
            MenuAction::NameExit => self.set_name_tint(Tint::BLACK),
            MenuAction::Rename => self.open_prompt(NAME_PROMPT.to_string(), context),
        }
    }

    fn set_name_tint(&mut self, tint: Tint) {
        self.stage.push(HostCommand::SetTint {
            element: ElementId::NameLabel,
            tint,
        });
    }

    //--- Name Prompt ------------------------------------------------------

    fn open_prompt(&mut self, message: String, context: &mut SceneContext<'_>) {
        let preview = match context.remote.display_name() {
            Some(name) => name.to_string(),
            None => guest_name(),
        };

        context.send(HostCommand::PromptName {
            message,
            preview: preview.clone(),
        });
        self.prompt = Some(preview);
    }

    fn answer_prompt(&mut self, answer: Option<String>, context: &mut SceneContext<'_>) {
        let Some(preview) = self.prompt.take() else {
            debug!(target: "scene", "Ignoring name entry without an open prompt");
            return;
        };

        let name = match answer {
            Some(name) => name,
            None if context.remote.display_name().is_none() => preview,
            None => {
                self.start_pending = false;
                return;
            }
        };

        context.remote.update_display_name(&name);
    }

    //--- Frame Update -----------------------------------------------------

    fn scroll(&mut self, held: bool, delta: f32) {
        if !held || delta == 0.0 {
            return;
        }

        let camera_y = self.view.scroll(self.stage.camera_y, delta);
        if camera_y != self.stage.camera_y {
            self.stage.camera_y = camera_y;
            self.stage.push(HostCommand::SetCameraOffset { x: 0.0, y: camera_y });
        }
    }

    fn animate(&mut self, config: &GameConfig) {
        let time = self.stage.time;
        let zoom = config.default_zoom + beat_signal(time, config.bpm) * config.beat_zoom;

        self.stage.push(HostCommand::SetCameraZoom(zoom));
        self.stage.push(HostCommand::SetRotation {
            element: ElementId::Title,
            radians: sway(time, 0.0, 32.0),
        });
        self.stage.push(HostCommand::SetRotation {
            element: ElementId::Start,
            radians: sway(time, 1.0, 32.0),
        });
    }
}

impl Scene for MenuScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Menu
    }

    fn state(&self) -> SceneState {
        SceneState::Menu
    }

    fn on_enter(&mut self, context: &mut SceneContext<'_>) {
        context.send(HostCommand::PlayMusic {
            path: MENU_MUSIC,
            looped: true,
        });
        context.send(HostCommand::SetText {
            element: ElementId::LeaderboardTitle,
            text: "Loading leaderboard...".to_string(),
        });

        let (_, is_new) = context.remote.login_stored();
        let status = if is_new { "Registering..." } else { "Logging in..." };
        context.send(HostCommand::SetText {
            element: ElementId::NameLabel,
            text: status.to_string(),
        });

        self.bind_handlers();
    }

    fn on_remote(&mut self, event: RemoteEvent, context: &mut SceneContext<'_>) {
        match event {
            RemoteEvent::Login(result) => {
                let status = match result {
                    Ok(identity) => match identity.display_name {
                        Some(name) => format!("Welcome, {}", name),
                        None => "Welcome!".to_string(),
                    },
                    Err(err) => format!("Something went wrong. {}", err),
                };
                context.send(HostCommand::SetText {
                    element: ElementId::NameLabel,
                    text: status,
                });

                let config = context.config;
                context
                    .remote
                    .fetch_leaderboard(&config.leaderboard, 0, config.fetch_count);
            }
            RemoteEvent::DisplayName(Ok(name)) => {
                context.send(HostCommand::SetText {
                    element: ElementId::NameLabel,
                    text: format!("Welcome, {}", name),
                });
                if self.start_pending {
                    info!(target: "scene", "Display name set, starting round");
                    context.switch_to(SceneKind::Play);
                }
            }
            RemoteEvent::DisplayName(Err(err)) => {
                self.open_prompt(format!("Something went wrong. {}", err), context);
            }
            RemoteEvent::Leaderboard(Ok(entries)) => {
                context.send(HostCommand::SetText {
                    element: ElementId::LeaderboardTitle,
                    text: "Deepest in debt:".to_string(),
                });
                let config = context.config;
                self.view = LeaderboardView::present(
                    &entries,
                    &mut self.tasks,
                    &mut self.stage,
                    config.menu_reveal_delay,
                    config.row_spacing,
                );
            }
            RemoteEvent::Leaderboard(Err(_)) => {
                context.send(HostCommand::SetText {
                    element: ElementId::LeaderboardTitle,
                    text: "Can't load leaderboard.".to_string(),
                });
            }
            RemoteEvent::Submit(_) => {}
        }
    }

    fn update(&mut self, context: &mut SceneContext<'_>) {
        let frame = context.frame;
        let config = context.config;
        self.stage.time = frame.total_time;

        for action in self.handlers.dispatch(&frame.input) {
            self.handle(action, context);
        }
        if let Some(answer) = frame.input.name_entry.clone() {
            self.answer_prompt(answer, context);
        }

        self.scroll(frame.input.drag_held, frame.input.drag_delta);
        self.animate(config);

        self.tasks.step_all(frame.real_delta_time, &mut self.stage);
        self.stage.flush_into(context.commands);
    }
}

/// Random placeholder name offered in the first prompt.
fn guest_name() -> String {
    format!("Guest #{}", rand::thread_rng().gen_range(0..999_999))
}

//=========================================================================
// Unit Tests
//=========================================================================
