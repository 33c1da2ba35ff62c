//=========================================================================
// Play Scene
//=========================================================================
//
// One timed round: click for debt, buy generators, submit the result and
// show the leaderboard.
//
// States:
//   Playing  → countdown running, economy ticking, shop open
//   Ending   → shop closed, camera returning, score submitted
//   Finished → leaderboard fetched after the post-submit delay
//
// Frame order while playing:
//   1. dispatch pointer actions
//   2. advance the timer, run whole-second economy ticks
//   3. counter, rate, affordability and sway updates
//   4. begin_ending() on the frame the countdown crosses zero
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
use crate::core::economy::format::{compact, grouped, money_compact};
use crate::core::economy::{AddOutcome, EconomyEngine, Generator, GeneratorId, PurchaseOutcome};
use crate::core::globals::SceneContext;
use crate::core::host::{
    website_texture, ElementId, HostCommand, PointerPhase, SoundCue, Tint, BLOCKED_WEBSITE, PLAY_MUSIC,
};
use crate::core::input::{Action, HandlerRegistry};
use crate::core::remote::{RemoteEvent, ScoreEntry};
use crate::core::tasks::easing::{circular_ease_out, lerp};
use crate::core::tasks::{Task, TaskScheduler};
use crate::core::timer::{beat_signal, GameTimer};

//=== Constants ===========================================================

const HINT_TEXT: &str = "Exchange debt to gain\n  debt automatically!";

/// Vertical offset of the hint below its generator.
const HINT_OFFSET: f32 = -26.0;

/// Distance the generators slide down while the camera returns.
const GENERATOR_SLIDE: f32 = 128.0;

//=== PlayAction ==========================================================

/// Pointer actions bound on the play scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayAction {
    WebsiteEnter,
    WebsiteExit,
    WebsiteClick,
    GeneratorEnter(GeneratorId),
    GeneratorStay(GeneratorId),
    GeneratorExit(GeneratorId),
    GeneratorClick(GeneratorId),
    ExitEnter,
    ExitLeave,
    ExitClick,
}

impl Action for PlayAction {}

//=== PlayScene ===========================================================

pub struct PlayScene {
    economy: EconomyEngine,
    timer: GameTimer,
    tasks: TaskScheduler<Stage>,
    stage: Stage,
    handlers: HandlerRegistry<PlayAction>,
    state: SceneState,
    view: LeaderboardView,
    hover_duration: f32,

    /// Set when a generator opened the popup this frame, so an exit from
    /// the previous generator in the same frame does not close it.
    popup_opened: bool,

    /// Reveal progress last sent to the host, per generator.
    shown_reveal: Vec<f32>,
}

impl PlayScene {
    pub fn new(config: &GameConfig) -> Self {
        let economy = EconomyEngine::from_config(config);
        let generators = economy.generators().len();

        Self {
            economy,
            timer: GameTimer::new(config.round_length, config.tick_interval),
            tasks: TaskScheduler::new(),
            stage: Stage::new(),
            handlers: HandlerRegistry::new(),
            state: SceneState::Playing,
            view: LeaderboardView::default(),
            hover_duration: config.hover_duration,
            popup_opened: false,
            shown_reveal: vec![0.0; generators],
        }
    }

    fn bind_handlers(&mut self) {
        let handlers = &mut self.handlers;
        handlers.bind(ElementId::Website, PointerPhase::Enter, PlayAction::WebsiteEnter);
        handlers.bind(ElementId::Website, PointerPhase::Exit, PlayAction::WebsiteExit);
        handlers.bind(ElementId::Website, PointerPhase::Up, PlayAction::WebsiteClick);

        for i in 0..self.shown_reveal.len() {
            let element = ElementId::Generator(i);
            handlers.bind(element, PointerPhase::Enter, PlayAction::GeneratorEnter(i));
            handlers.bind(element, PointerPhase::Stay, PlayAction::GeneratorStay(i));
            handlers.bind(element, PointerPhase::Exit, PlayAction::GeneratorExit(i));
            handlers.bind(element, PointerPhase::Up, PlayAction::GeneratorClick(i));
        }

        handlers.bind(ElementId::Exit, PointerPhase::Enter, PlayAction::ExitEnter);
        handlers.bind(ElementId::Exit, PointerPhase::Exit, PlayAction::ExitLeave);
        handlers.bind(ElementId::Exit, PointerPhase::Up, PlayAction::ExitClick);
        handlers.set_enabled(ElementId::Exit, false);
    }

    //--- Actions ----------------------------------------------------------

    fn handle(&mut self, action: PlayAction, context: &mut SceneContext<'_>) {
        let hover = self.hover_duration;

        match action {
            PlayAction::WebsiteEnter => hover_in(&mut self.tasks, ElementId::Website, hover),
            PlayAction::WebsiteExit => hover_out(&mut self.tasks, ElementId::Website, hover),
            PlayAction::WebsiteClick => {
                hover_in(&mut self.tasks, ElementId::Website, hover);
                self.stage.push(HostCommand::PlaySound(SoundCue::Click));
                if self.state == SceneState::Playing {
                    self.click_website(context.config.website_textures);
                }
            }
            PlayAction::GeneratorEnter(id) => {
                self.open_popup(id);
                hover_in(&mut self.tasks, ElementId::Generator(id), hover);
            }
            PlayAction::GeneratorStay(id) => {
                if let Some(generator) = self.economy.generator(id) {
                    self.stage.push(HostCommand::SetText {
                        element: ElementId::Popup,
                        text: popup_text(generator),
                    });
                }
            }
            PlayAction::GeneratorExit(id) => {
                if !self.popup_opened {
                    self.stage.push(HostCommand::SetVisible {
                        element: ElementId::Popup,
                        visible: false,
                    });
                }
                hover_out(&mut self.tasks, ElementId::Generator(id), hover);
            }
            PlayAction::GeneratorClick(id) => {
                self.buy(id);
                hover_in(&mut self.tasks, ElementId::Generator(id), hover);
            }
            PlayAction::ExitEnter => hover_in(&mut self.tasks, ElementId::Exit, hover),
            PlayAction::ExitLeave => hover_out(&mut self.tasks, ElementId::Exit, hover),
            PlayAction::ExitClick => {
                info!(target: "scene", "Leaving round");
                context.switch_to(SceneKind::Menu);
            }
        }
    }

    fn click_website(&mut self, textures: u32) {
        match self.economy.add_resource(1) {
            Ok(outcome) => self.show_unlocks(&outcome),
            Err(err) => debug!(target: "scene", "Click not counted: {}", err),
        }
        self.stage.push(HostCommand::BurstParticles {
            at: ElementId::Website,
            amount: 1,
        });

        let index = rand::thread_rng().gen_range(0..textures.max(1));
        self.stage.push(HostCommand::SetTexture {
            element: ElementId::Website,
            path: website_texture(index),
        });
    }

    fn open_popup(&mut self, id: GeneratorId) {
        self.stage.push(HostCommand::AnchorTo {
            element: ElementId::Popup,
            anchor: ElementId::Generator(id),
            offset_y: 0.0,
        });
        self.stage.push(HostCommand::SetVisible {
            element: ElementId::Popup,
            visible: true,
        });
        self.popup_opened = true;

        self.tasks.start(Task::linear(self.hover_duration, |stage: &mut Stage, x| {
            stage.push(HostCommand::SetScale {
                element: ElementId::Popup,
                scale: circular_ease_out(x),
            });
        }));
    }

    fn buy(&mut self, id: GeneratorId) {
        match self.economy.purchase(id) {
            Ok(PurchaseOutcome::Purchased {
                new_price,
                hint_dismissed,
                ..
            }) => {
                if let Some(generator) = self.economy.generator(id) {
                    self.stage.push(HostCommand::SetText {
                        element: ElementId::Generator(id),
                        text: format!("{} {}", generator.name(), money_compact(new_price)),
                    });
                }
                if hint_dismissed {
                    self.stage.push(HostCommand::SetVisible {
                        element: ElementId::Hint,
                        visible: false,
                    });
                }
                self.stage.push(HostCommand::PlaySound(SoundCue::Purchase));
            }
            Ok(PurchaseOutcome::Rejected(reason)) => {
                debug!(target: "scene", "Purchase of generator {} rejected: {:?}", id, reason);
            }
            Err(err) => {
                debug!(target: "scene", "Purchase of generator {} failed: {}", id, err);
            }
        }
    }

    fn show_unlocks(&mut self, outcome: &AddOutcome) {
        for &id in &outcome.revealed {
            self.stage.push(HostCommand::SetVisible {
                element: ElementId::Generator(id),
                visible: true,
            });
        }

        if let Some(anchor) = outcome.hint_anchor {
            self.stage.push(HostCommand::AnchorTo {
                element: ElementId::Hint,
                anchor: ElementId::Generator(anchor),
                offset_y: HINT_OFFSET,
            });
        }
        if outcome.hint.is_some() {
            self.stage.push(HostCommand::SetVisible {
                element: ElementId::Hint,
                visible: true,
            });
        }
    }

    //--- Round ------------------------------------------------------------

    fn play_round(&mut self, real_dt: f32, context: &mut SceneContext<'_>) {
        let config = context.config;

        if self.timer.round_elapsed() > config.beat_warmup {
            let zoom = config.default_zoom + beat_signal(self.stage.time, config.bpm) * config.beat_zoom;
            self.stage.push(HostCommand::SetCameraZoom(zoom));
        }

        let step = self.timer.advance(real_dt);
        self.stage.push(HostCommand::SetText {
            element: ElementId::Timer,
            text: self.timer.label(),
        });

        for _ in 0..step.ticks {
            let outcome = match self.economy.tick() {
                Ok(outcome) => outcome,
                Err(err) => {
                    debug!(target: "scene", "Tick skipped: {}", err);
                    break;
                }
            };
            self.show_unlocks(&outcome);

            let amount = tick_burst(self.economy.ledger().generation_rate());
            if amount > 0 {
                self.stage.push(HostCommand::BurstParticles {
                    at: ElementId::RateCounter,
                    amount,
                });
            }
        }

        self.show_counters();

        if step.expired_now {
            self.begin_ending(context);
        }
    }

    fn show_counters(&mut self) {
        let ledger = self.economy.ledger();
        let balance = ledger.balance();

        self.stage.push(HostCommand::SetText {
            element: ElementId::DebtCounter,
            text: format!("Debt ${}", grouped(ledger.displayed_balance())),
        });
        self.stage.push(HostCommand::SetText {
            element: ElementId::RateCounter,
            text: format!("${}/s", ledger.generation_rate()),
        });

        for generator in self.economy.generators() {
            let element = ElementId::Generator(generator.id());
            let tint = if balance >= generator.price() { Tint::WHITE } else { Tint::DIMMED };
            self.stage.push(HostCommand::SetTint { element, tint });
            self.stage.push(HostCommand::SetRotation {
                element,
                radians: sway(self.stage.time, generator.id() as f32, 64.0),
            });
        }
    }

    /// Runs once, on the frame the countdown crosses zero.
    fn begin_ending(&mut self, context: &mut SceneContext<'_>) {
        let config = context.config;
        let balance = self.economy.ledger().balance();
        info!(target: "scene", "Round over with {} debt", balance);

        self.state = SceneState::Ending;
        self.economy.close();
        for i in 0..self.shown_reveal.len() {
            self.handlers.set_enabled(ElementId::Generator(i), false);
        }
        self.handlers.set_enabled(ElementId::Exit, true);

        let stage = &mut self.stage;
        stage.push(HostCommand::SetTexture {
            element: ElementId::Website,
            path: BLOCKED_WEBSITE.to_string(),
        });
        stage.push(HostCommand::SetCameraZoom(config.default_zoom));
        for (element, visible) in [(ElementId::Timer, false), (ElementId::Popup, false), (ElementId::Exit, true)] {
            stage.push(HostCommand::SetVisible { element, visible });
        }

        let from = stage.camera_y;
        let generators = self.shown_reveal.len();
        self.tasks.start(Task::linear(config.camera_return, move |stage: &mut Stage, x| {
            stage.camera_y = lerp(from, 0.0, x);
            stage.push(HostCommand::SetCameraOffset { x: 0.0, y: stage.camera_y });
            for i in 0..generators {
                stage.push(HostCommand::SetOffset {
                    element: ElementId::Generator(i),
                    x: 0.0,
                    y: -GENERATOR_SLIDE * x,
                });
            }
        }));

        context.remote.submit_scores(vec![
            ScoreEntry::new(&config.leaderboard, balance),
            ScoreEntry::new(&config.total_statistic, balance),
            ScoreEntry::new(&config.attempts_statistic, 1),
        ]);
    }

    fn after_round(&mut self, real_dt: f32, context: &mut SceneContext<'_>) {
        let config = context.config;
        let input = &context.frame.input;
        self.timer.advance(real_dt);

        if self.timer.overtime() > config.drag_unlock && input.drag_held && input.drag_delta != 0.0 {
            let camera_y = self.view.scroll(self.stage.camera_y, input.drag_delta);
            if camera_y != self.stage.camera_y {
                self.stage.camera_y = camera_y;
                self.stage.push(HostCommand::SetCameraOffset { x: 0.0, y: camera_y });
            }
        }

        if self.stage.fetch_due {
            self.stage.fetch_due = false;
            self.state = SceneState::Finished;
            context
                .remote
                .fetch_leaderboard(&config.leaderboard, 0, config.fetch_count);
        }
    }

    fn show_reveals(&mut self) {
        for generator in self.economy.generators() {
            let id = generator.id();
            let reveal = generator.reveal();
            if self.shown_reveal.get(id).is_some_and(|shown| *shown != reveal) {
                self.shown_reveal[id] = reveal;
                self.stage.push(HostCommand::SetScale {
                    element: ElementId::Generator(id),
                    scale: reveal,
                });
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn economy(&self) -> &EconomyEngine {
        &self.economy
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }
}

impl Scene for PlayScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Play
    }

    fn state(&self) -> SceneState {
        self.state
    }

    fn on_enter(&mut self, context: &mut SceneContext<'_>) {
        self.stage.camera_y = context.config.play_camera_y;

        context.send(HostCommand::PlayMusic {
            path: PLAY_MUSIC,
            looped: false,
        });
        context.send(HostCommand::SetCameraOffset {
            x: 0.0,
            y: self.stage.camera_y,
        });
        context.send(HostCommand::SetTexture {
            element: ElementId::Website,
            path: website_texture(0),
        });

        for generator in self.economy.generators() {
            let id = generator.id();
            context.send(HostCommand::SetText {
                element: ElementId::Generator(id),
                text: format!("???? {}", money_compact(generator.price())),
            });
            context.send(HostCommand::SetText {
                element: ElementId::GeneratorRate(id),
                text: format!("{}/s", money_compact(generator.rate_per_unit())),
            });
            context.send(HostCommand::SetVisible {
                element: ElementId::Generator(id),
                visible: false,
            });
        }

        context.send(HostCommand::SetText {
            element: ElementId::Hint,
            text: HINT_TEXT.to_string(),
        });
        context.send(HostCommand::SetText {
            element: ElementId::Timer,
            text: self.timer.label(),
        });
        for element in [ElementId::Popup, ElementId::Hint, ElementId::Exit] {
            context.send(HostCommand::SetVisible { element, visible: false });
        }

        self.bind_handlers();
    }

    fn on_remote(&mut self, event: RemoteEvent, context: &mut SceneContext<'_>) {
        match event {
            RemoteEvent::Submit(result) => {
                if self.state != SceneState::Ending {
                    return;
                }
                if let Err(err) = result {
                    debug!(target: "scene", "Showing leaderboard despite failed submit: {}", err);
                }
                self.tasks.start(Task::after(context.config.leaderboard_delay, |stage: &mut Stage| {
                    stage.fetch_due = true;
                }));
            }
            RemoteEvent::Leaderboard(Ok(entries)) => {
                let config = context.config;
                self.view = LeaderboardView::present(
                    &entries,
                    &mut self.tasks,
                    &mut self.stage,
                    config.play_reveal_delay,
                    config.row_spacing,
                );
            }
            RemoteEvent::Leaderboard(Err(_)) => {
                self.stage.push(HostCommand::SetText {
                    element: ElementId::LeaderboardTitle,
                    text: "Can't load leaderboard.".to_string(),
                });
                self.stage.push(HostCommand::SetVisible {
                    element: ElementId::LeaderboardTitle,
                    visible: true,
                });
            }
            RemoteEvent::Login(_) | RemoteEvent::DisplayName(_) => {}
        }
    }

    fn update(&mut self, context: &mut SceneContext<'_>) {
        let frame = context.frame;
        let real_dt = frame.real_delta_time;
        self.stage.time = frame.total_time;

        for action in self.handlers.dispatch(&frame.input) {
            self.handle(action, context);
        }

        if self.state == SceneState::Playing {
            self.play_round(real_dt, context);
        } else {
            self.after_round(real_dt, context);
        }

        self.economy.step(real_dt);
        self.stage.push(HostCommand::SetScale {
            element: ElementId::DebtCounter,
            scale: self.economy.counter_scale(),
        });
        self.show_reveals();

        let time = self.stage.time;
        self.stage.push(HostCommand::SetRotation {
            element: ElementId::Website,
            radians: sway(time, 0.0, 32.0),
        });
        self.stage.push(HostCommand::SetRotation {
            element: ElementId::Exit,
            radians: sway(time, 2.0, 32.0),
        });

        self.tasks.step_all(real_dt, &mut self.stage);
        self.stage.flush_into(context.commands);
        self.popup_opened = false;
    }
}

//=== Display Helpers =====================================================

/// Particles burst at the rate counter on each tick.
pub(crate) fn tick_burst(rate: u64) -> u8 {
    if rate == 0 {
        return 0;
    }
    u8::try_from(rate / 5 + 1).unwrap_or(u8::MAX)
}

/// Hover popup body for a generator.
fn popup_text(generator: &Generator) -> String {
    format!(
        "{}\nHave: {} (${}/s)\nTotal: ${}",
        generator.description(),
        generator.owned(),
        generator.output().unwrap_or(u64::MAX),
        compact(generator.total_generated())
    )
}

//=========================================================================
// Unit Tests
//=========================================================================
