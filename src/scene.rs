//! Screen flow: title select, play, end result.
//!
//! The machine owns the active scene; everything else it needs (session
//! configuration, randomness) arrives through `GameContext` on each call.
//! Every transition reports what happened as `SceneEvent`s so the front end
//! can drive audio and logging without inspecting scene internals.

use crate::lander::{Contact, ControlInput, Difficulty, Outcome};
use crate::session::{Session, SessionConfig};
use rand::Rng;

/// Discrete key presses that drive menus and quitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    /// Numeric difficulty choice (1-3).
    Choice(u8),
    Confirm,
    /// Leave the current screen: ends a flight early, quits elsewhere.
    Abort,
    /// Exit the game from any scene.
    Quit,
}

#[derive(Debug, Clone)]
pub enum Scene {
    TitleSelect,
    Playing(Box<Session>),
    EndResult { session: Box<Session>, score: u32 },
    Terminated,
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::TitleSelect => "title",
            Scene::Playing(_) => "playing",
            Scene::EndResult { .. } => "end",
            Scene::Terminated => "terminated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    SessionStarted(Difficulty),
    ThrustEngaged,
    ThrustCut,
    Landed { score: u32 },
    Crashed,
    /// Flight ended early by the player; the result screen follows.
    Aborted,
    ReturnedToTitle,
    Quit,
}

/// Explicit per-run context handed to every transition.
pub struct GameContext<R: Rng> {
    pub config: SessionConfig,
    pub rng: R,
}

impl<R: Rng> GameContext<R> {
    pub fn new(config: SessionConfig, rng: R) -> Self {
        Self { config, rng }
    }
}

pub struct SceneMachine {
    scene: Scene,
}

impl Default for SceneMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneMachine {
    pub fn new() -> Self {
        Self {
            scene: Scene::TitleSelect,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.scene, Scene::Terminated)
    }

    /// Handle a discrete key press in the current scene.
    pub fn handle_key<R: Rng>(&mut self, key: MenuKey, ctx: &mut GameContext<R>) -> Vec<SceneEvent> {
        if key == MenuKey::Quit {
            return self.quit();
        }

        match (&self.scene, key) {
            (Scene::Playing(_), MenuKey::Abort) => self.abort_session(),
            (_, MenuKey::Abort) => self.quit(),
            (Scene::TitleSelect, MenuKey::Choice(choice)) => match Difficulty::from_choice(choice) {
                Some(difficulty) => self.start_session(difficulty, ctx),
                None => Vec::new(),
            },
            (Scene::EndResult { .. }, MenuKey::Confirm) => {
                self.scene = Scene::TitleSelect;
                vec![SceneEvent::ReturnedToTitle]
            }
            _ => Vec::new(),
        }
    }

    fn start_session<R: Rng>(
        &mut self,
        difficulty: Difficulty,
        ctx: &mut GameContext<R>,
    ) -> Vec<SceneEvent> {
        let session = Session::new(difficulty, &ctx.config, &mut ctx.rng);
        log::info!(
            "Session started: difficulty={} spawn=({:.1}, {:.1}) angle={:.3}",
            difficulty.name(),
            session.craft.x,
            session.craft.y,
            session.craft.angle
        );
        self.scene = Scene::Playing(Box::new(session));
        vec![SceneEvent::SessionStarted(difficulty)]
    }

    /// Advance play by one tick. Outside `Playing` this does nothing.
    pub fn tick(&mut self, input: ControlInput) -> Vec<SceneEvent> {
        let Scene::Playing(session) = &mut self.scene else {
            return Vec::new();
        };

        let mut events = Vec::new();
        let was_thrusting = session.craft.thrusting;
        let contact = session.tick(input);
        let thrusting = session.craft.thrusting;

        if contact == Contact::None {
            if thrusting && !was_thrusting {
                events.push(SceneEvent::ThrustEngaged);
            } else if was_thrusting && !thrusting {
                events.push(SceneEvent::ThrustCut);
            }
            return events;
        }

        // A loop that never started this tick has nothing to cut
        if was_thrusting {
            events.push(SceneEvent::ThrustCut);
        }
        events.push(self.finish_session());
        events
    }

    fn finish_session(&mut self) -> SceneEvent {
        let scene = std::mem::replace(&mut self.scene, Scene::Terminated);
        let Scene::Playing(session) = scene else {
            self.scene = scene;
            return SceneEvent::Crashed;
        };

        let score = session.score();
        let craft = &session.craft;
        log::info!(
            "Session over: difficulty={} outcome={:?} score={} vx={:.3} vy={:.3} angle={:.3} fuel={} ticks={}",
            session.difficulty.name(),
            session.outcome,
            score,
            craft.vx,
            craft.vy,
            craft.angle,
            craft.fuel,
            session.tick_count
        );

        let event = match session.outcome {
            Some(Outcome::Landed) => SceneEvent::Landed { score },
            Some(Outcome::Quit) => SceneEvent::Aborted,
            _ => SceneEvent::Crashed,
        };
        self.scene = Scene::EndResult { session, score };
        event
    }

    /// End the running flight with a Quit outcome and show its result.
    fn abort_session(&mut self) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        if let Scene::Playing(session) = &mut self.scene {
            if session.craft.thrusting {
                events.push(SceneEvent::ThrustCut);
            }
            session.abort();
        }
        events.push(self.finish_session());
        events
    }

    /// Quit from any scene.
    pub fn quit(&mut self) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        match &mut self.scene {
            Scene::Terminated => return events,
            Scene::Playing(session) => {
                if session.craft.thrusting {
                    events.push(SceneEvent::ThrustCut);
                }
                session.abort();
                log::info!(
                    "Session aborted: difficulty={} ticks={}",
                    session.difficulty.name(),
                    session.tick_count
                );
            }
            _ => {}
        }
        log::info!("Quit from {} scene", self.scene.name());
        self.scene = Scene::Terminated;
        events.push(SceneEvent::Quit);
        events
    }
}
