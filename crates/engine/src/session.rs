//! Session: the host-side driver around [`GameController`].
//!
//! The session owns everything time-based that the core deliberately does not:
//! the fixed-step clock, pause, the camera glide, falling fragments, the reset
//! collapse animation and the deferred teardown completion. It is still pure
//! (no I/O besides the optional event log), so it can be stepped in tests.

use log::{debug, info, warn};

use crate::camera::Camera;
use crate::config::Config;
use crate::core::{BoxGeometry, GameController, GameEvent, Teardown};
use crate::debris::{Debris, DebrisField};
use crate::event_log::{EventLog, EventRecord};
use crate::scene::Scene;
use crate::scheduler::Scheduler;
use crate::types::{GameAction, GamePhase, CAMERA_MOVE_MS};

/// How long the "perfect" highlight stays up after a bonus placement.
pub const BONUS_FLASH_MS: u32 = 600;

#[derive(Debug, Clone)]
struct Collapse {
    teardown: Teardown,
    removed: Vec<BoxGeometry>,
    started_ms: u64,
}

impl Collapse {
    fn elapsed_ms(&self, now_ms: u64) -> u32 {
        now_ms.saturating_sub(self.started_ms).min(u32::MAX as u64) as u32
    }
}

pub struct Session {
    game: GameController,
    tick_ms: u32,
    clock_ms: u64,
    paused: bool,
    camera: Camera,
    debris: DebrisField,
    collapse: Option<Collapse>,
    scheduler: Scheduler,
    event_log: Option<EventLog>,
    bonus_flash_ms: u32,
    /// Reused between pumps.
    inbox: Vec<GameEvent>,
}

impl Session {
    /// Build a session from configuration, opening the event log if one is set.
    pub fn new(config: &Config) -> Self {
        let event_log = config
            .event_log
            .as_ref()
            .and_then(|path| match EventLog::open(path) {
                Ok(log) => Some(log),
                Err(e) => {
                    warn!("event log {} unavailable: {e}", path.display());
                    None
                }
            });
        info!("session seed {} tick {}ms", config.seed, config.tick_ms);
        Self::from_parts(GameController::new(config.seed), config.tick_ms, event_log)
    }

    /// A session without an event log.
    pub fn with_seed(seed: u32, tick_ms: u32) -> Self {
        Self::from_parts(GameController::new(seed), tick_ms, None)
    }

    fn from_parts(game: GameController, tick_ms: u32, event_log: Option<EventLog>) -> Self {
        let camera = Camera::new(game.camera_target());
        let mut session = Self {
            game,
            tick_ms: tick_ms.max(1),
            clock_ms: 0,
            paused: false,
            camera,
            debris: DebrisField::new(),
            collapse: None,
            scheduler: Scheduler::new(),
            event_log,
            bonus_flash_ms: 0,
            inbox: Vec::new(),
        };
        session.game.load();
        session.pump_events();
        session
    }

    pub fn game(&self) -> &GameController {
        &self.game
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn debris(&self) -> &DebrisField {
        &self.debris
    }

    /// Score to display: the live score, or the countdown during a reset.
    pub fn display_score(&self) -> u32 {
        match &self.collapse {
            Some(c) => c.teardown.countdown_at(c.elapsed_ms(self.clock_ms)),
            None => self.game.score(),
        }
    }

    /// Apply a player intent between ticks.
    ///
    /// Returns `false` when the intent had no effect.
    pub fn apply(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                if self.game.phase() == GamePhase::Loading {
                    return false;
                }
                self.paused = !self.paused;
                debug!("paused: {}", self.paused);
                true
            }
            GameAction::Action => {
                if self.paused {
                    return false;
                }
                let handled = self.game.on_action();
                self.pump_events();
                handled
            }
        }
    }

    /// Advance one fixed timestep.
    pub fn step(&mut self) {
        if self.paused {
            return;
        }

        let dt = self.tick_ms;
        self.clock_ms += dt as u64;

        self.game.on_tick();
        self.camera.advance(dt);
        self.debris.advance(dt);
        self.bonus_flash_ms = self.bonus_flash_ms.saturating_sub(dt);

        if let Some(id) = self.scheduler.poll(self.clock_ms) {
            if !self.game.on_teardown_complete(id) {
                debug!("teardown {id} completion was not accepted");
            }
        }

        self.pump_events();
    }

    pub fn scene_into(&self, out: &mut Scene) {
        self.game.snapshot_into(&mut out.game);

        out.debris.clear();
        out.debris.extend(self.debris.geometries());

        out.collapsing.clear();
        if let Some(c) = &self.collapse {
            let elapsed = c.elapsed_ms(self.clock_ms);
            for (i, g) in c.removed.iter().enumerate() {
                let scale = c.teardown.removal_scale(i as u32, elapsed);
                if scale <= 0.0 {
                    continue;
                }
                out.collapsing.push(shrink_about_center(g, scale));
            }
        }

        out.camera_y = self.camera.look_at();
        out.display_score = self.display_score();
        out.paused = self.paused;
        out.bonus_flash = self.bonus_flash_ms > 0;
    }

    pub fn scene(&self) -> Scene {
        let mut s = Scene::default();
        self.scene_into(&mut s);
        s
    }

    fn pump_events(&mut self) {
        let mut inbox = std::mem::take(&mut self.inbox);
        inbox.extend(self.game.drain_events());
        for event in &inbox {
            self.record(event);
            self.handle(event);
        }
        inbox.clear();
        self.inbox = inbox;
    }

    fn record(&mut self, event: &GameEvent) {
        let Some(log) = self.event_log.as_mut() else {
            return;
        };
        let record = EventRecord {
            t_ms: self.clock_ms,
            run: self.game.run_id(),
            event,
        };
        if let Err(e) = log.write(&record) {
            warn!("event log write failed, disabling it: {e}");
            self.event_log = None;
        }
    }

    fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Ready { .. } | GameEvent::Started | GameEvent::Missed { .. } => {}
            GameEvent::Spawned { camera_target, .. } => {
                self.camera.retarget(*camera_target, CAMERA_MOVE_MS);
            }
            GameEvent::Placed {
                axis,
                direction,
                bonus,
                placed,
                chopped,
                ..
            } => {
                if let Some(chopped) = chopped {
                    self.debris
                        .spawn(Debris::new(*chopped, placed, *axis, *direction));
                }
                if *bonus {
                    self.bonus_flash_ms = BONUS_FLASH_MS;
                }
            }
            GameEvent::Ended { score } => {
                debug!("game over at {score}");
            }
            GameEvent::TeardownStarted { teardown, removed } => {
                self.scheduler
                    .schedule(teardown.id(), self.clock_ms, teardown.duration_ms());
                self.camera
                    .retarget(self.game.camera_target(), teardown.duration_ms());
                self.bonus_flash_ms = 0;
                self.collapse = Some(Collapse {
                    teardown: *teardown,
                    removed: removed.clone(),
                    started_ms: self.clock_ms,
                });
            }
            GameEvent::TeardownFinished { .. } => {
                self.collapse = None;
            }
        }
    }
}

/// `g` scaled by `scale` around its centre (positions are min corners).
fn shrink_about_center(g: &BoxGeometry, scale: f64) -> BoxGeometry {
    let d = g.dimension;
    let inset = (1.0 - scale) / 2.0;
    let mut out = *g;
    out.position.x += d.width * inset;
    out.position.y += d.height * inset;
    out.position.z += d.depth * inset;
    out.dimension.width *= scale;
    out.dimension.height *= scale;
    out.dimension.depth *= scale;
    out
}
