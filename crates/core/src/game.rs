//! Game module - progression state machine
//!
//! [`GameController`] owns the tower and routes the single player action by
//! phase:
//!
//! | Phase | Action |
//! |-------|--------|
//! | `Loading` | ignored |
//! | `Ready` | start a run |
//! | `Playing` | commit the swinging block |
//! | `Ended` | tear the tower down |
//! | `Resetting` | ignored |
//!
//! Everything observable happens through [`GameEvent`]s, which the host drains
//! after each call to feed its renderer, animations and logs.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::block::{Block, BoxGeometry};
use crate::place::{place, PlaceOutcome};
use crate::rng::SimpleRng;
use crate::snapshot::{CurrentSnapshot, GameSnapshot};
use crate::teardown::Teardown;
use crate::tower::Tower;
use crate::types::*;

/// Something the host should react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Base block is in place; waiting for the first action.
    Ready { color_offset: u32 },
    /// A run began (score back to zero).
    Started,
    /// A new block started swinging.
    Spawned {
        index: u32,
        axis: Axis,
        score: u32,
        camera_target: f64,
    },
    /// A block was committed onto the tower.
    Placed {
        index: u32,
        axis: Axis,
        direction: f64,
        bonus: bool,
        placed: BoxGeometry,
        chopped: Option<BoxGeometry>,
        score: u32,
    },
    /// A block was committed with no overlap.
    Missed { index: u32, axis: Axis },
    /// The run is over.
    Ended { score: u32 },
    /// The tower was cut back to its base; `removed` should be animated away.
    TeardownStarted {
        teardown: Teardown,
        removed: Vec<BoxGeometry>,
    },
    /// The host reported the teardown as done.
    TeardownFinished { id: u64 },
}

/// Orchestrates a run: spawning, placement, game over and reset.
#[derive(Debug, Clone)]
pub struct GameController {
    phase: GamePhase,
    tower: Tower,
    rng: SimpleRng,
    teardown: Option<Teardown>,
    next_teardown_id: u64,
    /// Monotonic run counter (increments on every start).
    run_id: u32,
    last_bonus: bool,
    instructions_hidden: bool,
    events: Vec<GameEvent>,
}

impl GameController {
    /// Create a controller in `Loading`. Call [`GameController::load`] once the
    /// host is ready to show the base block.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let base = Block::base(rng.color_offset());
        Self {
            phase: GamePhase::Loading,
            tower: Tower::new(base),
            rng,
            teardown: None,
            next_teardown_id: 1,
            run_id: 0,
            last_bonus: false,
            instructions_hidden: false,
            events: Vec::new(),
        }
    }

    /// One-time `Loading → Ready` transition.
    pub fn load(&mut self) {
        if self.phase != GamePhase::Loading {
            return;
        }
        self.set_phase(GamePhase::Ready);
        self.events.push(GameEvent::Ready {
            color_offset: self.tower.base().color_offset(),
        });
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn tower(&self) -> &Tower {
        &self.tower
    }

    pub fn score(&self) -> u32 {
        self.tower.score()
    }

    pub fn run_id(&self) -> u32 {
        self.run_id
    }

    /// Whether the most recent placement was a perfect one.
    pub fn last_bonus(&self) -> bool {
        self.last_bonus
    }

    /// Pending reset sequence, while `Resetting`.
    pub fn teardown(&self) -> Option<Teardown> {
        self.teardown
    }

    /// Height the camera should track.
    pub fn camera_target(&self) -> f64 {
        self.tower.camera_target()
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Advance the swinging block by one step.
    pub fn on_tick(&mut self) {
        if let Some(block) = self.tower.current_mut() {
            block.tick();
        }
    }

    /// Route the player action by phase.
    ///
    /// Returns `false` when the action was ignored.
    pub fn on_action(&mut self) -> bool {
        match self.phase {
            GamePhase::Loading | GamePhase::Resetting => {
                debug!("action ignored while {}", self.phase.as_str());
                false
            }
            GamePhase::Ready => {
                self.start_game();
                true
            }
            GamePhase::Playing => {
                self.place_block();
                true
            }
            GamePhase::Ended => {
                self.restart_game();
                true
            }
        }
    }

    /// Completion signal for the teardown with the given id.
    ///
    /// Fires at most once per teardown; stale or repeated signals are ignored
    /// and return `false`.
    pub fn on_teardown_complete(&mut self, id: u64) -> bool {
        if self.phase != GamePhase::Resetting {
            return false;
        }
        match self.teardown {
            Some(td) if td.id() == id => {
                self.teardown = None;
                self.events.push(GameEvent::TeardownFinished { id });
                self.start_game();
                true
            }
            _ => {
                debug!("stale teardown completion {id}");
                false
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase;
        out.run_id = self.run_id;
        out.score = self.tower.score();
        out.tower_len = self.tower.len();
        out.blocks.clear();
        out.blocks.extend(self.tower.blocks().map(Block::geometry));
        out.current = self.tower.current().map(|b| CurrentSnapshot {
            index: b.index(),
            axis: b.axis(),
            state: b.state(),
            geometry: b.geometry(),
        });
        out.camera_target = self.tower.camera_target();
        out.last_bonus = self.last_bonus;
        out.show_instructions = !self.instructions_hidden;
        out.teardown = self.teardown;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            debug!("phase {} -> {}", self.phase.as_str(), phase.as_str());
        }
        self.phase = phase;
    }

    fn start_game(&mut self) {
        if self.phase == GamePhase::Playing {
            return;
        }
        self.run_id = self.run_id.wrapping_add(1);
        self.last_bonus = false;
        self.set_phase(GamePhase::Playing);
        info!("run {} started", self.run_id);
        self.events.push(GameEvent::Started);
        self.add_block();
    }

    fn place_block(&mut self) {
        let Some(mut moving) = self.tower.take_current() else {
            self.add_block();
            return;
        };

        let result = place(&mut moving, self.tower.top());
        let placement = match result {
            Ok(p) => p,
            Err(e) => {
                warn!("placement rejected ({}): {e}", e.code());
                if moving.state() == BlockState::Missed {
                    self.tower.set_current(moving);
                    self.end_game();
                } else {
                    self.add_block();
                }
                return;
            }
        };

        let index = moving.index();
        match placement.outcome {
            PlaceOutcome::Missed => {
                info!("block {index} missed (overlap {:.3})", placement.overlap);
                self.tower.set_current(moving);
                self.events.push(GameEvent::Missed {
                    index,
                    axis: placement.axis,
                });
            }
            PlaceOutcome::Stopped {
                placed,
                chopped,
                bonus,
            } => {
                self.tower.push(moving);
                self.last_bonus = bonus;
                debug!(
                    "block {index} placed, overlap {:.3}{}",
                    placement.overlap,
                    if bonus { " (perfect)" } else { "" }
                );
                self.events.push(GameEvent::Placed {
                    index,
                    axis: placement.axis,
                    direction: placement.direction,
                    bonus,
                    placed,
                    chopped,
                    score: self.tower.score(),
                });
            }
        }

        self.add_block();
    }

    fn add_block(&mut self) {
        if self.tower.has_missed() {
            self.end_game();
            return;
        }

        let start = if self.rng.next_bool() {
            MOVE_AMOUNT
        } else {
            -MOVE_AMOUNT
        };
        let block = Block::stacked_on(self.tower.top()).starting_at(start);
        let index = block.index();
        let axis = block.axis();
        self.tower.set_current(block);
        if self.tower.len() + 1 >= INSTRUCTIONS_HIDE_AT {
            self.instructions_hidden = true;
        }

        self.events.push(GameEvent::Spawned {
            index,
            axis,
            score: self.tower.score(),
            camera_target: self.tower.camera_target(),
        });
    }

    fn end_game(&mut self) {
        self.set_phase(GamePhase::Ended);
        let score = self.tower.score();
        info!("run {} ended with score {score}", self.run_id);
        self.events.push(GameEvent::Ended { score });
    }

    fn restart_game(&mut self) {
        let from_score = self.tower.score();
        let removed: Vec<BoxGeometry> = self
            .tower
            .truncate_to_base()
            .iter()
            .map(Block::geometry)
            .collect();

        let teardown = Teardown::new(self.next_teardown_id, removed.len() as u32, from_score);
        self.next_teardown_id += 1;
        self.teardown = Some(teardown);
        self.last_bonus = false;
        self.set_phase(GamePhase::Resetting);
        debug!(
            "teardown {} of {} blocks over {}ms",
            teardown.id(),
            teardown.removed(),
            teardown.duration_ms()
        );
        self.events
            .push(GameEvent::TeardownStarted { teardown, removed });
    }
}
