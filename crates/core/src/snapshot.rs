use serde::{Deserialize, Serialize};

use crate::block::BoxGeometry;
use crate::teardown::Teardown;
use crate::types::{Axis, BlockState, GamePhase};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentSnapshot {
    pub index: u32,
    pub axis: Axis,
    pub state: BlockState,
    pub geometry: BoxGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub run_id: u32,
    pub score: u32,
    pub tower_len: usize,
    /// Committed blocks, base first.
    pub blocks: Vec<BoxGeometry>,
    pub current: Option<CurrentSnapshot>,
    pub camera_target: f64,
    pub last_bonus: bool,
    pub show_instructions: bool,
    pub teardown: Option<Teardown>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.phase = GamePhase::Loading;
        self.run_id = 0;
        self.score = 0;
        self.tower_len = 0;
        self.blocks.clear();
        self.current = None;
        self.camera_target = 0.0;
        self.last_bonus = false;
        self.show_instructions = true;
        self.teardown = None;
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            phase: GamePhase::Loading,
            run_id: 0,
            score: 0,
            tower_len: 0,
            blocks: Vec::new(),
            current: None,
            camera_target: 0.0,
            last_bonus: false,
            show_instructions: true,
            teardown: None,
        };
        s.clear();
        s
    }
}
