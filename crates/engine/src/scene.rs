use crate::core::{BoxGeometry, GameSnapshot};
use crate::types::BlockState;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub game: GameSnapshot,
    /// Chopped fragments in flight.
    pub debris: Vec<BoxGeometry>,
    /// Blocks shrinking away during a reset.
    pub collapsing: Vec<BoxGeometry>,
    /// Height the camera looks at (eased).
    pub camera_y: f64,
    /// Score to display: live score, or the countdown while resetting.
    pub display_score: u32,
    pub paused: bool,
    /// A perfect placement happened moments ago.
    pub bonus_flash: bool,
}

impl Scene {
    /// Whether anything on screen is moving.
    pub fn is_static(&self) -> bool {
        let swinging = self
            .game
            .current
            .is_some_and(|c| c.state == BlockState::Active);
        self.paused || (!swinging && self.debris.is_empty() && self.collapsing.is_empty())
    }
}
