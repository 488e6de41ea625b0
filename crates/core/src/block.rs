//! Block module - a single tier of the tower
//!
//! A block is an axis-aligned box anchored at its minimum corner. The newest
//! block swings along its working axis until the player commits it; every
//! block below it is frozen.

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Renderable box: what collaborators need to draw a block or a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub position: Vec3,
    pub dimension: Dimension,
    pub color: Rgb,
}

impl BoxGeometry {
    /// Lower edge along a horizontal axis.
    pub fn min(&self, axis: Axis) -> f64 {
        self.position.get(axis)
    }

    /// Upper edge along a horizontal axis.
    pub fn max(&self, axis: Axis) -> f64 {
        self.position.get(axis) + self.dimension.along(axis)
    }
}

/// Signed swing speed of the block at `index`.
///
/// The magnitude is `min(MAX_SPEED, BASE_SPEED + SPEED_STEP * index)`; blocks
/// start out travelling towards negative coordinates.
pub fn speed_for_index(index: u32) -> f64 {
    -(BASE_SPEED + SPEED_STEP * index as f64).min(MAX_SPEED)
}

/// Color of tier `index` in a tower seeded with `color_offset`.
///
/// Consecutive tiers step slowly around the hue circle, so the tower reads as
/// one continuous gradient.
pub fn tier_color(index: u32, color_offset: u32) -> Rgb {
    let offset = index.wrapping_add(color_offset) as f64;
    let channel = |phase: f64| ((0.3 * offset + phase).sin() * 55.0 + 200.0).round() as u8;
    Rgb::new(channel(0.0), channel(2.0), channel(4.0))
}

/// One tier of the tower, placed or in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    index: u32,
    dimension: Dimension,
    position: Vec3,
    color_offset: u32,
    state: BlockState,
    speed: f64,
    direction: f64,
}

impl Block {
    /// The foundation of a new tower. Always `Stopped`.
    pub fn base(color_offset: u32) -> Self {
        let speed = speed_for_index(0);
        Self {
            index: 0,
            dimension: Dimension::new(BASE_WIDTH, BLOCK_HEIGHT, BASE_DEPTH),
            position: Vec3::new(0.0, 0.0, 0.0),
            color_offset,
            state: BlockState::Stopped,
            speed,
            direction: speed,
        }
    }

    /// A new active block resting on `target`, inheriting its footprint.
    ///
    /// The block starts aligned with `target`; use [`Block::starting_at`] to
    /// move it to one end of its sweep.
    pub fn stacked_on(target: &Block) -> Self {
        let index = target.index + 1;
        let dimension = target.dimension;
        let speed = speed_for_index(index);
        Self {
            index,
            dimension,
            position: Vec3::new(
                target.position.x,
                dimension.height * index as f64,
                target.position.z,
            ),
            color_offset: target.color_offset,
            state: BlockState::Active,
            speed,
            direction: speed,
        }
    }

    /// Set the coordinate along the working axis.
    pub fn starting_at(mut self, value: f64) -> Self {
        let axis = self.axis();
        self.position.set(axis, value);
        self
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Working axis; derived from the index.
    pub fn axis(&self) -> Axis {
        Axis::for_index(self.index)
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn color_offset(&self) -> u32 {
        self.color_offset
    }

    pub fn state(&self) -> BlockState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == BlockState::Active
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn color(&self) -> Rgb {
        if self.index == 0 {
            BASE_COLOR
        } else {
            tier_color(self.index, self.color_offset)
        }
    }

    pub fn geometry(&self) -> BoxGeometry {
        BoxGeometry {
            position: self.position,
            dimension: self.dimension,
            color: self.color(),
        }
    }

    /// Advance the swing by one step. Frozen blocks ignore ticks.
    ///
    /// The direction reverses when the block sits on the sweep bound and is
    /// still heading outwards; the step itself is clamped to the bound so the
    /// working coordinate never leaves `[-MOVE_AMOUNT, MOVE_AMOUNT]`.
    pub fn tick(&mut self) {
        if self.state != BlockState::Active {
            return;
        }

        let axis = self.axis();
        let value = self.position.get(axis);
        if value.abs() >= MOVE_AMOUNT && value.signum() == self.direction.signum() {
            self.reverse_direction();
        }

        let next = (value + self.direction).clamp(-MOVE_AMOUNT, MOVE_AMOUNT);
        self.position.set(axis, next);
    }

    fn reverse_direction(&mut self) {
        self.direction = if self.direction > 0.0 {
            self.speed
        } else {
            self.speed.abs()
        };
    }

    pub(crate) fn set_state(&mut self, state: BlockState) {
        self.state = state;
    }

    /// Copy `target`'s horizontal footprint (x, z, width, depth).
    pub(crate) fn snap_footprint_to(&mut self, target: &Block) {
        self.position.x = target.position.x;
        self.position.z = target.position.z;
        self.dimension.width = target.dimension.width;
        self.dimension.depth = target.dimension.depth;
    }

    pub(crate) fn settle(&mut self, placed: &BoxGeometry) {
        self.position = placed.position;
        self.dimension = placed.dimension;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_block() -> Block {
        Block::stacked_on(&Block::base(0))
    }

    #[test]
    fn base_block_defaults() {
        let base = Block::base(17);
        assert_eq!(base.index(), 0);
        assert_eq!(base.state(), BlockState::Stopped);
        assert_eq!(base.dimension(), Dimension::new(10.0, 2.0, 10.0));
        assert_eq!(base.position(), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(base.color(), BASE_COLOR);
        assert_eq!(base.color_offset(), 17);
    }

    #[test]
    fn stacked_block_inherits_footprint_and_rises() {
        let base = Block::base(3);
        let b1 = Block::stacked_on(&base);
        assert_eq!(b1.index(), 1);
        assert_eq!(b1.axis(), Axis::X);
        assert_eq!(b1.state(), BlockState::Active);
        assert_eq!(b1.position().y, 2.0);
        assert_eq!(b1.dimension(), base.dimension());
        assert_eq!(b1.color_offset(), 3);

        let b2 = Block::stacked_on(&b1);
        assert_eq!(b2.axis(), Axis::Z);
        assert_eq!(b2.position().y, 4.0);
    }

    #[test]
    fn speed_grows_with_index_and_is_clamped() {
        assert!((speed_for_index(1) - -0.105).abs() < 1e-12);
        let mut prev = 0.0;
        for i in 0..2000 {
            let mag = speed_for_index(i).abs();
            assert!(mag >= prev);
            assert!(mag <= MAX_SPEED);
            prev = mag;
        }
        assert_eq!(speed_for_index(800).abs(), MAX_SPEED);
        assert_eq!(speed_for_index(10_000).abs(), MAX_SPEED);
    }

    #[test]
    fn new_block_moves_with_its_speed() {
        let b = first_block();
        assert_eq!(b.direction(), b.speed());
        assert!(b.direction() < 0.0);
    }

    #[test]
    fn tick_moves_along_working_axis_only() {
        let mut b = first_block().starting_at(0.0);
        b.tick();
        assert!((b.position().x - -0.105).abs() < 1e-12);
        assert_eq!(b.position().z, 0.0);
        assert_eq!(b.position().y, 2.0);
    }

    #[test]
    fn tick_stays_within_sweep_bound() {
        let mut b = first_block().starting_at(0.0);
        for _ in 0..200 {
            b.tick();
            let x = b.position().x;
            assert!((-MOVE_AMOUNT..=MOVE_AMOUNT).contains(&x), "x = {x}");
        }
    }

    #[test]
    fn direction_flips_at_the_bound() {
        let mut b = first_block().starting_at(-MOVE_AMOUNT);
        assert!(b.direction() < 0.0);
        b.tick();
        assert!(b.direction() > 0.0);
        assert!((b.position().x - (-MOVE_AMOUNT + 0.105)).abs() < 1e-12);

        let mut b = first_block().starting_at(MOVE_AMOUNT);
        b.tick();
        assert!(b.direction() < 0.0, "heading inward already, no flip");
        assert!(b.position().x < MOVE_AMOUNT);
    }

    #[test]
    fn direction_does_not_flip_inside_the_sweep() {
        let mut b = first_block().starting_at(5.0);
        for _ in 0..10 {
            b.tick();
            assert!(b.direction() < 0.0);
        }
    }

    #[test]
    fn long_sweep_visits_both_ends() {
        let mut b = first_block().starting_at(0.0);
        let mut flips = 0;
        let mut last = b.direction();
        for _ in 0..2000 {
            b.tick();
            if b.direction().signum() != last.signum() {
                flips += 1;
            }
            last = b.direction();
        }
        assert!(flips >= 4, "flips = {flips}");
    }

    #[test]
    fn stopped_block_ignores_ticks() {
        let mut base = Block::base(0);
        let before = base.position();
        base.tick();
        assert_eq!(base.position(), before);
    }

    #[test]
    fn tier_colors_stay_in_pastel_band() {
        for i in 1..200 {
            let c = tier_color(i, 42);
            for ch in [c.r, c.g, c.b] {
                assert!((145..=255).contains(&ch), "channel {ch}");
            }
        }
    }

    #[test]
    fn tier_color_depends_on_index_plus_offset() {
        assert_eq!(tier_color(5, 10), tier_color(10, 5));
        assert_eq!(tier_color(0, 0), Rgb::new(200, 250, 158));
    }
}
